//! HTTP gateway for the vane scoring pipeline (used by the `vane-server`
//! binary and integration tests).

pub mod gateway;
