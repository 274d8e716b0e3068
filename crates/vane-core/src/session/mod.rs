//! Client shell session state.
//!
//! A session owns one mutable headline list and at most one result set.
//! Rows carry stable identifiers so that edits and deletes key on identity
//! rather than position, which would shift under mid-list deletion.
//!
//! The phase machine is `Editing` -> `Scoring` -> `Scored`; any headline
//! mutation drops the results and returns to `Editing`, while an abandoned
//! scoring attempt leaves previous results untouched.

#[cfg(test)]
mod tests;

use thiserror::Error;

use crate::record::ScoreRecord;

/// Phase of a scoring session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Headlines are mutable; no request is in flight.
    Editing,
    /// A scoring round trip is in flight; the list is frozen.
    Scoring,
    /// Results are present and aligned with the list that produced them.
    Scored,
}

/// One editable headline slot with a stable identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineRow {
    pub id: u64,
    pub text: String,
}

/// Errors from session operations that violate the phase machine.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no non-empty headlines to score")]
    NoHeadlines,

    #[error("a scoring request is already in flight")]
    ScoringInFlight,

    #[error("no scoring request is in flight")]
    NotScoring,

    #[error("unknown headline row {id}")]
    UnknownRow { id: u64 },
}

/// Session-scoped state for one user: the headline list, the last result
/// set, and the current phase.
#[derive(Debug, Default)]
pub struct Session {
    rows: Vec<HeadlineRow>,
    results: Option<Vec<ScoreRecord>>,
    scoring: bool,
    next_id: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a session pre-populated with headlines.
    pub fn with_headlines<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut session = Self::new();
        for text in lines {
            session.push_row(text);
        }
        session
    }

    pub fn phase(&self) -> SessionPhase {
        if self.scoring {
            SessionPhase::Scoring
        } else if self.results.is_some() {
            SessionPhase::Scored
        } else {
            SessionPhase::Editing
        }
    }

    pub fn rows(&self) -> &[HeadlineRow] {
        &self.rows
    }

    pub fn results(&self) -> Option<&[ScoreRecord]> {
        self.results.as_deref()
    }

    /// Appends an empty row and returns its id.
    pub fn add_row(&mut self) -> Result<u64, SessionError> {
        self.ensure_editable()?;
        let id = self.push_row(String::new());
        self.drop_results();
        Ok(id)
    }

    /// Replaces the text of the row with the given id.
    pub fn edit_row(&mut self, id: u64, text: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_editable()?;
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(SessionError::UnknownRow { id })?;
        row.text = text.into();
        self.drop_results();
        Ok(())
    }

    /// Removes the row with the given id.
    pub fn delete_row(&mut self, id: u64) -> Result<(), SessionError> {
        self.ensure_editable()?;
        let index = self
            .rows
            .iter()
            .position(|row| row.id == id)
            .ok_or(SessionError::UnknownRow { id })?;
        self.rows.remove(index);
        self.drop_results();
        Ok(())
    }

    /// Replaces the whole list (file load or bulk paste). Fresh ids are
    /// assigned; nothing from the previous list survives.
    pub fn replace_all<I>(&mut self, lines: I) -> Result<(), SessionError>
    where
        I: IntoIterator<Item = String>,
    {
        self.ensure_editable()?;
        self.rows.clear();
        for text in lines {
            self.push_row(text);
        }
        self.drop_results();
        Ok(())
    }

    /// Freezes the list and returns the trimmed, non-empty headlines to
    /// send. Fails without a phase change when nothing scorable remains.
    pub fn begin_scoring(&mut self) -> Result<Vec<String>, SessionError> {
        if self.scoring {
            return Err(SessionError::ScoringInFlight);
        }
        let batch: Vec<String> = self
            .rows
            .iter()
            .map(|row| row.text.trim())
            .filter(|text| !text.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        if batch.is_empty() {
            return Err(SessionError::NoHeadlines);
        }
        self.scoring = true;
        Ok(batch)
    }

    /// Installs the result set produced by the in-flight request.
    pub fn complete_scoring(&mut self, records: Vec<ScoreRecord>) -> Result<(), SessionError> {
        if !self.scoring {
            return Err(SessionError::NotScoring);
        }
        self.scoring = false;
        self.results = Some(records);
        Ok(())
    }

    /// Abandons the in-flight request. Previous results, if any, remain
    /// untouched.
    pub fn fail_scoring(&mut self) -> Result<(), SessionError> {
        if !self.scoring {
            return Err(SessionError::NotScoring);
        }
        self.scoring = false;
        Ok(())
    }

    /// Discards the result set, keeping the headline list intact.
    pub fn clear_results(&mut self) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.results = None;
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), SessionError> {
        if self.scoring {
            return Err(SessionError::ScoringInFlight);
        }
        Ok(())
    }

    fn push_row(&mut self, text: String) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.push(HeadlineRow { id, text });
        id
    }

    fn drop_results(&mut self) {
        self.results = None;
    }
}
