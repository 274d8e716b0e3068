mod common;

use common::harness::spawn_stub_server;

use vane::classifier::STUB_LABELS;
use vane::client::{ApiClient, ClientError};
use vane::config::ClientConfig;
use vane::session::{Session, SessionPhase};
use vane::{export, input};

fn batch(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| t.to_string()).collect()
}

#[tokio::test]
async fn status_round_trip() {
    let server = spawn_stub_server(false).await;
    let client = ApiClient::new(&server.client_config()).unwrap();

    let status = client.status().await.unwrap();

    assert_eq!(status.status, "OK");
}

#[tokio::test]
async fn scoring_round_trip_aligns_records_with_input() {
    let server = spawn_stub_server(false).await;
    let client = ApiClient::new(&server.client_config()).unwrap();
    let headlines = batch(&["Stocks rally", "Oil dips", "Tech gains"]);

    let records = client.score(&headlines).await.unwrap();

    assert_eq!(records.len(), 3);
    for (record, headline) in records.iter().zip(&headlines) {
        assert_eq!(&record.headline, headline);
        assert!(STUB_LABELS.contains(&record.label.as_str()));
        // The default labels-only response carries no confidences.
        assert!(record.score.is_none());
    }
}

#[tokio::test]
async fn scores_flow_through_when_the_service_includes_them() {
    let server = spawn_stub_server(true).await;
    let client = ApiClient::new(&server.client_config()).unwrap();
    let headlines = batch(&["A", "B"]);

    let records = client.score(&headlines).await.unwrap();

    assert_eq!(records.len(), 2);
    for record in &records {
        let score = record.score.expect("confidence expected");
        assert!((0.0..=1.0).contains(&score));
    }
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    // Bind-then-drop leaves a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig {
        base_url: format!("http://{addr}"),
        timeout: std::time::Duration::from_secs(2),
        ..Default::default()
    };
    let client = ApiClient::new(&config).unwrap();

    let err = client.score(&batch(&["A"])).await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
    assert!(err.to_string().starts_with("request error"));
}

#[tokio::test]
async fn full_shell_flow_from_file_to_export() {
    let server = spawn_stub_server(false).await;
    let client = ApiClient::new(&server.client_config()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("stories.csv");
    std::fs::write(
        &input_path,
        "headline,source\nStocks rally as inflation cools,wire\nOil prices dip,wire\n",
    )
    .unwrap();

    let mut session = Session::new();
    session
        .replace_all(input::load_headlines_from_path(&input_path).unwrap())
        .unwrap();
    let headlines = session.begin_scoring().unwrap();
    let records = client.score(&headlines).await.unwrap();
    session.complete_scoring(records).unwrap();

    assert_eq!(session.phase(), SessionPhase::Scored);
    let results = session.results().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].headline, "Stocks rally as inflation cools");

    let out_path = dir.path().join("scores.csv");
    export::write_csv(&out_path, results).unwrap();
    let exported = std::fs::read_to_string(&out_path).unwrap();

    let mut lines = exported.lines();
    assert_eq!(lines.next(), Some("headline,label,score"));
    assert_eq!(lines.count(), 2);
}

#[tokio::test]
async fn failed_round_trip_leaves_previous_results_untouched() {
    let server = spawn_stub_server(false).await;
    let client = ApiClient::new(&server.client_config()).unwrap();

    let mut session = Session::with_headlines(batch(&["A", "B"]));
    let headlines = session.begin_scoring().unwrap();
    let records = client.score(&headlines).await.unwrap();
    session.complete_scoring(records).unwrap();

    // Second attempt against a dead endpoint: the error is surfaced and
    // the scored state survives.
    let dead = ClientConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        timeout: std::time::Duration::from_secs(1),
        ..Default::default()
    };
    let dead_client = ApiClient::new(&dead).unwrap();

    let headlines = session.begin_scoring().unwrap();
    let err = dead_client.score(&headlines).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    session.fail_scoring().unwrap();

    assert_eq!(session.phase(), SessionPhase::Scored);
    assert_eq!(session.results().unwrap().len(), 2);
}
