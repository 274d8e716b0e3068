//! Vane CLI: the terminal client shell.
//!
//! Loads headlines from a file, sends them to a running scoring service,
//! prints the labeled results, and exports them as a dated CSV.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;

use vane::client::ApiClient;
use vane::config::ClientConfig;
use vane::record::ScoreRecord;
use vane::session::Session;
use vane::{export, input};

#[derive(Parser)]
#[command(
    name = "vane",
    about = "Score headline sentiment against a vane scoring service"
)]
struct Cli {
    /// File of headlines to score (.txt, .csv, or .json).
    #[arg(required_unless_present = "check")]
    input: Option<PathBuf>,

    /// Source tag used in the exported file name.
    #[arg(required_unless_present = "check")]
    source: Option<String>,

    /// Service base URL (defaults to VANE_API_BASE_URL).
    #[arg(long)]
    base_url: Option<String>,

    /// Scoring route (defaults to VANE_API_PATH).
    #[arg(long)]
    path: Option<String>,

    /// Round-trip timeout in seconds (defaults to VANE_TIMEOUT_SECS).
    #[arg(long)]
    timeout: Option<u64>,

    /// Directory for the exported CSV.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Probe GET /status and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(path) = cli.path {
        config.path = path;
    }
    if let Some(secs) = cli.timeout {
        config.timeout = Duration::from_secs(secs);
    }

    let client = ApiClient::new(&config)?;

    if cli.check {
        let status = client
            .status()
            .await
            .with_context(|| format!("service unreachable at {}", config.status_url()))?;
        println!("{}", status.status);
        return Ok(());
    }

    // clap enforces presence when --check is absent.
    let (Some(input_path), Some(source)) = (cli.input, cli.source) else {
        bail!("an input file and a source tag are required");
    };

    let lines = input::load_headlines_from_path(&input_path)?;
    if lines.is_empty() {
        bail!("no headlines found in {}", input_path.display());
    }

    let mut session = Session::new();
    session.replace_all(lines)?;
    let batch = session.begin_scoring()?;

    tracing::info!(
        count = batch.len(),
        endpoint = %client.endpoint(),
        "Scoring headlines"
    );

    let records = match client.score(&batch).await {
        Ok(records) => records,
        Err(err) => {
            session.fail_scoring()?;
            bail!("scoring failed: {err}");
        }
    };
    session.complete_scoring(records)?;

    let records = session.results().unwrap_or_default();
    print_results(records);

    let filename = export::export_filename(&source, chrono::Local::now().date_naive());
    let out_path = cli.output_dir.join(filename);
    export::write_csv(&out_path, records)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    println!("Results saved to {}", out_path.display());

    Ok(())
}

fn print_results(records: &[ScoreRecord]) {
    let width = records
        .iter()
        .map(|r| r.label.len())
        .chain(["label".len()])
        .max()
        .unwrap_or(5);

    println!("{:<width$}  {:>7}  headline", "label", "score");
    for record in records {
        let score = record
            .score
            .map(|s| format!("{s:.4}"))
            .unwrap_or_else(|| "-".to_string());
        println!("{:<width$}  {:>7}  {}", record.label, score, record.headline);
    }
}
