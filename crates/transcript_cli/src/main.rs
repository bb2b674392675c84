//! Command-line front end for the transcript tools.

mod batch;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use transcript_engine::{
    Availability, DocumentFetcher, DocumentWriter, FetchSettings, ReqwestFetcher,
};
use transcript_gateway::GatewayState;
use transcript_logging::LogDestination;

#[derive(Parser)]
#[command(name = "transcripts")]
#[command(about = "Fetch, proxy, and batch-download transcript PDFs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Upstream document server base URL
    #[arg(
        long,
        global = true,
        env = "TRANSCRIPTS_UPSTREAM",
        default_value = transcript_engine::DEFAULT_BASE_URL
    )]
    upstream: String,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log debug detail
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP proxy gateway
    Serve {
        /// Address to listen on
        #[arg(long, env = "TRANSCRIPTS_BIND", default_value = "127.0.0.1:8080")]
        bind: SocketAddr,
    },

    /// Download one transcript to disk
    Fetch {
        /// 8-digit student identifier
        identifier: String,

        /// Directory to save into
        #[arg(short, long, default_value = "downloads")]
        output: PathBuf,
    },

    /// Probe whether a transcript exists upstream
    Check {
        /// 8-digit student identifier
        identifier: String,
    },

    /// Download every identifier in a manifest file, one at a time
    Batch {
        /// Manifest with one identifier per line
        manifest: PathBuf,

        /// Directory to save into
        #[arg(short, long, default_value = "downloads")]
        output: PathBuf,

        /// Milliseconds to wait between downloads
        #[arg(long, default_value_t = 800)]
        pacing_ms: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let settings = FetchSettings {
        base_url: cli.upstream.clone(),
        ..FetchSettings::default()
    };
    let fetcher =
        Arc::new(ReqwestFetcher::new(settings).context("building the upstream client")?);

    match cli.command {
        Commands::Serve { bind } => {
            let state = Arc::new(GatewayState::new(fetcher));
            transcript_gateway::serve(bind, state).await?;
        }

        Commands::Fetch { identifier, output } => {
            let payload = fetcher.fetch_document(&identifier).await?;
            let writer = DocumentWriter::new(output);
            let path = writer.write(&payload.filename, &payload.bytes)?;
            println!("saved {} ({} bytes)", path.display(), payload.bytes.len());
        }

        Commands::Check { identifier } => match fetcher.check_existence(&identifier).await? {
            Availability::Available => println!("{identifier}: available"),
            Availability::Missing => {
                println!("{identifier}: not found");
                std::process::exit(1);
            }
        },

        Commands::Batch {
            manifest,
            output,
            pacing_ms,
        } => {
            let view = batch::run(fetcher, &manifest, output, Duration::from_millis(pacing_ms))
                .await?;
            if view.errored > 0 {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let destination = match &cli.log_file {
        Some(path) => LogDestination::Both(path),
        None => LogDestination::Terminal,
    };
    transcript_logging::initialize(destination, level);
}
