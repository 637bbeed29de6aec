use clap::Parser;
use ngs_log_reader::{LogSource, watch_live};
use std::process;
use std::time::Duration;
use tokio_stream::StreamExt;
use tracing_subscriber::EnvFilter;

/// Tails PSO2 (NGS) log files and prints decoded lines.
#[derive(Parser)]
#[command(name = "ngs-log-reader", version, about)]
struct Args {
    /// Log category to follow (e.g. ChatLog, ActionLog), or a file path
    /// with --path
    target: String,

    /// Treat TARGET as the path of an existing log file and read it once
    #[arg(short, long)]
    path: bool,

    /// Seconds between polls in live mode
    #[arg(long, default_value_t = 1)]
    interval: u64,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if args.path {
        match LogSource::open_path(&args.target).await {
            Ok(source) => {
                for line in source.poll().await {
                    println!("{}", line);
                }
            }
            Err(e) => {
                eprintln!("Error reading log file: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    match watch_live(&args.target, Some(Duration::from_secs(args.interval))).await {
        Ok(mut stream) => {
            while let Some(lines) = stream.next().await {
                for line in lines {
                    println!("{}", line);
                }
            }
        }
        Err(e) => {
            eprintln!("Error opening log source: {}", e);
            process::exit(1);
        }
    }
}
