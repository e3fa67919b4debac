mod display;
mod state;

use crate::state::messages::{NetworkRequest, NetworkResponse};
use crate::state::network::NetworkWorker;
use crate::state::refresher::PeriodicRefresher;
use crate::state::settings::TrackerSettings;
use log::info;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let run_once = match handle_cli_args() {
        CliAction::Exit => return Ok(()),
        CliAction::RunOnce => true,
        CliAction::Run => false,
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = TrackerSettings::load();
    let matcher = settings.matcher();
    let college = settings.college.clone().unwrap_or_else(|| "Michigan".into());
    info!(
        "tracking {college} alumni, scanning every {}s",
        settings.interval.as_secs()
    );

    let (request_tx, request_rx) = mpsc::channel::<NetworkRequest>(16);
    let (response_tx, mut response_rx) = mpsc::channel::<NetworkResponse>(16);

    let worker = NetworkWorker::new(matcher, request_rx, response_tx);
    let worker_task = tokio::spawn(worker.run());

    let refresher_task = if run_once {
        None
    } else {
        let refresher = PeriodicRefresher::new(request_tx.clone(), settings.interval);
        Some(tokio::spawn(refresher.run()))
    };

    // Kick off the first scan immediately.
    request_tx.send(NetworkRequest::ScanMatchups).await?;

    while let Some(response) = response_rx.recv().await {
        match response {
            NetworkResponse::ScanCompleted { outcome } => {
                display::print_outcome(&outcome, &college);
            }
            NetworkResponse::Error { message } => {
                display::print_error(&message);
            }
        }
        if run_once {
            break;
        }
    }

    if let Some(task) = refresher_task {
        task.abort();
    }
    worker_task.abort();

    Ok(())
}

enum CliAction {
    Run,
    RunOnce,
    Exit,
}

fn handle_cli_args() -> CliAction {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return CliAction::Run;
    };

    match arg.as_str() {
        "--once" => CliAction::RunOnce,
        "-h" | "--help" => {
            println!("{}", usage_text());
            CliAction::Exit
        }
        "-V" | "--version" => {
            println!("wolvewatch {}", env!("CARGO_PKG_VERSION"));
            CliAction::Exit
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "wolvewatch - spot college alumni in live NFL games

Usage:
  wolvewatch            scan every WOLVEWATCH_INTERVAL_SECS (default 300)
  wolvewatch --once     run a single scan and exit
  wolvewatch --help
  wolvewatch --version

Environment:
  WOLVEWATCH_COLLEGE          target institution (default Michigan)
  WOLVEWATCH_EXCLUDE          comma-separated confusable names to reject
  WOLVEWATCH_INTERVAL_SECS    seconds between scans (default 300, min 30)
  RUST_LOG                    log filter (default info)"
}
