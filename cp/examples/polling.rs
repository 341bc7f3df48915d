//! Owner polls aggregate progress while a worker reports in the background.
//!
//! Run with: RUST_LOG=ctxprogress=debug cargo run -p ctxprogress --example polling

use std::time::Duration;

use ctxprogress::{Scope, start_reporting};
use eyre::Result;
use tracing::info;

const STEPS: i64 = 100;

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();
}

async fn worker() {
    let reporter = start_reporting();
    for step in 1..=STEPS {
        reporter.report(step, STEPS);
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();

    let (scope, receiver) = Scope::background().with_progress_receiver();
    let mut handle = scope.spawn(worker());

    let mut ticker = tokio::time::interval(Duration::from_millis(50));
    loop {
        tokio::select! {
            joined = &mut handle => {
                joined?;
                break;
            }
            _ = ticker.tick() => {
                let progress = receiver.snapshot();
                match progress.percent() {
                    Some(percent) => println!("{:6.2}", percent),
                    None => info!("no progress reported yet"),
                }
            }
        }
    }

    println!("DONE");
    Ok(())
}
