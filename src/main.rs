use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use indi_telescope::console::Command;
use indi_telescope::simulator::SimulatedMount;
use indi_telescope::{Config, TelescopeAdapter, TelescopeEvent};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

async fn log_events(mut events: broadcast::Receiver<TelescopeEvent>) {
    loop {
        match events.recv().await {
            Ok(TelescopeEvent::PositionChanged(coords)) => tracing::debug!("Position {}", coords),
            Ok(event) => tracing::info!("{:?}", event),
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::warn!("Dropped {} telescope events", n)
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let config: Config = confy::load_path("config.toml")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    let (mount, client_events) = SimulatedMount::new(&config.simulator);
    let adapter = Arc::new(TelescopeAdapter::new(mount.clone()));

    let logger = tokio::spawn(log_events(adapter.subscribe()));
    let pump = tokio::spawn(adapter.clone().run_event_loop(client_events));
    let motion = mount.spawn_motion();
    mount.start().await?;

    println!("Type 'help' for available commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                if let Some(output) = command.execute(&adapter).await {
                    println!("{}", output);
                }
            }
            Err(e) => println!("{}", e),
        }
    }

    if let Err(e) = mount
        .shutdown_and_wait(adapter.subscribe(), 0, Duration::from_secs(1))
        .await
    {
        tracing::warn!("{}", e);
    }
    motion.abort();
    pump.abort();
    logger.abort();
    Ok(())
}
