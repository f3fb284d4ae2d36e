use std::sync::Arc;

use clap::Parser;
use tokio::sync::mpsc;
use tracing::{info, warn};

use expotrack::clock::{SystemClock, entropy_rng};
use expotrack::client::ExhibitorApi;
use expotrack::config::{AppConfig, fetch_config, validate_base_url};
use expotrack::session::Session;
use expotrack::sync::{SyncEngine, SyncUpdate};
use expotrack::{TrackerError, tui};

#[derive(Parser)]
#[command(
    name = "expotrack",
    about = "Track exhibitor furniture orders live from the terminal",
    version
)]
struct Cli {
    /// Exhibitor to open on startup
    #[arg(long)]
    exhibitor: Option<String>,

    /// Log order updates instead of drawing the dashboard
    #[arg(long)]
    headless: bool,

    /// Override the order service URL
    #[arg(long, env = "EXPO_API_BASE_URL")]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), TrackerError> {
    let cli = Cli::parse();

    let mut config = fetch_config()?;
    if let Some(base_url) = cli.base_url.filter(|s| !s.is_empty()) {
        validate_base_url(&base_url)?;
        config.api.base_url = base_url;
    }

    init_tracing(&config, cli.headless)?;
    info!(base_url = %config.api.base_url, "Starting expotrack");

    let api = Arc::new(ExhibitorApi::new(&config.api)?);
    let engine = Arc::new(SyncEngine::new(
        api,
        Arc::new(SystemClock),
        entropy_rng(),
        config.sync.cache_ttl,
    ));
    let (mut session, updates) = Session::bootstrap(engine, config.sync.poll_interval).await;

    if cli.headless {
        run_headless(&mut session, updates, cli.exhibitor.as_deref()).await
    } else {
        tui::run(&mut session, updates, cli.exhibitor.as_deref()).await
    }
}

/// Sends logs to stderr in headless mode and to the log file otherwise, so
/// they do not corrupt the dashboard.
fn init_tracing(config: &AppConfig, headless: bool) -> Result<(), TrackerError> {
    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .map_err(|e| {
            TrackerError::Io(format!(
                "failed to open log file '{}': {e}",
                config.log_file.display()
            ))
        })?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(log_file))
        .init();
    Ok(())
}

async fn run_headless(
    session: &mut Session<ExhibitorApi>,
    mut updates: mpsc::UnboundedReceiver<SyncUpdate>,
    exhibitor: Option<&str>,
) -> Result<(), TrackerError> {
    let Some(name) = exhibitor else {
        for account in session.directory().accounts() {
            info!(name = %account.name, booth = %account.booth, "Exhibitor");
        }
        return Ok(());
    };

    session.select(name)?;
    session.start_tracking();

    loop {
        tokio::select! {
            update = updates.recv() => {
                let Some(update) = update else {
                    break;
                };
                if session.apply(update) {
                    log_snapshot(session);
                }
            }
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    warn!(error = %e, "Failed to listen for Ctrl-C");
                }
                break;
            }
        }
    }

    session.stop_tracking();
    Ok(())
}

fn log_snapshot(session: &Session<ExhibitorApi>) {
    let Some(snapshot) = session.snapshot() else {
        return;
    };
    let summary = snapshot.summary();
    info!(
        exhibitor = %snapshot.account,
        total = summary.total,
        delivered = summary.delivered,
        pending = summary.pending,
        fallback = snapshot.is_fallback(),
        last_updated = %snapshot.last_updated,
        "Orders updated"
    );
    for order in &snapshot.orders {
        info!(
            id = %order.id,
            item = %order.item,
            quantity = order.quantity,
            status = %order.status,
            "Order"
        );
    }
    for note in &snapshot.notifications {
        info!(time = %note.time_label, "{}", note.message);
    }
}
