use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::signal;
use tokio::sync::{mpsc, watch};

use profilecard::actions::{CardActions, SystemClipboard};
use profilecard::bootstrap::RestClient;
use profilecard::config::{Config, Viewport};
use profilecard::console::{terminal_viewport, ConsoleView, HeadlessCanvas};
use profilecard::gateway::reconnect::FixedDelay;
use profilecard::gateway::RelayClient;
use profilecard::models::presence::PresencePayload;
use profilecard::particles::{FrameDriver, ParticleField, PointerState};
use profilecard::presence::assets::AssetPaths;
use profilecard::presence::countdown::SystemClock;
use profilecard::presence::PresenceSync;

#[derive(Parser)]
#[command(name = "profilecard", version, about = "Live Discord presence card")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Follow the relay and keep the card live (default)
    Run,
    /// Fetch presence once and print the card
    Snapshot,
    /// Copy the tracked user id to the clipboard
    CopyId,
    /// Print the source link
    Source,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "profilecard=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            print_banner(&config);
            run(config).await;
        }
        Command::Snapshot => snapshot(config).await,
        Command::CopyId => copy_id(&config),
        Command::Source => println!("{}", config.source_url),
    }
}

fn print_banner(config: &Config) {
    let version = env!("CARGO_PKG_VERSION");
    let git_sha = env!("GIT_SHA");

    eprintln!();
    eprintln!("  \x1b[1;36mprofilecard\x1b[0m \x1b[2mv{version} ({git_sha})\x1b[0m");
    eprintln!();
    eprintln!("  \x1b[2muser\x1b[0m         {}", config.user_id);
    eprintln!("  \x1b[2mrelay\x1b[0m        {}", config.relay.url);
    eprintln!("  \x1b[2mreconnect\x1b[0m    {:?}", config.relay.reconnect_delay);
    if config.particles.enabled {
        let vp = config.particles.viewport;
        let sizing = if config.particles.follow_terminal {
            "terminal"
        } else {
            "pinned"
        };
        eprintln!(
            "  \x1b[2mparticles\x1b[0m    {}x{} ({sizing}) @ {} fps",
            vp.width, vp.height, config.particles.frame_rate
        );
    } else {
        eprintln!("  \x1b[2mparticles\x1b[0m    off");
    }
    eprintln!();
}

async fn run(config: Config) {
    let view = Arc::new(ConsoleView::new());
    let sync = PresenceSync::new(
        Arc::clone(&view),
        Arc::new(SystemClock),
        AssetPaths::new(config.asset_base.clone()),
    );
    let (tx, rx) = mpsc::channel::<PresencePayload>(16);

    if config.relay.bootstrap {
        let rest = RestClient::new(config.relay.rest_url.clone());
        let user_id = config.user_id.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            match rest.fetch_presence(&user_id).await {
                Ok(payload) => {
                    let _ = tx.send(payload).await;
                }
                Err(e) => tracing::debug!("bootstrap fetch skipped: {e}"),
            }
        });
    }

    let relay = RelayClient::new(
        config.relay.url.clone(),
        config.user_id.clone(),
        FixedDelay(config.relay.reconnect_delay),
    )
    .with_heartbeat(config.relay.heartbeat);
    let relay_handle = tokio::spawn(relay.run(tx));
    let presence_handle = tokio::spawn(sync.run(rx));

    let mut particle_tasks = Vec::new();
    if config.particles.enabled {
        let mut viewport = config.particles.viewport;
        if config.particles.follow_terminal {
            viewport = terminal_viewport().unwrap_or(viewport);
        }
        // A terminal has no pointer; the state stays absent here.
        let driver = FrameDriver::new(
            ParticleField::new(viewport),
            HeadlessCanvas::new(),
            Arc::new(PointerState::new()),
            config.particles.frame_rate,
        );
        let (resize_tx, resize_rx) = watch::channel(viewport);
        particle_tasks.push(tokio::spawn(driver.run(resize_rx)));
        if config.particles.follow_terminal {
            particle_tasks.push(tokio::spawn(follow_terminal_size(resize_tx)));
        }
    }

    shutdown_signal().await;

    relay_handle.abort();
    presence_handle.abort();
    for handle in particle_tasks {
        handle.abort();
    }

    eprintln!();
    eprint!("{}", view.render());
}

/// Feed terminal resizes to the particle driver until it stops listening.
#[cfg(unix)]
async fn follow_terminal_size(resize_tx: watch::Sender<Viewport>) {
    let mut winch = match signal::unix::signal(signal::unix::SignalKind::window_change()) {
        Ok(winch) => winch,
        Err(e) => {
            tracing::warn!("cannot watch terminal resizes: {e}");
            return;
        }
    };
    while winch.recv().await.is_some() {
        let Some(viewport) = terminal_viewport() else {
            continue;
        };
        if resize_tx.send(viewport).is_err() {
            break;
        }
    }
}

#[cfg(not(unix))]
async fn follow_terminal_size(_resize_tx: watch::Sender<Viewport>) {}

async fn snapshot(config: Config) {
    let rest = RestClient::new(config.relay.rest_url.clone());
    let payload = match rest.fetch_presence(&config.user_id).await {
        Ok(payload) => payload,
        Err(e) => {
            eprintln!("failed to fetch presence: {e}");
            std::process::exit(1);
        }
    };

    let view = Arc::new(ConsoleView::new());
    let mut sync = PresenceSync::new(
        Arc::clone(&view),
        Arc::new(SystemClock),
        AssetPaths::new(config.asset_base.clone()),
    );
    sync.apply_payload(&payload);
    print!("{}", view.render());
}

fn copy_id(config: &Config) {
    let actions = CardActions::new(config.user_id.clone(), config.source_url.clone());
    let result = SystemClipboard::open().and_then(|mut clipboard| actions.copy_user_id(&mut clipboard));
    match result {
        Ok(message) => println!("{message}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
