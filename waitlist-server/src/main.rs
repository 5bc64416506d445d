//! Entry point for the waitlist HTTP service.
#![forbid(unsafe_code)]

use camino::Utf8PathBuf;
use clap::Parser;
use waitlist_core::PatientStore as _;
use waitlist_data::JsonPatientStore;
use waitlist_scorer::{AffinityScorer, DEFAULT_LIMIT};
use waitlist_server::{AppState, ServeError, app};

#[derive(Debug, Parser)]
#[command(
    name = "waitlist-server",
    about = "Serve location-ranked patient recommendations over HTTP",
    version
)]
struct ServeArgs {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,
    /// Path to the JSON patient dataset.
    #[arg(
        long,
        env = "PATIENTS_FILE",
        value_name = "path",
        default_value = "data/patients.json"
    )]
    patients: Utf8PathBuf,
    /// Number of records returned per query.
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    if let Err(error) = run(ServeArgs::parse()).await {
        log::error!("{error}");
        std::process::exit(1);
    }
}

async fn run(args: ServeArgs) -> Result<(), ServeError> {
    let store = JsonPatientStore::open(&args.patients)
        .map_err(|source| ServeError::LoadDataset { source })?;
    let state = AppState::new(store.get_patients(), AffinityScorer::default(), args.limit);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServeError::Bind {
            addr: addr.clone(),
            source,
        })?;
    log::info!("listening on http://{addr}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|source| ServeError::Serve { source })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            log::warn!("failed to install Ctrl-C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => log::warn!("failed to install SIGTERM handler: {error}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => log::info!("received Ctrl-C, shutting down"),
        () = terminate => log::info!("received SIGTERM, shutting down"),
    }
}
