use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use polyglot::api::{create_router, AppState};
use polyglot::config::Config;
use polyglot::discovery::{local_ipv4, start_discovery};
use polyglot::ocr::{ImageToText, OcrProvider};
use polyglot::transcription::{SpeechToText, TranscriptionProvider};
use polyglot::translation::GoogleTranslateClient;

#[derive(Parser)]
#[command(name = "polyglot")]
#[command(about = "Translation service for text, speech, documents and scanned images")]
struct Args {
    /// Do not answer local-network discovery requests
    #[arg(long)]
    no_discovery: bool,

    /// HTTP port (overrides POLYGLOT_PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "polyglot=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.no_discovery {
        config.discovery.enabled = false;
    }

    tracing::info!("Initializing OCR provider: {}...", config.ocr.model);
    let ocr = OcrProvider::new(&config.ocr);
    if !ocr.is_available() {
        tracing::warn!("OCR unavailable - image translation will fail. Is Tesseract installed?");
    }

    tracing::info!(
        "Initializing transcription provider: {}...",
        config.transcription.model
    );
    let transcription = TranscriptionProvider::new(&config.transcription);
    if !transcription.is_available() {
        tracing::warn!("Transcription unavailable - voice translation will fail");
    }

    let translator = GoogleTranslateClient::new(&config.translation)?;

    tokio::fs::create_dir_all(&config.server.upload_dir).await?;

    let cancel_token = CancellationToken::new();

    let discovery = start_discovery(&config.discovery, cancel_token.child_token()).await;
    let discovery_addr = discovery.as_ref().map(|handle| handle.local_addr());

    let state = AppState::new(
        config.clone(),
        Arc::new(ocr),
        Arc::new(translator),
        Arc::new(transcription),
    )
    .with_discovery(discovery_addr);

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Polyglot starting on http://{}", addr);
    tracing::info!(
        "  Server reachable at: {}:{}",
        local_ipv4(),
        config.server.port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token))
        .await?;

    if let Some(handle) = discovery {
        handle.shutdown().await;
    }

    Ok(())
}

async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping discovery...");
    cancel_token.cancel();
}
