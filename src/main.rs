use std::sync::Arc;
use anyhow::Context;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use arbitrage::api::{self, rest::ApiState};
use arbitrage::config::loader::AppConfig;
use arbitrage::observability::metrics::register_metrics;
use arbitrage::observability::tracing::init_tracing;
use arbitrage::Bot;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = std::env::var("ARBITRAGE_ENV").unwrap_or_else(|_| "development".to_string());
    let config = AppConfig::load(&env).context("failed to load configuration")?;

    init_tracing(&config.logging)?;
    register_metrics().context("failed to register metrics")?;

    let bot = Arc::new(Bot::from_config(&config)?);
    let shutdown = CancellationToken::new();

    let server = if config.api.enabled {
        let state = Arc::new(ApiState { book: bot.book() });
        let bind_addr = config.api.bind_addr.clone();
        let shutdown = shutdown.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = api::serve(&bind_addr, state, shutdown).await {
                tracing::error!("Ops API failed: {}", e);
            }
        }))
    } else {
        None
    };

    // Map SIGINT/SIGTERM to exactly one quit
    let signal_bot = Arc::clone(&bot);
    tokio::spawn(async move {
        let received = wait_for_signal().await;
        tracing::info!("Signal received: {}", received);
        if let Err(e) = signal_bot.quit().await {
            tracing::error!("Quit finished with error: {}", e);
        }
    });

    bot.run().await?;

    shutdown.cancel();
    if let Some(server) = server {
        let _ = server.await;
    }
    Ok(())
}

async fn wait_for_signal() -> &'static str {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => "SIGINT",
        () = terminate => "SIGTERM",
    }
}
