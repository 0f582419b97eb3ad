//! Homework bot - homework review status poller
//!
//! Polls the homework review API, detects status changes, and forwards them
//! to a Telegram chat.

pub mod api_client;
pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod notifier;
pub mod status;
pub mod telegram;
pub mod validator;

pub use config::{load_config, Config, Credentials};
pub use error::{ErrorKind, HomeworkBotError, PollError, Result};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::api_client::PracticumClient;
use crate::engine::{PollState, Poller};
use crate::io::ReqwestHttpClient;
use crate::notifier::Notifier;
use crate::telegram::TelegramNotifier;

/// Run the homework bot until Ctrl-C
pub async fn run(config: Config, credentials: Credentials) -> Result<()> {
    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::new(
        config.request_timeout(),
        config.connect_timeout(),
    )?);
    let cancel = CancellationToken::new();

    let client = PracticumClient::new(
        &config.endpoint,
        &credentials.practicum_token,
        Arc::clone(&http),
    );
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(
        &config.telegram_api_base,
        &credentials.telegram_token,
        Arc::clone(&http),
    ));

    let poller = Poller::new(
        client,
        notifier,
        &credentials.telegram_chat_id,
        config.retry_interval(),
        cancel.clone(),
    );

    // Setup shutdown handler
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Shutdown signal received"),
            Err(e) => tracing::error!("Failed to listen for ctrl-c: {}", e),
        }
        cancel_for_signal.cancel();
    });

    tracing::info!(
        "Homework bot started, polling every {:?}",
        config.retry_interval()
    );

    let state = poller.run(PollState::starting_now()).await;

    tracing::info!("Homework bot stopped at watermark {}", state.watermark);
    Ok(())
}
