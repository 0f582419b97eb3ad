//! Engine: the poll loop tying the API client, translator and notifier together
//!
//! Each cycle fetches statuses changed since the watermark, turns every
//! record into a message and delivers it. Failures are classified into an
//! [`ErrorKind`]; a diagnostic is delivered only when the kind differs from
//! the previous cycle's, so a persistent outage alerts once. The watermark
//! only moves forward after a fully successful cycle.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio_util::sync::CancellationToken;

use crate::api_client::PracticumClient;
use crate::error::{ErrorKind, PollError};
use crate::notifier::Notifier;
use crate::status::translate;
use crate::validator::extract_homeworks;

/// Loop-local state carried from one cycle to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollState {
    /// Lower bound (unix seconds) of the next query window
    pub watermark: i64,
    /// Kind of the most recent failure, `None` after a successful cycle
    pub last_error: Option<ErrorKind>,
}

impl PollState {
    pub fn new(watermark: i64) -> Self {
        Self {
            watermark,
            last_error: None,
        }
    }

    /// State for a fresh start: only changes from now on are reported
    pub fn starting_now() -> Self {
        Self::new(current_epoch_secs())
    }
}

/// What a single cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Records were found; this many messages were handed to the notifier
    Delivered(usize),
    /// The response held no records
    NoChanges,
    Failed { kind: ErrorKind, notified: bool },
}

/// Polls the homework API on a fixed interval until cancelled
pub struct Poller {
    client: PracticumClient,
    notifier: Arc<dyn Notifier>,
    chat_id: String,
    interval: Duration,
    cancel: CancellationToken,
}

impl Poller {
    pub fn new(
        client: PracticumClient,
        notifier: Arc<dyn Notifier>,
        chat_id: &str,
        interval: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            client,
            notifier,
            chat_id: chat_id.to_string(),
            interval,
            cancel,
        }
    }

    /// Run cycles until the cancellation token fires, returning the final state
    pub async fn run(&self, mut state: PollState) -> PollState {
        loop {
            if self.cancel.is_cancelled() {
                break;
            }

            let outcome = self.run_cycle(&mut state).await;
            tracing::debug!(
                "Cycle finished: {:?}, watermark={}, next poll in {:?}",
                outcome,
                state.watermark,
                self.interval
            );

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled");
                    break;
                }
            }
        }
        state
    }

    /// Run exactly one fetch/validate/translate/notify pass
    pub async fn run_cycle(&self, state: &mut PollState) -> CycleOutcome {
        match self.process(state.watermark).await {
            Ok((delivered, next_watermark)) => {
                state.watermark = next_watermark;
                state.last_error = None;
                match delivered {
                    0 => CycleOutcome::NoChanges,
                    n => CycleOutcome::Delivered(n),
                }
            }
            Err(error) => {
                let kind = error.kind();
                let message = format!("Program failure: {}", error);
                tracing::error!("{}", message);

                let notified = state.last_error != Some(kind);
                if notified {
                    send_message(self.notifier.as_ref(), &self.chat_id, &message).await;
                } else {
                    tracing::debug!("Suppressing repeated '{}' alert", kind);
                }
                state.last_error = Some(kind);
                CycleOutcome::Failed { kind, notified }
            }
        }
    }

    /// Returns the number of delivered messages and the next watermark
    async fn process(&self, watermark: i64) -> Result<(usize, i64), PollError> {
        let response = self.client.fetch(watermark).await?;
        let homeworks = extract_homeworks(&response)?;

        if homeworks.is_empty() {
            tracing::debug!("No news - good news!");
        }
        for homework in &homeworks {
            let message = translate(homework)?;
            send_message(self.notifier.as_ref(), &self.chat_id, &message).await;
        }

        let next = response.current_date().unwrap_or_else(current_epoch_secs);
        Ok((homeworks.len(), next))
    }
}

/// Deliver a message, logging the result. Delivery failures never propagate.
pub async fn send_message(notifier: &dyn Notifier, chat_id: &str, text: &str) -> bool {
    match notifier.deliver(chat_id, text).await {
        Ok(()) => {
            tracing::info!("Bot sent message \"{}\"", text);
            true
        }
        Err(e) => {
            tracing::error!(
                "Cannot send message via '{}': {}",
                notifier.type_name(),
                e
            );
            false
        }
    }
}

fn current_epoch_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
