use std::time::Duration;

use solana_sdk::signature::Signature;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::{
    config::SenderConfig, constants::MIN_CONFIRMATION_POLL_INTERVAL_MS,
    models::ConfirmationStatus, services::SolanaProviderTrait,
};

/// Polls the network until a submitted transaction settles or the deadline passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPoller {
    poll_interval: Duration,
    timeout: Duration,
}

impl ConfirmationPoller {
    /// Intervals shorter than `MIN_CONFIRMATION_POLL_INTERVAL_MS` are raised to it.
    pub fn new(poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            poll_interval: poll_interval
                .max(Duration::from_millis(MIN_CONFIRMATION_POLL_INTERVAL_MS)),
            timeout,
        }
    }

    pub fn from_config(config: &SenderConfig) -> Self {
        Self::new(config.confirmation_poll_interval, config.confirmation_timeout)
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Waits for `signature` to reach `Confirmed`, `Finalized` or `Failed`.
    ///
    /// The reported status never moves backwards, even when a lagging node
    /// reports an older one. Failed status reads are logged and polling
    /// continues. Returns `TimedOut` once the deadline passes without a
    /// settled status; the transaction may still land after that.
    pub async fn confirm<P: SolanaProviderTrait + ?Sized>(
        &self,
        provider: &P,
        signature: &Signature,
    ) -> ConfirmationStatus {
        let deadline = Instant::now() + self.timeout;
        let mut status = ConfirmationStatus::Pending;

        loop {
            match provider.get_transaction_status(signature).await {
                Ok(observed) => {
                    let next = status.advance(observed);
                    if next != status {
                        debug!(
                            signature = %signature,
                            from = %status,
                            to = %next,
                            "status advanced"
                        );
                    }
                    status = next;
                }
                Err(e) => {
                    warn!(signature = %signature, error = %e, "error polling transaction status");
                }
            }

            if status.is_success() || status == ConfirmationStatus::Failed {
                info!(signature = %signature, status = %status, "transaction settled");
                return status;
            }

            let now = Instant::now();
            if now >= deadline {
                warn!(
                    signature = %signature,
                    last_status = %status,
                    "timed out waiting for confirmation"
                );
                return status.advance(ConfirmationStatus::TimedOut);
            }

            sleep(self.poll_interval.min(deadline - now)).await;
        }
    }
}
