//! Verification session lifecycle.
//!
//! One [`VerificationSession`] owns one verification attempt:
//!
//! ```text
//! RequestInitiated -> VerificationRequested -> Verified | Error
//! ```
//!
//! A single spawned task drives the whole lifecycle — request the link,
//! surface it, then poll status on an interval until a terminal state,
//! fetching the proof on success. Exactly one poll is ever outstanding:
//! the task is a sequential loop, so no two status checks for the same
//! session can race, and transitions apply in resolution order.
//!
//! Teardown flips a watch-channel flag that every suspension point races
//! against; a response already in flight when the session is torn down is
//! discarded when it resolves, and no event fires afterward.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use url::Url;

use crate::error::VerificatorError;
use crate::types::{VerificationOptions, VerificationStatus, ZkProof};
use crate::verification::VerificatorClient;

/// Session tuning knobs.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Interval between status polls.
    pub polling_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            polling_interval: Duration::from_millis(5000),
        }
    }
}

/// Terminal failures of a verification session, delivered at most once.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The verification-link request failed; no polling was started.
    #[error("verification link request failed: {0}")]
    LinkRequest(#[source] VerificatorError),

    /// A status poll failed. Terminal — a persistent backend outage must
    /// not be masked as a silent hang.
    #[error("status poll failed: {0}")]
    Poll(#[source] VerificatorError),

    /// The proof fetch after a `verified` status failed.
    #[error("proof fetch failed: {0}")]
    ProofFetch(#[source] VerificatorError),

    /// The service reported `failed_verification`.
    #[error("proof verification failed")]
    VerificationFailed,

    /// The service reported `uniqueness_check_failed`.
    #[error("uniqueness check failed")]
    UniquenessCheckFailed,

    /// The service reported `verified` but returned no proof. Terminal —
    /// retrying a supposedly-terminal status risks an unbounded loop.
    #[error("service reported verified but returned no proof")]
    ProofMissing,
}

/// Events emitted by a session, in order. `Verified` and `Failed` are
/// terminal: exactly one of them fires per session, after which the
/// event stream ends.
#[derive(Debug)]
pub enum SessionEvent {
    /// The verification link was obtained; present this URL to the
    /// holder (QR code / deep link).
    LinkReady {
        /// The proof-request deep link.
        proof_request_url: Url,
    },
    /// The holder produced a proof and the service verified it.
    Verified {
        /// The verified proof.
        proof: Box<ZkProof>,
    },
    /// The session ended in error.
    Failed {
        /// What went wrong.
        error: SessionError,
    },
}

/// Handle to one running verification session.
///
/// Dropping the handle tears the session down.
#[derive(Debug)]
pub struct VerificationSession {
    request_id: String,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    cancel: watch::Sender<bool>,
    task: tokio::task::JoinHandle<()>,
}

impl VerificationSession {
    /// Start a session: spawns the lifecycle task and returns its handle.
    pub fn start(
        client: VerificatorClient,
        request_id: impl Into<String>,
        options: VerificationOptions,
        config: SessionConfig,
    ) -> Self {
        let request_id = request_id.into();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (cancel_tx, cancel_rx) = watch::channel(false);

        let task = tokio::spawn(run_session(
            client,
            request_id.clone(),
            options,
            config,
            events_tx,
            cancel_rx,
        ));

        Self {
            request_id,
            events: events_rx,
            cancel: cancel_tx,
            task,
        }
    }

    /// The caller-supplied request identifier this session polls for.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Receive the next session event. Returns `None` once the session
    /// has ended (terminal event consumed, or torn down).
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }

    /// Receive an already-delivered event without waiting.
    pub fn try_next_event(&mut self) -> Option<SessionEvent> {
        self.events.try_recv().ok()
    }

    /// Tear the session down: cancels any outstanding scheduled poll.
    /// A response already on the wire is discarded when it resolves; no
    /// event fires after this returns.
    pub fn teardown(&self) {
        let _ = self.cancel.send(true);
    }
}

impl Drop for VerificationSession {
    fn drop(&mut self) {
        let _ = self.cancel.send(true);
        self.task.abort();
    }
}

/// Race a future against session cancellation. `None` means the session
/// was torn down and the future's result must be discarded.
async fn until_cancelled<T>(
    cancel: &mut watch::Receiver<bool>,
    fut: impl std::future::Future<Output = T>,
) -> Option<T> {
    tokio::select! {
        // Resolves on teardown, or if the session handle was dropped.
        _ = cancel.wait_for(|&cancelled| cancelled) => None,
        out = fut => Some(out),
    }
}

async fn run_session(
    client: VerificatorClient,
    request_id: String,
    options: VerificationOptions,
    config: SessionConfig,
    events: mpsc::UnboundedSender<SessionEvent>,
    mut cancel: watch::Receiver<bool>,
) {
    // RequestInitiated -> VerificationRequested | Error
    let link_request = client.request_verification_link(&request_id, &options);
    let proof_request_url = match until_cancelled(&mut cancel, link_request).await {
        None => return,
        Some(Ok(url)) => url,
        Some(Err(e)) => {
            tracing::warn!(request_id, error = %e, "verification link request failed");
            let _ = events.send(SessionEvent::Failed {
                error: SessionError::LinkRequest(e),
            });
            return;
        }
    };

    tracing::info!(request_id, "verification requested");
    let _ = events.send(SessionEvent::LinkReady { proof_request_url });

    // VerificationRequested -> Verified | Error, polling on an interval.
    loop {
        let wait = tokio::time::sleep(config.polling_interval);
        if until_cancelled(&mut cancel, wait).await.is_none() {
            return;
        }

        let poll = client.verification_status(&request_id);
        let status = match until_cancelled(&mut cancel, poll).await {
            None => return,
            Some(Ok(status)) => status,
            Some(Err(e)) => {
                tracing::warn!(request_id, error = %e, "status poll failed");
                let _ = events.send(SessionEvent::Failed {
                    error: SessionError::Poll(e),
                });
                return;
            }
        };

        match status {
            VerificationStatus::NotVerified | VerificationStatus::Unknown => {
                tracing::debug!(request_id, %status, "not verified yet, rescheduling poll");
            }
            VerificationStatus::FailedVerification => {
                let _ = events.send(SessionEvent::Failed {
                    error: SessionError::VerificationFailed,
                });
                return;
            }
            VerificationStatus::UniquenessCheckFailed => {
                let _ = events.send(SessionEvent::Failed {
                    error: SessionError::UniquenessCheckFailed,
                });
                return;
            }
            VerificationStatus::Verified => {
                let fetch = client.verified_proof(&request_id);
                match until_cancelled(&mut cancel, fetch).await {
                    None => return,
                    Some(Ok(Some(proof))) => {
                        tracing::info!(request_id, "proof verified");
                        let _ = events.send(SessionEvent::Verified {
                            proof: Box::new(proof),
                        });
                    }
                    Some(Ok(None)) => {
                        tracing::warn!(request_id, "status verified but proof absent");
                        let _ = events.send(SessionEvent::Failed {
                            error: SessionError::ProofMissing,
                        });
                    }
                    Some(Err(e)) => {
                        let _ = events.send(SessionEvent::Failed {
                            error: SessionError::ProofFetch(e),
                        });
                    }
                }
                return;
            }
        }
    }
}
