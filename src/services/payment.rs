//! payment.rs
//!
//! Payment submission state machine for one visitor session.
//!
//! Key components:
//! 1.  **PaymentProcessor**: drives an attempt through
//!     `idle -> processing -> succeeded | failed`. Submission is permitted
//!     only while the chosen method's readiness rule holds and no attempt is
//!     processing; the selection snapshot is frozen at that instant.
//! 2.  **Simulated settlement**: the external gateway is modeled as a fixed
//!     delay, scheduled as a cancellable task. Navigating away aborts the
//!     task, and verdicts are additionally matched against the attempt id,
//!     so a suppressed settlement can never mutate the session.
//! 3.  **GatewayVerdict**: the `failed` outcome is never produced by the
//!     simulated gateway, but a real integration reports it through the same
//!     path; the selection is preserved on decline so a retry loses nothing.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::ValidationErrors;

use crate::models::payment::{BookingConfirmation, PaymentMethod, PaymentStatus};
use crate::selection::SelectionSnapshot;
use crate::services::reference;
use crate::services::validation::PaymentDetails;
use crate::AppState;

#[derive(Debug, Error)]
pub enum PaymentError {
    /// The payment step was reached without any selected seats; the caller
    /// redirects back to seat selection instead of raising an error dialog.
    #[error("no seats selected")]
    EmptySelection,
    /// One attempt at a time: submitting twice must never create two
    /// bookings from one selection.
    #[error("a payment attempt is already processing")]
    AlreadyProcessing,
    /// Incomplete or malformed fields for the chosen method. Carried as
    /// per-field data for normal form feedback, not surfaced as a failure.
    #[error("payment details are incomplete")]
    NotReady(#[from] ValidationErrors),
}

/// Settlement outcome reported by the (simulated) gateway.
#[derive(Debug, Clone)]
pub enum GatewayVerdict {
    Approved,
    Declined { reason: String },
}

/// One run of the state machine against a frozen selection snapshot.
#[derive(Debug)]
pub struct PaymentAttempt {
    pub id: Uuid,
    pub method: PaymentMethod,
    pub snapshot: SelectionSnapshot,
    pub status: PaymentStatus,
    /// Assigned exactly once, on the transition to `Succeeded`.
    pub reference: Option<String>,
    pub failure_reason: Option<String>,
    pub started_at: DateTime<Utc>,
    settle_task: Option<JoinHandle<()>>,
}

impl PaymentAttempt {
    pub fn abort_settlement(&mut self) {
        if let Some(task) = self.settle_task.take() {
            task.abort();
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitReceipt {
    #[serde(rename = "attemptId")]
    pub attempt_id: Uuid,
    pub status: PaymentStatus,
    pub amount: u32,
    pub currency: String,
}

#[derive(Clone)]
pub struct PaymentProcessor {
    state: Arc<AppState>,
}

impl PaymentProcessor {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// `idle -> processing`. The selection snapshot and total are captured
    /// here and stay frozen for the attempt's lifetime.
    pub async fn submit(
        &self,
        visitor_id: &str,
        details: PaymentDetails,
    ) -> Result<SubmitReceipt, PaymentError> {
        details.check_ready()?;

        let handle = self.state.sessions.session(visitor_id).await;
        let mut session = handle.lock().await;

        if session.payment.as_ref().map(|attempt| attempt.status)
            == Some(PaymentStatus::Processing)
        {
            warn!(visitor = visitor_id, "duplicate submission while processing");
            return Err(PaymentError::AlreadyProcessing);
        }
        if session.selection.is_empty() {
            return Err(PaymentError::EmptySelection);
        }

        let snapshot = session.selection.snapshot();
        let amount = snapshot.total;
        let attempt_id = Uuid::new_v4();
        let settle_task = self.spawn_settlement(visitor_id.to_string(), attempt_id);

        info!(
            visitor = visitor_id,
            attempt = %attempt_id,
            amount,
            seats = snapshot.seats.len(),
            "payment attempt started"
        );

        session.payment = Some(PaymentAttempt {
            id: attempt_id,
            method: details.method(),
            snapshot,
            status: PaymentStatus::Processing,
            reference: None,
            failure_reason: None,
            started_at: Utc::now(),
            settle_task: Some(settle_task),
        });

        Ok(SubmitReceipt {
            attempt_id,
            status: PaymentStatus::Processing,
            amount,
            currency: self.state.config.payment.currency.clone(),
        })
    }

    /// Suppresses a pending settlement when the visitor navigates away while
    /// processing. Settled attempts are kept untouched.
    pub async fn cancel(&self, visitor_id: &str) -> bool {
        let handle = self.state.sessions.session(visitor_id).await;
        let mut session = handle.lock().await;

        match session.payment.take() {
            Some(mut attempt) if attempt.status == PaymentStatus::Processing => {
                attempt.abort_settlement();
                debug!(visitor = visitor_id, attempt = %attempt.id, "pending settlement cancelled");
                true
            }
            other => {
                session.payment = other;
                false
            }
        }
    }

    // The simulated gateway settles after a fixed delay and always approves.
    fn spawn_settlement(&self, visitor_id: String, attempt_id: Uuid) -> JoinHandle<()> {
        let state = self.state.clone();
        let delay = Duration::from_millis(state.config.payment.settlement_delay_ms);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            apply_verdict(&state, &visitor_id, attempt_id, GatewayVerdict::Approved).await;
        })
    }
}

/// `processing -> succeeded | failed`. A verdict for a stale, cancelled or
/// already-settled attempt id is a no-op, so `Succeeded` is reached at most
/// once per attempt.
pub async fn apply_verdict(
    state: &Arc<AppState>,
    visitor_id: &str,
    attempt_id: Uuid,
    verdict: GatewayVerdict,
) {
    let handle = state.sessions.session(visitor_id).await;
    let mut session = handle.lock().await;

    let Some(attempt) = session.payment.as_mut() else {
        return;
    };
    if attempt.id != attempt_id || attempt.status != PaymentStatus::Processing {
        return;
    }

    let confirmation = match verdict {
        GatewayVerdict::Approved => {
            attempt.status = PaymentStatus::Succeeded;
            let booking_reference = reference::mint(&state.config.payment.reference_prefix);
            attempt.reference = Some(booking_reference.clone());
            info!(
                visitor = visitor_id,
                attempt = %attempt_id,
                reference = %booking_reference,
                "payment settled"
            );
            Some(BookingConfirmation {
                booking_reference,
                seats: attempt.snapshot.seats.clone(),
                total: attempt.snapshot.total,
                currency: state.config.payment.currency.clone(),
                paid_at: Utc::now(),
            })
        }
        GatewayVerdict::Declined { reason } => {
            attempt.status = PaymentStatus::Failed;
            attempt.failure_reason = Some(reason.clone());
            warn!(visitor = visitor_id, attempt = %attempt_id, reason = %reason, "payment declined");
            None
        }
    };

    if let Some(confirmation) = confirmation {
        session.confirmation = Some(confirmation);
        // The originating selection is consumed by the booking.
        session.selection.clear();
    }
}
