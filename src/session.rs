//! Per-visitor session state.
//!
//! Each authenticated visitor owns one `SessionState`: their selection, the
//! current payment attempt and the latest confirmation. Nothing here is read
//! from ambient storage; the registry is keyed by the visitor id carried in
//! the session context. No state crosses visitor sessions.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::models::payment::BookingConfirmation;
use crate::selection::Selection;
use crate::services::payment::PaymentAttempt;

#[derive(Debug, Default)]
pub struct SessionState {
    pub selection: Selection,
    pub payment: Option<PaymentAttempt>,
    pub confirmation: Option<BookingConfirmation>,
}

pub type SessionHandle = Arc<Mutex<SessionState>>;

#[derive(Debug, Default)]
pub struct SessionRegistry {
    inner: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionRegistry {
    /// Returns the visitor's session, creating an empty one on first use.
    pub async fn session(&self, visitor_id: &str) -> SessionHandle {
        if let Some(handle) = self.inner.read().await.get(visitor_id) {
            return handle.clone();
        }
        let mut sessions = self.inner.write().await;
        sessions.entry(visitor_id.to_string()).or_default().clone()
    }

    /// Destroys the session (sign-out). A pending settlement is suppressed so
    /// it cannot mutate state that no longer exists.
    pub async fn end(&self, visitor_id: &str) {
        let removed = self.inner.write().await.remove(visitor_id);
        if let Some(handle) = removed {
            let mut session = handle.lock().await;
            if let Some(mut attempt) = session.payment.take() {
                attempt.abort_settlement();
            }
        }
    }
}
