//! Feedback channel: transient status messages and the loading indicator.
//!
//! Inject a `&dyn FeedbackSink` into [`crate::submit::submit`] to receive
//! the submission's state changes as they happen.
//!
//! # Why a sink trait?
//!
//! The sink is the least-invasive integration point: callers can forward
//! messages to a terminal spinner, a GUI widget, a log, or a test recorder
//! without the library knowing anything about how the host application
//! displays things. The trait is `Send + Sync` and all methods have no-op
//! defaults so implementors only override what they care about.
//!
//! # Message semantics
//!
//! `show` is idempotent-overwriting per scope: a new message replaces
//! whatever is currently displayed for that operation and restarts the
//! auto-hide clock. [`MessageBoard`] implements that clock as one
//! cancellable scheduled task per scope — a newer `show` cancels and
//! reschedules, so timers never stack.
//!
//! The loading indicator is a single process-wide flag and calls are *not*
//! reference-counted: any `hide_loading` hides it regardless of how many
//! `show_loading` calls came before. Only one conversion is in flight per
//! scope in the supported flow, so no nesting semantics are needed.

use crate::config::DEFAULT_MESSAGE_LIFETIME_SECS;
use crate::request::OperationKind;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::AbortHandle;

/// Category of a displayed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

/// Display state of one feedback scope.
///
/// Non-idle message states revert to [`FeedbackState::Idle`] after the
/// configured lifetime unless superseded sooner.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackState {
    #[default]
    Idle,
    Loading,
    Info(String),
    Success(String),
    Error(String),
}

impl FeedbackState {
    /// Whether this is a terminal submission state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FeedbackState::Success(_) | FeedbackState::Error(_))
    }

    /// The displayed text, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            FeedbackState::Info(m) | FeedbackState::Success(m) | FeedbackState::Error(m) => {
                Some(m)
            }
            _ => None,
        }
    }
}

/// Receives feedback for submissions as they progress.
///
/// Implementations must be `Send + Sync`; the auto-hide machinery may
/// touch state from a timer task.
pub trait FeedbackSink: Send + Sync {
    /// Display `text` in the scope of one operation, replacing any current
    /// message there and restarting its auto-hide lifetime.
    fn show(&self, scope: OperationKind, kind: MessageKind, text: &str) {
        let _ = (scope, kind, text);
    }

    /// Turn the process-wide loading indicator on.
    fn show_loading(&self) {}

    /// Turn the process-wide loading indicator off. Not reference-counted.
    fn hide_loading(&self) {}
}

/// A no-op sink for callers that don't need feedback.
pub struct NoopFeedback;

impl FeedbackSink for NoopFeedback {}

/// In-process feedback surface with per-scope auto-hiding messages.
///
/// Must be used from within a Tokio runtime: each `show` spawns the
/// scope's auto-hide task. Cloning is cheap and clones share state.
#[derive(Clone)]
pub struct MessageBoard {
    inner: Arc<BoardInner>,
}

struct BoardInner {
    lifetime: Duration,
    loading: AtomicBool,
    scopes: Mutex<HashMap<OperationKind, Slot>>,
}

#[derive(Default)]
struct Slot {
    state: FeedbackState,
    /// Bumped on every write so a stale timer task can tell it lost.
    epoch: u64,
    timer: Option<AbortHandle>,
}

impl Default for MessageBoard {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_MESSAGE_LIFETIME_SECS))
    }
}

impl MessageBoard {
    /// Create a board whose messages live for `lifetime` before reverting
    /// to idle.
    pub fn new(lifetime: Duration) -> Self {
        Self {
            inner: Arc::new(BoardInner {
                lifetime,
                loading: AtomicBool::new(false),
                scopes: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Current state of one scope.
    pub fn state(&self, scope: OperationKind) -> FeedbackState {
        self.inner
            .scopes
            .lock()
            .unwrap()
            .get(&scope)
            .map(|slot| slot.state.clone())
            .unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::SeqCst)
    }

    /// Clear one scope immediately, cancelling its timer.
    pub fn clear(&self, scope: OperationKind) {
        let mut scopes = self.inner.scopes.lock().unwrap();
        if let Some(slot) = scopes.get_mut(&scope) {
            slot.epoch += 1;
            if let Some(timer) = slot.timer.take() {
                timer.abort();
            }
            slot.state = FeedbackState::Idle;
        }
    }

    fn set(&self, scope: OperationKind, state: FeedbackState) {
        let mut scopes = self.inner.scopes.lock().unwrap();
        let slot = scopes.entry(scope).or_default();
        slot.epoch += 1;
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }
        slot.state = state;

        let epoch = slot.epoch;
        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(inner.lifetime).await;
            let mut scopes = inner.scopes.lock().unwrap();
            if let Some(slot) = scopes.get_mut(&scope) {
                // A newer show() already superseded this timer.
                if slot.epoch == epoch {
                    slot.state = FeedbackState::Idle;
                    slot.timer = None;
                }
            }
        });
        slot.timer = Some(handle.abort_handle());
    }
}

impl FeedbackSink for MessageBoard {
    fn show(&self, scope: OperationKind, kind: MessageKind, text: &str) {
        let state = match kind {
            MessageKind::Info => FeedbackState::Info(text.to_string()),
            MessageKind::Success => FeedbackState::Success(text.to_string()),
            MessageKind::Error => FeedbackState::Error(text.to_string()),
        };
        self.set(scope, state);
    }

    fn show_loading(&self) {
        self.inner.loading.store(true, Ordering::SeqCst);
    }

    fn hide_loading(&self) {
        self.inner.loading.store(false, Ordering::SeqCst);
    }
}
