//! Request lifecycle state machine and the session that owns all form state.
//!
//! ```text
//! Idle -> AwaitingReadiness -> Querying -> Completed(value) | Failed
//!                          \-> Unavailable
//! ```
//!
//! The session is only mutated from the UI thread. Service progress arrives
//! as [`LifecycleEvent`]s tagged with the request id that produced them;
//! events for any other id are dropped.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::{Config, Labels};
use crate::error::ServiceError;
use crate::gate::{Rejection, SubmissionGate};
use crate::params::{ParamKey, ParameterSet, QueryParams};
use crate::presentation::PresentationState;
use crate::service::QueryOutcome;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingReadiness,
    Querying,
    Completed(i64),
    Failed(String),
    Unavailable(String),
}

impl Phase {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Phase::AwaitingReadiness | Phase::Querying)
    }
}

/// Raised by the session when it stops waiting on a request. Clones share
/// the flag; equality is identity.
#[derive(Debug, Clone, Default)]
pub struct AbandonFlag(Arc<AtomicBool>);

impl AbandonFlag {
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }
}

impl PartialEq for AbandonFlag {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for AbandonFlag {}

/// Authorization for one request, handed to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: RequestId,
    pub params: QueryParams,
    pub abandoned: AbandonFlag,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEventKind {
    Ready,
    ReadinessFailed(ServiceError),
    Resolved(QueryOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    pub id: RequestId,
    pub kind: LifecycleEventKind,
}

#[derive(Debug, Clone, Default)]
struct RequestLifecycle {
    phase: Phase,
    current: Option<RequestId>,
    abandoned: AbandonFlag,
    next_id: RequestId,
    awaiting_since: Option<Instant>,
}

pub struct Session {
    params: ParameterSet,
    gate: SubmissionGate,
    lifecycle: RequestLifecycle,
    presentation: PresentationState,
    labels: Labels,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            params: ParameterSet::from_config(&config.fields),
            gate: SubmissionGate::new(),
            lifecycle: RequestLifecycle::default(),
            presentation: PresentationState::new(config.labels.placeholder.clone(), config.presentation.history_len),
            labels: config.labels.clone(),
        }
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn presentation(&self) -> &PresentationState {
        &self.presentation
    }

    pub fn phase(&self) -> &Phase {
        &self.lifecycle.phase
    }

    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    pub fn is_eligible(&self) -> bool {
        self.gate.is_eligible(&self.params)
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Apply one edit to a field. Editing during a request is allowed; the
    /// in-flight query already holds its own copy of the values.
    pub fn edit(&mut self, key: ParamKey, text: &str) {
        let field = self.params.field_mut(key);
        field.edit(text);
        debug!(%key, text, stored = field.raw_text(), "field edited");
    }

    /// Try to start a request. On success the lifecycle is awaiting readiness
    /// and the returned ticket must be handed to exactly one worker.
    pub fn submit(&mut self) -> Result<Ticket, Rejection> {
        let params = self.gate.try_start(&self.params).inspect_err(|reason| {
            debug!(%reason, "submission rejected");
        })?;

        self.lifecycle.next_id += 1;
        let id = self.lifecycle.next_id;
        self.lifecycle.current = Some(id);
        self.lifecycle.abandoned = AbandonFlag::default();
        self.lifecycle.phase = Phase::AwaitingReadiness;
        self.lifecycle.awaiting_since = Some(Instant::now());
        if let Some(working) = &self.labels.working {
            self.presentation.set_label(working.clone());
        }
        info!(request = id, ?params, "request started");
        Ok(Ticket { id, params, abandoned: self.lifecycle.abandoned.clone() })
    }

    /// Feed service progress into the machine. Returns whether anything changed.
    pub fn apply(&mut self, event: LifecycleEvent) -> bool {
        if self.lifecycle.current != Some(event.id) {
            debug!(request = event.id, "dropping event for stale request");
            return false;
        }

        let awaiting = self.lifecycle.phase == Phase::AwaitingReadiness;
        let querying = self.lifecycle.phase == Phase::Querying;
        match event.kind {
            LifecycleEventKind::Ready if awaiting => {
                self.lifecycle.phase = Phase::Querying;
                self.lifecycle.awaiting_since = None;
                info!(request = event.id, "service ready, querying");
                true
            }
            LifecycleEventKind::ReadinessFailed(err) if awaiting => {
                warn!(request = event.id, %err, "service unavailable");
                self.finish_unavailable(err.to_string());
                true
            }
            LifecycleEventKind::Resolved(QueryOutcome::Success(value)) if querying => {
                info!(request = event.id, value, "request completed");
                self.presentation.show_result(value);
                self.lifecycle.phase = Phase::Completed(value);
                self.release();
                true
            }
            LifecycleEventKind::Resolved(QueryOutcome::Failure(reason)) if querying => {
                warn!(request = event.id, %reason, "request failed");
                self.presentation.set_label(self.labels.failed.clone());
                self.lifecycle.phase = Phase::Failed(reason);
                self.release();
                true
            }
            kind => {
                warn!(request = event.id, phase = ?self.lifecycle.phase, ?kind, "event out of order, ignored");
                false
            }
        }
    }

    /// Give up on readiness once `timeout` has elapsed. `None` waits forever.
    /// Returns whether the request was abandoned.
    pub fn check_readiness_timeout(&mut self, now: Instant, timeout: Option<Duration>) -> bool {
        let (Some(timeout), Some(since)) = (timeout, self.lifecycle.awaiting_since) else {
            return false;
        };
        if self.lifecycle.phase != Phase::AwaitingReadiness || now.saturating_duration_since(since) < timeout {
            return false;
        }
        warn!(request = ?self.lifecycle.current, ?timeout, "readiness timed out");
        self.finish_unavailable(format!("not ready after {} ms", timeout.as_millis()));
        true
    }

    fn finish_unavailable(&mut self, reason: String) {
        // The worker may still be blocked on readiness; it must not query
        self.lifecycle.abandoned.raise();
        self.presentation.set_label(self.labels.unavailable.clone());
        self.lifecycle.phase = Phase::Unavailable(reason);
        self.release();
    }

    /// Every terminal transition ends here.
    fn release(&mut self) {
        self.lifecycle.current = None;
        self.lifecycle.awaiting_since = None;
        self.gate.finish();
    }
}
