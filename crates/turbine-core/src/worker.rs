use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::lifecycle::{LifecycleEvent, LifecycleEventKind, Ticket};
use crate::service::RandomnessService;

/// Run one request in the background: wait for readiness, then query.
/// Progress is reported on `tx`; a closed receiver just ends the thread.
/// A ticket abandoned while waiting never reaches `query`.
pub fn spawn_request(
    service: Arc<dyn RandomnessService>,
    ticket: Ticket,
    tx: Sender<LifecycleEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let id = ticket.id;
        debug!(request = id, "worker waiting for readiness");

        if let Err(err) = service.wait_for_ready() {
            let _ = tx.send(LifecycleEvent { id, kind: LifecycleEventKind::ReadinessFailed(err) });
            return;
        }
        if ticket.abandoned.is_raised() {
            debug!(request = id, "request abandoned before readiness, skipping query");
            return;
        }
        if tx.send(LifecycleEvent { id, kind: LifecycleEventKind::Ready }).is_err() {
            return;
        }

        let outcome = service.query(ticket.params);
        let _ = tx.send(LifecycleEvent { id, kind: LifecycleEventKind::Resolved(outcome) });
    })
}
