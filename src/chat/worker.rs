//! Reply worker thread
//!
//! Receives requests via channel, drives the reply service on a Tokio
//! runtime, and sends completions back to the controller. Requests are
//! handled one at a time in arrival order.

use std::sync::mpsc::{Receiver, Sender};

use crate::reply::{FailureKind, ReplyOutcome, ReplyRequest, ReplyService};

/// Result of one request, tagged with the id it was sent under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyCompletion {
    pub request_id: u64,
    pub outcome: ReplyOutcome,
}

/// Spawn the reply worker thread
///
/// A service that could not be built is passed as its failure; every request
/// then resolves to that failure's fallback text. The thread exits once the
/// request channel is closed.
pub fn spawn_worker<S: ReplyService>(
    service: Result<S, FailureKind>,
    request_rx: Receiver<ReplyRequest>,
    response_tx: Sender<ReplyCompletion>,
) {
    std::thread::spawn(move || {
        worker_loop(service, request_rx, response_tx);
    });
}

/// Main worker loop - processes requests until the channel is closed
fn worker_loop<S: ReplyService>(
    service: Result<S, FailureKind>,
    request_rx: Receiver<ReplyRequest>,
    response_tx: Sender<ReplyCompletion>,
) {
    if let Err(e) = &service {
        // Reported per request through the fallback text
        log::debug!("Reply service unavailable: {}", e);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build();

    while let Ok(request) = request_rx.recv() {
        let outcome = match (&service, &runtime) {
            (Ok(service), Ok(runtime)) => runtime.block_on(service.reply(&request)),
            (Err(failure), _) => ReplyOutcome::fallback(failure.clone()),
            (_, Err(e)) => ReplyOutcome::fallback(FailureKind::Network(format!(
                "async runtime unavailable: {e}"
            ))),
        };

        log::debug!(
            "Request {} completed (fallback: {})",
            request.request_id,
            outcome.was_fallback()
        );

        let completion = ReplyCompletion {
            request_id: request.request_id,
            outcome,
        };
        if response_tx.send(completion).is_err() {
            // Controller is gone, nobody to deliver to
            break;
        }
    }

    log::debug!("Reply worker thread shutting down");
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
