//! The single task allowed to drive the donation machine.
//!
//! Events are handled strictly one after another, including the processing
//! delay, so a second submission can never be guarded against a balance that
//! is about to change. State snapshots are published on a watch channel
//! before each reply goes out.

use tokio::sync::{oneshot, watch};
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info};

use crate::machine::{DonationMachine, DonationState, PROCESSING_DELAY, SubmitError};
use crate::model::{DonationCandidate, Transaction};
use crate::notify::{NotificationSink, Outcome};

pub type SubmitResult = Result<Transaction, SubmitError>;

/// Inputs accepted by the dispatcher.
#[derive(Debug)]
pub enum Event {
    /// Run a candidate through the machine and reply once it has settled.
    Submit {
        candidate: DonationCandidate,
        reply: oneshot::Sender<SubmitResult>,
    },
}

pub struct Dispatcher<N> {
    machine: DonationMachine,
    sink: N,
    snapshots: watch::Sender<DonationState>,
}

impl<N: NotificationSink> Dispatcher<N> {
    pub fn new(machine: DonationMachine, sink: N) -> (Self, watch::Receiver<DonationState>) {
        let (snapshots, receiver) = watch::channel(machine.state().clone());
        let dispatcher = Self {
            machine,
            sink,
            snapshots,
        };
        (dispatcher, receiver)
    }

    /// Run until the event stream ends.
    pub async fn run(mut self, mut stream: impl Stream<Item = Event> + Unpin) {
        while let Some(event) = stream.next().await {
            match event {
                Event::Submit { candidate, reply } => {
                    let result = self.submit(candidate).await;
                    // the page may have gone away; the donation stands regardless
                    let _ = reply.send(result);
                }
            }
        }
        debug!("event stream closed, dispatcher stopping");
    }

    async fn submit(&mut self, candidate: DonationCandidate) -> SubmitResult {
        let animal = candidate.animal().to_string();
        let zoo = candidate.zoo().to_string();
        let amount = candidate.amount();

        let result = match self.machine.start(candidate) {
            Ok(pending) => {
                self.publish();
                tokio::time::sleep(PROCESSING_DELAY).await;
                let tx = self.machine.commit(pending);
                self.publish();
                Ok(tx)
            }
            Err(e) => Err(e),
        };

        match &result {
            Ok(_) => info!(
                %animal,
                %zoo,
                %amount,
                balance = %self.machine.state().purse_balance(),
                "donation accepted"
            ),
            Err(e) => info!(
                %animal,
                %zoo,
                %amount,
                reason = %e,
                "donation rejected"
            ),
        }

        if let Some(outcome) = Outcome::from_result(&result) {
            self.sink.notify(outcome.kind(), &outcome.message());
        }
        result
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.machine.state().clone());
    }
}
