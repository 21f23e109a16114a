//! The donation page: form state, submit gating and rendering.
//!
//! The page never touches the machine. It sends candidates to the
//! [`Dispatcher`] and reads back state snapshots.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio_stream::wrappers::ReceiverStream;

use crate::catalog::{Catalog, Field};
use crate::dispatcher::{Dispatcher, Event, SubmitResult};
use crate::form::{FormError, FormInputs};
use crate::machine::{DonationMachine, DonationState};
use crate::notify::NotificationSink;
use crate::view::{PageView, SubmitButton};

const EVENT_BUFFER: usize = 8;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("submit is disabled")]
    SubmitDisabled,

    #[error("no submission is waiting to settle")]
    NothingInFlight,

    #[error("donation dispatcher has stopped")]
    DispatcherGone,

    #[error(transparent)]
    Form(#[from] FormError),
}

pub struct DonationPage {
    catalog: Catalog,
    form: FormInputs,
    events: mpsc::Sender<Event>,
    state: watch::Receiver<DonationState>,
    in_flight: Option<oneshot::Receiver<SubmitResult>>,
}

impl DonationPage {
    /// Spawn a dispatcher with a fresh purse on the current tokio runtime.
    pub fn launch(catalog: Catalog, sink: impl NotificationSink + 'static) -> Self {
        Self::launch_with(DonationMachine::new(), catalog, sink)
    }

    /// Like [`launch`](Self::launch), with a caller-provided machine.
    pub fn launch_with(
        machine: DonationMachine,
        catalog: Catalog,
        sink: impl NotificationSink + 'static,
    ) -> Self {
        let (dispatcher, state) = Dispatcher::new(machine, sink);
        let (events, receiver) = mpsc::channel(EVENT_BUFFER);
        tokio::spawn(dispatcher.run(ReceiverStream::new(receiver)));
        Self::attach(catalog, events, state)
    }

    /// Attach to an already running dispatcher.
    pub fn attach(
        catalog: Catalog,
        events: mpsc::Sender<Event>,
        state: watch::Receiver<DonationState>,
    ) -> Self {
        Self {
            catalog,
            form: FormInputs::default(),
            events,
            state,
            in_flight: None,
        }
    }

    /// Latest published state.
    pub fn state(&self) -> DonationState {
        self.state.borrow().clone()
    }

    pub fn form(&self) -> &FormInputs {
        &self.form
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn select(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn select_animal(&mut self, value: impl Into<String>) {
        self.select(Field::Animal, value);
    }

    pub fn select_zoo(&mut self, value: impl Into<String>) {
        self.select(Field::Zoo, value);
    }

    pub fn select_amount(&mut self, value: impl Into<String>) {
        self.select(Field::Amount, value);
    }

    /// Replace the whole form.
    pub fn fill(&mut self, inputs: FormInputs) {
        self.form = inputs;
    }

    /// Disabled while the purse is empty, while the machine is processing, and
    /// until this page has settled its own last submission.
    pub fn is_submit_enabled(&self) -> bool {
        let state = self.state.borrow();
        self.in_flight.is_none() && !state.is_processing() && !state.purse_balance().is_zero()
    }

    /// Validate the form and hand the candidate to the dispatcher.
    /// Returns as soon as it is queued; use [`settle`](Self::settle) to wait.
    pub fn submit(&mut self) -> Result<(), PageError> {
        if !self.is_submit_enabled() {
            return Err(PageError::SubmitDisabled);
        }
        let candidate = self.form.capture(&self.catalog)?;

        let (reply, settled) = oneshot::channel();
        self.events
            .try_send(Event::Submit { candidate, reply })
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => PageError::SubmitDisabled,
                mpsc::error::TrySendError::Closed(_) => PageError::DispatcherGone,
            })?;
        self.in_flight = Some(settled);
        Ok(())
    }

    /// Wait for the in-flight submission. Clears the form when it was
    /// accepted; a rejected form keeps its values for correction.
    pub async fn settle(&mut self) -> Result<SubmitResult, PageError> {
        let settled = self.in_flight.take().ok_or(PageError::NothingInFlight)?;
        let result = settled.await.map_err(|_| PageError::DispatcherGone)?;
        if result.is_ok() {
            self.form.reset();
        }
        Ok(result)
    }

    pub fn button(&self) -> SubmitButton {
        if self.state.borrow().is_processing() {
            SubmitButton::Processing
        } else if self.is_submit_enabled() {
            SubmitButton::Ready
        } else {
            SubmitButton::Disabled
        }
    }

    pub fn render(&self) -> String {
        let button = self.button();
        let state = self.state.borrow();
        PageView {
            state: &state,
            form: &self.form,
            catalog: &self.catalog,
            button,
        }
        .to_string()
    }
}
