pub mod catalog;
pub mod csv;
pub mod dispatcher;
pub mod dollars;
pub mod form;
pub mod machine;
pub mod model;
pub mod notify;
pub mod page;
pub mod view;

pub use catalog::{Catalog, Field, SelectOption};
pub use dollars::Dollars;
pub use form::{FormError, FormInputs};
pub use machine::{DonationMachine, DonationState, SubmitError};
pub use model::{DonationCandidate, Phase, Transaction};
pub use notify::{ConsoleSink, MemorySink, NoticeKind, NotificationSink};
pub use page::{DonationPage, PageError};
