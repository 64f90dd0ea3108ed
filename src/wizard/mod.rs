//! Client-side lead form: a three-step wizard with progress tracking and a
//! single asynchronous submit.
//!
//! The wizard validates with the same schema the server uses
//! ([`crate::lead::schema`]), talks to its host UI through
//! [`UiEnvironment`], and to the contact endpoint through
//! [`SubmitTransport`].

pub mod draft;
pub mod environment;
pub mod machine;
pub mod step;
pub mod transport;

pub use draft::LeadDraft;
pub use environment::{
    EventSink, FormEvent, HeadlessEnvironment, NoopEventSink, TracingEventSink, UiEnvironment,
};
pub use machine::{
    ERROR_MESSAGE, FORM_ANCHOR, SUCCESS_MESSAGE, StepGating, SubmissionTicket, SubmitStatus,
    Wizard, WizardError, WizardOptions,
};
pub use step::Step;
pub use transport::{HttpSubmitTransport, SubmitTransport};
