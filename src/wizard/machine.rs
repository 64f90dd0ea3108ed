//! The wizard state machine: step navigation, field edits and the
//! submit lifecycle.
//!
//! ```text
//! Idle ──begin_submit──▶ Submitting ──finish_submit(ok)──▶ Success (form cleared)
//!                              └─────finish_submit(err)──▶ Error   (form kept)
//! ```
//!
//! Success and Error are not terminal; the form can be edited and
//! submitted again from either.

use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::{debug, info, warn};

use super::draft::LeadDraft;
use super::environment::{FormEvent, UiEnvironment};
use super::step::Step;
use super::transport::SubmitTransport;
use crate::envelope::Envelope;
use crate::error::SubmitError;
use crate::lead::{self, Field, FieldError, LeadSubmission, OfficeLevel, ValidationErrors};

/// Anchor of the top of the form, scrolled to on step changes.
pub const FORM_ANCHOR: &str = "contact-form";

pub const SUCCESS_MESSAGE: &str = "Thanks! We'll reach out shortly to finalize details.";
pub const ERROR_MESSAGE: &str =
    "Sorry, there was an error submitting your request. Please try again or email us directly.";

/// Whether "Continue" checks the fields of the current step first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepGating {
    /// Validate the current step's fields before advancing.
    #[default]
    PerStep,
    /// Advance freely; validate everything only on submit.
    Deferred,
}

#[derive(Debug, Clone, Default)]
pub struct WizardOptions {
    pub gating: StepGating,
    /// Product checked when the form opens and after each successful submit.
    pub preselected_product: Option<String>,
    /// Whether the form is shown in a modal; reported with `form_start`.
    pub modal: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitStatus {
    Idle,
    Submitting,
    Success,
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("Input is frozen while a submission is in flight")]
    InputFrozen,

    #[error("A submission is already in flight")]
    SubmissionInFlight,

    #[error("Already on the last step")]
    NoNextStep,

    #[error("Already on the first step")]
    NoPreviousStep,

    #[error("Submit is only available on step {}", Step::COUNT)]
    NotOnLastStep,

    #[error("Field {0} is not a text field")]
    NotTextField(Field),

    #[error("Form is invalid: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("Submission ticket does not match the submission in flight")]
    StaleTicket,

    #[error("Cannot move from step {from} to step {to}")]
    InvalidTransition { from: Step, to: Step },
}

/// Proof that a submission was started; hand it back to
/// [`Wizard::finish_submit`] with the outcome.
#[derive(Debug)]
pub struct SubmissionTicket {
    id: u64,
    lead: LeadSubmission,
}

impl SubmissionTicket {
    /// The validated lead to send.
    pub fn lead(&self) -> &LeadSubmission {
        &self.lead
    }
}

/// Three-step lead form.
pub struct Wizard<E> {
    env: E,
    options: WizardOptions,
    draft: LeadDraft,
    step: Step,
    status: SubmitStatus,
    message: Option<String>,
    errors: Vec<FieldError>,
    form_started: bool,
    next_ticket: u64,
    in_flight: Option<u64>,
}

impl<E: UiEnvironment> Wizard<E> {
    pub fn new(env: E, options: WizardOptions) -> Self {
        let draft = LeadDraft::with_preselected(options.preselected_product.as_deref());
        Self {
            env,
            options,
            draft,
            step: Step::default(),
            status: SubmitStatus::Idle,
            message: None,
            errors: Vec::new(),
            form_started: false,
            next_ticket: 0,
            in_flight: None,
        }
    }

    // ── Read side ───────────────────────────────────────────────────────

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn draft(&self) -> &LeadDraft {
        &self.draft
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    /// Banner text for the last submit outcome.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// First error message shown under `field`.
    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field() == Some(field))
            .map(|e| e.message.as_str())
    }

    pub fn form_started(&self) -> bool {
        self.form_started
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    /// Progress bar value; hidden until the user first focuses a field.
    pub fn progress_percent(&self) -> Option<u8> {
        self.form_started.then(|| self.step.percent())
    }

    // ── Edits ───────────────────────────────────────────────────────────

    pub fn focus_field(&mut self, field: Field) {
        if self.form_started {
            return;
        }
        self.form_started = true;
        self.env.track(
            FormEvent::Start,
            props([
                ("modal", json!(self.options.modal)),
                ("field", json!(field.as_str())),
            ]),
        );
    }

    pub fn set_text(&mut self, field: Field, value: impl Into<String>) -> Result<(), WizardError> {
        self.ensure_editable()?;
        let slot = self
            .draft
            .text_mut(field)
            .ok_or(WizardError::NotTextField(field))?;
        *slot = value.into();
        self.clear_errors(field);
        Ok(())
    }

    pub fn set_office_level(&mut self, level: Option<OfficeLevel>) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.draft.office_level = level;
        self.clear_errors(Field::OfficeLevel);
        Ok(())
    }

    pub fn toggle_product(&mut self, product: &str) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.draft.toggle_product(product);
        self.clear_errors(Field::Products);
        Ok(())
    }

    pub fn set_consent(&mut self, consent: bool) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.draft.consent = consent;
        self.clear_errors(Field::Consent);
        Ok(())
    }

    // ── Navigation ──────────────────────────────────────────────────────

    /// "Continue". With [`StepGating::PerStep`] the current step's fields
    /// must be valid first.
    pub fn next(&mut self) -> Result<Step, WizardError> {
        self.ensure_editable()?;
        let target = self.step.next().ok_or(WizardError::NoNextStep)?;

        if self.options.gating == StepGating::PerStep {
            let fields = self.step.fields();
            if let Err(errors) = lead::validate_fields(&self.draft.to_payload(), fields) {
                self.errors.retain(|e| !e.field().is_some_and(|f| fields.contains(&f)));
                self.errors.extend(errors.errors().iter().cloned());
                self.scroll_to_first_error(&errors);
                debug!(step = %self.step, count = errors.errors().len(), "Step blocked by invalid fields");
                return Err(errors.into());
            }
        }

        self.move_to(target)?;
        Ok(target)
    }

    /// "Back". Never discards entered values.
    pub fn back(&mut self) -> Result<Step, WizardError> {
        self.ensure_editable()?;
        let target = self.step.previous().ok_or(WizardError::NoPreviousStep)?;
        self.move_to(target)?;
        Ok(target)
    }

    // ── Submission ──────────────────────────────────────────────────────

    /// Validate the whole form and freeze it for sending.
    ///
    /// On invalid input the wizard jumps to the earliest step holding an
    /// error, so the messages are visible.
    pub fn begin_submit(&mut self) -> Result<SubmissionTicket, WizardError> {
        if self.is_submitting() {
            return Err(WizardError::SubmissionInFlight);
        }
        if !self.step.is_last() {
            return Err(WizardError::NotOnLastStep);
        }

        let lead = match lead::validate(&self.draft.to_payload()) {
            Ok(lead) => lead,
            Err(errors) => {
                self.errors = errors.errors().to_vec();
                if let Some(step) = Step::ALL
                    .into_iter()
                    .find(|step| step.fields().iter().any(|f| errors.touches(*f)))
                {
                    self.step = step;
                }
                if let Some(field) = self.step.fields().iter().find(|f| errors.touches(**f)) {
                    self.env.scroll_to(field.as_str());
                }
                return Err(errors.into());
            }
        };

        self.errors.clear();
        self.message = None;
        self.status = SubmitStatus::Submitting;
        self.next_ticket += 1;
        self.in_flight = Some(self.next_ticket);

        self.env.track(
            FormEvent::SubmitAttempt,
            props([
                ("office_level", json!(lead.office_level)),
                ("state", json!(lead.state)),
                ("products", json!(lead.products.len())),
            ]),
        );

        Ok(SubmissionTicket {
            id: self.next_ticket,
            lead,
        })
    }

    /// Apply the outcome of the submission started by `ticket`.
    pub fn finish_submit(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<Envelope, SubmitError>,
    ) -> Result<SubmitStatus, WizardError> {
        if self.in_flight != Some(ticket.id) {
            return Err(WizardError::StaleTicket);
        }
        self.in_flight = None;

        match outcome {
            Ok(envelope) if envelope.success => self.succeed(&ticket.lead),
            Ok(envelope) => self.fail(envelope.field_errors(), "rejected"),
            Err(SubmitError::Rejected {
                envelope: Some(envelope),
                ..
            }) => self.fail(envelope.field_errors(), "api_error"),
            Err(e) => {
                warn!(error = %e, "Lead submission failed");
                self.fail(&[], "api_error");
            }
        }

        Ok(self.status)
    }

    /// Validate, send through `transport`, and apply the outcome.
    pub async fn submit<T>(&mut self, transport: &T) -> Result<SubmitStatus, WizardError>
    where
        T: SubmitTransport + ?Sized,
    {
        let ticket = self.begin_submit()?;
        let outcome = transport.submit(ticket.lead()).await;
        self.finish_submit(ticket, outcome)
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn succeed(&mut self, lead: &LeadSubmission) {
        info!(campaign = %lead.committee, "Lead submitted");
        self.status = SubmitStatus::Success;
        self.message = Some(SUCCESS_MESSAGE.to_string());
        self.errors.clear();
        self.draft = LeadDraft::with_preselected(self.options.preselected_product.as_deref());
        self.step = Step::default();
        self.env.scroll_to(FORM_ANCHOR);
        self.env.track(
            FormEvent::SubmitSuccess,
            props([
                ("office_level", json!(lead.office_level)),
                ("state", json!(lead.state)),
            ]),
        );
    }

    fn fail(&mut self, server_errors: &[FieldError], reason: &str) {
        self.status = SubmitStatus::Error;
        self.message = Some(ERROR_MESSAGE.to_string());
        self.errors = server_errors.to_vec();
        self.env.track(FormEvent::SubmitError, props([("error", json!(reason))]));
    }

    fn ensure_editable(&self) -> Result<(), WizardError> {
        if self.is_submitting() {
            return Err(WizardError::InputFrozen);
        }
        Ok(())
    }

    fn clear_errors(&mut self, field: Field) {
        self.errors.retain(|e| e.field() != Some(field));
    }

    /// Step-by-step navigation; only adjacent steps are reachable.
    fn move_to(&mut self, target: Step) -> Result<(), WizardError> {
        if !self.step.can_transition_to(target) {
            return Err(WizardError::InvalidTransition {
                from: self.step,
                to: target,
            });
        }
        debug!(from = %self.step, to = %target, "Wizard step change");
        self.step = target;
        self.env.scroll_to(FORM_ANCHOR);
        Ok(())
    }

    fn scroll_to_first_error(&self, errors: &ValidationErrors) {
        if let Some(field) = errors.errors().iter().find_map(FieldError::field) {
            self.env.scroll_to(field.as_str());
        }
    }
}

fn props<const N: usize>(pairs: [(&str, Value); N]) -> Map<String, Value> {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::lead::PRODUCT_OPTIONS;

    /// Records scrolls and events.
    #[derive(Default)]
    struct Recorder {
        scrolls: RefCell<Vec<String>>,
        events: RefCell<Vec<(FormEvent, Map<String, Value>)>>,
    }

    impl UiEnvironment for Recorder {
        fn scroll_to(&self, anchor: &str) {
            self.scrolls.borrow_mut().push(anchor.to_string());
        }

        fn track(&self, event: FormEvent, properties: Map<String, Value>) {
            self.events.borrow_mut().push((event, properties));
        }
    }

    impl Recorder {
        fn event_names(&self) -> Vec<FormEvent> {
            self.events.borrow().iter().map(|(e, _)| *e).collect()
        }
    }

    /// Transport returning a fixed outcome and counting calls.
    struct Canned {
        outcome: fn() -> Result<Envelope, SubmitError>,
        calls: Mutex<u32>,
    }

    impl Canned {
        fn new(outcome: fn() -> Result<Envelope, SubmitError>) -> Self {
            Self {
                outcome,
                calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl SubmitTransport for Canned {
        async fn submit(&self, lead: &LeadSubmission) -> Result<Envelope, SubmitError> {
            *self.calls.lock().unwrap() += 1;
            (self.outcome)().map(|mut env| {
                if env.success {
                    env.summary = Some(lead.summary());
                }
                env
            })
        }
    }

    fn accepted() -> Result<Envelope, SubmitError> {
        Ok(Envelope {
            success: true,
            message: "Request submitted successfully".into(),
            summary: None,
            errors: None,
        })
    }

    fn network_down() -> Result<Envelope, SubmitError> {
        Err(SubmitError::Network("connection refused".into()))
    }

    fn server_rejects_consent() -> Result<Envelope, SubmitError> {
        Err(SubmitError::Rejected {
            status: 400,
            envelope: Some(Envelope::invalid(vec![FieldError::new(
                "consent",
                "You must agree to be contacted",
            )])),
        })
    }

    fn wizard(gating: StepGating) -> Wizard<Recorder> {
        Wizard::new(Recorder::default(), WizardOptions {
            gating,
            ..WizardOptions::default()
        })
    }

    fn fill_step_one(w: &mut Wizard<Recorder>) {
        w.focus_field(Field::FullName);
        w.set_text(Field::FullName, "Jane Doe").unwrap();
        w.set_text(Field::Committee, "Doe for Senate").unwrap();
        w.set_office_level(Some(OfficeLevel::Federal)).unwrap();
        w.set_text(Field::State, "TX").unwrap();
        w.set_text(Field::Email, "jane@doe.org").unwrap();
    }

    fn fill_step_two(w: &mut Wizard<Recorder>) {
        w.toggle_product(PRODUCT_OPTIONS[0]).unwrap();
        w.set_text(Field::Quantities, "500").unwrap();
        w.set_text(Field::PaidForBy, "Paid for by Doe for Senate").unwrap();
    }

    fn fill_step_three(w: &mut Wizard<Recorder>) {
        w.set_text(Field::Timeline, "Need by Oct 1").unwrap();
        w.set_consent(true).unwrap();
    }

    fn filled_on_last_step() -> Wizard<Recorder> {
        let mut w = wizard(StepGating::PerStep);
        fill_step_one(&mut w);
        w.next().unwrap();
        fill_step_two(&mut w);
        w.next().unwrap();
        fill_step_three(&mut w);
        w
    }

    #[test]
    fn initial_state() {
        let w = wizard(StepGating::PerStep);
        assert_eq!(w.step(), Step::CampaignInfo);
        assert_eq!(w.status(), SubmitStatus::Idle);
        assert!(!w.form_started());
        assert_eq!(w.progress_percent(), None);
        assert!(w.message().is_none());
    }

    #[test]
    fn first_focus_starts_form_once() {
        let mut w = wizard(StepGating::PerStep);
        w.focus_field(Field::Email);
        w.focus_field(Field::FullName);

        assert!(w.form_started());
        assert_eq!(w.progress_percent(), Some(33));
        assert_eq!(w.env().event_names(), vec![FormEvent::Start]);
        assert_eq!(w.env().events.borrow()[0].1["field"], "email");
    }

    #[test]
    fn progress_follows_step() {
        let mut w = wizard(StepGating::Deferred);
        w.focus_field(Field::FullName);
        w.next().unwrap();
        assert_eq!(w.progress_percent(), Some(66));
        w.next().unwrap();
        assert_eq!(w.progress_percent(), Some(100));
        w.back().unwrap();
        assert_eq!(w.progress_percent(), Some(66));
    }

    #[test]
    fn round_trip_keeps_entered_values() {
        let mut w = wizard(StepGating::PerStep);
        fill_step_one(&mut w);
        let step_one = w.draft().clone();

        w.next().unwrap();
        fill_step_two(&mut w);
        w.next().unwrap();
        w.back().unwrap();
        w.back().unwrap();

        assert_eq!(w.step(), Step::CampaignInfo);
        assert_eq!(w.draft().full_name, step_one.full_name);
        assert_eq!(w.draft().committee, step_one.committee);
        assert_eq!(w.draft().office_level, Some(OfficeLevel::Federal));
        assert_eq!(w.draft().email, "jane@doe.org");
        assert_eq!(w.draft().quantities, "500");
    }

    #[test]
    fn per_step_gating_blocks_invalid_step() {
        let mut w = wizard(StepGating::PerStep);
        w.set_text(Field::FullName, "J").unwrap();

        let err = w.next().unwrap_err();
        assert!(matches!(err, WizardError::Invalid(_)));
        assert_eq!(w.step(), Step::CampaignInfo);
        assert_eq!(w.error_for(Field::FullName), Some("Full name is required"));
        assert_eq!(w.error_for(Field::OfficeLevel), Some("Please select office level"));
        // Fields of later steps are not checked yet.
        assert!(w.error_for(Field::Products).is_none());
        assert_eq!(w.env().scrolls.borrow().last().unwrap(), "fullName");
    }

    #[test]
    fn editing_a_field_clears_its_error() {
        let mut w = wizard(StepGating::PerStep);
        let _ = w.next();
        assert!(w.error_for(Field::Email).is_some());

        w.set_text(Field::Email, "jane@doe.org").unwrap();
        assert!(w.error_for(Field::Email).is_none());
        assert!(w.error_for(Field::FullName).is_some());
    }

    #[test]
    fn deferred_gating_advances_freely() {
        let mut w = wizard(StepGating::Deferred);
        assert_eq!(w.next().unwrap(), Step::ProductDetails);
        assert_eq!(w.next().unwrap(), Step::TimelineNotes);
        assert!(matches!(w.next(), Err(WizardError::NoNextStep)));
        assert!(w.errors().is_empty());
    }

    #[test]
    fn back_from_first_step_is_rejected() {
        let mut w = wizard(StepGating::PerStep);
        assert!(matches!(w.back(), Err(WizardError::NoPreviousStep)));
    }

    #[test]
    fn submit_requires_last_step() {
        let mut w = wizard(StepGating::PerStep);
        assert!(matches!(w.begin_submit(), Err(WizardError::NotOnLastStep)));
    }

    #[test]
    fn invalid_submit_jumps_to_earliest_error() {
        let mut w = wizard(StepGating::Deferred);
        w.next().unwrap();
        w.next().unwrap();
        w.set_text(Field::Timeline, "Soon").unwrap();

        let err = w.begin_submit().unwrap_err();
        assert!(matches!(err, WizardError::Invalid(_)));
        assert_eq!(w.status(), SubmitStatus::Idle);
        assert_eq!(w.step(), Step::CampaignInfo);
        assert_eq!(w.error_for(Field::Consent), Some("You must agree to be contacted"));
        assert_eq!(w.env().scrolls.borrow().last().unwrap(), "fullName");
    }

    #[test]
    fn invalid_submit_lands_on_first_step_with_errors() {
        let mut w = wizard(StepGating::Deferred);
        fill_step_one(&mut w);
        w.next().unwrap();
        w.toggle_product(PRODUCT_OPTIONS[0]).unwrap();
        w.set_text(Field::Quantities, "500").unwrap();
        w.next().unwrap();
        w.set_consent(true).unwrap();

        w.begin_submit().unwrap_err();

        // timeline precedes paidForBy in schema order but sits on a later step
        assert_eq!(w.step(), Step::ProductDetails);
        assert!(w.error_for(Field::Timeline).is_some());
        assert!(w.error_for(Field::PaidForBy).is_some());
        assert_eq!(w.env().scrolls.borrow().last().unwrap(), "paidForBy");
    }

    #[test]
    fn navigation_only_reaches_adjacent_steps() {
        let mut w = wizard(StepGating::Deferred);
        let err = w.move_to(Step::TimelineNotes).unwrap_err();
        assert!(matches!(
            err,
            WizardError::InvalidTransition {
                from: Step::CampaignInfo,
                to: Step::TimelineNotes
            }
        ));
        assert_eq!(w.step(), Step::CampaignInfo);
        assert!(w.env().scrolls.borrow().is_empty());
    }

    #[test]
    fn text_setter_rejects_non_text_field() {
        let mut w = wizard(StepGating::PerStep);
        assert!(matches!(
            w.set_text(Field::Consent, "yes"),
            Err(WizardError::NotTextField(Field::Consent))
        ));
    }

    #[test]
    fn input_frozen_while_submitting() {
        let mut w = filled_on_last_step();
        let ticket = w.begin_submit().unwrap();

        assert!(w.is_submitting());
        assert!(matches!(w.begin_submit(), Err(WizardError::SubmissionInFlight)));
        assert!(matches!(w.set_text(Field::Notes, "x"), Err(WizardError::InputFrozen)));
        assert!(matches!(w.back(), Err(WizardError::InputFrozen)));
        assert!(matches!(w.set_consent(false), Err(WizardError::InputFrozen)));

        w.finish_submit(ticket, accepted()).unwrap();
        assert!(!w.is_submitting());
    }

    #[test]
    fn attempt_event_carries_lead_shape() {
        let mut w = filled_on_last_step();
        let ticket = w.begin_submit().unwrap();
        assert_eq!(ticket.lead().committee, "Doe for Senate");

        let events = w.env().events.borrow();
        let (event, props) = events.last().unwrap();
        assert_eq!(*event, FormEvent::SubmitAttempt);
        assert_eq!(props["office_level"], "Federal");
        assert_eq!(props["state"], "TX");
        assert_eq!(props["products"], 1);
    }

    #[test]
    fn stale_ticket_is_rejected() {
        let mut w = filled_on_last_step();
        let first = w.begin_submit().unwrap();
        w.finish_submit(first, network_down()).unwrap();

        let second = w.begin_submit().unwrap();
        let forged = SubmissionTicket {
            id: 999,
            lead: second.lead().clone(),
        };
        assert!(matches!(
            w.finish_submit(forged, accepted()),
            Err(WizardError::StaleTicket)
        ));
        assert!(w.is_submitting());
        w.finish_submit(second, accepted()).unwrap();
    }

    #[tokio::test]
    async fn success_clears_form_and_shows_confirmation() {
        let mut w = Wizard::new(Recorder::default(), WizardOptions {
            preselected_product: Some("Custom/Other".into()),
            ..WizardOptions::default()
        });
        w.focus_field(Field::FullName);
        fill_step_one(&mut w);
        w.next().unwrap();
        fill_step_two(&mut w);
        w.next().unwrap();
        fill_step_three(&mut w);

        let transport = Canned::new(accepted);
        let status = w.submit(&transport).await.unwrap();

        assert_eq!(status, SubmitStatus::Success);
        assert_eq!(w.message(), Some(SUCCESS_MESSAGE));
        assert_eq!(w.step(), Step::CampaignInfo);
        assert_eq!(
            w.draft(),
            &LeadDraft::with_preselected(Some("Custom/Other"))
        );
        // The progress bar stays visible once started.
        assert!(w.form_started());
        assert_eq!(
            w.env().event_names(),
            vec![FormEvent::Start, FormEvent::SubmitAttempt, FormEvent::SubmitSuccess]
        );
    }

    #[tokio::test]
    async fn network_failure_keeps_values_for_retry() {
        let mut w = filled_on_last_step();
        let before = w.draft().clone();

        let status = w.submit(&Canned::new(network_down)).await.unwrap();
        assert_eq!(status, SubmitStatus::Error);
        assert_eq!(w.message(), Some(ERROR_MESSAGE));
        assert_eq!(w.draft(), &before);
        assert_eq!(w.step(), Step::TimelineNotes);
        assert_eq!(w.env().event_names().last(), Some(&FormEvent::SubmitError));

        // Retry without re-entering anything.
        let status = w.submit(&Canned::new(accepted)).await.unwrap();
        assert_eq!(status, SubmitStatus::Success);
    }

    #[tokio::test]
    async fn server_validation_errors_map_onto_fields() {
        let mut w = filled_on_last_step();

        let status = w.submit(&Canned::new(server_rejects_consent)).await.unwrap();
        assert_eq!(status, SubmitStatus::Error);
        assert_eq!(w.error_for(Field::Consent), Some("You must agree to be contacted"));
        assert_eq!(w.draft().full_name, "Jane Doe");
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_transport() {
        let mut w = filled_on_last_step();
        w.set_consent(false).unwrap();

        let transport = Canned::new(accepted);
        assert!(w.submit(&transport).await.is_err());
        assert_eq!(*transport.calls.lock().unwrap(), 0);
        assert_eq!(w.step(), Step::TimelineNotes);
    }

    #[tokio::test]
    async fn form_is_resubmittable_after_success() {
        let mut w = filled_on_last_step();
        w.submit(&Canned::new(accepted)).await.unwrap();

        fill_step_one(&mut w);
        w.next().unwrap();
        fill_step_two(&mut w);
        w.next().unwrap();
        fill_step_three(&mut w);
        assert_eq!(
            w.submit(&Canned::new(accepted)).await.unwrap(),
            SubmitStatus::Success
        );
    }
}
