//! Validation rules for lead submissions.
//!
//! The one authoritative rule set: the wizard runs it before submitting and
//! the HTTP handler runs it again on the received body. Every rule is
//! checked, so a payload with several problems reports all of them, in
//! schema field order.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::ValidateEmail;

use super::options::is_product_option;
use super::{Field, LeadSubmission, OfficeLevel};

const REQUIRED: &str = "Required";

/// Stricter than RFC 5322: the domain needs a dot and an alphabetic TLD,
/// and the local part may not end with a dot.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("valid regex")
});

/// Whether `address` is an email the form accepts.
pub fn is_valid_email(address: &str) -> bool {
    address.validate_email()
        && !address.starts_with('.')
        && !address.contains("..")
        && EMAIL_SHAPE.is_match(address)
}

/// One violated rule, addressed by a dot-joined path (`consent`, `products.2`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The top-level field this error belongs to, if the path names one.
    pub fn field(&self) -> Option<Field> {
        let head = self.path.split('.').next().unwrap_or_default();
        Field::from_wire(head)
    }
}

/// Ordered list of violations for one payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }

    /// Whether any error is reported against `field`.
    pub fn touches(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field() == Some(field))
    }
}

/// Validate an untyped payload into a [`LeadSubmission`].
pub fn validate(input: &Value) -> Result<LeadSubmission, ValidationErrors> {
    let obj = match input {
        Value::Object(obj) => obj,
        other => {
            return Err(ValidationErrors(vec![FieldError::new(
                "",
                format!("Expected object, received {}", type_name(other)),
            )]));
        }
    };

    let mut check = Checker::new(obj);

    let full_name = check.text(Field::FullName, 2, "Full name is required");
    let committee = check.text(Field::Committee, 2, "Committee/Campaign name is required");
    let office_level = check.office_level();
    let state = check.text(Field::State, 2, "State is required");
    let email = check.email();
    let phone = check.optional_text(Field::Phone);
    let products = check.products();
    let quantities = check.text(Field::Quantities, 1, "Please provide approximate quantities");
    let timeline = check.text(Field::Timeline, 1, "Timeline/key dates are required");
    let paid_for_by = check.text(Field::PaidForBy, 1, "\"Paid for by\" line is required");
    let notes = check.optional_text(Field::Notes);
    let consent = check.consent();

    let errors = check.finish();
    let lead = (|| {
        Some(LeadSubmission {
            full_name: full_name?,
            committee: committee?,
            office_level: office_level?,
            state: state?,
            email: email?,
            phone: phone?,
            products: products?,
            quantities: quantities?,
            timeline: timeline?,
            paid_for_by: paid_for_by?,
            notes: notes?,
            consent: consent?,
        })
    })();

    match lead {
        Some(lead) if errors.is_empty() => Ok(lead),
        _ => Err(ValidationErrors(errors)),
    }
}

/// Validate only `fields` of a payload, with the same rules and messages
/// as [`validate`].
pub fn validate_fields(input: &Value, fields: &[Field]) -> Result<(), ValidationErrors> {
    let Err(all) = validate(input) else {
        return Ok(());
    };
    let selected: Vec<FieldError> = all
        .into_inner()
        .into_iter()
        .filter(|e| match e.field() {
            Some(field) => fields.contains(&field),
            None => e.path.is_empty(),
        })
        .collect();

    if selected.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(selected))
    }
}

// ── Rule checks ─────────────────────────────────────────────────────────

struct Checker<'a> {
    obj: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> Checker<'a> {
    fn new(obj: &'a Map<String, Value>) -> Self {
        Self {
            obj,
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Vec<FieldError> {
        self.errors
    }

    fn fail(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(path, message));
    }

    /// Look up a present, non-null value; records `Required` otherwise.
    fn required(&mut self, field: Field) -> Option<&'a Value> {
        match self.obj.get(field.as_str()) {
            None | Some(Value::Null) => {
                self.fail(field.as_str(), REQUIRED);
                None
            }
            Some(value) => Some(value),
        }
    }

    fn string(&mut self, field: Field) -> Option<&'a str> {
        match self.required(field)? {
            Value::String(s) => Some(s.as_str()),
            other => {
                self.fail(
                    field.as_str(),
                    format!("Expected string, received {}", type_name(other)),
                );
                None
            }
        }
    }

    fn text(&mut self, field: Field, min_chars: usize, message: &str) -> Option<String> {
        let value = self.string(field)?;
        if value.chars().count() < min_chars {
            self.fail(field.as_str(), message);
            return None;
        }
        Some(value.to_string())
    }

    /// Optional free text. Absent, null and empty all mean "not provided".
    fn optional_text(&mut self, field: Field) -> Option<Option<String>> {
        match self.obj.get(field.as_str()) {
            None | Some(Value::Null) => Some(None),
            Some(Value::String(s)) if s.is_empty() => Some(None),
            Some(Value::String(s)) => Some(Some(s.clone())),
            Some(other) => {
                self.fail(
                    field.as_str(),
                    format!("Expected string, received {}", type_name(other)),
                );
                None
            }
        }
    }

    fn office_level(&mut self) -> Option<OfficeLevel> {
        let level = self
            .obj
            .get(Field::OfficeLevel.as_str())
            .and_then(Value::as_str)
            .and_then(OfficeLevel::from_wire);
        if level.is_none() {
            self.fail(Field::OfficeLevel.as_str(), "Please select office level");
        }
        level
    }

    fn email(&mut self) -> Option<String> {
        let value = self.string(Field::Email)?.to_string();
        if !is_valid_email(&value) {
            self.fail(Field::Email.as_str(), "Please enter a valid email address");
            return None;
        }
        Some(value)
    }

    fn products(&mut self) -> Option<Vec<String>> {
        let key = Field::Products.as_str();
        let items = match self.required(Field::Products)? {
            Value::Array(items) => items,
            other => {
                self.fail(key, format!("Expected array, received {}", type_name(other)));
                return None;
            }
        };

        let mut products: Vec<String> = Vec::with_capacity(items.len());
        let mut ok = true;
        for (i, item) in items.iter().enumerate() {
            let path = format!("{key}.{i}");
            match item {
                Value::String(label) if !is_product_option(label) => {
                    self.fail(path, "Unknown product option");
                    ok = false;
                }
                Value::String(label) if products.contains(label) => {
                    self.fail(path, "Product selected more than once");
                    ok = false;
                }
                Value::String(label) => products.push(label.clone()),
                other => {
                    self.fail(path, format!("Expected string, received {}", type_name(other)));
                    ok = false;
                }
            }
        }

        if items.is_empty() {
            self.fail(key, "Please select at least one product type");
            return None;
        }
        ok.then_some(products)
    }

    fn consent(&mut self) -> Option<bool> {
        match self.required(Field::Consent)? {
            Value::Bool(true) => Some(true),
            Value::Bool(false) => {
                self.fail(Field::Consent.as_str(), "You must agree to be contacted");
                None
            }
            other => {
                self.fail(
                    Field::Consent.as_str(),
                    format!("Expected boolean, received {}", type_name(other)),
                );
                None
            }
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
