//! Lead submission model: the one record the contact form produces.

pub mod options;
pub mod schema;

use serde::{Deserialize, Serialize};

pub use options::{PRODUCT_OPTIONS, STATE_OPTIONS};
pub use schema::{FieldError, ValidationErrors, is_valid_email, validate, validate_fields};

/// Level of the office the campaign is running for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OfficeLevel {
    Local,
    State,
    Federal,
}

impl OfficeLevel {
    pub const ALL: [OfficeLevel; 3] = [Self::Local, Self::State, Self::Federal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "Local",
            Self::State => "State",
            Self::Federal => "Federal",
        }
    }

    /// Parse the wire value. Matching is exact, like the form's select values.
    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == value)
    }
}

impl std::fmt::Display for OfficeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated campaign merchandise request.
///
/// Only [`schema::validate`] produces one from untrusted input; the fields
/// are public so callers can read them after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    pub full_name: String,
    pub committee: String,
    pub office_level: OfficeLevel,
    pub state: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub products: Vec<String>,
    pub quantities: String,
    pub timeline: String,
    pub paid_for_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub consent: bool,
}

impl LeadSubmission {
    /// The echo shown back to the submitter after a successful capture.
    pub fn summary(&self) -> LeadSummary {
        LeadSummary {
            campaign: self.committee.clone(),
            contact: self.full_name.clone(),
            email: self.email.clone(),
            products: self.products.clone(),
            timeline: self.timeline.clone(),
        }
    }
}

/// Subset of a lead echoed in the success envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSummary {
    pub campaign: String,
    pub contact: String,
    pub email: String,
    pub products: Vec<String>,
    pub timeline: String,
}

/// Every field of the form, in schema order.
///
/// Schema order is also the order validation errors are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Committee,
    OfficeLevel,
    State,
    Email,
    Phone,
    Products,
    Quantities,
    Timeline,
    PaidForBy,
    Notes,
    Consent,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Self::FullName,
        Self::Committee,
        Self::OfficeLevel,
        Self::State,
        Self::Email,
        Self::Phone,
        Self::Products,
        Self::Quantities,
        Self::Timeline,
        Self::PaidForBy,
        Self::Notes,
        Self::Consent,
    ];

    /// JSON key of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Committee => "committee",
            Self::OfficeLevel => "officeLevel",
            Self::State => "state",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Products => "products",
            Self::Quantities => "quantities",
            Self::Timeline => "timeline",
            Self::PaidForBy => "paidForBy",
            Self::Notes => "notes",
            Self::Consent => "consent",
        }
    }

    pub fn from_wire(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == key)
    }

    /// Whether the form can be submitted without this field.
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Phone | Self::Notes)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
