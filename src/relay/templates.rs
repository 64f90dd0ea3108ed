//! Plain-text bodies for lead notifications.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::lead::LeadSubmission;

static NON_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\D").expect("valid regex"));
static US_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{3})(\d{3})(\d{4})$").expect("valid regex"));

/// Subject and body of a rendered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub subject: String,
    pub body: String,
}

/// Format a 10-digit US number as `(555) 123-4567`; anything else is
/// returned unchanged.
pub fn format_phone(phone: &str) -> String {
    let digits = NON_DIGIT.replace_all(phone, "");
    match US_NUMBER.captures(&digits) {
        Some(caps) => format!("({}) {}-{}", &caps[1], &caps[2], &caps[3]),
        None => phone.to_string(),
    }
}

/// Message for the vendor's sales inbox: every field of the lead.
pub fn operator_message(lead: &LeadSubmission, submitted_at: DateTime<Utc>) -> Rendered {
    let phone = lead
        .phone
        .as_deref()
        .map(format_phone)
        .unwrap_or_else(|| "Not provided".to_string());

    let mut body = format!(
        "New Campaign Merchandise Request\n\n\
         Campaign: {}\n\
         Contact: {}\n\
         Email: {}\n\
         Phone: {}\n\
         Office Level: {}\n\
         State: {}\n\
         Products: {}\n\
         Quantities: {}\n\
         Timeline: {}\n\
         Paid for by: {}\n",
        lead.committee,
        lead.full_name,
        lead.email,
        phone,
        lead.office_level,
        lead.state,
        lead.products.join(", "),
        lead.quantities,
        lead.timeline,
        lead.paid_for_by,
    );
    if let Some(notes) = &lead.notes {
        body.push_str(&format!("Notes: {notes}\n"));
    }
    body.push_str(&format!("\nSubmitted: {}\n", submitted_at.to_rfc3339()));

    Rendered {
        subject: format!("New Order Request: {}", lead.committee),
        body,
    }
}

/// Acknowledgment sent to the submitter.
pub fn acknowledgment_message(lead: &LeadSubmission) -> Rendered {
    let body = format!(
        "Hi {},\n\n\
         We've received your merchandise request for {} and will get back to \
         you within 24-48 hours with a custom quote.\n\n\
         Your request summary:\n\
         - Products: {}\n\
         - Quantities: {}\n\
         - Timeline: {}\n\n\
         If you have any immediate questions, reply to this email.\n",
        lead.full_name,
        lead.committee,
        lead.products.join(", "),
        lead.quantities,
        lead.timeline,
    );

    Rendered {
        subject: "Your Request Received".to_string(),
        body,
    }
}
