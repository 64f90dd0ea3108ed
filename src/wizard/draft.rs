//! Editable form state held by the wizard between screens.

use serde_json::{Map, Value, json};

use crate::lead::{Field, OfficeLevel};

/// Raw, possibly invalid, field values as the user has entered them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadDraft {
    pub full_name: String,
    pub committee: String,
    pub office_level: Option<OfficeLevel>,
    pub state: String,
    pub email: String,
    pub phone: String,
    pub products: Vec<String>,
    pub quantities: String,
    pub timeline: String,
    pub paid_for_by: String,
    pub notes: String,
    pub consent: bool,
}

impl LeadDraft {
    /// Blank form, optionally with one product preselected.
    pub fn with_preselected(product: Option<&str>) -> Self {
        Self {
            products: product.map(|p| vec![p.to_string()]).unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Mutable access to a free-text field. `None` for fields that are not
    /// plain text (office level, products, consent).
    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::FullName => Some(&mut self.full_name),
            Field::Committee => Some(&mut self.committee),
            Field::State => Some(&mut self.state),
            Field::Email => Some(&mut self.email),
            Field::Phone => Some(&mut self.phone),
            Field::Quantities => Some(&mut self.quantities),
            Field::Timeline => Some(&mut self.timeline),
            Field::PaidForBy => Some(&mut self.paid_for_by),
            Field::Notes => Some(&mut self.notes),
            Field::OfficeLevel | Field::Products | Field::Consent => None,
        }
    }

    /// Add `product` if absent, remove it if present. Selection order is kept.
    pub fn toggle_product(&mut self, product: &str) {
        if let Some(pos) = self.products.iter().position(|p| p == product) {
            self.products.remove(pos);
        } else {
            self.products.push(product.to_string());
        }
    }

    /// The JSON payload the form would post. An unselected office level is
    /// omitted, as are blank optional fields.
    pub fn to_payload(&self) -> Value {
        let mut obj = Map::new();
        obj.insert(Field::FullName.as_str().into(), json!(self.full_name));
        obj.insert(Field::Committee.as_str().into(), json!(self.committee));
        if let Some(level) = self.office_level {
            obj.insert(Field::OfficeLevel.as_str().into(), json!(level));
        }
        obj.insert(Field::State.as_str().into(), json!(self.state));
        obj.insert(Field::Email.as_str().into(), json!(self.email));
        if !self.phone.is_empty() {
            obj.insert(Field::Phone.as_str().into(), json!(self.phone));
        }
        obj.insert(Field::Products.as_str().into(), json!(self.products));
        obj.insert(Field::Quantities.as_str().into(), json!(self.quantities));
        obj.insert(Field::Timeline.as_str().into(), json!(self.timeline));
        obj.insert(Field::PaidForBy.as_str().into(), json!(self.paid_for_by));
        if !self.notes.is_empty() {
            obj.insert(Field::Notes.as_str().into(), json!(self.notes));
        }
        obj.insert(Field::Consent.as_str().into(), json!(self.consent));
        Value::Object(obj)
    }
}
