//! Wizard steps: three screens walked linearly, forwards and back.

use serde::{Deserialize, Serialize};

use crate::lead::Field;

/// The screens of the form.
///
/// Progresses CampaignInfo → ProductDetails → TimelineNotes, and may step
/// back one screen at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    CampaignInfo,
    ProductDetails,
    TimelineNotes,
}

impl Step {
    pub const ALL: [Step; 3] = [Self::CampaignInfo, Self::ProductDetails, Self::TimelineNotes];

    /// Total number of steps.
    pub const COUNT: u8 = 3;

    /// 1-based position of the step.
    pub fn number(&self) -> u8 {
        match self {
            Self::CampaignInfo => 1,
            Self::ProductDetails => 2,
            Self::TimelineNotes => 3,
        }
    }

    /// Check if a transition from `self` to `target` is valid: one step
    /// forwards or one step back.
    pub fn can_transition_to(&self, target: Step) -> bool {
        self.next() == Some(target) || self.previous() == Some(target)
    }

    pub fn next(&self) -> Option<Step> {
        match self {
            Self::CampaignInfo => Some(Self::ProductDetails),
            Self::ProductDetails => Some(Self::TimelineNotes),
            Self::TimelineNotes => None,
        }
    }

    pub fn previous(&self) -> Option<Step> {
        match self {
            Self::CampaignInfo => None,
            Self::ProductDetails => Some(Self::CampaignInfo),
            Self::TimelineNotes => Some(Self::ProductDetails),
        }
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }

    /// Fields shown on this step.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Self::CampaignInfo => &[
                Field::FullName,
                Field::Committee,
                Field::OfficeLevel,
                Field::State,
                Field::Email,
                Field::Phone,
            ],
            Self::ProductDetails => &[Field::Products, Field::Quantities, Field::PaidForBy],
            Self::TimelineNotes => &[Field::Timeline, Field::Notes, Field::Consent],
        }
    }

    /// Progress through the form, `number / COUNT * 100`, rounded down.
    pub fn percent(&self) -> u8 {
        // Fits: at most 3 * 100.
        (u16::from(self.number()) * 100 / u16::from(Self::COUNT)) as u8
    }
}

impl Default for Step {
    fn default() -> Self {
        Self::CampaignInfo
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::CampaignInfo => "campaign_info",
            Self::ProductDetails => "product_details",
            Self::TimelineNotes => "timeline_notes",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        use Step::*;
        let transitions = [
            (CampaignInfo, ProductDetails),
            (ProductDetails, TimelineNotes),
            (TimelineNotes, ProductDetails),
            (ProductDetails, CampaignInfo),
        ];
        for (from, to) in transitions {
            assert!(from.can_transition_to(to), "{from} should transition to {to}");
        }
    }

    #[test]
    fn invalid_transitions() {
        use Step::*;
        // Skip steps
        assert!(!CampaignInfo.can_transition_to(TimelineNotes));
        assert!(!TimelineNotes.can_transition_to(CampaignInfo));
        // Self-transition
        assert!(!ProductDetails.can_transition_to(ProductDetails));
    }

    #[test]
    fn next_and_previous_walk_all_steps() {
        let mut current = Step::default();
        let mut seen = vec![current];
        while let Some(next) = current.next() {
            seen.push(next);
            current = next;
        }
        assert_eq!(seen, Step::ALL.to_vec());
        assert!(current.is_last());
        assert_eq!(current.previous(), Some(Step::ProductDetails));
        assert_eq!(Step::CampaignInfo.previous(), None);
    }

    #[test]
    fn every_field_belongs_to_exactly_one_step() {
        for field in Field::ALL {
            let owners = Step::ALL
                .iter()
                .filter(|step| step.fields().contains(&field))
                .count();
            assert_eq!(owners, 1, "{field} should be on one step");
        }
    }

    #[test]
    fn percent_per_step() {
        assert_eq!(Step::CampaignInfo.percent(), 33);
        assert_eq!(Step::ProductDetails.percent(), 66);
        assert_eq!(Step::TimelineNotes.percent(), 100);
    }

    #[test]
    fn display_matches_serde() {
        for step in Step::ALL {
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(format!("\"{step}\""), json, "mismatch for {step:?}");
        }
    }
}
