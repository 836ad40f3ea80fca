//! Completeness evaluation — which onboarding field groups are still pending.

use serde::{Deserialize, Serialize};

use super::model::{FieldGroup, ProfileRecord};

/// Completeness flags for a profile record.
///
/// Pure function of the record: no side effects, total over all inputs
/// (a fully-absent profile yields all false).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completeness {
    pub identity: bool,
    pub location: bool,
    pub preferences: bool,
    pub overall: bool,
}

impl Completeness {
    /// Evaluate the three field groups. `overall` is the AND of all three.
    pub fn evaluate(record: &ProfileRecord) -> Self {
        let identity = record.group_complete(FieldGroup::Identity);
        let location = record.group_complete(FieldGroup::Location);
        let preferences = record.group_complete(FieldGroup::Preferences);
        Self {
            identity,
            location,
            preferences,
            overall: identity && location && preferences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> ProfileRecord {
        ProfileRecord {
            first_name: Some("Amina".to_string()),
            last_name: Some("Diallo".to_string()),
            gender: Some("female".to_string()),
            date_of_birth: Some("1992-11-03".to_string()),
            country: Some("SN".to_string()),
            city: Some("Dakar".to_string()),
            address: Some("12 Rue Felix".to_string()),
            profile_type: Some("personal".to_string()),
            preferred_language: Some("fr".to_string()),
            preferred_currency: Some("XOF".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn empty_profile_is_all_incomplete() {
        let flags = Completeness::evaluate(&ProfileRecord::default());
        assert_eq!(flags, Completeness::default());
    }

    #[test]
    fn full_profile_is_all_complete() {
        let flags = Completeness::evaluate(&full_record());
        assert!(flags.identity && flags.location && flags.preferences && flags.overall);
    }

    #[test]
    fn overall_is_and_of_groups() {
        let mut record = full_record();
        record.preferred_currency = None;
        let flags = Completeness::evaluate(&record);
        assert!(flags.identity);
        assert!(flags.location);
        assert!(!flags.preferences);
        assert!(!flags.overall);

        record.address = Some(String::new());
        let flags = Completeness::evaluate(&record);
        assert!(!flags.location);
        assert_eq!(flags.overall, flags.identity && flags.location && flags.preferences);
    }

    #[test]
    fn evaluate_is_deterministic() {
        let record = full_record();
        assert_eq!(Completeness::evaluate(&record), Completeness::evaluate(&record));
    }

    #[test]
    fn images_do_not_affect_completeness() {
        use crate::profile::model::ImageRef;
        let mut record = full_record();
        record.profile_image = Some(ImageRef::Local("file:///tmp/a.jpg".to_string()));
        assert!(Completeness::evaluate(&record).overall);
        record.profile_image = None;
        assert!(Completeness::evaluate(&record).overall);
    }
}
