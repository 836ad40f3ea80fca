//! Profile data model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Reference to a picked image: device-local before the upload resolves,
/// durable remote identifier after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum ImageRef {
    Local(String),
    Remote(String),
}

impl ImageRef {
    /// Whether this reference is a durable remote identifier.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Local(s) | Self::Remote(s) => s,
        }
    }
}

/// The named clusters of profile fields that must be jointly non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    Identity,
    Location,
    Preferences,
}

impl std::fmt::Display for FieldGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Identity => "identity",
            Self::Location => "location",
            Self::Preferences => "preferences",
        };
        write!(f, "{s}")
    }
}

/// User profile as owned by the backend. Every field is optional until the
/// user fills it in during onboarding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// ISO-8601 calendar date, e.g. "1990-04-01".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_currency: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<ImageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_card_image: Option<ImageRef>,
}

/// A field is filled iff present and non-empty. Whitespace-only strings are
/// deliberately NOT trimmed; only the literal empty string counts as absent.
pub(crate) fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

impl ProfileRecord {
    /// The fields belonging to a group, paired with their names for
    /// validation messages.
    fn group_fields(&self, group: FieldGroup) -> Vec<(&'static str, &Option<String>)> {
        match group {
            FieldGroup::Identity => vec![
                ("firstName", &self.first_name),
                ("lastName", &self.last_name),
                ("gender", &self.gender),
                ("dateOfBirth", &self.date_of_birth),
            ],
            FieldGroup::Location => vec![
                ("country", &self.country),
                ("city", &self.city),
                ("address", &self.address),
                ("profileType", &self.profile_type),
            ],
            FieldGroup::Preferences => vec![
                ("preferredLanguage", &self.preferred_language),
                ("preferredCurrency", &self.preferred_currency),
            ],
        }
    }

    /// Whether every field in `group` is present and non-empty.
    pub fn group_complete(&self, group: FieldGroup) -> bool {
        self.group_fields(group).iter().all(|(_, v)| filled(v))
    }

    /// Local submit-time validation for one step's field group.
    ///
    /// Blocks the advance action on a missing field or a malformed date of
    /// birth; validation failures are never sent to the backend.
    pub fn validate_group(&self, group: FieldGroup) -> Result<(), ValidationError> {
        for (field, value) in self.group_fields(group) {
            if !filled(value) {
                return Err(ValidationError::MissingField { field });
            }
        }
        if group == FieldGroup::Identity {
            let dob = self.date_of_birth.as_deref().unwrap_or_default();
            if NaiveDate::parse_from_str(dob, "%Y-%m-%d").is_err() {
                return Err(ValidationError::InvalidDate {
                    value: dob.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Partial profile update. `None` fields are left untouched on apply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<ImageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_card_image: Option<ImageRef>,
}

impl ProfilePatch {
    /// Merge every `Some` field of this patch into `record`.
    pub fn apply(&self, record: &mut ProfileRecord) {
        macro_rules! merge {
            ($($field:ident),+ $(,)?) => {
                $(if let Some(v) = &self.$field {
                    record.$field = Some(v.clone());
                })+
            };
        }
        merge!(
            first_name,
            last_name,
            gender,
            date_of_birth,
            country,
            city,
            address,
            profile_type,
            preferred_language,
            preferred_currency,
            profile_image,
            id_card_image,
        );
    }

    /// Whether the patch carries no changes.
    pub fn is_empty(&self) -> bool {
        serde_json::to_value(self)
            .map(|v| v.as_object().is_none_or(|o| o.is_empty()))
            .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_filled() -> ProfileRecord {
        ProfileRecord {
            first_name: Some("Amina".to_string()),
            last_name: Some("Diallo".to_string()),
            gender: Some("female".to_string()),
            date_of_birth: Some("1992-11-03".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn default_record_is_all_absent() {
        let record = ProfileRecord::default();
        for group in [
            FieldGroup::Identity,
            FieldGroup::Location,
            FieldGroup::Preferences,
        ] {
            assert!(!record.group_complete(group), "{group} should be incomplete");
        }
    }

    #[test]
    fn empty_string_counts_as_absent() {
        let mut record = identity_filled();
        record.gender = Some(String::new());
        assert!(!record.group_complete(FieldGroup::Identity));
    }

    #[test]
    fn whitespace_only_counts_as_filled() {
        let mut record = identity_filled();
        record.gender = Some("   ".to_string());
        assert!(record.group_complete(FieldGroup::Identity));
    }

    #[test]
    fn validate_reports_first_missing_field() {
        let record = ProfileRecord {
            first_name: Some("Amina".to_string()),
            ..Default::default()
        };
        let err = record.validate_group(FieldGroup::Identity).unwrap_err();
        match err {
            ValidationError::MissingField { field } => assert_eq!(field, "lastName"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn validate_rejects_malformed_date() {
        let mut record = identity_filled();
        record.date_of_birth = Some("03/11/1992".to_string());
        let err = record.validate_group(FieldGroup::Identity).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { .. }));
    }

    #[test]
    fn validate_accepts_complete_identity() {
        assert!(identity_filled().validate_group(FieldGroup::Identity).is_ok());
    }

    #[test]
    fn record_serde_uses_camel_case() {
        let record = identity_filled();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["firstName"], "Amina");
        assert_eq!(json["dateOfBirth"], "1992-11-03");
        assert!(json.get("country").is_none(), "absent fields are skipped");
    }

    #[test]
    fn record_serde_roundtrip() {
        let mut record = identity_filled();
        record.profile_image = Some(ImageRef::Remote("st_abc123".to_string()));
        let json = serde_json::to_string(&record).unwrap();
        let parsed: ProfileRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
        assert!(parsed.profile_image.unwrap().is_remote());
    }

    #[test]
    fn patch_apply_merges_only_some_fields() {
        let mut record = identity_filled();
        let patch = ProfilePatch {
            country: Some("SN".to_string()),
            city: Some("Dakar".to_string()),
            ..Default::default()
        };
        patch.apply(&mut record);
        assert_eq!(record.country.as_deref(), Some("SN"));
        assert_eq!(record.city.as_deref(), Some("Dakar"));
        assert_eq!(record.first_name.as_deref(), Some("Amina"));
    }

    #[test]
    fn patch_replaces_local_image_with_remote() {
        let mut record = ProfileRecord {
            profile_image: Some(ImageRef::Local("file:///tmp/a.jpg".to_string())),
            ..Default::default()
        };
        let patch = ProfilePatch {
            profile_image: Some(ImageRef::Remote("st_1".to_string())),
            ..Default::default()
        };
        patch.apply(&mut record);
        assert!(record.profile_image.unwrap().is_remote());
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(ProfilePatch::default().is_empty());
        let patch = ProfilePatch {
            city: Some("Dakar".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
