//! Onboarding step sequence.

use serde::{Deserialize, Serialize};

use crate::profile::Completeness;

/// The ordered onboarding steps.
///
/// Progresses linearly: Identity → Location → Preferences → Review. The
/// terminal "done" state lives outside the flow entirely (the main
/// application area).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Identity,
    Location,
    Preferences,
    Review,
}

impl OnboardingStep {
    /// Get the next step in the linear progression, if any.
    pub fn next(&self) -> Option<OnboardingStep> {
        use OnboardingStep::*;
        match self {
            Identity => Some(Location),
            Location => Some(Preferences),
            Preferences => Some(Review),
            Review => None,
        }
    }

    /// Whether every group belonging to an *earlier* step is complete.
    pub fn prerequisites_met(&self, flags: &Completeness) -> bool {
        match self {
            Self::Identity => true,
            Self::Location => flags.identity,
            Self::Preferences => flags.identity && flags.location,
            Self::Review => flags.overall,
        }
    }
}

impl std::fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Identity => "identity",
            Self::Location => "location",
            Self::Preferences => "preferences",
            Self::Review => "review",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_all_steps() {
        use OnboardingStep::*;
        let mut current = Identity;
        for expected in [Location, Preferences, Review] {
            let next = current.next().unwrap();
            assert_eq!(next, expected);
            current = next;
        }
        assert!(current.next().is_none());
    }

    #[test]
    fn display_matches_serde() {
        use OnboardingStep::*;
        for step in [Identity, Location, Preferences, Review] {
            let display = format!("{step}");
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(format!("\"{display}\""), json);
        }
    }

    #[test]
    fn prerequisites_follow_group_order() {
        use OnboardingStep::*;
        let identity_only = Completeness {
            identity: true,
            ..Default::default()
        };
        assert!(Identity.prerequisites_met(&Completeness::default()));
        assert!(Location.prerequisites_met(&identity_only));
        assert!(!Preferences.prerequisites_met(&identity_only));
        assert!(!Review.prerequisites_met(&identity_only));

        let all = Completeness {
            identity: true,
            location: true,
            preferences: true,
            overall: true,
        };
        assert!(Review.prerequisites_met(&all));
    }
}
