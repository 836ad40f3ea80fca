//! Redirect decision rules.

use serde::{Deserialize, Serialize};

use crate::profile::Completeness;

use super::step::OnboardingStep;

/// Where a redirect points: an onboarding step or the main application area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteTarget {
    Step(OnboardingStep),
    MainApp,
}

impl std::fmt::Display for RouteTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Step(step) => write!(f, "{step}"),
            Self::MainApp => write!(f, "main_app"),
        }
    }
}

/// Outcome of one routing evaluation. At most one redirect per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAction {
    Stay,
    RedirectTo(RouteTarget),
}

/// Decide whether the current screen is the correct step.
///
/// Rules are evaluated in fixed priority order, first match wins:
/// 1. identity incomplete, not on identity → redirect to identity
/// 2. location incomplete (identity done), not on location → redirect to location
/// 3. preferences incomplete (earlier done), not on preferences → redirect to preferences
/// 4. everything complete, still inside the flow, not on review → exit to the main app
/// 5. otherwise stay
///
/// The `current != target` guards prevent redirect loops. Rule 4 exempts
/// only the review step: a fully complete profile mid-review stays put.
pub fn decide(
    flags: &Completeness,
    current: OnboardingStep,
    in_onboarding_flow: bool,
) -> RouteAction {
    use OnboardingStep::*;

    if !flags.identity && current != Identity {
        return RouteAction::RedirectTo(RouteTarget::Step(Identity));
    }
    if flags.identity && !flags.location && current != Location {
        return RouteAction::RedirectTo(RouteTarget::Step(Location));
    }
    if flags.identity && flags.location && !flags.preferences && current != Preferences {
        return RouteAction::RedirectTo(RouteTarget::Step(Preferences));
    }
    if flags.overall && in_onboarding_flow && current != Review {
        return RouteAction::RedirectTo(RouteTarget::MainApp);
    }
    RouteAction::Stay
}
