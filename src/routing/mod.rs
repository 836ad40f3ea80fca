//! Step routing — pure redirect decisions plus the reactive watcher that
//! re-runs them on every profile or navigation change.

pub mod router;
pub mod step;
pub mod watcher;

pub use router::{decide, RouteAction, RouteTarget};
pub use step::OnboardingStep;
pub use watcher::{NavigationPosition, RouteWatcher};
