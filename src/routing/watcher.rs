//! Reactive route re-evaluation.
//!
//! Redirect checks must run on every profile mutation and every navigation
//! change, not only once at mount. The watcher subscribes to both and
//! re-runs `decide` each time, emitting at most one redirect command per
//! evaluation.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::profile::{Completeness, ProfileRecord};

use super::router::{decide, RouteAction, RouteTarget};
use super::step::OnboardingStep;

/// Current position reported by the host navigation system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationPosition {
    pub step: OnboardingStep,
    pub in_onboarding_flow: bool,
}

/// Subscribes to profile and navigation changes and emits redirect commands.
pub struct RouteWatcher;

impl RouteWatcher {
    /// Spawn the watcher task.
    ///
    /// Evaluates once immediately, then once per change on either input.
    /// The task ends when both senders are dropped or the command receiver
    /// is closed.
    pub fn spawn(
        mut profile_rx: watch::Receiver<ProfileRecord>,
        mut nav_rx: watch::Receiver<NavigationPosition>,
    ) -> (JoinHandle<()>, mpsc::UnboundedReceiver<RouteTarget>) {
        let (tx, rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            let mut profile_open = true;
            let mut nav_open = true;
            loop {
                let flags = Completeness::evaluate(&profile_rx.borrow());
                let nav = *nav_rx.borrow();
                if let RouteAction::RedirectTo(target) =
                    decide(&flags, nav.step, nav.in_onboarding_flow)
                {
                    tracing::debug!(current = %nav.step, %target, "Redirecting");
                    if tx.send(target).is_err() {
                        return;
                    }
                }

                // Wait for the next change on whichever input is still live.
                loop {
                    if !profile_open && !nav_open {
                        return;
                    }
                    tokio::select! {
                        res = profile_rx.changed(), if profile_open => match res {
                            Ok(()) => break,
                            Err(_) => profile_open = false,
                        },
                        res = nav_rx.changed(), if nav_open => match res {
                            Ok(()) => break,
                            Err(_) => nav_open = false,
                        },
                    }
                }
            }
        });

        (handle, rx)
    }
}
