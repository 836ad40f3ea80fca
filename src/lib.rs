//! Onboarding core — completeness evaluation, step routing, and background
//! upload coordination.

pub mod config;
pub mod error;
pub mod profile;
pub mod routing;
pub mod services;
pub mod upload;
