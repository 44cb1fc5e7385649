//! Shared helpers for resolution tests.

pub mod fixture_helpers;
