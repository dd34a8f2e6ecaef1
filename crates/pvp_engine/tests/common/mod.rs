//! Shared test utilities for battle and pipeline tests.
//!
//! This module contains the combatant and roster builders used by the
//! integration test binaries.

pub mod helpers;
