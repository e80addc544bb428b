//! Shared test harness modules for the Quadrant CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod helpers;
mod import_unit;
mod search_steps;
mod search_unit;
