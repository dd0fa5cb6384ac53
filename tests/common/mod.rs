//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod flaky;
pub mod harness;

use chrono::NaiveDate;
use forgegrid::domain::NoteDraft;

/// Parses a `YYYY-MM-DD` date.
pub fn day(s: &str) -> NaiveDate {
    s.parse()
        .unwrap_or_else(|e| panic!("bad test date {}: {}", s, e))
}

/// Builds a draft, panicking on an invalid title.
pub fn draft(title: &str, content: &str) -> NoteDraft {
    NoteDraft::new(title, content).expect("valid draft")
}
