//! # EDH Stats
//!
//! Statistics engine for a multiplayer Commander game tracker.
//!
//! ## Architecture
//!
//! - **models**: Players, decks, games, participations and derived stat records
//! - **calculate**: Pure statistics computations (leaderboards, streaks, head-to-head, ...)
//! - **storage**: Read-only JSONL snapshot of the tracker data
//! - **service**: Resolves ids against the snapshot and runs the calculations
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod config;
pub mod models;
pub mod service;
pub mod storage;

pub use models::*;

use std::collections::BTreeSet;

use thiserror::Error;

/// Error parsing a comma-separated list of integers.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid number '{token}' in list '{input}'")]
pub struct IdListError {
    pub input: String,
    pub token: String,
}

/// Parse a comma-separated list of integers (e.g., "3,4,5,6").
///
/// Whitespace around items is ignored and empty items are skipped, so a blank
/// string yields an empty set.
pub fn parse_id_list(s: &str) -> Result<BTreeSet<u32>, IdListError> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<u32>().map_err(|_| IdListError {
                input: s.to_string(),
                token: t.to_string(),
            })
        })
        .collect()
}

/// Parse an optional group id list. Absent or blank input means no group
/// restriction.
pub fn parse_group_ids(s: Option<&str>) -> Result<Option<BTreeSet<GroupId>>, IdListError> {
    match s {
        Some(s) if !s.trim().is_empty() => {
            Ok(Some(parse_id_list(s)?.into_iter().map(GroupId).collect()))
        }
        _ => Ok(None),
    }
}
