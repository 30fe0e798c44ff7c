//! Reconstructs matches and rounds from the game's line-oriented telemetry
//! log and computes per-player and per-team statistics from them.
//!
//! The entry point is [`logparser::parse`], which takes the complete log
//! text and returns the finished matches; [`stats::Match::info`] turns one
//! into the serializable [`common::MatchInfo`] output shape.

pub mod classify;
pub mod damage_source;
pub mod events;
pub mod logparser;
pub mod stats;
