//! Top-level driver: walks the log line by line, decides match boundaries
//! and routes classified events into the aggregators.
//!
//! Nothing in here is fatal. A line that fails to decode is logged and
//! skipped, the goal is to extract as much as possible from truncated or
//! corrupted logs.

use crate::classify::{classify, LineKind, StatCategory};
use crate::events::{DamageEvent, KillEvent, SessionMessage, TeamEvent};
use crate::stats::Match;

/// Knobs for match boundary detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// How far the round number may fall below the highest round seen before
    /// the parser assumes a new match overwrote the round counters. The
    /// default of 1 tolerates a single-round regression as log noise.
    pub round_regression_tolerance: u32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            round_regression_tolerance: 1,
        }
    }
}

/// Parses a complete log with the default [`ParserConfig`], returning the
/// finished matches in file order.
pub fn parse(data: &str, file_name: &str) -> Vec<Match> {
    parse_with(&ParserConfig::default(), data, file_name)
}

#[tracing::instrument(skip(config, data))]
pub fn parse_with(config: &ParserConfig, data: &str, file_name: &str) -> Vec<Match> {
    let mut matches: Vec<Match> = Vec::new();
    let mut current: Option<Match> = None;
    let mut viewer_account: Option<String> = None;

    for line in data.lines() {
        let Some(kind) = classify(line) else {
            continue;
        };

        match kind {
            LineKind::Session(payload) => {
                let message: SessionMessage = match serde_json::from_str(payload) {
                    Ok(message) => message,
                    Err(error) => {
                        tracing::warn!(%error, payload, "failed to decode session message");
                        continue;
                    }
                };
                handle_session(message, &mut viewer_account, current.as_mut());
            }
            LineKind::RoundReset => {
                // a reset always starts a fresh match, even if the next
                // round numbers would look contiguous
                if let Some(mut finished) = current.take() {
                    finished.complete();
                    matches.push(finished);
                    current = Some(Match::new(matches.len() as u32 + 1));
                }
            }
            LineKind::Stats {
                category: StatCategory::Kill,
                payload,
            } => {
                let event: KillEvent = match serde_json::from_str(payload) {
                    Ok(event) => event,
                    Err(error) => {
                        tracing::warn!(%error, payload, "failed to decode kill event");
                        continue;
                    }
                };
                let current_match = match_for_round(config, &mut current, &mut matches, event.round);
                current_match.round_mut(event.round.unwrap_or(0)).add_kill(&event);
            }
            LineKind::Stats {
                category: StatCategory::Damage,
                payload,
            } => {
                let event: DamageEvent = match serde_json::from_str(payload) {
                    Ok(event) => event,
                    Err(error) => {
                        tracing::warn!(%error, payload, "failed to decode damage event");
                        continue;
                    }
                };
                let current_match = match_for_round(config, &mut current, &mut matches, event.round);
                current_match.round_mut(event.round.unwrap_or(0)).add_damage(&event);
            }
            LineKind::Stats {
                category: StatCategory::Team(team),
                payload,
            } => {
                let event: TeamEvent = match serde_json::from_str(payload) {
                    Ok(event) => event,
                    Err(error) => {
                        tracing::warn!(%error, payload, "failed to decode team event");
                        continue;
                    }
                };
                match current.as_mut() {
                    Some(current_match) => current_match.add_team(team, &event),
                    None => tracing::warn!(team, "dropping roster event outside of a match"),
                }
            }
            LineKind::Stats {
                category: StatCategory::Unknown(label),
                ..
            } => {
                tracing::warn!(category = label, "unknown stat category");
            }
            LineKind::TeamName { side, name } => {
                let Some(current_match) = current.as_mut() else {
                    continue;
                };
                match side {
                    "1" => current_match.team1.name = name.to_owned(),
                    "2" => current_match.team2.name = name.to_owned(),
                    other => tracing::warn!(team = other, "team name banner for unknown team"),
                }
            }
        }
    }

    if let Some(mut finished) = current.take() {
        finished.complete();
        matches.push(finished);
    }

    matches
}

/// Returns the match a kill/damage event belongs to, archiving the current
/// match and opening a new one when the round number signals a boundary.
fn match_for_round<'m>(
    config: &ParserConfig,
    current: &'m mut Option<Match>,
    matches: &mut Vec<Match>,
    round: Option<u32>,
) -> &'m mut Match {
    let needs_new = match (current.as_ref(), round) {
        (None, _) => true,
        // round numbers jumped backwards by more than the tolerance, the
        // game started over and is reusing low round numbers
        (Some(current_match), Some(round)) => {
            i64::from(round) < current_match.latest_round - i64::from(config.round_regression_tolerance)
        }
        // an event without a round number never forces a boundary
        (Some(_), None) => false,
    };

    if needs_new {
        if let Some(mut finished) = current.take() {
            finished.complete();
            matches.push(finished);
        }
        return current.insert(Match::new(matches.len() as u32 + 1));
    }

    current.get_or_insert_with(|| Match::new(matches.len() as u32 + 1))
}

fn handle_session(
    message: SessionMessage,
    viewer_account: &mut Option<String>,
    current: Option<&mut Match>,
) {
    match message {
        SessionMessage::Login { account_id } => {
            tracing::debug!(account = %account_id, "viewer account identified");
            *viewer_account = Some(account_id);
        }
        SessionMessage::MatchUpdate {
            team_a,
            team_b,
            spectators,
        } => {
            let Some(account) = viewer_account.as_ref() else {
                return;
            };
            let Some(current_match) = current else {
                return;
            };
            if team_a.contains(account) || team_b.contains(account) {
                current_match.add_spectators(&spectators);
            }
        }
    }
}
