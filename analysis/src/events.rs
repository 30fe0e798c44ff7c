//! Decoded shapes of the JSON payloads embedded in recognized log lines.
//!
//! The log is best effort, so decoding is a plain field projection: every
//! field is `#[serde(default)]` and a missing field yields a zeroed value
//! instead of an error. Only payloads that are not valid JSON at all are
//! rejected, and the segmenter handles that per line.

/// One `Stats :: Damage` line. Emitted per hit.
#[derive(Debug, Default, Clone, Copy, PartialEq, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DamageEvent {
    pub round: Option<u32>,
    pub attacker_id: u32,
    pub attacker_side: u8,
    pub victim_id: u32,
    pub victim_side: u8,
    pub tick: u32,
    pub damage_dealt: f64,
    pub damage_source: u16,
}

/// One `Stats :: Kill` line, the victim reached zero health.
#[derive(Debug, Default, Clone, Copy, PartialEq, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KillEvent {
    pub round: Option<u32>,
    pub attacker_id: u32,
    pub attacker_side: u8,
    pub victim_id: u32,
    pub victim_side: u8,
    pub tick: u32,
    pub damage_source: u16,
}

#[derive(Debug, Default, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct Member {
    #[serde(rename = "AccountId")]
    pub account_id: String,
    #[serde(rename = "EntityId")]
    pub entity_id: u32,
    #[serde(rename = "Name")]
    pub name: String,
}

/// One `Stats :: Team0` / `Stats :: Team1` line, emitted once per side at
/// round end with the side's cumulative score and current roster.
#[derive(Debug, Default, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct TeamEvent {
    #[serde(rename = "Side")]
    pub side: u8,
    #[serde(rename = "RoundWins")]
    pub round_wins: u32,
    #[serde(rename = "RoundOutcomes")]
    pub round_outcomes: Vec<u32>,
    #[serde(rename = "Members")]
    pub members: Vec<Member>,
}

/// Session/telemetry control payload, only used for spectator tracking.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(tag = "Type")]
pub enum SessionMessage {
    /// Identifies the account the log was recorded under.
    Login {
        #[serde(rename = "AccountId", default)]
        account_id: String,
    },
    /// Score update for a match the viewing account may be part of.
    MatchUpdate {
        #[serde(rename = "TeamA", default)]
        team_a: Vec<String>,
        #[serde(rename = "TeamB", default)]
        team_b: Vec<String>,
        #[serde(rename = "Spectators", default)]
        spectators: Vec<String>,
    },
}
