//! Shared output model for parsed matches, consumed by whatever renders or
//! stores the statistics.

use std::collections::HashMap;

/// Per-player counters. The same shape is used per round and per match, the
/// match-level record is the sum of the round-level records.
#[derive(Debug, Default, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UserStats {
    pub kills: u32,
    pub team_kills: u32,
    pub assists: u32,
    pub deaths: u32,
    pub opening_kills: u32,
    pub opening_kill_attempts: u32,
    pub atk_damage_dealt: f64,
    pub def_damage_dealt: f64,
    pub trade_kills: u32,
    pub times_traded: u32,
    /// Only counted at the match level.
    pub atk_rounds_played: u32,
    /// Only counted at the match level.
    pub def_rounds_played: u32,
    /// Rounds in which the player got a kill, assist, survived or was traded.
    pub kast_rounds: u32,
    /// Per weapon id, sum over hits of `damage / victim max health`. Not a
    /// true percentage until normalized by the round count.
    pub weapon_damage_share: HashMap<u16, f64>,
}

impl UserStats {
    /// Folds another stat record into this one, counter by counter.
    pub fn add(&mut self, other: &UserStats) {
        self.kills += other.kills;
        self.team_kills += other.team_kills;
        self.assists += other.assists;
        self.deaths += other.deaths;
        self.opening_kills += other.opening_kills;
        self.opening_kill_attempts += other.opening_kill_attempts;
        self.atk_damage_dealt += other.atk_damage_dealt;
        self.def_damage_dealt += other.def_damage_dealt;
        self.trade_kills += other.trade_kills;
        self.times_traded += other.times_traded;
        self.atk_rounds_played += other.atk_rounds_played;
        self.def_rounds_played += other.def_rounds_played;
        self.kast_rounds += other.kast_rounds;
        for (weapon_id, share) in &other.weapon_damage_share {
            *self.weapon_damage_share.entry(*weapon_id).or_insert(0.0) += share;
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TeamInfo {
    pub team_number: u8,
    pub name: String,
    pub wins: u32,
    pub user_names: HashMap<u32, String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MatchInfo {
    pub match_id: u32,
    pub team1: TeamInfo,
    pub team2: TeamInfo,
    pub users: HashMap<u32, UserStats>,
    pub round_count: u32,
    pub spectators: Vec<String>,
}
