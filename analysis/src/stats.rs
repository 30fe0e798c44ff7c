//! Round and match level aggregation of kill/damage/roster events.

use std::collections::{BTreeMap, HashMap, HashSet};

use common::{MatchInfo, TeamInfo, UserStats};

use crate::events::{DamageEvent, KillEvent, TeamEvent};

pub const TICK_RATE: u32 = 30;
/// 5 second trade window
pub const TRADE_WINDOW: u32 = TICK_RATE * 5;

const ATTACKER_MAX_HEALTH: f64 = 150.0;
const DEFENDER_MAX_HEALTH: f64 = 100.0;

/// Share of the victim's max health a third party must have dealt within the
/// round to be credited with an assist on the victim's death.
const ASSIST_SHARE: f64 = 0.3;

fn max_health(side: u8) -> f64 {
    if side == 0 {
        ATTACKER_MAX_HEALTH
    } else {
        DEFENDER_MAX_HEALTH
    }
}

/// Per-round view of a player: the stat counters plus the transient
/// damage-received bookkeeping needed to resolve assists.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct User {
    pub stats: UserStats,
    /// Cumulative damage received per attacker entity id, round-scoped.
    pub damage_received: HashMap<u32, f64>,
}

/// Compact record of one kill, kept for end-of-round trade resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillLog {
    pub tick: u32,
    pub attacker_id: u32,
    pub attacker_side: u8,
    pub victim_id: u32,
    pub victim_side: u8,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Round {
    pub round: u32,
    pub users: HashMap<u32, User>,
    /// Entity ids registered through roster events. Every participant gets a
    /// user record by the time the round completes, even without any event.
    pub participants: HashSet<u32>,
    /// Kills ordered newest to oldest by tick.
    pub kills: Vec<KillLog>,
}

impl Round {
    pub fn new(round: u32) -> Self {
        Self {
            round,
            ..Self::default()
        }
    }

    pub fn add_damage(&mut self, event: &DamageEvent) {
        if event.attacker_side == event.victim_side {
            return;
        }

        let attacker = self.users.entry(event.attacker_id).or_default();
        if event.attacker_side == 0 {
            attacker.stats.atk_damage_dealt += event.damage_dealt;
        } else {
            attacker.stats.def_damage_dealt += event.damage_dealt;
        }

        let victim_health = max_health(event.victim_side);
        *attacker
            .stats
            .weapon_damage_share
            .entry(event.damage_source)
            .or_insert(0.0) += event.damage_dealt / victim_health;

        let victim = self.users.entry(event.victim_id).or_default();
        *victim.damage_received.entry(event.attacker_id).or_insert(0.0) += event.damage_dealt;
    }

    pub fn add_kill(&mut self, event: &KillEvent) {
        let victim = self.users.entry(event.victim_id).or_default();
        victim.stats.deaths += 1;

        let min_assist_damage = max_health(event.victim_side) * ASSIST_SHARE;
        let assisters: Vec<u32> = victim
            .damage_received
            .iter()
            .filter(|(entity_id, damage)| {
                **entity_id != event.attacker_id
                    && **entity_id != event.victim_id
                    && **damage >= min_assist_damage
            })
            .map(|(entity_id, _)| *entity_id)
            .collect();
        for entity_id in assisters {
            self.users.entry(entity_id).or_default().stats.assists += 1;
        }

        if event.attacker_side == event.victim_side {
            if event.attacker_id != event.victim_id {
                self.users.entry(event.attacker_id).or_default().stats.team_kills += 1;
            }
            // team and self kills stay out of every other kill metric
            return;
        }

        self.users.entry(event.attacker_id).or_default().stats.kills += 1;

        let log = KillLog {
            tick: event.tick,
            attacker_id: event.attacker_id,
            attacker_side: event.attacker_side,
            victim_id: event.victim_id,
            victim_side: event.victim_side,
        };
        let position = self
            .kills
            .iter()
            .position(|kill| kill.tick < event.tick)
            .unwrap_or(self.kills.len());
        self.kills.insert(position, log);
    }

    /// Finalizes the round: opening duel, trades and KAST. Called exactly
    /// once, when the segmenter decides the round's match is over.
    pub fn complete(&mut self) {
        for entity_id in &self.participants {
            self.users.entry(*entity_id).or_default();
        }

        // the chronologically first kill is the last entry of the
        // newest-first list
        if let Some(first_kill) = self.kills.last().copied() {
            let attacker = self.users.entry(first_kill.attacker_id).or_default();
            attacker.stats.opening_kills = 1;
            attacker.stats.opening_kill_attempts = 1;
            let victim = self.users.entry(first_kill.victim_id).or_default();
            victim.stats.opening_kill_attempts = 1;
        }

        for i in 0..self.kills.len() {
            let kill = self.kills[i];
            for x in i..self.kills.len() {
                let possible_trade = self.kills[x];
                // ticks only shrink from here on, nothing further can be
                // inside the window
                if kill.tick - possible_trade.tick > TRADE_WINDOW {
                    break;
                }
                if possible_trade.attacker_id == kill.victim_id
                    && possible_trade.victim_side == kill.attacker_side
                {
                    self.users.entry(kill.attacker_id).or_default().stats.trade_kills += 1;
                    self.users
                        .entry(possible_trade.victim_id)
                        .or_default()
                        .stats
                        .times_traded = 1;
                }
            }
        }

        for user in self.users.values_mut() {
            let stats = &mut user.stats;
            if stats.kills > 0 || stats.assists > 0 || stats.times_traded > 0 || stats.deaths == 0
            {
                stats.kast_rounds += 1;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub team_number: u8,
    pub name: String,
    pub wins: u32,
    pub user_names: HashMap<u32, String>,
}

impl Team {
    pub fn new(team_number: u8) -> Self {
        Self {
            team_number,
            name: format!("Team {}", team_number),
            wins: 0,
            user_names: HashMap::new(),
        }
    }

    fn info(&self) -> TeamInfo {
        TeamInfo {
            team_number: self.team_number,
            name: self.name.clone(),
            wins: self.wins,
            user_names: self.user_names.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub match_id: u32,
    pub users: HashMap<u32, UserStats>,
    pub team1: Team,
    pub team2: Team,
    pub round_count: u32,
    /// Highest round number seen so far, -1 until the first round exists.
    pub latest_round: i64,
    pub rounds: BTreeMap<u32, Round>,
    pub spectators: Vec<String>,
}

impl Match {
    pub fn new(match_id: u32) -> Self {
        Self {
            match_id,
            users: HashMap::new(),
            team1: Team::new(1),
            team2: Team::new(2),
            round_count: 0,
            latest_round: -1,
            rounds: BTreeMap::new(),
            spectators: Vec::new(),
        }
    }

    /// Lazily creates the round and keeps the highest-round marker current.
    pub fn round_mut(&mut self, round: u32) -> &mut Round {
        if i64::from(round) > self.latest_round {
            self.latest_round = i64::from(round);
        }
        self.rounds.entry(round).or_insert_with(|| Round::new(round))
    }

    /// Applies a roster event. `team` is the index parsed from the stat
    /// category (`Team0`/`Team1`), `event.side` decides attack vs defense.
    pub fn add_team(&mut self, team: u8, event: &TeamEvent) {
        match team {
            0 | 1 => {}
            other => {
                tracing::warn!(team = other, "ignoring roster event for unknown team index");
                return;
            }
        }

        {
            let entry = if team == 0 {
                &mut self.team1
            } else {
                &mut self.team2
            };
            // the end-of-match summary repeats the roster with a zeroed
            // score, it must not clobber the live state
            if event.round_wins < entry.wins {
                return;
            }
            entry.wins = event.round_wins;
            for member in &event.members {
                entry.user_names.insert(member.entity_id, member.name.clone());
            }
        }

        let latest = self.latest_round.max(0) as u32;
        let round = self.round_mut(latest);
        for member in &event.members {
            round.participants.insert(member.entity_id);
        }

        match event.side {
            0 => {
                for member in &event.members {
                    self.users.entry(member.entity_id).or_default().atk_rounds_played += 1;
                }
            }
            1 => {
                for member in &event.members {
                    self.users.entry(member.entity_id).or_default().def_rounds_played += 1;
                }
            }
            other => {
                tracing::warn!(side = other, "roster event with side outside 0/1");
            }
        }
    }

    /// Merges spectator account ids reported by a session message, keeping
    /// first-seen order and dropping duplicates.
    pub fn add_spectators(&mut self, account_ids: &[String]) {
        for account_id in account_ids {
            if !self.spectators.contains(account_id) {
                self.spectators.push(account_id.clone());
            }
        }
    }

    /// Finalizes every round and folds the per-round stats into the
    /// match-level users. Called exactly once per match.
    pub fn complete(&mut self) {
        for round in self.rounds.values_mut() {
            round.complete();
            for (entity_id, user) in &round.users {
                self.users.entry(*entity_id).or_default().add(&user.stats);
            }
        }
        self.round_count = self.rounds.len() as u32;
    }

    /// Consumer-facing snapshot of the completed match.
    pub fn info(&self) -> MatchInfo {
        MatchInfo {
            match_id: self.match_id,
            team1: self.team1.info(),
            team2: self.team2.info(),
            users: self.users.clone(),
            round_count: self.round_count,
            spectators: self.spectators.clone(),
        }
    }
}
