use std::collections::HashMap;

use analysis::events::{DamageEvent, KillEvent, Member, TeamEvent};
use analysis::stats::{Match, Round};
use common::UserStats;
use pretty_assertions::assert_eq;

fn kill(tick: u32, attacker_id: u32, attacker_side: u8, victim_id: u32, victim_side: u8) -> KillEvent {
    KillEvent {
        round: Some(0),
        attacker_id,
        attacker_side,
        victim_id,
        victim_side,
        tick,
        damage_source: 1,
    }
}

fn damage(
    tick: u32,
    attacker_id: u32,
    attacker_side: u8,
    victim_id: u32,
    victim_side: u8,
    damage_dealt: f64,
) -> DamageEvent {
    DamageEvent {
        round: Some(0),
        attacker_id,
        attacker_side,
        victim_id,
        victim_side,
        tick,
        damage_dealt,
        damage_source: 1,
    }
}

fn member(entity_id: u32, name: &str) -> Member {
    Member {
        account_id: format!("acc-{}", entity_id),
        entity_id,
        name: name.to_owned(),
    }
}

#[test]
fn opening_duel_goes_to_the_first_kill() {
    let mut round = Round::new(0);
    // added out of order on purpose, the list is kept sorted by tick
    round.add_kill(&kill(200, 3, 1, 2, 0));
    round.add_kill(&kill(100, 1, 0, 3, 1));
    round.complete();

    assert_eq!(round.users[&1].stats.opening_kills, 1);
    assert_eq!(round.users[&1].stats.opening_kill_attempts, 1);
    assert_eq!(round.users[&3].stats.opening_kill_attempts, 1);
    assert_eq!(round.users[&3].stats.opening_kills, 0);
    assert_eq!(round.users[&2].stats.opening_kill_attempts, 0);

    let attempts: u32 = round
        .users
        .values()
        .map(|user| user.stats.opening_kill_attempts)
        .sum();
    assert_eq!(attempts, 2);
}

#[test]
fn team_kill_only_counts_as_team_kill() {
    let mut round = Round::new(0);
    round.add_kill(&kill(50, 1, 0, 2, 0));
    round.complete();

    assert_eq!(round.users[&1].stats.team_kills, 1);
    assert_eq!(round.users[&1].stats.kills, 0);
    assert_eq!(round.users[&1].stats.trade_kills, 0);
    assert_eq!(round.users[&1].stats.opening_kills, 0);
    assert_eq!(round.users[&2].stats.deaths, 1);
    assert_eq!(round.kills.len(), 0);
}

#[test]
fn self_kill_is_not_a_team_kill() {
    let mut round = Round::new(0);
    round.add_kill(&kill(50, 1, 0, 1, 0));
    round.complete();

    assert_eq!(round.users[&1].stats.deaths, 1);
    assert_eq!(round.users[&1].stats.team_kills, 0);
    assert_eq!(round.users[&1].stats.kills, 0);
}

#[test]
fn trade_inside_window_only() {
    let mut round = Round::new(0);
    // 1 opens on 2, 3 avenges 2 within the window, 4 kills 3 way later
    round.add_kill(&kill(0, 1, 0, 2, 1));
    round.add_kill(&kill(60, 3, 1, 1, 0));
    round.add_kill(&kill(400, 4, 0, 3, 1));
    round.complete();

    assert_eq!(round.users[&3].stats.trade_kills, 1);
    assert_eq!(round.users[&2].stats.times_traded, 1);
    assert_eq!(round.users[&4].stats.trade_kills, 0);
    assert_eq!(round.users[&1].stats.trade_kills, 0);
    assert_eq!(round.users[&1].stats.times_traded, 0);
    assert_eq!(round.users[&3].stats.times_traded, 0);

    let trades: u32 = round.users.values().map(|user| user.stats.trade_kills).sum();
    let traded: u32 = round.users.values().map(|user| user.stats.times_traded).sum();
    assert_eq!((trades, traded), (1, 1));
}

#[test]
fn trade_exactly_on_the_window_edge() {
    let mut round = Round::new(0);
    round.add_kill(&kill(0, 1, 0, 2, 1));
    // 150 ticks later is still a trade, 151 would not be
    round.add_kill(&kill(150, 3, 1, 1, 0));
    round.complete();

    assert_eq!(round.users[&3].stats.trade_kills, 1);
    assert_eq!(round.users[&2].stats.times_traded, 1);
}

#[test]
fn assist_threshold_is_thirty_percent_of_victim_health() {
    let mut round = Round::new(0);
    // victim 9 defends, max health 100, threshold 30
    round.add_damage(&damage(10, 1, 0, 9, 1, 30.0));
    round.add_damage(&damage(20, 2, 0, 9, 1, 29.999));
    round.add_kill(&kill(30, 3, 0, 9, 1));

    assert_eq!(round.users[&1].stats.assists, 1);
    assert_eq!(round.users[&2].stats.assists, 0);
    assert_eq!(round.users[&3].stats.kills, 1);
    assert_eq!(round.users[&3].stats.assists, 0);
}

#[test]
fn killer_gets_no_assist_for_own_damage() {
    let mut round = Round::new(0);
    round.add_damage(&damage(10, 3, 0, 9, 1, 90.0));
    round.add_kill(&kill(30, 3, 0, 9, 1));

    assert_eq!(round.users[&3].stats.kills, 1);
    assert_eq!(round.users[&3].stats.assists, 0);
}

#[test]
fn attacker_assist_threshold_uses_attacker_health() {
    let mut round = Round::new(0);
    // victim 9 attacks, max health 150, threshold 45
    round.add_damage(&damage(10, 1, 1, 9, 0, 44.0));
    round.add_damage(&damage(20, 2, 1, 9, 0, 45.0));
    round.add_kill(&kill(30, 3, 1, 9, 0));

    assert_eq!(round.users[&1].stats.assists, 0);
    assert_eq!(round.users[&2].stats.assists, 1);
}

#[test]
fn same_side_damage_is_ignored() {
    let mut round = Round::new(0);
    round.add_damage(&damage(10, 1, 0, 2, 0, 80.0));

    assert_eq!(round.users.len(), 0);
}

#[test]
fn damage_buckets_by_side_and_weapon() {
    let mut round = Round::new(0);
    round.add_damage(&damage(10, 1, 0, 9, 1, 50.0));
    round.add_damage(&damage(20, 1, 0, 9, 1, 25.0));
    round.add_damage(&damage(30, 2, 1, 1, 0, 75.0));

    assert_eq!(round.users[&1].stats.atk_damage_dealt, 75.0);
    assert_eq!(round.users[&1].stats.def_damage_dealt, 0.0);
    // two hits against a 100 health defender
    assert_eq!(round.users[&1].stats.weapon_damage_share[&1], 0.75);

    assert_eq!(round.users[&2].stats.def_damage_dealt, 75.0);
    // one hit against a 150 health attacker
    assert_eq!(round.users[&2].stats.weapon_damage_share[&1], 0.5);
}

#[test]
fn kast_needs_kill_assist_survival_or_trade() {
    let mut round = Round::new(0);
    for entity_id in [1, 2, 3, 4] {
        round.participants.insert(entity_id);
    }
    round.add_kill(&kill(100, 1, 0, 2, 1));
    round.complete();

    assert_eq!(round.users.len(), 4);
    // killer
    assert_eq!(round.users[&1].stats.kast_rounds, 1);
    // died without kill, assist or trade
    assert_eq!(round.users[&2].stats.kast_rounds, 0);
    // survived
    assert_eq!(round.users[&3].stats.kast_rounds, 1);
    assert_eq!(round.users[&4].stats.kast_rounds, 1);
}

#[test]
fn match_totals_are_the_sum_of_round_totals() {
    let mut game = Match::new(1);
    game.round_mut(0).add_damage(&damage(10, 1, 0, 3, 1, 100.0));
    game.round_mut(0).add_kill(&kill(20, 1, 0, 3, 1));
    game.round_mut(0).add_kill(&kill(90, 4, 1, 1, 0));
    game.round_mut(1).add_damage(&damage(400, 3, 1, 2, 0, 60.0));
    game.round_mut(1).add_kill(&kill(450, 2, 0, 4, 1));
    game.complete();

    assert_eq!(game.round_count, 2);

    let mut expected: HashMap<u32, UserStats> = HashMap::new();
    for round in game.rounds.values() {
        for (entity_id, user) in &round.users {
            expected.entry(*entity_id).or_default().add(&user.stats);
        }
    }
    assert_eq!(expected, game.users);
}

#[test]
fn roster_event_updates_team_and_rounds_played() {
    let mut game = Match::new(1);
    game.round_mut(0).add_kill(&kill(20, 1, 0, 3, 1));

    let event = TeamEvent {
        side: 0,
        round_wins: 1,
        round_outcomes: vec![1],
        members: vec![member(1, "Alpha"), member(2, "Bravo")],
    };
    game.add_team(0, &event);

    assert_eq!(game.team1.wins, 1);
    assert_eq!(game.team1.user_names[&1], "Alpha");
    assert_eq!(game.team1.user_names[&2], "Bravo");
    assert_eq!(game.users[&1].atk_rounds_played, 1);
    assert_eq!(game.users[&2].atk_rounds_played, 1);
    assert_eq!(game.users[&1].def_rounds_played, 0);
    assert!(game.rounds[&0].participants.contains(&1));
    assert!(game.rounds[&0].participants.contains(&2));
}

#[test]
fn stale_roster_event_is_ignored() {
    let mut game = Match::new(1);
    game.add_team(
        0,
        &TeamEvent {
            side: 0,
            round_wins: 3,
            round_outcomes: vec![],
            members: vec![member(1, "Alpha")],
        },
    );
    // the end-of-match summary reports zero wins again
    game.add_team(
        0,
        &TeamEvent {
            side: 0,
            round_wins: 0,
            round_outcomes: vec![],
            members: vec![member(1, "Alpha")],
        },
    );

    assert_eq!(game.team1.wins, 3);
    assert_eq!(game.users[&1].atk_rounds_played, 1);
}

#[test]
fn roster_event_for_unknown_team_is_dropped() {
    let mut game = Match::new(1);
    game.add_team(
        7,
        &TeamEvent {
            side: 0,
            round_wins: 1,
            round_outcomes: vec![],
            members: vec![member(1, "Alpha")],
        },
    );

    assert_eq!(game.team1.wins, 0);
    assert_eq!(game.team2.wins, 0);
    assert!(game.users.is_empty());
}

#[test]
fn participants_without_events_exist_after_completion() {
    let mut game = Match::new(1);
    game.round_mut(2).add_kill(&kill(20, 1, 0, 3, 1));
    game.add_team(
        1,
        &TeamEvent {
            side: 1,
            round_wins: 0,
            round_outcomes: vec![],
            members: vec![member(3, "Charlie"), member(4, "Delta")],
        },
    );
    game.complete();

    // 4 never shows up in a kill or damage line but survived the round
    assert_eq!(game.users[&4].kast_rounds, 1);
    assert_eq!(game.users[&4].def_rounds_played, 1);
}
