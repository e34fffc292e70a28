//! Integration tests for the pool manager: draft-year cutoff and top-X ranking.

use hoops_guess_web::{apply_filter, GameError, PlayerRecord, PoolChange, PoolFilterConfig, PoolManager};

fn player(last: &str, year: Option<i32>, pts: f64, reb: Option<f64>, ast: f64) -> PlayerRecord {
    let p = PlayerRecord::new(format!("First {last}"), last)
        .with_stat("PTS", Some(pts))
        .with_stat("REB", reb)
        .with_stat("AST", Some(ast));
    match year {
        Some(y) => p.with_clue("draftYear", y).with_clue("draftPick", 1),
        None => p.with_clue("draftPick", 1),
    }
}

fn dataset() -> Vec<PlayerRecord> {
    vec![
        player("Old", Some(1984), 30.0, Some(6.0), 5.0),    // 41
        player("Mid", Some(2003), 27.0, Some(7.0), 7.0),    // 41
        player("Late", Some(2014), 21.0, Some(10.0), 7.0),  // 38
        player("Newest", Some(2023), 21.0, None, 4.0),      // 25
        player("Undrafted", None, 15.0, Some(5.0), 2.0),    // 22
        player("Edge", Some(2000), 10.0, Some(2.0), 1.0),   // 13
    ]
}

fn names(pool: &[PlayerRecord]) -> Vec<&str> {
    pool.iter().map(|p| p.last_name.as_str()).collect()
}

#[test]
fn default_filter_keeps_everyone_in_order() {
    let mut pm = PoolManager::new();
    assert_eq!(pm.set_players(dataset()), PoolChange::Reloaded);
    assert_eq!(
        names(pm.active_pool()),
        ["Old", "Mid", "Late", "Newest", "Undrafted", "Edge"]
    );
}

#[test]
fn draft_year_cutoff_excludes_earlier_and_missing() {
    let mut pm = PoolManager::new();
    pm.set_players(dataset());
    let change = pm
        .set_filter(PoolFilterConfig {
            draft_year_cutoff: Some(2000),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(change, PoolChange::Refiltered);
    assert_eq!(names(pm.active_pool()), ["Mid", "Late", "Newest", "Edge"]);
    assert!(pm.active_pool().iter().all(|p| p.draft_year().unwrap() >= 2000));
}

#[test]
fn top_x_sorts_descending_with_stable_ties() {
    let config = PoolFilterConfig {
        top_x_enabled: true,
        top_x: 3,
        ..Default::default()
    };
    let pool = apply_filter(&dataset(), &config);
    // Old and Mid tie at 41: dataset order kept
    assert_eq!(names(&pool), ["Old", "Mid", "Late"]);
}

#[test]
fn top_x_larger_than_pool_keeps_all() {
    let config = PoolFilterConfig {
        top_x_enabled: true,
        top_x: 2000,
        ..Default::default()
    };
    let pool = apply_filter(&dataset(), &config);
    assert_eq!(pool.len(), 6);
    let scores: Vec<f64> = pool.iter().map(|p| p.combined_score()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    // missing REB counted as 0
    assert_eq!(pool[3].last_name, "Newest");
    assert_eq!(pool[3].combined_score(), 25.0);
}

#[test]
fn cutoff_applies_before_top_x() {
    let config = PoolFilterConfig {
        draft_year_cutoff: Some(2010),
        top_x_enabled: true,
        top_x: 1,
    };
    let pool = apply_filter(&dataset(), &config);
    assert_eq!(names(&pool), ["Late"]);
}

#[test]
fn top_x_disabled_ignores_bound() {
    let config = PoolFilterConfig {
        top_x_enabled: false,
        top_x: 1,
        ..Default::default()
    };
    assert_eq!(apply_filter(&dataset(), &config).len(), 6);
}

#[test]
fn same_filter_twice_gives_same_pool() {
    let config = PoolFilterConfig {
        draft_year_cutoff: Some(1980),
        top_x_enabled: true,
        top_x: 4,
    };
    let players = dataset();
    let first = apply_filter(&players, &config);
    let second = apply_filter(&players, &config);
    assert_eq!(first, second);

    let mut pm = PoolManager::new();
    pm.set_players(players.clone());
    pm.set_filter(config.clone()).unwrap();
    let via_manager = pm.active_pool().to_vec();
    pm.set_filter(config).unwrap();
    assert_eq!(pm.active_pool(), via_manager.as_slice());
    assert_eq!(via_manager, first);
    // the full list is untouched by filtering
    assert_eq!(pm.players(), players.as_slice());
}

#[test]
fn cutoff_can_empty_the_pool() {
    let players = vec![player("Old", Some(1984), 30.0, Some(6.0), 5.0)];
    let mut pm = PoolManager::new();
    pm.set_players(players);
    pm.set_filter(PoolFilterConfig {
        draft_year_cutoff: Some(2020),
        ..Default::default()
    })
    .unwrap();
    assert!(pm.active_pool().is_empty());
}

#[test]
fn invalid_filters_are_rejected() {
    let mut pm = PoolManager::new();
    pm.set_players(dataset());
    let err = pm
        .set_filter(PoolFilterConfig {
            draft_year_cutoff: Some(1999),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, GameError::InvalidFilter { .. }));
    assert_eq!(pm.active_pool().len(), 6);
}
