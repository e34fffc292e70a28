//! Integration tests for the game session: data loading and filter changes during play.

use hoops_guess_web::{
    parse_players, Game, GameError, LoadStatus, Outcome, PlayerRecord, PoolFilterConfig,
};

fn player(last: &str, year: i32, pts: f64) -> PlayerRecord {
    PlayerRecord::new(format!("First {last}"), last)
        .with_stat("PTS", Some(pts))
        .with_stat("REB", Some(1.0))
        .with_stat("AST", Some(1.0))
        .with_clue("draftYear", year)
        .with_clue("draftPick", 1)
        .with_clue("draftTeam", "XXX")
        .with_clue("college", "None")
}

fn target_name(game: &Game) -> String {
    game.round().target.as_ref().unwrap().last_name.clone()
}

#[test]
fn round_operations_wait_for_data() {
    let mut game = Game::seeded(1);
    assert_eq!(game.status(), &LoadStatus::Loading);
    assert_eq!(game.next_round(), Err(GameError::NoDataAvailable));
    assert_eq!(game.restart(), Err(GameError::NoDataAvailable));
    assert_eq!(game.submit_guess("anything"), Outcome::Pending);
    assert!(!game.reveal_clue());
    assert_eq!(game.round().rounds_played, 0);
    assert!(game.round().target.is_none());
}

#[test]
fn failed_load_reports_no_data() {
    let mut game = Game::seeded(1);
    game.load_failed("404 Not Found");
    assert_eq!(game.status(), &LoadStatus::Failed("404 Not Found".to_string()));
    assert_eq!(game.next_round(), Err(GameError::NoDataAvailable));
}

#[test]
fn empty_dataset_reports_no_data() {
    let mut game = Game::seeded(1);
    assert_eq!(game.load_players(Vec::new()), Err(GameError::NoDataAvailable));
    assert_eq!(game.status(), &LoadStatus::Empty);
    assert_eq!(game.next_round(), Err(GameError::NoDataAvailable));
}

#[test]
fn load_draws_first_target() {
    let mut game = Game::seeded(2);
    game.load_players(vec![player("Jordan", 1984, 30.0)]).unwrap();
    assert_eq!(game.status(), &LoadStatus::Ready);
    assert_eq!(target_name(&game), "Jordan");
    assert_eq!(game.submit_guess("JORDAN"), Outcome::Won { points_awarded: 10 });
}

#[test]
fn filters_set_before_load_apply_on_arrival() {
    let mut game = Game::seeded(2);
    game.set_filter(PoolFilterConfig {
        draft_year_cutoff: Some(2000),
        ..Default::default()
    })
    .unwrap();
    game.load_players(vec![player("Old", 1990, 30.0), player("New", 2005, 10.0)])
        .unwrap();
    assert_eq!(game.pool().active_pool().len(), 1);
    assert_eq!(target_name(&game), "New");
}

#[test]
fn filter_leaving_no_players_is_distinct_from_no_data() {
    let mut game = Game::seeded(3);
    game.load_players(vec![player("Old", 1990, 30.0)]).unwrap();

    let err = game
        .set_filter(PoolFilterConfig {
            draft_year_cutoff: Some(2020),
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(err, GameError::EmptyPool);
    assert!(game.round().target.is_none());
    assert_eq!(game.next_round(), Err(GameError::EmptyPool));

    // relaxing the filter brings a target back
    game.set_filter(PoolFilterConfig::default()).unwrap();
    assert_eq!(target_name(&game), "Old");
}

#[test]
fn filter_change_replaces_target_that_left_the_pool() {
    let mut game = Game::seeded(4);
    game.load_players(vec![player("Old", 1990, 30.0), player("New", 2005, 10.0)])
        .unwrap();
    // force the old player as target
    while target_name(&game) != "Old" {
        game.next_round().unwrap();
    }
    game.reveal_clue();
    let rounds_before = game.round().rounds_played;

    game.set_filter(PoolFilterConfig {
        draft_year_cutoff: Some(2000),
        ..Default::default()
    })
    .unwrap();

    // in-progress round abandoned: fresh round, nothing recorded
    assert_eq!(target_name(&game), "New");
    assert_eq!(game.round().clue_index, 0);
    assert_eq!(game.round().outcome, Outcome::Pending);
    assert_eq!(game.round().rounds_played, rounds_before);
}

#[test]
fn filter_change_keeps_target_still_in_pool() {
    let mut game = Game::seeded(5);
    game.load_players(vec![player("Old", 1990, 30.0), player("New", 2005, 10.0)])
        .unwrap();
    while target_name(&game) != "New" {
        game.next_round().unwrap();
    }
    game.reveal_clue();

    game.set_filter(PoolFilterConfig {
        draft_year_cutoff: Some(2000),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(target_name(&game), "New");
    assert_eq!(game.round().clue_index, 1);
}

#[test]
fn reload_always_redraws_and_keeps_totals() {
    let mut game = Game::seeded(6);
    game.load_players(vec![player("Jordan", 1984, 30.0)]).unwrap();
    game.reveal_clue();
    game.submit_guess("jordan");
    assert_eq!(game.round().total_points, 5);

    game.load_players(vec![player("Jordan", 1984, 30.0)]).unwrap();
    assert_eq!(game.round().outcome, Outcome::Pending);
    assert_eq!(game.round().clue_index, 0);
    assert_eq!(game.round().total_points, 5);
    assert_eq!(game.round().rounds_played, 1);
}

#[test]
fn malformed_records_from_file_never_become_targets() {
    let json = r#"[
        {"name": "No Last Name", "stats": {"PTS": 50}},
        {"name": "No Stats", "lastName": "Stats"},
        {"name": "Tim Duncan", "lastName": "Duncan", "stats": {"PTS": 19.0}, "clues": {"draftYear": 1997}}
    ]"#;
    let players = parse_players(json).unwrap();
    assert_eq!(players.len(), 3);

    let mut game = Game::seeded(7);
    game.load_players(players).unwrap();
    assert_eq!(game.pool().active_pool().len(), 1);
    for _ in 0..10 {
        game.next_round().unwrap();
        assert_eq!(target_name(&game), "Duncan");
    }
}

#[test]
fn restart_clears_session_totals() {
    let mut game = Game::seeded(8);
    game.load_players(vec![player("Jordan", 1984, 30.0)]).unwrap();
    game.submit_guess("jordan");
    game.restart().unwrap();
    assert_eq!(game.round().total_points, 0);
    assert_eq!(game.round().rounds_played, 0);
    assert_eq!(game.average_score().to_string(), "-");
}

#[test]
fn empty_reload_drops_previous_target() {
    let mut game = Game::seeded(9);
    game.load_players(vec![player("Jordan", 1984, 30.0)]).unwrap();
    game.reveal_clue();

    assert_eq!(game.load_players(Vec::new()), Err(GameError::NoDataAvailable));

    assert_eq!(game.status(), &LoadStatus::Empty);
    assert!(game.round().target.is_none());
    assert!(game.view().target.is_none());
    assert_eq!(game.submit_guess("jordan"), Outcome::Pending);
    assert!(!game.reveal_clue());
    assert_eq!(game.round().rounds_played, 0);
    assert_eq!(game.round().total_points, 0);
    assert_eq!(game.next_round(), Err(GameError::NoDataAvailable));
}

#[test]
fn failed_reload_drops_previous_target_and_keeps_totals() {
    let mut game = Game::seeded(10);
    game.load_players(vec![player("Jordan", 1984, 30.0)]).unwrap();
    game.submit_guess("jordan");
    game.next_round().unwrap();

    game.load_failed("connection reset");

    assert!(game.round().target.is_none());
    assert!(game.pool().active_pool().is_empty());
    assert_eq!(game.submit_guess("jordan"), Outcome::Pending);
    assert!(!game.reveal_clue());
    assert_eq!(game.round().total_points, 10);
    assert_eq!(game.round().rounds_played, 1);

    // a good load afterwards brings play back
    game.load_players(vec![player("Jordan", 1984, 30.0)]).unwrap();
    assert_eq!(game.submit_guess("jordan"), Outcome::Won { points_awarded: 10 });
    assert_eq!(game.round().total_points, 20);
}
