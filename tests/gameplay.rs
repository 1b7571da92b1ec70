use snake_turns::{
    Command, Contents, Difficulty, Direction, Event, Game, Obstacle, Phase, Position, Settings,
};

fn food(game: &Game) -> Option<Position> {
    game.grid()
        .cells()
        .find(|cell| cell.contents == Contents::Food)
        .map(|cell| cell.position)
}

fn front(game: &Game) -> Position {
    game.snake().head().front
}

/// First seed whose opening food placement satisfies `keep`.
fn game_where(difficulty: Difficulty, keep: impl Fn(Position) -> bool) -> Game {
    let settings = Settings {
        difficulty,
        ..Settings::default()
    };
    (0..10_000)
        .map(|seed| Game::new(settings.clone(), seed))
        .find(|game| food(game).is_some_and(&keep))
        .expect("some seed places food as requested")
}

fn start(game: &mut Game) {
    game.handle(Command::Confirm, 0.0);
    assert_eq!(game.phase(), Phase::Playing);
}

#[test]
fn confirm_starts_the_game() {
    let mut game = Game::new(Settings::default(), 1);
    assert_eq!(game.phase(), Phase::StartMenu);

    game.handle(Command::Confirm, 0.0);
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.drain_events(), vec![Event::Start]);
    assert!(game.drain_events().is_empty());
}

#[test]
fn first_tick_moves_the_snake_one_cell_left() {
    let mut game = game_where(Difficulty::Easy, |pos| pos != Position::new(3, 4));
    start(&mut game);

    // Not due yet.
    game.update(0.1);
    assert_eq!(front(&game), Position::new(4, 4));

    game.update(0.5);
    assert_eq!(front(&game), Position::new(3, 4));
    assert_eq!(game.grid().cell_at(Position::new(3, 4)).unwrap().contents, Contents::Body);
    assert_eq!(game.grid().cell_at(Position::new(6, 4)).unwrap().contents, Contents::Empty);
    assert_eq!(game.grid().count(Contents::Body), 3);
    assert_eq!(game.score(), 2);
}

#[test]
fn turn_is_checked_against_the_pending_one() {
    let mut game = game_where(Difficulty::Easy, |pos| pos.x != 4);
    start(&mut game);

    game.handle(Command::Steer(Direction::Down), 0.0);
    game.handle(Command::Steer(Direction::Up), 0.0);
    game.update(0.5);

    assert_eq!(game.snake().head().current, Direction::Down);
    assert_eq!(front(&game), Position::new(4, 5));

    game.update(1.0);
    assert_eq!(front(&game), Position::new(4, 6));
}

#[test]
fn steering_is_ignored_outside_play() {
    let mut game = game_where(Difficulty::Easy, |pos| pos != Position::new(3, 4));
    game.handle(Command::Steer(Direction::Up), 0.0);
    start(&mut game);
    game.update(0.5);
    assert_eq!(front(&game), Position::new(3, 4));
}

#[test]
fn running_into_the_wall_ends_the_run() {
    // Medium spawns with the front at (5,5); the wall is five moves away.
    let mut game = game_where(Difficulty::Medium, |pos| pos.y != 5);
    start(&mut game);
    game.drain_events();

    let mut now = 0.0;
    for _ in 0..4 {
        now += 0.25;
        game.update(now);
        assert_eq!(game.phase(), Phase::Playing);
    }
    assert_eq!(front(&game), Position::new(1, 5));

    now += 0.25;
    game.update(now);
    assert_eq!(game.phase(), Phase::DeathAnimation);
    assert_eq!(game.death(), Some(Obstacle::Wall));
    assert_eq!(game.final_score(), 2);
    assert_eq!(game.drain_events(), vec![Event::Death(Obstacle::Wall)]);

    // The animation plays for one interval before the death screen.
    game.update(now + 0.05);
    assert_eq!(game.phase(), Phase::DeathAnimation);
    game.update(now + 0.25);
    assert_eq!(game.phase(), Phase::DeathScreen);
    assert_eq!(game.death(), None);
    assert_eq!(front(&game), Position::new(5, 5));

    game.handle(Command::Confirm, now + 1.0);
    assert_eq!(game.phase(), Phase::StartMenu);
    assert_eq!(game.drain_events(), vec![Event::SwitchScreen]);
    assert_eq!(game.final_score(), 2);
}

#[test]
fn difficulty_changes_only_from_the_start_menu() {
    let mut game = Game::new(Settings::default(), 3);
    assert_eq!(game.grid().side(), 10);

    game.handle(Command::SelectDifficulty(Difficulty::Hard), 0.0);
    assert_eq!(game.difficulty(), Difficulty::Hard);
    assert_eq!(game.grid().side(), 14);
    assert_eq!(game.drain_events(), vec![Event::ButtonClick]);
    assert_eq!(front(&game), Position::new(7, 7));
    assert_eq!(game.grid().count(Contents::Food), 1);

    start(&mut game);
    game.drain_events();
    game.handle(Command::SelectDifficulty(Difficulty::Easy), 0.0);
    assert_eq!(game.difficulty(), Difficulty::Hard);
    assert!(game.drain_events().is_empty());
}

#[test]
fn eating_grows_the_score_and_restart_resets_it() {
    // Food never opens on the virtual head, so turn up into it instead.
    let mut game = game_where(Difficulty::Easy, |pos| pos == Position::new(4, 3));
    start(&mut game);
    game.drain_events();

    game.handle(Command::Steer(Direction::Up), 0.0);
    game.update(0.5);
    assert_eq!(front(&game), Position::new(4, 3));
    assert_eq!(game.drain_events(), vec![Event::Eat]);
    assert_eq!(game.score(), 3);
    assert_eq!(game.grid().count(Contents::Food), 1);
    assert_ne!(food(&game), Some(Position::new(4, 3)));
    assert!(game.interval() < Difficulty::Easy.base_interval() - 0.002);

    game.handle(Command::Restart, 0.6);
    assert_eq!(game.phase(), Phase::StartMenu);
    assert_eq!(game.score(), 2);
    assert_eq!(front(&game), Position::new(4, 4));
    assert_eq!(game.drain_events(), vec![Event::SwitchScreen]);
}

#[test]
fn pausing_freezes_ticks_and_resume_does_not_burst() {
    let mut game = game_where(Difficulty::Easy, |pos| pos.y != 4);
    start(&mut game);

    game.handle(Command::TogglePause, 0.1);
    assert!(game.is_paused());
    assert_eq!(game.drain_events(), vec![Event::Start, Event::SwitchScreen]);
    game.update(0.1);
    game.update(5.0);
    assert_eq!(front(&game), Position::new(4, 4));

    game.handle(Command::TogglePause, 5.0);
    game.update(5.0);
    assert_eq!(front(&game), Position::new(4, 4));

    // 0.1s ran before the pause, so the move comes due near 5.2.
    game.update(5.25);
    assert_eq!(front(&game), Position::new(3, 4));
    game.update(5.3);
    assert_eq!(front(&game), Position::new(3, 4));
}

#[test]
fn animation_frame_holds_while_paused() {
    let mut game = Game::new(Settings::default(), 5);
    start(&mut game);

    game.handle(Command::TogglePause, 0.09);
    game.update(0.09);
    let at_pause = game.sprite_frame(0.09);
    assert_eq!(at_pause, 2);

    game.update(0.15);
    assert_eq!(game.sprite_frame(0.15), at_pause);
    game.update(3.0);
    assert_eq!(game.sprite_frame(3.0), at_pause);
}
