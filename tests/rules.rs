use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use snake_canvas::surface::Rect;
use snake_canvas::{Cell, Collision, Config, Direction, DrawCall, Game, MemorySurface, TickOutcome};

fn config_20x20() -> Config {
    Config { width: 200, height: 200, ..Config::default() }
}

fn new_game<R: Rng>(rng: R) -> Game<MemorySurface, R> {
    let config = config_20x20();
    let mut game = Game::new(&config, MemorySurface::new(config.width, config.height), rng).unwrap();
    game.init(Instant::now());
    game
}

/// Every random draw is 0.5, so food always lands on (10, 10).
fn centre_rng() -> StepRng {
    StepRng::new(1 << 63, 0)
}

fn canonical_body() -> Vec<Cell> {
    (0..5).rev().map(|x| Cell::new(x, 0)).collect()
}

fn assert_canonical<R: Rng>(game: &Game<MemorySurface, R>) {
    assert_eq!(game.direction(), Direction::Right);
    assert_eq!(game.snake().body(), &canonical_body()[..]);
    assert_eq!(game.score(), 0);
}

#[test]
fn init_builds_canonical_session() {
    let game = new_game(centre_rng());

    assert_canonical(&game);
    assert_eq!(game.grid_size(), (20, 20));
    assert_eq!(game.food(), Cell::new(10, 10));
}

#[test]
fn snake_eats_food_on_sixth_tick() {
    let mut game = new_game(centre_rng());
    game.food_mut().set(Cell::new(10, 0));

    for _ in 0..5 {
        assert_eq!(game.tick().unwrap(), TickOutcome::Moved);
        assert_eq!(game.snake().len(), 5);
    }
    assert_eq!(game.snake().head().unwrap(), Cell::new(9, 0));

    assert_eq!(game.tick().unwrap(), TickOutcome::Ate);
    assert_eq!(game.snake().head().unwrap(), Cell::new(10, 0));
    assert_eq!(game.snake().len(), 6);
    assert_eq!(game.score(), 1);
    assert_eq!(game.food(), Cell::new(10, 10));
}

#[test]
fn steering_up_runs_into_top_wall() {
    let mut game = new_game(centre_rng());

    assert_eq!(game.tick().unwrap(), TickOutcome::Moved);
    assert_eq!(game.snake().head().unwrap(), Cell::new(5, 0));

    assert!(game.key_down(KeyCode::Up));
    assert_eq!(game.direction(), Direction::Up);

    assert_eq!(game.tick().unwrap(), TickOutcome::Restarted(Collision::Wall));
    assert_canonical(&game);
}

#[test]
fn reversing_key_is_ignored() {
    let mut game = new_game(centre_rng());

    assert!(!game.key_down(KeyCode::Left));
    assert_eq!(game.direction(), Direction::Right);

    game.tick().unwrap();
    assert_eq!(game.snake().head().unwrap(), Cell::new(5, 0));
}

#[test]
fn right_wall_restarts_grown_snake() {
    let mut game = new_game(centre_rng());
    game.food_mut().set(Cell::new(5, 0));

    assert_eq!(game.tick().unwrap(), TickOutcome::Ate);
    assert_eq!(game.score(), 1);

    for _ in 5..19 {
        assert_eq!(game.tick().unwrap(), TickOutcome::Moved);
    }
    assert_eq!(game.snake().head().unwrap(), Cell::new(19, 0));
    assert_eq!(game.snake().len(), 6);

    assert_eq!(game.tick().unwrap(), TickOutcome::Restarted(Collision::Wall));
    assert_canonical(&game);
}

#[test]
fn running_into_own_body_restarts() {
    let mut game = new_game(centre_rng());
    game.snake_mut().set_body(vec![
        Cell::new(5, 5),
        Cell::new(5, 4),
        Cell::new(6, 4),
        Cell::new(6, 5),
        Cell::new(6, 6),
    ]);

    assert_eq!(game.tick().unwrap(), TickOutcome::Restarted(Collision::Body));
    assert_canonical(&game);
}

#[test]
fn body_beats_food_on_the_same_cell() {
    let mut game = new_game(centre_rng());
    game.snake_mut().set_body(vec![
        Cell::new(5, 5),
        Cell::new(5, 4),
        Cell::new(6, 4),
        Cell::new(6, 5),
    ]);
    game.food_mut().set(Cell::new(6, 5));

    assert_eq!(game.tick().unwrap(), TickOutcome::Restarted(Collision::Body));
}

#[test]
fn frame_is_cleared_then_drawn_in_order() {
    let mut game = new_game(centre_rng());
    game.tick().unwrap();

    let surface = game.renderer().surface();
    assert_eq!(surface.presented(), 1);

    let calls = surface.calls();
    // clear + fill/stroke per segment + fill/stroke for food + score
    assert_eq!(calls.len(), 1 + 5 * 2 + 2 + 1);
    assert_eq!(calls[0], DrawCall::Clear(Rect::new(0, 0, 200, 200)));
    assert_eq!(calls[1], DrawCall::Fill(Rect::new(50, 0, 10, 10), config_20x20().fill));
    assert_eq!(calls[11], DrawCall::Fill(Rect::new(100, 100, 10, 10), config_20x20().fill));
    assert_eq!(
        calls[13],
        DrawCall::Text { text: "Score: 0".to_string(), x: 5, y: 195 }
    );
}

#[test]
fn interval_drives_ticks_and_init_replaces_it() {
    let config = config_20x20();
    let mut game = Game::new(&config, MemorySurface::new(200, 200), centre_rng()).unwrap();
    let start = Instant::now();

    assert_eq!(game.run_due(start).unwrap(), None);

    game.init(start);
    let first = game.game_loop().get().unwrap().id();
    assert_eq!(game.time_until_tick(start), Some(Duration::from_millis(60)));
    assert_eq!(game.run_due(start).unwrap(), None);
    assert_eq!(game.run_due(start + config.interval).unwrap(), Some(TickOutcome::Moved));

    game.init(start + config.interval);
    let second = game.game_loop().get().unwrap().id();
    assert_ne!(first, second);
    assert_canonical(&game);
}

#[test]
fn random_play_keeps_tick_invariants() {
    let mut game = new_game(StdRng::seed_from_u64(7));
    let mut steering = StdRng::seed_from_u64(11);
    let directions = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
    let (grid_width, grid_height) = game.grid_size();
    let mut seen = [0usize; 3];

    for _ in 0..2000 {
        if steering.gen_bool(0.3) {
            let current = game.direction();
            let wanted = directions[steering.gen_range(0..4)];
            assert_eq!(game.steer(wanted), wanted != current.opposite());
            assert_ne!(game.direction(), current.opposite());
        }

        let direction = game.direction();
        let before_body = game.snake().body().to_vec();
        let before_score = game.score();
        let expected_head = direction.step(before_body[0]);

        match game.tick().unwrap() {
            TickOutcome::Moved => {
                seen[0] += 1;
                assert_eq!(game.snake().len(), before_body.len());
                assert_eq!(game.snake().head().unwrap(), expected_head);
                assert_eq!(game.score(), before_score);
            }
            TickOutcome::Ate => {
                seen[1] += 1;
                assert_eq!(game.snake().len(), before_body.len() + 1);
                assert_eq!(game.snake().head().unwrap(), expected_head);
                assert_eq!(game.score(), before_score + 1);
            }
            TickOutcome::Restarted(collision) => {
                seen[2] += 1;
                let off_grid = !(0..grid_width).contains(&expected_head.x)
                    || !(0..grid_height).contains(&expected_head.y);
                match collision {
                    Collision::Wall => assert!(off_grid),
                    Collision::Body => {
                        assert!(!off_grid);
                        assert!(before_body.contains(&expected_head));
                    }
                }
                assert_canonical(&game);
            }
        }

        let food = game.food();
        assert!((0..grid_width).contains(&food.x) && (0..grid_height).contains(&food.y));
    }

    assert!(seen[0] > 0 && seen[2] > 0, "outcomes seen: {:?}", seen);
}
