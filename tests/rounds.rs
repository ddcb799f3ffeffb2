use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashSet, VecDeque};
use torus_snake::engine::{Engine, Step};
use torus_snake::game::{Game, Lifecycle, Snake};
use torus_snake::grid::Grid;
use torus_snake::input::Input;
use torus_snake::pos::{Dir, Pos};
use torus_snake::rng::RandomSource;

/// Fixed draws first, then always the lowest value.
struct Scripted(VecDeque<usize>);

impl RandomSource for Scripted {
    fn below(&mut self, upper: usize) -> usize {
        self.0.pop_front().unwrap_or(0) % upper
    }
}

fn assert_well_formed(grid: Grid, game: &Game) {
    let body: Vec<Pos> = game.snake().body().collect();
    assert!(!body.is_empty());
    assert!(body.len() <= grid.cell_count());
    assert!(body.iter().all(|&p| grid.contains(p)));

    let distinct: HashSet<Pos> = body.iter().copied().collect();
    assert_eq!(distinct.len(), body.len(), "body overlaps itself: {body:?}");

    for pair in body.windows(2) {
        let adjacent = Dir::ALL.iter().any(|&d| grid.step(pair[0], d) == pair[1]);
        assert!(adjacent, "{:?} -> {:?} is not one step", pair[0], pair[1]);
    }

    if game.lifecycle() == Lifecycle::Running {
        assert!(grid.contains(game.target()));
        assert!(!game.snake().contains(game.target()));
    }
}

/// Hamiltonian cycle on a 4x4 torus: sweep right, drop one row where the sweep ends.
fn cycle_dir(p: Pos) -> Dir {
    if p.x == 3 - p.y { Dir::Down } else { Dir::Right }
}

#[test]
fn following_a_hamiltonian_cycle_wins() {
    let grid = Grid::new(4, 4).unwrap();
    // Start facing right at the origin.
    let mut engine = Engine::new(grid, Scripted(VecDeque::from([1, 0, 0])));
    let mut game = engine.new_game();
    assert_eq!(game.snake().head(), Pos::new(0, 0));
    assert_eq!(game.snake().dir(), Dir::Right);

    let mut grew = 0;
    let mut ticks = 0;
    while game.lifecycle() == Lifecycle::Running {
        assert!(ticks < 1000, "snake never filled the grid");
        let dir = cycle_dir(game.snake().head());
        engine.handle_inputs(&mut game, [Input::Turn(dir)]);
        match engine.tick(&mut game) {
            Step::Grew => grew += 1,
            Step::Moved | Step::Won => {}
            step => panic!("unexpected {step:?}"),
        }
        assert_well_formed(grid, &game);
        ticks += 1;
    }

    assert_eq!(game.lifecycle(), Lifecycle::Won);
    assert_eq!(game.snake().len(), grid.cell_count());
    assert_eq!(grew, grid.cell_count() - 2);
    assert_eq!(engine.tick(&mut game), Step::Idle);

    engine.handle_inputs(&mut game, [Input::Restart]);
    assert_eq!(game.lifecycle(), Lifecycle::Running);
    assert_eq!(game.snake().len(), 1);
}

#[test]
fn random_play_keeps_the_snapshot_consistent() {
    let grid = Grid::new(8, 6).unwrap();
    let mut engine = Engine::seeded(grid, Some(2024));
    let mut driver = SmallRng::seed_from_u64(99);
    let mut game = engine.new_game();
    let mut rounds = 0;

    for _ in 0..10_000 {
        let mut inputs = Vec::new();
        for _ in 0..driver.gen_range(0..3) {
            inputs.push(Input::Turn(Dir::ALL[driver.gen_range(0..4)]));
        }
        if game.lifecycle().round_over() {
            rounds += 1;
            inputs.push(Input::Restart);
        }
        engine.handle_inputs(&mut game, inputs);

        let len = game.snake().len();
        let step = engine.tick(&mut game);
        match step {
            Step::Moved | Step::Collided => assert_eq!(game.snake().len(), len),
            Step::Grew | Step::Won => assert_eq!(game.snake().len(), len + 1),
            Step::Idle => {}
        }
        assert_well_formed(grid, &game);
    }
    assert!(rounds > 0, "random play never ended a round");
}

#[test]
fn restart_replaces_snake_and_target() {
    let mut engine = Engine::seeded(Grid::default(), Some(7));
    let mut moved_target = 0;
    for _ in 0..200 {
        let old_snake = Snake::with_body(
            Dir::Up,
            [Pos::new(5, 7), Pos::new(5, 6), Pos::new(5, 5)],
        )
        .unwrap();
        let old_target = Pos::new(10, 10);
        let mut game = Game::new(Lifecycle::GameOver, old_snake.clone(), old_target);

        assert!(engine.request_restart(&mut game));
        assert_eq!(game.lifecycle(), Lifecycle::Running);
        assert_ne!(game.snake(), &old_snake);
        assert!(!game.snake().contains(game.target()));
        if game.target() != old_target {
            moved_target += 1;
        }
    }
    // 1 in 255 odds of landing on the old cell again per restart.
    assert!(moved_target > 180);
}

#[test]
fn quit_is_final() {
    let mut engine = Engine::seeded(Grid::default(), Some(1));
    let mut game = engine.new_game();
    engine.handle_inputs(&mut game, [Input::Turn(Dir::Up), Input::Quit]);
    assert_eq!(game.lifecycle(), Lifecycle::Stopped);

    let before = game.clone();
    engine.handle_inputs(&mut game, [Input::Restart, Input::Turn(Dir::Left)]);
    assert_eq!(engine.tick(&mut game), Step::Idle);
    assert!(!engine.request_restart(&mut game));
    assert_eq!(game, before);
}
