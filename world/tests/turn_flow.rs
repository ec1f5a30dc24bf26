use cut_n_align_core::{
    CellCoord, Command, Event, GameStep, PickRejection, Stone, PICK_MAX,
};
use cut_n_align_world::{self as world, query, query::PickView, Config, World};

const TURN_TICK_LIMIT: usize = 10_000;

fn started(seed: u64) -> World {
    let mut world = World::new(Config::new(seed, 3));
    let mut events = Vec::new();
    world::apply(&mut world, Command::Start, &mut events);
    world
}

fn apply(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    events
}

/// Ticks until the world awaits a move again or the game ended.
fn resolve_turn(world: &mut World) -> Vec<Event> {
    let mut events = Vec::new();
    for _ in 0..TURN_TICK_LIMIT {
        world::apply(world, Command::Tick, &mut events);
        if matches!(query::step(world), GameStep::Move | GameStep::GameOver) {
            return events;
        }
    }
    panic!("turn did not resolve within {TURN_TICK_LIMIT} ticks");
}

#[test]
fn commit_places_front_of_look_ahead_and_resolves_turn() {
    let mut world = started(21);
    let held: Vec<Stone> = query::look_ahead(&world).take(3).copied().collect();
    let untouched: Vec<Stone> = query::look_ahead(&world).skip(3).copied().collect();

    let events = apply(
        &mut world,
        Command::CommitPick {
            column: 2,
            length: 3,
        },
    );

    assert_eq!(
        events,
        vec![
            Event::PickCommitted {
                column: 2,
                bottom_row: 5,
                length: 3
            },
            Event::StepChanged {
                from: GameStep::Move,
                to: GameStep::Falling
            },
        ]
    );
    for (offset, stone) in held.iter().enumerate() {
        let cell = CellCoord::new(2, 5 - offset as i32);
        assert_eq!(query::grid(&world).stone(cell), Some(stone));
    }
    let remaining: Vec<Stone> = query::look_ahead(&world).copied().collect();
    assert_eq!(&remaining[..untouched.len()], untouched.as_slice());

    let events = resolve_turn(&mut world);

    assert!(events.contains(&Event::TurnAdvanced { turn: 1 }));
    assert_eq!(query::step(&world), GameStep::Move);
    assert_eq!(query::turn(&world), 1);
    assert_eq!(query::score(&world), 0, "one batch never repeats a color");
    for (offset, stone) in held.iter().enumerate() {
        let cell = CellCoord::new(2, 14 - offset as i32);
        assert_eq!(query::grid(&world).stone(cell), Some(stone));
    }
    assert!(query::look_ahead(&world).count() >= PICK_MAX);
}

#[test]
fn picks_outside_move_are_rejected_without_side_effects() {
    let mut world = World::new(Config::default());
    let grid = query::grid(&world).clone();
    let look_ahead: Vec<Stone> = query::look_ahead(&world).copied().collect();
    let pick = query::pick(&world);

    let aimed = apply(&mut world, Command::AimPick { column: 2, row: 0 });
    let committed = apply(
        &mut world,
        Command::CommitPick {
            column: 2,
            length: 2,
        },
    );

    assert!(aimed.is_empty());
    assert_eq!(
        committed,
        vec![Event::PickRejected {
            reason: PickRejection::InvalidStep
        }]
    );
    assert_eq!(query::grid(&world), &grid);
    assert_eq!(
        query::look_ahead(&world).copied().collect::<Vec<_>>(),
        look_ahead
    );
    assert_eq!(query::pick(&world), pick);
    assert_eq!(query::step(&world), GameStep::Title);
}

#[test]
fn aim_clamps_column_and_length() {
    let mut world = started(3);

    let events = apply(&mut world, Command::AimPick { column: 9, row: 2 });

    assert!(events.is_empty());
    assert_eq!(
        query::pick(&world),
        PickView {
            column: 6,
            bottom_row: 5,
            length: 4
        }
    );
}

#[test]
fn oversized_commit_is_clamped_to_pick_max() {
    let mut world = started(8);

    let events = apply(
        &mut world,
        Command::CommitPick {
            column: 1,
            length: 40,
        },
    );

    assert_eq!(
        events[0],
        Event::PickCommitted {
            column: 1,
            bottom_row: 5,
            length: PICK_MAX
        }
    );
}

#[test]
fn initialize_keeps_high_score_and_resets_the_game() {
    let mut world = started(0xfeed);
    let mut turn = 0;
    while query::high_score(&world) == 0 {
        assert!(turn < 5_000, "random play never scored");
        if query::step(&world) == GameStep::GameOver {
            let _ = apply(&mut world, Command::Initialize);
            let _ = apply(&mut world, Command::Start);
        }
        let _ = apply(
            &mut world,
            Command::CommitPick {
                column: turn % 6 + 1,
                length: (turn % 3 + 1) as usize,
            },
        );
        let _ = resolve_turn(&mut world);
        turn += 1;
    }
    let high_score = query::high_score(&world);

    let events = apply(&mut world, Command::Initialize);

    assert_eq!(events[0], Event::Initialized);
    assert_eq!(query::step(&world), GameStep::Title);
    assert_eq!(query::high_score(&world), high_score);
    assert_eq!(query::score(&world), 0);
    assert_eq!(query::turn(&world), 0);
    assert_eq!(query::score_equation(&world), None);
    assert_eq!(query::grid(&world), &cut_n_align_core::Grid::new());
    assert_eq!(query::pick(&world).length, 0);
}

#[test]
fn every_cascade_scores_by_the_chain_formula() {
    let mut world = started(77);
    let mut expected_score = 0_u64;
    for turn in 0..200 {
        if query::step(&world) == GameStep::GameOver {
            break;
        }
        let _ = apply(
            &mut world,
            Command::CommitPick {
                column: (turn * 5) % 6 + 1,
                length: (turn % 2 + 1) as usize,
            },
        );
        for event in resolve_turn(&mut world) {
            if let Event::CascadeScored {
                sequent,
                erased,
                equation,
            } = event
            {
                assert!(erased >= 3, "runs hold at least three stones");
                assert_eq!(equation.multiplier(), 1 << sequent);
                assert_eq!(equation.score(), equation.multiplier() * u64::from(erased));
                expected_score += equation.score();
            }
        }
        assert_eq!(query::score(&world), expected_score);
        assert!(query::high_score(&world) >= query::score(&world));
    }
}
