#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays cut'n'align headlessly.
//!
//! A seeded autoplayer picks stones, the world resolves each turn tick by
//! tick, and the board is printed as text.

mod autoplay;
mod render;

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use cut_n_align_core::{Command, Event, GameStep, WAIT_ERASE_TICKS};
use cut_n_align_world::{self as world, query, Config, World};

use crate::autoplay::Autoplayer;

/// Headless cut'n'align runner driven by a seeded autoplayer.
#[derive(Debug, Parser)]
#[command(name = "cut-n-align", version, about)]
struct CliArgs {
    /// Seed for stone generation, jammer placement and the autoplayer.
    #[arg(long, default_value_t = 1, value_name = "SEED")]
    seed: u64,

    /// Stop after this many completed turns.
    #[arg(long, default_value_t = 50, value_name = "N")]
    turns: u32,

    /// Abort once the world has processed this many ticks.
    #[arg(long, default_value_t = 1_000_000, value_name = "N")]
    max_ticks: u64,

    /// Ticks marked stones linger before they are cleared.
    #[arg(long, default_value_t = WAIT_ERASE_TICKS, value_name = "TICKS")]
    erase_wait: u32,

    /// Print the board after every N completed turns.
    #[arg(long, value_name = "N")]
    show_every: Option<u32>,

    /// Only print the final summary line.
    #[arg(long)]
    quiet: bool,
}

/// Entry point for the cut'n'align command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&args, &mut out)?;
    out.flush().context("failed to flush stdout")
}

fn run<W: Write>(args: &CliArgs, out: &mut W) -> Result<()> {
    let mut world = World::new(Config::new(args.seed, args.erase_wait));
    let mut player = Autoplayer::new(args.seed);
    let mut events = Vec::new();
    world::apply(&mut world, Command::Start, &mut events);

    while query::turn(&world) < args.turns && query::step(&world) == GameStep::Move {
        let Some(mut events) = player.play(&mut world) else {
            bail!("no column accepts a pick on turn {}", query::turn(&world));
        };
        resolve_turn(&mut world, args.max_ticks, &mut events)?;
        report(args, &world, &events, out)?;
    }

    if !args.quiet {
        write!(out, "{}", render::board(&world)).context("failed to write board")?;
    }
    writeln!(
        out,
        "seed {} turns {} score {} high score {} ticks {}",
        args.seed,
        query::turn(&world),
        query::score(&world),
        query::high_score(&world),
        query::ticks(&world)
    )
    .context("failed to write summary")
}

fn resolve_turn(world: &mut World, max_ticks: u64, events: &mut Vec<Event>) -> Result<()> {
    loop {
        if query::ticks(world) >= max_ticks {
            bail!(
                "tick limit of {max_ticks} reached on turn {}",
                query::turn(world)
            );
        }
        world::apply(world, Command::Tick, events);
        if matches!(query::step(world), GameStep::Move | GameStep::GameOver) {
            return Ok(());
        }
    }
}

fn report<W: Write>(args: &CliArgs, world: &World, events: &[Event], out: &mut W) -> Result<()> {
    if args.quiet {
        return Ok(());
    }

    for event in events {
        match event {
            Event::CascadeScored {
                sequent, equation, ..
            } => writeln!(
                out,
                "turn {}: chain {sequent} scored {equation}",
                query::turn(world)
            )
            .context("failed to write cascade")?,
            Event::GameOver { score, high_score } => {
                writeln!(out, "game over: score {score}, high score {high_score}")
                    .context("failed to write game over")?;
            }
            _ => {}
        }
    }

    let turn = query::turn(world);
    if let Some(every) = args.show_every.filter(|every| *every > 0) {
        if turn % every == 0 {
            write!(out, "{}", render::board(world)).context("failed to write board")?;
        }
    }
    Ok(())
}
