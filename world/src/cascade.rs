//! Tick-driven resolution of a placed pick: gravity, run scoring, erase
//! countdown and end-of-turn bookkeeping.

use cut_n_align_core::{Event, GameStep, ScoreEquation};
use cut_n_align_system_gravity::{clear, fall_step};
use log::{debug, info, trace};

use crate::World;

impl World {
    pub(crate) fn tick(&mut self, out_events: &mut Vec<Event>) {
        self.ticks = self.ticks.saturating_add(1);
        match self.step {
            GameStep::Title | GameStep::Move | GameStep::GameOver => {}
            GameStep::Falling => self.fall(out_events),
            GameStep::WaitErase => self.count_down_erase(out_events),
            GameStep::Jammer => self.finish_turn(out_events),
        }
    }

    fn fall(&mut self, out_events: &mut Vec<Event>) {
        if fall_step(&mut self.grid) {
            trace!("gravity moved stones on tick {}", self.ticks);
            return;
        }

        let marked = self.scanner.mark(&mut self.grid);
        if marked == 0 {
            self.transition(GameStep::Jammer, out_events);
            return;
        }

        let erased = u32::try_from(marked).unwrap_or(u32::MAX);
        self.sequent = self.sequent.saturating_add(1);
        self.erase_count = erased;
        let equation = ScoreEquation::for_cascade(self.sequent, erased);
        self.score = self.score.saturating_add(equation.score());
        self.high_score = self.high_score.max(self.score);
        self.score_equation = Some(equation);
        self.wait = self.config.erase_wait_ticks();

        debug!("cascade {} scored {equation}", self.sequent);
        out_events.push(Event::CascadeScored {
            sequent: self.sequent,
            erased,
            equation,
        });
        self.transition(GameStep::WaitErase, out_events);
    }

    fn count_down_erase(&mut self, out_events: &mut Vec<Event>) {
        self.wait = self.wait.saturating_sub(1);
        if self.wait > 0 {
            return;
        }

        let cleared = clear(&mut self.grid);
        if cleared == 0 {
            self.transition(GameStep::Jammer, out_events);
            return;
        }

        out_events.push(Event::StonesCleared {
            count: u32::try_from(cleared).unwrap_or(u32::MAX),
        });
        self.transition(GameStep::Falling, out_events);
    }

    fn finish_turn(&mut self, out_events: &mut Vec<Event>) {
        self.turn = self.turn.saturating_add(1);
        out_events.push(Event::TurnAdvanced { turn: self.turn });

        let cells = self
            .jammers
            .handle(self.turn, &mut self.grid, &mut self.rng);
        if !cells.is_empty() {
            debug!("turn {} injected {} jammers", self.turn, cells.len());
            out_events.push(Event::JammersInjected { cells });
        }

        self.supply.refill(self.turn, &mut self.rng);

        if self.is_full() {
            info!(
                "game over on turn {} with score {} (high score {})",
                self.turn, self.score, self.high_score
            );
            out_events.push(Event::GameOver {
                score: self.score,
                high_score: self.high_score,
            });
            self.transition(GameStep::GameOver, out_events);
            return;
        }

        self.sequent = 0;
        self.pick.reaim(&self.grid);
        self.transition(GameStep::Move, out_events);
    }
}
