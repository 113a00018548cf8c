use std::{thread::sleep, time::Duration};

use anyhow::Result;
use log::{info, warn};
use rand::Rng;

use crate::input::{last_steer, quit_requested, InputEvent, InputSource};
use crate::render::{Canvas, RenderAdapter};
use crate::snake::{GridSimulation, Heading, Outcome};

const IDLE_TICK_MS: u64 = 100;
const PRE_INPUT_DELAY_MS: u64 = 50;
const POST_UPDATE_DELAY_MS: u64 = 100;

const PROMPT: &str = "Press any key to start, Left/Right to pick a direction, q to quit";

/// Frame pacing. Every tick blocks for these delays.
#[derive(Copy, Clone, Debug)]
pub struct Timing {
    pub idle: Duration,
    pub pre_input: Duration,
    pub post_update: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            idle: Duration::from_millis(IDLE_TICK_MS),
            pre_input: Duration::from_millis(PRE_INPUT_DELAY_MS),
            post_update: Duration::from_millis(POST_UPDATE_DELAY_MS),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ending {
    Died,
    BoardFilled,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    PreGame,
    Active,
    PostGame(Ending),
    Terminated,
}

pub struct SnakeGame<C, I, R> {
    sim: GridSimulation,
    renderer: RenderAdapter<C>,
    input: I,
    rng: R,
    timing: Timing,
    phase: Phase,
}

impl<C: Canvas, I: InputSource, R: Rng> SnakeGame<C, I, R> {
    pub fn new(
        sim: GridSimulation,
        renderer: RenderAdapter<C>,
        input: I,
        rng: R,
        timing: Timing,
    ) -> Self {
        SnakeGame { sim, renderer, input, rng, timing, phase: Phase::PreGame }
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn simulation(&self) -> &GridSimulation {
        &self.sim
    }

    #[cfg(test)]
    pub fn renderer(&self) -> &RenderAdapter<C> {
        &self.renderer
    }

    /// Runs every phase until the player closes the game.
    pub fn run(&mut self) -> Result<()> {
        self.renderer.draw_board(self.sim.grid())?;
        self.renderer.status(PROMPT)?;
        self.renderer.present()?;

        while self.phase != Phase::Terminated {
            self.tick()?;
        }

        Ok(())
    }

    /// Runs one iteration of the current phase and returns the phase that
    /// follows it.
    pub fn tick(&mut self) -> Result<Phase> {
        let next = match self.phase {
            Phase::PreGame => self.tick_pre_game()?,
            Phase::Active => self.tick_active()?,
            Phase::PostGame(_) => self.tick_idle()?,
            Phase::Terminated => Phase::Terminated,
        };

        if next != self.phase {
            info!("phase {:?} -> {:?}", self.phase, next);
            self.phase = next;
        }
        Ok(next)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn tick_pre_game(&mut self) -> Result<Phase> {
        sleep(self.timing.idle);

        let events = self.input.poll_events()?;
        if quit_requested(&events) {
            return Ok(Phase::Terminated);
        }
        if events.is_empty() {
            return Ok(Phase::PreGame);
        }

        // Only a sideways turn can be picked before the start, the snake
        // always begins heading up.
        let sideways = events.iter().rev().find_map(|ev| match ev {
            InputEvent::Steer(heading @ (Heading::Left | Heading::Right)) => Some(*heading),
            _ => None,
        });
        if let Some(heading) = sideways {
            self.sim.set_heading(heading);
        }

        self.start()
    }

    fn start(&mut self) -> Result<Phase> {
        info!("starting heading {:?} from {}", self.sim.heading(), self.sim.head());

        // A food cell seeded before the start is kept.
        let food = match self.sim.food() {
            Some(food) => food,
            None => match self.sim.place_food(&mut self.rng) {
                Ok(food) => food,
                Err(err) => {
                    warn!("cannot start: {}", err);
                    return self.finish(Ending::BoardFilled);
                }
            },
        };

        let grid = self.sim.grid();
        self.renderer.draw_changes(grid, &[food])?;

        self.show_length()?;
        self.renderer.present()?;
        Ok(Phase::Active)
    }

    fn tick_active(&mut self) -> Result<Phase> {
        sleep(self.timing.pre_input);

        let events = self.input.poll_events()?;
        if quit_requested(&events) {
            return Ok(Phase::Terminated);
        }
        if let Some(heading) = last_steer(&events) {
            self.sim.set_heading(heading);
        }

        let outcome = self.sim.step(&mut self.rng);
        self.renderer.draw_changes(self.sim.grid(), &outcome.changed_cells())?;

        let next = match outcome {
            Outcome::Died(death) => {
                info!("snake died ({:?}) at length {}", death, self.sim.len());
                self.finish(Ending::Died)?
            }
            Outcome::Grew { food: None, .. } => {
                info!("board filled at length {}", self.sim.len());
                self.finish(Ending::BoardFilled)?
            }
            Outcome::Grew { .. } => {
                self.show_length()?;
                Phase::Active
            }
            Outcome::Moved { .. } => Phase::Active,
        };

        sleep(self.timing.post_update);
        self.renderer.present()?;
        Ok(next)
    }

    fn tick_idle(&mut self) -> Result<Phase> {
        sleep(self.timing.idle);

        let events = self.input.poll_events()?;
        if quit_requested(&events) {
            return Ok(Phase::Terminated);
        }
        Ok(self.phase)
    }

    fn finish(&mut self, ending: Ending) -> Result<Phase> {
        let headline = match ending {
            Ending::Died => "Game over!",
            Ending::BoardFilled => "Board filled, you won!",
        };
        let len = self.sim.len();
        self.renderer.status(&format!("{}  Length: {}  Press q to quit", headline, len))?;
        self.renderer.present()?;
        Ok(Phase::PostGame(ending))
    }

    fn show_length(&mut self) -> Result<()> {
        self.renderer.status(&format!("Length: {}", self.sim.len()))
    }
}
