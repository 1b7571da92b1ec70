//! Tick engine and game phase controller.
//!
//! The caller drives a [`Game`] once per rendered frame: forward input as
//! [`Command`]s, call [`Game::update`] with a monotonic clock, draw from
//! [`Game::grid`], then drain [`Game::drain_events`] into the audio layer.
//! At most one tick runs per update, and only when the scheduler allows it.

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::clock::Scheduler;
use crate::config::{Difficulty, Settings};
use crate::direction::Direction;
use crate::food::{cells_to_fill, place_food};
use crate::grid::{CellId, Contents, Grid};
use crate::mouth::Mouth;
use crate::snake::Snake;
use crate::sprites::{self, Frame, Obstacle};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Phase {
    StartMenu,
    Playing,
    DeathAnimation,
    DeathScreen,
    WinScreen,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    Steer(Direction),
    TogglePause,
    Restart,
    Confirm,
    SelectDifficulty(Difficulty),
}

/// One-shot notifications for the audio layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Event {
    Start,
    SwitchScreen,
    ButtonClick,
    Eat,
    Death(Obstacle),
    Win,
}

pub struct Game {
    settings: Settings,
    grid: Grid,
    snake: Snake,
    mouth: Mouth,
    phase: Phase,
    paused: bool,
    scheduler: Scheduler,
    final_score: usize,
    death: Option<Obstacle>,
    tail_point: Option<Direction>,
    rng: StdRng,
    events: Vec<Event>,
}

impl Game {
    pub fn new(settings: Settings, seed: u64) -> Self {
        let difficulty = settings.difficulty;
        let mut grid = Grid::new(difficulty.interior());
        let snake = Snake::spawn(&mut grid);
        let scheduler = Scheduler::new(
            difficulty.base_interval(),
            settings.speed_per_segment,
            settings.min_interval,
        );
        let mut game = Self {
            settings,
            grid,
            snake,
            mouth: Mouth::Closed,
            phase: Phase::StartMenu,
            paused: false,
            scheduler,
            final_score: 0,
            death: None,
            tail_point: None,
            rng: StdRng::seed_from_u64(seed),
            events: Vec::new(),
        };
        game.reset_board();
        game
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn mouth(&self) -> Mouth {
        self.mouth
    }

    pub fn difficulty(&self) -> Difficulty {
        self.settings.difficulty
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Length of the live snake.
    pub fn score(&self) -> usize {
        self.snake.score()
    }

    /// Score recorded by the last death or win.
    pub fn final_score(&self) -> usize {
        self.final_score
    }

    /// What ended the current run, while the death animation plays.
    pub fn death(&self) -> Option<Obstacle> {
        self.death
    }

    pub fn interval(&self) -> f64 {
        self.scheduler.interval(self.snake.tail_index())
    }

    /// Sprite frame for the time since the last tick. Held past the end
    /// during the death animation so it can be seen to finish.
    pub fn sprite_frame(&self, now: f64) -> usize {
        let hold = self.phase == Phase::DeathAnimation;
        self.scheduler
            .frame(now, self.snake.tail_index(), self.settings.frame_count, hold)
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn handle(&mut self, command: Command, now: f64) {
        match command {
            Command::Steer(dir) => {
                let playing = self.phase == Phase::Playing && !self.paused;
                if playing && !self.snake.steer(dir, &self.grid) {
                    let current = self.snake.head().current;
                    debug!("ignored turn {:?} while heading {:?}", dir, current);
                }
            }
            Command::TogglePause => {
                self.paused = !self.paused;
                self.emit(Event::SwitchScreen);
            }
            Command::Restart => {
                self.emit(Event::SwitchScreen);
                self.reset_board();
                self.set_phase(Phase::StartMenu);
            }
            Command::Confirm => {
                match self.phase {
                    Phase::StartMenu => {
                        self.emit(Event::Start);
                        self.scheduler.restart(now);
                        self.set_phase(Phase::Playing);
                    }
                    Phase::WinScreen | Phase::DeathScreen => {
                        self.emit(Event::SwitchScreen);
                        self.set_phase(Phase::StartMenu);
                    }
                    Phase::Playing | Phase::DeathAnimation => {}
                }
                self.paused = false;
            }
            Command::SelectDifficulty(difficulty) => {
                if self.phase == Phase::StartMenu {
                    self.emit(Event::ButtonClick);
                    self.set_difficulty(difficulty);
                }
            }
        }
    }

    /// Applies a difficulty and lays out a fresh board for it.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        debug!("difficulty set to {}", difficulty.label());
        self.settings.difficulty = difficulty;
        self.scheduler.set_base_interval(difficulty.base_interval());
        self.reset_board();
    }

    /// Per-frame entry point.
    pub fn update(&mut self, now: f64) {
        self.scheduler.track_pause(self.paused, now);
        match self.phase {
            Phase::Playing if !self.paused => {
                self.tick(now);
            }
            Phase::DeathAnimation => {
                if self.sprite_frame(now) >= self.settings.frame_count {
                    self.reset_board();
                    self.set_phase(Phase::DeathScreen);
                }
            }
            _ => {}
        }
    }

    /// Runs one move if the scheduler allows it; returns whether it did.
    /// A refused tick leaves every piece of state untouched.
    pub fn tick(&mut self, now: f64) -> bool {
        if self.phase != Phase::Playing
            || self.paused
            || !self.scheduler.due(now, self.snake.tail_index())
        {
            return false;
        }

        self.mouth = self.mouth.decay();
        self.snake.commit_turn();

        // Checked before the shift so the obstacle cell is never drawn as snake.
        let hit = match self.snake.virtual_head() {
            Some(target) => self.collision(target),
            None => Some(Obstacle::Wall),
        };

        if let Some(vacated) = self.snake.shift() {
            let cell = self.grid.cell_mut(vacated);
            self.tail_point = cell.leaving_dir;
            cell.contents = Contents::Empty;
            cell.clear_sprites();
        }

        if let Some(obstacle) = hit {
            self.snake.clear_front();
            self.die(obstacle);
            self.refresh();
            self.scheduler.mark_tick(now);
            return true;
        }

        let front = self.snake.front();
        let ate = front.is_some_and(|id| self.grid.cell(id).contents == Contents::Food);
        if ate {
            self.emit(Event::Eat);
            self.snake.grow();
            debug!("ate food, length {}", self.snake.score());
            if cells_to_fill(&self.grid, &self.snake) == 0 {
                self.win();
                self.scheduler.mark_tick(now);
                return true;
            }
            place_food(&mut self.grid, &self.snake, &mut self.rng);
        }

        let near = front.is_some_and(|id| self.grid.next_to_food(self.grid.cell(id).position));
        self.mouth = self.mouth.after_move(ate, near);

        self.snake.retarget(&self.grid);
        self.refresh();
        self.scheduler.mark_tick(now);
        true
    }

    fn collision(&self, target: CellId) -> Option<Obstacle> {
        let obstacle = match self.grid.cell(target).contents {
            Contents::Wall => Obstacle::Wall,
            Contents::Body => Obstacle::Body,
            Contents::Empty | Contents::Food => return None,
        };
        if self.snake.is_vacating(target) {
            return None;
        }
        Some(obstacle)
    }

    fn die(&mut self, obstacle: Obstacle) {
        self.final_score = self.snake.score();
        self.death = Some(obstacle);
        info!("snake hit {:?} with score {}", obstacle, self.final_score);
        self.emit(Event::Death(obstacle));
        self.set_phase(Phase::DeathAnimation);
    }

    fn win(&mut self) {
        self.final_score = self.snake.score();
        info!("board filled on {}", self.settings.difficulty.label());
        self.emit(Event::Win);
        self.reset_board();
        self.set_phase(Phase::WinScreen);
    }

    fn reset_board(&mut self) {
        self.grid = Grid::new(self.settings.difficulty.interior());
        self.snake = Snake::spawn(&mut self.grid);
        self.mouth = Mouth::Closed;
        self.death = None;
        self.tail_point = None;
        place_food(&mut self.grid, &self.snake, &mut self.rng);
        self.refresh();
    }

    fn refresh(&mut self) {
        let frame = Frame {
            mouth: self.mouth,
            death: self.death,
            tail_point: self.tail_point,
        };
        sprites::derive(&mut self.grid, &self.snake, frame);
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            info!("phase {:?} -> {:?}", self.phase, phase);
        }
        self.phase = phase;
    }

    fn emit(&mut self, event: Event) {
        debug!("event {:?}", event);
        self.events.push(event);
    }
}
