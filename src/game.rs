use std::time::{Duration, Instant};

use anyhow::{ensure, Result};
use crossterm::event::KeyCode;
use rand::Rng;
use tracing::{debug, info, trace};

use crate::config::Config;
use crate::direction::{Direction, Heading};
use crate::food::Food;
use crate::game_loop::GameLoop;
use crate::input;
use crate::render::Renderer;
use crate::score::Score;
use crate::snake::Snake;
use crate::surface::Surface;
use crate::{Cell, GridInt};

/// What ended a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The snake advanced one cell without growing.
    Moved,
    /// The snake ate, grew by one segment and scored a point.
    Ate,
    /// The snake crashed and the session was reset. Nothing was drawn.
    Restarted(Collision),
}

/// Owns one game session and the interval that drives it.
pub struct Game<S, R> {
    snake_length: usize,
    interval: Duration,
    heading: Heading,
    snake: Snake,
    food: Food,
    score: Score,
    renderer: Renderer<S>,
    game_loop: GameLoop,
    rng: R,
}

impl<S: Surface, R: Rng> Game<S, R> {
    pub fn new(config: &Config, surface: S, rng: R) -> Result<Self> {
        let renderer = Renderer::new(surface, config.cell_width, config.fill, config.stroke)?;
        let (grid_width, _) = renderer.grid_size();

        ensure!(
            config.snake_length >= 1 && config.snake_length as GridInt <= grid_width,
            "a snake of length {} does not fit on a grid {} cells wide",
            config.snake_length, grid_width
        );

        Ok(Game {
            snake_length: config.snake_length,
            interval: config.interval,
            heading: Heading::new(),
            snake: Snake::default(),
            food: Food::default(),
            score: Score::default(),
            renderer,
            game_loop: GameLoop::new(),
            rng,
        })
    }

    /// Starts a fresh session and (re)installs the tick interval.
    pub fn init(&mut self, now: Instant) {
        self.reset_session();
        let id = self.game_loop.set(self.interval, now);

        let (grid_width, grid_height) = self.grid_size();
        info!(grid_width, grid_height, interval_ms = self.interval.as_millis() as u64, interval_id = id, "game started");
    }

    /// Advances the session by one step: move, resolve collisions, then draw.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        let head = self.snake.head()?;
        let direction = self.heading.get();
        let new_head = direction.step(head);
        trace!(x = new_head.x, y = new_head.y, ?direction, "tick");

        if let Some(collision) = self.collision_at(new_head) {
            debug!(?collision, score = self.score.get(), length = self.snake.len(), "snake crashed, restarting");
            self.reset_session();
            return Ok(TickOutcome::Restarted(collision));
        }

        let outcome = if new_head == self.food.get() {
            let food = self.random_cell();
            self.food.set(food);
            self.score.set(self.score.get() + 1);
            debug!(score = self.score.get(), food_x = food.x, food_y = food.y, "food eaten");
            TickOutcome::Ate
        } else {
            TickOutcome::Moved
        };

        let mut body = Vec::with_capacity(self.snake.len() + 1);
        body.push(new_head);
        body.extend_from_slice(self.snake.body());
        if outcome == TickOutcome::Moved {
            body.pop();
        }
        self.snake.set_body(body);

        self.draw()?;
        Ok(outcome)
    }

    /// Runs a tick if the interval is due at `now`.
    pub fn run_due(&mut self, now: Instant) -> Result<Option<TickOutcome>> {
        if self.game_loop.fire(now) {
            self.tick().map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.game_loop.time_until_tick(now)
    }

    /// Turns the snake unless that would reverse it onto its own neck.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if direction == self.heading.get().opposite() {
            return false;
        }

        self.heading.set(direction);
        true
    }

    /// Key-down handler. Only ever touches the heading.
    pub fn key_down(&mut self, code: KeyCode) -> bool {
        match input::direction_for(code) {
            Some(direction) => self.steer(direction),
            None => false,
        }
    }

    pub fn grid_size(&self) -> (GridInt, GridInt) {
        self.renderer.grid_size()
    }

    pub fn direction(&self) -> Direction {
        self.heading.get()
    }

    pub fn heading_mut(&mut self) -> &mut Heading {
        &mut self.heading
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    pub fn food(&self) -> Cell {
        self.food.get()
    }

    pub fn food_mut(&mut self) -> &mut Food {
        &mut self.food
    }

    pub fn score(&self) -> u32 {
        self.score.get()
    }

    pub fn renderer(&self) -> &Renderer<S> {
        &self.renderer
    }

    pub fn game_loop(&self) -> &GameLoop {
        &self.game_loop
    }

    ///////////////////////////////////////////////////////////////////////////

    fn reset_session(&mut self) {
        self.heading.set(Direction::Right);
        self.snake.initialize(self.snake_length);
        let food = self.random_cell();
        self.food.set(food);
        self.score.set(0);
    }

    // Wall beats body: the order decides what a simultaneous hit counts as.
    fn collision_at(&self, cell: Cell) -> Option<Collision> {
        let (grid_width, grid_height) = self.grid_size();

        if !(0..grid_width).contains(&cell.x) || !(0..grid_height).contains(&cell.y) {
            Some(Collision::Wall)
        } else if self.snake.contains(cell) {
            Some(Collision::Body)
        } else {
            None
        }
    }

    // May land on the snake; nothing retries.
    fn random_cell(&mut self) -> Cell {
        let (grid_width, grid_height) = self.grid_size();
        let x = (self.rng.gen::<f64>() * (grid_width - 1) as f64).round() as GridInt;
        let y = (self.rng.gen::<f64>() * (grid_height - 1) as f64).round() as GridInt;
        Cell::new(x, y)
    }

    fn draw(&mut self) -> Result<()> {
        self.renderer.clear();
        self.renderer.draw_snake(self.snake.body());
        self.renderer.draw_food(self.food.get());
        self.renderer.draw_score(self.score.get());
        self.renderer.present()
    }
}
