use std::thread::sleep;
use std::time::Duration;

use anyhow::Result;
use rand::{rngs::ThreadRng, thread_rng, Rng};

use crate::snake::{Direction, Position, Snake};
use crate::BoardInt;

const INITIAL_SNAKE_LENGTH: usize = 7;
const INITIAL_HEAD: Position = Position { row: 12, col: 15 };
const INITIAL_DIRECTION: Direction = Direction::Down;

const HEAD_CHAR: char = '✴';
const BODY_CHAR: char = '✳';
const FRUIT_CHAR: char = '◆';

const GAME_OVER_PAUSE: Duration = Duration::from_secs(2);

/// Screen size as reported by the renderer. Never cached across ticks so the
/// board tracks a resized terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub height: BoardInt,
    pub width: BoardInt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    Continue,
    FruitEaten,
    Collision,
}

/// Drawing surface for the game. The border ring sits on row/col 0 and the
/// last row/col; everything the session draws stays in the open interior.
pub trait Renderer {
    fn dimensions(&self) -> Result<Dimensions>;
    fn clear_and_draw_border(&mut self, dims: Dimensions) -> Result<()>;
    fn draw_cell(&mut self, pos: Position, glyph: char) -> Result<()>;
    fn show_message(&mut self, text: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

/// Supplies at most one directional key per tick. The poll timeout doubles
/// as the game's pacing clock.
pub trait InputSource {
    fn poll_direction(&mut self, timeout: Duration) -> Result<Option<Direction>>;
}

/// All mutable state of one game, advanced one tick at a time until the
/// snake hits the border or itself.
pub struct GameSession {
    snake: Snake,
    direction: Direction,
    fruit: Position,
    score: u32,
    ate_fruit: bool,
    rng: ThreadRng,
}

impl GameSession {
    pub fn new(dims: Dimensions) -> Self {
        let mut rng = thread_rng();
        let fruit = random_interior(&mut rng, dims);

        GameSession {
            snake: Snake::new(INITIAL_HEAD, INITIAL_SNAKE_LENGTH, INITIAL_DIRECTION),
            direction: INITIAL_DIRECTION,
            fruit,
            score: 0,
            ate_fruit: false,
            rng,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn fruit(&self) -> Position {
        self.fruit
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Runs one tick: resolve the requested direction, move, apply the
    /// growth policy, then check border, self and fruit in that order.
    pub fn advance(&mut self, requested: Option<Direction>, dims: Dimensions) -> TickResult {
        let direction = match requested {
            Some(dir) if !dir.is_opposite(self.direction) => dir,
            _ => self.direction,
        };

        self.snake.push_head(self.snake.head().step(direction));

        // Eating keeps the tail for one tick, growing the snake by one.
        if !self.ate_fruit {
            self.snake.pop_tail();
        }

        if hit_border(self.snake.head(), dims) {
            return TickResult::Collision;
        }
        if self.snake.hit_itself() {
            return TickResult::Collision;
        }

        // The whole body counts: fruit spawned under the snake is collected
        // on the next tick.
        let result = if self.snake.contains(self.fruit) {
            self.score += 1;
            self.ate_fruit = true;
            self.fruit = random_interior(&mut self.rng, dims);
            TickResult::FruitEaten
        } else {
            self.ate_fruit = false;
            TickResult::Continue
        };

        self.direction = direction;
        result
    }
}

fn hit_border(pos: Position, dims: Dimensions) -> bool {
    pos.row <= 0 || pos.row >= dims.height - 1 || pos.col <= 0 || pos.col >= dims.width - 1
}

/// Uniform position in the interior. Snake-occupied cells are not excluded.
fn random_interior(rng: &mut ThreadRng, dims: Dimensions) -> Position {
    Position::new(
        rng.gen_range(1..=dims.height - 2),
        rng.gen_range(1..=dims.width - 2),
    )
}

/// Blocking game loop: render, wait for at most one directional key, advance.
/// Returns the final score once the snake crashes.
pub fn run<R, I>(renderer: &mut R, input: &mut I, tick: Duration) -> Result<u32>
where
    R: Renderer,
    I: InputSource,
{
    let mut session = GameSession::new(renderer.dimensions()?);

    loop {
        let dims = renderer.dimensions()?;

        renderer.clear_and_draw_border(dims)?;
        for (i, segment) in session.snake().segments().enumerate() {
            let glyph = if i == 0 { HEAD_CHAR } else { BODY_CHAR };
            renderer.draw_cell(segment, glyph)?;
        }
        renderer.draw_cell(session.fruit(), FRUIT_CHAR)?;
        renderer.flush()?;

        let requested = input.poll_direction(tick)?;
        match session.advance(requested, dims) {
            TickResult::Collision => break,
            TickResult::FruitEaten => {
                log::debug!("fruit eaten, score is now {}", session.score())
            }
            TickResult::Continue => {}
        }
    }

    let score = session.score();
    renderer.show_message(&format!("You lost! Collected {} fruit!", score))?;
    renderer.flush()?;
    sleep(GAME_OVER_PAUSE);

    Ok(score)
}
