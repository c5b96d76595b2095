use std::collections::VecDeque;

use crate::BoardInt;
use Direction::*;

/// A board coordinate. Values are signed so a head can step past the border
/// for the single tick in which the collision is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub row: BoardInt,
    pub col: BoardInt,
}

impl Position {
    pub fn new(row: BoardInt, col: BoardInt) -> Self {
        Position { row, col }
    }

    /// The position one unit step away in the given direction.
    pub fn step(self, direction: Direction) -> Position {
        let (d_row, d_col) = direction.offset();
        Position::new(self.row + d_row, self.col + d_col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// True if going from `self` to `other` would be a full reversal.
    pub fn is_opposite(self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Up, Down) | (Down, Up) | (Left, Right) | (Right, Left)
        )
    }

    pub fn offset(self) -> (BoardInt, BoardInt) {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }
}

/// The snake's body, head first. Never shorter than one segment.
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Seeds a straight snake of `length` segments with its head at `head`,
    /// trailing away opposite to `heading`.
    pub fn new(head: Position, length: usize, heading: Direction) -> Self {
        let (d_row, d_col) = heading.offset();
        let body = (0..length as BoardInt)
            .map(|i| Position::new(head.row - d_row * i, head.col - d_col * i))
            .collect();
        Snake { body }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub fn push_head(&mut self, head: Position) {
        self.body.push_front(head);
    }

    pub fn pop_tail(&mut self) -> Option<Position> {
        self.body.pop_back()
    }

    /// True if the head overlaps any other segment.
    pub fn hit_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&segment| segment == head)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_is_pure() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.step(Up), Position::new(4, 5));
        assert_eq!(pos.step(Down), Position::new(6, 5));
        assert_eq!(pos.step(Left), Position::new(5, 4));
        assert_eq!(pos.step(Right), Position::new(5, 6));
        assert_eq!(pos, Position::new(5, 5));
    }

    #[test]
    fn opposite_directions() {
        assert!(Up.is_opposite(Down));
        assert!(Down.is_opposite(Up));
        assert!(Left.is_opposite(Right));
        assert!(Right.is_opposite(Left));

        assert!(!Up.is_opposite(Left));
        assert!(!Down.is_opposite(Right));
        assert!(!Left.is_opposite(Left));
    }

    #[test]
    fn seeds_a_straight_body_head_first() {
        let snake = Snake::new(Position::new(12, 15), 7, Down);
        let body: Vec<Position> = snake.segments().collect();

        assert_eq!(snake.len(), 7);
        assert_eq!(snake.head(), Position::new(12, 15));
        for (i, segment) in body.iter().enumerate() {
            assert_eq!(*segment, Position::new(12 - i as BoardInt, 15));
        }
    }

    #[test]
    fn moves_by_pushing_head_and_popping_tail() {
        let mut snake = Snake::new(Position::new(5, 5), 3, Right);

        snake.push_head(snake.head().step(Right));
        assert_eq!(snake.pop_tail(), Some(Position::new(5, 3)));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 6));
    }

    #[test]
    fn self_hit_excludes_the_head() {
        let snake = Snake::new(Position::new(5, 5), 3, Right);
        assert!(!snake.hit_itself());

        // Fold the head back onto the second segment.
        let mut folded = Snake::new(Position::new(5, 5), 3, Right);
        folded.push_head(Position::new(5, 4));
        assert!(folded.hit_itself());
    }

    #[test]
    fn containment_covers_the_whole_body() {
        let snake = Snake::new(Position::new(5, 5), 3, Right);
        assert!(snake.contains(Position::new(5, 5)));
        assert!(snake.contains(Position::new(5, 3)));
        assert!(!snake.contains(Position::new(6, 5)));
    }
}
