//! Obstacle log

use crate::core::types::Position;

/// Append-only record of cells the front sensor reported as blocked.
///
/// Order is detection order. The same cell may appear more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObstacleLog {
    entries: Vec<Position>,
}

impl ObstacleLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a blocked cell
    pub fn append(&mut self, cell: Position) {
        self.entries.push(cell);
    }

    /// All recorded cells in detection order
    pub fn snapshot(&self) -> &[Position] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
