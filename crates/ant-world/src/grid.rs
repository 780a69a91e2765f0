//! 2D cell field for the ant.

use ant_core::{Cell, Error, FieldConfig, Position, Result};
use serde::{Deserialize, Serialize};

/// A fixed-size toroidal grid of binary cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    columns: i32,
    rows: i32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(columns: i32, rows: i32) -> Result<Self> {
        if columns <= 0 || rows <= 0 {
            return Err(Error::InvalidDimension { columns, rows });
        }
        let size = columns as usize * rows as usize;
        Ok(Self {
            columns,
            rows,
            cells: vec![Cell::Unmarked; size],
        })
    }

    /// Create a grid from field geometry
    pub fn from_config(config: &FieldConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.columns(), config.rows())
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether a position lies inside the field without wrapping
    pub fn contains(&self, pos: Position) -> bool {
        (0..self.columns).contains(&pos.x) && (0..self.rows).contains(&pos.y)
    }

    pub fn wrap(&self, pos: Position) -> Position {
        pos.wrap(self.columns, self.rows)
    }

    /// Get cell at position (with toroidal wrapping)
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[self.pos_to_index(pos)]
    }

    /// Set cell at position; returns whether the state changed
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        let index = self.pos_to_index(pos);
        let changed = self.cells[index] != cell;
        self.cells[index] = cell;
        changed
    }

    /// Flip cell at position and return its new state
    pub fn flip(&mut self, pos: Position) -> Cell {
        let index = self.pos_to_index(pos);
        let flipped = self.cells[index].flipped();
        self.cells[index] = flipped;
        flipped
    }

    /// Set every cell to `Unmarked`
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Unmarked);
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        let wrapped = self.wrap(pos);
        wrapped.y as usize * self.columns as usize + wrapped.x as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let x = (index as i32) % self.columns;
        let y = (index as i32) / self.columns;
        Position::new(x, y)
    }

    /// Iterator over all cells with positions, row by row
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (self.index_to_pos(i), cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(6, 4).unwrap();
        assert_eq!(grid.columns(), 6);
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.len(), 24);
        assert_eq!(grid.count(Cell::Unmarked), 24);
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        assert!(matches!(
            Grid::new(0, 4),
            Err(Error::InvalidDimension { columns: 0, rows: 4 })
        ));
        assert!(matches!(
            Grid::new(4, -2),
            Err(Error::InvalidDimension { columns: 4, rows: -2 })
        ));
    }

    #[test]
    fn test_grid_from_config() {
        let config = FieldConfig {
            field_width: 80,
            field_height: 48,
            cell_size: 8,
        };
        let grid = Grid::from_config(&config).unwrap();
        assert_eq!(grid.columns(), 10);
        assert_eq!(grid.rows(), 6);

        let bad = FieldConfig {
            cell_size: 0,
            ..config
        };
        assert!(Grid::from_config(&bad).is_err());
    }

    #[test]
    fn test_set_get_and_flip() {
        let mut grid = Grid::new(5, 5).unwrap();
        let pos = Position::new(3, 1);

        assert!(grid.set(pos, Cell::Marked));
        assert!(!grid.set(pos, Cell::Marked));
        assert_eq!(grid.get(pos), Cell::Marked);

        assert_eq!(grid.flip(pos), Cell::Unmarked);
        assert_eq!(grid.flip(pos), Cell::Marked);
        assert_eq!(grid.count(Cell::Marked), 1);
    }

    #[test]
    fn test_toroidal_wrapping() {
        let mut grid = Grid::new(5, 4).unwrap();
        grid.set(Position::new(4, 3), Cell::Marked);

        // (-1, -1) wraps to (4, 3)
        assert_eq!(grid.get(Position::new(-1, -1)), Cell::Marked);
        // (5, 4) wraps to (0, 0)
        assert_eq!(grid.get(Position::new(5, 4)), Cell::Unmarked);
        assert!(!grid.contains(Position::new(5, 0)));
        assert!(grid.contains(Position::new(4, 3)));
    }

    #[test]
    fn test_clear() {
        let mut grid = Grid::new(3, 3).unwrap();
        for pos in [Position::new(0, 0), Position::new(1, 2), Position::new(2, 2)] {
            grid.set(pos, Cell::Marked);
        }
        grid.clear();
        assert_eq!(grid.count(Cell::Marked), 0);
    }

    #[test]
    fn test_iter_is_row_major() {
        let grid = Grid::new(3, 2).unwrap();
        let positions: Vec<Position> = grid.iter().map(|(pos, _)| pos).collect();
        assert_eq!(positions[0], Position::new(0, 0));
        assert_eq!(positions[2], Position::new(2, 0));
        assert_eq!(positions[3], Position::new(0, 1));
        assert_eq!(positions.len(), 6);
    }
}
