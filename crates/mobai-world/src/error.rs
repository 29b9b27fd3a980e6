use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("map has no rows")]
    EmptyMap,

    #[error("row {row} is {actual} tiles wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("unknown tile glyph {glyph:?} at row {row}, column {col}")]
    UnknownTile { glyph: char, row: usize, col: usize },

    #[error("tile size must be positive, got ({x}, {y})")]
    InvalidTileSize { x: f32, y: f32 },
}
