//! Block grid and mask overlay
//!
//! The grid owns every destructible block, laid out over the brick band of
//! the arena. Cell positions derive from `(row, column)` once at layout
//! time and never drift afterwards - the collision scan relies on that.
//!
//! The mask overlay reuses the grid's footprint to light up cells as block
//! letters on the title and end screens. It is presentation-only state and
//! mutually exclusive with gameplay rendering.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Block material kinds, ordered by remaining durability.
///
/// A hit downgrades the kind one step toward `None`; `None` is destroyed,
/// neither drawn nor collidable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlockKind {
    #[default]
    None,
    Crate,
    Sand,
    Stone,
}

impl BlockKind {
    /// Table index for render style lookup
    #[inline]
    pub fn index(self) -> usize {
        match self {
            BlockKind::None => 0,
            BlockKind::Crate => 1,
            BlockKind::Sand => 2,
            BlockKind::Stone => 3,
        }
    }

    /// One step toward `None`; `None` stays `None`
    pub fn downgraded(self) -> Self {
        match self {
            BlockKind::Stone => BlockKind::Sand,
            BlockKind::Sand => BlockKind::Crate,
            BlockKind::Crate => BlockKind::None,
            BlockKind::None => BlockKind::None,
        }
    }

    #[inline]
    pub fn is_live(self) -> bool {
        self != BlockKind::None
    }

    fn sample(rng: &mut impl Rng) -> Self {
        match rng.random_range(0..4u8) {
            1 => BlockKind::Crate,
            2 => BlockKind::Sand,
            3 => BlockKind::Stone,
            _ => BlockKind::None,
        }
    }
}

/// A single grid cell with its cached world position
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    pub row: usize,
    pub col: usize,
    pub pos: Vec2,
}

/// The full collection of blocks, indexed `row * cols + col`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockGrid {
    rows: usize,
    cols: usize,
    blocks: Vec<Block>,
}

impl BlockGrid {
    /// Lay out `rows × cols` blocks with uniform-random kinds.
    ///
    /// All four kinds are equally likely, so about a quarter of the cells
    /// are born already empty.
    pub fn generate(rows: usize, cols: usize, rng: &mut impl Rng) -> Self {
        let mut blocks = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                blocks.push(Block {
                    kind: BlockKind::sample(rng),
                    row,
                    col,
                    pos: Self::cell_position(row, col),
                });
            }
        }
        Self { rows, cols, blocks }
    }

    /// World position of cell `(row, col)`; row index increases downward
    #[inline]
    pub fn cell_position(row: usize, col: usize) -> Vec2 {
        Vec2::new(
            GRID_ORIGIN_X + col as f32 * GRID_PITCH_X,
            GRID_ORIGIN_Y - row as f32 * GRID_PITCH_Y,
        )
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn block(&self, row: usize, col: usize) -> Option<&Block> {
        if row < self.rows && col < self.cols {
            self.blocks.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// All cells in row-major order
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    /// Collidable cells in row-major order
    pub fn live_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.kind.is_live())
    }

    /// Downgrade the block one step. Returns true if a kind transition
    /// happened - the scoring signal. Hitting an empty cell is a no-op.
    pub fn hit(&mut self, row: usize, col: usize) -> bool {
        if row >= self.rows || col >= self.cols {
            return false;
        }
        let block = &mut self.blocks[row * self.cols + col];
        if block.kind.is_live() {
            block.kind = block.kind.downgraded();
            true
        } else {
            false
        }
    }

    /// Direct kind override; out-of-range writes are ignored
    pub(crate) fn set_kind(&mut self, row: usize, col: usize, kind: BlockKind) {
        if row < self.rows && col < self.cols {
            self.blocks[row * self.cols + col].kind = kind;
        }
    }

    /// True once every block is destroyed - the win condition
    pub fn all_clear(&self) -> bool {
        self.blocks.iter().all(|b| !b.kind.is_live())
    }

    /// Destroy every block (debug cheat)
    pub fn clear_all(&mut self) {
        for block in &mut self.blocks {
            block.kind = BlockKind::None;
        }
    }
}

/// 3×5 block-letter glyphs, top row first, bit 2 = left column.
/// Only the letters the fixed screen messages need.
fn glyph(c: char) -> [u8; 5] {
    match c {
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'N' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        _ => [0; 5],
    }
}

/// Glyph cell width plus one column of spacing
const GLYPH_PITCH: usize = 4;
/// Glyph height in cells
const GLYPH_ROWS: usize = 5;

/// Boolean overlay with the same footprint as the block grid.
///
/// All painting helpers ignore out-of-range cells instead of failing - a
/// message that does not fit just gets cropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Mask {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    #[inline]
    pub fn is_set(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col]
    }

    /// Light one cell; out-of-range writes are ignored
    pub fn set(&mut self, row: usize, col: usize) {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = true;
        }
    }

    /// Horizontal run of `len` cells starting at `(row, col)`
    pub fn hline(&mut self, row: usize, col: usize, len: usize) {
        for c in col..col.saturating_add(len) {
            self.set(row, c);
        }
    }

    /// Vertical run of `len` cells starting at `(row, col)`
    pub fn vline(&mut self, row: usize, col: usize, len: usize) {
        for r in row..row.saturating_add(len) {
            self.set(r, col);
        }
    }

    /// Filled `height × width` rectangle with top-left corner `(row, col)`
    pub fn rect(&mut self, row: usize, col: usize, height: usize, width: usize) {
        for r in row..row.saturating_add(height) {
            self.hline(r, col, width);
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Paint a block-letter message, centered on the grid
    pub fn paint_message(&mut self, text: &str) {
        let width = (text.chars().count() * GLYPH_PITCH).saturating_sub(1);
        let col0 = self.cols.saturating_sub(width) / 2;
        let row0 = self.rows.saturating_sub(GLYPH_ROWS) / 2;

        for (i, c) in text.chars().enumerate() {
            let rows = glyph(c.to_ascii_uppercase());
            let left = col0 + i * GLYPH_PITCH;
            for (r, bits) in rows.iter().enumerate() {
                for bit in 0..3 {
                    if bits & (0b100 >> bit) != 0 {
                        self.set(row0 + r, left + bit);
                    }
                }
            }
        }
    }

    /// Lit cells in row-major order
    pub fn lit_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows)
            .flat_map(move |r| (0..self.cols).map(move |c| (r, c)))
            .filter(|&(r, c)| self.is_set(r, c))
    }
}
