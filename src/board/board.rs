//! Board structure with incremental hashing and an undo stack

use super::{Pos, Stone, BOARD_SIZE, TOTAL_CELLS};
use crate::search::ZobristTable;

/// Game board: flat row-major cells plus the live Zobrist key
#[derive(Debug, Clone)]
pub struct Board {
    cells: [Stone; TOTAL_CELLS],
    move_count: usize,
    /// XOR of the zobrist keys of every occupied cell
    hash: u64,
    /// Placement order, popped by `undo`
    history: Vec<Pos>,
    zobrist: ZobristTable,
}

impl Board {
    /// Empty board with a freshly drawn zobrist table
    pub fn new() -> Self {
        Self::with_zobrist(ZobristTable::new())
    }

    pub fn with_zobrist(zobrist: ZobristTable) -> Self {
        Self {
            cells: [Stone::Empty; TOTAL_CELLS],
            move_count: 0,
            hash: 0,
            history: Vec::with_capacity(TOTAL_CELLS),
            zobrist,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        BOARD_SIZE
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.cells[pos.to_index()]
    }

    /// Stone at untrusted coordinates; off-board reads as `None`
    #[inline]
    pub fn at(&self, row: i32, col: i32) -> Option<Stone> {
        Pos::checked(row, col).map(|p| self.get(p))
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    /// Place a stone, update the hash and push it on the history.
    ///
    /// Returns `false` without touching anything when the cell is occupied
    /// or `stone` is `Empty`. Turn order and forbidden moves are the
    /// caller's business (see `rules`).
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) -> bool {
        if stone == Stone::Empty || !self.is_empty(pos) {
            return false;
        }
        self.cells[pos.to_index()] = stone;
        self.hash = self.zobrist.update(self.hash, pos, stone);
        self.move_count += 1;
        self.history.push(pos);
        true
    }

    /// Remove the most recent stone: exact inverse of `place_stone`.
    pub fn undo(&mut self) -> Option<(Pos, Stone)> {
        let pos = self.history.pop()?;
        let stone = self.get(pos);
        self.cells[pos.to_index()] = Stone::Empty;
        self.hash = self.zobrist.update(self.hash, pos, stone);
        self.move_count -= 1;
        Some((pos, stone))
    }

    /// Replace the whole position, recomputing count and hash from scratch.
    ///
    /// `history` may be empty when the placement order is unknown; undo is
    /// then unavailable until new stones are placed.
    pub fn load(&mut self, cells: [Stone; TOTAL_CELLS], history: Vec<Pos>) {
        self.cells = cells;
        self.move_count = cells.iter().filter(|&&s| s != Stone::Empty).count();
        self.history = history;
        self.hash = self.zobrist.hash(self);
    }

    /// Remove every stone
    pub fn clear(&mut self) {
        self.cells = [Stone::Empty; TOTAL_CELLS];
        self.move_count = 0;
        self.hash = 0;
        self.history.clear();
    }

    /// Side to move, derived from move-count parity (Black first)
    #[inline]
    pub fn side_to_move(&self) -> Stone {
        if self.move_count % 2 == 0 {
            Stone::Black
        } else {
            Stone::White
        }
    }

    #[inline]
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.move_count == TOTAL_CELLS
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.move_count == 0
    }

    pub fn cells(&self) -> &[Stone; TOTAL_CELLS] {
        &self.cells
    }

    pub fn history(&self) -> &[Pos] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Pos> {
        self.history.last().copied()
    }

    pub fn zobrist(&self) -> &ZobristTable {
        &self.zobrist
    }

    /// Count occupied cells by scanning (independent of `move_count`)
    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|&&s| s != Stone::Empty).count()
    }

    /// Positions of every stone of one color, row-major
    pub fn stones(&self, color: Stone) -> impl Iterator<Item = Pos> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |&(_, &s)| s == color && color != Stone::Empty)
            .map(|(idx, _)| Pos::from_index(idx))
    }

    /// Empty cells, row-major
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s == Stone::Empty)
            .map(|(idx, _)| Pos::from_index(idx))
    }

    /// True if any of the 8 neighbours is occupied
    pub fn has_neighbor(&self, pos: Pos) -> bool {
        for dr in -1..=1 {
            for dc in -1..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if let Some(s) = self.at(pos.row as i32 + dr, pos.col as i32 + dc) {
                    if s != Stone::Empty {
                        return true;
                    }
                }
            }
        }
        false
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
