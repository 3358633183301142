//! The render binding between the board and the screen.
//!
//! The core board is plain data. [`TileLayer`] is the presentation side's
//! record of what each board slot currently shows, keyed by board
//! coordinate. After every update it is diffed against the board so the
//! view knows which tiles are new.

use std::collections::HashMap;

use twenty48_core::{Board, Pos};

/// What a board slot shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TileSprite {
    pub value: u32,
    /// The slot held a different value (or nothing) before the last sync.
    pub fresh: bool,
}

#[derive(Clone, Debug, Default)]
pub struct TileLayer {
    sprites: HashMap<Pos, TileSprite>,
}

impl TileLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pos: Pos) -> Option<&TileSprite> {
        self.sprites.get(&pos)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Forget every sprite; the next sync marks all tiles fresh.
    pub fn clear(&mut self) {
        self.sprites.clear();
    }

    /// Bring the layer in line with `board`. Returns how many slots changed
    /// value (appeared, merged, moved in or emptied).
    pub fn sync(&mut self, board: &Board) -> usize {
        let mut changed = 0;
        for (pos, tile) in board.iter() {
            match tile {
                None => {
                    if self.sprites.remove(&pos).is_some() {
                        changed += 1;
                    }
                }
                Some(tile) => {
                    let value = tile.value();
                    let fresh = self.sprites.get(&pos).is_none_or(|s| s.value != value);
                    changed += usize::from(fresh);
                    self.sprites.insert(pos, TileSprite { value, fresh });
                }
            }
        }
        log::trace!("tile layer synced, {changed} slots changed");
        changed
    }
}
