//! The game controller: owns a session and applies player input.

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Tile};
use crate::config::GameConfig;
use crate::engine::{self, Direction};
use crate::error::ConfigError;

/// Where a session stands.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameState {
    #[default]
    Playing,
    Won,
    Lost,
}

/// Read-only view of a session, for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub board: Board,
    pub score: u64,
    pub state: GameState,
}

/// A 2048 session.
///
/// Every operation is total: input that does not apply to the current state
/// (a move after the game ended, continuing a game that was not won) is
/// ignored.
pub struct Game<R: Rng = StdRng> {
    config: GameConfig,
    board: Board,
    score: u64,
    state: GameState,
    /// Set by [`continue_after_win`](Game::continue_after_win); suppresses
    /// the win check until the next reset.
    keep_playing: bool,
    rng: R,
}

impl Game<StdRng> {
    /// Start a session seeded from the operating system.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Start a reproducible session.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// Start a session drawing spawn positions from `rng`.
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut game = Self {
            config,
            board: Board::new(config.rows, config.cols),
            score: 0,
            state: GameState::Playing,
            keep_playing: false,
            rng,
        };
        game.reset();
        Ok(game)
    }

    /// Pick up a session at an arbitrary board (score 0), then evaluate it.
    pub fn from_board(config: GameConfig, board: Board, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        if (board.rows(), board.cols()) != (config.rows, config.cols) {
            return Err(ConfigError::BoardMismatch {
                rows: config.rows,
                cols: config.cols,
                found_rows: board.rows(),
                found_cols: board.cols(),
            });
        }
        let mut game = Self {
            config,
            board,
            score: 0,
            state: GameState::Playing,
            keep_playing: false,
            rng,
        };
        game.evaluate_terminal();
        Ok(game)
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            score: self.score,
            state: self.state,
        }
    }

    /// Slide the board toward `direction`.
    ///
    /// Returns `true` when the move was committed: the board changed, the
    /// score grew by the merged values, one tile was spawned and the
    /// terminal conditions were re-evaluated. Moves outside
    /// [`GameState::Playing`] and moves that change nothing return `false`
    /// and leave the session untouched.
    pub fn apply_move(&mut self, direction: Direction) -> bool {
        if self.state != GameState::Playing {
            trace!("ignoring {direction} while {:?}", self.state);
            return false;
        }
        let result = engine::slide(&self.board, direction);
        if !result.changed {
            trace!("{direction} changes nothing");
            return false;
        }

        self.board = result.board;
        self.score += result.score_delta;
        debug!(
            "moved {direction}: +{} (score {})",
            result.score_delta, self.score
        );
        self.spawn_tiles(1);
        self.evaluate_terminal();
        true
    }

    /// Place up to `n` 2-tiles on uniformly random empty cells, one at a
    /// time. Returns how many were placed (fewer than `n` once the board
    /// is full).
    pub fn spawn_tiles(&mut self, n: usize) -> usize {
        for placed in 0..n {
            let empty: Vec<_> = self.board.empty_cells().collect();
            if empty.is_empty() {
                return placed;
            }
            let pos = empty[self.rng.random_range(0..empty.len())];
            trace!("spawning a 2 at {pos}");
            self.board.set(pos, Some(Tile::TWO));
        }
        n
    }

    /// Move from `Playing` to `Won` or `Lost` when the board calls for it.
    ///
    /// A tile of at least the configured target wins (unless the player
    /// already chose to keep playing). Otherwise a full board with no
    /// adjacent equal pair loses.
    pub fn evaluate_terminal(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        let target = self.config.target;
        if !self.keep_playing && self.board.max_tile().is_some_and(|t| t.value() >= target) {
            info!("reached {target} with score {}", self.score);
            self.state = GameState::Won;
        } else if self.board.is_full() && !self.board.has_adjacent_pair() {
            info!("no moves left, final score {}", self.score);
            self.state = GameState::Lost;
        }
    }

    /// Clear the board and score and deal the opening tiles.
    pub fn reset(&mut self) {
        self.board = Board::new(self.config.rows, self.config.cols);
        self.score = 0;
        self.state = GameState::Playing;
        self.keep_playing = false;
        self.spawn_tiles(self.config.initial_tiles);
        info!(
            "new {}x{} game, target {}",
            self.config.rows, self.config.cols, self.config.target
        );
    }

    /// Resume play after a win, keeping the board. Ignored unless the game
    /// is in [`GameState::Won`].
    pub fn continue_after_win(&mut self) {
        if self.state != GameState::Won {
            return;
        }
        info!("continuing past {}", self.config.target);
        self.keep_playing = true;
        self.state = GameState::Playing;
        // The continued board may already be stuck.
        self.evaluate_terminal();
    }
}

impl<R: Rng> std::fmt::Debug for Game<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("board", &self.board)
            .field("score", &self.score)
            .field("state", &self.state)
            .field("keep_playing", &self.keep_playing)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board<const R: usize, const C: usize>(rows: [[u32; C]; R]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    fn game_at(b: Board) -> Game {
        let config = GameConfig::default().with_size(b.rows(), b.cols());
        Game::from_board(config, b, StdRng::seed_from_u64(7)).unwrap()
    }

    fn tile_count(b: &Board) -> usize {
        b.rows() * b.cols() - b.count_empty()
    }

    #[test]
    fn new_game_has_two_tiles() {
        let g = Game::with_seed(GameConfig::default(), 1).unwrap();
        let snap = g.snapshot();
        assert_eq!(snap.score, 0);
        assert_eq!(snap.state, GameState::Playing);
        assert_eq!(tile_count(&snap.board), 2);
        assert!(snap.board.iter().flat_map(|(_, c)| c).all(|t| t == Tile::TWO));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = Game::with_seed(GameConfig::default().with_target(100), 1).unwrap_err();
        assert_eq!(err, ConfigError::Target(100));
        let err = Game::from_board(GameConfig::default(), Board::new(3, 3), StdRng::seed_from_u64(0))
            .unwrap_err();
        assert!(matches!(err, ConfigError::BoardMismatch { found_rows: 3, .. }));
    }

    #[test]
    fn seeded_games_are_reproducible() {
        let a = Game::with_seed(GameConfig::default(), 99).unwrap();
        let b = Game::with_seed(GameConfig::default(), 99).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn committed_move_scores_and_spawns() {
        let mut g = game_at(board([
            [0, 2, 0, 2],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]));
        assert!(g.apply_move(Direction::Left));
        assert_eq!(g.score(), 4);
        assert_eq!(g.board().get(crate::Pos::new(0, 0)), Tile::new(4));
        // merged 4 plus exactly one spawned 2
        assert_eq!(tile_count(g.board()), 2);
    }

    #[test]
    fn no_op_move_does_not_spawn() {
        let b = board([
            [2, 4, 2, 4],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        let mut g = game_at(b.clone());
        assert!(!g.apply_move(Direction::Left));
        assert!(!g.apply_move(Direction::Up));
        assert_eq!(*g.board(), b);
        assert_eq!(g.score(), 0);
    }

    #[test]
    fn score_never_decreases() {
        let mut g = Game::with_seed(GameConfig::default(), 5).unwrap();
        let mut last = 0;
        for i in 0..400 {
            g.apply_move(Direction::ALL[i % 4]);
            assert!(g.score() >= last);
            last = g.score();
            if g.state() != GameState::Playing {
                break;
            }
        }
    }

    #[test]
    fn reaching_target_wins() {
        let config = GameConfig::default().with_target(16);
        let b = board([
            [8, 8, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        let mut g = Game::from_board(config, b, StdRng::seed_from_u64(3)).unwrap();
        assert!(g.apply_move(Direction::Left));
        assert_eq!(g.state(), GameState::Won);
        // further moves are ignored until continue
        let before = g.snapshot();
        assert!(!g.apply_move(Direction::Right));
        assert_eq!(g.snapshot(), before);
    }

    #[test]
    fn win_threshold_is_inclusive_above_target() {
        let b = board([
            [4096, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        assert_eq!(game_at(b).state(), GameState::Won);
    }

    #[test]
    fn continue_after_win_keeps_board_and_stays_playing() {
        let config = GameConfig::default().with_target(16);
        let b = board([
            [16, 0, 0, 0],
            [2, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        let mut g = Game::from_board(config, b.clone(), StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(g.state(), GameState::Won);
        g.continue_after_win();
        assert_eq!(g.state(), GameState::Playing);
        assert_eq!(*g.board(), b);
        assert!(g.apply_move(Direction::Right));
        assert_eq!(g.state(), GameState::Playing);
    }

    #[test]
    fn continue_is_ignored_unless_won() {
        let mut g = Game::with_seed(GameConfig::default(), 11).unwrap();
        g.continue_after_win();
        assert_eq!(g.state(), GameState::Playing);

        let mut lost = game_at(board([[2, 4], [4, 2]]));
        assert_eq!(lost.state(), GameState::Lost);
        lost.continue_after_win();
        assert_eq!(lost.state(), GameState::Lost);
    }

    #[test]
    fn full_board_without_pairs_loses() {
        let g = game_at(board([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]));
        assert_eq!(g.state(), GameState::Lost);
    }

    #[test]
    fn full_board_with_pair_in_last_row_keeps_playing() {
        let g = game_at(board([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 8, 8],
        ]));
        assert_eq!(g.state(), GameState::Playing);
    }

    #[test]
    fn move_that_fills_board_can_lose() {
        // Each move leaves exactly one gap, so every spawn is forced.
        let b = board([[4, 2], [0, 8]]);
        let mut g = game_at(b);
        assert!(g.apply_move(Direction::Down));
        // Column 0 becomes [_, 4] and the spawn fills (0, 0) with a 2.
        assert_eq!(g.board().to_rows(), vec![vec![2, 2], vec![4, 8]]);
        assert_eq!(g.state(), GameState::Playing);
        assert!(g.apply_move(Direction::Left));
        assert_eq!(g.board().to_rows(), vec![vec![4, 2], vec![4, 8]]);
        assert_eq!(g.state(), GameState::Playing);
        assert!(g.apply_move(Direction::Up));
        assert_eq!(g.board().to_rows(), vec![vec![8, 2], vec![2, 8]]);
        assert_eq!(g.state(), GameState::Lost);
        assert!(!g.apply_move(Direction::Left));
    }

    #[test]
    fn full_board_with_only_an_overflowing_pair_loses() {
        let top = 1 << 31;
        let mut g = game_at(board([[top, top], [2, 4]]));
        assert_eq!(g.state(), GameState::Won);
        g.continue_after_win();
        assert!(!engine::can_move(g.board()));
        assert_eq!(g.state(), GameState::Lost);
        for d in Direction::ALL {
            assert!(!g.apply_move(d));
        }
    }

    #[test]
    fn spawn_picks_empty_cells_uniformly() {
        let b = board([
            [2, 0, 4, 0],
            [0, 8, 0, 16],
            [4, 0, 2, 0],
            [0, 32, 0, 64],
        ]);
        let empty: Vec<_> = b.empty_cells().collect();
        let trials = 4000;
        let mut counts = vec![0usize; empty.len()];
        for seed in 0..trials {
            let config = GameConfig::default();
            let mut g = Game::from_board(config, b.clone(), StdRng::seed_from_u64(seed)).unwrap();
            assert_eq!(g.spawn_tiles(1), 1);
            let picked: Vec<_> = empty
                .iter()
                .enumerate()
                .filter(|&(_, &p)| g.board().get(p).is_some())
                .map(|(i, _)| i)
                .collect();
            assert_eq!(picked.len(), 1);
            assert_eq!(g.board().get(empty[picked[0]]), Some(Tile::TWO));
            counts[picked[0]] += 1;
        }
        // 8 cells, 500 expected each.
        let expected = trials as usize / empty.len();
        for (pos, &n) in empty.iter().zip(&counts) {
            assert!(n > expected * 3 / 4 && n < expected * 5 / 4, "{pos}: {n} of {trials}");
        }
    }

    #[test]
    fn spawn_tiles_stops_when_full() {
        let mut g = game_at(board([[2, 0], [0, 4]]));
        assert_eq!(g.spawn_tiles(5), 2);
        assert!(g.board().is_full());
        assert_eq!(g.spawn_tiles(1), 0);
    }

    #[test]
    fn reset_restores_a_fresh_session() {
        let mut g = game_at(board([[2, 4], [4, 2]]));
        assert_eq!(g.state(), GameState::Lost);
        g.reset();
        assert_eq!(g.state(), GameState::Playing);
        assert_eq!(g.score(), 0);
        assert_eq!(tile_count(g.board()), 2);
    }

    #[test]
    fn reset_clears_keep_playing() {
        let config = GameConfig::default().with_target(4);
        let b = board([
            [4, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        let mut g = Game::from_board(config, b, StdRng::seed_from_u64(1)).unwrap();
        g.continue_after_win();
        g.reset();
        // Only 2s are dealt, so the first merge makes a 4.
        for _ in 0..20 {
            if g.state() == GameState::Won {
                break;
            }
            for d in Direction::ALL {
                g.apply_move(d);
            }
        }
        assert_eq!(g.state(), GameState::Won);
    }
}
