use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    NotStarted,
    Active,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Bookkeeping for one game attempt.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub started: bool,
    pub seconds: u32,
    pub flags_used: CellCount,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    /// Carries the new status of the cell.
    Changed(CellStatus),
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed(_))
    }
}

/// Owns the board and session of the current game and applies player commands to them.
#[derive(Clone, Debug)]
pub struct Minesweeper {
    config: GameConfig,
    board: Board,
    session: Session,
    state: GameState,
    triggered_mine: Option<Coord2>,
    rng: SmallRng,
}

impl Minesweeper {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            board: Board::empty(config.size),
            session: Session::default(),
            state: GameState::default(),
            triggered_mine: None,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.board.get(coords)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.session.seconds
    }

    /// Can go negative when more flags are placed than there are mines.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.config.mines) - i32::from(self.session.flags_used)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        if self.state.is_over() {
            return Ok(RevealOutcome::NoChange);
        }
        let coords = self.board.validate_coords(coords)?;

        if matches!(self.state, GameState::NotStarted) {
            self.start(coords)?;
        }

        Ok(match self.board.reveal(coords)? {
            RevealOutcome::HitMine(mine) => {
                log::debug!("mine hit at {:?}", mine);
                self.triggered_mine = Some(mine);
                self.board.reveal_all();
                self.end_game(GameState::Lost);
                RevealOutcome::HitMine(mine)
            }
            RevealOutcome::Revealed(changed) if self.board.all_safe_visible() => {
                self.end_game(GameState::Won);
                RevealOutcome::Won(changed)
            }
            outcome => outcome,
        })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        if self.state.is_over() {
            return Ok(MarkOutcome::NoChange);
        }
        let coords = self.board.validate_coords(coords)?;

        if !self.state.is_active() {
            return Ok(MarkOutcome::NoChange);
        }

        let flags_used = &mut self.session.flags_used;
        Ok(match self.board.toggle_flag(coords)? {
            Some(CellStatus::Flagged) => {
                *flags_used = flags_used.saturating_add(1);
                MarkOutcome::Changed(CellStatus::Flagged)
            }
            Some(status) => {
                *flags_used = flags_used.saturating_sub(1);
                MarkOutcome::Changed(status)
            }
            None => MarkOutcome::NoChange,
        })
    }

    /// Applies a command and reports whether anything visible changed.
    pub fn execute(&mut self, command: Command) -> Result<bool> {
        Ok(match command {
            Command::Reveal(coords) => self.reveal(coords)?.has_update(),
            Command::ToggleFlag(coords) => self.toggle_flag(coords)?.has_update(),
        })
    }

    /// One second of the session timer. Only counts while the game is active.
    pub fn tick(&mut self) -> bool {
        if !self.state.is_active() {
            return false;
        }
        self.session.seconds = self.session.seconds.saturating_add(1);
        log::trace!("tick: {}s", self.session.seconds);
        true
    }

    /// Back to an all hidden board without mines, waiting for the next first click.
    pub fn reset(&mut self) {
        self.board = Board::empty(self.config.size);
        self.session = Session::default();
        self.state = GameState::NotStarted;
        self.triggered_mine = None;
        log::debug!("game reset");
    }

    fn start(&mut self, first: Coord2) -> Result<()> {
        let seed = self.rng.random();
        self.board = RandomBoardGenerator::new(seed, first).generate(self.config)?;
        self.session.started = true;
        self.state = GameState::Active;
        log::debug!("game started at {:?}", first);
        Ok(())
    }

    fn end_game(&mut self, state: GameState) {
        if self.state.is_over() {
            return;
        }
        self.state = state;
        log::debug!("game over: {:?} after {}s", state, self.session.seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(config: GameConfig, seed: u64, first: Coord2) -> Minesweeper {
        let mut game = Minesweeper::new(config, seed).unwrap();
        game.reveal(first).unwrap();
        game
    }

    fn first_mine(game: &Minesweeper) -> Coord2 {
        game.board()
            .iter_cells()
            .find(|(_, cell)| cell.is_mine())
            .map(|(pos, _)| pos)
            .unwrap()
    }

    fn first_hidden_safe(game: &Minesweeper) -> Option<Coord2> {
        game.board()
            .iter_cells()
            .find(|(_, cell)| cell.is_hidden() && !cell.is_mine())
            .map(|(pos, _)| pos)
    }

    #[test]
    fn new_game_waits_for_first_click() {
        let game = Minesweeper::new(GameConfig::DEFAULT, 1).unwrap();

        assert_eq!(game.state(), GameState::NotStarted);
        assert!(!game.session().started);
        assert_eq!(game.board().mine_count(), 0);
        assert_eq!(game.mines_left(), 10);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = GameConfig::new_unchecked((2, 2), 4);
        assert!(matches!(
            Minesweeper::new(config, 0),
            Err(GameError::TooManyMines)
        ));
    }

    #[test]
    fn first_reveal_generates_board_and_starts_session() {
        let game = started(GameConfig::DEFAULT, 7, (4, 4));

        assert!(game.state().is_active() || game.state() == GameState::Won);
        assert!(game.session().started);
        assert_eq!(game.board().mine_count(), 10);
        assert_eq!(game.cell_at((4, 4)).map(Cell::status), Some(CellStatus::Visible));
    }

    #[test]
    fn flag_before_start_is_noop() {
        let mut game = Minesweeper::new(GameConfig::DEFAULT, 1).unwrap();

        assert_eq!(game.toggle_flag((0, 0)), Ok(MarkOutcome::NoChange));
        assert_eq!(game.state(), GameState::NotStarted);
        assert_eq!(game.session().flags_used, 0);
    }

    #[test]
    fn flags_adjust_counter() {
        let mut game = started(GameConfig::new((9, 9), 30).unwrap(), 3, (0, 0));
        let target = first_mine(&game);

        assert_eq!(
            game.toggle_flag(target),
            Ok(MarkOutcome::Changed(CellStatus::Flagged))
        );
        assert_eq!(game.session().flags_used, 1);
        assert_eq!(game.mines_left(), 29);

        assert_eq!(
            game.toggle_flag(target),
            Ok(MarkOutcome::Changed(CellStatus::Hidden))
        );
        assert_eq!(game.session().flags_used, 0);
    }

    #[test]
    fn flag_counter_has_no_ceiling() {
        let config = GameConfig::new((9, 9), 60).unwrap();
        let mut game = started(config, 5, (0, 0));
        assert!(game.state().is_active());

        let hidden: alloc::vec::Vec<_> = game
            .board()
            .iter_cells()
            .filter(|(_, cell)| cell.is_hidden())
            .map(|(pos, _)| pos)
            .collect();
        for &pos in &hidden {
            game.toggle_flag(pos).unwrap();
        }

        assert!(hidden.len() > 60);
        assert_eq!(usize::from(game.session().flags_used), hidden.len());
        assert!(game.mines_left() < 0);
    }

    #[test]
    fn flag_on_visible_cell_is_noop() {
        let mut game = started(GameConfig::DEFAULT, 11, (4, 4));

        assert_eq!(game.toggle_flag((4, 4)), Ok(MarkOutcome::NoChange));
        assert_eq!(game.session().flags_used, 0);
    }

    #[test]
    fn hitting_a_mine_loses_and_reveals_everything() {
        let mut game = started(GameConfig::new((9, 9), 30).unwrap(), 9, (0, 0));
        let mine = first_mine(&game);

        assert_eq!(game.reveal(mine), Ok(RevealOutcome::HitMine(mine)));
        assert_eq!(game.state(), GameState::Lost);
        assert_eq!(game.triggered_mine(), Some(mine));
        assert!(game.board().iter_cells().all(|(_, cell)| cell.is_visible()));
    }

    #[test]
    fn input_after_game_over_is_noop() {
        let mut game = started(GameConfig::new((9, 9), 30).unwrap(), 9, (0, 0));
        let mine = first_mine(&game);
        game.reveal(mine).unwrap();

        assert_eq!(game.reveal((0, 0)), Ok(RevealOutcome::NoChange));
        assert_eq!(game.toggle_flag((0, 0)), Ok(MarkOutcome::NoChange));
        assert_eq!(game.execute(Command::Reveal(mine)), Ok(false));
    }

    #[test]
    fn revealing_every_safe_cell_wins() {
        let config = GameConfig::new((4, 4), 3).unwrap();
        let mut game = started(config, 21, (0, 0));

        while let Some(pos) = first_hidden_safe(&game) {
            let outcome = game.reveal(pos).unwrap();
            if first_hidden_safe(&game).is_none() {
                assert!(matches!(outcome, RevealOutcome::Won(_)));
            }
        }

        assert_eq!(game.state(), GameState::Won);
        assert!(!game.tick());
    }

    #[test]
    fn tick_only_counts_while_active() {
        let mut game = Minesweeper::new(GameConfig::new((9, 9), 30).unwrap(), 2).unwrap();
        assert!(!game.tick());
        assert_eq!(game.elapsed_secs(), 0);

        game.reveal((0, 0)).unwrap();
        assert!(game.tick());
        assert!(game.tick());
        assert_eq!(game.elapsed_secs(), 2);
    }

    #[test]
    fn out_of_bounds_is_reported_and_changes_nothing() {
        let mut game = Minesweeper::new(GameConfig::DEFAULT, 1).unwrap();

        assert_eq!(game.reveal((9, 0)), Err(GameError::InvalidCoords));
        assert_eq!(game.toggle_flag((0, 9)), Err(GameError::InvalidCoords));
        assert_eq!(game.state(), GameState::NotStarted);
    }

    #[test]
    fn out_of_bounds_after_game_over_is_noop() {
        let mut game = started(GameConfig::new((9, 9), 40).unwrap(), 9, (0, 0));
        let mine = first_mine(&game);
        game.reveal(mine).unwrap();
        assert!(game.state().is_over());

        assert_eq!(game.reveal((20, 0)), Ok(RevealOutcome::NoChange));
        assert_eq!(game.toggle_flag((0, 20)), Ok(MarkOutcome::NoChange));
        assert_eq!(game.execute(Command::Reveal((20, 20))), Ok(false));
    }

    #[test]
    fn execute_dispatches_commands() {
        let mut game = Minesweeper::new(GameConfig::new((9, 9), 30).unwrap(), 4).unwrap();

        assert_eq!(game.execute(Command::ToggleFlag((1, 1))), Ok(false));
        assert_eq!(game.execute(Command::Reveal((1, 1))), Ok(true));
        assert_eq!(game.execute(Command::Reveal((1, 1))), Ok(false));
    }

    #[test]
    fn reset_restores_fresh_state() {
        let mut game = started(GameConfig::new((9, 9), 30).unwrap(), 8, (0, 0));
        game.tick();
        let mine = first_mine(&game);
        game.toggle_flag(mine).unwrap();

        game.reset();

        assert_eq!(game.state(), GameState::NotStarted);
        assert_eq!(*game.session(), Session::default());
        assert_eq!(game.board().mine_count(), 0);
        assert_eq!(game.triggered_mine(), None);
        assert!(game.board().iter_cells().all(|(_, cell)| cell.is_hidden()));
    }
}
