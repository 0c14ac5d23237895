use log::{debug, warn};

use crate::{
    error::ChessResult,
    layout::{standard_layout, LayoutEntry},
    Board, Move, Piece, PieceId, Position, Team,
};

/// A click on the board, as resolved by the render layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardClick {
    pub target: Position,
    /// The piece whose model was hit, if any.
    pub piece: Option<PieceId>,
}

impl BoardClick {
    pub fn cell(target: Position) -> Self {
        Self { target, piece: None }
    }

    pub fn piece(target: Position, piece: PieceId) -> Self {
        Self {
            target,
            piece: Some(piece),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing was selected and the click did not pick up a piece.
    Ignored,
    Selected(PieceId),
    Reselected(PieceId),
    Moved(Move),
    /// A selection was dropped because the target was not a legal destination.
    Cancelled,
}

/// What the render layer needs to redraw after a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub outcome: ClickOutcome,
    pub selected: Option<PieceId>,
    pub highlighted: Vec<Position>,
    pub current_turn: Team,
}

/// Board, turn and selection for one game.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    current_turn: Team,
    selected: Option<PieceId>,
    history: Vec<Move>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// An empty session; pieces arrive through [`GameSession::place`].
    pub fn new() -> Self {
        Self::with_board(Board::new())
    }

    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            current_turn: Team::White,
            selected: None,
            history: Vec::new(),
        }
    }

    /// A session with every piece of the standard layout already placed.
    pub fn standard() -> ChessResult<Self> {
        Ok(Self::with_board(Board::from_layout(&standard_layout())?))
    }

    /// Drops all state so a fresh game can be placed.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Lands one piece whose model finished loading.
    pub fn place(&mut self, entry: LayoutEntry) -> ChessResult<PieceId> {
        self.board.add_piece(entry.kind, entry.team, entry.position)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> Team {
        self.current_turn
    }

    pub fn selected(&self) -> Option<&Piece> {
        self.selected.and_then(|id| self.board.piece(id))
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Legal destinations of the selected piece.
    pub fn highlighted(&self) -> Vec<Position> {
        self.selected
            .and_then(|id| self.board.legal_moves(id).ok())
            .unwrap_or_default()
    }

    pub fn snapshot(&self, outcome: ClickOutcome) -> SessionSnapshot {
        SessionSnapshot {
            outcome,
            selected: self.selected,
            highlighted: self.highlighted(),
            current_turn: self.current_turn,
        }
    }

    pub fn handle_click(&mut self, click: BoardClick) -> SessionSnapshot {
        let outcome = self.react(click);
        self.snapshot(outcome)
    }

    /// Handles a click that missed the board entirely.
    pub fn clear_selection(&mut self) -> SessionSnapshot {
        let outcome = match self.selected.take() {
            Some(id) => {
                debug!("selection of {id} cancelled by a click off the board");
                ClickOutcome::Cancelled
            }
            None => ClickOutcome::Ignored,
        };
        self.snapshot(outcome)
    }

    fn react(&mut self, click: BoardClick) -> ClickOutcome {
        let occupant = self.resolve_occupant(click);
        let target = occupant.map_or(click.target, |p| p.position);
        let own_piece = occupant.filter(|p| p.team == self.current_turn);

        let Some(selected) = self.selected else {
            return match own_piece {
                Some(piece) => {
                    debug!("{} selected {}", self.current_turn, piece.id);
                    self.selected = Some(piece.id);
                    ClickOutcome::Selected(piece.id)
                }
                None => ClickOutcome::Ignored,
            };
        };

        // Clicking another own piece switches the selection
        if let Some(piece) = own_piece {
            debug!("{} reselected {}", self.current_turn, piece.id);
            self.selected = Some(piece.id);
            return ClickOutcome::Reselected(piece.id);
        }

        // Anything else is either a move or a cancel
        self.selected = None;
        match self.board.move_piece(selected, target) {
            Ok(record) => {
                self.history.push(record);
                self.current_turn = self.current_turn.opponent();
                ClickOutcome::Moved(record)
            }
            Err(err) => {
                debug!("selection of {selected} cancelled: {err}");
                ClickOutcome::Cancelled
            }
        }
    }

    fn resolve_occupant(&self, click: BoardClick) -> Option<Piece> {
        if let Some(id) = click.piece {
            match self.board.piece(id) {
                Some(piece) => return Some(*piece),
                None => warn!("click referenced inactive piece {id}"),
            }
        }
        self.board.get_piece(click.target).copied()
    }
}
