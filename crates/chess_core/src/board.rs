use std::collections::HashMap;

use log::{debug, info};

use crate::{
    error::{ChessError, ChessResult},
    layout::LayoutEntry,
    moves::{Move, MoveType},
    position::BOARD_SIZE,
    Piece, PieceId, PieceKind, Position, Team,
};

const CELLS: usize = BOARD_SIZE as usize;

/// The 8x8 grid together with the set of pieces still in play.
///
/// The grid stores piece ids; the piece values live in `pieces`. Every
/// mutation keeps `piece.position` and the grid cell in agreement.
#[derive(Debug, Clone, Default)]
pub struct Board {
    cells: [[Option<PieceId>; CELLS]; CELLS],
    pieces: HashMap<PieceId, Piece>,
    next_id: u32,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from layout records, failing on the first bad entry.
    pub fn from_layout(entries: &[LayoutEntry]) -> ChessResult<Self> {
        let mut board = Self::new();
        for entry in entries {
            board.add_piece(entry.kind, entry.team, entry.position)?;
        }
        Ok(board)
    }

    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.is_on_board()
    }

    pub fn is_position_empty(&self, pos: Position) -> ChessResult<bool> {
        self.cell(pos).map(|cell| cell.is_none())
    }

    pub fn get_piece(&self, pos: Position) -> Option<&Piece> {
        self.cell(pos)
            .ok()
            .flatten()
            .and_then(|id| self.pieces.get(&id))
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }

    pub fn pieces_of(&self, team: Team) -> impl Iterator<Item = &Piece> {
        self.pieces.values().filter(move |p| p.team == team)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub(crate) fn holds_opponent_of(&self, pos: Position, piece: &Piece) -> bool {
        self.get_piece(pos)
            .map_or(false, |other| other.is_opponent_of(piece))
    }

    /// Places a new piece during setup.
    pub fn add_piece(&mut self, kind: PieceKind, team: Team, position: Position) -> ChessResult<PieceId> {
        if self.cell(position)?.is_some() {
            return Err(ChessError::OccupiedCell { position });
        }

        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.pieces.insert(id, Piece::new(id, kind, team, position));
        self.set_cell(position, Some(id));
        debug!("placed {team} {} {id} on {position}", kind.name());
        Ok(id)
    }

    pub fn legal_moves(&self, id: PieceId) -> ChessResult<Vec<Position>> {
        let piece = self.pieces.get(&id).ok_or(ChessError::UnknownPiece(id))?;
        Ok(piece.legal_moves(self))
    }

    pub fn is_move_legal(&self, id: PieceId, target: Position) -> bool {
        self.legal_moves(id)
            .map_or(false, |moves| moves.contains(&target))
    }

    /// Moves a piece, capturing whatever opposing piece stands on `target`.
    ///
    /// Returns `IllegalMove` without touching the board when `target` is not
    /// one of the piece's legal destinations.
    pub fn move_piece(&mut self, id: PieceId, target: Position) -> ChessResult<Move> {
        let from = self
            .pieces
            .get(&id)
            .ok_or(ChessError::UnknownPiece(id))?
            .position;

        if !self.is_move_legal(id, target) {
            return Err(ChessError::IllegalMove { from, to: target });
        }

        // Take the victim off the board first
        let captured = self
            .cell(target)?
            .and_then(|victim| self.pieces.remove(&victim));

        // Then move the piece across
        self.set_cell(from, None);
        self.set_cell(target, Some(id));
        if let Some(piece) = self.pieces.get_mut(&id) {
            piece.position = target;
        }

        let move_type = if captured.is_some() {
            MoveType::Capture
        } else {
            MoveType::Quiet
        };

        match captured {
            Some(victim) => info!(
                "{id} {from} -> {target}, captured {} {} {}",
                victim.team,
                victim.kind.name(),
                victim.id
            ),
            None => info!("{id} {from} -> {target}"),
        }

        Ok(Move {
            piece: id,
            from,
            to: target,
            move_type,
            captured,
        })
    }

    fn cell(&self, pos: Position) -> ChessResult<Option<PieceId>> {
        if !self.is_valid_position(pos) {
            return Err(ChessError::OutOfRange { x: pos.x, z: pos.z });
        }
        Ok(self.cells[pos.z as usize][pos.x as usize])
    }

    fn set_cell(&mut self, pos: Position, occupant: Option<PieceId>) {
        self.cells[pos.z as usize][pos.x as usize] = occupant;
    }
}
