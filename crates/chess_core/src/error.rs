use crate::{piece::PieceId, position::Position};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    #[error("position ({x}, {z}) is outside the board")]
    OutOfRange { x: u8, z: u8 },

    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Position, to: Position },

    /// Setup tried to place a piece on a cell that is already taken.
    #[error("cell {position} is already occupied")]
    OccupiedCell { position: Position },

    #[error("no active piece with id {0}")]
    UnknownPiece(PieceId),
}

pub type ChessResult<T> = Result<T, ChessError>;
