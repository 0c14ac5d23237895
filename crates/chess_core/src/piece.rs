use std::fmt;

use crate::{moves, Board, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    White,
    Black,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::White => Team::Black,
            Team::Black => Team::White,
        }
    }

    /// Direction of travel along z for this team's pawns.
    pub fn forward(self) -> i8 {
        match self {
            Team::White => 1,
            Team::Black => -1,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::White => write!(f, "white"),
            Team::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Character skin drawn for this kind of piece.
    pub fn character(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pokeball",
            PieceKind::Rook => "Squirtle",
            PieceKind::Knight => "Charmander",
            PieceKind::Bishop => "Bulbasaur",
            PieceKind::Queen => "Mew",
            PieceKind::King => "Mewtwo",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Rook => "rook",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }

    /// Texture path relative to the asset root, e.g. `pieces/white_squirtle_rook.png`.
    pub fn asset_name(self, team: Team) -> String {
        format!(
            "pieces/{}_{}_{}.png",
            team,
            self.character().to_lowercase(),
            self.name()
        )
    }
}

/// Opaque handle for a piece, unique within one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub team: Team,
    pub position: Position,
}

impl Piece {
    pub fn new(id: PieceId, kind: PieceKind, team: Team, position: Position) -> Self {
        Self {
            id,
            kind,
            team,
            position,
        }
    }

    pub fn is_opponent_of(&self, other: &Piece) -> bool {
        self.team != other.team
    }

    /// Destinations this piece may move to on `board`. Recomputed on every call.
    pub fn legal_moves(&self, board: &Board) -> Vec<Position> {
        match self.kind {
            PieceKind::Pawn => moves::pawn_moves(self, board),
            PieceKind::Rook => moves::slide_moves(self, board, &moves::ROOK_DIRS),
            PieceKind::Knight => moves::step_moves(self, board, &moves::KNIGHT_OFFSETS),
            PieceKind::Bishop => moves::slide_moves(self, board, &moves::BISHOP_DIRS),
            PieceKind::Queen => moves::slide_moves(self, board, &moves::QUEEN_DIRS),
            PieceKind::King => moves::step_moves(self, board, &moves::KING_OFFSETS),
        }
    }
}
