use crate::{PieceKind, Position, Team};

/// One piece of the initial setup, as handed to the board once its model
/// has loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEntry {
    pub kind: PieceKind,
    pub team: Team,
    pub position: Position,
}

impl LayoutEntry {
    pub fn new(kind: PieceKind, team: Team, position: Position) -> Self {
        Self {
            kind,
            team,
            position,
        }
    }
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The 32-piece opening arrangement: white on z 0 and 1, black on z 6 and 7.
pub fn standard_layout() -> Vec<LayoutEntry> {
    let mut entries = Vec::with_capacity(32);

    for (team, back, pawns) in [(Team::White, 0, 1), (Team::Black, 7, 6)] {
        // Back rank
        for (x, &kind) in (0u8..).zip(BACK_RANK.iter()) {
            entries.push(LayoutEntry::new(kind, team, Position { x, z: back }));
        }
        // Pawns
        for x in 0..8 {
            entries.push(LayoutEntry::new(PieceKind::Pawn, team, Position { x, z: pawns }));
        }
    }

    entries
}
