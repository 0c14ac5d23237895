use crate::{Board, Piece, PieceId, Position};

pub const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const QUEEN_DIRS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const KING_OFFSETS: [(i8, i8); 8] = QUEEN_DIRS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveType {
    Quiet,
    Capture,
}

/// A completed move, as recorded by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub piece: PieceId,
    pub from: Position,
    pub to: Position,
    pub move_type: MoveType,
    /// The opposing piece removed by this move, if any.
    pub captured: Option<Piece>,
}

impl Move {
    pub fn is_capture(&self) -> bool {
        self.move_type == MoveType::Capture
    }
}

/// One step forward onto an empty cell, or one step forward-diagonal onto an
/// opposing piece.
pub(crate) fn pawn_moves(piece: &Piece, board: &Board) -> Vec<Position> {
    let forward = piece.team.forward();
    let mut moves = Vec::new();

    if let Some(ahead) = piece.position.offset(0, forward) {
        if board.get_piece(ahead).is_none() {
            moves.push(ahead);
        }
    }

    for dx in [-1, 1] {
        if let Some(diagonal) = piece.position.offset(dx, forward) {
            if board.holds_opponent_of(diagonal, piece) {
                moves.push(diagonal);
            }
        }
    }

    moves
}

/// Walks each ray until the edge or the first occupied cell. That cell is a
/// destination only when it holds an opposing piece.
pub(crate) fn slide_moves(piece: &Piece, board: &Board, dirs: &[(i8, i8)]) -> Vec<Position> {
    let mut moves = Vec::new();

    for &(dx, dz) in dirs {
        let mut current = piece.position;
        while let Some(next) = current.offset(dx, dz) {
            match board.get_piece(next) {
                None => moves.push(next),
                Some(other) => {
                    if other.is_opponent_of(piece) {
                        moves.push(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }

    moves
}

pub(crate) fn step_moves(piece: &Piece, board: &Board, offsets: &[(i8, i8)]) -> Vec<Position> {
    offsets
        .iter()
        .filter_map(|&(dx, dz)| piece.position.offset(dx, dz))
        .filter(|&target| match board.get_piece(target) {
            None => true,
            Some(other) => other.is_opponent_of(piece),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::{Board, Piece, PieceId, PieceKind, Position, Team};

    fn pos(x: u8, z: u8) -> Position {
        Position::new(x, z).unwrap()
    }

    fn moves_of(board: &Board, id: PieceId) -> Vec<Position> {
        board.legal_moves(id).unwrap()
    }

    #[test]
    fn rook_stops_on_opposing_piece() {
        let mut board = Board::new();
        let rook = board.add_piece(PieceKind::Rook, Team::White, pos(0, 0)).unwrap();
        board.add_piece(PieceKind::Pawn, Team::Black, pos(0, 3)).unwrap();

        let moves = moves_of(&board, rook);
        assert!(moves.contains(&pos(0, 1)));
        assert!(moves.contains(&pos(0, 2)));
        assert!(moves.contains(&pos(0, 3)));
        assert!(!moves.contains(&pos(0, 4)));
        // the horizontal ray is open to the edge
        assert!(moves.contains(&pos(7, 0)));
        assert_eq!(moves.len(), 3 + 7);
    }

    #[test]
    fn rook_blocked_by_friendly_piece() {
        let mut board = Board::new();
        let rook = board.add_piece(PieceKind::Rook, Team::White, pos(0, 0)).unwrap();
        board.add_piece(PieceKind::Pawn, Team::White, pos(0, 3)).unwrap();

        let moves = moves_of(&board, rook);
        assert!(moves.contains(&pos(0, 1)));
        assert!(moves.contains(&pos(0, 2)));
        assert!(!moves.contains(&pos(0, 3)));
        assert!(!moves.contains(&pos(0, 4)));
    }

    #[test]
    fn bishop_slides_diagonally() {
        let mut board = Board::new();
        let bishop = board.add_piece(PieceKind::Bishop, Team::Black, pos(2, 2)).unwrap();
        board.add_piece(PieceKind::Knight, Team::White, pos(4, 4)).unwrap();
        board.add_piece(PieceKind::Knight, Team::Black, pos(1, 1)).unwrap();

        let moves = moves_of(&board, bishop);
        assert!(moves.contains(&pos(3, 3)));
        assert!(moves.contains(&pos(4, 4)));
        assert!(!moves.contains(&pos(5, 5)));
        assert!(!moves.contains(&pos(1, 1)));
        assert!(moves.contains(&pos(0, 4)));
        assert!(moves.contains(&pos(4, 0)));
        assert!(moves.iter().all(|m| m.x != 2 && m.z != 2));
    }

    #[test]
    fn pawn_captures_only_diagonally() {
        let mut board = Board::new();
        let pawn = board.add_piece(PieceKind::Pawn, Team::White, pos(3, 3)).unwrap();
        board.add_piece(PieceKind::Pawn, Team::Black, pos(4, 4)).unwrap();

        let moves = moves_of(&board, pawn);
        assert!(moves.contains(&pos(3, 4)));
        assert!(moves.contains(&pos(4, 4)));
        assert!(!moves.contains(&pos(2, 4)));
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn black_pawn_captures_toward_lower_ranks() {
        let mut board = Board::new();
        let pawn = board.add_piece(PieceKind::Pawn, Team::Black, pos(3, 3)).unwrap();
        board.add_piece(PieceKind::Knight, Team::White, pos(2, 2)).unwrap();
        // nothing to capture on the other diagonal, or behind
        board.add_piece(PieceKind::Knight, Team::White, pos(4, 4)).unwrap();

        let mut moves = moves_of(&board, pawn);
        moves.sort_by_key(|p| p.x);
        assert_eq!(moves, vec![pos(2, 2), pos(3, 2)]);
    }

    #[test]
    fn pawn_on_the_far_rank_has_no_forward_move() {
        let mut board = Board::new();
        let white = board.add_piece(PieceKind::Pawn, Team::White, pos(2, 7)).unwrap();
        let black = board.add_piece(PieceKind::Pawn, Team::Black, pos(5, 0)).unwrap();

        assert!(moves_of(&board, white).is_empty());
        assert!(moves_of(&board, black).is_empty());
    }

    #[test]
    fn stray_piece_off_the_board_has_no_moves() {
        let board = Board::new();
        for kind in PieceKind::ALL {
            let stray = Piece::new(PieceId(0), kind, Team::White, Position { x: 127, z: 0 });
            assert!(stray.legal_moves(&board).is_empty(), "{kind:?}");
        }
    }

    #[test]
    fn pawn_is_blocked_straight_ahead() {
        let mut board = Board::new();
        let pawn = board.add_piece(PieceKind::Pawn, Team::Black, pos(5, 5)).unwrap();
        board.add_piece(PieceKind::Pawn, Team::White, pos(5, 4)).unwrap();
        board.add_piece(PieceKind::Rook, Team::Black, pos(6, 4)).unwrap();

        assert!(moves_of(&board, pawn).is_empty());
    }

    #[test]
    fn pawn_never_double_steps() {
        let mut board = Board::new();
        let pawn = board.add_piece(PieceKind::Pawn, Team::White, pos(0, 1)).unwrap();

        assert_eq!(moves_of(&board, pawn), vec![pos(0, 2)]);
    }

    #[test]
    fn knight_has_eight_moves_in_the_centre() {
        let mut board = Board::new();
        let knight = board.add_piece(PieceKind::Knight, Team::White, pos(4, 4)).unwrap();

        let moves = moves_of(&board, knight);
        assert_eq!(moves.len(), 8);
        for (dx, dz) in super::KNIGHT_OFFSETS {
            let target = pos((4 + dx) as u8, (4 + dz) as u8);
            assert!(moves.contains(&target), "missing {target}");
        }
    }

    #[test]
    fn knight_skips_friendly_cells_and_edges() {
        let mut board = Board::new();
        let knight = board.add_piece(PieceKind::Knight, Team::White, pos(0, 0)).unwrap();
        board.add_piece(PieceKind::Pawn, Team::White, pos(1, 2)).unwrap();
        board.add_piece(PieceKind::Pawn, Team::Black, pos(2, 1)).unwrap();

        assert_eq!(moves_of(&board, knight), vec![pos(2, 1)]);
    }

    #[test]
    fn queen_combines_rook_and_bishop() {
        let mut board = Board::new();
        let queen = board.add_piece(PieceKind::Queen, Team::White, pos(3, 3)).unwrap();

        assert_eq!(moves_of(&board, queen).len(), 14 + 13);
    }

    #[test]
    fn king_steps_once_in_any_direction() {
        let mut board = Board::new();
        let king = board.add_piece(PieceKind::King, Team::Black, pos(4, 7)).unwrap();
        board.add_piece(PieceKind::Pawn, Team::Black, pos(4, 6)).unwrap();
        board.add_piece(PieceKind::Pawn, Team::White, pos(5, 6)).unwrap();

        let mut moves = moves_of(&board, king);
        moves.sort_by_key(|p| (p.x, p.z));
        assert_eq!(moves, vec![pos(3, 6), pos(3, 7), pos(5, 6), pos(5, 7)]);
    }
}
