use std::fmt;

pub const BOARD_SIZE: u8 = 8;

/// A cell on the 8x8 board. `x` runs along the files, `z` along the ranks
/// (white starts on z 0 and 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: u8,
    pub z: u8,
}

impl Position {
    pub fn new(x: u8, z: u8) -> Option<Self> {
        if x < BOARD_SIZE && z < BOARD_SIZE {
            Some(Self { x, z })
        } else {
            None
        }
    }

    pub fn is_on_board(&self) -> bool {
        self.x < BOARD_SIZE && self.z < BOARD_SIZE
    }

    /// Steps by `(dx, dz)`, returning `None` when the result leaves the board.
    pub fn offset(&self, dx: i8, dz: i8) -> Option<Self> {
        let x = self.x.checked_add_signed(dx)?;
        let z = self.z.checked_add_signed(dz)?;
        Self::new(x, z)
    }

    pub fn from_algebraic(notation: &str) -> Option<Self> {
        let mut chars = notation.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }

        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }

        Some(Self {
            x: (file as u8) - b'a',
            z: (rank as u8) - b'1',
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            write!(f, "{}{}", (b'a' + self.x) as char, self.z + 1)
        } else {
            write!(f, "({}, {})", self.x, self.z)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_off_board() {
        assert!(Position::new(0, 0).is_some());
        assert!(Position::new(7, 7).is_some());
        assert!(Position::new(8, 0).is_none());
        assert!(Position::new(0, 8).is_none());
    }

    #[test]
    fn offset_stays_on_board() {
        let corner = Position::new(0, 0).unwrap();
        assert_eq!(corner.offset(1, 2), Position::new(1, 2));
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(Position::new(7, 7).unwrap().offset(0, 1), None);
    }

    #[test]
    fn offset_from_far_off_board_does_not_overflow() {
        let stray = Position { x: 127, z: 0 };
        assert_eq!(stray.offset(1, 0), None);
        assert_eq!(Position { x: 255, z: 255 }.offset(1, 1), None);
        assert_eq!(Position { x: 200, z: 3 }.offset(-1, 0), None);
    }

    #[test]
    fn algebraic_notation() {
        assert_eq!(Position::from_algebraic("a1"), Position::new(0, 0));
        assert_eq!(Position::from_algebraic("e4"), Position::new(4, 3));
        assert_eq!(Position::from_algebraic("h8"), Position::new(7, 7));
        assert_eq!(Position::from_algebraic("i1"), None);
        assert_eq!(Position::from_algebraic("a9"), None);
        assert_eq!(Position::from_algebraic("a10"), None);
        assert_eq!(Position::new(4, 3).unwrap().to_string(), "e4");
        assert_eq!(Position { x: 9, z: 1 }.to_string(), "(9, 1)");
    }
}
