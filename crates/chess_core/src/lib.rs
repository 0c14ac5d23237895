// Core chess rule modules
pub mod board;
pub mod error;
pub mod layout;
pub mod moves;
pub mod piece;
pub mod position;
pub mod session;

// Re-export main types for convenience
pub use board::Board;
pub use error::{ChessError, ChessResult};
pub use layout::{standard_layout, LayoutEntry};
pub use moves::{Move, MoveType};
pub use piece::{Piece, PieceId, PieceKind, Team};
pub use position::Position;
pub use session::{BoardClick, ClickOutcome, GameSession, SessionSnapshot};
