pub mod bitboard;
pub mod board;
pub mod config;
pub mod field;
pub mod game;
pub mod move_gen;
pub mod moves;
pub mod perft;
pub mod piece;

pub use bitboard::BitBoard;
pub use board::{Board, BoardError};
pub use config::{CheckDetection, RulesConfig};
pub use field::{Field, FieldError};
pub use game::{Game, GameError, GameRecord, GameStatus, RecordedState};
pub use move_gen::{CastlingRights, DetectCheck};
pub use moves::Move;
pub use perft::{perft, PerftDepthResult, PerftResult};
pub use piece::{Color, Piece, PieceError, PieceKind};
