use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, debug_span, trace, warn};

use crate::board::{Board, BoardError};
use crate::config::RulesConfig;
use crate::field::Field;
use crate::move_gen::{self, CastlingRights, DetectCheck, PlyContext};
use crate::moves::Move;
use crate::piece::{Color, Piece, PieceKind};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("no piece at {0}")]
    NoPieceAt(Field),

    #[error("piece at {field} is {found}, but {expected} is to move")]
    WrongColor {
        field: Field,
        expected: Color,
        found: Color,
    },

    #[error("illegal move {0}")]
    IllegalMove(Move),

    #[error("move {from}{to} promotes, a piece kind is required")]
    AmbiguousPromotion { from: Field, to: Field },

    #[error("move {from}{to} does not promote")]
    UnexpectedPromotion { from: Field, to: Field },

    #[error("game is already finished")]
    GameFinished,

    #[error("game record holds no states")]
    EmptyRecord,

    #[error(transparent)]
    Board(#[from] BoardError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    Repetition,
}

impl GameStatus {
    pub fn is_finished(self) -> bool {
        self != GameStatus::Ongoing
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }
}

/// One immutable game state. Every ply produces a new `Game` pointing at its predecessor,
/// so earlier states stay valid and are shared between all of their successors.
///
/// Serialised as a flat [`GameRecord`], so the depth of the output does not grow with the game.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(into = "GameRecord", try_from = "GameRecord")]
pub struct Game {
    color: Color,
    board: Board,
    last_move: Option<Move>,
    previous: Option<Arc<Game>>,
    config: RulesConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RecordedState {
    pub color: Color,
    pub board: Board,
    pub last_move: Option<Move>,
}

/// Every state of a game, oldest first. The config is the one of the latest state.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameRecord {
    pub config: RulesConfig,
    pub states: Vec<RecordedState>,
}

impl From<Game> for GameRecord {
    fn from(game: Game) -> Self {
        let mut states: Vec<RecordedState> = std::iter::once(&game)
            .chain(game.ancestors())
            .map(|state| RecordedState {
                color: state.color,
                board: state.board,
                last_move: state.last_move,
            })
            .collect();
        states.reverse();
        GameRecord {
            config: game.config.clone(),
            states,
        }
    }
}

impl TryFrom<GameRecord> for Game {
    type Error = GameError;

    fn try_from(record: GameRecord) -> Result<Self, Self::Error> {
        let mut states = record.states.into_iter();
        let first = states.next().ok_or(GameError::EmptyRecord)?;
        let mut game = Game {
            color: first.color,
            board: first.board,
            last_move: first.last_move,
            previous: None,
            config: record.config.clone(),
        };
        for state in states {
            game = Game {
                color: state.color,
                board: state.board,
                last_move: state.last_move,
                previous: Some(Arc::new(game)),
                config: record.config.clone(),
            };
        }
        Ok(game)
    }
}

impl Game {
    pub fn new() -> Self {
        Game::from_board(Color::White, Board::start())
    }

    /// A game with no history starting from an arbitrary placement.
    pub fn from_board(color: Color, board: Board) -> Self {
        Self {
            color,
            board,
            last_move: None,
            previous: None,
            config: RulesConfig::default(),
        }
    }

    /// Rules used by this game and every successor created from it.
    pub fn with_config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn previous(&self) -> Option<&Game> {
        self.previous.as_deref()
    }

    /// Prior states, oldest first. The current state is not included.
    pub fn history(&self) -> Vec<&Game> {
        let mut history: Vec<&Game> = self.ancestors().collect();
        history.reverse();
        history
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    fn ancestors(&self) -> impl Iterator<Item = &Game> + '_ {
        std::iter::successors(self.previous.as_deref(), |game| game.previous.as_deref())
    }

    /// The current board followed by every earlier one.
    fn boards(&self) -> impl Iterator<Item = &Board> + '_ {
        std::iter::once(&self.board).chain(self.ancestors().map(|game| &game.board))
    }

    /// A side may castle towards a rook when neither the king nor that rook ever left
    /// their home fields.
    pub fn castling_rights(&self, color: Color) -> CastlingRights {
        let row = color.first_row();
        let stayed = |col: i8, kind: PieceKind| {
            let field = Field::from_coords(col, row);
            let piece = Piece::new(kind, color);
            self.boards().all(|board| board.get(field) == Some(piece))
        };
        if !stayed(5, PieceKind::King) {
            return CastlingRights::NONE;
        }
        CastlingRights {
            king_side: stayed(8, PieceKind::Rook),
            queen_side: stayed(1, PieceKind::Rook),
        }
    }

    fn ply_context(&self) -> PlyContext<'_> {
        PlyContext {
            board: &self.board,
            color: self.color,
            last_move: self.last_move,
            castling: self.castling_rights(self.color),
        }
    }

    pub fn pseudo_legal_moves(&self) -> Vec<Move> {
        move_gen::gen_pseudo_legal_moves(&self.ply_context(), &self.config.check_detection)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        let _span = debug_span!("legal_moves", color = %self.color).entered();
        move_gen::filter_legal(
            &self.board,
            self.color,
            self.pseudo_legal_moves(),
            &self.config.check_detection,
            self.config.threads(),
        )
    }

    fn successor(&self, parent: &Arc<Game>, mve: Move) -> Result<Game, BoardError> {
        Ok(Game {
            color: self.color.other(),
            board: self.board.apply(&mve)?,
            last_move: Some(mve),
            previous: Some(Arc::clone(parent)),
            config: self.config.clone(),
        })
    }

    fn successors(&self, moves: Vec<Move>) -> Vec<Game> {
        let parent = Arc::new(self.clone());
        moves
            .into_iter()
            .filter_map(|mve| match self.successor(&parent, mve) {
                Ok(next) => Some(next),
                Err(err) => {
                    trace!(?mve, %err, "successor does not apply");
                    None
                }
            })
            .collect()
    }

    /// A successor for every pseudo-legal move, including those leaving the king in check.
    pub fn next_games(&self) -> Vec<Game> {
        self.successors(self.pseudo_legal_moves())
    }

    pub fn valid_games(&self) -> Vec<Game> {
        self.successors(self.legal_moves())
    }

    pub fn is_king_under_check(&self) -> bool {
        self.config.check_detection.is_king_under_check(&self.board, self.color)
    }

    /// Whether the side that just moved has left its own king attacked.
    pub fn is_other_king_under_check(&self) -> bool {
        self.config
            .check_detection
            .is_king_under_check(&self.board, self.color.other())
    }

    pub fn is_checkmate(&self) -> bool {
        self.legal_moves().is_empty() && self.is_king_under_check()
    }

    pub fn is_stalemate(&self) -> bool {
        self.legal_moves().is_empty() && !self.is_king_under_check()
    }

    /// Neither side can mate: bare kings, kings with one minor piece, or kings with two
    /// knights of one color.
    pub fn is_insufficient_material(&self) -> bool {
        if !self.config.insufficient_material {
            return false;
        }
        if Color::iter().any(|color| self.board.king_field(color).is_none()) {
            return false;
        }

        let rest: Vec<Piece> = self
            .board
            .pieces()
            .map(|(_, piece)| piece)
            .filter(|piece| piece.kind != PieceKind::King)
            .collect();
        match rest.as_slice() {
            [] => true,
            [piece] => piece.kind.is_minor(),
            [first, second] => {
                first.kind == PieceKind::Knight && second.kind == PieceKind::Knight && first.color == second.color
            }
            _ => false,
        }
    }

    /// The current board has occurred `repetition_limit` times, counting itself.
    pub fn is_repetition(&self) -> bool {
        let limit = self.config.repetition_limit;
        limit > 0 && self.boards().filter(|&board| *board == self.board).count() >= limit
    }

    fn status_with(&self, legal: &[Move]) -> GameStatus {
        if legal.is_empty() {
            if self.is_king_under_check() {
                GameStatus::Checkmate {
                    winner: self.color.other(),
                }
            } else {
                GameStatus::Stalemate
            }
        } else if self.is_insufficient_material() {
            GameStatus::InsufficientMaterial
        } else if self.is_repetition() {
            GameStatus::Repetition
        } else {
            GameStatus::Ongoing
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status_with(&self.legal_moves())
    }

    pub fn is_game_finished(&self) -> bool {
        self.status().is_finished()
    }

    pub fn winner(&self) -> Option<Color> {
        self.status().winner()
    }

    /// Legal moves of the current position once the game is known to be running and `from`
    /// holds a piece of the side to move. A finished game rejects every request alike.
    fn checked_request(&self, from: Field) -> Result<Vec<Move>, GameError> {
        let legal = self.legal_moves();
        if self.status_with(&legal).is_finished() {
            return Err(GameError::GameFinished);
        }

        let piece = self.board.get(from).ok_or(GameError::NoPieceAt(from))?;
        if piece.color != self.color {
            return Err(GameError::WrongColor {
                field: from,
                expected: self.color,
                found: piece.color,
            });
        }
        Ok(legal)
    }

    fn transition(&self, mve: Move) -> Result<Game, GameError> {
        let parent = Arc::new(self.clone());
        let next = self.successor(&parent, mve)?;
        debug!(%mve, color = %self.color, "applied move");
        Ok(next)
    }

    /// Plays `mve` if it is one of the legal moves of the position.
    pub fn apply(&self, mve: Move) -> Result<Game, GameError> {
        let legal = self.checked_request(mve.from()).map_err(rejected)?;
        if !legal.contains(&mve) {
            return Err(rejected(GameError::IllegalMove(mve)));
        }
        self.transition(mve)
    }

    /// Plays the legal move going from `from` to `to`. `promotion` must name the new piece
    /// exactly when the move promotes a pawn.
    pub fn play(&self, from: Field, to: Field, promotion: Option<PieceKind>) -> Result<Game, GameError> {
        self.resolve(from, to, promotion)
            .map_err(rejected)
            .and_then(|mve| self.transition(mve))
    }

    fn resolve(&self, from: Field, to: Field, promotion: Option<PieceKind>) -> Result<Move, GameError> {
        let candidates: Vec<Move> = self
            .checked_request(from)?
            .into_iter()
            .filter(|mve| mve.from() == from && mve.to() == to)
            .collect();

        let Some(first) = candidates.first().copied() else {
            let requested = match promotion {
                Some(kind) => Move::with_promotion(from, to, Piece::new(kind, self.color)),
                None => Move::new(from, to),
            };
            return Err(GameError::IllegalMove(requested));
        };

        match (first.promotion(), promotion) {
            (Some(_), None) => Err(GameError::AmbiguousPromotion { from, to }),
            (None, Some(_)) => Err(GameError::UnexpectedPromotion { from, to }),
            (None, None) => Ok(first),
            (Some(_), Some(kind)) => candidates
                .into_iter()
                .find(|mve| mve.promotion().map(|piece| piece.kind) == Some(kind))
                .ok_or(GameError::IllegalMove(Move::with_promotion(
                    from,
                    to,
                    Piece::new(kind, self.color),
                ))),
        }
    }
}

fn rejected(err: GameError) -> GameError {
    warn!(%err, "move request rejected");
    err
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last_move {
            None => writeln!(f, "{} to begin:", self.color)?,
            Some(mve) => writeln!(f, "Last move: {} {} to {}", self.color.other(), mve.from(), mve.to())?,
        }
        write!(f, "{}", self.board)
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("color", &self.color)
            .field("last_move", &self.last_move)
            .field("plies", &self.ancestors().count())
            .field("board", &self.board)
            .finish()
    }
}
