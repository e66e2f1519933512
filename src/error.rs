//! Error types of the board model and the record parsers.

use crate::{Piece, Square};

/// Represents an error occurred while decoding a position or applying a move.
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum ShogiError {
    #[error("malformed board string: {0}")]
    MalformedBoard(String),

    #[error("malformed hands string: {0}")]
    MalformedHands(String),

    #[error("invalid move token: {0}")]
    InvalidMoveToken(String),

    #[error("out of bounds: {0}")]
    OutOfBounds(String),

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("invalid drop: {0}")]
    InvalidDrop(String),

    #[error("{0} cannot be promoted here")]
    InvalidPromotion(Piece),

    #[error("{0} has no promoted form")]
    NotPromotable(Piece),

    #[error("{0} does not exist in hand")]
    PieceNotInHand(Piece),

    #[error("index {index} exceeds the record length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, ShogiError>;

/// Represents an error occurred while reading a KIF or Ki2 record.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("cannot find the start of the move section")]
    NoMoveSectionFound,

    #[error("cannot determine which piece moved at move #{ordinal}: {token}")]
    AmbiguousMove { ordinal: usize, token: String },

    #[error("piece for the drop at move #{ordinal} is not in hand: {token}")]
    PieceNotInHand { ordinal: usize, token: String },

    #[error("invalid move token at move #{ordinal}: {token}")]
    InvalidMoveToken { ordinal: usize, token: String },

    #[error("error occurred during the parse of `{line}`: {source}")]
    Line {
        line: String,
        #[source]
        source: ShogiError,
    },

    #[error("error occurred during the parse of move #{ordinal}: {source}")]
    Move {
        ordinal: usize,
        #[source]
        source: ShogiError,
    },

    #[error("record is neither KIF nor Ki2\n  as KIF: {kif}\n  as Ki2: {ki2}")]
    Unrecognized {
        kif: Box<ParseError>,
        ki2: Box<ParseError>,
    },
}
