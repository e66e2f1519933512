//! A library for reading and writing Shogi game records.
//!
//! `shogi_kifu` models a 9×9 Shogi board, generates the squares each piece can
//! reach, and converts between the compact SFEN move notation and the two
//! Japanese record formats, KIF and Ki2.
//! Boards can be deserialized from / serialized to SFEN format.
//! See [USIプロトコルとは (What is the USI protocol?)](http://shogidokoro.starfree.jp/usi.html) for more detail about SFEN format.
//!
//! # Module Organization
//!
//! - **Board model**: `color`, `piece_type`, `piece`, `square`, `hand`, `sfen`, `board`
//! - **Moves**: `moves` for the SFEN move notation, `movegen` for piece geometry
//! - **Records**: `kifu` for the record model and `parser` for KIF and Ki2
//!
//! # Examples
//!
//! ```
//! use shogi_kifu::{Kifu, Move};
//! use shogi_kifu::parser::{export_kif, parse_auto};
//! use shogi_kifu::square::consts::*;
//!
//! // A record can be built from SFEN moves.
//! let kifu = Kifu::from_record(None, None, Some("7g7f 3c3d"), false).unwrap();
//!
//! // Moves can be created programatically as well.
//! let m = Move::Normal { from: SQ_8H, to: SQ_2B, promote: true };
//! let kifu = kifu.produce(m, None).unwrap();
//! assert_eq!("２二角成(88)", kifu.moves()[2].kif);
//!
//! // Records are written in KIF and read back in either format.
//! let parsed = parse_auto(&export_kif(&kifu)).unwrap();
//! assert_eq!(kifu.moves(), parsed.moves());
//!
//! let parsed = parse_auto("▲７六歩 △３四歩 ▲２二角成 △同銀").unwrap();
//! assert_eq!("lnsgkg1nl/1r5s1/pppppp1pp/6p2/9/2P6/PP1PPPPPP/7R1/LNSGKGSNL b Bb", parsed.last_board().to_sfen());
//! ```
#![recursion_limit = "81"]

pub mod board;
pub mod color;
pub mod error;
pub mod hand;
pub mod kifu;
pub mod movegen;
pub mod moves;
pub mod parser;
pub mod piece;
pub mod piece_type;
pub mod sfen;
pub mod square;

pub use self::board::{Board, InitialPosition, PieceGrid};
pub use self::color::Color;
pub use self::error::{ParseError, ShogiError};
pub use self::hand::Hand;
pub use self::kifu::{FinishTrigger, Header, Kifu, KifuMove};
pub use self::moves::Move;
pub use self::piece::Piece;
pub use self::piece_type::PieceType;
pub use self::square::{ParseSquareError, Square};
