use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ShogiError};
use crate::square::{Square, SquareLocator};
use crate::PieceType;

/// Represents a move which either is a normal move or a drop move.
///
/// The string form is `7g7f` for a normal move, `8h2b+` when the piece
/// promotes, and `B*4e` for a drop. The dropped kind is always written in
/// uppercase; its owner is the side to move.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Move {
    Normal {
        from: Square,
        to: Square,
        promote: bool,
    },
    Drop {
        to: Square,
        piece_type: PieceType,
    },
}

impl Move {
    /// Creates a normal move. Both ends are given as the same kind of locator.
    ///
    /// # Examples
    ///
    /// ```
    /// use shogi_kifu::Move;
    ///
    /// assert_eq!("2a2b", Move::normal(7usize, 16usize, false).unwrap().to_string());
    /// assert_eq!("8h2b+", Move::normal((8u8, 8u8), (2u8, 2u8), true).unwrap().to_string());
    /// assert!(Move::normal(7usize, 81usize, false).is_err());
    /// ```
    pub fn normal<L: SquareLocator>(from: L, to: L, promote: bool) -> Result<Move> {
        Ok(Move::Normal {
            from: from.to_square()?,
            to: to.to_square()?,
            promote,
        })
    }

    /// Creates a drop move of an unpromoted kind.
    pub fn drop<L: SquareLocator>(piece_type: PieceType, to: L) -> Result<Move> {
        if !piece_type.is_hand_piece() {
            return Err(ShogiError::InvalidDrop(format!(
                "{} cannot be dropped",
                piece_type.to_string().to_uppercase()
            )));
        }

        Ok(Move::Drop {
            to: to.to_square()?,
            piece_type,
        })
    }

    /// Creates a new instance of `Move` from SFEN formatted string.
    pub fn from_sfen(s: &str) -> Option<Move> {
        if is_board_move_string(s) {
            let from = Square::from_sfen(&s[0..2])?;
            let to = Square::from_sfen(&s[2..4])?;
            return Some(Move::Normal {
                from,
                to,
                promote: s.len() == 5,
            });
        }

        if is_drop_move_string(s) {
            let piece_type = s.chars().next().and_then(|c| PieceType::from_sfen(c.to_ascii_lowercase()))?;
            let to = Square::from_sfen(&s[2..4])?;
            return Some(Move::Drop { to, piece_type });
        }

        None
    }

    /// Returns the destination square.
    pub fn to(&self) -> Square {
        match *self {
            Move::Normal { to, .. } => to,
            Move::Drop { to, .. } => to,
        }
    }

    pub fn is_drop(&self) -> bool {
        matches!(self, Move::Drop { .. })
    }
}

/// Returns `true` if the string is a square such as `1a`.
///
/// # Examples
///
/// ```
/// use shogi_kifu::moves::is_point_selector;
///
/// assert!(is_point_selector("1a"));
/// assert!(!is_point_selector("0a"));
/// assert!(!is_point_selector("1a2b3c"));
/// ```
pub fn is_point_selector(s: &str) -> bool {
    Square::from_sfen(s).is_some()
}

/// Returns `true` if the string is a normal move such as `1a2b` or `1a2b+`.
pub fn is_board_move_string(s: &str) -> bool {
    let promote_suffix = match s.len() {
        4 => true,
        5 => s.ends_with('+'),
        _ => false,
    };

    promote_suffix && s.is_char_boundary(2) && s.is_char_boundary(4) && is_point_selector(&s[0..2]) && is_point_selector(&s[2..4])
}

/// Returns `true` if the string is a drop such as `B*5c`.
pub fn is_drop_move_string(s: &str) -> bool {
    let bytes = s.as_bytes();

    bytes.len() == 4
        && bytes[0].is_ascii_uppercase()
        && PieceType::from_sfen(bytes[0].to_ascii_lowercase() as char).is_some()
        && bytes[1] == b'*'
        && is_point_selector(&s[2..4])
}

/// Returns `true` if the string is either form of move.
pub fn is_move_string(s: &str) -> bool {
    is_board_move_string(s) || is_drop_move_string(s)
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Move::Normal { from, to, promote } => {
                write!(f, "{}{}{}", from, to, if promote { "+" } else { "" })
            }
            Move::Drop { to, piece_type } => {
                write!(f, "{}*{}", piece_type.to_string().to_uppercase(), to)
            }
        }
    }
}

impl FromStr for Move {
    type Err = ShogiError;

    /// Parses a move from SFEN notation.
    ///
    /// # Examples
    ///
    /// ```
    /// use shogi_kifu::Move;
    /// use shogi_kifu::square::consts::*;
    ///
    /// let mv: Move = "7g7f".parse().unwrap();
    /// assert!(matches!(mv, Move::Normal { from: SQ_7G, to: SQ_7F, promote: false }));
    ///
    /// let mv: Move = "7g7f+".parse().unwrap();
    /// assert!(matches!(mv, Move::Normal { from: SQ_7G, to: SQ_7F, promote: true }));
    /// ```
    fn from_str(s: &str) -> Result<Move> {
        Move::from_sfen(s).ok_or_else(|| ShogiError::InvalidMoveToken(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::consts::*;

    #[test]
    fn from_sfen() {
        let ok_cases = [
            (
                "9a1i",
                Move::Normal {
                    from: SQ_9A,
                    to: SQ_1I,
                    promote: false,
                },
            ),
            (
                "9a1i+",
                Move::Normal {
                    from: SQ_9A,
                    to: SQ_1I,
                    promote: true,
                },
            ),
            (
                "S*5e",
                Move::Drop {
                    to: SQ_5E,
                    piece_type: PieceType::Silver,
                },
            ),
            (
                "K*3c",
                Move::Drop {
                    to: SQ_3C,
                    piece_type: PieceType::King,
                },
            ),
        ];
        let ng_cases = [
            "9j1i", "9a1j", "9a1", "9aj", "j1i", "9a1i1", "9a1i-", "S+5e", "S 5e", "Z*5e", "S+9j",
            "s*5e", "S*5e+", "", "歩*5e", "７六歩",
        ];

        for (i, case) in ok_cases.iter().enumerate() {
            let m = Move::from_sfen(case.0);
            assert_eq!(Some(case.1), m, "failed at #{i}");
            assert_eq!(case.0, case.1.to_string(), "failed at #{i}");
        }

        for (i, case) in ng_cases.iter().enumerate() {
            assert!(Move::from_sfen(case).is_none(), "failed at #{i}");
            assert!(
                matches!(case.parse::<Move>(), Err(ShogiError::InvalidMoveToken(_))),
                "failed at #{i}"
            );
        }
    }

    #[test]
    fn validators() {
        assert!(is_point_selector("1a"));
        assert!(!is_point_selector("0a"));
        assert!(!is_point_selector("2x"));
        assert!(!is_point_selector("1a2b3c"));

        assert!(is_board_move_string("1a2b"));
        assert!(is_board_move_string("1a2b+"));
        assert!(!is_board_move_string("0a0b+"));
        assert!(!is_board_move_string("1a2x"));
        assert!(!is_board_move_string("B*5c"));

        assert!(is_drop_move_string("B*5c"));
        assert!(!is_drop_move_string("b*5c"));
        assert!(!is_drop_move_string(""));
        assert!(!is_drop_move_string("1a2b"));

        assert!(is_move_string("1a2b+"));
        assert!(is_move_string("G*1i"));
        assert!(!is_move_string(""));
        assert!(!is_move_string("1a2b++"));
    }

    #[test]
    fn constructors() {
        assert_eq!("2a2b", Move::normal(7usize, 16usize, false).unwrap().to_string());
        assert_eq!("7g7f", Move::normal((7u8, 7u8), (7u8, 6u8), false).unwrap().to_string());
        assert_eq!("7g7f", Move::normal(SQ_7G, SQ_7F, false).unwrap().to_string());
        assert!(matches!(Move::normal((0u8, 1u8), (1u8, 1u8), false), Err(ShogiError::OutOfBounds(_))));

        assert_eq!("B*4e", Move::drop(PieceType::Bishop, (4u8, 5u8)).unwrap().to_string());
        assert!(matches!(Move::drop(PieceType::ProBishop, 40usize), Err(ShogiError::InvalidDrop(_))));
    }

    #[test]
    fn destination() {
        assert_eq!(SQ_2B, "8h2b+".parse::<Move>().unwrap().to());
        assert_eq!(SQ_4E, "B*4e".parse::<Move>().unwrap().to());
        assert!("B*4e".parse::<Move>().unwrap().is_drop());
    }
}
