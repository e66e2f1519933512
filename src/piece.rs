use std::fmt;

use crate::error::{Result, ShogiError};
use crate::{Color, PieceType};

/// Represents a piece on the game board.
///
/// # Examples
///
/// ```
/// use shogi_kifu::{Color, Piece, PieceType};
///
/// let pc = Piece::from_sfen("+r").unwrap();
/// assert_eq!(PieceType::ProRook, pc.piece_type);
/// assert_eq!(Color::White, pc.color);
/// assert_eq!("+R", pc.flip().to_string());
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    /// Creates a new instance of `Piece` from a single SFEN letter.
    ///
    /// Uppercase letters are Black pieces, lowercase letters are White pieces.
    pub fn from_sfen_char(c: char) -> Option<Piece> {
        let color = if c.is_ascii_uppercase() {
            Color::Black
        } else {
            Color::White
        };

        PieceType::from_sfen(c.to_ascii_lowercase()).map(|piece_type| Piece { piece_type, color })
    }

    /// Creates a new instance of `Piece` from a SFEN token such as `p`, `P` or `+P`.
    pub fn from_sfen(s: &str) -> Option<Piece> {
        let mut chars = s.chars();

        match (chars.next(), chars.next(), chars.next()) {
            (Some(c), None, None) => Piece::from_sfen_char(c),
            (Some('+'), Some(c), None) => {
                let pc = Piece::from_sfen_char(c)?;
                pc.piece_type.promote().map(|piece_type| Piece {
                    piece_type,
                    color: pc.color,
                })
            }
            _ => None,
        }
    }

    /// Returns `true` if the piece is one of the promoted forms.
    pub fn is_promoted(&self) -> bool {
        self.piece_type.is_promoted()
    }

    /// Returns an instance which has the same type but the opposite color.
    #[must_use]
    pub fn flip(&self) -> Piece {
        Piece {
            piece_type: self.piece_type,
            color: self.color.flip(),
        }
    }

    /// Returns the promoted form of the piece.
    ///
    /// An already promoted piece is returned as-is. King and gold fail with `NotPromotable`.
    pub fn promote(&self) -> Result<Piece> {
        if !self.piece_type.is_promotable_kind() {
            return Err(ShogiError::NotPromotable(*self));
        }

        Ok(Piece {
            piece_type: self.piece_type.promote().unwrap_or(self.piece_type),
            color: self.color,
        })
    }

    /// Returns the unpromoted form of the piece.
    ///
    /// An unpromoted piece is returned as-is. King and gold fail with `NotPromotable`.
    pub fn demote(&self) -> Result<Piece> {
        if !self.piece_type.is_promotable_kind() {
            return Err(ShogiError::NotPromotable(*self));
        }

        Ok(self.unpromoted())
    }

    /// Returns the unpromoted form, leaving king and gold untouched.
    #[must_use]
    pub fn unpromoted(&self) -> Piece {
        Piece {
            piece_type: self.piece_type.base(),
            color: self.color,
        }
    }

    /// Enumerates every piece an editor can cycle this piece through.
    ///
    /// The order is White, Black, promoted White, promoted Black. King and gold
    /// yield only the first two.
    ///
    /// # Examples
    ///
    /// ```
    /// use shogi_kifu::Piece;
    ///
    /// let pc = Piece::from_sfen("P").unwrap();
    /// let names: Vec<String> = pc.variants().iter().map(|p| p.to_string()).collect();
    /// assert_eq!(vec!["p", "P", "+p", "+P"], names);
    /// ```
    pub fn variants(&self) -> Vec<Piece> {
        let base = self.unpromoted();
        let white = Piece {
            color: Color::White,
            ..base
        };
        let black = Piece {
            color: Color::Black,
            ..base
        };

        match base.piece_type.promote() {
            Some(piece_type) => vec![
                white,
                black,
                Piece { piece_type, ..white },
                Piece { piece_type, ..black },
            ],
            None => vec![white, black],
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.color == Color::Black {
            write!(f, "{}", self.piece_type.to_string().to_uppercase())
        } else {
            write!(f, "{}", self.piece_type)
        }
    }
}
