use itertools::Itertools;

use crate::error::{Result, ShogiError};
use crate::{Color, Piece, PieceType};

/// Manages the number of each pieces in each player's hand.
///
/// Counts are keyed by color and unpromoted kind. Kings are tracked as well,
/// since an edited position may hold one in hand.
///
/// # Examples
///
/// ```
/// use shogi_kifu::{Hand, Piece};
///
/// let hand = Hand::from_sfen("RB2p").unwrap();
/// assert_eq!(1, hand.get(Piece::from_sfen("R").unwrap()));
/// assert_eq!(2, hand.get(Piece::from_sfen("p").unwrap()));
/// assert_eq!("RB2p", hand.to_sfen());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Hand {
    inner: [u8; 16],
}

impl Hand {
    /// Returns a number of the given piece.
    pub fn get(&self, p: Piece) -> u8 {
        Hand::index(p).map(|i| self.inner[i]).unwrap_or(0)
    }

    /// Sets a number of the given piece. Promoted pieces are ignored.
    pub fn set(&mut self, p: Piece, num: u8) {
        if let Some(i) = Hand::index(p) {
            self.inner[i] = num;
        }
    }

    /// Increments a number of the given piece.
    pub fn increment(&mut self, p: Piece) {
        if let Some(i) = Hand::index(p) {
            self.inner[i] = self.inner[i].saturating_add(1);
        }
    }

    /// Decrements a number of the given piece, failing if none is held.
    pub fn decrement(&mut self, p: Piece) -> Result<()> {
        match Hand::index(p) {
            Some(i) if self.inner[i] > 0 => {
                self.inner[i] -= 1;
                Ok(())
            }
            _ => Err(ShogiError::PieceNotInHand(p)),
        }
    }

    /// Clears all pieces.
    pub fn clear(&mut self) {
        for i in self.inner.iter_mut() {
            *i = 0;
        }
    }

    /// Returns `true` if neither player holds any piece.
    pub fn is_empty(&self) -> bool {
        self.inner.iter().all(|&n| n == 0)
    }

    /// Parses a hands string such as `2PNb`.
    ///
    /// Each letter may be preceded by its count; a missing count means one.
    /// When a letter appears more than once, its first occurrence wins.
    /// `-` and the empty string both mean empty hands.
    pub fn from_sfen(s: &str) -> Result<Hand> {
        let mut hand = Hand::default();
        if s == "-" {
            return Ok(hand);
        }

        let mut seen = [false; 16];
        let mut num_pieces: Option<u32> = None;
        for c in s.chars() {
            match c {
                n if n.is_ascii_digit() => {
                    let n = n.to_digit(10).unwrap_or(0);
                    let count = num_pieces.unwrap_or(0) * 10 + n;
                    if count > u8::MAX as u32 {
                        return Err(ShogiError::MalformedHands(s.to_string()));
                    }
                    num_pieces = Some(count);
                }
                c => {
                    let p = Piece::from_sfen_char(c)
                        .ok_or_else(|| ShogiError::MalformedHands(s.to_string()))?;
                    if let Some(i) = Hand::index(p) {
                        if !seen[i] {
                            seen[i] = true;
                            hand.inner[i] = num_pieces.unwrap_or(1) as u8;
                        }
                    }
                    num_pieces = None;
                }
            }
        }

        if num_pieces.is_some() {
            return Err(ShogiError::MalformedHands(s.to_string()));
        }

        Ok(hand)
    }

    /// Converts the hands into a string, Black's pieces first, in `KRBGSNLP` order.
    ///
    /// Empty hands are written as `-`.
    pub fn to_sfen(&self) -> String {
        let s = Color::iter()
            .flat_map(|color| PieceType::base_kinds().map(move |piece_type| Piece { piece_type, color }))
            .map(|pc| match self.get(pc) {
                0 => String::new(),
                1 => pc.to_string(),
                n => format!("{n}{pc}"),
            })
            .join("");

        if s.is_empty() {
            "-".to_string()
        } else {
            s
        }
    }

    /// Returns the pieces each player holds, as `[black, white]` lists of nonzero counts.
    pub fn split_by_color(&self) -> [Vec<(PieceType, u8)>; 2] {
        [Color::Black, Color::White].map(|color| {
            PieceType::base_kinds()
                .map(|piece_type| (piece_type, self.get(Piece { piece_type, color })))
                .filter(|&(_, n)| n > 0)
                .collect()
        })
    }

    fn index(p: Piece) -> Option<usize> {
        if p.piece_type.is_promoted() {
            return None;
        }

        Some(p.piece_type.index() + p.color.index() * 8)
    }
}
