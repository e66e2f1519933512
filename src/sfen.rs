//! SFEN (Shogi Forsyth-Edwards Notation) board codec.
//!
//! The board part of a SFEN string lists the nine ranks from rank 1 to rank 9,
//! separated by `/`. Each rank is read from file 9 to file 1. A digit stands
//! for that many empty squares, and a piece is a letter optionally prefixed
//! with `+` when promoted.

use itertools::Itertools;

use crate::board::PieceGrid;
use crate::error::{Result, ShogiError};
use crate::Piece;

/// The board part of the standard opening position.
pub const HIRATE_SQUARES: &str = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL";

/// The hands of the standard opening position.
pub const HIRATE_HANDS: &str = "-";

/// The board part of an empty board.
pub const NO_PIECE_SQUARES: &str = "9/9/9/9/9/9/9/9/9";

/// The hands holding every piece of both players.
pub const NO_PIECE_HANDS: &str = "KRB2G2S2N2L9Pkrb2g2s2n2l9p";

/// Decodes the board part of a SFEN string.
///
/// # Examples
///
/// ```
/// use shogi_kifu::sfen::{decode_squares, encode_squares, HIRATE_SQUARES};
///
/// let grid = decode_squares(HIRATE_SQUARES).unwrap();
/// assert_eq!("l", grid.get_index(0).unwrap().to_string());
/// assert_eq!(HIRATE_SQUARES, encode_squares(&grid));
/// ```
pub fn decode_squares(s: &str) -> Result<PieceGrid> {
    let malformed = || ShogiError::MalformedBoard(s.to_string());
    let mut grid = PieceGrid::empty();

    let rows: Vec<&str> = s.split('/').collect();
    if rows.len() != 9 {
        return Err(malformed());
    }

    for (i, row) in rows.iter().enumerate() {
        let mut j = 0;
        let mut is_promoted = false;

        for c in row.chars() {
            match c {
                '+' if !is_promoted => {
                    is_promoted = true;
                }
                n if n.is_ascii_digit() && !is_promoted => {
                    let n = n.to_digit(10).unwrap_or(0) as usize;
                    if n == 0 || j + n > 9 {
                        return Err(malformed());
                    }
                    j += n;
                }
                c => {
                    let mut piece = Piece::from_sfen_char(c).ok_or_else(malformed)?;
                    if j >= 9 {
                        return Err(malformed());
                    }

                    if is_promoted {
                        piece.piece_type = piece.piece_type.promote().ok_or_else(malformed)?;
                    }

                    grid.set_index(i * 9 + j, Some(piece));
                    j += 1;
                    is_promoted = false;
                }
            }
        }

        if j != 9 || is_promoted {
            return Err(malformed());
        }
    }

    Ok(grid)
}

/// Encodes the board into the board part of a SFEN string.
///
/// This is the exact inverse of [`decode_squares`].
pub fn encode_squares(grid: &PieceGrid) -> String {
    grid.rows().map(consolidate_sfen_row).join("/")
}

/// Writes one rank, collapsing each run of empty squares into a digit.
fn consolidate_sfen_row(row: &[Option<Piece>]) -> String {
    let mut s = String::new();
    let mut num_spaces = 0;

    for pc in row {
        match pc {
            Some(pc) => {
                if num_spaces > 0 {
                    s.push_str(&num_spaces.to_string());
                    num_spaces = 0;
                }
                s.push_str(&pc.to_string());
            }
            None => num_spaces += 1,
        }
    }

    if num_spaces > 0 {
        s.push_str(&num_spaces.to_string());
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_ok() {
        let ok_cases = [
            HIRATE_SQUARES,
            NO_PIECE_SQUARES,
            "lnsgkgsnl/1r5b1/ppppppppp/9/9/2P6/PP1PPPPPP/1B5R1/LNSGKGSNL",
            "ln1g3+Rl/1ks1g4/1pppp1n1p/p4pp2/7N1/2P3P2/PPSPPP2P/2G1G4/LNK5L",
            "+P+L+N+S+B+R3/9/9/9/9/9/9/9/3+r+b+s+n+l+p",
        ];

        for (i, case) in ok_cases.iter().enumerate() {
            let grid = decode_squares(case).expect("failed to parse SFEN string");
            assert_eq!(*case, encode_squares(&grid), "failed at #{i}");
        }
    }

    #[test]
    fn decode_ng() {
        let ng_cases = [
            "",
            "9/9/9/9/9/9/9/9",
            "9/9/9/9/9/9/9/9/9/9",
            "10/9/9/9/9/9/9/9/9",
            "8/9/9/9/9/9/9/9/9",
            "9p/9/9/9/9/9/9/9/9",
            "0/9/9/9/9/9/9/9/9",
            "x8/9/9/9/9/9/9/9/9",
            "+k8/9/9/9/9/9/9/9/9",
            "+G8/9/9/9/9/9/9/9/9",
            "8+/9/9/9/9/9/9/9/9",
            "++P8/9/9/9/9/9/9/9/9",
        ];

        for (i, case) in ng_cases.iter().enumerate() {
            assert!(
                matches!(decode_squares(case), Err(ShogiError::MalformedBoard(_))),
                "failed at #{i}"
            );
        }
    }

    #[test]
    fn decode_places_pieces() {
        let grid = decode_squares(HIRATE_SQUARES).unwrap();
        assert_eq!(81, grid.iter().count());
        assert_eq!(40, grid.iter().filter(|pc| pc.is_some()).count());
        assert_eq!("L", grid.get_index(80).unwrap().to_string());
        assert_eq!("r", grid.get_index(10).unwrap().to_string());
        assert_eq!("B", grid.get_index(64).unwrap().to_string());
        assert!(grid.get_index(40).is_none());
    }
}
