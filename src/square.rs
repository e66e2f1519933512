use std::fmt;
use std::iter;
use std::str::FromStr;

use crate::error::{Result, ShogiError};
use crate::Color;

const ASCII_1: u8 = b'1';
const ASCII_LOWER_A: u8 = b'a';

/// Full-width numerals for files 1 to 9.
const FILE_JAPANESE: [&str; 9] = ["１", "２", "３", "４", "５", "６", "７", "８", "９"];

/// Kanji numerals for ranks 1 to 9.
const RANK_JAPANESE: [&str; 9] = ["一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// Represents a position of each cell in the game board.
///
/// A square is addressed by its file `x` (1 to 9, counted from the right as
/// seen by Black) and its rank `y` (1 to 9, counted from White's side).
/// Squares are stored in reading order from the top-left corner, so the flat
/// index is `9 - x + (y - 1) * 9`.
///
/// # Examples
///
/// ```
/// use shogi_kifu::Square;
///
/// let sq = Square::new(5, 5).unwrap();
/// assert_eq!("5e", sq.to_string());
/// assert_eq!(40, sq.index());
/// ```
///
/// `Square` can be created by parsing a SFEN formatted string as well.
///
/// ```
/// use shogi_kifu::Square;
///
/// let sq = Square::from_sfen("7g").unwrap();
/// assert_eq!(7, sq.x());
/// assert_eq!(7, sq.y());
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Square {
    inner: u8,
}

impl Square {
    /// The total number of squares on the board.
    pub const NUM_SQUARES: usize = 81;

    /// Creates a new instance of `Square`.
    ///
    /// Both `x` and `y` take a value from 1 to 9.
    pub fn new(x: u8, y: u8) -> Option<Square> {
        if !(1..=9).contains(&x) || !(1..=9).contains(&y) {
            return None;
        }

        Some(Square {
            inner: 9 - x + (y - 1) * 9,
        })
    }

    /// Creates a new instance of `Square` from SFEN formatted string such as `7g`.
    pub fn from_sfen(s: &str) -> Option<Square> {
        let bytes: &[u8] = s.as_bytes();

        if bytes.len() != 2 {
            return None;
        }

        let (file, rank) = (bytes[0], bytes[1]);
        if !(ASCII_1..ASCII_1 + 9).contains(&file) || !(ASCII_LOWER_A..ASCII_LOWER_A + 9).contains(&rank) {
            return None;
        }

        Square::new(file - ASCII_1 + 1, rank - ASCII_LOWER_A + 1)
    }

    /// Creates a new instance of `Square` with the given index value.
    pub fn from_index(index: usize) -> Option<Square> {
        if index >= Square::NUM_SQUARES {
            return None;
        }

        Some(Square { inner: index as u8 })
    }

    /// Returns an iterator of all squares on the board, in index order.
    pub fn iter() -> SquareIter {
        SquareIter { current: 0 }
    }

    /// Returns the file of the square (1 to 9).
    pub fn x(self) -> u8 {
        9 - self.inner % 9
    }

    /// Returns the rank of the square (1 to 9).
    pub fn y(self) -> u8 {
        self.inner / 9 + 1
    }

    /// Returns a new `Square` instance by moving the file and the rank values.
    ///
    /// # Examples
    ///
    /// ```
    /// use shogi_kifu::square::consts::*;
    ///
    /// let shifted = SQ_2B.shift(2, 3).unwrap();
    /// assert_eq!(SQ_4E, shifted);
    /// assert!(SQ_2B.shift(0, -2).is_none());
    /// ```
    #[must_use]
    pub fn shift(self, dx: i8, dy: i8) -> Option<Square> {
        let x = self.x() as i8 + dx;
        let y = self.y() as i8 + dy;

        if !(1..=9).contains(&x) || !(1..=9).contains(&y) {
            return None;
        }

        Square::new(x as u8, y as u8)
    }

    /// Returns a relative rank (1 to 9) as if the specified color is black.
    ///
    /// # Examples
    ///
    /// ```
    /// use shogi_kifu::Color;
    /// use shogi_kifu::square::consts::*;
    ///
    /// assert_eq!(7, SQ_1G.relative_rank(Color::Black));
    /// assert_eq!(3, SQ_1G.relative_rank(Color::White));
    /// ```
    pub fn relative_rank(self, c: Color) -> u8 {
        if c == Color::Black {
            self.y()
        } else {
            10 - self.y()
        }
    }

    /// Converts the instance into the unique number for array indexing purpose.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.inner as usize
    }

    /// Returns the file in Japanese notation (full-width numeral).
    pub fn file_japanese(self) -> &'static str {
        FILE_JAPANESE[(self.x() - 1) as usize]
    }

    /// Returns the rank in Japanese notation (kanji numeral).
    pub fn rank_japanese(self) -> &'static str {
        RANK_JAPANESE[(self.y() - 1) as usize]
    }

    /// Returns the square in Japanese notation.
    ///
    /// # Examples
    ///
    /// ```
    /// use shogi_kifu::square::consts::*;
    ///
    /// assert_eq!("７六", SQ_7F.to_japanese());
    /// ```
    pub fn to_japanese(self) -> String {
        format!("{}{}", self.file_japanese(), self.rank_japanese())
    }

    /// Parses a square written in Japanese notation, such as `７六`.
    ///
    /// The file may be written with either a full-width or a half-width digit.
    pub fn from_japanese(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let x = chars.next().and_then(file_from_japanese)?;
        let y = chars.next().and_then(rank_from_japanese)?;

        if chars.next().is_some() {
            return None;
        }

        Square::new(x, y)
    }
}

/// Reads a file digit, either full-width (`７`) or half-width (`7`).
pub fn file_from_japanese(c: char) -> Option<u8> {
    match c {
        '１'..='９' => Some((c as u32 - '０' as u32) as u8),
        '1'..='9' => Some((c as u32 - '0' as u32) as u8),
        _ => None,
    }
}

/// Reads a kanji rank numeral (`一` to `九`).
pub fn rank_from_japanese(c: char) -> Option<u8> {
    RANK_JAPANESE
        .iter()
        .position(|kanji| kanji.starts_with(c))
        .map(|i| i as u8 + 1)
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (self.x() - 1 + ASCII_1) as char,
            (self.y() - 1 + ASCII_LOWER_A) as char
        )
    }
}

/// Error type for parsing a square from SFEN notation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid square notation")]
pub struct ParseSquareError;

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_sfen(s).ok_or(ParseSquareError)
    }
}

/// Something that addresses a square: a flat index, an `(x, y)` point, or a `Square`.
///
/// Move constructors take both ends as the same locator type, so an index
/// cannot be paired with a point.
pub trait SquareLocator: Copy {
    /// Resolves the locator, failing with `OutOfBounds` when it lies off the board.
    fn to_square(self) -> Result<Square>;
}

impl SquareLocator for Square {
    fn to_square(self) -> Result<Square> {
        Ok(self)
    }
}

impl SquareLocator for usize {
    fn to_square(self) -> Result<Square> {
        Square::from_index(self).ok_or_else(|| ShogiError::OutOfBounds(format!("index {self}")))
    }
}

impl SquareLocator for (u8, u8) {
    fn to_square(self) -> Result<Square> {
        Square::new(self.0, self.1)
            .ok_or_else(|| ShogiError::OutOfBounds(format!("point (x: {}, y: {})", self.0, self.1)))
    }
}

/// Square constants, named after their SFEN notation.
pub mod consts {
    use super::Square;

    macro_rules! make_square {
        {0, $t:ident $($ts:ident)+} => {
            pub const $t: Square = Square { inner: 0 };
            make_square!{1, $($ts)*}
        };
        {$n:expr, $t:ident $($ts:ident)+} => {
            pub const $t: Square = Square { inner: $n };
            make_square!{($n + 1), $($ts)*}
        };
        {$n:expr, $t:ident} => {
            pub const $t: Square = Square { inner: $n };
        };
    }

    make_square! {0, SQ_9A SQ_8A SQ_7A SQ_6A SQ_5A SQ_4A SQ_3A SQ_2A SQ_1A
    SQ_9B SQ_8B SQ_7B SQ_6B SQ_5B SQ_4B SQ_3B SQ_2B SQ_1B
    SQ_9C SQ_8C SQ_7C SQ_6C SQ_5C SQ_4C SQ_3C SQ_2C SQ_1C
    SQ_9D SQ_8D SQ_7D SQ_6D SQ_5D SQ_4D SQ_3D SQ_2D SQ_1D
    SQ_9E SQ_8E SQ_7E SQ_6E SQ_5E SQ_4E SQ_3E SQ_2E SQ_1E
    SQ_9F SQ_8F SQ_7F SQ_6F SQ_5F SQ_4F SQ_3F SQ_2F SQ_1F
    SQ_9G SQ_8G SQ_7G SQ_6G SQ_5G SQ_4G SQ_3G SQ_2G SQ_1G
    SQ_9H SQ_8H SQ_7H SQ_6H SQ_5H SQ_4H SQ_3H SQ_2H SQ_1H
    SQ_9I SQ_8I SQ_7I SQ_6I SQ_5I SQ_4I SQ_3I SQ_2I SQ_1I}
}

/// This struct is created by the [`iter`] method on [`Square`].
///
/// [`iter`]: ./struct.Square.html#method.iter
/// [`Square`]: struct.Square.html
pub struct SquareIter {
    current: u8,
}

impl iter::Iterator for SquareIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.current;

        if cur as usize >= Square::NUM_SQUARES {
            return None;
        }

        self.current += 1;

        Some(Square { inner: cur })
    }
}
