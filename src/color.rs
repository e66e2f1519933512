//! Color type representing each player side.

use std::fmt;
use std::iter;

/// Represents each side of player. Black (sente) moves first.
///
/// # Examples
///
/// ```
/// use shogi_kifu::Color;
///
/// let c = Color::Black;
/// assert_eq!(Color::White, c.flip());
/// assert_eq!("b", c.to_string());
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Returns the color of the opposite side.
    #[must_use]
    pub fn flip(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Converts the instance into the unique number for array indexing purpose.
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns an iterator of both colors, Black first.
    pub fn iter() -> ColorIter {
        ColorIter {
            current: Some(Color::Black),
        }
    }

    /// Parses the side-to-move field of a SFEN string (`b` or `w`).
    pub fn from_sfen(s: &str) -> Option<Color> {
        match s {
            "b" => Some(Color::Black),
            "w" => Some(Color::White),
            _ => None,
        }
    }

    /// Returns the Japanese name of the side (`先手` or `後手`).
    pub fn to_japanese(self) -> &'static str {
        match self {
            Color::Black => "先手",
            Color::White => "後手",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                Color::Black => "b",
                Color::White => "w",
            }
        )
    }
}

/// This struct is created by the [`iter`] method on [`Color`].
///
/// [`iter`]: ./enum.Color.html#method.iter
/// [`Color`]: enum.Color.html
pub struct ColorIter {
    current: Option<Color>,
}

impl iter::Iterator for ColorIter {
    type Item = Color;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current;

        if let Some(current) = self.current {
            self.current = match current {
                Color::Black => Some(Color::White),
                Color::White => None,
            };
        }

        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip() {
        assert_eq!(Color::White, Color::Black.flip());
        assert_eq!(Color::Black, Color::White.flip());
    }

    #[test]
    fn iter() {
        let colors: Vec<Color> = Color::iter().collect();
        assert_eq!(vec![Color::Black, Color::White], colors);
    }

    #[test]
    fn from_sfen() {
        assert_eq!(Some(Color::Black), Color::from_sfen("b"));
        assert_eq!(Some(Color::White), Color::from_sfen("w"));
        assert_eq!(None, Color::from_sfen("B"));
        assert_eq!(None, Color::from_sfen(""));
    }

    #[test]
    fn to_japanese() {
        assert_eq!("先手", Color::Black.to_japanese());
        assert_eq!("後手", Color::White.to_japanese());
    }

    #[test]
    fn to_string() {
        for c in Color::iter() {
            assert_eq!(Some(c), Color::from_sfen(&c.to_string()));
        }
    }
}
