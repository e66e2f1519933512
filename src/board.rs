//! Board snapshots and the move transition function.

use std::fmt;

use crate::error::{Result, ShogiError};
use crate::moves::Move;
use crate::sfen::{self, HIRATE_HANDS, HIRATE_SQUARES, NO_PIECE_HANDS, NO_PIECE_SQUARES};
use crate::square::SquareLocator;
use crate::{Color, Hand, Piece, PieceType, Square};

/// The 81 cells of the board, in square index order.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PieceGrid([Option<Piece>; 81]);

impl PieceGrid {
    /// Returns a grid with no piece on it.
    pub fn empty() -> PieceGrid {
        PieceGrid([None; 81])
    }

    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.0[sq.index()]
    }

    pub fn set(&mut self, sq: Square, pc: Option<Piece>) {
        self.0[sq.index()] = pc;
    }

    /// Returns the piece at the given flat index, `None` if the cell is empty or off the board.
    pub fn get_index(&self, index: usize) -> Option<Piece> {
        self.0.get(index).copied().flatten()
    }

    pub fn set_index(&mut self, index: usize, pc: Option<Piece>) {
        if let Some(cell) = self.0.get_mut(index) {
            *cell = pc;
        }
    }

    /// Iterates over the cells in index order.
    pub fn iter(&self) -> impl Iterator<Item = Option<Piece>> + '_ {
        self.0.iter().copied()
    }

    /// Iterates over the ranks from rank 1, each read from file 9 to file 1.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Piece>]> + '_ {
        self.0.chunks(9)
    }
}

impl Default for PieceGrid {
    fn default() -> PieceGrid {
        PieceGrid::empty()
    }
}

impl fmt::Debug for PieceGrid {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "PieceGrid {{ ")?;

        for pc in self.0.iter() {
            match pc {
                Some(pc) => write!(fmt, "{pc} ")?,
                None => write!(fmt, ". ")?,
            }
        }
        write!(fmt, "}}")
    }
}

/// A starting position described by its SFEN parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialPosition {
    pub squares: String,
    pub turn: Color,
    pub hands: String,
}

impl InitialPosition {
    /// The standard opening position (平手), Black to move.
    pub fn hirate() -> InitialPosition {
        InitialPosition {
            squares: HIRATE_SQUARES.to_string(),
            turn: Color::Black,
            hands: HIRATE_HANDS.to_string(),
        }
    }

    /// An empty board with every piece of both players in hand.
    pub fn no_piece() -> InitialPosition {
        InitialPosition {
            squares: NO_PIECE_SQUARES.to_string(),
            turn: Color::Black,
            hands: NO_PIECE_HANDS.to_string(),
        }
    }
}

impl Default for InitialPosition {
    fn default() -> InitialPosition {
        InitialPosition::hirate()
    }
}

/// Represents a snapshot of the game: the grid, both hands, and the side to move.
///
/// A `Board` is never changed in place by the public API. Applying a move
/// returns a new snapshot and leaves the original untouched.
///
/// # Examples
///
/// ```
/// use shogi_kifu::{Board, Color, Move};
///
/// let board = Board::hirate();
/// let next = board.apply_move(&"7g7f".parse::<Move>().unwrap()).unwrap();
///
/// assert_eq!(Color::White, next.side_to_move());
/// assert_eq!("P", next.select_piece((7u8, 6u8)).unwrap().unwrap().to_string());
/// assert!(board.select_piece((7u8, 6u8)).unwrap().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: PieceGrid,
    hand: Hand,
    side_to_move: Color,
    comment: Option<String>,
    edit_mode: bool,
}

/////////////////////////////////////////////////////////////////////////////
// Type implementation
/////////////////////////////////////////////////////////////////////////////

impl Board {
    /// Creates a board from the given starting position.
    pub fn new(initial: &InitialPosition) -> Result<Board> {
        Ok(Board {
            squares: sfen::decode_squares(&initial.squares)?,
            hand: Hand::from_sfen(&initial.hands)?,
            side_to_move: initial.turn,
            comment: None,
            edit_mode: false,
        })
    }

    /// Creates a board of the standard opening position.
    pub fn hirate() -> Board {
        Board {
            squares: standard_grid(),
            hand: Hand::default(),
            side_to_move: Color::Black,
            comment: None,
            edit_mode: false,
        }
    }

    /// Parses a SFEN position such as `lnsgkgsnl/... b - 1`.
    ///
    /// The hands field and the move count are optional.
    pub fn from_sfen(s: &str) -> Result<Board> {
        let mut parts = s.split_whitespace();
        let squares = parts
            .next()
            .ok_or_else(|| ShogiError::MalformedBoard(s.to_string()))?;
        let turn = match parts.next() {
            Some(stm) => Color::from_sfen(stm).ok_or_else(|| ShogiError::MalformedBoard(s.to_string()))?,
            None => Color::Black,
        };
        let hands = parts.next().unwrap_or("-");

        Board::new(&InitialPosition {
            squares: squares.to_string(),
            turn,
            hands: hands.to_string(),
        })
    }

    /// Converts the board into a SFEN string without the move count.
    pub fn to_sfen(&self) -> String {
        format!(
            "{} {} {}",
            sfen::encode_squares(&self.squares),
            self.side_to_move,
            self.hand.to_sfen()
        )
    }

    pub fn squares(&self) -> &PieceGrid {
        &self.squares
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Returns a piece at the given square.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares.get(sq)
    }

    /// Returns a piece at the given flat index or `(x, y)` point.
    ///
    /// Fails with `OutOfBounds` when the locator lies off the board.
    pub fn select_piece<L: SquareLocator>(&self, at: L) -> Result<Option<Piece>> {
        Ok(self.squares.get(at.to_square()?))
    }

    /// Returns a copy of the board with the edit mode set as given.
    ///
    /// While editing, applying a move keeps the side to move.
    #[must_use]
    pub fn with_edit_mode(&self, edit_mode: bool) -> Board {
        Board {
            edit_mode,
            ..self.clone()
        }
    }

    /// Returns a copy of the board with its comment replaced.
    #[must_use]
    pub fn with_comment(&self, comment: Option<String>) -> Board {
        Board {
            comment,
            ..self.clone()
        }
    }

    /// Returns `true` if both boards hold the same position.
    ///
    /// Squares, hands, the side to move and the edit mode are compared; the
    /// comment is not.
    pub fn same_position(&self, other: &Board) -> bool {
        self.squares == other.squares
            && self.hand == other.hand
            && self.side_to_move == other.side_to_move
            && self.edit_mode == other.edit_mode
    }

    /// Appends a comment line, joining it to an existing comment with a newline.
    pub(crate) fn push_comment(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }

        self.comment = Some(match self.comment.take() {
            Some(c) if !c.is_empty() => format!("{c}\n{line}"),
            _ => line.to_string(),
        });
    }

    /// Returns a copy of the board with the cell replaced, for editing positions.
    pub fn with_piece_at<L: SquareLocator>(&self, at: L, piece: Option<Piece>) -> Result<Board> {
        let sq = at.to_square()?;
        let mut next = self.clone();
        next.squares.set(sq, piece);
        Ok(next)
    }

    /// Returns `true` if the piece may promote when it moves from or to the given index.
    ///
    /// The piece must be an unpromoted kind that has a promoted form, and the
    /// square must be in the far three ranks as seen from the piece's owner.
    pub fn can_promote<L: SquareLocator>(piece: Piece, at: L) -> Result<bool> {
        let sq = at.to_square()?;
        Ok(piece.piece_type.can_promote() && sq.relative_rank(piece.color) <= 3)
    }

    /// Applies the move and returns the resulting board.
    ///
    /// Geometry is not checked here; see [`movegen`](crate::movegen) for that.
    /// The side to move alternates unless the board is in edit mode.
    pub fn apply_move(&self, mv: &Move) -> Result<Board> {
        let mut next = self.clone();
        next.comment = None;

        match *mv {
            Move::Normal { from, to, promote } => next.make_normal_move(from, to, promote)?,
            Move::Drop { to, piece_type } => next.make_drop_move(to, piece_type)?,
        }

        if !self.edit_mode {
            next.side_to_move = self.side_to_move.flip();
        }

        Ok(next)
    }

    fn make_normal_move(&mut self, from: Square, to: Square, promote: bool) -> Result<()> {
        let moved = self.piece_at(from).ok_or(ShogiError::EmptySquare(from))?;

        let placed = if promote {
            match moved.piece_type.promote() {
                Some(piece_type) => Piece {
                    piece_type,
                    color: moved.color,
                },
                None => return Err(ShogiError::InvalidPromotion(moved)),
            }
        } else {
            moved
        };

        if let Some(captured) = self.piece_at(to) {
            let pc = Piece {
                piece_type: captured.piece_type.base(),
                color: moved.color,
            };
            self.hand.increment(pc);
        }

        self.squares.set(from, None);
        self.squares.set(to, Some(placed));

        Ok(())
    }

    fn make_drop_move(&mut self, to: Square, piece_type: PieceType) -> Result<()> {
        if !piece_type.is_hand_piece() {
            return Err(ShogiError::InvalidDrop(format!(
                "{} cannot be dropped",
                piece_type.to_string().to_uppercase()
            )));
        }

        if self.piece_at(to).is_some() {
            return Err(ShogiError::InvalidDrop(format!("{to} is occupied")));
        }

        let pc = Piece {
            piece_type,
            color: self.side_to_move,
        };

        self.hand.decrement(pc)?;
        self.squares.set(to, Some(pc));

        Ok(())
    }

    /// Renders the grid as nine lines of SFEN letters with `.` for empty cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use shogi_kifu::Board;
    ///
    /// let s = Board::hirate().to_pretty_string();
    /// assert_eq!(Some("lnsgkgsnl"), s.lines().next());
    /// assert_eq!(Some(".B.....R."), s.lines().nth(7));
    /// ```
    pub fn to_pretty_string(&self) -> String {
        let mut s = String::new();

        for row in self.squares.rows() {
            for pc in row {
                match pc {
                    Some(pc) => s.push_str(&pc.to_string()),
                    None => s.push('.'),
                }
            }
            s.push('\n');
        }

        s
    }
}

fn standard_grid() -> PieceGrid {
    use PieceType::*;

    let back_rank = [Lance, Knight, Silver, Gold, King, Gold, Silver, Knight, Lance];
    let mut grid = PieceGrid::empty();

    for color in Color::iter() {
        let (back, second, pawns) = match color {
            Color::Black => (9, 8, 7),
            Color::White => (1, 2, 3),
        };
        // Rook sits on file 2 for Black and file 8 for White.
        let (rook_x, bishop_x) = match color {
            Color::Black => (2, 8),
            Color::White => (8, 2),
        };

        for x in 1..=9u8 {
            let put = |grid: &mut PieceGrid, y: u8, piece_type: PieceType| {
                if let Some(sq) = Square::new(x, y) {
                    grid.set(sq, Some(Piece { piece_type, color }));
                }
            };

            put(&mut grid, back, back_rank[(x - 1) as usize]);
            put(&mut grid, pawns, Pawn);
            if x == rook_x {
                put(&mut grid, second, Rook);
            }
            if x == bishop_x {
                put(&mut grid, second, Bishop);
            }
        }
    }

    grid
}

/////////////////////////////////////////////////////////////////////////////
// Trait implementations
/////////////////////////////////////////////////////////////////////////////

impl Default for Board {
    fn default() -> Board {
        Board::hirate()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "   9   8   7   6   5   4   3   2   1")?;
        writeln!(f, "+---+---+---+---+---+---+---+---+---+")?;

        for (i, row) in self.squares.rows().enumerate() {
            write!(f, "|")?;
            for pc in row {
                match pc {
                    Some(pc) => write!(f, "{:>3}|", pc.to_string())?,
                    None => write!(f, "   |")?,
                }
            }

            writeln!(f, " {}", (b'a' + i as u8) as char)?;
            writeln!(f, "+---+---+---+---+---+---+---+---+---+")?;
        }

        writeln!(
            f,
            "Side to move: {}",
            if self.side_to_move == Color::Black {
                "Black"
            } else {
                "White"
            }
        )?;

        let [black, white] = self.hand.split_by_color();
        let fmt_hand = |pieces: &[(PieceType, u8)], color: Color, f: &mut fmt::Formatter| -> fmt::Result {
            for &(piece_type, n) in pieces {
                write!(f, "{}{n} ", Piece { piece_type, color })?;
            }
            Ok(())
        };
        write!(f, "Hand (Black): ")?;
        fmt_hand(&black, Color::Black, f)?;
        writeln!(f)?;

        write!(f, "Hand (White): ")?;
        fmt_hand(&white, Color::White, f)?;

        Ok(())
    }
}
