//! Game records: a list of board snapshots and the moves between them.

use std::fmt;
use std::str::FromStr;

use log::trace;

use crate::board::PieceGrid;
use crate::error::{Result, ShogiError};
use crate::{Board, InitialPosition, Move};

/// A move in a record, with its human-readable form such as `７六歩(77)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KifuMove {
    pub mv: Move,
    pub kif: String,
}

/// Player names written in the record header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub sente: Option<String>,
    pub gote: Option<String>,
}

/// Represents how a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FinishTrigger {
    /// 中断
    Abort,
    /// 投了
    Resignation,
    /// 持将棋
    Impasse,
    /// 切れ負け
    Timeout,
    /// 反則勝ち
    IllegalMoveWin,
    /// 反則負け
    IllegalMoveLoss,
    /// 入玉勝ち
    EnteringKingWin,
    /// 千日手
    Repetition,
    /// 詰み
    Checkmate,
}

const FINISH_TRIGGERS: [FinishTrigger; 9] = [
    FinishTrigger::Abort,
    FinishTrigger::Resignation,
    FinishTrigger::Impasse,
    FinishTrigger::Timeout,
    FinishTrigger::IllegalMoveWin,
    FinishTrigger::IllegalMoveLoss,
    FinishTrigger::EnteringKingWin,
    FinishTrigger::Repetition,
    FinishTrigger::Checkmate,
];

impl FinishTrigger {
    /// Returns the word used in record footers.
    pub fn as_str(self) -> &'static str {
        match self {
            FinishTrigger::Abort => "中断",
            FinishTrigger::Resignation => "投了",
            FinishTrigger::Impasse => "持将棋",
            FinishTrigger::Timeout => "切れ負け",
            FinishTrigger::IllegalMoveWin => "反則勝ち",
            FinishTrigger::IllegalMoveLoss => "反則負け",
            FinishTrigger::EnteringKingWin => "入玉勝ち",
            FinishTrigger::Repetition => "千日手",
            FinishTrigger::Checkmate => "詰み",
        }
    }

    /// Finds the first finish trigger word contained in the line.
    ///
    /// # Examples
    ///
    /// ```
    /// use shogi_kifu::FinishTrigger;
    ///
    /// assert_eq!(Some(FinishTrigger::Resignation), FinishTrigger::find_in("まで5手で投了"));
    /// assert_eq!(None, FinishTrigger::find_in("まで5手"));
    /// ```
    pub fn find_in(line: &str) -> Option<FinishTrigger> {
        FINISH_TRIGGERS.iter().copied().find(|t| line.contains(t.as_str()))
    }
}

impl fmt::Display for FinishTrigger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FinishTrigger {
    type Err = ShogiError;

    fn from_str(s: &str) -> Result<FinishTrigger> {
        FINISH_TRIGGERS
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ShogiError::InvalidMoveToken(s.to_string()))
    }
}

/// Renders a move the way KIF records write it.
///
/// A drop is written as the destination, the piece, and `打`. A normal move is
/// written as the destination, the moving piece, `成` when it promotes, and the
/// origin in half-width digits. When the destination equals the previous
/// move's destination, it is written as `同　` instead.
///
/// # Examples
///
/// ```
/// use shogi_kifu::{kifu, Board, Move};
///
/// let board = Board::hirate();
/// let mv: Move = "7g7f".parse().unwrap();
/// assert_eq!("７六歩(77)", kifu::readable_move(board.squares(), &mv, None).unwrap());
/// ```
pub fn readable_move(squares: &PieceGrid, current: &Move, prev: Option<&Move>) -> Result<String> {
    match *current {
        Move::Drop { to, piece_type } => Ok(format!("{}{}打", to.to_japanese(), piece_type.to_japanese())),
        Move::Normal { from, to, promote } => {
            let piece = squares.get(from).ok_or(ShogiError::EmptySquare(from))?;
            let destination = if prev.map(|p| p.to()) == Some(to) {
                "同　".to_string()
            } else {
                to.to_japanese()
            };

            Ok(format!(
                "{}{}{}({}{})",
                destination,
                piece.piece_type.to_japanese(),
                if promote { "成" } else { "" },
                from.x(),
                from.y()
            ))
        }
    }
}

/// Represents a game record.
///
/// A record with `n` moves holds `n + 1` boards, and `boards()[i + 1]` holds
/// the position of `boards()[i]` with `moves()[i]` applied. Comments belong to
/// each board alone, so only the position is carried over
/// (see [`Board::same_position`]).
///
/// # Examples
///
/// ```
/// use shogi_kifu::Kifu;
///
/// let kifu = Kifu::from_record(None, None, Some("7g7f 3c3d 8h2b+"), false).unwrap();
/// assert_eq!(4, kifu.boards().len());
/// assert_eq!("２二角成(88)", kifu.moves()[2].kif);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kifu {
    pub(crate) name: Option<String>,
    pub(crate) boards: Vec<Board>,
    pub(crate) moves: Vec<KifuMove>,
    pub(crate) header: Option<Header>,
    pub(crate) finish_trigger: Option<FinishTrigger>,
    pub(crate) edit_mode: bool,
}

impl Kifu {
    /// Creates a record starting from the given position and plays the space-separated moves.
    ///
    /// The standard opening is used when no position is given.
    pub fn from_record(
        name: Option<&str>,
        initial: Option<&InitialPosition>,
        moves: Option<&str>,
        edit_mode: bool,
    ) -> Result<Kifu> {
        let board = match initial {
            Some(initial) => Board::new(initial)?,
            None => Board::hirate(),
        };

        let mut kifu = Kifu {
            name: name.map(str::to_string),
            boards: vec![board.with_edit_mode(edit_mode)],
            moves: Vec::new(),
            header: None,
            finish_trigger: None,
            edit_mode,
        };

        for token in moves.unwrap_or("").split_whitespace() {
            let mv = token.parse::<Move>()?;
            kifu.push_move(mv)?;
        }

        Ok(kifu)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn moves(&self) -> &[KifuMove] {
        &self.moves
    }

    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub fn finish_trigger(&self) -> Option<FinishTrigger> {
        self.finish_trigger
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Returns the latest board.
    pub fn last_board(&self) -> &Board {
        // A record always holds its starting board.
        &self.boards[self.boards.len() - 1]
    }

    /// Returns a copy of the record with the header replaced.
    #[must_use]
    pub fn with_header(&self, header: Option<Header>) -> Kifu {
        Kifu {
            header,
            ..self.clone()
        }
    }

    /// Returns a copy of the record with the finish trigger replaced.
    #[must_use]
    pub fn with_finish_trigger(&self, finish_trigger: Option<FinishTrigger>) -> Kifu {
        Kifu {
            finish_trigger,
            ..self.clone()
        }
    }

    /// Returns a record with `mv` played at position `at`.
    ///
    /// Boards up to `at` are kept and the moves from `at` onward are replaced by
    /// `mv`. Without `at`, the move is appended. Fails with `IndexOutOfRange`
    /// when `at` is beyond the last move.
    ///
    /// # Examples
    ///
    /// ```
    /// use shogi_kifu::{Kifu, Move};
    ///
    /// let kifu = Kifu::from_record(None, None, Some("7g7f"), false).unwrap();
    /// let kifu = kifu.produce("2g2f".parse::<Move>().unwrap(), Some(0)).unwrap();
    /// assert_eq!(1, kifu.moves().len());
    /// assert_eq!("２六歩(27)", kifu.moves()[0].kif);
    /// ```
    pub fn produce(&self, mv: Move, at: Option<usize>) -> Result<Kifu> {
        let index = at.unwrap_or(self.moves.len());
        if index >= self.boards.len() {
            return Err(ShogiError::IndexOutOfRange {
                index,
                len: self.moves.len(),
            });
        }
        trace!("producing {mv} at {index}");

        let mut next = Kifu {
            boards: self.boards[..=index].to_vec(),
            moves: self.moves[..index].to_vec(),
            ..self.clone()
        };
        next.push_move(mv)?;

        Ok(next)
    }

    /// Returns the index of the first board whose cells match every occupied cell of `pattern`.
    ///
    /// Empty cells of the pattern match anything.
    pub fn first_index_of_matched_board(&self, pattern: &PieceGrid) -> Option<usize> {
        self.boards.iter().position(|board| {
            pattern
                .iter()
                .zip(board.squares().iter())
                .all(|(p, pc)| p.is_none() || p == pc)
        })
    }

    /// Plays the move on the latest board, recording its readable form.
    pub(crate) fn push_move(&mut self, mv: Move) -> Result<()> {
        let board = self.last_board();
        let kif = readable_move(board.squares(), &mv, self.moves.last().map(|m| &m.mv))?;
        let next = board.apply_move(&mv)?;

        self.moves.push(KifuMove { mv, kif });
        self.boards.push(next);

        Ok(())
    }

    /// Attaches a comment line to the latest board.
    pub(crate) fn push_comment(&mut self, line: &str) {
        if let Some(board) = self.boards.last_mut() {
            board.push_comment(line);
        }
    }
}

impl Default for Kifu {
    /// An empty record starting from the standard opening.
    fn default() -> Kifu {
        Kifu {
            name: None,
            boards: vec![Board::hirate()],
            moves: Vec::new(),
            header: None,
            finish_trigger: None,
            edit_mode: false,
        }
    }
}
