//! Ki2 records: moves written without their origin.
//!
//! The origin is recovered by looking for pieces of the named kind that can
//! reach the destination. When several can, the relative-position glyphs
//! (`右`, `左`, `直`, `上`, `寄`, `引`) written after the piece pick one.

use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{
    comment_of, footer_index, normalize_lines, read_destination, read_finish_trigger, read_header, read_piece,
    DESTINATION_PATTERN, PIECE_PATTERN,
};
use crate::error::{ParseError, ShogiError};
use crate::kifu::Kifu;
use crate::movegen::movable_squares;
use crate::{Board, Color, Move, Piece, PieceType, Square};

const BLACK_MARKER: char = '▲';
const WHITE_MARKER: char = '△';

static MOVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"{DESTINATION_PATTERN}{PIECE_PATTERN}([右左直]?[上寄引]?)(不成|成|打)?"
    ))
    .expect("Ki2 move pattern is valid")
});

/// Narrows candidates by their file relative to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileSpecifier {
    /// 右
    Right,
    /// 左
    Left,
    /// 直
    Straight,
}

/// Narrows candidates by their rank relative to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RankSpecifier {
    /// 引
    Back,
    /// 上
    Up,
    /// 寄
    Sideways,
}

impl FileSpecifier {
    fn from_token(s: &str) -> Option<FileSpecifier> {
        match s.chars().next()? {
            '右' => Some(FileSpecifier::Right),
            '左' => Some(FileSpecifier::Left),
            '直' => Some(FileSpecifier::Straight),
            _ => None,
        }
    }

    fn accepts(self, from: Square, to: Square, color: Color) -> bool {
        // Files count up towards Black's left.
        let toward_right = match color {
            Color::Black => from.x() < to.x(),
            Color::White => from.x() > to.x(),
        };

        match self {
            FileSpecifier::Right => toward_right,
            FileSpecifier::Left => from.x() != to.x() && !toward_right,
            FileSpecifier::Straight => from.x() == to.x(),
        }
    }
}

impl RankSpecifier {
    fn from_token(s: &str) -> Option<RankSpecifier> {
        match s.chars().last()? {
            '引' => Some(RankSpecifier::Back),
            '上' => Some(RankSpecifier::Up),
            '寄' => Some(RankSpecifier::Sideways),
            _ => None,
        }
    }

    fn accepts(self, from: Square, to: Square, color: Color) -> bool {
        let from_rank = from.relative_rank(color);
        let to_rank = to.relative_rank(color);

        match self {
            RankSpecifier::Back => from_rank < to_rank,
            RankSpecifier::Up => from_rank > to_rank,
            RankSpecifier::Sideways => from_rank == to_rank,
        }
    }
}

/// Reads a Ki2 record.
///
/// The move section starts at the first line beginning with `▲` or `△` and
/// ends at the footer line. A line may hold any number of moves.
///
/// # Examples
///
/// ```
/// use shogi_kifu::parser::parse_ki2;
///
/// let kifu = parse_ki2("先手：ほげ\n▲７六歩 △３四歩 ▲２二角成 △同銀\nまで4手で中断").unwrap();
/// assert_eq!("3a2b", kifu.moves()[3].mv.to_string());
/// assert_eq!(Some("ほげ"), kifu.header().and_then(|h| h.sente.as_deref()));
/// ```
pub fn parse_ki2(s: &str) -> Result<Kifu, ParseError> {
    let lines = normalize_lines(s);
    let start = lines
        .iter()
        .position(|line| line.starts_with(BLACK_MARKER) || line.starts_with(WHITE_MARKER))
        .ok_or(ParseError::NoMoveSectionFound)?;
    let footer = footer_index(&lines, start);

    let mut kifu = Kifu::default();
    for line in lines[start..footer].iter().copied() {
        if let Some(comment) = comment_of(line) {
            kifu.push_comment(comment);
            continue;
        }

        for caps in MOVE_RE.captures_iter(line) {
            let ordinal = kifu.moves().len() + 1;
            let mv = read_move(&kifu, &caps, ordinal)?;
            trace!("move #{ordinal} `{}` is {mv}", &caps[0]);

            kifu.push_move(mv)
                .map_err(|source| ParseError::Move { ordinal, source })?;
        }
    }

    let header = read_header(&lines[..start], "先手", "後手");
    kifu.header = Some(header);
    kifu.finish_trigger = read_finish_trigger(&lines, footer);
    debug!("read {} moves from a Ki2 record", kifu.moves().len());

    Ok(kifu)
}

/// Resolves a matched move token against the latest board of the record.
fn read_move(kifu: &Kifu, caps: &Captures, ordinal: usize) -> Result<Move, ParseError> {
    let token = &caps[0];
    let invalid = || ParseError::InvalidMoveToken {
        ordinal,
        token: token.to_string(),
    };

    let prev = kifu.moves().last().map(|m| m.mv);
    let to = read_destination(&caps[1], prev.as_ref()).ok_or_else(invalid)?;
    let piece_type = read_piece(&caps[2]).ok_or_else(invalid)?;
    let specifier = &caps[3];
    let suffix = caps.get(4).map(|m| m.as_str());

    let board = kifu.last_board();
    if suffix == Some("打") {
        return read_drop(board, piece_type, to, ordinal, token);
    }

    let found = candidates(board, piece_type, to).map_err(|source| ParseError::Move { ordinal, source })?;
    let from = match found.as_slice() {
        [] => return read_drop(board, piece_type, to, ordinal, token),
        [from] => *from,
        _ => select_candidate(&found, to, board.side_to_move(), specifier).ok_or_else(|| {
            ParseError::AmbiguousMove {
                ordinal,
                token: token.to_string(),
            }
        })?,
    };

    Ok(Move::Normal {
        from,
        to,
        promote: suffix == Some("成"),
    })
}

/// Reads the token as a drop from the hand of the side to move.
fn read_drop(board: &Board, piece_type: PieceType, to: Square, ordinal: usize, token: &str) -> Result<Move, ParseError> {
    if !piece_type.is_hand_piece() {
        return Err(ParseError::InvalidMoveToken {
            ordinal,
            token: token.to_string(),
        });
    }

    let piece = Piece {
        piece_type,
        color: board.side_to_move(),
    };
    if board.hand().get(piece) == 0 {
        return Err(ParseError::PieceNotInHand {
            ordinal,
            token: token.to_string(),
        });
    }

    Ok(Move::Drop { to, piece_type })
}

/// Lists the squares holding a piece of the side to move that can reach `to`.
fn candidates(board: &Board, piece_type: PieceType, to: Square) -> Result<Vec<Square>, ShogiError> {
    let piece = Piece {
        piece_type,
        color: board.side_to_move(),
    };

    let mut found = Vec::new();
    for sq in Square::iter().filter(|&sq| board.piece_at(sq) == Some(piece)) {
        if movable_squares(board, sq)?.contains(&to) {
            found.push(sq);
        }
    }

    Ok(found)
}

/// Picks the only candidate left after applying the specifier.
fn select_candidate(candidates: &[Square], to: Square, color: Color, specifier: &str) -> Option<Square> {
    let file = FileSpecifier::from_token(specifier);
    let rank = RankSpecifier::from_token(specifier);
    if file.is_none() && rank.is_none() {
        return None;
    }

    let mut remaining = candidates
        .iter()
        .copied()
        .filter(|&from| file.map_or(true, |f| f.accepts(from, to, color)))
        .filter(|&from| rank.map_or(true, |r| r.accepts(from, to, color)));

    match (remaining.next(), remaining.next()) {
        (Some(from), None) => Some(from),
        _ => None,
    }
}
