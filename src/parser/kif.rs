//! KIF records: numbered move lines carrying the origin of every move.

use itertools::Itertools;
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{
    comment_of, footer_index, normalize_lines, read_destination, read_finish_trigger, read_header, read_piece,
    DESTINATION_PATTERN, PIECE_PATTERN,
};
use crate::error::{ParseError, ShogiError};
use crate::kifu::{Header, Kifu};
use crate::{Color, Move, Square};

const HANDICAP_LINE: &str = "手合割：平手";
const SENTINEL: &str = "手数----指手---------消費時間--";
const SENTINEL_PREFIX: &str = "手数----指手--";
const TIME_PLACEHOLDER: &str = "(0:00/00:00:00)";

static MOVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"{DESTINATION_PATTERN}{PIECE_PATTERN}(不成|成)?\((\d)(\d)\)"))
        .expect("KIF move pattern is valid")
});

static DROP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([１-９][一二三四五六七八九])[ |　]?([歩香桂銀金角飛])打").expect("KIF drop pattern is valid")
});

/// Reads a KIF record.
///
/// The move section starts after the `手数----指手--` column header and ends at
/// the footer line. Lines that are neither moves nor comments, such as `中断`,
/// are skipped.
///
/// # Examples
///
/// ```
/// use shogi_kifu::parser::parse_kif;
///
/// let kifu = parse_kif("手数----指手---------消費時間--\n1 ７六歩(77)\n2 ３四歩(33)\nまで2手で中断").unwrap();
/// assert_eq!("3c3d", kifu.moves()[1].mv.to_string());
/// ```
pub fn parse_kif(s: &str) -> Result<Kifu, ParseError> {
    let lines = normalize_lines(s);
    let start = lines
        .iter()
        .position(|line| line.starts_with(SENTINEL_PREFIX))
        .ok_or(ParseError::NoMoveSectionFound)?;
    let footer = footer_index(&lines, start + 1);

    let mut kifu = Kifu::default();
    for line in lines[..start].iter().copied() {
        if let Some(comment) = comment_of(line) {
            kifu.push_comment(comment);
        }
    }

    for line in lines[start + 1..footer].iter().copied() {
        if let Some(comment) = comment_of(line) {
            kifu.push_comment(comment);
            continue;
        }

        let ordinal = kifu.moves().len() + 1;
        let prev = kifu.moves().last().map(|m| m.mv);
        let mv = match read_move(line, prev.as_ref(), ordinal)? {
            Some(mv) => mv,
            None => {
                trace!("skipping `{line}`");
                continue;
            }
        };

        kifu.push_move(mv).map_err(|source| ParseError::Line {
            line: line.to_string(),
            source,
        })?;
    }

    let header = read_header(&lines[..start], "先手：", "後手：");
    kifu.header = Some(header);
    kifu.finish_trigger = read_finish_trigger(&lines, footer);
    debug!("read {} moves from a KIF record", kifu.moves().len());

    Ok(kifu)
}

/// Reads the move written on a line, or `None` when the line holds no move.
fn read_move(line: &str, prev: Option<&Move>, ordinal: usize) -> Result<Option<Move>, ParseError> {
    let invalid = || ParseError::InvalidMoveToken {
        ordinal,
        token: line.to_string(),
    };
    let out_of_bounds = |token: &str| ParseError::Line {
        line: line.to_string(),
        source: ShogiError::OutOfBounds(token.to_string()),
    };

    if let Some(caps) = MOVE_RE.captures(line) {
        let to = read_destination(&caps[1], prev).ok_or_else(invalid)?;
        let piece_type = read_piece(&caps[2]).ok_or_else(invalid)?;
        let promote = caps.get(3).map(|m| m.as_str()) == Some("成");
        let x = caps[4].parse::<u8>().map_err(|_| invalid())?;
        let y = caps[5].parse::<u8>().map_err(|_| invalid())?;
        let from = Square::new(x, y).ok_or_else(|| out_of_bounds(&format!("{x}{y}")))?;
        trace!("{piece_type} moves from {from} to {to}");

        return Ok(Some(Move::Normal { from, to, promote }));
    }

    if let Some(caps) = DROP_RE.captures(line) {
        let to = Square::from_japanese(&caps[1]).ok_or_else(invalid)?;
        let piece_type = read_piece(&caps[2])
            .filter(|pt| pt.is_hand_piece())
            .ok_or_else(invalid)?;

        return Ok(Some(Move::Drop { to, piece_type }));
    }

    Ok(None)
}

/// Writes the record in KIF.
///
/// The comment of the starting board comes before the first move and the
/// comment of every later board follows the move that produced it.
///
/// # Examples
///
/// ```
/// use shogi_kifu::Kifu;
/// use shogi_kifu::parser::export_kif;
///
/// let kifu = Kifu::from_record(None, None, Some("7g7f"), false).unwrap();
/// let text = export_kif(&kifu);
/// let lines: Vec<&str> = text.lines().collect();
/// assert_eq!("1 ７六歩(77) (0:00/00:00:00)", lines[4]);
/// ```
pub fn export_kif(kifu: &Kifu) -> String {
    let default_header = Header::default();
    let header = kifu.header().unwrap_or(&default_header);

    let mut lines = vec![
        HANDICAP_LINE.to_string(),
        format!("先手：{}", header.sente.as_deref().unwrap_or(Color::Black.to_japanese())),
        format!("後手：{}", header.gote.as_deref().unwrap_or(Color::White.to_japanese())),
        SENTINEL.to_string(),
    ];

    let comment_lines = |i: usize| {
        kifu.boards()[i]
            .comment()
            .map(|c| c.lines().map(|l| format!("*{l}")).collect::<Vec<_>>())
            .unwrap_or_default()
    };

    lines.extend(comment_lines(0));
    for (i, m) in kifu.moves().iter().enumerate() {
        lines.push(format!("{} {} {}", i + 1, m.kif, TIME_PLACEHOLDER));
        lines.extend(comment_lines(i + 1));
    }

    if let Some(trigger) = kifu.finish_trigger() {
        lines.push(format!("まで{}手で{}", kifu.moves().len(), trigger));
    }

    lines.iter().join("\n")
}
