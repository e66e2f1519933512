//! Readers for the Japanese game record formats.
//!
//! Both formats are read in three phases: a header naming the players, a
//! move section, and a footer line starting with `まで` that names how the
//! game ended. KIF records carry the origin of every move; Ki2 records omit
//! it, so the moving piece is found on the board.

pub mod ki2;
pub mod kif;

use log::debug;

use crate::error::ParseError;
use crate::kifu::{FinishTrigger, Header, Kifu};
use crate::{Move, PieceType, Square};

pub use self::ki2::parse_ki2;
pub use self::kif::{export_kif, parse_kif};

/// A destination square, or `同` for the previous move's destination.
const DESTINATION_PATTERN: &str = r"(同|[１-９][一二三四五六七八九])[ |　]?";

/// A piece glyph, including the abbreviated promoted forms.
const PIECE_PATTERN: &str = r"([歩香桂銀金角飛玉王と杏圭全馬竜龍]|成香|成桂|成銀)";

const FOOTER_PREFIX: &str = "まで";
const COMMENT_PREFIX: char = '*';

/// Reads a record, trying KIF first and Ki2 next.
///
/// When neither format accepts the text, both failures are returned together.
///
/// # Examples
///
/// ```
/// use shogi_kifu::parser::parse_auto;
///
/// let kifu = parse_auto("▲７六歩 △３四歩 ▲２二角成").unwrap();
/// assert_eq!("２二角成(88)", kifu.moves()[2].kif);
/// ```
pub fn parse_auto(s: &str) -> Result<Kifu, ParseError> {
    let kif = match parse_kif(s) {
        Ok(kifu) => {
            debug!("read the record as KIF");
            return Ok(kifu);
        }
        Err(e) => e,
    };
    debug!("not a KIF record: {kif}");

    let ki2 = match parse_ki2(s) {
        Ok(kifu) => {
            debug!("read the record as Ki2");
            return Ok(kifu);
        }
        Err(e) => e,
    };
    debug!("not a Ki2 record: {ki2}");

    Err(ParseError::Unrecognized {
        kif: Box::new(kif),
        ki2: Box::new(ki2),
    })
}

/// Splits the text into trimmed, non-empty lines.
fn normalize_lines(s: &str) -> Vec<&str> {
    s.split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Collects the player names from the header lines.
///
/// The name is whatever follows the first three characters of the line.
fn read_header(lines: &[&str], sente_prefix: &str, gote_prefix: &str) -> Header {
    let name = |prefix: &str| {
        lines
            .iter()
            .find(|line| line.starts_with(prefix))
            .map(|line| line.chars().skip(3).collect::<String>().trim().to_string())
            .filter(|name| !name.is_empty())
    };

    let header = Header {
        sente: name(sente_prefix),
        gote: name(gote_prefix),
    };
    if header.sente.is_some() || header.gote.is_some() {
        debug!("found header: sente {:?}, gote {:?}", header.sente, header.gote);
    }

    header
}

/// Returns the index of the footer line, or the number of lines if there is none.
fn footer_index(lines: &[&str], from: usize) -> usize {
    lines[from..]
        .iter()
        .position(|line| line.starts_with(FOOTER_PREFIX))
        .map_or(lines.len(), |i| from + i)
}

/// Reads the finish trigger from the footer line, if any.
fn read_finish_trigger(lines: &[&str], footer: usize) -> Option<FinishTrigger> {
    let trigger = lines.get(footer).and_then(|line| FinishTrigger::find_in(line));
    if let Some(trigger) = trigger {
        debug!("record finished by {trigger}");
    }

    trigger
}

/// Returns the comment text of a comment line.
fn comment_of<'a>(line: &'a str) -> Option<&'a str> {
    line.strip_prefix(COMMENT_PREFIX).map(str::trim)
}

/// Resolves a destination token, reading `同` as the previous move's destination.
fn read_destination(token: &str, prev: Option<&Move>) -> Option<Square> {
    if token == "同" {
        prev.map(|m| m.to())
    } else {
        Square::from_japanese(token)
    }
}

fn read_piece(token: &str) -> Option<PieceType> {
    PieceType::from_japanese(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::consts::*;

    #[test]
    fn normalize() {
        let lines = normalize_lines("a\r\n\r\n b \rc\n\n  \nd");
        assert_eq!(vec!["a", "b", "c", "d"], lines);
    }

    #[test]
    fn header() {
        let lines = ["手合割：平手", "先手：sente", "後手：gote"];
        let header = read_header(&lines, "先手：", "後手：");
        assert_eq!(Some("sente".to_string()), header.sente);
        assert_eq!(Some("gote".to_string()), header.gote);

        let header = read_header(&["先手："], "先手：", "後手：");
        assert_eq!(Header::default(), header);
    }

    #[test]
    fn footer() {
        let lines = ["1 ７六歩(77)", "まで1手で中断", "まで1手で投了"];
        assert_eq!(1, footer_index(&lines, 0));
        assert_eq!(Some(FinishTrigger::Abort), read_finish_trigger(&lines, 1));
        assert_eq!(1, footer_index(&lines[..1], 0));
        assert_eq!(None, read_finish_trigger(&lines[..1], 1));
    }

    #[test]
    fn destination() {
        let prev: Move = "7g7f".parse().unwrap();
        assert_eq!(Some(SQ_7F), read_destination("同", Some(&prev)));
        assert_eq!(None, read_destination("同", None));
        assert_eq!(Some(SQ_2B), read_destination("２二", None));
    }

    #[test]
    fn auto_detect_failure() {
        match parse_auto("先手：a\n後手：b\n") {
            Err(ParseError::Unrecognized { kif, ki2 }) => {
                assert!(matches!(*kif, ParseError::NoMoveSectionFound));
                assert!(matches!(*ki2, ParseError::NoMoveSectionFound));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
