//! Move geometry: where a piece on the board can go, and where a piece in hand can be dropped.
//!
//! Each piece type owns an ordered list of ray groups. A ray group is a list
//! of offsets walked in order from the origin; the walk ends at the board
//! edge, before a friendly piece, or on an enemy piece. Stepping pieces have
//! one offset per group and sliding pieces have a whole ray per group.
//!
//! Offsets are written from Black's point of view: `dx > 0` moves toward
//! file 1 and `dy > 0` moves toward rank 1. White's offsets are mirrored.
//! Neither check nor any other rule beyond geometry is considered here.

use once_cell::sync::Lazy;

use crate::error::{Result, ShogiError};
use crate::square::SquareLocator;
use crate::{Board, Color, Piece, PieceType, Square};

type Offset = (i8, i8);
type RayGroup = Vec<Offset>;

const PAWN: &[Offset] = &[(0, 1)];
const KNIGHT: &[Offset] = &[(1, 2), (-1, 2)];
const SILVER: &[Offset] = &[(1, 1), (0, 1), (-1, 1), (1, -1), (-1, -1)];
const GOLD: &[Offset] = &[(1, 1), (0, 1), (-1, 1), (1, 0), (-1, 0), (0, -1)];
const KING: &[Offset] = &[(1, 1), (0, 1), (-1, 1), (1, 0), (-1, 0), (1, -1), (0, -1), (-1, -1)];

const LANCE_DIRS: &[Offset] = &[(0, 1)];
const BISHOP_DIRS: &[Offset] = &[(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_DIRS: &[Offset] = &[(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Ray groups of every piece type, indexed by `PieceType::index`.
static RAY_GROUPS: Lazy<Vec<Vec<RayGroup>>> = Lazy::new(|| PieceType::iter().map(ray_groups).collect());

fn steps(offsets: &[Offset]) -> Vec<RayGroup> {
    offsets.iter().map(|&o| vec![o]).collect()
}

fn slides(dirs: &[Offset]) -> Vec<RayGroup> {
    dirs.iter()
        .map(|&(dx, dy)| (1..=8).map(|n| (dx * n, dy * n)).collect())
        .collect()
}

fn ray_groups(pt: PieceType) -> Vec<RayGroup> {
    use PieceType::*;

    match pt {
        Pawn => steps(PAWN),
        Lance => slides(LANCE_DIRS),
        Knight => steps(KNIGHT),
        Silver => steps(SILVER),
        Gold | ProPawn | ProLance | ProKnight | ProSilver => steps(GOLD),
        Bishop => slides(BISHOP_DIRS),
        Rook => slides(ROOK_DIRS),
        King => steps(KING),
        ProBishop => {
            let mut groups = slides(BISHOP_DIRS);
            groups.extend(steps(&[(1, 0), (0, 1), (0, -1), (-1, 0)]));
            groups
        }
        ProRook => {
            let mut groups = slides(ROOK_DIRS);
            groups.extend(steps(BISHOP_DIRS));
            groups
        }
    }
}

/// Returns the squares the piece on `origin` can move to, ignoring checks.
///
/// Squares are listed in ray group order, then in offset order along each ray.
///
/// # Examples
///
/// ```
/// use shogi_kifu::{Board, movegen};
///
/// let board = Board::hirate();
/// let targets = movegen::movable_squares(&board, (7u8, 9u8)).unwrap();
/// let names: Vec<String> = targets.iter().map(|sq| sq.to_string()).collect();
/// assert_eq!(vec!["6h", "7h"], names);
/// ```
pub fn movable_squares<L: SquareLocator>(board: &Board, origin: L) -> Result<Vec<Square>> {
    let from = origin.to_square()?;
    let piece = board.piece_at(from).ok_or(ShogiError::EmptySquare(from))?;

    let sign = match piece.color {
        Color::Black => -1,
        Color::White => 1,
    };

    let mut targets = Vec::new();
    for group in RAY_GROUPS[piece.piece_type.index()].iter() {
        for &(dx, dy) in group {
            let to = match from.shift(dx * sign, dy * sign) {
                Some(to) => to,
                None => break,
            };

            match board.piece_at(to) {
                Some(pc) if pc.color == piece.color => break,
                Some(_) => {
                    targets.push(to);
                    break;
                }
                None => targets.push(to),
            }
        }
    }

    Ok(targets)
}

/// Returns the empty squares where the given piece can be dropped.
///
/// Pawns cannot be dropped on a file that already holds an unpromoted pawn
/// of the same side. Pawns and lances cannot be dropped on the last rank and
/// knights cannot be dropped on the last two ranks.
///
/// # Examples
///
/// ```
/// use shogi_kifu::{Board, InitialPosition, Piece, movegen};
///
/// let board = Board::new(&InitialPosition::no_piece()).unwrap();
/// let knight = Piece::from_sfen("n").unwrap();
/// assert_eq!(63, movegen::droppable_squares(&board, knight).unwrap().len());
/// ```
pub fn droppable_squares(board: &Board, piece: Piece) -> Result<Vec<Square>> {
    if !piece.piece_type.is_hand_piece() {
        return Err(ShogiError::InvalidDrop(format!("{piece} cannot be dropped")));
    }

    let min_rank = match piece.piece_type {
        PieceType::Pawn | PieceType::Lance => 2,
        PieceType::Knight => 3,
        _ => 1,
    };

    let pawn_files: Vec<u8> = if piece.piece_type == PieceType::Pawn {
        Square::iter()
            .filter(|&sq| board.piece_at(sq) == Some(piece))
            .map(|sq| sq.x())
            .collect()
    } else {
        Vec::new()
    };

    Ok(Square::iter()
        .filter(|&sq| board.piece_at(sq).is_none())
        .filter(|&sq| sq.relative_rank(piece.color) >= min_rank)
        .filter(|sq| !pawn_files.contains(&sq.x()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InitialPosition, Move};

    fn editing() -> Board {
        Board::new(&InitialPosition::no_piece())
            .expect("failed to parse SFEN string")
            .with_edit_mode(true)
    }

    fn apply(board: &Board, moves: &[&str]) -> Board {
        moves.iter().fold(board.clone(), |b, m| {
            b.apply_move(&m.parse::<Move>().unwrap()).expect("failed to apply move")
        })
    }

    fn as_white(board: &Board) -> Board {
        Board::new(&InitialPosition {
            squares: crate::sfen::encode_squares(board.squares()),
            turn: Color::White,
            hands: board.hand().to_sfen(),
        })
        .unwrap()
        .with_edit_mode(true)
    }

    fn points(squares: &[Square]) -> Vec<(u8, u8)> {
        squares.iter().map(|sq| (sq.x(), sq.y())).collect()
    }

    #[test]
    fn pawn() {
        let board = Board::hirate();
        assert_eq!(vec![(7, 6)], points(&movable_squares(&board, (7u8, 7u8)).unwrap()));
        assert_eq!(vec![(3, 4)], points(&movable_squares(&board, (3u8, 3u8)).unwrap()));

        let board = apply(&editing(), &["P*5e", "B*5d"]);
        assert!(movable_squares(&board, (5u8, 5u8)).unwrap().is_empty());
    }

    #[test]
    fn lance() {
        let board = apply(&editing(), &["L*5h"]);
        let board = apply(&as_white(&board), &["P*5c"]);
        assert_eq!(
            vec![(5, 7), (5, 6), (5, 5), (5, 4), (5, 3)],
            points(&movable_squares(&board, (5u8, 8u8)).unwrap())
        );
    }

    #[test]
    fn knight() {
        let board = apply(&editing(), &["P*9f", "P*7f"]);
        let board = apply(&as_white(&board), &["N*8d"]);
        assert_eq!(vec![(9, 6), (7, 6)], points(&movable_squares(&board, (8u8, 4u8)).unwrap()));
    }

    #[test]
    fn silver() {
        let board = Board::hirate();
        assert_eq!(vec![(6, 8), (7, 8)], points(&movable_squares(&board, (7u8, 9u8)).unwrap()));

        let board = apply(&board, &["7i6h"]);
        assert_eq!(vec![(7, 9)], points(&movable_squares(&board, (6u8, 8u8)).unwrap()));

        let board = apply(&editing(), &["S*1c"]);
        assert_eq!(
            vec![(1, 2), (2, 2), (2, 4)],
            points(&movable_squares(&board, (1u8, 3u8)).unwrap())
        );
    }

    #[test]
    fn gold() {
        let board = apply(&editing(), &["G*9a"]);
        assert_eq!(vec![(8, 1), (9, 2)], points(&movable_squares(&board, (9u8, 1u8)).unwrap()));
    }

    #[test]
    fn bishop() {
        let board = apply(&editing(), &["B*4d"]);
        assert_eq!(14, movable_squares(&board, (4u8, 4u8)).unwrap().len());

        let board = apply(&board, &["K*3c"]);
        assert_eq!(11, movable_squares(&board, (4u8, 4u8)).unwrap().len());

        let board = apply(&as_white(&board), &["K*5c"]);
        let targets = movable_squares(&board, (4u8, 4u8)).unwrap();
        assert_eq!(9, targets.len());
        assert!(targets.contains(&Square::new(5, 3).unwrap()));
        assert!(!targets.contains(&Square::new(6, 2).unwrap()));
    }

    #[test]
    fn rook() {
        let board = apply(&as_white(&editing()), &["R*4d"]);
        assert_eq!(16, movable_squares(&board, (4u8, 4u8)).unwrap().len());

        let board = apply(&board, &["K*4c"]);
        assert_eq!(13, movable_squares(&board, (4u8, 4u8)).unwrap().len());
    }

    #[test]
    fn king() {
        let board = apply(&editing(), &["K*4d"]);
        assert_eq!(8, movable_squares(&board, (4u8, 4u8)).unwrap().len());
    }

    #[test]
    fn promoted() {
        let board = editing()
            .with_piece_at((5u8, 5u8), Piece::from_sfen("+B"))
            .unwrap()
            .with_piece_at((5u8, 4u8), Piece::from_sfen("P"))
            .unwrap();
        let targets = movable_squares(&board, (5u8, 5u8)).unwrap();
        // 16 diagonal squares and 3 orthogonal steps, the fourth blocked by the pawn.
        assert_eq!(19, targets.len());
        assert!(targets.contains(&Square::new(5, 6).unwrap()));
        assert!(!targets.contains(&Square::new(5, 4).unwrap()));

        let board = editing().with_piece_at((5u8, 5u8), Piece::from_sfen("+r")).unwrap();
        assert_eq!(20, movable_squares(&board, (5u8, 5u8)).unwrap().len());

        let board = editing().with_piece_at((5u8, 5u8), Piece::from_sfen("+P")).unwrap();
        assert_eq!(
            vec![(4, 4), (5, 4), (6, 4), (4, 5), (6, 5), (5, 6)],
            points(&movable_squares(&board, (5u8, 5u8)).unwrap())
        );
    }

    #[test]
    fn never_lands_on_own_piece() {
        let board = Board::hirate();
        for from in Square::iter() {
            if let Some(pc) = board.piece_at(from) {
                for to in movable_squares(&board, from).unwrap() {
                    assert_ne!(Some(pc.color), board.piece_at(to).map(|p| p.color), "{from} -> {to}");
                }
            }
        }
    }

    #[test]
    fn empty_origin() {
        let board = Board::hirate();
        assert!(matches!(movable_squares(&board, (5u8, 5u8)), Err(ShogiError::EmptySquare(_))));
        assert!(matches!(movable_squares(&board, 81usize), Err(ShogiError::OutOfBounds(_))));
    }

    #[test]
    fn drops() {
        let pc = |s: &str| Piece::from_sfen(s).unwrap();
        let board = editing();
        assert_eq!(81, droppable_squares(&board, pc("B")).unwrap().len());
        assert_eq!(72, droppable_squares(&board, pc("P")).unwrap().len());
        assert_eq!(72, droppable_squares(&board, pc("p")).unwrap().len());
        assert_eq!(72, droppable_squares(&board, pc("l")).unwrap().len());
        assert_eq!(63, droppable_squares(&board, pc("n")).unwrap().len());

        let board = apply(&board, &["P*4d"]);
        let black = droppable_squares(&board, pc("P")).unwrap();
        assert_eq!(64, black.len());
        assert!(black.iter().all(|sq| sq.x() != 4));
        assert_eq!(71, droppable_squares(&board, pc("p")).unwrap().len());

        assert!(matches!(droppable_squares(&board, pc("+P")), Err(ShogiError::InvalidDrop(_))));
    }

    #[test]
    fn promoted_pawn_does_not_block_pawn_drop() {
        let pc = |s: &str| Piece::from_sfen(s).unwrap();
        let board = editing().with_piece_at((4u8, 4u8), Some(pc("+P"))).unwrap();
        assert_eq!(71, droppable_squares(&board, pc("P")).unwrap().len());
    }
}
