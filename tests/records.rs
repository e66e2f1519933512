//! Reads and writes whole records through the public API.

use shogi_kifu::parser::{export_kif, parse_auto, parse_ki2, parse_kif};
use shogi_kifu::{Board, Color, FinishTrigger, Kifu, ParseError, Piece, PieceType, Square};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const KI2_GAME: &str = "開始日時：2020/01/01
手合割：平手
先手：先手太郎
後手：後手花子

▲７六歩 △３四歩 ▲２二角成 △同銀 ▲６八銀 △３三銀
▲７七銀 △４四銀 ▲６六銀 △６二銀 ▲５五銀 △同銀
*銀交換
▲４八銀 △５四歩 ▲３六歩 △５三銀 ▲３七銀 △４四銀上
まで18手で投了
";

/// Counts every base kind on the board and in both hands.
fn material(board: &Board) -> Vec<usize> {
    PieceType::base_kinds()
        .map(|base| {
            let on_board = Square::iter()
                .filter_map(|sq| board.piece_at(sq))
                .filter(|pc| pc.piece_type.base() == base)
                .count();
            let in_hand: usize = Color::iter()
                .map(|color| board.hand().get(Piece { piece_type: base, color }) as usize)
                .sum();
            on_board + in_hand
        })
        .collect()
}

#[test]
fn ki2_game() {
    init();

    let kifu = parse_ki2(KI2_GAME).unwrap();
    assert_eq!(18, kifu.moves().len());
    assert_eq!(19, kifu.boards().len());
    assert_eq!(Some(FinishTrigger::Resignation), kifu.finish_trigger());

    let header = kifu.header().unwrap();
    assert_eq!(Some("先手太郎"), header.sente.as_deref());
    assert_eq!(Some("後手花子"), header.gote.as_deref());

    assert_eq!(Some("銀交換"), kifu.boards()[12].comment());
    assert_eq!("同　銀(44)", kifu.moves()[11].kif);

    let start = material(&kifu.boards()[0]);
    for (i, m) in kifu.moves().iter().enumerate() {
        let next = kifu.boards()[i].apply_move(&m.mv).unwrap();
        assert!(kifu.boards()[i + 1].same_position(&next), "position differs after move #{}", i + 1);
        assert_eq!(start, material(&kifu.boards()[i + 1]), "material changed at move #{}", i + 1);
    }
}

#[test]
fn ki2_to_kif_and_back() {
    init();

    let ki2 = parse_ki2(KI2_GAME).unwrap();
    let exported = export_kif(&ki2);
    assert!(exported.starts_with("手合割：平手\n先手：先手太郎\n後手：後手花子\n"));
    assert!(exported.contains("*銀交換"));
    assert!(exported.ends_with("まで18手で投了"));

    let kif = parse_kif(&exported).unwrap();
    assert_eq!(ki2.moves(), kif.moves());
    assert_eq!(ki2.header(), kif.header());
    assert_eq!(ki2.finish_trigger(), kif.finish_trigger());
    assert_eq!(ki2.last_board().to_sfen(), kif.last_board().to_sfen());
    assert_eq!(Some("銀交換"), kif.boards()[12].comment());
}

#[test]
fn record_round_trip() {
    init();

    let moves = "7g7f 3c3d 8h2b+ 3a2b B*4e 2b3a 2g2f 8b2b 2f2e";
    let kifu = Kifu::from_record(Some("test"), None, Some(moves), false).unwrap();
    let parsed = parse_kif(&export_kif(&kifu)).unwrap();

    let sfen: Vec<String> = parsed.moves().iter().map(|m| m.mv.to_string()).collect();
    assert_eq!(moves, sfen.join(" "));
    assert_eq!(kifu.last_board().squares(), parsed.last_board().squares());
}

#[test]
fn auto_detect() {
    init();

    let kifu = Kifu::from_record(None, None, Some("7g7f 3c3d"), false).unwrap();
    let from_kif = parse_auto(&export_kif(&kifu)).unwrap();
    let from_ki2 = parse_auto("▲７六歩 △３四歩").unwrap();

    assert_eq!(kifu.moves(), from_kif.moves());
    assert_eq!(kifu.moves(), from_ki2.moves());

    match parse_auto("▲７六歩 △３四歩 ▲５五飛") {
        Err(ParseError::Unrecognized { kif, ki2 }) => {
            assert!(matches!(*kif, ParseError::NoMoveSectionFound));
            assert!(matches!(*ki2, ParseError::PieceNotInHand { ordinal: 3, .. }));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
