use super::*;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

#[test]
fn test_knight_attacks() {
    assert_eq!(knight_attacks(sq("e4")).len(), 8);

    let attacks = knight_attacks(sq("a1"));
    assert_eq!(attacks.len(), 2);
    assert!(attacks.contains(sq("c2")));
    assert!(attacks.contains(sq("b3")));

    assert_eq!(knight_attacks(sq("h1")).len(), 2);
}

#[test]
fn test_king_attacks() {
    assert_eq!(king_attacks(sq("e4")).len(), 8);
    assert_eq!(king_attacks(sq("a1")).len(), 3);
}

#[test]
fn test_pawn_attacks() {
    let attacks = pawn_attacks(sq("e4"), Color::White);
    assert_eq!(attacks.len(), 2);
    assert!(attacks.contains(sq("d5")));
    assert!(attacks.contains(sq("f5")));

    let attacks = pawn_attacks(sq("a2"), Color::White);
    assert_eq!(attacks.len(), 1);
    assert!(attacks.contains(sq("b3")));

    let attacks = pawn_attacks(sq("e5"), Color::Black);
    assert!(attacks.contains(sq("d4")));
    assert!(attacks.contains(sq("f4")));
}

#[test]
fn test_slide_empty_board() {
    assert_eq!(slide(sq("e4"), Bitboard::EMPTY, &ORTHOGONALS).len(), 14);
    assert_eq!(slide(sq("e4"), Bitboard::EMPTY, &DIAGONALS).len(), 13);
}

#[test]
fn test_slide_stops_on_blocker_inclusive() {
    let occupied = Bitboard::from_square(sq("a4"));
    let attacks = slide(sq("a1"), occupied, &ORTHOGONALS);
    assert!(attacks.contains(sq("a2")));
    assert!(attacks.contains(sq("a3")));
    assert!(attacks.contains(sq("a4")));
    assert!(!attacks.contains(sq("a5")));
    assert!(attacks.contains(sq("b1")));
    assert!(attacks.contains(sq("h1")));
}

#[test]
fn test_attacked_squares_includes_own_pieces() {
    // The rook on a1 "attacks" its own knight on b1 but nothing beyond.
    let pos = Position::startpos();
    let rook = pos.piece_at(sq("a1")).unwrap();
    let attacks = attacked_squares(&rook, &pos);
    assert_eq!(attacks.len(), 2);
    assert!(attacks.contains(sq("a2")));
    assert!(attacks.contains(sq("b1")));
}

#[test]
fn test_queen_blocked_at_start() {
    let pos = Position::startpos();
    let queen = pos.piece_at(sq("d1")).unwrap();
    let attacks = attacked_squares(&queen, &pos);
    assert!(!attacks.contains(sq("h5")));
    assert_eq!(attacks.len(), 5); // c1 e1 c2 d2 e2
}

#[test]
fn test_is_square_attacked_matches_attack_union() {
    let pos = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
        .unwrap();
    for color in [Color::White, Color::Black] {
        let union = attacked_by(&pos, color);
        for target in Square::all() {
            assert_eq!(
                is_square_attacked(&pos, target, color),
                union.contains(target),
                "mismatch on {target} for {color:?}"
            );
        }
    }
}
