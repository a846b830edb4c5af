use super::*;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn parse(s: &str) -> MoveDescriptor {
    s.parse().unwrap()
}

#[test]
fn test_pawn_push() {
    assert_eq!(parse("e4"), MoveDescriptor::regular(PieceKind::Pawn, sq("e4")));
}

#[test]
fn test_piece_move_any_case() {
    let expected = MoveDescriptor::regular(PieceKind::Knight, sq("f3"));
    assert_eq!(parse("Nf3"), expected);
    assert_eq!(parse("nf3"), expected);
}

#[test]
fn test_pawn_capture_keeps_file() {
    assert_eq!(
        parse("exd5"),
        MoveDescriptor::Regular {
            kind: PieceKind::Pawn,
            disambiguator: Some(Disambiguator::File(4)),
            destination: sq("d5"),
            promotion: None,
        }
    );
}

#[test]
fn test_lowercase_b_is_a_pawn() {
    let MoveDescriptor::Regular { kind, .. } = parse("bxc3") else {
        panic!("expected a regular move");
    };
    assert_eq!(kind, PieceKind::Pawn);
}

#[test]
fn test_rank_disambiguator() {
    assert_eq!(
        parse("R1e2"),
        MoveDescriptor::Regular {
            kind: PieceKind::Rook,
            disambiguator: Some(Disambiguator::Rank(0)),
            destination: sq("e2"),
            promotion: None,
        }
    );
}

#[test]
fn test_promotion_and_check_suffix() {
    assert_eq!(
        parse("e8=Q+"),
        MoveDescriptor::Regular {
            kind: PieceKind::Pawn,
            disambiguator: None,
            destination: sq("e8"),
            promotion: Some(PieceKind::Queen),
        }
    );
}

#[test]
fn test_castling_forms() {
    for s in ["O-O", "o-o", "0-0", "O-O+"] {
        assert_eq!(parse(s), MoveDescriptor::Castle(CastleSide::Kingside), "{s}");
    }
    for s in ["O-O-O", "o-o-o", "0-0-0"] {
        assert_eq!(parse(s), MoveDescriptor::Castle(CastleSide::Queenside), "{s}");
    }
}

#[test]
fn test_rejects_malformed_input() {
    assert_eq!("".parse::<MoveDescriptor>(), Err(NotationError::Empty));
    assert_eq!("Zf3".parse::<MoveDescriptor>(), Err(NotationError::InvalidPiece('Z')));
    assert!(matches!(
        "e8=K".parse::<MoveDescriptor>(),
        Err(NotationError::InvalidPromotion(_))
    ));
    assert!(matches!(
        "Ne9".parse::<MoveDescriptor>(),
        Err(NotationError::InvalidSquare(_))
    ));
    assert!(matches!(
        "Nbd7e".parse::<MoveDescriptor>(),
        Err(NotationError::Malformed(_))
    ));
}

#[test]
fn test_display_round_trip() {
    for s in ["e4", "Nf3", "ed5", "R1e2", "e8=Q", "O-O", "O-O-O"] {
        assert_eq!(parse(s).to_string(), s);
    }
}
