use crate::attacks::{attacked_squares, is_square_attacked};
use crate::board::Position;
use crate::execution::Execution;
use crate::square::Square;
use crate::types::*;

/// Legal executions for the side to move, returning a freshly allocated vector.
pub fn side_legal_executions(pos: &Position) -> Vec<Execution> {
    let mut out = Vec::with_capacity(64);
    side_legal_executions_into(pos, &mut out);
    out
}

/// Legal executions for the side to move into the provided buffer, reusing it across calls.
pub fn side_legal_executions_into(pos: &Position, out: &mut Vec<Execution>) {
    out.clear();
    for piece in pos.pieces_of(pos.side_to_move) {
        pseudo_legal_into(&piece, pos, out);
    }
    out.retain(|exec| leaves_king_safe(pos, exec));
}

/// Whether the side to move has any legal execution. Stops at the first one.
pub fn has_legal_execution(pos: &Position) -> bool {
    let mut buf = Vec::with_capacity(32);
    for piece in pos.pieces_of(pos.side_to_move) {
        buf.clear();
        pseudo_legal_into(&piece, pos, &mut buf);
        if buf.iter().any(|exec| leaves_king_safe(pos, exec)) {
            return true;
        }
    }
    false
}

/// Pseudo-legal executions of `piece` that do not leave its own king attacked.
pub fn legal_executions(piece: &Piece, pos: &Position) -> Vec<Execution> {
    let mut out = pseudo_legal_executions(piece, pos);
    out.retain(|exec| leaves_king_safe(pos, exec));
    out
}

/// Executions that follow the piece's movement rules, ignoring king safety.
pub fn pseudo_legal_executions(piece: &Piece, pos: &Position) -> Vec<Execution> {
    let mut out = Vec::with_capacity(16);
    pseudo_legal_into(piece, pos, &mut out);
    out
}

// State-valid from the mover's point of view. For pieces of the side to move
// this is exactly `simulate(..).is_state_valid()`.
fn leaves_king_safe(pos: &Position, exec: &Execution) -> bool {
    !pos.simulate(exec).is_king_in_check(exec.color())
}

fn pseudo_legal_into(piece: &Piece, pos: &Position, out: &mut Vec<Execution>) {
    let targets = attacked_squares(piece, pos);
    match piece.kind {
        PieceKind::Pawn => gen_pawn(piece, pos, out),
        PieceKind::King => {
            push_targets(piece, pos, targets, out);
            for side in [CastleSide::Kingside, CastleSide::Queenside] {
                if let Some(exec) = castle_execution(piece, pos, side) {
                    out.push(exec);
                }
            }
        }
        _ => push_targets(piece, pos, targets, out),
    }
}

fn push_targets(piece: &Piece, pos: &Position, targets: crate::Bitboard, out: &mut Vec<Execution>) {
    for to in targets {
        match pos.piece_at(to) {
            Some(occupant) if !occupant.is_enemy_of(piece) => {}
            _ => out.push(Execution::single(*piece, to)),
        }
    }
}

fn push_pawn_move(pawn: &Piece, to: Square, out: &mut Vec<Execution>) {
    if to.rank() == pawn.color.promotion_rank() {
        for kind in PieceKind::PROMOTIONS {
            out.push(Execution::promotion(*pawn, to, kind));
        }
    } else {
        out.push(Execution::single(*pawn, to));
    }
}

fn gen_pawn(pawn: &Piece, pos: &Position, out: &mut Vec<Execution>) {
    let dir = pawn.color.forward();

    for to in crate::attacks::pawn_attacks(pawn.square, pawn.color) {
        if pos.piece_at(to).is_some_and(|occ| occ.is_enemy_of(pawn)) {
            push_pawn_move(pawn, to, out);
        }
    }

    if let Some(one) = pawn.square.offset(0, dir)
        && pos.piece_at(one).is_none()
    {
        push_pawn_move(pawn, one, out);
        if pawn.square.rank() == pawn.color.pawn_rank()
            && let Some(two) = one.offset(0, dir)
            && pos.piece_at(two).is_none()
        {
            out.push(Execution::single(*pawn, two));
        }
    }

    if pawn.square.rank() == pawn.color.en_passant_rank() {
        for df in [-1, 1] {
            if let Some(beside) = pawn.square.offset(df, 0)
                && let Some(victim) = pos.piece_at(beside)
                && victim.kind == PieceKind::Pawn
                && victim.en_passant_candidate
                && victim.is_enemy_of(pawn)
                && let Some(to) = pawn.square.offset(df, dir)
                && pos.piece_at(to).is_none()
            {
                out.push(Execution::en_passant(*pawn, to, victim));
            }
        }
    }
}

/// The rook `king` would castle with on `side`, if castling is available now.
fn castle_rook(king: &Piece, pos: &Position, side: CastleSide) -> Option<Piece> {
    let home = king.color.home_rank();
    if king.kind != PieceKind::King || king.has_moved || king.square != Square::new(4, home)? {
        return None;
    }

    let rook_sq = Square::new(side.rook_file(), home)?;
    let rook = pos.piece_at(rook_sq)?;
    if rook.kind != PieceKind::Rook || rook.color != king.color || rook.has_moved {
        return None;
    }

    let dir = side.direction();
    let mut cursor = king.square.offset(dir, 0)?;
    while cursor != rook_sq {
        if pos.piece_at(cursor).is_some() {
            return None;
        }
        cursor = cursor.offset(dir, 0)?;
    }

    if pos.is_king_in_check(king.color) {
        return None;
    }
    // Only the square the king passes over; the landing square is covered by
    // the ordinary legality filter.
    let transit = king.square.offset(dir, 0)?;
    if is_square_attacked(pos, transit, king.color.other()) {
        return None;
    }
    Some(rook)
}

/// Neither king nor rook has moved, the path is clear, the king is not in
/// check and does not pass over an attacked square.
pub fn is_castle_available(king: &Piece, pos: &Position, side: CastleSide) -> bool {
    castle_rook(king, pos, side).is_some()
}

/// King two squares towards the rook, rook to the square the king passed over.
pub fn castle_execution(king: &Piece, pos: &Position, side: CastleSide) -> Option<Execution> {
    let rook = castle_rook(king, pos, side)?;
    let dir = side.direction();
    let king_to = king.square.offset(2 * dir, 0)?;
    let rook_to = king.square.offset(dir, 0)?;
    Some(Execution::castle(*king, king_to, rook, rook_to))
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
