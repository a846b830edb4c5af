//! Algebraic move text to [`MoveDescriptor`].
//!
//! Accepted forms: `e4`, `exd5`, `Nf3`, `Nbd7`, `R1e2`, `Qxh7+`, `e8=Q`, `O-O`,
//! `o-o-o`, `0-0`. Piece letters are case-insensitive except that a leading
//! file letter (`a`..`h`) always means a pawn.

use std::str::FromStr;

use crate::descriptor::{Disambiguator, MoveDescriptor};
use crate::error::NotationError;
use crate::square::Square;
use crate::types::{CastleSide, PieceKind};

impl FromStr for MoveDescriptor {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().trim_end_matches(['+', '#', '!', '?']);
        if text.is_empty() {
            return Err(NotationError::Empty);
        }

        match text.to_ascii_uppercase().replace('0', "O").as_str() {
            "O-O" => return Ok(MoveDescriptor::Castle(CastleSide::Kingside)),
            "O-O-O" => return Ok(MoveDescriptor::Castle(CastleSide::Queenside)),
            _ => {}
        }

        let (body, promotion) = match text.split_once('=') {
            Some((body, promo)) => (body, Some(parse_promotion(promo)?)),
            None => (text, None),
        };

        let chars: Vec<char> = body.chars().filter(|&c| c != 'x').collect();
        let Some(&first) = chars.first() else {
            return Err(NotationError::Malformed(s.to_string()));
        };

        let (kind, rest) = if ('a'..='h').contains(&first) {
            (PieceKind::Pawn, &chars[..])
        } else {
            let kind = PieceKind::from_symbol(first).ok_or(NotationError::InvalidPiece(first))?;
            (kind, &chars[1..])
        };

        if promotion.is_some() && kind != PieceKind::Pawn {
            return Err(NotationError::InvalidPromotion(s.to_string()));
        }

        let (disambiguator, dest) = match rest.len() {
            2 => (None, rest),
            3 => (Some(parse_disambiguator(rest[0], s)?), &rest[1..]),
            _ => return Err(NotationError::Malformed(s.to_string())),
        };
        let destination: Square = dest.iter().collect::<String>().parse()?;

        Ok(MoveDescriptor::Regular {
            kind,
            disambiguator,
            destination,
            promotion,
        })
    }
}

fn parse_promotion(text: &str) -> Result<PieceKind, NotationError> {
    let mut chars = text.chars();
    match (chars.next().and_then(PieceKind::from_symbol), chars.next()) {
        (Some(kind), None) if PieceKind::PROMOTIONS.contains(&kind) => Ok(kind),
        _ => Err(NotationError::InvalidPromotion(text.to_string())),
    }
}

fn parse_disambiguator(ch: char, text: &str) -> Result<Disambiguator, NotationError> {
    match ch {
        'a'..='h' => Ok(Disambiguator::File(ch as u8 - b'a')),
        '1'..='8' => Ok(Disambiguator::Rank(ch as u8 - b'1')),
        _ => Err(NotationError::Malformed(text.to_string())),
    }
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
