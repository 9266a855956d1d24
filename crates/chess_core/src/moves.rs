//! Compact move encoding.
//!
//! A move travels as a 16-bit packed integer, LSB first:
//!
//! | bits      | field                                   |
//! |-----------|-----------------------------------------|
//! | `[0..5]`  | destination square                      |
//! | `[6..11]` | origin square                           |
//! | `[12..13]`| promotion piece (knight/bishop/rook/queen) |
//! | `[14..15]`| move type (normal/castling/promotion/en passant) |
//!
//! This is the wire representation the server emits for every legal move and
//! every completed move. Decoding is pure bit masking and total over the low
//! 16 bits; the field types make encoding total as well, so the codec round
//! trips the entire 16-bit space.

use crate::piece::PieceKind;
use crate::square::Square;

/// How a move is applied to the placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveType {
    Normal = 0,
    Castling = 1,
    Promotion = 2,
    EnPassant = 3,
}

/// Piece a pawn promotes to. Meaningful only when the move type is
/// [`MoveType::Promotion`]; the field is still carried (and round-tripped)
/// for every move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PromotionFlag {
    Knight = 0,
    Bishop = 1,
    Rook = 2,
    Queen = 3,
}

impl PromotionFlag {
    /// The piece kind this flag promotes to.
    pub const fn piece_kind(self) -> PieceKind {
        match self {
            PromotionFlag::Knight => PieceKind::Knight,
            PromotionFlag::Bishop => PieceKind::Bishop,
            PromotionFlag::Rook => PieceKind::Rook,
            PromotionFlag::Queen => PieceKind::Queen,
        }
    }
}

/// A decoded move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: PromotionFlag,
    pub move_type: MoveType,
}

impl Move {
    /// Decodes the 16-bit wire encoding. Total: any `u16` is a valid
    /// encoding, callers holding wider integers truncate first.
    pub const fn decode(raw: u16) -> Move {
        let to = Square::from_index_unchecked((raw & 0x3f) as u8);
        let from = Square::from_index_unchecked(((raw >> 6) & 0x3f) as u8);
        let promotion = match (raw >> 12) & 0x3 {
            0 => PromotionFlag::Knight,
            1 => PromotionFlag::Bishop,
            2 => PromotionFlag::Rook,
            _ => PromotionFlag::Queen,
        };
        let move_type = match (raw >> 14) & 0x3 {
            0 => MoveType::Normal,
            1 => MoveType::Castling,
            2 => MoveType::Promotion,
            _ => MoveType::EnPassant,
        };
        Move {
            from,
            to,
            promotion,
            move_type,
        }
    }

    /// Inverse of [`Move::decode`].
    pub const fn encode(self) -> u16 {
        self.to.index() as u16
            | (self.from.index() as u16) << 6
            | (self.promotion as u16) << 12
            | (self.move_type as u16) << 14
    }

    /// Convenience constructor for a normal move.
    pub const fn normal(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            promotion: PromotionFlag::Knight,
            move_type: MoveType::Normal,
        }
    }
}
