//! Board state machine.
//!
//! [`Board`] owns the current piece placement, the history of reached
//! positions (as FEN snapshots, index 0 = initial position) and a review
//! cursor into that history. It never judges legality: moves arrive
//! pre-validated from the server and are applied verbatim.
//!
//! # Apply vs. commit
//!
//! Applying a move ([`Board::apply_move`]) and committing the resulting
//! position to history ([`Board::push_history`]) are separate steps, so a
//! server-confirmed move and a speculative local preview can never be
//! confused: only confirmed moves are pushed.
//!
//! # Live vs. reviewing
//!
//! The board is *live* when the cursor sits at the history tip and
//! *reviewing* otherwise. [`Board::goto_history`] moves freely between the
//! two without touching history contents; the legal-move list always refers
//! to the live tip and is simply not actionable while reviewing.

use crate::error::{Error, Result};
use crate::fen::{Placement, INITIAL_PLACEMENT};
use crate::moves::{Move, MoveType, PromotionFlag};
use crate::piece::{Color, Piece};
use crate::square::Square;

/// Board state: placement, position history, review cursor and the current
/// legal-move list.
#[derive(Clone, Debug)]
pub struct Board {
    placement: Placement,
    /// FEN snapshots of reached positions; index 0 is the initial position.
    fens: Vec<String>,
    /// Index of the displayed position within `fens`.
    cursor: usize,
    /// Decoded legal moves for the live position's side to move.
    legal_moves: Vec<Move>,
}

impl Board {
    /// A board at the standard starting position with empty history and no
    /// legal moves yet.
    pub fn new() -> Board {
        Board {
            placement: Placement::initial(),
            fens: vec![INITIAL_PLACEMENT.to_string()],
            cursor: 0,
            legal_moves: Vec::new(),
        }
    }

    /// The displayed placement.
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// FEN snapshots of every reached position, oldest first.
    pub fn fens(&self) -> &[String] {
        &self.fens
    }

    /// Index of the displayed position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of completed half-moves committed to history.
    pub fn ply(&self) -> usize {
        self.fens.len() - 1
    }

    /// Whether the cursor sits at the history tip.
    pub fn is_live(&self) -> bool {
        self.cursor == self.fens.len() - 1
    }

    /// Decoded legal moves for the live position.
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    /// Decodes `raw` and replaces the legal-move list wholesale. The list
    /// ordering is the server's; submission happens by index into it.
    pub fn set_legal_moves(&mut self, raw: &[u16]) {
        self.legal_moves = raw.iter().map(|&r| Move::decode(r)).collect();
    }

    /// Finds the legal move matching a candidate gesture. For promotions the
    /// requested flag selects among the four variants; `None` defaults to
    /// queen. Returns the index into the legal-move list together with the
    /// move, ready for submit-by-index.
    pub fn find_legal(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PromotionFlag>,
    ) -> Option<(usize, Move)> {
        self.legal_moves
            .iter()
            .enumerate()
            .find(|(_, mv)| {
                mv.from == from
                    && mv.to == to
                    && (mv.move_type != MoveType::Promotion
                        || mv.promotion == promotion.unwrap_or(PromotionFlag::Queen))
            })
            .map(|(i, mv)| (i, *mv))
    }

    /// Applies a move to the current placement. History and cursor are not
    /// touched; the caller commits with [`Board::push_history`] once the
    /// move is server-confirmed.
    ///
    /// Fails with [`Error::NoPieceAtSource`] when the origin square (or the
    /// en-passant victim square) is empty. The server provides the move
    /// list, so this signals a protocol-trust violation; callers log it and
    /// drop the move instead of corrupting the placement further.
    pub fn apply_move(&mut self, mv: Move) -> Result<()> {
        let piece = self
            .placement
            .get(mv.from)
            .ok_or(Error::NoPieceAtSource { square: mv.from })?;

        // A capture at the destination square, if any. En-passant
        // destinations are empty by rule, so this is a no-op there.
        self.placement.remove(mv.to);

        match mv.move_type {
            MoveType::Normal => {}

            MoveType::Castling => {
                // The rook relocation is a fixed table keyed on the king's
                // destination, never derived from the origin square.
                match mv.to {
                    Square::G1 => self.relocate(Square::H1, Square::F1)?,
                    Square::C1 => self.relocate(Square::A1, Square::D1)?,
                    Square::G8 => self.relocate(Square::H8, Square::F8)?,
                    Square::C8 => self.relocate(Square::A8, Square::D8)?,
                    _ => {}
                }
            }

            MoveType::EnPassant => {
                // The captured pawn sits one rank behind the destination,
                // relative to the mover's direction of travel.
                let behind = match piece.color {
                    Color::White => mv.to.index().checked_sub(8),
                    Color::Black => Some(mv.to.index() + 8),
                };
                let victim = behind
                    .and_then(Square::from_index)
                    .ok_or(Error::NoPieceAtSource { square: mv.to })?;
                self.placement
                    .remove(victim)
                    .ok_or(Error::NoPieceAtSource { square: victim })?;
            }

            MoveType::Promotion => {
                self.placement.remove(mv.from);
                self.placement
                    .set(mv.to, Piece::new(mv.promotion.piece_kind(), piece.color));
                return Ok(());
            }
        }

        self.placement.remove(mv.from);
        self.placement.set(mv.to, piece);
        Ok(())
    }

    /// Commits the current placement to history and moves the cursor to the
    /// new tip. Called exactly once per server-confirmed move.
    pub fn push_history(&mut self) {
        self.fens.push(self.placement.to_fen());
        self.cursor = self.fens.len() - 1;
    }

    /// Moves the cursor to `index` and re-parses that snapshot into the
    /// current placement. Rejects out-of-range indices; history contents and
    /// the legal-move list are never modified.
    pub fn goto_history(&mut self, index: usize) -> Result<()> {
        let Some(fen) = self.fens.get(index) else {
            return Err(Error::HistoryOutOfRange {
                index,
                len: self.fens.len(),
            });
        };
        self.placement = Placement::from_fen(fen)?;
        self.cursor = index;
        Ok(())
    }

    /// Moves the cursor back to the live tip.
    pub fn goto_live(&mut self) -> Result<()> {
        self.goto_history(self.fens.len() - 1)
    }

    fn relocate(&mut self, from: Square, to: Square) -> Result<()> {
        let piece = self
            .placement
            .remove(from)
            .ok_or(Error::NoPieceAtSource { square: from })?;
        self.placement.set(to, piece);
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
