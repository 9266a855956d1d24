//! FEN piece-placement parsing and serialization.
//!
//! Only the piece-placement field of Forsyth-Edwards Notation is handled;
//! side to move, castling rights and the move counters are the server's
//! concern and never reach the client. Ranks appear in the string from 8
//! down to 1, separated by `/`, with digit runs encoding empty squares.
//!
//! Parsing is strict: each of the 8 rows must account for exactly 8 squares
//! and only piece letters and the digits 1-8 are accepted. The serializer
//! always emits canonical digit runs; the parser additionally tolerates
//! non-canonical runs (e.g. `11` for `2`) since they still place every piece
//! unambiguously.

use crate::error::{Error, Result};
use crate::piece::Piece;
use crate::square::Square;

/// FEN of the standard starting placement.
pub const INITIAL_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Piece placement: at most one piece per square, absence means empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Placement {
    squares: [Option<Piece>; Square::COUNT],
}

impl Placement {
    /// A board with no pieces.
    pub fn empty() -> Placement {
        Placement {
            squares: [None; Square::COUNT],
        }
    }

    /// The standard starting placement.
    pub fn initial() -> Placement {
        // The constant is part of the crate; failure to parse it is a
        // packaging bug, fatal by contract.
        Placement::from_fen(INITIAL_PLACEMENT).expect("initial placement FEN is valid")
    }

    /// Piece on the given square, if any.
    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Puts a piece on the square, replacing any occupant.
    #[inline]
    pub fn set(&mut self, square: Square, piece: Piece) {
        self.squares[square.index()] = Some(piece);
    }

    /// Removes and returns the piece on the square.
    #[inline]
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index()].take()
    }

    /// Iterates over occupied squares in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.get(sq).map(|p| (sq, p)))
    }

    /// Number of pieces on the board.
    pub fn len(&self) -> usize {
        self.squares.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.iter().all(Option::is_none)
    }

    /// Parses a FEN piece-placement field.
    pub fn from_fen(fen: &str) -> Result<Placement> {
        let malformed = |reason: &str| Error::MalformedFen {
            fen: fen.to_string(),
            reason: reason.to_string(),
        };

        let rows: Vec<&str> = fen.split('/').collect();
        if rows.len() != 8 {
            return Err(malformed("expected 8 rank rows"));
        }

        let mut placement = Placement::empty();
        // Row 0 of the string is rank 8.
        for (i, row) in rows.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file: u8 = 0;
            for c in row.chars() {
                if file >= 8 {
                    return Err(malformed("rank row covers more than 8 squares"));
                }
                match c {
                    '1'..='8' => file += c as u8 - b'0',
                    _ => match Piece::from_fen_char(c) {
                        Some(piece) => {
                            placement.set(Square::new(file, rank), piece);
                            file += 1;
                        }
                        None => return Err(malformed("unrecognized character")),
                    },
                }
            }
            if file != 8 {
                return Err(malformed("rank row covers fewer than 8 squares"));
            }
        }
        Ok(placement)
    }

    /// Serializes into the canonical FEN piece-placement field. Output always
    /// re-parses to an equal placement.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.get(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push((b'0' + empty) as char);
                            empty = 0;
                        }
                        fen.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push((b'0' + empty) as char);
            }
            if rank != 0 {
                fen.push('/');
            }
        }
        fen
    }
}

impl std::fmt::Debug for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Placement").field(&self.to_fen()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{Color, PieceKind};

    #[test]
    fn test_initial_placement_layout() {
        //! Spot-checks the starting position after parsing
        let placement = Placement::initial();
        assert_eq!(placement.len(), 32);

        let e1 = placement.get(Square::E1).expect("white king on e1");
        assert_eq!(e1.kind, PieceKind::King);
        assert_eq!(e1.color, Color::White);

        let a8 = placement.get(Square::A8).expect("black rook on a8");
        assert_eq!(a8.kind, PieceKind::Rook);
        assert_eq!(a8.color, Color::Black);

        assert_eq!(placement.get(Square::new(4, 3)), None, "e4 starts empty");
    }

    #[test]
    fn test_round_trip_initial() {
        //! serialize(parse(fen)) == fen for the canonical starting string
        let placement = Placement::from_fen(INITIAL_PLACEMENT).unwrap();
        assert_eq!(placement.to_fen(), INITIAL_PLACEMENT);
    }

    #[test]
    fn test_round_trip_sparse_positions() {
        for fen in [
            "8/8/8/8/8/8/8/8",
            "4k3/8/8/8/8/8/8/4K3",
            "r3k2r/8/8/8/8/8/8/R3K2R",
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR",
            "8/P7/8/8/8/8/7p/8",
        ] {
            let placement = Placement::from_fen(fen).unwrap();
            assert_eq!(placement.to_fen(), fen, "canonical FEN must round trip");
        }
    }

    #[test]
    fn test_parse_accepts_non_canonical_digit_runs() {
        //! "11" covers the same squares as "2"; the pieces land in the same
        //! places, only the spelling differs. Serialization stays canonical.
        let plain = Placement::from_fen("4k3/8/8/8/8/8/8/4K3").unwrap();
        let split = Placement::from_fen("1111k111/44/8/8/8/26/8/1111K12").unwrap();
        assert_eq!(plain, split);
        assert_eq!(split.to_fen(), "4k3/8/8/8/8/8/8/4K3");

        // A run that overflows its row is still rejected.
        assert!(Placement::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN11").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let cases = [
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP", "7 rows"),
            ("rnbqkbnr/pppppppp/8/8/8/8/8/PPPPPPPP/RNBQKBNR", "9 rows"),
            ("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR", "short row"),
            ("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR", "long row"),
            ("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR", "digit 9"),
            ("rnbqkbnr/pppppppp/0/8/8/8/PPPPPPPP/RNBQKBNR", "digit 0"),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX", "bad letter"),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR extra", "space"),
        ];
        for (fen, what) in cases {
            assert!(
                matches!(
                    Placement::from_fen(fen),
                    Err(Error::MalformedFen { .. })
                ),
                "{what} should be rejected: {fen:?}"
            );
        }
    }

    #[test]
    fn test_set_replaces_occupant() {
        let mut placement = Placement::empty();
        let sq = Square::new(3, 3);
        placement.set(sq, Piece::new(PieceKind::Pawn, Color::White));
        placement.set(sq, Piece::new(PieceKind::Queen, Color::Black));
        assert_eq!(placement.len(), 1, "at most one piece per square");
        assert_eq!(placement.get(sq).unwrap().kind, PieceKind::Queen);
    }
}
