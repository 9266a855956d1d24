//! Piece kinds, colors and the FEN character mapping.

/// Piece ownership / side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The other color.
    #[inline]
    pub const fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Side to move after `ply` completed half-moves, White moving first.
    #[inline]
    pub const fn from_ply(ply: usize) -> Color {
        if ply % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// 0 for White, 1 for Black; the color bit of [`Piece::code`].
    #[inline]
    pub const fn bit(self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

/// The six chess piece kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kind column of the frozen numeric scheme, 0 = pawn .. 5 = king.
    #[inline]
    pub const fn index(self) -> i8 {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Uppercase FEN letter for this kind.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

/// A colored piece. Empty squares are represented by absence (`Option`), not
/// by a sentinel value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }

    /// Parses a FEN piece letter: uppercase is white, lowercase is black.
    pub fn from_fen_char(c: char) -> Option<Piece> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_uppercase() {
            'P' => PieceKind::Pawn,
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'R' => PieceKind::Rook,
            'Q' => PieceKind::Queen,
            'K' => PieceKind::King,
            _ => return None,
        };
        Some(Piece::new(kind, color))
    }

    /// FEN letter for this piece, cased by color.
    pub fn fen_char(self) -> char {
        match self.color {
            Color::White => self.kind.letter(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }

    /// Frozen numeric code shared with sprite-sheet consumers:
    /// `kind_index * 2 + color_bit`, so `code / 2` selects the kind column
    /// and `code % 2` the color row. White pawn = 0, black king = 11.
    #[inline]
    pub const fn code(self) -> i8 {
        self.kind.index() * 2 + self.color.bit()
    }

    /// Inverse of [`Piece::code`]; `None` for codes outside `[0, 11]`.
    pub const fn from_code(code: i8) -> Option<Piece> {
        if code < 0 || code > 11 {
            return None;
        }
        let color = if code % 2 == 0 {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(PieceKind::ALL[(code / 2) as usize], color))
    }
}
