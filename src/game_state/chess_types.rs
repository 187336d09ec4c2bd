//! Primitive value types shared by every subsystem: colours, piece kinds,
//! pieces and board squares.

use std::fmt;

use crate::chess_errors::{ChessError, ChessResult};

pub use crate::game_state::board::Board;
pub use crate::game_state::castling_rights::CastlingRights;
pub use crate::game_state::game_state::GameState;

/// Side to move / piece owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a pawn push for this colour. White advances toward row 0.
    #[inline]
    pub const fn forward(self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row holding this colour's king and rooks at the start of the game.
    #[inline]
    pub const fn back_row(self) -> usize {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    #[inline]
    pub const fn pawn_start_row(self) -> usize {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row a pawn of this colour promotes on.
    #[inline]
    pub const fn promotion_row(self) -> usize {
        self.opposite().back_row()
    }

    /// Row a pawn of this colour must stand on to capture en passant.
    #[inline]
    pub const fn en_passant_row(self) -> usize {
        match self {
            Color::White => 3,
            Color::Black => 4,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("White"),
            Color::Black => f.write_str("Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Lower-case FEN letter.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

/// A coloured piece. Empty cells are `None` in a [`Board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    #[inline]
    pub fn is(self, color: Color, kind: PieceKind) -> bool {
        self.color == color && self.kind == kind
    }

    /// FEN letter: upper case for white, lower case for black.
    pub fn fen_char(self) -> char {
        let letter = self.kind.letter();
        match self.color {
            Color::White => letter.to_ascii_uppercase(),
            Color::Black => letter,
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match ch.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some(Self { color, kind })
    }
}

/// Board coordinate. Row 0 is black's back rank (rank 8), column 0 is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Checked constructor for untrusted coordinates.
    pub fn new(row: i32, col: i32) -> ChessResult<Self> {
        Self::offset_from(row, col).ok_or(ChessError::out_of_range(row, col))
    }

    #[inline]
    fn offset_from(row: i32, col: i32) -> Option<Self> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Constructor for coordinates already known to be on the board.
    ///
    /// # Panics
    /// Panics if either coordinate is `>= 8`; only use with constants.
    #[inline]
    pub const fn at(row: usize, col: usize) -> Self {
        assert!(row < 8 && col < 8, "square coordinate out of range");
        Self {
            row: row as u8,
            col: col as u8,
        }
    }

    #[inline]
    pub const fn row(self) -> usize {
        self.row as usize
    }

    #[inline]
    pub const fn col(self) -> usize {
        self.col as usize
    }

    /// The square `(d_row, d_col)` away, or `None` when that leaves the board.
    #[inline]
    pub fn offset(self, d_row: i32, d_col: i32) -> Option<Self> {
        Self::offset_from(self.row as i32 + d_row, self.col as i32 + d_col)
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8).flat_map(|row| (0..8).map(move |col| Square::at(row, col)))
    }

    /// Parses a coordinate such as `e4`. Used for position setup only.
    pub fn from_coordinate(text: &str) -> ChessResult<Self> {
        let mut chars = text.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ChessError::InvalidFen(format!("bad square '{text}'")));
        };
        let col = file as i32 - 'a' as i32;
        let rank = rank as i32 - '0' as i32;
        Self::new(8 - rank, col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = char::from(b'a' + self.col);
        write!(f, "{file}{}", 8 - self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_rejects_out_of_range_coordinates() {
        assert!(Square::new(0, 0).is_ok());
        assert!(Square::new(7, 7).is_ok());
        assert_eq!(
            Square::new(8, 0),
            Err(ChessError::SquareOutOfRange { row: 8, col: 0 })
        );
        assert!(Square::new(-1, 3).is_err());
        assert!(Square::new(3, 8).is_err());
    }

    #[test]
    fn square_coordinates_follow_rank_convention() {
        let e2 = Square::from_coordinate("e2").expect("e2 should parse");
        assert_eq!((e2.row(), e2.col()), (6, 4));
        assert_eq!(e2.to_string(), "e2");
        assert_eq!(Square::at(0, 0).to_string(), "a8");
        assert!(Square::from_coordinate("i9").is_err());
    }

    #[test]
    fn offsets_stop_at_the_edge() {
        let h1 = Square::at(7, 7);
        assert_eq!(h1.offset(1, 0), None);
        assert_eq!(h1.offset(-1, -1), Some(Square::at(6, 6)));
    }

    #[test]
    fn colour_geometry_is_mirrored() {
        assert_eq!(Color::White.promotion_row(), 0);
        assert_eq!(Color::Black.promotion_row(), 7);
        assert_eq!(Color::White.forward(), -Color::Black.forward());
    }

    #[test]
    fn fen_letters_encode_colour_by_case() {
        assert_eq!(Piece::new(Color::White, PieceKind::Knight).fen_char(), 'N');
        assert_eq!(Piece::new(Color::Black, PieceKind::Queen).fen_char(), 'q');
        assert_eq!(
            Piece::from_fen_char('K'),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(Piece::from_fen_char('x'), None);
    }
}
