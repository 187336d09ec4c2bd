//! 8x8 mailbox grid. Pure data: placement queries and edits, no rules.

use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Board {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Standard initial placement.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for color in Color::ALL {
            for (col, kind) in BACK_RANK.iter().enumerate() {
                board.set(Square::at(color.back_row(), col), Some(Piece::new(color, *kind)));
                board.set(
                    Square::at(color.pawn_start_row(), col),
                    Some(Piece::new(color, PieceKind::Pawn)),
                );
            }
        }
        board
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.cells[square.row()][square.col()]
    }

    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.row()][square.col()] = piece;
    }

    /// Removes and returns whatever stands on `square`.
    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.row()][square.col()].take()
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Occupied squares with their pieces, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|piece| (sq, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// First king of `color` in row-major order.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.is(color, PieceKind::King))
            .map(|(sq, _)| sq)
    }

    pub fn count(&self, color: Color, kind: PieceKind) -> usize {
        self.pieces().filter(|(_, piece)| piece.is(color, kind)).count()
    }
}
