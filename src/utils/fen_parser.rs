//! FEN-to-GameState parser.
//!
//! Position setup only: placement, side to move, castling availability and the
//! en-passant square. The move counters are accepted and ignored since the
//! rules core keeps no clocks.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::castling_rights::CastleSide;
use crate::game_state::chess_types::*;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;

    for counter in parts.by_ref().take(2) {
        counter
            .parse::<u32>()
            .map_err(|_| invalid(format!("bad move counter '{counter}'")))?;
    }
    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let board = parse_board(board_part)?;
    let side_to_move = parse_side_to_move(side_part)?;
    let castling_rights = parse_castling_rights(castling_part)?;
    let en_passant_target = parse_en_passant_square(en_passant_part)?;

    Ok(GameState::from_parts(
        board,
        side_to_move,
        castling_rights,
        en_passant_target,
    ))
}

fn invalid(msg: impl Into<String>) -> ChessError {
    ChessError::InvalidFen(msg.into())
}

fn parse_board(board_part: &str) -> ChessResult<Board> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    let mut board = Board::empty();
    // FEN lists rank 8 first, which is row 0.
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("invalid empty-square count '{ch}'")));
                }
                col += empty_count as usize;
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| invalid(format!("invalid piece character '{ch}'")))?;
            if col >= 8 {
                return Err(invalid("rank has too many files"));
            }
            board.set(Square::at(row, col), Some(piece));
            col += 1;
        }

        if col != 8 {
            return Err(invalid(format!("rank '{rank_str}' does not sum to 8 files")));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        other => Err(invalid(format!("invalid side to move '{other}'"))),
    }
}

/// Rights absent from the field are recorded as lost; a side with neither
/// letter is treated as if its king had moved.
fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    let mut rights = CastlingRights::all();
    if castling_part != "-" && castling_part.chars().any(|ch| !"KQkq".contains(ch)) {
        return Err(invalid(format!("invalid castling field '{castling_part}'")));
    }

    for (color, king_ch, queen_ch) in [(Color::White, 'K', 'Q'), (Color::Black, 'k', 'q')] {
        let kingside = castling_part.contains(king_ch);
        let queenside = castling_part.contains(queen_ch);
        if !kingside {
            rights.revoke_rook(color, CastleSide::Kingside);
        }
        if !queenside {
            rights.revoke_rook(color, CastleSide::Queenside);
        }
        if !kingside && !queenside {
            rights.revoke_king(color);
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    let square = Square::from_coordinate(en_passant_part)?;
    if square.row() != 2 && square.row() != 5 {
        return Err(invalid(format!("en-passant square {square} is not on rank 3 or 6")));
    }
    Ok(Some(square))
}
