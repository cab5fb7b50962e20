use std::str::FromStr;
use chess::{Board, BoardStatus, ChessMove, EMPTY, MoveGen, Piece};
use crate::core::move_token::MoveToken;
use crate::core::reconstruction::apply_token;

/// What a move field shows when it can't (or shouldn't) be interpreted as a move.
pub const NULL_LABEL: &str = "Null";

fn piece_letter(piece: Piece) -> &'static str {
    match piece {
        Piece::Pawn => "",
        Piece::Knight => "N",
        Piece::Bishop => "B",
        Piece::Rook => "R",
        Piece::Queen => "Q",
        Piece::King => "K",
    }
}

fn file_letter(index: usize) -> char {
    (b'a' + index as u8) as char
}

fn rank_digit(index: usize) -> char {
    (b'1' + index as u8) as char
}

/// Standard algebraic notation of a legal move. Returns `None` if the move is not legal in `board`.
pub fn san(board: &Board, chess_move: ChessMove) -> Option<String> {
    if !board.legal(chess_move) {
        return None;
    }

    let source = chess_move.get_source();
    let dest = chess_move.get_dest();
    let piece = board.piece_on(source)?;
    let source_file = source.get_file().to_index();
    let dest_file = dest.get_file().to_index();

    let mut result = String::new();

    if piece == Piece::King && (source_file as i32 - dest_file as i32).abs() == 2 {
        result.push_str(if dest_file > source_file { "O-O" } else { "O-O-O" });
    } else {
        let is_capture = board.piece_on(dest).is_some()
            || (piece == Piece::Pawn && source_file != dest_file);

        if piece == Piece::Pawn {
            if is_capture {
                result.push(file_letter(source_file));
            }
        } else {
            result.push_str(piece_letter(piece));
            result.push_str(&disambiguation(board, chess_move, piece));
        }

        if is_capture {
            result.push('x');
        }
        result.push_str(&dest.to_string());

        if let Some(promotion) = chess_move.get_promotion() {
            result.push('=');
            result.push_str(piece_letter(promotion));
        }
    }

    let after = board.make_move_new(chess_move);
    if after.status() == BoardStatus::Checkmate {
        result.push('#');
    } else if *after.checkers() != EMPTY {
        result.push('+');
    }

    Some(result)
}

/// File, rank or full source square needed to tell `chess_move` apart from moves of
/// the same piece type to the same square.
fn disambiguation(board: &Board, chess_move: ChessMove, piece: Piece) -> String {
    let source = chess_move.get_source();
    let rivals = MoveGen::new_legal(board)
        .filter(|x| x.get_dest() == chess_move.get_dest() && x.get_source() != source)
        .filter(|x| board.piece_on(x.get_source()) == Some(piece))
        .map(|x| x.get_source())
        .collect::<Vec<_>>();

    if rivals.is_empty() {
        return String::new();
    }

    let file = source.get_file().to_index();
    let rank = source.get_rank().to_index();

    if rivals.iter().all(|x| x.get_file().to_index() != file) {
        file_letter(file).to_string()
    } else if rivals.iter().all(|x| x.get_rank().to_index() != rank) {
        rank_digit(rank).to_string()
    } else {
        source.to_string()
    }
}

/// Renders a stored move field in the context of `board`.
///
/// The null move, unparsable text, a missing board and moves illegal in `board` all render as `Null`.
pub fn render_move(board: Option<&Board>, raw: &str) -> String {
    interpret_move(board, raw).unwrap_or_else(|| NULL_LABEL.to_string())
}

/// Like [`render_move`], but `None` where the move could not be interpreted.
pub fn interpret_move(board: Option<&Board>, raw: &str) -> Option<String> {
    match MoveToken::from_str(raw).ok()? {
        MoveToken::Null => Some(NULL_LABEL.to_string()),
        MoveToken::Move(chess_move) => san(board?, chess_move),
    }
}

/// The position after `raw` has been played in `board`.
pub fn position_after(board: &Board, raw: &str) -> Option<Board> {
    let token = MoveToken::from_str(raw).ok()?;
    apply_token(board, token)
}

#[cfg(test)]
fn san_of(fen: &str, uci: &str) -> Option<String> {
    let board = Board::from_str(fen).unwrap();
    let chess_move = match MoveToken::from_str(uci).unwrap() {
        MoveToken::Move(x) => x,
        MoveToken::Null => panic!("expected a real move"),
    };

    san(&board, chess_move)
}

#[test]
fn check_pawn_push() {
    assert_eq!(san(&Board::default(), ChessMove::new(chess::Square::E2, chess::Square::E4, None)), Some("e4".to_string()));
}

#[test]
fn check_knight_move() {
    assert_eq!(san(&Board::default(), ChessMove::new(chess::Square::G1, chess::Square::F3, None)), Some("Nf3".to_string()));
}

#[test]
fn check_illegal_move() {
    assert_eq!(san(&Board::default(), ChessMove::new(chess::Square::E2, chess::Square::E5, None)), None);
}

#[test]
fn check_pawn_capture() {
    let fen = "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";
    assert_eq!(san_of(fen, "e4d5"), Some("exd5".to_string()));
}

#[test]
fn check_en_passant() {
    let mut board = Board::default();
    for uci in ["e2e4", "a7a6", "e4e5", "f7f5"] {
        board = position_after(&board, uci).unwrap();
    }

    assert_eq!(render_move(Some(&board), "e5f6"), "exf6");
}

#[test]
fn check_castling() {
    let fen = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1";
    assert_eq!(san_of(fen, "e1g1"), Some("O-O".to_string()));
    assert_eq!(san_of(fen, "e1c1"), Some("O-O-O".to_string()));
}

#[test]
fn check_file_disambiguation() {
    let fen = "4k3/8/8/8/8/8/4K3/R6R w - - 0 1";
    assert_eq!(san_of(fen, "a1d1"), Some("Rad1".to_string()));
}

#[test]
fn check_rank_disambiguation() {
    let fen = "4k3/8/8/R7/8/8/8/R3K3 w - - 0 1";
    assert_eq!(san_of(fen, "a1a3"), Some("R1a3".to_string()));
}

#[test]
fn check_promotion_with_check() {
    let fen = "8/4P3/8/8/8/8/k7/4K3 w - - 0 1";
    assert_eq!(san_of(fen, "e7e8q"), Some("e8=Q".to_string()));

    let fen = "k7/4P3/8/8/8/8/8/4K3 w - - 0 1";
    assert_eq!(san_of(fen, "e7e8q"), Some("e8=Q+".to_string()));
}

#[test]
fn check_mate_suffix() {
    // fool's mate
    let fen = "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2";
    assert_eq!(san_of(fen, "d8h4"), Some("Qh4#".to_string()));
}

#[test]
fn check_render_null_anywhere() {
    assert_eq!(render_move(Some(&Board::default()), "0000"), "Null");
    assert_eq!(render_move(None, "0000"), "Null");
}

#[test]
fn check_render_degrades_to_null() {
    assert_eq!(render_move(Some(&Board::default()), "e2e5"), "Null");
    assert_eq!(render_move(Some(&Board::default()), "garbage"), "Null");
}
