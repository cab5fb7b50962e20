use std::str::FromStr;
use chess::{Board, Color, Piece, Square, ALL_FILES, ALL_RANKS};
use crate::output::BoardDisplay;

/// Prints an ASCII diagram to stdout, white at the bottom.
#[derive(Default)]
pub struct TerminalBoard;

fn piece_char(piece: Piece, color: Color) -> char {
    let c = match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    };

    match color {
        Color::White => c.to_ascii_uppercase(),
        Color::Black => c,
    }
}

pub fn diagram(board: &Board) -> String {
    let mut result = String::new();

    for rank in ALL_RANKS.iter().rev() {
        result.push_str(&format!("{} ", rank.to_index() + 1));
        for file in ALL_FILES.iter() {
            let square = Square::make_square(*rank, *file);
            let c = match (board.piece_on(square), board.color_on(square)) {
                (Some(piece), Some(color)) => piece_char(piece, color),
                _ => '.',
            };
            result.push(' ');
            result.push(c);
        }
        result.push('\n');
    }
    result.push_str("   a b c d e f g h");

    result
}

impl BoardDisplay for TerminalBoard {
    fn show_position(&mut self, fen: &str) {
        match Board::from_str(fen) {
            Ok(board) => println!("{}", diagram(&board)),
            Err(_) => println!("(can't draw {fen})"),
        }
        println!("{fen}");
    }
}

#[test]
fn check_start_diagram() {
    let diagram = diagram(&Board::default());
    let lines = diagram.lines().collect::<Vec<_>>();

    assert_eq!(lines[0], "8  r n b q k b n r");
    assert_eq!(lines[7], "1  R N B Q K B N R");
    assert_eq!(lines[8], "   a b c d e f g h");
}
