use std::fmt::{Display, Formatter};
use std::str::FromStr;
use chess::{ChessMove, Piece, Square};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// The token the search trace uses for a passed turn.
pub const NULL_MOVE_TOKEN: &str = "0000";

lazy_static! {
    static ref UCI_MOVE: Regex = Regex::new(r"^([a-h][1-8])([a-h][1-8])([nbrq])?$").unwrap();
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum MoveTokenError {
    #[error("Malformed move token `{0}`")]
    Malformed(String),
}

/// A move as stored in the trace: either a coordinate move or the null move.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MoveToken {
    Null,
    Move(ChessMove),
}

impl MoveToken {
    pub fn is_null(&self) -> bool {
        matches!(self, MoveToken::Null)
    }
}

impl FromStr for MoveToken {
    type Err = MoveTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();

        if token == NULL_MOVE_TOKEN {
            return Ok(MoveToken::Null);
        }

        let malformed = || MoveTokenError::Malformed(s.to_string());
        let captures = UCI_MOVE.captures(token).ok_or_else(malformed)?;

        let source = Square::from_str(&captures[1]).map_err(|_| malformed())?;
        let dest = Square::from_str(&captures[2]).map_err(|_| malformed())?;
        let promotion = captures.get(3).map(|x| match x.as_str() {
            "n" => Piece::Knight,
            "b" => Piece::Bishop,
            "r" => Piece::Rook,
            _ => Piece::Queen,
        });

        Ok(MoveToken::Move(ChessMove::new(source, dest, promotion)))
    }
}

impl Display for MoveToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveToken::Null => write!(f, "{}", NULL_MOVE_TOKEN),
            MoveToken::Move(chess_move) => write!(f, "{}", chess_move),
        }
    }
}

#[test]
fn check_null_token() {
    assert_eq!(MoveToken::from_str("0000"), Ok(MoveToken::Null));
}

#[test]
fn check_plain_move_token() {
    let expected = ChessMove::new(Square::E2, Square::E4, None);

    assert_eq!(MoveToken::from_str("e2e4"), Ok(MoveToken::Move(expected)));
}

#[test]
fn check_promotion_token() {
    let expected = ChessMove::new(Square::E7, Square::E8, Some(Piece::Knight));

    assert_eq!(MoveToken::from_str("e7e8n"), Ok(MoveToken::Move(expected)));
}

#[test]
fn check_malformed_tokens() {
    for token in ["", "e2", "e2e9", "i2i4", "e7e8k", "0000x", "e2-e4"] {
        assert_eq!(MoveToken::from_str(token), Err(MoveTokenError::Malformed(token.to_string())));
    }
}

#[test]
fn check_surrounding_whitespace_is_tolerated() {
    assert!(MoveToken::from_str(" e2e4\n").is_ok());
}

#[test]
fn check_token_display() {
    assert_eq!(MoveToken::Null.to_string(), "0000");
    assert_eq!(MoveToken::from_str("a2a4").unwrap().to_string(), "a2a4");
}
