use std::str::FromStr;
use chess::Board;
use tracing::warn;
use crate::core::move_token::MoveToken;
use crate::error::ViewerError;

/// Shorthand some traces use instead of the initial FEN.
pub const STARTPOS: &str = "startpos";

/// The result of replaying a move path from the root of a search.
///
/// `boards[0]` is the root position, `boards[i]` the position after the `i`th applied move.
#[derive(Clone, Debug)]
pub struct ReplayedLine {
    boards: Vec<Board>,
    moves: Vec<MoveToken>,
}

impl ReplayedLine {
    pub fn new(root: Board) -> Self {
        Self {
            boards: vec![root],
            moves: Vec::new(),
        }
    }

    pub fn root(&self) -> &Board {
        &self.boards[0]
    }

    pub fn current(&self) -> &Board {
        self.boards.last().unwrap_or(&self.boards[0])
    }

    /// The position before the last move was made, `None` at the root.
    pub fn previous(&self) -> Option<&Board> {
        match self.boards.len() {
            0 | 1 => None,
            n => self.boards.get(n - 2),
        }
    }

    pub fn moves(&self) -> &[MoveToken] {
        &self.moves
    }

    /// Number of tokens of the requested path that were actually applied.
    pub fn applied(&self) -> usize {
        self.moves.len()
    }

    pub fn fen(&self) -> String {
        self.current().to_string()
    }

    fn push(&mut self, token: MoveToken, board: Board) {
        self.moves.push(token);
        self.boards.push(board);
    }
}

pub fn root_board(fen: &str) -> Result<Board, ViewerError> {
    let fen = fen.trim();

    if fen == STARTPOS {
        return Ok(Board::default());
    }

    Board::from_str(fen).map_err(|_| ViewerError::InvalidFen(fen.to_string()))
}

/// Applies one token, `None` if it cannot be played in `board`.
///
/// The null move is always accepted by the trace, but the rules library refuses to pass while in check.
pub fn apply_token(board: &Board, token: MoveToken) -> Option<Board> {
    match token {
        MoveToken::Null => board.null_move(),
        MoveToken::Move(chess_move) if board.legal(chess_move) => Some(board.make_move_new(chess_move)),
        MoveToken::Move(_) => None,
    }
}

/// Replays `path` from `root`. Stops at the first malformed or illegal token.
///
/// Unlike the engine that wrote the trace, a `0000` null move can't be replayed while in check, so the line
/// stops there as well.
pub fn reconstruct<S: AsRef<str>>(root: Board, path: &[S]) -> ReplayedLine {
    let mut line = ReplayedLine::new(root);

    for raw in path {
        let raw = raw.as_ref();
        let token = match MoveToken::from_str(raw) {
            Ok(token) => token,
            Err(error) => {
                warn!("{error} in position {}", line.fen());
                break;
            },
        };

        match apply_token(line.current(), token) {
            Some(board) => line.push(token, board),
            None => {
                warn!("Illegal move {raw} in position {}", line.fen());
                break;
            },
        }
    }

    line
}

#[test]
fn check_startpos_root() {
    assert_eq!(root_board("startpos").unwrap(), Board::default());
}

#[test]
fn check_invalid_root() {
    assert!(matches!(root_board("not a fen"), Err(ViewerError::InvalidFen(_))));
}

#[test]
fn check_previous_at_root() {
    let line = reconstruct::<&str>(Board::default(), &[]);

    assert!(line.previous().is_none());
    assert_eq!(line.current(), &Board::default());
}
