use std::fmt::{Display, Formatter};
use thiserror::Error;

/// The bound type of a transposition table entry, as stored in `nodes.tt_bound`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TtBound {
    Exact,
    UpperBound,
    LowerBound,
}

#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
#[error("unknown bound code {0}")]
pub struct UnknownBoundCode(pub i64);

impl TryFrom<i64> for TtBound {
    type Error = UnknownBoundCode;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TtBound::Exact),
            1 => Ok(TtBound::UpperBound),
            2 => Ok(TtBound::LowerBound),
            other => Err(UnknownBoundCode(other)),
        }
    }
}

impl Display for TtBound {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TtBound::Exact => write!(f, "Exact"),
            TtBound::UpperBound => write!(f, "Upperbound"),
            TtBound::LowerBound => write!(f, "Lowerbound"),
        }
    }
}

/// A child's score seen from its parent: negated, and bounded if the child failed high or low.
///
/// A child that failed high (score >= beta) only gives an upper bound for the parent, a child that failed
/// low (score <= alpha) a lower bound.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ScoreBound {
    UpperBound(i64),
    LowerBound(i64),
    Exact(i64),
}

impl ScoreBound {
    pub fn of_child(score: i64, alpha: i64, beta: i64) -> Self {
        if score >= beta {
            ScoreBound::UpperBound(-score)
        } else if score <= alpha {
            ScoreBound::LowerBound(-score)
        } else {
            ScoreBound::Exact(-score)
        }
    }
}

impl Display for ScoreBound {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreBound::UpperBound(x) => write!(f, "<= {}", x),
            ScoreBound::LowerBound(x) => write!(f, ">= {}", x),
            ScoreBound::Exact(x) => write!(f, "= {}", x),
        }
    }
}

#[test]
fn check_tt_bound_codes() {
    assert_eq!(TtBound::try_from(0).map(|x| x.to_string()), Ok("Exact".to_string()));
    assert_eq!(TtBound::try_from(1).map(|x| x.to_string()), Ok("Upperbound".to_string()));
    assert_eq!(TtBound::try_from(2).map(|x| x.to_string()), Ok("Lowerbound".to_string()));
}

#[test]
fn check_unknown_tt_bound() {
    assert_eq!(TtBound::try_from(3), Err(UnknownBoundCode(3)));
    assert_eq!(UnknownBoundCode(-1).to_string(), "unknown bound code -1");
}

#[test]
fn check_score_bound_labels() {
    assert_eq!(ScoreBound::of_child(50, -20, 50).to_string(), "<= -50");
    assert_eq!(ScoreBound::of_child(-20, -20, 50).to_string(), ">= 20");
    assert_eq!(ScoreBound::of_child(10, -20, 50).to_string(), "= -10");
}
