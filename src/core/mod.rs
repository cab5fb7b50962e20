// Everything between the trace DB and the screen: replaying moves, formatting nodes, navigating.

pub mod move_token;
pub mod reconstruction;
pub mod notation;
pub mod score;
pub mod details;
pub mod navigation;
