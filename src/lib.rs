pub mod core;
pub mod database;
pub mod error;
pub mod input;
pub mod output;

#[cfg(test)]
mod tests;
