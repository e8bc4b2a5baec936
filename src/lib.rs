// vim: set ai et ts=4 sts=4 sw=4:
pub mod util;
pub mod grid;
pub mod row;
pub mod puzzle;
pub mod ui;

pub use crate::puzzle::{Puzzle, Outcome, ParseError};
