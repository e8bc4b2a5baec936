// vim: set ai et ts=4 sw=4 sts=4:
mod solver;

use std::fmt;
use ansi_term::{Colour, Style, ANSIString};

use super::util::{Direction, Direction::*};
use super::grid::{SquareStatus, SquareStatus::*};

/// One line's clue: the ordered runs of filled-in squares that must appear
/// in the row (left to right) or column (top to bottom) at `index`.
/// Rows carry no board state; the grid is handed to them per reduction.
#[derive(Debug)]
pub struct Row {
    pub direction:  Direction,
    pub index:      usize,
    pub length:     usize,
    pub runs:       Vec<Run>,
}

impl Row {
    pub fn new(direction: Direction,
               index: usize,
               length: usize,
               run_lengths: &[usize]) -> Self
    {
        let runs = run_lengths.iter()
                              .map(|&len| Run::new(len))
                              .collect::<Vec<_>>();
        Row {
            direction: direction,
            index:     index,
            length:    length,
            runs:      runs,
        }
    }

    pub fn is_trivially_empty(&self) -> bool {
        self.runs.is_empty()
    }
    /// Squares needed to lay out every run with a single separator between
    /// consecutive ones; a clue with min_length() > length admits no
    /// placement at all.
    pub fn min_length(&self) -> usize {
        let filled: usize = self.runs.iter().map(|run| run.length).sum();
        filled + self.runs.len().saturating_sub(1)
    }
    /// A line is settled once no square in it is Unknown.
    pub fn is_completed_on(&self, line: &[SquareStatus]) -> bool {
        line.iter().all(|&status| status != Unknown)
    }
}
impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", match self.direction {
            Horizontal => "row",
            Vertical   => "col",
        }, self.index)
    }
}

// -------------------------------------------------------------

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Run {
    pub length: usize,
}

impl Run {
    pub fn new(length: usize) -> Self {
        Run { length: length }
    }
    pub fn to_colored_string(&self, completed: bool) -> ANSIString<'static> {
        let style = match completed {
            true  => Style::new().fg(Colour::Fixed(241)),
            false => Style::default(),
        };
        style.paint(self.to_string())
    }
}
impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.length)
    }
}

// -------------------------------------------------------------

/// A line for which no completion satisfies both the clue and the squares
/// already determined. Recoverable: the search engine rolls back to the
/// snapshot preceding its latest branch decision.
#[derive(PartialEq, Eq, Debug)]
pub struct Contradiction {
    pub direction: Direction,
    pub index: usize,
}
impl fmt::Display for Contradiction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Contradiction: no valid arrangement of runs remains in {} {}",
            match self.direction {
                Horizontal => "row",
                Vertical   => "col",
            },
            self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_length_counts_separators() {
        let row = Row::new(Horizontal, 0, 10, &[3, 1, 2]);
        assert_eq!(row.min_length(), 8);
        assert_eq!(Row::new(Horizontal, 0, 10, &[]).min_length(), 0);
        assert_eq!(Row::new(Horizontal, 0, 10, &[4]).min_length(), 4);
    }

    #[test]
    fn completed_on_requires_no_unknowns() {
        let row = Row::new(Vertical, 2, 3, &[1]);
        assert!(row.is_completed_on(&[CrossedOut, FilledIn, CrossedOut]));
        assert!(!row.is_completed_on(&[CrossedOut, Unknown, CrossedOut]));
    }
}
