// vim: set ai et ts=4 sts=4:
use std::fmt;
use super::util::{Direction, Direction::*};

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum SquareStatus {
    FilledIn,
    CrossedOut,
    Unknown,
}
impl SquareStatus {
    /// Plain single-character rendering: `*` filled in, space crossed out, `?` unknown.
    pub fn as_char(self) -> char {
        match self {
            SquareStatus::FilledIn   => '*',
            SquareStatus::CrossedOut => ' ',
            SquareStatus::Unknown    => '?',
        }
    }
    pub fn fmt_visual(self) -> &'static str {
        match self {
            SquareStatus::FilledIn   => "\u{25A0}",
            SquareStatus::CrossedOut => " ",
            SquareStatus::Unknown    => ".",
        }
    }
    /// Whether a square in this state could still become `other`.
    /// Unknown admits anything; a determined square only admits itself.
    pub fn admits(self, other: SquareStatus) -> bool {
        self == SquareStatus::Unknown || self == other
    }
    /// Cell-wise consensus of two determined lines: agreement keeps the
    /// value, disagreement decays to Unknown.
    pub fn merge(a: SquareStatus, b: SquareStatus) -> SquareStatus {
        if a == b { a } else { SquareStatus::Unknown }
    }
}
impl fmt::Display for SquareStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match *self {
            SquareStatus::FilledIn   => "FilledIn",
            SquareStatus::CrossedOut => "CrossedOut",
            SquareStatus::Unknown    => "Unknown",
        })
    }
}

// ------------------------------------------------

/// The board: a row-major rectangle of squares, all Unknown at the start of
/// a solve. The search engine snapshots it by `clone()` before a branch
/// decision and restores by assignment; nothing else ever reverts a square.
#[derive(Clone)]
pub struct Grid {
    width: usize,
    squares: Vec<Vec<SquareStatus>>,
}
impl Grid {
    pub fn new(width: usize, height: usize)
        -> Self
    {
        Grid {
            width: width,
            squares: (0..height).map(|_| vec![SquareStatus::Unknown; width])
                                .collect(),
        }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.squares.len() }

    pub fn get_square(&self, x: usize, y: usize) -> SquareStatus {
        self.squares[y][x]
    }
    pub fn set_square(&mut self, x: usize, y: usize, status: SquareStatus) {
        self.squares[y][x] = status;
    }

    pub fn line_length(&self, direction: Direction) -> usize {
        match direction {
            Horizontal => self.width(),
            Vertical   => self.height(),
        }
    }
    /// Copies out row `index` (Horizontal) or column `index` (Vertical).
    pub fn line(&self, direction: Direction, index: usize) -> Vec<SquareStatus> {
        match direction {
            Horizontal => self.squares[index].clone(),
            Vertical   => self.squares.iter().map(|row| row[index]).collect(),
        }
    }
    pub fn set_line(&mut self, direction: Direction, index: usize, line: &[SquareStatus]) {
        assert_eq!(line.len(), self.line_length(direction));
        match direction {
            Horizontal => self.squares[index].copy_from_slice(line),
            Vertical   => for (y, &status) in line.iter().enumerate() {
                              self.squares[y][index] = status;
                          },
        }
    }

    /// First square still Unknown, scanning rows top to bottom and squares
    /// left to right within a row; the branch order of the search engine.
    pub fn first_unknown(&self) -> Option<(usize, usize)> {
        for (y, row) in self.squares.iter().enumerate() {
            for (x, &status) in row.iter().enumerate() {
                if status == SquareStatus::Unknown {
                    return Some((x, y));
                }
            }
        }
        None
    }

    pub fn render_plain(&self) -> String {
        let mut result = String::new();
        for row in &self.squares {
            for &status in row {
                result.push(status.as_char());
            }
            result.push('\n');
        }
        result
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid(w={}, h={})", self.width(), self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::SquareStatus::*;

    #[test]
    fn starts_all_unknown() {
        let grid = Grid::new(3, 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.first_unknown(), Some((0, 0)));
        assert!(grid.line(Horizontal, 0).iter().all(|&s| s == Unknown));
    }

    #[test]
    fn line_roundtrip_both_directions() {
        let mut grid = Grid::new(2, 3);
        grid.set_line(Horizontal, 1, &[FilledIn, CrossedOut]);
        assert_eq!(grid.line(Horizontal, 1), vec![FilledIn, CrossedOut]);
        assert_eq!(grid.line(Vertical, 0), vec![Unknown, FilledIn, Unknown]);

        grid.set_line(Vertical, 1, &[FilledIn, FilledIn, FilledIn]);
        assert_eq!(grid.get_square(1, 0), FilledIn);
        assert_eq!(grid.get_square(1, 2), FilledIn);
        // the horizontal write is untouched
        assert_eq!(grid.get_square(0, 1), FilledIn);
    }

    #[test]
    fn first_unknown_is_row_major() {
        let mut grid = Grid::new(2, 2);
        grid.set_square(0, 0, CrossedOut);
        assert_eq!(grid.first_unknown(), Some((1, 0)));
        grid.set_square(1, 0, FilledIn);
        assert_eq!(grid.first_unknown(), Some((0, 1)));
        grid.set_line(Horizontal, 1, &[FilledIn, FilledIn]);
        assert_eq!(grid.first_unknown(), None);
    }

    #[test]
    fn render_plain_character_set() {
        let mut grid = Grid::new(3, 1);
        grid.set_square(0, 0, FilledIn);
        grid.set_square(1, 0, CrossedOut);
        assert_eq!(grid.render_plain(), "* ?\n");
    }
}
