// vim: set ai et ts=4 sts=4 sw=4:
use std::iter;
use super::{Row, Run, Contradiction};
use super::super::grid::{SquareStatus, SquareStatus::{FilledIn, CrossedOut}};

impl Row {
    /// Reduces a line to the consensus of every completion that satisfies
    /// both this clue and the squares already determined: a square comes
    /// back FilledIn or CrossedOut iff all such completions agree on it,
    /// Unknown where they disagree. Errs iff no completion exists at all.
    ///
    /// The deduction this computes is the strongest obtainable from one
    /// line in isolation; the propagation engine applies it to rows and
    /// columns alternately until nothing new is determined.
    pub fn reduce(&self, line: &[SquareStatus]) -> Result<Vec<SquareStatus>, Contradiction> {
        assert_eq!(line.len(), self.length);
        LineSolver::new(line, &self.runs)
            .reduced()
            .ok_or(Contradiction { direction: self.direction, index: self.index })
    }
}

fn can_be_white(status: SquareStatus) -> bool { status != FilledIn }
fn can_be_black(status: SquareStatus) -> bool { status != CrossedOut }

fn merge_lines(a: &[SquareStatus], b: &[SquareStatus]) -> Vec<SquareStatus> {
    a.iter().zip(b.iter())
     .map(|(&x, &y)| SquareStatus::merge(x, y))
     .collect()
}

/// Prefix dynamic program over one line, with the line's clue runs.
///
/// The line is padded with a sentinel white square at index 0 so that every
/// run placement is preceded by a separator square. State (i,j) stands for
/// "the first i padded squares are explained by the first j runs":
///   - feasible(i,j): any completion reaches this state,
///   - paint(i,j):    the square-wise consensus over all of them.
/// Both tables are memoized for the duration of a single reduce() call;
/// each state is computed at most once.
struct LineSolver<'a> {
    padded:   Vec<SquareStatus>,
    runs:     &'a [Run],
    feasible: Vec<Vec<Option<bool>>>,
    paint:    Vec<Vec<Option<Vec<SquareStatus>>>>,
}

impl<'a> LineSolver<'a> {
    fn new(line: &[SquareStatus], runs: &'a [Run]) -> Self {
        let padded = iter::once(CrossedOut)
                         .chain(line.iter().cloned())
                         .collect::<Vec<_>>();
        let states = padded.len() + 1;
        LineSolver {
            padded:   padded,
            runs:     runs,
            feasible: vec![vec![None; runs.len() + 1]; states],
            paint:    vec![vec![None; runs.len() + 1]; states],
        }
    }

    fn reduced(&mut self) -> Option<Vec<SquareStatus>> {
        let i = self.padded.len();
        let j = self.runs.len();
        if !self.feasible(i, j) {
            return None;
        }
        let mut full = self.paint(i, j);
        full.remove(0); // drop the sentinel square again
        Some(full)
    }

    fn feasible(&mut self, i: usize, j: usize) -> bool {
        if let Some(known) = self.feasible[i][j] {
            return known;
        }
        let result = match i {
            0 => j == 0,
            _ => self.white_case(i, j) || self.run_case(i, j),
        };
        self.feasible[i][j] = Some(result);
        result
    }

    // case (a): padded square i-1 is a white square, leaving (i-1, j)
    fn white_case(&mut self, i: usize, j: usize) -> bool {
        can_be_white(self.padded[i-1]) && self.feasible(i-1, j)
    }

    // case (b): padded squares i-k..i are run j (length k), square i-k-1
    // its separator, leaving (i-k-1, j-1)
    fn run_case(&mut self, i: usize, j: usize) -> bool {
        if j == 0 {
            return false;
        }
        let k = self.runs[j-1].length;
        if i < k + 1 {
            return false;
        }
        if !(i-k..i).all(|t| can_be_black(self.padded[t])) {
            return false;
        }
        can_be_white(self.padded[i-k-1]) && self.feasible(i-k-1, j-1)
    }

    /// Consensus over all completions reaching state (i,j). Only ever
    /// entered through states whose feasible() holds, which guarantees at
    /// least one of the two cases below contributes.
    fn paint(&mut self, i: usize, j: usize) -> Vec<SquareStatus> {
        if let Some(known) = &self.paint[i][j] {
            return known.clone();
        }
        let mut consensus: Option<Vec<SquareStatus>> = None;
        if i > 0 {
            if self.white_case(i, j) {
                let mut prefix = self.paint(i-1, j);
                prefix.push(CrossedOut);
                consensus = Some(prefix);
            }
            if self.run_case(i, j) {
                let k = self.runs[j-1].length;
                let mut prefix = self.paint(i-k-1, j-1);
                prefix.push(CrossedOut);
                prefix.extend(iter::repeat(FilledIn).take(k));
                consensus = Some(match consensus {
                    Some(other) => merge_lines(&other, &prefix),
                    None        => prefix,
                });
            }
            debug_assert!(consensus.is_some(), "paint() entered on an infeasible state");
        }
        let result = consensus.unwrap_or_default();
        self.paint[i][j] = Some(result.clone());
        result
    }
}
