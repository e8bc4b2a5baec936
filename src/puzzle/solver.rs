// vim: set ai et ts=4 sts=4 sw=4:
use std::collections::VecDeque;
use log::{debug, info, trace};

use super::Puzzle;
use super::super::grid::SquareStatus::{FilledIn, CrossedOut};
use super::super::row::{Row, Contradiction};
use super::super::util::{Direction, Direction::*};
use super::super::ui::Animation;

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Outcome {
    Solved,
    Impossible,
}

impl Puzzle {
    /// Drives the board to a fully determined state, or establishes that
    /// no assignment satisfies the clues. On Impossible the grid retains
    /// the state reached by the initial propagation pass: every deeper
    /// rollback restores an ancestor's snapshot, and the outermost one is
    /// exactly that pass's output.
    pub fn solve(&mut self, anim: &mut Animation) -> Outcome {
        info!("solving a {}x{} puzzle", self.height(), self.width());
        let outcome = self.solve_from(None, anim);
        info!("outcome: {:?}", outcome);
        outcome
    }

    /// One level of the search: propagate (from the seeded square if this
    /// call enters a branch), then either finish or branch on the first
    /// undetermined square, FilledIn before CrossedOut.
    fn solve_from(&mut self, seed: Option<(usize, usize)>, anim: &mut Animation) -> Outcome {
        if let Err(contradiction) = self.propagate(seed, anim) {
            debug!("{}", contradiction);
            return Outcome::Impossible;
        }
        let (x, y) = match self.grid.first_unknown() {
            Some(position) => position,
            None           => return Outcome::Solved,
        };

        let backup = self.grid.clone();
        debug!("branching: assuming (col={}, row={}) is FilledIn", x, y);
        self.grid.set_square(x, y, FilledIn);
        if self.solve_from(Some((x, y)), anim) == Outcome::Solved {
            return Outcome::Solved;
        }

        self.grid = backup.clone();
        debug!("branching: assuming (col={}, row={}) is CrossedOut", x, y);
        self.grid.set_square(x, y, CrossedOut);
        if self.solve_from(Some((x, y)), anim) == Outcome::Solved {
            return Outcome::Solved;
        }

        self.grid = backup;
        Outcome::Impossible
    }

    /// Worklist fixpoint: reduce dirty lines one at a time, re-dirtying
    /// the orthogonal line through every square a reduction determines,
    /// until no line is pending (fixpoint) or a line admits no completion.
    /// On Err the grid keeps whatever was written so far; the caller owns
    /// the rollback snapshot.
    ///
    /// With no seed every line is checked once up front (the start of a
    /// solve); with a seed only the row and column through the decided
    /// square are, since nothing else changed.
    fn propagate(&mut self, seed: Option<(usize, usize)>, anim: &mut Animation) -> Result<(), Contradiction> {
        let mut pending = VecDeque::<(Direction, usize)>::new();
        let mut queued_rows = vec![false; self.height()];
        let mut queued_cols = vec![false; self.width()];

        match seed {
            None => {
                for y in 0..self.height() {
                    pending.push_back((Horizontal, y));
                    queued_rows[y] = true;
                }
                for x in 0..self.width() {
                    pending.push_back((Vertical, x));
                    queued_cols[x] = true;
                }
            }
            Some((x, y)) => {
                pending.push_back((Horizontal, y));
                queued_rows[y] = true;
                pending.push_back((Vertical, x));
                queued_cols[x] = true;
            }
        }

        while let Some((direction, index)) = pending.pop_front() {
            match direction {
                Horizontal => queued_rows[index] = false,
                Vertical   => queued_cols[index] = false,
            }

            let line = self.grid.line(direction, index);
            let clue: &Row = match direction {
                Horizontal => &self.rows[index],
                Vertical   => &self.cols[index],
            };
            let reduced = clue.reduce(&line)?;

            let mut newly_determined = 0;
            for (position, (&old, &new)) in line.iter().zip(reduced.iter()).enumerate() {
                if old == new {
                    continue;
                }
                newly_determined += 1;
                let queued_orthogonal = match direction {
                    Horizontal => &mut queued_cols,
                    Vertical   => &mut queued_rows,
                };
                if !queued_orthogonal[position] {
                    pending.push_back((direction.orthogonal(), position));
                    queued_orthogonal[position] = true;
                }
            }
            if newly_determined > 0 {
                trace!("{} {}: {} square(s) newly determined", direction, index, newly_determined);
                self.grid.set_line(direction, index, &reduced);
            }
            anim.frame(&self.grid);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::super::grid::SquareStatus::Unknown;
    use super::super::super::ui::Animation;

    fn puzzle(text: &str) -> Puzzle {
        Puzzle::from_text(text.as_bytes()).unwrap()
    }
    fn off() -> Animation {
        Animation::off()
    }

    #[test]
    fn propagation_alone_settles_a_forced_puzzle() {
        // 2x2, left column filled: rows [1],[1], cols [2],[]
        let mut p = puzzle("2 2\n1\n1\n2\n\n");
        assert_eq!(p.propagate(None, &mut off()), Ok(()));
        assert_eq!(p.grid.render_plain(), "* \n* \n");
    }

    #[test]
    fn propagation_reaches_a_fixpoint_without_changes() {
        // nothing is determinable in a 2x2 with single 1-clues
        let mut p = puzzle("2 2\n1\n1\n1\n1\n");
        assert_eq!(p.propagate(None, &mut off()), Ok(()));
        assert!(p.grid.line(Horizontal, 0).iter().all(|&s| s == Unknown));
        assert!(p.grid.line(Horizontal, 1).iter().all(|&s| s == Unknown));
    }

    #[test]
    fn propagation_never_reverts_a_determined_square() {
        let mut p = puzzle("2 2\n1\n1\n2\n\n");
        assert_eq!(p.propagate(None, &mut off()), Ok(()));
        let before = p.grid.render_plain();
        // a second full pass is a no-op on the fixpoint
        assert_eq!(p.propagate(None, &mut off()), Ok(()));
        assert_eq!(p.grid.render_plain(), before);
    }

    #[test]
    fn propagation_reports_the_contradicted_line() {
        // columns force all four squares, rows allow one per line
        let mut p = puzzle("2 2\n1\n1\n2\n2\n");
        let err = p.propagate(None, &mut off()).unwrap_err();
        assert_eq!(err, Contradiction { direction: Horizontal, index: 0 });
    }

    #[test]
    fn seeded_propagation_only_touches_reachable_lines() {
        // seed a decided square; with empty clues everything stays white
        let mut p = puzzle("2 2\n\n\n\n\n");
        assert_eq!(p.propagate(Some((0, 0)), &mut off()), Ok(()));
        assert_eq!(p.grid.render_plain(), "  \n  \n");
    }

    #[test]
    fn search_resolves_an_ambiguous_puzzle_deterministically() {
        // two diagonal solutions; the first unknown is tried FilledIn
        // first, so (0,0) ends up filled
        let mut p = puzzle("2 2\n1\n1\n1\n1\n");
        assert_eq!(p.solve(&mut off()), Outcome::Solved);
        assert_eq!(p.grid.render_plain(), "* \n *\n");
    }

    #[test]
    fn root_contradiction_keeps_the_propagated_state() {
        // 1x3 with row clue [1] but no column may be filled: propagation
        // whitens everything from the columns, then the row contradicts;
        // whatever was already written stays on the board
        let mut p = puzzle("1 3\n1\n\n\n\n");
        assert_eq!(p.solve(&mut off()), Outcome::Impossible);
        assert_eq!(p.grid.render_plain(), "   \n");
    }

    #[test]
    fn exhausted_branches_roll_back_to_the_initial_fixpoint() {
        // row clues ask for 2 filled squares, column clues for 3; no line
        // can tell on its own, so the initial pass determines nothing and
        // the search exhausts both options of every branch
        let mut p = puzzle("2 3\n1\n1\n1\n1\n1\n");
        assert_eq!(p.solve(&mut off()), Outcome::Impossible);
        assert_eq!(p.grid.render_plain(), "???\n???\n");
    }
}
