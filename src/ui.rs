// vim: set ai et ts=4 sts=4 sw=4:
use std::io::{self, Write};
use std::thread;
use std::time::Duration;
use ansi_term::Colour;

use super::grid::{Grid, SquareStatus};
use super::util::is_a_tty;

/// Live view of the propagation: redraws the board after every line the
/// engine processes, walking the cursor back up over the previous frame.
/// Purely presentational; an `off()` animation swallows every frame, and
/// `auto()` only enables itself on an interactive terminal.
pub struct Animation {
    enabled: bool,
    delay: Duration,
    frame_height: usize, // lines drawn by the previous frame
}

impl Animation {
    pub fn off() -> Self {
        Animation {
            enabled: false,
            delay: Duration::from_millis(0),
            frame_height: 0,
        }
    }
    pub fn auto(suppress: bool, delay_ms: u64) -> Self {
        Animation {
            enabled: !suppress && is_a_tty(io::stdout()),
            delay: Duration::from_millis(delay_ms),
            frame_height: 0,
        }
    }

    pub fn frame(&mut self, grid: &Grid) {
        if !self.enabled {
            return;
        }
        let mut drawn = String::new();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                drawn.push_str(&paint_square(grid.get_square(x, y)));
            }
            drawn.push('\n');
        }
        if self.frame_height > 0 {
            print!("\x1b[{}A", self.frame_height); // cursor back up over the previous frame
        }
        print!("{}", drawn);
        io::stdout().flush().ok();
        self.frame_height = grid.height();
        if self.delay > Duration::from_millis(0) {
            thread::sleep(self.delay);
        }
    }

    /// Leaves the last frame in place and resumes normal line output
    /// below it.
    pub fn finish(&mut self) {
        if self.enabled && self.frame_height > 0 {
            println!();
            self.frame_height = 0;
        }
    }
}

fn paint_square(status: SquareStatus) -> String {
    match status {
        SquareStatus::FilledIn   => Colour::Blue.paint("\u{2588}\u{2588}").to_string(),
        SquareStatus::CrossedOut => String::from("  "),
        SquareStatus::Unknown    => Colour::Fixed(241).paint("\u{00B7} ").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_animation_ignores_frames() {
        let mut anim = Animation::off();
        anim.frame(&Grid::new(2, 2));
        assert_eq!(anim.frame_height, 0);
        anim.finish();
    }
}
