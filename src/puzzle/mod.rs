// vim: set ai et ts=4 sw=4 sts=4:
mod solver;

pub use self::solver::Outcome;

use std::fmt;
use std::io::{self, BufRead};
use log::warn;
use yaml_rust::{Yaml, YamlLoader, ScanError};
use ansi_term::ANSIString;

use super::grid::Grid;
use super::util::{ralign, lalign_colored, ralign_joined_coloreds, Direction::*};
use super::row::Row;

#[derive(Debug)]
pub struct Puzzle {
    pub rows: Vec<Row>,
    pub cols: Vec<Row>,
    pub grid: Grid,
}

#[derive(Debug)]
pub enum ParseError {
    Io(io::Error),
    BadDimensions(String),
    BadClue { line: usize, token: String },
    MissingLines { expected: usize, found: usize },
    Yaml(String),
}
impl From<io::Error> for ParseError {
    fn from(other: io::Error) -> Self {
        ParseError::Io(other)
    }
}
impl From<ScanError> for ParseError {
    fn from(other: ScanError) -> Self {
        ParseError::Yaml(other.to_string())
    }
}
impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::Io(e) =>
                write!(f, "I/O error: {}", e),
            ParseError::BadDimensions(line) =>
                write!(f, "expected two dimensions \"rows cols\" on the first line, got {:?}", line),
            ParseError::BadClue { line, token } =>
                write!(f, "line {}: bad run length {:?}", line, token),
            ParseError::MissingLines { expected, found } =>
                write!(f, "expected {} clue lines after the dimensions, found {}", expected, found),
            ParseError::Yaml(msg) =>
                write!(f, "YAML puzzle: {}", msg),
        }
    }
}

impl Puzzle {
    pub fn new(row_run_lengths: &[Vec<usize>],
               col_run_lengths: &[Vec<usize>]) -> Self
    {
        let grid = Grid::new(col_run_lengths.len(), row_run_lengths.len());
        let rows = row_run_lengths.iter()
                                  .enumerate()
                                  .map(|(y, lengths)| Row::new(Horizontal, y, grid.width(), lengths))
                                  .collect::<Vec<_>>();
        let cols = col_run_lengths.iter()
                                  .enumerate()
                                  .map(|(x, lengths)| Row::new(Vertical, x, grid.height(), lengths))
                                  .collect::<Vec<_>>();
        for clue in rows.iter().chain(cols.iter()) {
            if clue.min_length() > clue.length {
                // not an input error: such a puzzle solves to IMPOSSIBLE
                warn!("clue [{}] of {} cannot fit in {} squares; the puzzle is infeasible",
                      clue.runs.iter().map(|r| r.to_string()).collect::<Vec<_>>().join(" "),
                      clue,
                      clue.length);
            }
        }
        Puzzle {
            rows: rows,
            cols: cols,
            grid: grid,
        }
    }
    pub fn width(&self) -> usize { self.grid.width() }
    pub fn height(&self) -> usize { self.grid.height() }

    /// Reads the plain line-oriented format: a `rows cols` header line,
    /// then one whitespace-separated clue line per row, then one per
    /// column. An empty line is an empty clue.
    pub fn from_text<R: BufRead>(reader: R) -> Result<Puzzle, ParseError> {
        let mut lines = reader.lines();
        let header = match lines.next() {
            Some(line) => line?,
            None       => return Err(ParseError::BadDimensions(String::new())),
        };
        let dims = header.split_whitespace()
                         .map(|tok| tok.parse::<usize>())
                         .collect::<Result<Vec<_>, _>>()
                         .map_err(|_| ParseError::BadDimensions(header.clone()))?;
        if dims.len() != 2 {
            return Err(ParseError::BadDimensions(header.clone()));
        }
        let (height, width) = (dims[0], dims[1]);

        let clue_lines = lines.collect::<Result<Vec<String>, _>>()?;
        if clue_lines.len() < height + width {
            return Err(ParseError::MissingLines {
                expected: height + width,
                found:    clue_lines.len(),
            });
        }
        let parse_clue = |index: usize| -> Result<Vec<usize>, ParseError> {
            clue_lines[index].split_whitespace()
                             .map(|tok| match tok.parse::<usize>() {
                                 Ok(n) if n > 0 => Ok(n),
                                 _ => Err(ParseError::BadClue {
                                          line:  index + 2, // 1-based, after the header
                                          token: tok.to_string(),
                                      }),
                             })
                             .collect()
        };
        let row_run_lengths = (0..height).map(|i| parse_clue(i))
                                         .collect::<Result<Vec<_>, _>>()?;
        let col_run_lengths = (0..width).map(|i| parse_clue(height + i))
                                        .collect::<Result<Vec<_>, _>>()?;
        Ok(Puzzle::new(&row_run_lengths, &col_run_lengths))
    }

    /// Reads a YAML document with `rows:` and `cols:` lists; each entry is
    /// an integer (single run), a string of run lengths, or null.
    pub fn from_yaml_str(source: &str) -> Result<Puzzle, ParseError> {
        let docs: Vec<Yaml> = YamlLoader::load_from_str(source)?;
        let doc = match docs.first() {
            Some(doc) => doc,
            None      => return Err(ParseError::Yaml("empty document".to_string())),
        };
        let row_run_lengths = Self::_parse_yaml_clues(&doc["rows"], "rows")?;
        let col_run_lengths = Self::_parse_yaml_clues(&doc["cols"], "cols")?;
        Ok(Puzzle::new(&row_run_lengths, &col_run_lengths))
    }

    fn _parse_yaml_clues(input: &Yaml, key: &str) -> Result<Vec<Vec<usize>>, ParseError> {
        let list = match input.as_vec() {
            Some(list) => list,
            None       => return Err(ParseError::Yaml(format!("missing or non-list {:?} key", key))),
        };
        list.iter()
            .map(|entry| Self::_parse_yaml_runs(entry, key))
            .collect()
    }

    fn _parse_yaml_runs(input: &Yaml, key: &str) -> Result<Vec<usize>, ParseError> {
        match input {
            Yaml::String(s)  => { s.split_whitespace()
                                   .map(|tok| match tok.parse::<usize>() {
                                       Ok(n) if n > 0 => Ok(n),
                                       _ => Err(ParseError::Yaml(
                                                format!("bad run length {:?} under {:?}", tok, key))),
                                   })
                                   .collect()
                                },
            Yaml::Integer(n) if *n > 0
                             => { Ok(vec![*n as usize]) }
            Yaml::Null       => { Ok(vec![]) }
            other            => Err(ParseError::Yaml(
                                    format!("unexpected clue value {:?} under {:?}", other, key))),
        }
    }

    fn line_completed(&self, clue: &Row) -> bool {
        clue.is_completed_on(&self.grid.line(clue.direction, clue.index))
    }
}

impl Puzzle {
    // helper functions for the decorated rendering
    fn _fmt(&self, subdivision: Option<usize>, emit_color: bool)
        -> String
    {
        // if subdivision is given, insert visual subdivisor lines across the grid every Nth row/col
        let row_prefixes: Vec<Vec<ANSIString>> =
            self.rows.iter()
                     .map(|row| { let done = self.line_completed(row);
                                  row.runs.iter()
                                          .map(|run| run.to_colored_string(done))
                                          .collect::<Vec<_>>() })
                     .collect();

        let prefix_len = row_prefixes.iter()
                                     .map(|parts| parts.iter()
                                                       .fold(0, |sum, ansi_str| sum + ansi_str.len() + 1) // note: .len() returns length WITHOUT ansi color escape sequences
                                                       .saturating_sub(1)) // minus one at the end to match the length of a join(" ")
                                     .max().unwrap_or(0);
        let max_col_runs = self.cols.iter()
                                    .map(|col| col.runs.len())
                                    .max().unwrap_or(0);

        let mut result = String::new();

        for i in (0..max_col_runs).rev() {
            result.push_str(&self._fmt_header(i, prefix_len, subdivision, emit_color));
        }

        // top board line
        result.push_str(&Self::_fmt_line(
            &ralign("", prefix_len),
            "\u{2554}",
            "\u{2557}",
            "\u{2564}",
            subdivision,
            &(0..self.width()).map(|_| String::from("\u{2550}\u{2550}\u{2550}"))
                              .collect::<Vec<_>>()
        ));

        for y in 0..self.height() {
            // board content line
            result.push_str(&Self::_fmt_line(
                &ralign_joined_coloreds(&row_prefixes[y], prefix_len, emit_color),
                "\u{2551}",
                "\u{2551}",
                "\u{2502}",
                subdivision,
                &(0..self.width()).map(|x| format!(" {} ", self.grid.get_square(x, y).fmt_visual()))
                                  .collect::<Vec<_>>()
            ));

            // horizontal subdivisor line
            if let Some(subdiv) = subdivision {
                if ((y+1) % subdiv == 0) && (y != self.height()-1) {
                    result.push_str(&Self::_fmt_line(
                        &ralign("", prefix_len),
                        "\u{255F}",
                        "\u{2562}",
                        "\u{253C}",
                        subdivision,
                        &(0..self.width()).map(|_| String::from("\u{2500}\u{2500}\u{2500}"))
                                          .collect::<Vec<_>>()
                    ));
                }
            }
        }
        // bottom board line
        result.push_str(&Self::_fmt_line(
            &ralign("", prefix_len),
            "\u{255A}",
            "\u{255D}",
            "\u{2567}",
            subdivision,
            &(0..self.width()).map(|_| String::from("\u{2550}\u{2550}\u{2550}"))
                              .collect::<Vec<_>>()
        ));

        return result;
    }

    fn _fmt_line(prefix: &str,
                 left_delim: &str,
                 right_delim: &str,
                 columnwise_separator: &str,
                 subdivision: Option<usize>,
                 content_parts: &[String])
        -> String
    {
        let mut result = format!("{} {}", prefix, left_delim);
        for (idx, s) in content_parts.iter().enumerate() {
            result.push_str(s);
            if let Some(subdiv) = subdivision {
                if ((idx+1) % subdiv == 0) && (idx < content_parts.len()-1) {
                    result.push_str(columnwise_separator);
                }
            }
        }
        result.push_str(&format!("{}\n", right_delim));
        return result;
    }

    fn _fmt_header(&self, line_idx: usize,
                          prefix_len: usize,
                          subdivision: Option<usize>,
                          emit_color: bool)
        -> String
    {
        let mut content_parts = Vec::<String>::new();
        for col in &self.cols {
            let part: String;
            if line_idx < col.runs.len() {
                let done = self.line_completed(col);
                let colored = col.runs[col.runs.len()-1-line_idx].to_colored_string(done);
                part = format!(" {}", lalign_colored(&colored, 2, emit_color));
            } else {
                part = format!(" {:-2}", " ");
            }

            content_parts.push(part);
        }

        Self::_fmt_line(
            &ralign("", prefix_len),
            " ",
            " ",
            " ",
            subdivision,
            &content_parts
        )
    }

    /// Box-drawing rendering with clue headers; purely presentational.
    pub fn render_pretty(&self, subdivision: Option<usize>, emit_color: bool) -> String {
        self._fmt(subdivision, emit_color)
    }
}
impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self._fmt(Some(5), false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_plain_format() {
        let puzzle = Puzzle::from_text("2 3\n1 1\n\n1\n\n1\n".as_bytes()).unwrap();
        assert_eq!(puzzle.height(), 2);
        assert_eq!(puzzle.width(), 3);
        assert_eq!(puzzle.rows[0].runs.iter().map(|r| r.length).collect::<Vec<_>>(), vec![1, 1]);
        assert!(puzzle.rows[1].is_trivially_empty());
        assert_eq!(puzzle.cols[0].runs.len(), 1);
        assert!(puzzle.cols[1].is_trivially_empty());
    }

    #[test]
    fn rejects_a_bad_header() {
        assert!(matches!(Puzzle::from_text("".as_bytes()),
                         Err(ParseError::BadDimensions(_))));
        assert!(matches!(Puzzle::from_text("2\n".as_bytes()),
                         Err(ParseError::BadDimensions(_))));
        assert!(matches!(Puzzle::from_text("two three\n".as_bytes()),
                         Err(ParseError::BadDimensions(_))));
    }

    #[test]
    fn rejects_missing_clue_lines() {
        assert!(matches!(Puzzle::from_text("2 2\n1\n1\n".as_bytes()),
                         Err(ParseError::MissingLines { expected: 4, found: 2 })));
    }

    #[test]
    fn rejects_bad_run_lengths() {
        // non-numeric, and zero (runs are positive)
        assert!(matches!(Puzzle::from_text("1 1\nx\n1\n".as_bytes()),
                         Err(ParseError::BadClue { line: 2, .. })));
        assert!(matches!(Puzzle::from_text("1 1\n1\n0\n".as_bytes()),
                         Err(ParseError::BadClue { line: 3, .. })));
    }

    #[test]
    fn parses_yaml_clue_variants() {
        let puzzle = Puzzle::from_yaml_str("
rows:
    - 2
    - 1 1
cols:
    - ~
    - 2
    - 1
").unwrap();
        assert_eq!(puzzle.height(), 2);
        assert_eq!(puzzle.width(), 3);
        assert_eq!(puzzle.rows[1].runs.len(), 2);
        assert!(puzzle.cols[0].is_trivially_empty());
    }

    #[test]
    fn rejects_yaml_without_clue_lists() {
        assert!(matches!(Puzzle::from_yaml_str("rows:\n    - 1\n"),
                         Err(ParseError::Yaml(_))));
    }

    #[test]
    fn pretty_render_has_borders_and_clues() {
        let puzzle = Puzzle::from_text("1 2\n1\n1\n\n".as_bytes()).unwrap();
        let rendered = puzzle.render_pretty(None, false);
        assert!(rendered.contains("\u{2554}"));
        assert!(rendered.contains("\u{255D}"));
        assert!(rendered.contains('1'));
        // one header line, one content line, two border lines
        assert_eq!(rendered.lines().count(), 4);
    }
}
