//! Rendering and parsing of matrices as text
//!
//! Two textual forms are supported:
//! - the display form, `[[1.0 2.0]\n [3.0 4.0]]`, controlled by [`PrintOptions`]
//! - the text matrix format, `1.0 2.0;3.0 4.0`: rows delimited by `;`, columns by whitespace or
//!   `,`, with an optional trailing `;`

use crate::error::{MatrixError, Result};
use crate::matrix::DenseMatrix;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Controls how much of a large matrix is rendered
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintOptions {
    /// render every element regardless of size
    pub full: bool,

    /// row or column counts above this are summarized
    pub threshold: usize,

    /// rows shown before the `......` marker when summarizing rows
    pub head_rows: usize,

    /// rows shown after the `......` marker when summarizing rows
    pub tail_rows: usize,

    /// elements shown on each side of the `......` marker when summarizing columns
    pub edge_cols: usize,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions {
            full: false,
            threshold: 64,
            head_rows: 9,
            tail_rows: 8,
            edge_cols: 4,
        }
    }
}

impl PrintOptions {
    /// Options that render every element
    pub fn full() -> Self {
        PrintOptions {
            full: true,
            ..Default::default()
        }
    }
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|x| format!("{:?}", x))
        .collect::<Vec<_>>()
        .join(" ")
}

impl DenseMatrix {
    fn render_row(&self, i: usize, opts: &PrintOptions) -> String {
        let row = self.row(i);
        if !opts.full && self.cols() > opts.threshold && 2 * opts.edge_cols < self.cols() {
            let tail = self.cols() - opts.edge_cols;
            format!(
                "[{}......{}]",
                join(&row[..opts.edge_cols]),
                join(&row[tail..])
            )
        } else {
            format!("[{}]", join(row))
        }
    }

    /// Renders the matrix as rows of space-separated values, summarizing large matrices unless
    /// `opts.full` is set
    pub fn render(&self, opts: &PrintOptions) -> String {
        let rows = self.rows();
        let summarize = !opts.full && rows > opts.threshold && opts.head_rows + opts.tail_rows < rows;

        let mut lines = Vec::new();
        for i in 0..rows {
            if summarize && i >= opts.head_rows && i < rows - opts.tail_rows {
                if i == opts.head_rows {
                    lines.push("......".to_string());
                }
                continue;
            }
            lines.push(self.render_row(i, opts));
        }

        format!("[{}]", lines.join("\n "))
    }

    /// Writes the matrix in the text matrix format, e.g. `1.0 2.0;3.0 4.0`
    pub fn to_text(&self) -> String {
        (0..self.rows())
            .map(|i| join(self.row(i)))
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(&PrintOptions::default()))
    }
}

/// Parses the text matrix format
///
/// Every token is parsed as `f64`. An empty (or all-whitespace) string gives the empty matrix;
/// an empty row anywhere but after a trailing `;` is an error.
impl FromStr for DenseMatrix {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let s = s.strip_suffix(';').unwrap_or(s);
        if s.trim().is_empty() {
            return Ok(DenseMatrix::empty());
        }

        let rows = s
            .split(';')
            .enumerate()
            .map(|(i, row)| {
                let values = row
                    .split(|c: char| c.is_whitespace() || c == ',')
                    .filter(|token| !token.is_empty())
                    .map(|token| {
                        token.parse::<f64>().map_err(|e| MatrixError::Parse {
                            token: token.to_string(),
                            reason: e.to_string(),
                        })
                    })
                    .collect::<Result<Vec<f64>>>()?;
                if values.is_empty() {
                    return Err(MatrixError::Parse {
                        token: row.to_string(),
                        reason: format!("row {} is empty", i),
                    });
                }
                Ok(values)
            })
            .collect::<Result<Vec<_>>>()?;

        DenseMatrix::from_rows(rows)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_text() {
        let m: DenseMatrix = "1 2;3 4;5 6".parse().unwrap();
        assert_eq!(m.shape(), (3, 2));
        assert_eq!(m[(2, 1)], 6.0);

        let n: DenseMatrix = " 1, 2 ; 3,4;5  6;\n".parse().unwrap();
        assert_eq!(n, m);

        assert_eq!("".parse::<DenseMatrix>().unwrap(), DenseMatrix::empty());
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            "1 2;3 x".parse::<DenseMatrix>(),
            Err(MatrixError::Parse { token, .. }) if token == "x"
        ));
        assert!(matches!(
            "1 2;;3 4".parse::<DenseMatrix>(),
            Err(MatrixError::Parse { .. })
        ));
        assert!("1 2;3".parse::<DenseMatrix>().unwrap_err().is_shape_error());
    }

    #[test]
    fn text_round_trip() {
        let m: DenseMatrix = "1 2;3 4;5 6".parse().unwrap();
        assert_eq!(m.to_text(), "1.0 2.0;3.0 4.0;5.0 6.0");
        assert_eq!(m.to_text().parse::<DenseMatrix>().unwrap(), m);
    }

    #[test]
    fn display() {
        let m: DenseMatrix = "1 2;3 4.5".parse().unwrap();
        assert_eq!(m.to_string(), "[[1.0 2.0]\n [3.0 4.5]]");
        assert_eq!(DenseMatrix::empty().to_string(), "[]");
    }

    #[test]
    fn summarized_display() {
        let m = DenseMatrix::build(100, 3, |i, _| i as f64);
        let s = m.to_string();
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 9 + 1 + 8);
        assert_eq!(lines[9].trim(), "......");
        assert!(lines[17].starts_with(" [99.0"));

        let full = m.render(&PrintOptions::full());
        assert_eq!(full.lines().count(), 100);

        let wide = DenseMatrix::build(1, 100, |_, j| j as f64);
        assert_eq!(
            wide.to_string(),
            "[[0.0 1.0 2.0 3.0......96.0 97.0 98.0 99.0]]"
        );
    }

    #[test]
    fn options_from_partial_config() {
        let opts: PrintOptions = serde_json::from_str(r#"{"threshold": 10}"#).unwrap();
        assert_eq!(opts.threshold, 10);
        assert_eq!(opts.head_rows, 9);
        assert!(!opts.full);
    }
}
