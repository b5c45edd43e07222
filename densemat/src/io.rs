//! Loading and saving matrices
//!
//! Two on-disk formats are supported, chosen by file extension: `.json` holds the nested-array
//! representation and `.txt` holds the text matrix format with one row per line.

use crate::error::{MatrixError, Result};
use crate::matrix::DenseMatrix;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Text,
}

impl FileFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Json => "json",
            FileFormat::Text => "txt",
        }
    }

    /// The format named by the extension of `path`, if it is one we know
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(FileFormat::Json),
            "txt" => Some(FileFormat::Text),
            _ => None,
        }
    }
}

/// Parses the nested-array JSON representation
pub fn from_json_str(json: &str) -> Result<DenseMatrix> {
    let rows: Vec<Vec<f64>> = serde_json::from_str(json)?;
    DenseMatrix::from_rows(rows)
}

/// Writes the nested-array JSON representation
///
/// Fails with [`MatrixError::NonFinite`] if the matrix holds a NaN or an infinity, which JSON
/// cannot represent; the text format has no such restriction.
pub fn to_json_string(matrix: &DenseMatrix) -> Result<String> {
    if let Some(k) = matrix.iter().position(|x| !x.is_finite()) {
        let cols = matrix.cols();
        return Err(MatrixError::NonFinite {
            index: (k / cols, k % cols),
            value: matrix.as_slice()[k],
        });
    }
    Ok(serde_json::to_string_pretty(matrix)?)
}

pub fn save_json(matrix: &DenseMatrix, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_json_string(matrix)?)?;
    log::debug!("saved {:?} matrix to {}", matrix.shape(), path.display());
    Ok(())
}

/// Writes the text matrix format, each row terminated by `;` and a newline
pub fn save_text(matrix: &DenseMatrix, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let text: String = matrix
        .to_text()
        .split(';')
        .filter(|row| !row.is_empty())
        .map(|row| format!("{};\n", row))
        .collect();
    fs::write(path, text)?;
    log::debug!("saved {:?} matrix to {}", matrix.shape(), path.display());
    Ok(())
}

/// Saves in the given format, replacing the extension of `path` with the format's own. Returns
/// the path actually written.
pub fn save(matrix: &DenseMatrix, path: impl AsRef<Path>, format: FileFormat) -> Result<PathBuf> {
    let path = path.as_ref().with_extension(format.extension());
    match format {
        FileFormat::Json => save_json(matrix, &path)?,
        FileFormat::Text => save_text(matrix, &path)?,
    }
    Ok(path)
}

/// Loads a matrix, choosing the format by the extension of `path`
pub fn load(path: impl AsRef<Path>) -> Result<DenseMatrix> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)
        .ok_or_else(|| MatrixError::UnknownFormat(path.to_path_buf()))?;
    let contents = fs::read_to_string(path)?;
    let matrix = match format {
        FileFormat::Json => from_json_str(&contents)?,
        FileFormat::Text => contents
            .lines()
            .map(str::trim)
            .collect::<String>()
            .parse::<DenseMatrix>()?,
    };
    log::debug!("loaded {:?} matrix from {}", matrix.shape(), path.display());
    Ok(matrix)
}
