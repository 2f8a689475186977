//! Tab-delimited weight files.
//!
//! Each matrix is a header line `<rows>\t<cols>` followed by `<rows>` lines of
//! `<cols>` tab-separated values. Parsing is strict: a header that disagrees
//! with the data or a file that ends early is a `FitError::Format`. Blank
//! lines between matrices and at the end of the file are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::data::tsv::parse_fields;
use crate::error::{FitError, Result};
use crate::math::matrix::Matrix;
use crate::network::network::Network;

/// Writes every matrix of `weights` in the tab-delimited format.
pub fn write_weights<W: Write>(weights: &[Matrix], mut writer: W) -> Result<()> {
    for m in weights {
        writeln!(writer, "{}\t{}", m.rows, m.cols)?;
        for row in &m.data {
            let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writeln!(writer, "{}", line.join("\t"))?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Reads a weight stack; connectivity is checked by [`Network::from_weights`].
pub fn read_weights<R: BufRead>(reader: R) -> Result<Vec<Matrix>> {
    let mut lines = reader.lines().enumerate().map(|(idx, line)| (idx + 1, line));
    let mut weights = Vec::new();
    let mut last_line = 0;

    while let Some((line_no, line)) = lines.next() {
        let line = line?;
        last_line = line_no;
        if line.trim().is_empty() {
            continue;
        }

        let (rows, cols) = parse_header(&line, line_no)?;
        let mut data = Vec::with_capacity(rows);
        for r in 0..rows {
            let (line_no, line) = lines.next().ok_or_else(|| {
                FitError::format(
                    last_line,
                    format!("expected {rows} rows after header, file ended after {r}"),
                )
            })?;
            let values = parse_fields(&line?, line_no)?;
            last_line = line_no;
            if values.len() != cols {
                return Err(FitError::format(
                    line_no,
                    format!("expected {cols} values, got {}", values.len()),
                ));
            }
            data.push(values);
        }

        weights.push(Matrix { rows, cols, data });
    }

    if weights.is_empty() {
        return Err(FitError::format(last_line, "no weight matrices found"));
    }
    Ok(weights)
}

fn parse_header(line: &str, line_no: usize) -> Result<(usize, usize)> {
    let fields: Vec<&str> = line.split('\t').map(str::trim).filter(|f| !f.is_empty()).collect();
    let dims: Vec<usize> = fields
        .iter()
        .map(|f| f.parse::<usize>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| FitError::format(line_no, format!("invalid matrix header '{line}'")))?;

    match dims[..] {
        [rows, cols] if rows > 0 && cols > 0 => Ok((rows, cols)),
        _ => Err(FitError::format(
            line_no,
            format!("matrix header must be '<rows>\\t<cols>' with positive counts, got '{line}'"),
        )),
    }
}

impl Network {
    /// Persists the weight stack to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        write_weights(self.weights(), BufWriter::new(file))
    }

    /// Loads and validates a weight stack written by [`Network::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Network> {
        let file = File::open(path)?;
        Network::from_weights(read_weights(BufReader::new(file))?)
    }
}
