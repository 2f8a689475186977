//! Tab-separated dataset parsing.
//!
//! Format:
//! - one example per line, fields separated by `\t`
//! - every column except the last is a feature, the last is the label
//! - blank lines are skipped and a trailing tab is tolerated
//! - all lines must carry the same number of feature columns

use std::io::BufRead;

use crate::data::dataset::Dataset;
use crate::error::{FitError, Result};

/// Reads a dataset from any buffered reader (a file, stdin, a byte slice).
pub fn read_dataset<R: BufRead>(reader: R) -> Result<Dataset> {
    let mut features: Vec<Vec<f64>> = Vec::new();
    let mut labels: Vec<f64> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let mut values = parse_fields(&line, line_no)?;
        let label = match values.pop() {
            Some(label) => label,
            None => continue,
        };

        if let Some(first) = features.first() {
            if first.len() != values.len() {
                return Err(FitError::format(
                    line_no,
                    format!("expected {} feature columns, got {}", first.len(), values.len()),
                ));
            }
        }

        features.push(values);
        labels.push(label);
    }

    Dataset::new(features, labels)
}

/// Parses the tab-separated floats of one line; empty fields are ignored.
pub(crate) fn parse_fields(line: &str, line_no: usize) -> Result<Vec<f64>> {
    line.split('\t')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(|cell| {
            cell.parse::<f64>().map_err(|_| {
                FitError::format(line_no, format!("'{cell}' is not a number"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_features_and_label() {
        let text = "1\t2\t3\n4\t5\t6\t\n\n";
        let ds = read_dataset(text.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.features()[1], vec![4.0, 5.0]);
        assert_eq!(ds.labels(), &[3.0, 6.0]);
    }

    #[test]
    fn ragged_rows_report_the_line() {
        let text = "1\t2\t3\n4\t5\n";
        match read_dataset(text.as_bytes()) {
            Err(FitError::Format { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_cell_is_a_format_error() {
        let res = read_dataset("1\tx\t3\n".as_bytes());
        assert!(matches!(res, Err(FitError::Format { line: 1, .. })));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(read_dataset("".as_bytes()), Err(FitError::InvalidArgument(_))));
    }
}
