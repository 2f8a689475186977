use rand::Rng;

use crate::error::{FitError, Result};

/// Dense row-major matrix of `f64`.
///
/// Shape-changing operations are checked and return
/// `FitError::DimensionMismatch` instead of panicking.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Fills a `rows x cols` matrix with samples drawn uniformly from `[0, 1)`.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>();
            }
        }

        res
    }

    /// Builds a matrix from nested rows; every row must have the same length.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let cols = match data.first() {
            Some(row) => row.len(),
            None => return Err(FitError::InvalidArgument("matrix must have at least one row".into())),
        };
        if let Some(bad) = data.iter().find(|row| row.len() != cols) {
            return Err(FitError::dimension("matrix row length", cols, bad.len()));
        }

        Ok(Matrix {
            rows: data.len(),
            cols,
            data,
        })
    }

    /// A single-row matrix.
    pub fn row(values: Vec<f64>) -> Matrix {
        Matrix {
            rows: 1,
            cols: values.len(),
            data: vec![values],
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    pub fn scale(&self, k: f64) -> Matrix {
        self.map(|x| x * k)
    }

    /// Matrix product `self · rhs`.
    pub fn matmul(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols != rhs.rows {
            return Err(FitError::dimension("matrix multiply", self.cols, rhs.rows));
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        Ok(res)
    }

    pub fn add(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, "matrix add", |a, b| a + b)
    }

    pub fn sub(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, "matrix subtract", |a, b| a - b)
    }

    /// Element-wise (Hadamard) product of two same-shape matrices.
    pub fn hadamard(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, "hadamard product", |a, b| a * b)
    }

    /// Mean over every element; `0.0` for an empty matrix.
    pub fn mean(&self) -> f64 {
        let n = self.rows * self.cols;
        if n == 0 {
            return 0.0;
        }
        self.data.iter().flatten().sum::<f64>() / n as f64
    }

    fn zip_with<F>(&self, rhs: &Matrix, context: &'static str, op: F) -> Result<Matrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.rows != rhs.rows {
            return Err(FitError::dimension(context, self.rows, rhs.rows));
        }
        if self.cols != rhs.cols {
            return Err(FitError::dimension(context, self.cols, rhs.cols));
        }

        let data = self.data.iter().zip(rhs.data.iter())
            .map(|(row_a, row_b)| {
                row_a.iter().zip(row_b.iter()).map(|(&x, &y)| op(x, y)).collect()
            })
            .collect();

        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }
}
