//! Small dense-matrix primitives shared by the engines. Matrices are row-major `Vec<Vec<f64>>`
//! with one row per alternative (or per compared item, for pairwise matrices). Every stage builds
//! a new matrix so that earlier stages can be kept in the step trace unchanged.

use crate::{num::Weight, Error};

pub type Matrix = Vec<Vec<f64>>;

fn column_count(matrix: &[Vec<f64>], stage: &'static str) -> Result<usize, Error> {
    let cols = match matrix.first() {
        Some(row) if !row.is_empty() => row.len(),
        _ => return Err(Error::data(stage, "matrix is empty")),
    };
    if let Some(i) = matrix.iter().position(|row| row.len() != cols) {
        return Err(Error::data(
            stage,
            format!("row {} has {} entries, expected {cols}", i + 1, matrix[i].len()),
        ));
    }
    Ok(cols)
}

fn column(matrix: &[Vec<f64>], j: usize) -> impl Iterator<Item = f64> + '_ {
    matrix.iter().map(move |row| row[j])
}

pub fn column_sums(matrix: &[Vec<f64>]) -> Result<Vec<f64>, Error> {
    let cols = column_count(matrix, "column sum")?;
    Ok((0..cols).map(|j| column(matrix, j).sum()).collect())
}

pub fn column_max(matrix: &[Vec<f64>]) -> Result<Vec<f64>, Error> {
    let cols = column_count(matrix, "column maximum")?;
    Ok((0..cols)
        .map(|j| column(matrix, j).fold(f64::NEG_INFINITY, f64::max))
        .collect())
}

pub fn column_min(matrix: &[Vec<f64>]) -> Result<Vec<f64>, Error> {
    let cols = column_count(matrix, "column minimum")?;
    Ok((0..cols)
        .map(|j| column(matrix, j).fold(f64::INFINITY, f64::min))
        .collect())
}

/// Divide each entry by the sum of its column. Each column of the result sums to 1.
pub fn normalize_by_column_sum(matrix: &[Vec<f64>]) -> Result<Matrix, Error> {
    let sums = column_sums(matrix)?;
    if let Some(j) = sums.iter().position(|sum| *sum == 0.0) {
        return Err(Error::data(
            "column normalization",
            format!("column {} sums to zero", j + 1),
        ));
    }
    if let Some(j) = sums.iter().position(|sum| !sum.is_finite()) {
        return Err(Error::data(
            "column normalization",
            format!("sum of column {} is out of range", j + 1),
        ));
    }
    Ok(divide_columns(matrix, &sums))
}

/// Divide each entry by the Euclidean norm of its column, `sqrt(sum(x^2))`. The norm is
/// accumulated with `hypot` so squares of large entries do not overflow.
pub fn normalize_by_euclidean_norm(matrix: &[Vec<f64>]) -> Result<Matrix, Error> {
    let cols = column_count(matrix, "vector normalization")?;
    let norms: Vec<f64> = (0..cols)
        .map(|j| column(matrix, j).fold(0.0, f64::hypot))
        .collect();
    if let Some(j) = norms.iter().position(|norm| *norm == 0.0) {
        return Err(Error::data(
            "vector normalization",
            format!("column {} has zero norm", j + 1),
        ));
    }
    Ok(divide_columns(matrix, &norms))
}

fn divide_columns(matrix: &[Vec<f64>], divisors: &[f64]) -> Matrix {
    matrix
        .iter()
        .map(|row| row.iter().zip(divisors).map(|(x, d)| x / d).collect())
        .collect()
}

/// Scale weights so that they sum to 1.
pub fn normalize_weights(weights: &[f64]) -> Result<Vec<f64>, Error> {
    let checked = weights
        .iter()
        .enumerate()
        .map(|(j, w)| {
            Weight::new(*w).ok_or_else(|| {
                Error::validation(format!("weight of C{} must be non-negative, got {w}", j + 1))
            })
        })
        .collect::<Result<Vec<Weight>, Error>>()?;
    let total: Weight = checked.iter().copied().sum();
    if total.is_zero() {
        return Err(Error::data("weight normalization", "weights sum to zero"));
    }
    Ok(checked
        .iter()
        .map(|w| w.as_f64() / total.as_f64())
        .collect())
}

/// Multiply each column by the matching weight.
pub fn scale_columns(matrix: &[Vec<f64>], weights: &[f64]) -> Matrix {
    matrix
        .iter()
        .map(|row| row.iter().zip(weights).map(|(x, w)| x * w).collect())
        .collect()
}

/// Raise each entry to the exponent of its column.
pub fn pow_columns(matrix: &[Vec<f64>], exponents: &[f64]) -> Matrix {
    matrix
        .iter()
        .map(|row| row.iter().zip(exponents).map(|(x, e)| x.powf(*e)).collect())
        .collect()
}

pub fn row_sum(matrix: &[Vec<f64>]) -> Vec<f64> {
    matrix.iter().map(|row| row.iter().sum()).collect()
}

pub fn row_product(matrix: &[Vec<f64>]) -> Vec<f64> {
    matrix.iter().map(|row| row.iter().product()).collect()
}

pub fn row_average(matrix: &[Vec<f64>]) -> Vec<f64> {
    matrix
        .iter()
        .map(|row| row.iter().sum::<f64>() / row.len().max(1) as f64)
        .collect()
}

/// `M * v` for a square matrix `M`.
pub fn mul_vector(matrix: &[Vec<f64>], vector: &[f64]) -> Vec<f64> {
    matrix
        .iter()
        .map(|row| row.iter().zip(vector).map(|(m, v)| m * v).sum())
        .collect()
}

pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x - y).fold(0.0, f64::hypot)
}
