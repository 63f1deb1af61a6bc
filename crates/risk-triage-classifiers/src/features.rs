//! Dense feature matrices backed by Candle tensors

use candle_core::{DType, Device, Tensor};
use risk_triage_core::{Error, Result};

/// Row-major feature matrix: one row per input text
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    tensor: Tensor,
    rows: usize,
    width: usize,
}

impl FeatureMatrix {
    /// Build a matrix from rows that all have `width` columns
    pub fn from_rows(rows: Vec<Vec<f64>>, width: usize) -> Result<Self> {
        let row_count = rows.len();
        let mut flat = Vec::with_capacity(row_count * width);

        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(Error::vectorizer(format!(
                    "row {} has {} columns, expected {}",
                    idx,
                    row.len(),
                    width
                )));
            }
            flat.extend(row);
        }

        let tensor = Tensor::from_vec(flat, (row_count, width), &Device::Cpu)
            .map_err(|e| Error::vectorizer(format!("Failed to create feature tensor: {}", e)))?;

        Ok(Self {
            tensor,
            rows: row_count,
            width,
        })
    }

    /// Wrap an existing rank-2 tensor, converting it to f64
    pub fn from_tensor(tensor: Tensor) -> Result<Self> {
        let (rows, width) = tensor
            .dims2()
            .map_err(|e| Error::vectorizer(format!("Feature tensor must be 2-D: {}", e)))?;
        let tensor = tensor
            .to_dtype(DType::F64)
            .map_err(|e| Error::vectorizer(format!("Failed to convert feature tensor: {}", e)))?;

        Ok(Self {
            tensor,
            rows,
            width,
        })
    }

    /// Number of rows (texts)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of feature columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Underlying tensor
    pub fn tensor(&self) -> &Tensor {
        &self.tensor
    }

    /// Copy the matrix back out as rows
    pub fn to_rows(&self) -> Result<Vec<Vec<f64>>> {
        self.tensor
            .to_vec2::<f64>()
            .map_err(|e| Error::vectorizer(format!("Failed to read feature tensor: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_shape() {
        let matrix = FeatureMatrix::from_rows(vec![vec![0.0, 1.0, 0.5]], 3).unwrap();
        assert_eq!(matrix.rows(), 1);
        assert_eq!(matrix.width(), 3);
        assert_eq!(matrix.to_rows().unwrap(), vec![vec![0.0, 1.0, 0.5]]);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let result = FeatureMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]], 2);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_tensor_requires_rank_two() {
        let tensor = Tensor::new(&[1f64, 2.0, 3.0], &Device::Cpu).unwrap();
        assert!(FeatureMatrix::from_tensor(tensor).is_err());

        let tensor = Tensor::zeros((2, 4), DType::F32, &Device::Cpu).unwrap();
        let matrix = FeatureMatrix::from_tensor(tensor).unwrap();
        assert_eq!((matrix.rows(), matrix.width()), (2, 4));
        assert_eq!(matrix.tensor().dtype(), DType::F64);
        assert_eq!(matrix.to_rows().unwrap(), vec![vec![0.0; 4]; 2]);
    }
}
