//! Vector type and operations

use serde::{Deserialize, Serialize};

/// A vector in n-dimensional space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    /// Create a new vector from a Vec<f64>
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    /// Get the dimension of the vector
    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the underlying data as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Position of the first NaN or infinite component, if any.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.data.iter().position(|x| !x.is_finite())
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_creation() {
        let v = Vector::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(v.dimension(), 3);
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_first_non_finite() {
        assert_eq!(Vector::new(vec![1.0, 2.0]).first_non_finite(), None);
        assert_eq!(
            Vector::new(vec![1.0, f64::NAN, f64::INFINITY]).first_non_finite(),
            Some(1)
        );
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let v = Vector::new(vec![0.5, 1.5]);
        assert_eq!(serde_json::to_string(&v).unwrap(), "[0.5,1.5]");
        let back: Vector = serde_json::from_str("[0.5,1.5]").unwrap();
        assert_eq!(back, v);
    }
}
