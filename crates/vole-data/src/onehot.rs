// One-hot label encoding backed by a precomputed lookup table

use crate::error::{DataError, Result};

/// Encodes raw label bytes as one-hot rows out of a precomputed table.
#[derive(Debug, Clone)]
pub struct OneHotEncoder {
    table: Vec<Vec<f32>>,
}

impl OneHotEncoder {
    /// Build the `num_classes x num_classes` identity table.
    pub fn new(num_classes: usize) -> Result<Self> {
        if num_classes == 0 {
            return Err(DataError::ZeroClasses);
        }
        let table = (0..num_classes)
            .map(|i| {
                let mut row = vec![0.0; num_classes];
                row[i] = 1.0;
                row
            })
            .collect();
        Ok(Self { table })
    }

    pub fn num_classes(&self) -> usize {
        self.table.len()
    }

    /// Look up the one-hot row for a label, checking bounds first.
    pub fn encode(&self, label: u8) -> Result<Vec<f32>> {
        match self.table.get(label as usize) {
            Some(row) => Ok(row.clone()),
            None => Err(DataError::InvalidLabel {
                label,
                classes: self.table.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_sets_single_hot_index() {
        let enc = OneHotEncoder::new(10).unwrap();
        let row = enc.encode(3).unwrap();
        assert_eq!(row.len(), 10);
        for (i, &v) in row.iter().enumerate() {
            let expected = if i == 3 { 1.0 } else { 0.0 };
            assert_eq!(v, expected, "index {i}");
        }
    }

    #[test]
    fn test_every_row_sums_to_one() {
        let enc = OneHotEncoder::new(7).unwrap();
        for label in 0..7u8 {
            let row = enc.encode(label).unwrap();
            assert_eq!(row.iter().sum::<f32>(), 1.0);
        }
    }

    #[test]
    fn test_out_of_range_label_rejected() {
        let enc = OneHotEncoder::new(10).unwrap();
        let err = enc.encode(10).unwrap_err();
        assert!(matches!(
            err,
            DataError::InvalidLabel {
                label: 10,
                classes: 10
            }
        ));
        assert!(enc.encode(255).is_err());
    }

    #[test]
    fn test_zero_classes_rejected() {
        assert!(matches!(OneHotEncoder::new(0), Err(DataError::ZeroClasses)));
    }
}
