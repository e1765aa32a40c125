
use std::fmt;

use crate::error::Internal;
use crate::hc::Hc;
use crate::order::Order;

pub type CallMatrix = Hc<MatrixData>;

// One row per callee argument, one column per caller pattern.
#[derive(Debug, Hash, Clone, PartialEq, Eq)]
pub struct MatrixData {
    rows: usize,
    cols: usize,
    entries: Vec<Order>,
}

impl MatrixData {
    pub fn build<F>(rows: usize, cols: usize, mut entry: F) -> MatrixData
    where F: FnMut(usize, usize) -> Order
    {
        let mut entries = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                entries.push(entry(r, c));
            }
        }
        MatrixData { rows, cols, entries }
    }

    pub fn rows(&self) -> usize { self.rows }

    pub fn cols(&self) -> usize { self.cols }

    pub fn entry(&self, r: usize, c: usize) -> Order {
        self.entries[r * self.cols + c]
    }

    // Product over the order semiring: compose along paths, keep the
    // strongest alternative.
    pub fn product(&self, other: &MatrixData) -> Result<MatrixData, Internal> {
        if self.cols != other.rows {
            return Err(Internal::ShapeMismatch {
                lhs_rows: self.rows,
                lhs_cols: self.cols,
                rhs_rows: other.rows,
                rhs_cols: other.cols
            })
        }
        Ok(MatrixData::build(self.rows, other.cols, |r, c| {
            Order::infimum((0..self.cols).map(|k| self.entry(r, k).compose(other.entry(k, c))))
        }))
    }

    pub fn diagonal(&self) -> Result<Vec<Order>, Internal> {
        if self.rows != self.cols {
            return Err(Internal::NotSquare { rows: self.rows, cols: self.cols })
        }
        Ok((0..self.rows).map(|i| self.entry(i, i)).collect())
    }
}

impl fmt::Display for MatrixData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            write!(f, "[")?;
            for c in 0..self.cols {
                if c > 0 { write!(f, " ")?; }
                write!(f, "{}", self.entry(r, c))?;
            }
            write!(f, "]")?;
            if r + 1 < self.rows { writeln!(f)?; }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_entries(rows: usize, cols: usize, entries: &[Order]) -> MatrixData {
        MatrixData::build(rows, cols, |r, c| entries[r * cols + c])
    }

    #[test]
    fn product_is_associative_when_shapes_chain() {
        use Order::*;
        let a = from_entries(2, 2, &[Lt, Unknown, Le, Le]);
        let b = from_entries(2, 2, &[Le, Lt, Unknown, Le]);
        let c = from_entries(2, 2, &[Unknown, Le, Lt, Lt]);
        let left = a.product(&b).unwrap().product(&c).unwrap();
        let right = a.product(&b.product(&c).unwrap()).unwrap();
        assert_eq!(left, right);
    }

    #[test]
    fn product_rejects_mismatched_shapes() {
        use Order::*;
        let a = from_entries(1, 2, &[Le, Le]);
        let b = from_entries(1, 1, &[Lt]);
        assert!(matches!(a.product(&b), Err(Internal::ShapeMismatch { .. })));
    }

    #[test]
    fn diagonal_requires_square() {
        use Order::*;
        let a = from_entries(2, 2, &[Lt, Unknown, Le, Le]);
        assert_eq!(a.diagonal().unwrap(), vec![Lt, Le]);
        let b = from_entries(1, 2, &[Le, Le]);
        assert!(matches!(b.diagonal(), Err(Internal::NotSquare { .. })));
    }

    #[test]
    fn identity_behaves_as_unit() {
        use Order::*;
        let id = MatrixData::build(2, 2, |r, c| if r == c { Le } else { Unknown });
        let a = from_entries(2, 2, &[Lt, Le, Unknown, Le]);
        assert_eq!(a.product(&id).unwrap(), a);
        assert_eq!(id.product(&a).unwrap(), a);
    }
}
