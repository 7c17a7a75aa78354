//! Maximum adjacent-pair product.

use crate::computation::Computation;
use crate::error::MemoError;

/// Returns the largest product of two neighbouring elements of `sequence`.
///
/// Elements are `i64` and products are taken in `i128`. Every product of two
/// `i64` values fits in `i128`, so the result is always exact.
///
/// # Errors
///
/// [`MemoError::InvalidInput`] if the sequence has fewer than two elements.
///
/// ```rust
/// use memo_cache::max_adjacent_product;
///
/// assert_eq!(max_adjacent_product(&[3, 6, -2, -5, 7, 3]).unwrap(), 21);
/// assert_eq!(max_adjacent_product(&[-4, -9]).unwrap(), 36);
/// assert!(max_adjacent_product(&[5]).is_err());
/// ```
pub fn max_adjacent_product(sequence: &[i64]) -> Result<i128, MemoError> {
    let [first, second, ..] = sequence else {
        return Err(MemoError::InvalidInput(format!(
            "sequence must contain at least 2 elements, got {}",
            sequence.len()
        )));
    };

    let mut max = i128::from(*first) * i128::from(*second);
    for pair in sequence[1..].windows(2) {
        max = max.max(i128::from(pair[0]) * i128::from(pair[1]));
    }
    Ok(max)
}

/// [`max_adjacent_product`] as a pluggable [`Computation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxAdjacentProduct;

impl Computation for MaxAdjacentProduct {
    type Output = i128;

    fn compute(&self, sequence: &[i64]) -> Result<i128, MemoError> {
        max_adjacent_product(sequence)
    }
}
