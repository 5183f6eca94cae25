//! Exact integer statistics over durations.
//!
//! Threshold comparisons on the mean and the coefficient of variation are
//! evaluated in `i128` so every platform agrees on which side of a threshold a
//! session falls.

/// Sum, sum of squares and count of a duration series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DurationStats {
    n: i128,
    sum: i128,
    /// `None` when the sum of squares overflowed.
    sum_sq: Option<i128>,
}

impl DurationStats {
    pub(crate) fn new(durations: &[i64]) -> Self {
        let mut sum: i128 = 0;
        let mut sum_sq: Option<i128> = Some(0);
        for &d in durations {
            let d = i128::from(d);
            sum += d;
            sum_sq = sum_sq.and_then(|acc| acc.checked_add(d * d));
        }
        Self {
            n: durations.len() as i128,
            sum,
            sum_sq,
        }
    }

    /// `mean < threshold`. False for an empty series.
    pub(crate) fn mean_below(&self, threshold: i64) -> bool {
        self.n > 0 && self.sum < i128::from(threshold) * self.n
    }

    /// `mean > threshold`. False for an empty series.
    pub(crate) fn mean_above(&self, threshold: i64) -> bool {
        self.n > 0 && self.sum > i128::from(threshold) * self.n
    }

    /// `mean > 0 && pstdev / mean < 0.1`, i.e. `100 * (n·Σx² − (Σx)²) < (Σx)²`.
    ///
    /// A single value has zero deviation and is uniform when positive.
    /// Overflow reports "not uniform".
    pub(crate) fn is_uniform(&self) -> bool {
        if self.n == 0 || self.sum <= 0 {
            return false;
        }
        let check = || -> Option<bool> {
            let n_sum_sq = self.n.checked_mul(self.sum_sq?)?;
            let sum_sq_total = self.sum.checked_mul(self.sum)?;
            let spread = n_sum_sq.checked_sub(sum_sq_total)?;
            Some(spread.checked_mul(100)? < sum_sq_total)
        };
        check().unwrap_or(false)
    }
}
