// src/graph/stats.rs

use serde::Serialize;

/// Mean and population standard deviation of the values seen at one point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodeStats {
    pub value_avg: f64,
    pub value_stdev: f64,
}

/// Running count, mean and sum of squared deviations (Welford) of the values
/// contributed to a point.
///
/// Raw values are not retained. Deviations are taken from the running mean,
/// so large values with a small spread keep their variance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ValueAccumulator {
    count: usize,
    mean: f64,
    m2: f64,
}

impl ValueAccumulator {
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Population variance, clamped at zero against rounding.
    pub fn variance(&self) -> Option<f64> {
        (self.count > 0).then(|| (self.m2 / self.count as f64).max(0.0))
    }

    /// `None` until at least one value has been pushed.
    pub fn stats(&self) -> Option<NodeStats> {
        Some(NodeStats {
            value_avg: self.mean()?,
            value_stdev: self.variance()?.sqrt(),
        })
    }
}

impl Extend<f64> for ValueAccumulator {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl FromIterator<f64> for ValueAccumulator {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Self::default();
        acc.extend(iter);
        acc
    }
}
