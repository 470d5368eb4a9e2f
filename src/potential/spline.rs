/*
MIT License

Copyright (c) 2025 multislice contributors
*/

//! Akima spline interpolation
//!
//! Scattering factors are tabulated at a few dozen momentum transfers
//! and must be evaluated at arbitrary reciprocal-space radii during the
//! potential build. The Akima construction keeps the fit local: an
//! outlier sample only perturbs its immediate neighborhood, which
//! matters for the artificially pinned tail of the retuned tables.

use super::errors::{PotentialError, Result};

/// An interpolating Akima spline over tabulated samples
///
/// Evaluation outside the knot range clamps to the endpoint values.
#[derive(Debug, Clone)]
pub struct AkimaSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    /// Derivative of the interpolant at each knot
    t: Vec<f64>,
}

impl AkimaSpline {
    /// Fit a spline through the given samples
    ///
    /// # Arguments
    ///
    /// * `x` - Sample positions, strictly increasing
    /// * `y` - Sample values, same length as `x`
    ///
    /// # Returns
    ///
    /// The fitted spline, or an error for fewer than three samples,
    /// mismatched lengths or a non-monotonic grid
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(PotentialError::InvalidTable(format!(
                "spline sample count mismatch: {} positions vs {} values",
                x.len(),
                y.len()
            )));
        }
        if x.len() < 3 {
            return Err(PotentialError::InvalidTable(format!(
                "spline needs at least 3 samples, got {}",
                x.len()
            )));
        }
        if x.windows(2).any(|w| w[1] <= w[0]) {
            return Err(PotentialError::InvalidTable(
                "spline sample positions must be strictly increasing".to_string(),
            ));
        }

        let n = x.len();

        // Segment slopes, extended by two linearly extrapolated slopes
        // on each side so every knot sees four neighbors.
        let mut m = Vec::with_capacity(n + 3);
        m.push(0.0); // placeholder for m[-2]
        m.push(0.0); // placeholder for m[-1]
        for i in 0..n - 1 {
            m.push((y[i + 1] - y[i]) / (x[i + 1] - x[i]));
        }
        m[1] = 2.0 * m[2] - m[3];
        m[0] = 2.0 * m[1] - m[2];
        let last = m[m.len() - 1];
        let prev = m[m.len() - 2];
        m.push(2.0 * last - prev);
        let last2 = m[m.len() - 1];
        m.push(2.0 * last2 - last);

        // Akima weights: the derivative at knot i blends the two
        // neighboring slopes, weighted by how much the slopes on the far
        // sides disagree.
        let mut t = Vec::with_capacity(n);
        for i in 0..n {
            // m[i+2] is the slope of segment [i, i+1] in the extended
            // numbering.
            let m_m2 = m[i];
            let m_m1 = m[i + 1];
            let m_p0 = m[i + 2];
            let m_p1 = m[i + 3];

            let w1 = (m_p1 - m_p0).abs();
            let w2 = (m_m1 - m_m2).abs();
            if w1 + w2 > 0.0 {
                t.push((w1 * m_m1 + w2 * m_p0) / (w1 + w2));
            } else {
                t.push(0.5 * (m_m1 + m_p0));
            }
        }

        Ok(Self { x, y, t })
    }

    /// Evaluate the spline at `r`
    ///
    /// Values outside the sample range clamp to the endpoint samples.
    pub fn eval(&self, r: f64) -> f64 {
        let n = self.x.len();
        if r <= self.x[0] {
            return self.y[0];
        }
        if r >= self.x[n - 1] {
            return self.y[n - 1];
        }

        // Index of the segment containing r.
        let i = match self.x.partition_point(|&xi| xi <= r) {
            0 => 0,
            p => p - 1,
        };

        let h = self.x[i + 1] - self.x[i];
        let s = (r - self.x[i]) / h;
        let s2 = s * s;
        let s3 = s2 * s;

        // Hermite basis on the segment with Akima derivatives.
        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        self.y[i] * h00
            + h * self.t[i] * h10
            + self.y[i + 1] * h01
            + h * self.t[i + 1] * h11
    }
}
