/*
MIT License

Copyright (c) 2025 multislice contributors
*/

//! 2D Fourier transform glue
//!
//! The potential build needs one backward 2D transform per species to
//! carry the accumulated reciprocal-space map into real space. The grid
//! dimensions carry an odd factor (the per-slice z-sampling is forced
//! odd), so a mixed-radix transform is required. Following FFTW's
//! backward-plan convention the transform is unnormalized; the caller
//! folds the 1/N into its physical scale factor.

use ndarray::Array2;
use num_complex::Complex64;
use rustfft::FftPlanner;

/// In-place unnormalized inverse 2D FFT over a (rows x cols) grid
///
/// Applies a 1D inverse transform along every row, then along every
/// column.
pub fn ifft2(grid: &mut Array2<Complex64>) {
    let (nrows, ncols) = grid.dim();
    if nrows == 0 || ncols == 0 {
        return;
    }

    let mut planner = FftPlanner::new();

    let row_fft = planner.plan_fft_inverse(ncols);
    let mut scratch = vec![Complex64::default(); ncols.max(nrows)];
    for mut row in grid.rows_mut() {
        match row.as_slice_mut() {
            Some(slice) => row_fft.process(slice),
            None => {
                let buf = &mut scratch[..ncols];
                for (b, v) in buf.iter_mut().zip(row.iter()) {
                    *b = *v;
                }
                row_fft.process(buf);
                for (v, b) in row.iter_mut().zip(buf.iter()) {
                    *v = *b;
                }
            }
        }
    }

    let col_fft = planner.plan_fft_inverse(nrows);
    for j in 0..ncols {
        let buf = &mut scratch[..nrows];
        for (i, b) in buf.iter_mut().enumerate() {
            *b = grid[[i, j]];
        }
        col_fft.process(buf);
        for (i, b) in buf.iter().enumerate() {
            grid[[i, j]] = *b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    /// Direct unnormalized inverse 2D DFT, O(N^2) reference
    fn naive_ifft2(input: &Array2<Complex64>) -> Array2<Complex64> {
        let (nr, nc) = input.dim();
        let mut out = Array2::<Complex64>::zeros((nr, nc));
        for r in 0..nr {
            for c in 0..nc {
                let mut sum = Complex64::default();
                for i in 0..nr {
                    for j in 0..nc {
                        let angle = 2.0 * PI * (r * i) as f64 / nr as f64
                            + 2.0 * PI * (c * j) as f64 / nc as f64;
                        sum += input[[i, j]] * Complex64::new(angle.cos(), angle.sin());
                    }
                }
                out[[r, c]] = sum;
            }
        }
        out
    }

    #[test]
    fn test_matches_naive_dft_odd_dimensions() {
        // 6 x 9 exercises the odd factor the grid geometry produces.
        let mut grid = Array2::<Complex64>::zeros((6, 9));
        for i in 0..6 {
            for j in 0..9 {
                let v = (i * 9 + j) as f64;
                grid[[i, j]] = Complex64::new((0.3 * v).sin(), (0.17 * v).cos());
            }
        }

        let expected = naive_ifft2(&grid);
        ifft2(&mut grid);

        for i in 0..6 {
            for j in 0..9 {
                assert_relative_eq!(grid[[i, j]].re, expected[[i, j]].re, epsilon = 1e-9);
                assert_relative_eq!(grid[[i, j]].im, expected[[i, j]].im, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_impulse_transforms_to_constant() {
        let mut grid = Array2::<Complex64>::zeros((5, 7));
        grid[[0, 0]] = Complex64::new(1.0, 0.0);
        ifft2(&mut grid);
        // An impulse at the origin spreads to a flat unnormalized field.
        for v in grid.iter() {
            assert_relative_eq!(v.re, 1.0, epsilon = 1e-12);
            assert_relative_eq!(v.im, 0.0, epsilon = 1e-12);
        }
    }
}
