//! Discrete Gaussian blur kernels.

use anyhow::{Result, bail};

/// Fills `kernel` with a normalized 1D Gaussian kernel of `size` taps with
/// standard deviation `sigma`, centered on the middle tap.
///
/// # Errors
/// Returns an error if `size` is not odd, if `sigma` is not positive and
/// finite, or if `kernel` does not hold exactly `size` values.
pub fn gaussian_blur_kernel_1d(size: usize, sigma: f32, kernel: &mut [f32]) -> Result<()> {
    validate_parameters(size, sigma)?;
    if kernel.len() != size {
        bail!(
            "Gaussian kernel buffer has length {} but kernel size is {}",
            kernel.len(),
            size
        );
    }

    let radius = (size / 2) as f32;
    let inverse_two_sigma_squared = 1.0 / (2.0 * sigma * sigma);

    for (idx, weight) in kernel.iter_mut().enumerate() {
        let offset = idx as f32 - radius;
        *weight = (-offset * offset * inverse_two_sigma_squared).exp();
    }

    let total: f32 = kernel.iter().sum();
    for weight in kernel.iter_mut() {
        *weight /= total;
    }

    Ok(())
}

/// Fills `kernel` with a normalized 2D Gaussian kernel of `size` x `size`
/// taps in row-major order. The kernel is separable: entry `(i, j)` is the
/// product of entries `i` and `j` of the corresponding 1D kernel.
///
/// # Errors
/// Returns an error if `size` is not odd, if `sigma` is not positive and
/// finite, or if `kernel` does not hold exactly `size * size` values.
pub fn gaussian_blur_kernel_2d(size: usize, sigma: f32, kernel: &mut [f32]) -> Result<()> {
    validate_parameters(size, sigma)?;
    if Some(kernel.len()) != size.checked_mul(size) {
        bail!(
            "Gaussian kernel buffer has length {} but kernel size is {}x{}",
            kernel.len(),
            size,
            size
        );
    }

    let mut weights = vec![0.0; size];
    gaussian_blur_kernel_1d(size, sigma, &mut weights)?;

    for (row, &row_weight) in kernel.chunks_exact_mut(size).zip(&weights) {
        for (entry, &column_weight) in row.iter_mut().zip(&weights) {
            *entry = row_weight * column_weight;
        }
    }

    Ok(())
}

fn validate_parameters(size: usize, sigma: f32) -> Result<()> {
    if size % 2 == 0 {
        bail!("Gaussian kernel size must be odd, got {}", size);
    }
    if !(sigma > 0.0 && sigma.is_finite()) {
        bail!(
            "Gaussian kernel standard deviation must be positive and finite, got {}",
            sigma
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{abs_diff_eq, assert_abs_diff_eq};
    use proptest::prelude::*;

    const SIGMA: f32 = 0.84089642;

    #[rustfmt::skip]
    const EXPECTED_KERNEL_1D: [f32; 7] = [
        0.00082, 0.02804, 0.23393, 0.47443, 0.23393, 0.02804, 0.00082,
    ];

    #[rustfmt::skip]
    const EXPECTED_KERNEL_2D: [f32; 49] = [
        0.00000, 0.00002, 0.00019, 0.00039, 0.00019, 0.00002, 0.00000,
        0.00002, 0.00079, 0.00656, 0.01330, 0.00656, 0.00079, 0.00002,
        0.00019, 0.00656, 0.05472, 0.11098, 0.05472, 0.00656, 0.00019,
        0.00039, 0.01330, 0.11098, 0.22508, 0.11098, 0.01330, 0.00039,
        0.00019, 0.00656, 0.05472, 0.11098, 0.05472, 0.00656, 0.00019,
        0.00002, 0.00079, 0.00656, 0.01330, 0.00656, 0.00079, 0.00002,
        0.00000, 0.00002, 0.00019, 0.00039, 0.00019, 0.00002, 0.00000,
    ];

    #[test]
    fn computing_1d_kernel_gives_expected_weights() {
        let mut kernel = [0.0; 7];
        gaussian_blur_kernel_1d(7, SIGMA, &mut kernel).unwrap();
        for (weight, expected) in kernel.iter().zip(EXPECTED_KERNEL_1D) {
            assert_abs_diff_eq!(*weight, expected, epsilon = 1e-5);
        }
    }

    #[test]
    fn computing_2d_kernel_gives_expected_weights() {
        let mut kernel = [0.0; 49];
        gaussian_blur_kernel_2d(7, SIGMA, &mut kernel).unwrap();
        for (weight, expected) in kernel.iter().zip(EXPECTED_KERNEL_2D) {
            assert_abs_diff_eq!(*weight, expected, epsilon = 1e-5);
        }
    }

    #[test]
    fn single_tap_kernel_is_one() {
        let mut kernel = [0.0];
        gaussian_blur_kernel_1d(1, 2.0, &mut kernel).unwrap();
        assert_eq!(kernel, [1.0]);
    }

    #[test]
    fn wrong_buffer_length_gives_error() {
        assert!(gaussian_blur_kernel_1d(7, SIGMA, &mut [0.0; 6]).is_err());
        assert!(gaussian_blur_kernel_2d(7, SIGMA, &mut [0.0; 7]).is_err());
    }

    #[test]
    fn invalid_parameters_give_error() {
        assert!(gaussian_blur_kernel_1d(6, SIGMA, &mut [0.0; 6]).is_err());
        assert!(gaussian_blur_kernel_1d(0, SIGMA, &mut []).is_err());
        assert!(gaussian_blur_kernel_1d(3, 0.0, &mut [0.0; 3]).is_err());
        assert!(gaussian_blur_kernel_1d(3, f32::NAN, &mut [0.0; 3]).is_err());
    }

    proptest! {
        #[test]
        fn kernels_are_normalized_and_symmetric(radius in 0_usize..8, sigma in 0.1_f32..10.0) {
            let size = 2 * radius + 1;

            let mut kernel_1d = vec![0.0; size];
            gaussian_blur_kernel_1d(size, sigma, &mut kernel_1d).unwrap();
            prop_assert!(abs_diff_eq!(kernel_1d.iter().sum::<f32>(), 1.0, epsilon = 1e-5));
            for idx in 0..size {
                prop_assert_eq!(kernel_1d[idx], kernel_1d[size - 1 - idx]);
            }

            let mut kernel_2d = vec![0.0; size * size];
            gaussian_blur_kernel_2d(size, sigma, &mut kernel_2d).unwrap();
            prop_assert!(abs_diff_eq!(kernel_2d.iter().sum::<f32>(), 1.0, epsilon = 1e-5));
            for i in 0..size {
                for j in 0..size {
                    prop_assert_eq!(kernel_2d[i * size + j], kernel_1d[i] * kernel_1d[j]);
                }
            }
        }
    }
}
