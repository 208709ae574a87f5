//! Separable Gaussian smoothing with mirrored borders.

use crate::quicklook::common::plane::Plane;

/// Normalised 1D taps for `sigma`, half-width `floor(truncate * sigma + 0.5)`.
pub fn gaussian_kernel(sigma: f64, truncate: f64) -> Vec<f64> {
    let radius = (truncate * sigma + 0.5) as isize;
    let denom = 2.0 * sigma * sigma;
    let taps: Vec<f64> = (-radius..=radius)
        .map(|x| (-((x * x) as f64) / denom).exp())
        .collect();
    let sum: f64 = taps.iter().sum();
    taps.into_iter().map(|t| t / sum).collect()
}

/// Folds an out-of-range index back inside `0..len` as `d c b a | a b c d`.
#[inline]
fn reflect(index: isize, len: usize) -> usize {
    let period = 2 * len as isize;
    let i = index.rem_euclid(period);
    if i < len as isize {
        i as usize
    } else {
        (period - 1 - i) as usize
    }
}

fn convolve_line(line: &[f64], taps: &[f64], out: &mut [f64]) {
    let radius = (taps.len() / 2) as isize;
    for (i, slot) in out.iter_mut().enumerate() {
        let mut acc = 0.0;
        for (k, &tap) in taps.iter().enumerate() {
            let src = reflect(i as isize + k as isize - radius, line.len());
            acc += tap * line[src];
        }
        *slot = acc;
    }
}

/// Smooths `plane` along rows, then along columns.
pub fn gaussian_blur(plane: &Plane, sigma: f64, truncate: f64) -> Plane {
    if sigma <= 0.0 {
        return plane.clone();
    }
    let taps = gaussian_kernel(sigma, truncate);
    let (lines, samples) = plane.shape();

    let mut horizontal = plane.clone();
    for (src, dst) in plane
        .data()
        .chunks_exact(samples)
        .zip(horizontal.data_mut().chunks_exact_mut(samples))
    {
        convolve_line(src, &taps, dst);
    }

    let mut smoothed = horizontal.clone();
    let mut column = vec![0.0; lines];
    let mut filtered = vec![0.0; lines];
    for col in 0..samples {
        for (row, slot) in column.iter_mut().enumerate() {
            *slot = horizontal.get(row, col);
        }
        convolve_line(&column, &taps, &mut filtered);
        for (row, &value) in filtered.iter().enumerate() {
            smoothed.set(row, col, value);
        }
    }
    smoothed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_is_normalised_and_symmetric() {
        let taps = gaussian_kernel(2.0, 4.0);
        assert_eq!(taps.len(), 17);
        let sum: f64 = taps.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        for i in 0..taps.len() / 2 {
            assert!((taps[i] - taps[taps.len() - 1 - i]).abs() < 1e-15);
        }
        assert!(taps[8] > taps[7]);
    }

    #[test]
    fn test_reflect_mirrors_edges() {
        assert_eq!(reflect(-1, 4), 0);
        assert_eq!(reflect(-2, 4), 1);
        assert_eq!(reflect(4, 4), 3);
        assert_eq!(reflect(5, 4), 2);
        assert_eq!(reflect(0, 1), 0);
        assert_eq!(reflect(-7, 1), 0);
    }

    #[test]
    fn test_constant_plane_unchanged() {
        let plane = Plane::filled(5, 7, 800.0);
        let smoothed = gaussian_blur(&plane, 2.0, 4.0);
        for &v in smoothed.data() {
            assert!((v - 800.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_impulse_spreads_and_conserves_mass() {
        let mut plane = Plane::filled(41, 41, 0.0);
        plane.set(20, 20, 1000.0);
        let smoothed = gaussian_blur(&plane, 2.0, 4.0);

        let total: f64 = smoothed.data().iter().sum();
        assert!((total - 1000.0).abs() < 1e-6);
        assert!(smoothed.get(20, 20) < 1000.0);
        assert!(smoothed.get(20, 21) > 0.0);
        assert!((smoothed.get(19, 20) - smoothed.get(21, 20)).abs() < 1e-12);
    }

    #[test]
    fn test_zero_sigma_is_identity() {
        let plane = Plane::new(1, 3, vec![1.0, 5.0, 9.0]).unwrap();
        assert_eq!(gaussian_blur(&plane, 0.0, 4.0), plane);
    }
}
