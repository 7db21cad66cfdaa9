//! Evenly spaced coordinate helpers used by every tiling step.

use crate::components::Vec3;

/// `n` evenly spaced values from `start` to `stop` inclusive.
///
/// `n == 1` yields `[start]`, `n == 0` yields nothing.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// `n` values `start, start + step, ...`.
pub fn stepped(start: f64, step: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Cartesian product of per-axis coordinates, flattened y-major then x then z.
pub fn grid3(xs: &[f64], ys: &[f64], zs: &[f64]) -> Vec<Vec3> {
    let mut out = Vec::with_capacity(xs.len() * ys.len() * zs.len());
    for &y in ys {
        for &x in xs {
            for &z in zs {
                out.push(Vec3::new(x, y, z));
            }
        }
    }
    out
}

/// Planar grid at a fixed height, flattened y-major then x.
pub fn grid2(xs: &[f64], ys: &[f64], z: f64) -> Vec<Vec3> {
    grid3(xs, ys, &[z])
}

/// Whole count of `unit`s that fit in `span`; negative spans give zero.
pub fn fit_count(span: f64, unit: f64) -> usize {
    if unit <= 0.0 || span <= 0.0 {
        return 0;
    }
    (span / unit).floor() as usize
}

/// Count of `unit`s needed to cover `span`; negative spans give zero.
pub fn cover_count(span: f64, unit: f64) -> usize {
    if unit <= 0.0 || span <= 0.0 {
        return 0;
    }
    (span / unit).ceil() as usize
}

/// Vertical offsets of stacked layers reaching `height` exactly.
///
/// Layers sit at multiples of `unit`; the last one is pinned to
/// `height - unit` so the stack tops out at `height` without overshoot.
pub fn pinned_layers(height: f64, unit: f64) -> Vec<f64> {
    let n = cover_count(height, unit);
    let mut z = stepped(0.0, unit, n);
    if let Some(last) = z.last_mut() {
        *last = height - unit;
    }
    z
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn linspace_hits_both_ends() {
        assert_eq!(linspace(0.5, 8.5, 3), vec![0.5, 4.5, 8.5]);
        let xs = linspace(2.0, 13.0, 4);
        assert_eq!(xs.len(), 4);
        assert_eq!(xs[0], 2.0);
        assert_eq!(xs[3], 13.0);
        assert!((xs[1] - 17.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn linspace_degenerate_counts() {
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(6.0, 4.0, 1), vec![6.0]);
    }

    #[test]
    fn grid3_is_y_major() {
        let g = grid3(&[0.0, 1.0], &[10.0, 20.0], &[0.0, 3.0]);
        assert_eq!(g.len(), 8);
        assert_eq!(g[0], Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(g[1], Vec3::new(0.0, 10.0, 3.0));
        assert_eq!(g[2], Vec3::new(1.0, 10.0, 0.0));
        assert_eq!(g[4], Vec3::new(0.0, 20.0, 0.0));
    }

    #[test]
    fn counts_clamp_negative_spans() {
        assert_eq!(fit_count(-2.0, 4.0), 0);
        assert_eq!(cover_count(-2.0, 2.5), 0);
        assert_eq!(fit_count(9.0, 4.0), 2);
        assert_eq!(cover_count(9.0, 4.0), 3);
    }

    #[test]
    fn layers_pin_last_offset() {
        assert_eq!(pinned_layers(8.0, 3.0), vec![0.0, 3.0, 5.0]);
        assert_eq!(pinned_layers(9.0, 3.0), vec![0.0, 3.0, 6.0]);
        assert_eq!(pinned_layers(11.0, 3.0), vec![0.0, 3.0, 6.0, 8.0]);
        assert_eq!(pinned_layers(3.0, 3.0), vec![0.0]);
    }

    proptest! {
        #[test]
        fn stack_reaches_height_without_gap(height in 3.0f64..40.0, unit in 0.5f64..3.0) {
            let z = pinned_layers(height, unit);
            prop_assert!(!z.is_empty());
            prop_assert_eq!(z[0], 0.0);
            // top of the final layer is exactly the target
            prop_assert!((z[z.len() - 1] + unit - height).abs() < 1e-9);
            // consecutive layers touch or overlap, never leave a gap
            for pair in z.windows(2) {
                prop_assert!(pair[1] - pair[0] <= unit + 1e-9);
                prop_assert!(pair[1] >= pair[0]);
            }
        }
    }
}
