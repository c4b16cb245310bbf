// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

/// `count` evenly spaced values from `start` to `end`, both ends included.
///
/// A count of one yields `start` alone; zero yields nothing.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// `count` evenly spaced angles covering `-span / 2 ..= span / 2`
pub fn symmetric_steps(span: f64, count: usize) -> Vec<f64> {
    linspace(-span * 0.5, span * 0.5, count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace_includes_both_ends() {
        let values = linspace(0.0, 90.0, 10);
        assert_eq!(values.len(), 10);
        assert_eq!(values[0], 0.0);
        assert_relative_eq!(values[9], 90.0, epsilon = 1e-12);
        assert_relative_eq!(values[1], 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_linspace_degenerate_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 5.0, 1), vec![3.0]);
    }

    #[test]
    fn test_symmetric_steps_are_centered() {
        let steps = symmetric_steps(9.0, 10);
        assert_relative_eq!(steps[0], -4.5, epsilon = 1e-12);
        assert_relative_eq!(steps[9], 4.5, epsilon = 1e-12);
        assert_relative_eq!(steps[1] - steps[0], 1.0, epsilon = 1e-12);
    }
}
