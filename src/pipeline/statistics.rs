// src/pipeline/statistics.rs

/// Descriptive statistics shared by the pipeline stages.
///
/// Undefined statistics are `None`, never a sentinel number: the mean of an
/// empty series, the sample deviation of fewer than two values, and the
/// coefficient of variation of a zero-mean series have no value.

/// Arithmetic mean. `None` for an empty series.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Bessel-corrected sample standard deviation (divides by N-1).
/// `None` for fewer than two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Coefficient of variation: sample deviation divided by mean. A unit-free
/// measure of volatility. `None` when the mean is zero or the deviation is
/// undefined.
pub fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    if m == 0.0 {
        return None;
    }
    sample_std(values).map(|s| s / m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_series_is_undefined() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn mean_of_series() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
    }

    #[test]
    fn sample_std_undefined_below_two_values() {
        assert_eq!(sample_std(&[]), None);
        assert_eq!(sample_std(&[5.0]), None);
    }

    #[test]
    fn sample_std_uses_bessel_correction() {
        // Sum of squared deviations from 2.5 is 5.0; divided by N-1 = 3.
        let expected = (5.0f64 / 3.0).sqrt();
        let std = sample_std(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((std - expected).abs() < 1e-12);
    }

    #[test]
    fn cv_undefined_for_zero_mean() {
        assert_eq!(coefficient_of_variation(&[0.0, 0.0, 0.0]), None);
    }

    #[test]
    fn cv_undefined_for_single_value() {
        assert_eq!(coefficient_of_variation(&[7.0]), None);
    }

    #[test]
    fn cv_of_constant_series_is_zero() {
        assert_eq!(coefficient_of_variation(&[10.0; 8]), Some(0.0));
    }
}
