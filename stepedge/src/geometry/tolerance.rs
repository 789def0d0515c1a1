// Shared tolerances for the connector geometry

pub const EPS_DENOM: f64 = 1e-9; // denominator guard for ratios such as 1 / zoom

#[inline]
pub fn safe_div(num: f64, den: f64, fallback: f64) -> f64 {
    if !den.is_finite() || den.abs() <= EPS_DENOM { fallback } else { num / den }
}

/// Moves `value` toward zero by `step`, stopping exactly at zero.
#[inline]
pub fn step_toward_zero(value: f64, step: f64) -> f64 {
    if value > 0.0 { (value - step).max(0.0) } else if value < 0.0 { (value + step).min(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_div_falls_back_on_zero_and_nan() {
        assert_eq!(safe_div(1.0, 0.0, 1.0), 1.0);
        assert_eq!(safe_div(1.0, f64::NAN, 1.0), 1.0);
        assert_eq!(safe_div(1.0, 2.0, 1.0), 0.5);
    }

    #[test]
    fn step_toward_zero_never_crosses() {
        assert_eq!(step_toward_zero(5.0, 2.0), 3.0);
        assert_eq!(step_toward_zero(1.0, 2.0), 0.0);
        assert_eq!(step_toward_zero(-1.5, 2.0), 0.0);
        assert_eq!(step_toward_zero(-7.0, 2.0), -5.0);
        assert!((step_toward_zero(0.3, 0.1) - 0.2).abs() < 1e-12);
    }
}
