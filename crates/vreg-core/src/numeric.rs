use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, CoreError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(CoreError::NotPositive { what, value: v })
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(v: Real, decimals: u32) -> Real {
    let scale = 10f64.powi(decimals as i32);
    (v * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert_eq!(ensure_positive(2.5e-3, "L").unwrap(), 2.5e-3);
        assert!(matches!(
            ensure_positive(0.0, "L"),
            Err(CoreError::NotPositive { what: "L", .. })
        ));
        assert!(ensure_positive(-1.0, "C").is_err());
        assert!(matches!(
            ensure_positive(Real::INFINITY, "C"),
            Err(CoreError::NonFinite { .. })
        ));
    }

    #[test]
    fn round_to_two_decimals() {
        assert_eq!(round_to(0.05, 2), 0.05);
        assert_eq!(round_to(12.345_678, 2), 12.35);
        assert_eq!(round_to(49.95, 2), 49.95);
        assert_eq!(round_to(0.0, 2), 0.0);
    }
}
