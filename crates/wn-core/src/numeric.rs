use crate::CoreError;

/// Floating point type used for every stored attribute.
pub type Real = f64;

/// Acceptance band for comparing two floats: an absolute floor plus a
/// fraction of the larger magnitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerances {
    pub const fn new(abs: Real, rel: Real) -> Self {
        Self { abs, rel }
    }

    /// True when `a` and `b` lie within the band.
    pub fn accepts(&self, a: Real, b: Real) -> bool {
        let gap = (a - b).abs();
        gap <= self.abs || gap <= self.rel * a.abs().max(b.abs())
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::new(1e-12, 1e-9)
    }
}

/// Shorthand for [`Tolerances::accepts`].
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    tol.accepts(a, b)
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Widen a caller-supplied number to [`Real`] and check it is finite.
///
/// This is the single conversion point for element attributes: integers and
/// `f32` values become `f64` here and are never re-interpreted later.
pub fn to_real(v: impl Into<Real>, what: &'static str) -> Result<Real, CoreError> {
    ensure_finite(v.into(), what)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn nearly_equal_is_symmetric(a in -1e6_f64..1e6, b in -1e6_f64..1e6) {
            let tol = Tolerances::default();
            prop_assert_eq!(nearly_equal(a, b, tol), nearly_equal(b, a, tol));
        }

        #[test]
        fn to_real_preserves_i32(v in any::<i32>()) {
            prop_assert_eq!(to_real(v, "value").unwrap(), v as f64);
        }
    }
}
