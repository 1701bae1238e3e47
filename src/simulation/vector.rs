//! Primitive 2D vector helpers used by the force model
//!
//! All functions are pure and take `NVec2` by value, so callers that want to
//! overwrite a stored vector do it explicitly at the call site

use super::states::NVec2;

/// |v|^2
pub fn squared_norm(v: NVec2) -> f64 {
    v.x * v.x + v.y * v.y
}

/// |a - b|^2
pub fn squared_distance(a: NVec2, b: NVec2) -> f64 {
    squared_norm(a - b)
}

/// Vector pointing from `from` to `to`
pub fn displacement(from: NVec2, to: NVec2) -> NVec2 {
    to - from
}

/// Unit vector along `v`, or the zero vector when `v` has zero length
pub fn normalize(v: NVec2) -> NVec2 {
    let n2 = squared_norm(v);
    if n2 == 0.0 {
        return NVec2::zeros();
    }
    v / n2.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn squared_helpers() {
        let a = NVec2::new(3.0, 4.0);
        let b = NVec2::new(1.0, 1.0);
        assert_eq!(squared_norm(a), 25.0);
        assert_eq!(squared_distance(a, b), 13.0);
        assert_eq!(displacement(b, a), NVec2::new(2.0, 3.0));
    }

    #[test]
    fn normalize_does_not_touch_input() {
        let v = NVec2::new(2.0, 0.0);
        let u = normalize(v);
        assert_eq!(v, NVec2::new(2.0, 0.0));
        assert_relative_eq!(u.x, 1.0);
        assert_relative_eq!(u.y, 0.0);
    }

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(normalize(NVec2::zeros()), NVec2::zeros());
    }
}
