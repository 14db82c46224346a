use super::Point2;

/// Hashable key for exact coordinate comparison.
///
/// Two keys are equal iff both coordinates compare equal with `==`, so
/// `-0.0` and `0.0` map to the same key. No tolerance is applied: points
/// that differ in the last bit are distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointKey(u64, u64);

impl PointKey {
    /// Creates the key for a point.
    #[must_use]
    pub fn new(point: &Point2) -> Self {
        Self(canonical_bits(point.x), canonical_bits(point.y))
    }
}

impl From<&Point2> for PointKey {
    fn from(point: &Point2) -> Self {
        Self::new(point)
    }
}

fn canonical_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0_f64.to_bits()
    } else {
        value.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_points_share_key() {
        assert_eq!(
            PointKey::new(&Point2::new(1.5, -2.0)),
            PointKey::new(&Point2::new(1.5, -2.0))
        );
    }

    #[test]
    fn signed_zero_is_one_key() {
        assert_eq!(
            PointKey::new(&Point2::new(-0.0, 0.0)),
            PointKey::new(&Point2::new(0.0, -0.0))
        );
    }

    #[test]
    fn near_duplicates_stay_distinct() {
        let a = Point2::new(1.0, 1.0);
        let b = Point2::new(1.0 + f64::EPSILON, 1.0);
        assert_ne!(PointKey::new(&a), PointKey::new(&b));
    }
}
