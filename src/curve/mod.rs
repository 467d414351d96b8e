//! Space-filling curve and bit-ordering transforms

pub mod gray;
pub mod hilbert;
pub mod power;

pub use gray::{from_gray, to_gray};
pub use hilbert::{distance_to_point, point_to_distance, HilbertCurve, HilbertPoint, MAX_ORDER};
pub use power::int_power;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_reexports() {
        let curve = HilbertCurve::new(2).unwrap();
        assert_eq!(curve.point(5), HilbertPoint::new(0, 3));
        assert_eq!(curve.distance(HilbertPoint::new(0, 3)), 5);
        assert!(HilbertCurve::new(MAX_ORDER + 1).is_err());
        assert_eq!(from_gray(to_gray(11)), 11);
        assert_eq!(int_power(2, 4).unwrap(), 16);
    }
}
