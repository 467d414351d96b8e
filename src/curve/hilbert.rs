//! Hilbert curve mapping between linear distances and grid points

use super::power::int_power;
use crate::error::{Result, SatArtError};
use serde::{Deserialize, Serialize};

/// Largest order whose distance range `[0, 4^order)` fits in a `u64`
pub const MAX_ORDER: u32 = 31;

/// A cell of the `2^order x 2^order` Hilbert grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HilbertPoint {
    pub x: u64,
    pub y: u64,
}

impl HilbertPoint {
    pub fn new(x: u64, y: u64) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance to another point
    pub fn chebyshev(&self, other: &HilbertPoint) -> u64 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

/// Hilbert curve of a fixed order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HilbertCurve {
    order: u32,
    side: u64,
}

impl HilbertCurve {
    /// Create a curve covering a `2^order x 2^order` grid
    pub fn new(order: u32) -> Result<Self> {
        if order > MAX_ORDER {
            return Err(SatArtError::ResourceLimit(format!(
                "Hilbert order {} exceeds the maximum of {}",
                order, MAX_ORDER
            )));
        }
        let side = int_power(2, order as i64)? as u64;
        Ok(Self { order, side })
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    /// Side length of the grid
    pub fn side(&self) -> u64 {
        self.side
    }

    /// Number of points on the curve
    pub fn num_points(&self) -> u64 {
        self.side * self.side
    }

    /// Map a distance along the curve to its grid point.
    ///
    /// Only the low `2 * order` bits of `distance` are consulted.
    pub fn point(&self, distance: u64) -> HilbertPoint {
        let (mut x, mut y) = (0u64, 0u64);
        let mut t = distance;
        let mut s = 1u64;
        while s < self.side {
            let rx = 1 & (t / 2);
            let ry = 1 & (t ^ rx);
            (x, y) = rotate(s, x, y, rx, ry);
            x += s * rx;
            y += s * ry;
            t /= 4;
            s *= 2;
        }
        HilbertPoint { x, y }
    }

    /// Map a grid point back to its distance along the curve
    pub fn distance(&self, point: HilbertPoint) -> u64 {
        let HilbertPoint { mut x, mut y } = point;
        let mut d = 0u64;
        let mut s = self.side / 2;
        while s > 0 {
            let rx = u64::from((x & s) > 0);
            let ry = u64::from((y & s) > 0);
            d += s * s * ((3 * rx) ^ ry);
            (x, y) = rotate(s, x, y, rx, ry);
            s /= 2;
        }
        d
    }
}

/// Rotate or reflect a quadrant so the curve stays continuous across
/// subdivisions.
#[inline]
fn rotate(n: u64, x: u64, y: u64, rx: u64, ry: u64) -> (u64, u64) {
    if ry != 0 {
        return (x, y);
    }
    let (x, y) = if rx == 1 {
        // The inverse walk may carry bits above `n`; only bits below `n`
        // are read afterwards, and those reflect correctly modulo 2^64.
        (n.wrapping_sub(1).wrapping_sub(x), n.wrapping_sub(1).wrapping_sub(y))
    } else {
        (x, y)
    };
    (y, x)
}

/// Map `distance` in `[0, 4^order)` to its point on the Hilbert grid
pub fn distance_to_point(order: u32, distance: u64) -> Result<HilbertPoint> {
    let curve = HilbertCurve::new(order)?;
    if distance >= curve.num_points() {
        return Err(SatArtError::InvalidArgument(format!(
            "distance {} is outside the order-{} curve (0..{})",
            distance,
            order,
            curve.num_points()
        )));
    }
    Ok(curve.point(distance))
}

/// Map a point with coordinates in `[0, 2^order)` to its Hilbert distance
pub fn point_to_distance(order: u32, x: u64, y: u64) -> Result<u64> {
    let curve = HilbertCurve::new(order)?;
    if x >= curve.side() || y >= curve.side() {
        return Err(SatArtError::InvalidArgument(format!(
            "point ({}, {}) is outside the order-{} grid ({}x{})",
            x,
            y,
            order,
            curve.side(),
            curve.side()
        )));
    }
    Ok(curve.distance(HilbertPoint { x, y }))
}
