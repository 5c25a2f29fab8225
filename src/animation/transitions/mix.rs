use super::Transition;
use crate::geometry::Point;

/// Side of the square random waypoints are picked from.
pub const DEFAULT_EXTENT: f64 = 500.0;

const WAYPOINTS: usize = 3;

/// Mix transition - Scatters elements through random waypoints before they reach the target
pub struct Mix {
    rng: fastrand::Rng,
    extent: f64,
}

impl Mix {
    pub fn new(rng: fastrand::Rng) -> Self {
        Self { rng, extent: DEFAULT_EXTENT }
    }

    /// Pick waypoints inside `[0, extent)` on both axes.
    pub fn with_extent(self, extent: f64) -> Self {
        Self { extent, ..self }
    }
}

impl Transition for Mix {
    fn keyframes(&mut self, _x: f64, _y: f64) -> Vec<Point> {
        (0..WAYPOINTS).map(|_| Point::new(self.rng.f64() * self.extent, self.rng.f64() * self.extent)).collect()
    }
}
