use serde::Serialize;

use super::DragSample;

/// Difference between `|dx|` and `|dy|` below which a sample does not pick an axis.
const MIN_AXIS_DIFFERENCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanAxis {
    Horizontal,
    Vertical,
}

/// Picks the axis of one gesture from its first decisive movement.
///
/// Once locked, the axis stays for the rest of the gesture, even if later samples move mostly
/// along the other axis.
#[derive(Debug, Default, Clone, Copy)]
pub struct AxisLock {
    axis: Option<PanAxis>,
}

impl AxisLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one sample and returns the locked axis, if any.
    pub fn update(&mut self, sample: DragSample) -> Option<PanAxis> {
        if self.axis.is_some() {
            return self.axis;
        }

        let (dx, dy) = (sample.dx.abs(), sample.dy.abs());
        if !(dx - dy).is_finite() || (dx - dy).abs() <= MIN_AXIS_DIFFERENCE {
            return None;
        }

        let axis = if dx > dy {
            PanAxis::Horizontal
        } else {
            PanAxis::Vertical
        };
        trace!("locked gesture to {axis:?} axis at {sample:?}");
        self.axis = Some(axis);
        self.axis
    }
}

impl PanAxis {
    /// Displacement of `sample` along this axis.
    pub fn delta(self, sample: DragSample) -> f64 {
        match self {
            PanAxis::Horizontal => sample.dx,
            PanAxis::Vertical => sample.dy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_movement_never_locks() {
        let mut lock = AxisLock::new();
        assert_eq!(lock.update(DragSample::new(0., 0.)), None);
        assert_eq!(lock.update(DragSample::new(3., -3.)), None);
        assert_eq!(lock.update(DragSample::new(0., 0.)), None);
    }

    #[test]
    fn first_dominant_axis_wins() {
        let mut lock = AxisLock::new();
        assert_eq!(
            lock.update(DragSample::new(1., 4.)),
            Some(PanAxis::Vertical)
        );
        assert_eq!(
            lock.update(DragSample::new(300., 4.)),
            Some(PanAxis::Vertical)
        );
    }

    #[test]
    fn nan_is_ignored() {
        let mut lock = AxisLock::new();
        assert_eq!(lock.update(DragSample::new(f64::NAN, 1.)), None);
        assert_eq!(
            lock.update(DragSample::new(-5., 1.)),
            Some(PanAxis::Horizontal)
        );
    }

    #[test]
    fn delta_follows_axis() {
        let sample = DragSample::new(-12., 30.);
        assert_eq!(PanAxis::Horizontal.delta(sample), -12.);
        assert_eq!(PanAxis::Vertical.delta(sample), 30.);
    }
}
