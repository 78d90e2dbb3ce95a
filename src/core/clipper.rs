use serde::{Deserialize, Serialize};

use crate::core::ScaledPoint;

/// Edge of the unit square a point was projected onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Boundary {
    /// `x = 1`
    Right,
    /// `x = 0`
    Left,
    /// `y = 1`
    Upper,
    /// `y = 0`
    Lower,
}

/// Visible piece of a line between two consecutive trace points, in
/// normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClippedSegment {
    pub start: ScaledPoint,
    pub end: ScaledPoint,
}

/// Outcome of clipping the line from the previous point to `current`.
///
/// A straight line meets the unit square in at most one piece, so there is
/// at most one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipOutcome {
    pub segment: Option<ClippedSegment>,
    /// The original, unclipped point to pass as `previous` next time.
    pub carry: ScaledPoint,
    pub current_visible: bool,
}

/// Clips consecutive trace points against the `[0, 1] x [0, 1]` viewport.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewportClipper;

impl ViewportClipper {
    /// `previous` is `None` for the first point of a trace and after a
    /// discontinuity; no segment is produced then.
    #[must_use]
    pub fn clip(self, previous: Option<ScaledPoint>, current: ScaledPoint) -> ClipOutcome {
        debug_assert!(
            current.is_finite() && previous.is_none_or(ScaledPoint::is_finite),
            "clipper expects finite normalized points"
        );

        let current_visible = current.is_visible();
        let segment = previous.and_then(|previous| {
            match (previous.is_visible(), current_visible) {
                (true, true) => Some(ClippedSegment {
                    start: previous,
                    end: current,
                }),
                (false, true) => Some(ClippedSegment {
                    start: interpolate_visible(previous, current).0,
                    end: current,
                }),
                (true, false) => Some(ClippedSegment {
                    start: previous,
                    end: interpolate_visible(current, previous).0,
                }),
                (false, false) => clip_traversal(previous, current),
            }
        });

        ClipOutcome {
            segment,
            carry: current,
            current_visible,
        }
    }
}

/// Both ends are off-screen; the line may still cross the viewport.
fn clip_traversal(previous: ScaledPoint, current: ScaledPoint) -> Option<ClippedSegment> {
    let (start, start_bound) = interpolate_visible(previous, current);
    let (end, end_bound) = interpolate_visible(current, previous);
    match (start_bound, end_bound) {
        (Some(start_bound), Some(end_bound))
            if start_bound != end_bound && start.is_visible() && end.is_visible() =>
        {
            Some(ClippedSegment { start, end })
        }
        _ => None,
    }
}

/// Moves `invisible` along the line through `reference` onto the viewport
/// edge it exceeds.
///
/// Edges are tried in the order right, left, upper, lower; the first
/// projection whose other coordinate lies in `[0, 1]` wins. Without one,
/// `reference` comes back unchanged and no boundary is reported.
#[must_use]
pub fn interpolate_visible(
    invisible: ScaledPoint,
    reference: ScaledPoint,
) -> (ScaledPoint, Option<Boundary>) {
    let candidates = [
        (invisible.x > 1.0, Boundary::Right),
        (invisible.x < 0.0, Boundary::Left),
        (invisible.y > 1.0, Boundary::Upper),
        (invisible.y < 0.0, Boundary::Lower),
    ];

    for (exceeded, boundary) in candidates {
        if !exceeded {
            continue;
        }
        let projected = match boundary {
            Boundary::Right => project_on_x(invisible, reference, 1.0),
            Boundary::Left => project_on_x(invisible, reference, 0.0),
            Boundary::Upper => project_on_y(invisible, reference, 1.0),
            Boundary::Lower => project_on_y(invisible, reference, 0.0),
        };
        if let Some(point) = projected {
            return (point, Some(boundary));
        }
    }

    (reference, None)
}

fn project_on_x(a: ScaledPoint, b: ScaledPoint, x: f64) -> Option<ScaledPoint> {
    let y = b.y + (x - b.x) * (a.y - b.y) / (a.x - b.x);
    (0.0..=1.0).contains(&y).then_some(ScaledPoint::new(x, y))
}

fn project_on_y(a: ScaledPoint, b: ScaledPoint, y: f64) -> Option<ScaledPoint> {
    let x = b.x + (y - b.y) * (a.x - b.x) / (a.y - b.y);
    (0.0..=1.0).contains(&x).then_some(ScaledPoint::new(x, y))
}
