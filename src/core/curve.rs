use serde::{Deserialize, Serialize};

use crate::core::types::Point;

/// One drawing command of a path in local pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo {
        control1: Point,
        control2: Point,
        to: Point,
    },
}

impl PathCommand {
    #[must_use]
    pub fn end_point(self) -> Point {
        match self {
            Self::MoveTo(point) | Self::LineTo(point) => point,
            Self::CubicTo { to, .. } => to,
        }
    }
}

/// Straight segments through every point.
#[must_use]
pub fn linear_path(points: &[Point]) -> Vec<PathCommand> {
    let mut commands = Vec::with_capacity(points.len());
    let mut iter = points.iter().copied();
    if let Some(first) = iter.next() {
        commands.push(PathCommand::MoveTo(first));
        commands.extend(iter.map(PathCommand::LineTo));
    }
    commands
}

/// Cardinal spline through every point.
///
/// `tension` 0 gives the classic Catmull-Rom-like shape, 1 straight lines.
/// End segments use their own endpoint as the missing neighbour so the curve
/// leaves the first point and enters the last one without overshoot.
#[must_use]
pub fn cardinal_path(points: &[Point], tension: f64) -> Vec<PathCommand> {
    if points.len() < 3 {
        return linear_path(points);
    }

    let k = (1.0 - tension) / 6.0;
    let last = points.len() - 1;
    let mut commands = Vec::with_capacity(points.len());
    commands.push(PathCommand::MoveTo(points[0]));

    for i in 0..last {
        let current = points[i];
        let next = points[i + 1];
        let before = if i == 0 { next } else { points[i - 1] };
        let after = if i + 1 == last { current } else { points[i + 2] };

        commands.push(PathCommand::CubicTo {
            control1: Point::new(
                current.x + k * (next.x - before.x),
                current.y + k * (next.y - before.y),
            ),
            control2: Point::new(
                next.x - k * (after.x - current.x),
                next.y - k * (after.y - current.y),
            ),
            to: next,
        });
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_inputs_fall_back_to_lines() {
        assert!(cardinal_path(&[], 0.0).is_empty());
        let two = cardinal_path(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)], 0.0);
        assert_eq!(two, vec![
            PathCommand::MoveTo(Point::new(0.0, 0.0)),
            PathCommand::LineTo(Point::new(1.0, 1.0)),
        ]);
    }

    #[test]
    fn end_segments_start_and_finish_flat_against_endpoints() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(6.0, 6.0),
            Point::new(12.0, 0.0),
        ];
        let commands = cardinal_path(&points, 0.0);
        assert_eq!(commands.len(), 3);

        let PathCommand::CubicTo { control1, control2, to } = commands[1] else {
            panic!("expected cubic");
        };
        assert_eq!(control1, points[0]);
        assert_eq!(control2, Point::new(4.0, 6.0));
        assert_eq!(to, points[1]);

        let PathCommand::CubicTo { control1, control2, .. } = commands[2] else {
            panic!("expected cubic");
        };
        assert_eq!(control1, Point::new(8.0, 6.0));
        assert_eq!(control2, points[2]);
    }
}
