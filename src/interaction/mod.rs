use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Point;

/// Pointer events a chart reacts to, already in chart-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerInput {
    Move { x: f64, y: f64 },
    TouchStart { x: f64, y: f64 },
    TouchMove { x: f64, y: f64 },
    Leave,
}

impl PointerInput {
    #[must_use]
    pub fn position(self) -> Option<Point> {
        match self {
            Self::Move { x, y } | Self::TouchStart { x, y } | Self::TouchMove { x, y } => {
                Some(Point::new(x, y))
            }
            Self::Leave => None,
        }
    }
}

/// Converts a client-space pointer position into the chart's local space.
#[must_use]
pub fn local_point(client: Point, container_origin: Point) -> Point {
    Point::new(client.x - container_origin.x, client.y - container_origin.y)
}

/// Tooltip visibility with its payload and pixel anchor.
///
/// `Hidden` carries nothing, so a hidden tooltip can never render stale data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TooltipState<T> {
    Hidden,
    Shown { data: T, left: f64, top: f64 },
}

impl<T> Default for TooltipState<T> {
    fn default() -> Self {
        Self::Hidden
    }
}

impl<T> TooltipState<T> {
    /// Replaces any shown payload.
    pub fn show(&mut self, data: T, left: f64, top: f64) {
        trace!(left, top, "tooltip shown");
        *self = Self::Shown { data, left, top };
    }

    pub fn hide(&mut self) {
        if self.is_open() {
            trace!("tooltip hidden");
        }
        *self = Self::Hidden;
    }

    /// Applies one pointer event.
    ///
    /// `resolve` maps a local pointer position to the payload and anchor; when
    /// it yields `None` (pointer over nothing) the tooltip hides.
    pub fn on_pointer<F>(&mut self, input: PointerInput, resolve: F)
    where
        F: FnOnce(Point) -> Option<(T, f64, f64)>,
    {
        match input.position().and_then(resolve) {
            Some((data, left, top)) => self.show(data, left, top),
            None => self.hide(),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Shown { .. })
    }

    #[must_use]
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Shown { data, .. } => Some(data),
            Self::Hidden => None,
        }
    }

    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        match self {
            Self::Shown { left, top, .. } => Some(Point::new(*left, *top)),
            Self::Hidden => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leave_hides_and_clears_payload() {
        let mut state = TooltipState::default();
        state.on_pointer(PointerInput::Move { x: 4.0, y: 5.0 }, |p| Some((p.x, p.x, p.y)));
        assert_eq!(state.data(), Some(&4.0));
        state.on_pointer(PointerInput::Leave, |_| Some((0.0, 0.0, 0.0)));
        assert_eq!(state, TooltipState::Hidden);
    }

    #[test]
    fn local_point_subtracts_origin() {
        let local = local_point(Point::new(120.0, 80.0), Point::new(20.0, 30.0));
        assert_eq!(local, Point::new(100.0, 50.0));
    }
}
