//! Vector helpers shared by connection routing and connection drawing.

use crate::constants::{ARROW_HEAD_LENGTH, LABEL_BOX_RAISE, LABEL_BOX_WIDTH};
use crate::types::{Position, Size};
use log::trace;

/// Euclidean length of `(dx, dy)`.
pub fn vector_length(dx: f32, dy: f32) -> f32 {
    (dx * dx + dy * dy).sqrt()
}

/// Unit vector pointing along `(dx, dy)`, or `None` for the zero vector.
pub fn normalize(dx: f32, dy: f32) -> Option<(f32, f32)> {
    let length = vector_length(dx, dy);
    if length == 0.0 {
        return None;
    }
    Some((dx / length, dy / length))
}

/// Point where a ray from the box center along `direction` leaves the box.
///
/// The exit edge is chosen by comparing magnitudes: when `|dx| > |dy|` the ray
/// leaves through the left or right edge, otherwise through the top or bottom edge.
/// A perfect diagonal therefore exits vertically. The crossing point slides along
/// the chosen edge proportionally to the minor component and stays on that edge.
/// A zero direction yields the center.
pub fn edge_intersection(origin: Position, size: Size, direction: (f32, f32)) -> Position {
    let (dx, dy) = direction;
    let center = size.center_at(origin);
    let half_w = size.width / 2.0;
    let half_h = size.height / 2.0;

    let point = if dx.abs() > dy.abs() {
        let x = if dx > 0.0 { origin.x + size.width } else { origin.x };
        let slide = (dy * half_w / dx.abs()).clamp(-half_h, half_h);
        Position::new(x, center.y + slide)
    } else if dy != 0.0 {
        let y = if dy > 0.0 { origin.y + size.height } else { origin.y };
        let slide = (dx * half_h / dy.abs()).clamp(-half_w, half_w);
        Position::new(center.x + slide, y)
    } else {
        center
    };
    trace!("edge intersection of {direction:?} from {center:?} -> {point:?}");
    point
}

/// The three corners of a filled arrow head.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowHead {
    /// The arrow tip, equal to the connection's end point
    pub tip: Position,
    /// Wing on the clockwise side of the reversed direction
    pub left: Position,
    /// Wing on the counter-clockwise side of the reversed direction
    pub right: Position,
}

/// Computes the arrow head for a segment from `start` to `end`.
///
/// Each wing sits one head length back from the tip and half a head length to the
/// side. Returns `None` when the segment has zero length; such a connection is not drawn.
pub fn arrow_head(start: Position, end: Position) -> Option<ArrowHead> {
    let (ux, uy) = normalize(end.x - start.x, end.y - start.y)?;
    let back_x = end.x - ARROW_HEAD_LENGTH * ux;
    let back_y = end.y - ARROW_HEAD_LENGTH * uy;
    let side = ARROW_HEAD_LENGTH * 0.5;
    Some(ArrowHead {
        tip: end,
        left: Position::new(back_x - side * uy, back_y + side * ux),
        right: Position::new(back_x + side * uy, back_y - side * ux),
    })
}

/// Midpoint of a segment.
pub fn midpoint(start: Position, end: Position) -> Position {
    Position::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0)
}

/// Top-left corner of the label box for a connection, centered on the midpoint.
pub fn label_origin(start: Position, end: Position) -> Position {
    midpoint(start, end).offset(-LABEL_BOX_WIDTH / 2.0, -LABEL_BOX_RAISE)
}
