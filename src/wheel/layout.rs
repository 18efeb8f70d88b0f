//! Wheel geometry for renderers.
//!
//! Segments are laid out clockwise starting at 12 o'clock, in a 300×300
//! SVG user space centered on [`WHEEL_CENTER`].

use crate::core::constants::{WHEEL_CENTER, WHEEL_LABEL_RADIUS, WHEEL_RADIUS};
use crate::wheel::engine::TurntableOption;

/// Fill colors used when an option does not bring its own
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelOptions {
    /// Distance of the label from the wheel center
    pub radius: f64,
    /// Flip labels on the lower half so text never reads upside down
    pub keep_upright: bool,
    /// Angles measured from 12 o'clock rather than 3 o'clock
    pub start_at_top: bool,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            radius: WHEEL_LABEL_RADIUS,
            keep_upright: false,
            start_at_top: true,
        }
    }
}

/// Position and rotation (degrees) of a segment label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub x: f64,
    pub y: f64,
    pub rotate: f64,
}

impl LabelPlacement {
    /// SVG `transform` attribute rotating the label about its anchor
    pub fn transform(&self) -> String {
        format!("rotate({} {} {})", self.rotate, self.x, self.y)
    }
}

fn point_at(angle_deg: f64, radius: f64) -> (f64, f64) {
    let (cx, cy) = WHEEL_CENTER;
    let angle = angle_deg.to_radians();
    (cx + radius * angle.cos(), cy + radius * angle.sin())
}

/// SVG path of a pie slice for segment `index`
pub fn segment_path(index: usize, segment_angle: f64) -> String {
    let (cx, cy) = WHEEL_CENTER;
    let start = index as f64 * segment_angle - 90.0;
    let end = (index + 1) as f64 * segment_angle - 90.0;
    let (x1, y1) = point_at(start, WHEEL_RADIUS);
    let (x2, y2) = point_at(end, WHEEL_RADIUS);
    let large_arc = if segment_angle > 180.0 { 1 } else { 0 };

    format!(
        "M {cx} {cy} L {x1} {y1} A {r} {r} 0 {large_arc} 1 {x2} {y2} Z",
        r = WHEEL_RADIUS
    )
}

/// Label anchor at the middle of segment `index`, rotated so the top of the
/// text points at the center
pub fn label_placement(index: usize, segment_angle: f64, options: LabelOptions) -> LabelPlacement {
    let offset = if options.start_at_top { -90.0 } else { 0.0 };
    let mid = index as f64 * segment_angle + segment_angle / 2.0 + offset;
    let (x, y) = point_at(mid, options.radius);

    let mut rotate = mid - 90.0;
    if options.keep_upright {
        let norm = rotate.rem_euclid(360.0);
        if norm > 90.0 && norm < 270.0 {
            rotate += 180.0;
        }
    }

    LabelPlacement { x, y, rotate }
}

/// The option's own color, or a palette entry cycling by index
pub fn color_for(option: &TurntableOption, index: usize) -> &str {
    option
        .color
        .as_deref()
        .unwrap_or(DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()])
}
