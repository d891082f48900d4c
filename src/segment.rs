use egui::{Color32, Pos2};

use crate::surface::Surface;

/// One recorded drawing primitive with fixed visual attributes.
///
/// Segments are immutable once recorded and the log keeps insertion order,
/// so replaying it on any surface reproduces the drawn strokes exactly,
/// later segments painting over earlier ones.
#[derive(Clone, Debug, PartialEq)]
pub enum Segment {
    /// A single stamped point. The first point of a freehand path is kept
    /// as a dot because a zero-length line is invisible on some renderers.
    Dot {
        pos: Pos2,
        color: Color32,
        width: f32,
    },
    /// A straight connection between two consecutive pointer positions.
    Line {
        from: Pos2,
        to: Pos2,
        color: Color32,
        width: f32,
    },
}

impl Segment {
    pub fn dot(pos: Pos2, color: Color32, width: f32) -> Self {
        Self::Dot { pos, color, width }
    }

    pub fn line(from: Pos2, to: Pos2, color: Color32, width: f32) -> Self {
        Self::Line {
            from,
            to,
            color,
            width,
        }
    }

    pub fn color(&self) -> Color32 {
        match *self {
            Self::Dot { color, .. } | Self::Line { color, .. } => color,
        }
    }

    pub fn width(&self) -> f32 {
        match *self {
            Self::Dot { width, .. } | Self::Line { width, .. } => width,
        }
    }

    /// Draw this segment onto a surface.
    pub fn draw<S: Surface>(&self, surface: &mut S) {
        match *self {
            Self::Dot { pos, color, width } => surface.stroke_dot(pos, width, color),
            Self::Line {
                from,
                to,
                color,
                width,
            } => surface.stroke_line(from, to, width, color),
        }
    }
}
