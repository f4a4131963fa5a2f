//! 2-D drawing surface used by the backdrops, plus a recording implementation.
//!
//! Backdrops draw through the small canvas-style [`Surface`] trait: a current
//! fill colour, stroke colour and line width, and four primitives.  The Bevy
//! host records a frame into a [`DrawList`] and presents it afterwards (see
//! [`crate::rendering`]); tests inspect the recorded commands directly.
//!
//! Coordinates are surface pixels with the origin at the top-left corner and
//! `y` growing downward.

use bevy::prelude::*;

/// Immediate-mode drawing target.
pub trait Surface {
    fn set_fill(&mut self, color: Color);
    fn set_stroke(&mut self, color: Color);
    fn set_line_width(&mut self, width: f32);

    /// Fill an axis-aligned rectangle with the current fill colour.
    fn fill_rect(&mut self, min: Vec2, size: Vec2);
    fn fill_circle(&mut self, center: Vec2, radius: f32);
    fn stroke_circle(&mut self, center: Vec2, radius: f32);
    fn stroke_line(&mut self, from: Vec2, to: Vec2);
}

/// One recorded primitive with its resolved style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    FillRect {
        min: Vec2,
        size: Vec2,
        color: Color,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        color: Color,
        width: f32,
    },
    StrokeLine {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
}

/// A frame's worth of draw commands.
#[derive(Resource, Debug, Clone)]
pub struct DrawList {
    size: Vec2,
    fill: Color,
    stroke: Color,
    line_width: f32,
    commands: Vec<DrawCommand>,
}

impl Default for DrawList {
    fn default() -> Self {
        Self {
            size: Vec2::ZERO,
            fill: Color::BLACK,
            stroke: Color::BLACK,
            line_width: 1.0,
            commands: Vec::new(),
        }
    }
}

impl DrawList {
    /// Drop the previous frame and reset the pen for a surface of `size`.
    pub fn begin(&mut self, size: Vec2) {
        self.size = size;
        self.fill = Color::BLACK;
        self.stroke = Color::BLACK;
        self.line_width = 1.0;
        self.commands.clear();
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn filled_circles(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count()
    }

    pub fn stroked_circles(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeCircle { .. }))
            .count()
    }

    pub fn stroked_lines(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeLine { .. }))
            .count()
    }
}

impl Surface for DrawList {
    fn set_fill(&mut self, color: Color) {
        self.fill = color;
    }

    fn set_stroke(&mut self, color: Color) {
        self.stroke = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2) {
        self.commands.push(DrawCommand::FillRect {
            min,
            size,
            color: self.fill,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color: self.fill,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            color: self.stroke,
            width: self.line_width,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            color: self.stroke,
            width: self.line_width,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_capture_pen_state_at_record_time() {
        let mut list = DrawList::default();
        list.begin(Vec2::new(10.0, 10.0));
        list.set_stroke(Color::WHITE);
        list.set_line_width(3.0);
        list.stroke_line(Vec2::ZERO, Vec2::ONE);
        list.set_line_width(1.0);
        list.stroke_circle(Vec2::ONE, 2.0);

        match list.commands()[0] {
            DrawCommand::StrokeLine { width, color, .. } => {
                assert_eq!(width, 3.0);
                assert_eq!(color, Color::WHITE);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(list.stroked_lines(), 1);
        assert_eq!(list.stroked_circles(), 1);
    }

    #[test]
    fn begin_clears_previous_frame() {
        let mut list = DrawList::default();
        list.begin(Vec2::splat(5.0));
        list.fill_circle(Vec2::ONE, 1.0);
        list.begin(Vec2::splat(5.0));
        assert!(list.is_empty());
    }
}
