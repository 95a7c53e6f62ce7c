//! Drawable surface abstraction.
//!
//! Everything here is in surface space (origin top-left, +y down). The
//! engine never touches a surface directly; it goes through
//! [`PrimitiveRenderer`](crate::renderer::PrimitiveRenderer), which maps and
//! clamps optical coordinates first.

use crate::points::Point2D;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    Red,
    Blue,
    Green,
    Purple,
}

impl Color {
    /// CSS color name.
    pub fn css(&self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Purple => "purple",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Right,
}

impl TextAlign {
    pub fn css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TextStyle {
    pub color: Color,
    pub font_px: f64,
    pub align: TextAlign,
}

impl TextStyle {
    pub fn new(color: Color, font_px: f64) -> Self {
        Self {
            color,
            font_px,
            align: TextAlign::Left,
        }
    }

    pub fn right_aligned(mut self) -> Self {
        self.align = TextAlign::Right;
        self
    }
}

/// A 2D drawing target.
pub trait Surface {
    /// Width and height in surface pixels.
    fn size(&self) -> (u32, u32);

    fn clear(&mut self);

    fn stroke_line(&mut self, from: Point2D, to: Point2D, color: Color, width: f64);

    /// Fill a `size` x `size` square whose top-left corner is `at`.
    fn plot(&mut self, at: Point2D, color: Color, size: f64);

    fn fill_circle(&mut self, center: Point2D, radius: f64, color: Color);

    fn stroke_ellipse(
        &mut self,
        center: Point2D,
        radius_x: f64,
        radius_y: f64,
        color: Color,
        width: f64,
    );

    fn fill_text(&mut self, at: Point2D, text: &str, style: &TextStyle);
}

/// One recorded surface call.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    Clear,
    Line {
        from: Point2D,
        to: Point2D,
        color: Color,
        width: f64,
    },
    Plot {
        at: Point2D,
        color: Color,
        size: f64,
    },
    Circle {
        center: Point2D,
        radius: f64,
        color: Color,
    },
    Ellipse {
        center: Point2D,
        radius_x: f64,
        radius_y: f64,
        color: Color,
        width: f64,
    },
    Text {
        at: Point2D,
        text: String,
        style: TextStyle,
    },
}

impl DrawCommand {
    /// Surface points this command touches (anchor points only).
    pub fn anchors(&self) -> Vec<Point2D> {
        match self {
            DrawCommand::Clear => Vec::new(),
            DrawCommand::Line { from, to, .. } => vec![*from, *to],
            DrawCommand::Plot { at, .. } => vec![*at],
            DrawCommand::Circle { center, .. } => vec![*center],
            DrawCommand::Ellipse { center, .. } => vec![*center],
            DrawCommand::Text { at, .. } => vec![*at],
        }
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            DrawCommand::Clear => None,
            DrawCommand::Line { color, .. }
            | DrawCommand::Plot { color, .. }
            | DrawCommand::Circle { color, .. }
            | DrawCommand::Ellipse { color, .. } => Some(*color),
            DrawCommand::Text { style, .. } => Some(style.color),
        }
    }
}

/// Surface that records draw calls instead of rasterizing them.
///
/// `clear` drops everything recorded so far, so the command list always
/// describes exactly one frame.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count_where(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| predicate(c)).count()
    }

    /// The recorded frame as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.commands)
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn stroke_line(&mut self, from: Point2D, to: Point2D, color: Color, width: f64) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn plot(&mut self, at: Point2D, color: Color, size: f64) {
        self.commands.push(DrawCommand::Plot { at, color, size });
    }

    fn fill_circle(&mut self, center: Point2D, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_ellipse(
        &mut self,
        center: Point2D,
        radius_x: f64,
        radius_y: f64,
        color: Color,
        width: f64,
    ) {
        self.commands.push(DrawCommand::Ellipse {
            center,
            radius_x,
            radius_y,
            color,
            width,
        });
    }

    fn fill_text(&mut self, at: Point2D, text: &str, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_string(),
            style: *style,
        });
    }
}
