use crate::render::VectorBackend;
use crate::types::Color;
use std::convert::Infallible;
use std::fmt;

/// One call received by a [`RecordingBackend`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackendCall {
    BeginPath,
    MoveTo(f32, f32),
    LineTo(f32, f32),
    QuadTo(f32, f32, f32, f32),
    CubicTo(f32, f32, f32, f32, f32, f32),
    /// `rx, ry, x, y, rotation`
    ArcTo(f32, f32, f32, f32, f32),
    ClosePath,
    SetFillColor(Color),
    Fill,
    SetStrokeColor(Color),
    SetStrokeWidth(f32),
    Stroke,
    SaveState,
    RestoreState,
}

impl fmt::Display for BackendCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendCall::BeginPath => write!(f, "begin_path"),
            BackendCall::MoveTo(x, y) => write!(f, "move_to {} {}", x, y),
            BackendCall::LineTo(x, y) => write!(f, "line_to {} {}", x, y),
            BackendCall::QuadTo(cx, cy, x, y) => write!(f, "quad_to {} {} {} {}", cx, cy, x, y),
            BackendCall::CubicTo(c1x, c1y, c2x, c2y, x, y) => {
                write!(f, "cubic_to {} {} {} {} {} {}", c1x, c1y, c2x, c2y, x, y)
            }
            BackendCall::ArcTo(rx, ry, x, y, rotation) => {
                write!(f, "arc_to {} {} {} {} {}", rx, ry, x, y, rotation)
            }
            BackendCall::ClosePath => write!(f, "close_path"),
            BackendCall::SetFillColor(c) => write!(f, "set_fill_color {}", c.to_hex()),
            BackendCall::Fill => write!(f, "fill"),
            BackendCall::SetStrokeColor(c) => write!(f, "set_stroke_color {}", c.to_hex()),
            BackendCall::SetStrokeWidth(w) => write!(f, "set_stroke_width {}", w),
            BackendCall::Stroke => write!(f, "stroke"),
            BackendCall::SaveState => write!(f, "save_state"),
            BackendCall::RestoreState => write!(f, "restore_state"),
        }
    }
}

/// Backend that records every call in order and draws nothing.
#[derive(Debug, Default, Clone)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<BackendCall> {
        self.calls
    }

    fn push(&mut self, call: BackendCall) -> Result<(), Infallible> {
        self.calls.push(call);
        Ok(())
    }
}

impl VectorBackend for RecordingBackend {
    type Error = Infallible;

    fn begin_path(&mut self) -> Result<(), Infallible> {
        self.push(BackendCall::BeginPath)
    }

    fn move_to(&mut self, x: f32, y: f32) -> Result<(), Infallible> {
        self.push(BackendCall::MoveTo(x, y))
    }

    fn line_to(&mut self, x: f32, y: f32) -> Result<(), Infallible> {
        self.push(BackendCall::LineTo(x, y))
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) -> Result<(), Infallible> {
        self.push(BackendCall::QuadTo(cx, cy, x, y))
    }

    fn cubic_to(
        &mut self,
        c1x: f32,
        c1y: f32,
        c2x: f32,
        c2y: f32,
        x: f32,
        y: f32,
    ) -> Result<(), Infallible> {
        self.push(BackendCall::CubicTo(c1x, c1y, c2x, c2y, x, y))
    }

    fn arc_to(&mut self, rx: f32, ry: f32, x: f32, y: f32, rotation: f32) -> Result<(), Infallible> {
        self.push(BackendCall::ArcTo(rx, ry, x, y, rotation))
    }

    fn close_path(&mut self) -> Result<(), Infallible> {
        self.push(BackendCall::ClosePath)
    }

    fn set_fill_color(&mut self, color: Color) -> Result<(), Infallible> {
        self.push(BackendCall::SetFillColor(color))
    }

    fn fill(&mut self) -> Result<(), Infallible> {
        self.push(BackendCall::Fill)
    }

    fn set_stroke_color(&mut self, color: Color) -> Result<(), Infallible> {
        self.push(BackendCall::SetStrokeColor(color))
    }

    fn set_stroke_width(&mut self, width: f32) -> Result<(), Infallible> {
        self.push(BackendCall::SetStrokeWidth(width))
    }

    fn stroke(&mut self) -> Result<(), Infallible> {
        self.push(BackendCall::Stroke)
    }

    fn save_state(&mut self) -> Result<(), Infallible> {
        self.push(BackendCall::SaveState)
    }

    fn restore_state(&mut self) -> Result<(), Infallible> {
        self.push(BackendCall::RestoreState)
    }
}
