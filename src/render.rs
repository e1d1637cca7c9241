//! Scene graph traversal.
//!
//! The renderer walks a [`Document`] depth-first and turns it into an ordered
//! stream of calls on a [`VectorBackend`]. It never inspects the backend beyond
//! propagating its errors.

use crate::types::*;
use tracing::trace;

/// Drawing surface driven by the renderer.
///
/// Coordinates are forwarded exactly as stored in the path segments; any
/// interpretation of relative coordinates is up to the implementation.
pub trait VectorBackend {
    type Error;

    fn begin_path(&mut self) -> Result<(), Self::Error>;
    fn move_to(&mut self, x: f32, y: f32) -> Result<(), Self::Error>;
    fn line_to(&mut self, x: f32, y: f32) -> Result<(), Self::Error>;
    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) -> Result<(), Self::Error>;
    fn cubic_to(
        &mut self,
        c1x: f32,
        c1y: f32,
        c2x: f32,
        c2y: f32,
        x: f32,
        y: f32,
    ) -> Result<(), Self::Error>;
    fn arc_to(&mut self, rx: f32, ry: f32, x: f32, y: f32, rotation: f32)
    -> Result<(), Self::Error>;
    fn close_path(&mut self) -> Result<(), Self::Error>;

    fn set_fill_color(&mut self, color: Color) -> Result<(), Self::Error>;
    fn fill(&mut self) -> Result<(), Self::Error>;
    fn set_stroke_color(&mut self, color: Color) -> Result<(), Self::Error>;
    fn set_stroke_width(&mut self, width: f32) -> Result<(), Self::Error>;
    fn stroke(&mut self) -> Result<(), Self::Error>;

    fn save_state(&mut self) -> Result<(), Self::Error>;
    fn restore_state(&mut self) -> Result<(), Self::Error>;
}

/// Stroke color forced before every path when
/// [`RenderOptions::reset_stroke_state`] is set
pub const RESET_STROKE_COLOR: Color = Color {
    r: 255,
    g: 0,
    b: 0,
    a: 255,
};

/// Renderer configuration
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderOptions {
    /// Reset the stroke width to 1 before rendering, and the stroke width and
    /// color (to [`RESET_STROKE_COLOR`]) at the start of every path.
    pub reset_stroke_state: bool,
}

/// Render a whole document.
pub fn render<B: VectorBackend>(
    doc: &Document,
    backend: &mut B,
    options: &RenderOptions,
) -> Result<(), B::Error> {
    if options.reset_stroke_state {
        backend.set_stroke_width(1.0)?;
    }

    for group in &doc.groups {
        render_group(group, backend, options)?;
    }
    Ok(())
}

/// Render a group inside its own saved backend state.
pub fn render_group<B: VectorBackend>(
    group: &Group,
    backend: &mut B,
    options: &RenderOptions,
) -> Result<(), B::Error> {
    backend.save_state()?;

    for child in &group.children {
        match child {
            Node::Path(path) => render_path(path, backend, options)?,
            Node::Group(g) => render_group(g, backend, options)?,
        }
    }

    backend.restore_state()
}

/// Render a single path: emit its geometry, then fill and stroke it.
///
/// A move that directly follows another move (and is not the first segment)
/// is drawn as a line to its point. Closing is skipped until something has
/// been drawn, and a path that never draws is not painted at all.
pub fn render_path<B: VectorBackend>(
    path: &Path,
    backend: &mut B,
    options: &RenderOptions,
) -> Result<(), B::Error> {
    let mut since_move: i32 = 0;
    let mut draw_count: usize = 0;

    backend.begin_path()?;

    if options.reset_stroke_state {
        backend.set_stroke_width(1.0)?;
        backend.set_stroke_color(RESET_STROKE_COLOR)?;
    }

    for (i, seg) in path.segments.iter().enumerate() {
        match *seg {
            PathSegment::MoveTo { x, y, .. } => {
                if since_move > 0 || i == 0 {
                    backend.move_to(x, y)?;
                } else {
                    backend.line_to(x, y)?;
                    draw_count += 1;
                }
                // Incremented back to zero below
                since_move = -1;
            }
            PathSegment::LineTo { x, y, .. } => backend.line_to(x, y)?,
            PathSegment::QuadTo { cx, cy, x, y, .. } => backend.quad_to(cx, cy, x, y)?,
            PathSegment::CubicTo {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
                ..
            } => {
                backend.cubic_to(c1x, c1y, c2x, c2y, x, y)?;
            }
            PathSegment::ArcTo { rx, ry, x, y, .. } => {
                // Approximation: no elliptical arc geometry, rx stands in for the rotation
                backend.arc_to(rx, ry, x, y, rx)?;
            }
            PathSegment::ClosePath => {
                if draw_count > 0 {
                    backend.close_path()?;
                }
            }
        }

        if seg.is_drawing() {
            draw_count += 1;
        }
        since_move += 1;
    }

    trace!(id = %path.id, draw_count, "Rendered path");

    if draw_count == 0 {
        return Ok(());
    }

    let fill = &path.attributes.fill;
    if fill.present {
        backend.set_fill_color(fill.color)?;
        backend.fill()?;
    }

    let stroke = &path.attributes.stroke;
    if stroke.present {
        if stroke.width > 0.0 {
            backend.set_stroke_width(stroke.width)?;
        }
        backend.set_stroke_color(stroke.color)?;
        backend.stroke()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{BackendCall, RecordingBackend};

    fn path(segments: Vec<PathSegment>, attributes: AttributeSet) -> Path {
        Path {
            id: String::new(),
            attributes,
            segments,
        }
    }

    fn mv(x: f32, y: f32) -> PathSegment {
        PathSegment::MoveTo { absolute: true, x, y }
    }

    fn ln(x: f32, y: f32) -> PathSegment {
        PathSegment::LineTo { absolute: true, x, y }
    }

    fn painted() -> AttributeSet {
        let mut attrib = AttributeSet::default();
        attrib.fill.present = true;
        attrib.fill.color = Color::rgb(0, 0, 255);
        attrib.stroke.present = true;
        attrib.stroke.color = Color::rgb(0, 255, 0);
        attrib
    }

    fn run(p: &Path) -> Vec<BackendCall> {
        let mut backend = RecordingBackend::new();
        render_path(p, &mut backend, &RenderOptions::default()).unwrap();
        backend.into_calls()
    }

    #[test]
    fn test_consecutive_moves_collapse_to_line() {
        let p = path(
            vec![mv(0.0, 0.0), mv(5.0, 5.0), ln(10.0, 10.0)],
            AttributeSet::default(),
        );
        assert_eq!(
            run(&p),
            vec![
                BackendCall::BeginPath,
                BackendCall::MoveTo(0.0, 0.0),
                BackendCall::LineTo(5.0, 5.0),
                BackendCall::LineTo(10.0, 10.0),
            ]
        );
    }

    #[test]
    fn test_move_after_drawing_starts_subpath() {
        let p = path(
            vec![mv(0.0, 0.0), ln(1.0, 1.0), mv(5.0, 5.0), ln(6.0, 6.0)],
            AttributeSet::default(),
        );
        assert_eq!(
            run(&p),
            vec![
                BackendCall::BeginPath,
                BackendCall::MoveTo(0.0, 0.0),
                BackendCall::LineTo(1.0, 1.0),
                BackendCall::MoveTo(5.0, 5.0),
                BackendCall::LineTo(6.0, 6.0),
            ]
        );
    }

    #[test]
    fn test_move_only_path_is_not_painted() {
        let p = path(vec![mv(0.0, 0.0)], painted());
        assert_eq!(
            run(&p),
            vec![BackendCall::BeginPath, BackendCall::MoveTo(0.0, 0.0)]
        );
    }

    #[test]
    fn test_close_needs_a_drawn_segment() {
        let p = path(
            vec![mv(0.0, 0.0), PathSegment::ClosePath, ln(1.0, 1.0), PathSegment::ClosePath],
            AttributeSet::default(),
        );
        let calls = run(&p);
        assert_eq!(
            calls.iter().filter(|c| **c == BackendCall::ClosePath).count(),
            1
        );
        assert_eq!(calls.last(), Some(&BackendCall::ClosePath));
    }

    #[test]
    fn test_fill_then_stroke() {
        let mut attrib = painted();
        attrib.stroke.width = 2.0;
        let p = path(vec![mv(0.0, 0.0), ln(1.0, 0.0)], attrib);

        assert_eq!(
            run(&p)[3..],
            [
                BackendCall::SetFillColor(Color::rgb(0, 0, 255)),
                BackendCall::Fill,
                BackendCall::SetStrokeWidth(2.0),
                BackendCall::SetStrokeColor(Color::rgb(0, 255, 0)),
                BackendCall::Stroke,
            ]
        );
    }

    #[test]
    fn test_zero_stroke_width_keeps_backend_width() {
        let mut attrib = AttributeSet::default();
        attrib.stroke.present = true;
        let p = path(vec![mv(0.0, 0.0), ln(1.0, 0.0)], attrib);

        let calls = run(&p);
        assert!(!calls.iter().any(|c| matches!(c, BackendCall::SetStrokeWidth(_))));
        assert_eq!(calls.last(), Some(&BackendCall::Stroke));
    }

    #[test]
    fn test_curves_and_arcs() {
        let p = path(
            vec![
                mv(0.0, 0.0),
                PathSegment::QuadTo { absolute: true, cx: 1.0, cy: 2.0, x: 3.0, y: 4.0 },
                PathSegment::CubicTo {
                    absolute: true,
                    c1x: 1.0,
                    c1y: 2.0,
                    c2x: 3.0,
                    c2y: 4.0,
                    x: 5.0,
                    y: 6.0,
                },
                PathSegment::ArcTo {
                    absolute: true,
                    rx: 7.0,
                    ry: 8.0,
                    x_axis_rotation: 45.0,
                    large_arc: false,
                    sweep: true,
                    x: 9.0,
                    y: 10.0,
                },
            ],
            AttributeSet::default(),
        );
        assert_eq!(
            run(&p)[2..],
            [
                BackendCall::QuadTo(1.0, 2.0, 3.0, 4.0),
                BackendCall::CubicTo(1.0, 2.0, 3.0, 4.0, 5.0, 6.0),
                BackendCall::ArcTo(7.0, 8.0, 9.0, 10.0, 7.0),
            ]
        );
    }

    #[test]
    fn test_reset_stroke_state() {
        let doc = Document {
            title: String::new(),
            groups: vec![Group {
                id: String::new(),
                attributes: AttributeSet::default(),
                transform: None,
                children: vec![Node::Path(path(vec![mv(0.0, 0.0)], AttributeSet::default()))],
            }],
        };
        let mut backend = RecordingBackend::new();
        let options = RenderOptions {
            reset_stroke_state: true,
        };
        render(&doc, &mut backend, &options).unwrap();

        assert_eq!(
            backend.calls(),
            [
                BackendCall::SetStrokeWidth(1.0),
                BackendCall::SaveState,
                BackendCall::BeginPath,
                BackendCall::SetStrokeWidth(1.0),
                BackendCall::SetStrokeColor(RESET_STROKE_COLOR),
                BackendCall::MoveTo(0.0, 0.0),
                BackendCall::RestoreState,
            ]
        );
    }

    /// Records calls like [`RecordingBackend`] but fails on the first `move_to`.
    #[derive(Default)]
    struct FailingBackend {
        calls: Vec<BackendCall>,
    }

    impl FailingBackend {
        fn record(&mut self, call: BackendCall) -> Result<(), &'static str> {
            self.calls.push(call);
            match call {
                BackendCall::MoveTo(..) => Err("move_to failed"),
                _ => Ok(()),
            }
        }
    }

    impl VectorBackend for FailingBackend {
        type Error = &'static str;

        fn begin_path(&mut self) -> Result<(), Self::Error> {
            self.record(BackendCall::BeginPath)
        }
        fn move_to(&mut self, x: f32, y: f32) -> Result<(), Self::Error> {
            self.record(BackendCall::MoveTo(x, y))
        }
        fn line_to(&mut self, x: f32, y: f32) -> Result<(), Self::Error> {
            self.record(BackendCall::LineTo(x, y))
        }
        fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) -> Result<(), Self::Error> {
            self.record(BackendCall::QuadTo(cx, cy, x, y))
        }
        fn cubic_to(
            &mut self,
            c1x: f32,
            c1y: f32,
            c2x: f32,
            c2y: f32,
            x: f32,
            y: f32,
        ) -> Result<(), Self::Error> {
            self.record(BackendCall::CubicTo(c1x, c1y, c2x, c2y, x, y))
        }
        fn arc_to(
            &mut self,
            rx: f32,
            ry: f32,
            x: f32,
            y: f32,
            rotation: f32,
        ) -> Result<(), Self::Error> {
            self.record(BackendCall::ArcTo(rx, ry, x, y, rotation))
        }
        fn close_path(&mut self) -> Result<(), Self::Error> {
            self.record(BackendCall::ClosePath)
        }
        fn set_fill_color(&mut self, color: Color) -> Result<(), Self::Error> {
            self.record(BackendCall::SetFillColor(color))
        }
        fn fill(&mut self) -> Result<(), Self::Error> {
            self.record(BackendCall::Fill)
        }
        fn set_stroke_color(&mut self, color: Color) -> Result<(), Self::Error> {
            self.record(BackendCall::SetStrokeColor(color))
        }
        fn set_stroke_width(&mut self, width: f32) -> Result<(), Self::Error> {
            self.record(BackendCall::SetStrokeWidth(width))
        }
        fn stroke(&mut self) -> Result<(), Self::Error> {
            self.record(BackendCall::Stroke)
        }
        fn save_state(&mut self) -> Result<(), Self::Error> {
            self.record(BackendCall::SaveState)
        }
        fn restore_state(&mut self) -> Result<(), Self::Error> {
            self.record(BackendCall::RestoreState)
        }
    }

    #[test]
    fn test_backend_error_stops_traversal() {
        let first = path(vec![mv(0.0, 0.0), ln(1.0, 1.0)], painted());
        let second = path(vec![mv(2.0, 2.0), ln(3.0, 3.0)], painted());
        let doc = Document {
            title: String::new(),
            groups: vec![
                Group {
                    id: String::new(),
                    attributes: AttributeSet::default(),
                    transform: None,
                    children: vec![Node::Path(first), Node::Path(second)],
                },
                Group {
                    id: "later".to_string(),
                    attributes: AttributeSet::default(),
                    transform: None,
                    children: Vec::new(),
                },
            ],
        };

        let mut backend = FailingBackend::default();
        let result = render(&doc, &mut backend, &RenderOptions::default());

        assert_eq!(result, Err("move_to failed"));
        // No restore, no second path, no second group
        assert_eq!(
            backend.calls,
            [
                BackendCall::SaveState,
                BackendCall::BeginPath,
                BackendCall::MoveTo(0.0, 0.0),
            ]
        );
    }
}
