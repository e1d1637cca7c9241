use crate::error::SvgWriteError;
use crate::render::VectorBackend;
use crate::types::Color;
use std::fmt::Write;

/// Format a number with 6 decimal places, treating -0 as 0
fn f(n: f32) -> String {
    let n = if n == 0.0 { 0.0 } else { n };
    format!("{:.6}", n)
}

/// Paint state saved and restored around groups
#[derive(Debug, Clone, Copy, PartialEq)]
struct PaintState {
    fill: Color,
    stroke: Color,
    stroke_width: f32,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            fill: Color::rgb(0, 0, 0),
            stroke: Color::rgb(0, 0, 0),
            stroke_width: 1.0,
        }
    }
}

/// Backend that writes the call stream back out as SVG markup.
///
/// Each `fill()` and `stroke()` becomes its own `<path>` element carrying only
/// that paint, and each saved state level becomes a `<g>` element, so the
/// output reads back through [`parse_document`](crate::parse_document).
#[derive(Debug, Default)]
pub struct SvgWriter {
    state: PaintState,
    saved: Vec<PaintState>,
    data: String,
    body: String,
}

impl SvgWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_command(&mut self, command: String) -> Result<(), SvgWriteError> {
        if !self.data.is_empty() {
            self.data.push(' ');
        }
        self.data.push_str(&command);
        Ok(())
    }

    fn push_element(&mut self, style: &str) -> Result<(), SvgWriteError> {
        if self.data.is_empty() {
            return Ok(());
        }
        let indent = "    ".repeat(self.saved.len() + 1);
        writeln!(
            self.body,
            "{}<path d=\"{}\" style=\"{}\"/>",
            indent, self.data, style
        )?;
        Ok(())
    }

    /// Wrap everything written so far in an `<svg>` root element.
    pub fn finish(self, title: &str) -> Result<String, SvgWriteError> {
        if !self.saved.is_empty() {
            return Err(SvgWriteError::UnbalancedSave(self.saved.len()));
        }

        let mut out = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n\
             <svg xmlns=\"http://www.w3.org/2000/svg\">\n",
        );
        if !title.is_empty() {
            writeln!(out, "    <title>{}</title>", quick_xml::escape::escape(title))?;
        }
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        Ok(out)
    }
}

impl VectorBackend for SvgWriter {
    type Error = SvgWriteError;

    fn begin_path(&mut self) -> Result<(), SvgWriteError> {
        self.data.clear();
        Ok(())
    }

    fn move_to(&mut self, x: f32, y: f32) -> Result<(), SvgWriteError> {
        self.push_command(format!("M{},{}", f(x), f(y)))
    }

    fn line_to(&mut self, x: f32, y: f32) -> Result<(), SvgWriteError> {
        self.push_command(format!("L{},{}", f(x), f(y)))
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) -> Result<(), SvgWriteError> {
        self.push_command(format!("Q{},{} {},{}", f(cx), f(cy), f(x), f(y)))
    }

    fn cubic_to(
        &mut self,
        c1x: f32,
        c1y: f32,
        c2x: f32,
        c2y: f32,
        x: f32,
        y: f32,
    ) -> Result<(), SvgWriteError> {
        self.push_command(format!(
            "C{},{} {},{} {},{}",
            f(c1x),
            f(c1y),
            f(c2x),
            f(c2y),
            f(x),
            f(y)
        ))
    }

    fn arc_to(
        &mut self,
        rx: f32,
        ry: f32,
        x: f32,
        y: f32,
        rotation: f32,
    ) -> Result<(), SvgWriteError> {
        self.push_command(format!(
            "A{},{} {} 0 0 {},{}",
            f(rx),
            f(ry),
            f(rotation),
            f(x),
            f(y)
        ))
    }

    fn close_path(&mut self) -> Result<(), SvgWriteError> {
        self.push_command("Z".to_string())
    }

    fn set_fill_color(&mut self, color: Color) -> Result<(), SvgWriteError> {
        self.state.fill = color;
        Ok(())
    }

    fn fill(&mut self) -> Result<(), SvgWriteError> {
        let style = format!("fill:{}", self.state.fill.to_hex());
        self.push_element(&style)
    }

    fn set_stroke_color(&mut self, color: Color) -> Result<(), SvgWriteError> {
        self.state.stroke = color;
        Ok(())
    }

    fn set_stroke_width(&mut self, width: f32) -> Result<(), SvgWriteError> {
        self.state.stroke_width = width;
        Ok(())
    }

    fn stroke(&mut self) -> Result<(), SvgWriteError> {
        let style = format!(
            "stroke:{};stroke-width:{}",
            self.state.stroke.to_hex(),
            f(self.state.stroke_width)
        );
        self.push_element(&style)
    }

    fn save_state(&mut self) -> Result<(), SvgWriteError> {
        let indent = "    ".repeat(self.saved.len() + 1);
        writeln!(self.body, "{}<g>", indent)?;
        self.saved.push(self.state);
        Ok(())
    }

    fn restore_state(&mut self) -> Result<(), SvgWriteError> {
        self.state = self.saved.pop().ok_or(SvgWriteError::UnbalancedRestore)?;
        let indent = "    ".repeat(self.saved.len() + 1);
        writeln!(self.body, "{}</g>", indent)?;
        Ok(())
    }
}
