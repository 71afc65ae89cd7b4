//! A drawing surface that records calls as text.

use std::fmt::Write as _;

use crate::geometry::{Affine, Rect, Size};
use crate::surface::{BoxPaint, DrawingSurface, FontSpec, TextMeasure, TextPaint};

/// Records every draw call as one line of text, for headless assertions.
///
/// Text is measured as half the font size per character plus letter
/// spacing, so layouts are deterministic without a font backend.
///
/// ```
/// use gilt_canvas::surface::DrawingSurface;
/// use gilt_canvas::testing::RecordingSurface;
///
/// let mut surface = RecordingSurface::new();
/// surface.save();
/// assert_eq!(surface.commands(), ["save"]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    commands: Vec<String>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Take the recorded commands, leaving the log empty.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.commands)
    }

    /// Recorded commands starting with `prefix`.
    pub fn matching(&self, prefix: &str) -> Vec<&str> {
        self.commands
            .iter()
            .filter(|c| c.starts_with(prefix))
            .map(String::as_str)
            .collect()
    }

    /// The whole log, one command per line.
    pub fn to_text(&self) -> String {
        self.commands.join("\n")
    }

    fn record(&mut self, command: String) {
        self.commands.push(command);
    }
}

fn rect(r: Rect) -> String {
    format!("{},{} {}x{}", r.x, r.y, r.width, r.height)
}

impl TextMeasure for RecordingSurface {
    fn measure_text(&mut self, text: &str, font: &FontSpec) -> f64 {
        let chars = text.chars().count() as f64;
        chars * (font.size / 2.0 + font.letter_spacing)
    }
}

impl DrawingSurface for RecordingSurface {
    fn resize_backing(&mut self, logical: Size, pixel_ratio: f64) {
        self.record(format!("backing {}x{} @{}", logical.width, logical.height, pixel_ratio));
    }

    fn clear(&mut self, size: Size) {
        self.record(format!("clear {}x{}", size.width, size.height));
    }

    fn save(&mut self) {
        self.record("save".into());
    }

    fn restore(&mut self) {
        self.record("restore".into());
    }

    fn set_transform(&mut self, matrix: &Affine) {
        let [a, b, c, d, e, f] = matrix.to_array();
        self.record(format!("transform {a} {b} {c} {d} {e} {f}"));
    }

    fn fill_background(&mut self, color: &str, area: Rect) {
        self.record(format!("background {color} {}", rect(area)));
    }

    fn draw_box(&mut self, paint: &BoxPaint<'_>) {
        let mut line = format!("box {}", rect(paint.rect));
        if let Some(background) = paint.background {
            let _ = write!(line, " fill={background}");
        }
        if paint.radii.iter().any(|r| *r != 0.0) {
            let [tl, tr, br, bl] = paint.radii;
            let _ = write!(line, " radius={tl},{tr},{br},{bl}");
        }
        if let Some(stroke) = &paint.stroke {
            let _ = write!(line, " stroke={}/{}", stroke.color, stroke.width);
        }
        if let Some(shadow) = &paint.shadow {
            let _ = write!(line, " shadow={}", shadow.color);
        }
        self.record(line);
    }

    fn draw_text(&mut self, paint: &TextPaint<'_>) {
        self.record(format!(
            "text {:?} at {},{} font={} color={}",
            paint.text,
            paint.x,
            paint.y,
            paint.font.shorthand(),
            paint.color
        ));
    }

    fn draw_image(&mut self, src: &str, area: Rect) {
        self.record(format!("image {src} {}", rect(area)));
    }
}
