//! Greedy word wrapping for text layers.

use crate::surface::{FontSpec, TextMeasure};

/// One wrapped line and its measured width.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub width: f64,
}

/// Break `content` into lines no wider than `max_width`.
///
/// Words are separated by whitespace and never split, so a single word wider
/// than `max_width` gets a line of its own. Explicit newlines always break.
pub fn wrap<M: TextMeasure + ?Sized>(
    content: &str,
    max_width: f64,
    font: &FontSpec,
    measure: &mut M,
) -> Vec<TextLine> {
    let mut lines = Vec::new();
    for paragraph in content.lines() {
        let mut current: Option<TextLine> = None;
        for word in paragraph.split_whitespace() {
            current = Some(match current.take() {
                None => TextLine {
                    text: word.to_string(),
                    width: measure.measure_text(word, font),
                },
                Some(line) => {
                    let candidate = format!("{} {word}", line.text);
                    let width = measure.measure_text(&candidate, font);
                    if width > max_width {
                        lines.push(line);
                        TextLine {
                            text: word.to_string(),
                            width: measure.measure_text(word, font),
                        }
                    } else {
                        TextLine { text: candidate, width }
                    }
                }
            });
        }
        lines.push(current.unwrap_or(TextLine { text: String::new(), width: 0.0 }));
    }
    lines
}

/// Width of the widest unwrapped line of `content`.
pub fn natural_width<M: TextMeasure + ?Sized>(content: &str, font: &FontSpec, measure: &mut M) -> f64 {
    content
        .lines()
        .map(|line| measure.measure_text(line.split_whitespace().collect::<Vec<_>>().join(" ").as_str(), font))
        .fold(0.0, f64::max)
}
