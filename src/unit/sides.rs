//! Four-sided values (top, right, bottom, left) for margin, padding and
//! corner radius.

use super::value::{Axis, Dependency, ResolvedValue, ValueError, ValueInput};

/// Author input for a four-sided property: one to four values.
///
/// - 1 value: all sides
/// - 2 values: vertical, horizontal
/// - 3 values: top, horizontal, bottom
/// - 4 values: top, right, bottom, left
#[derive(Debug, Clone, PartialEq)]
pub struct SidesInput(pub Vec<ValueInput>);

impl From<f64> for SidesInput {
    fn from(value: f64) -> Self {
        SidesInput(vec![ValueInput::Number(value)])
    }
}

impl From<i32> for SidesInput {
    fn from(value: i32) -> Self {
        SidesInput(vec![ValueInput::from(value)])
    }
}

/// Whitespace-separated tokens, e.g. `"40px 10px"`.
impl From<&str> for SidesInput {
    fn from(value: &str) -> Self {
        SidesInput(value.split_whitespace().map(ValueInput::from).collect())
    }
}

impl<T: Into<ValueInput>, const N: usize> From<[T; N]> for SidesInput {
    fn from(values: [T; N]) -> Self {
        SidesInput(values.into_iter().map(Into::into).collect())
    }
}

/// Four resolved values, one per side.
///
/// Top and bottom read the container's height, left and right its width.
#[derive(Debug, Clone, PartialEq)]
pub struct Sides {
    pub top: ResolvedValue,
    pub right: ResolvedValue,
    pub bottom: ResolvedValue,
    pub left: ResolvedValue,
}

impl Sides {
    /// Zero on every side.
    pub fn zero() -> Self {
        Self {
            top: ResolvedValue::px(0.0, Axis::Height),
            right: ResolvedValue::px(0.0, Axis::Width),
            bottom: ResolvedValue::px(0.0, Axis::Height),
            left: ResolvedValue::px(0.0, Axis::Width),
        }
    }

    /// Parse 1-4 values, expanding them CSS-style.
    pub fn parse(input: impl Into<SidesInput>, preferred: Dependency) -> Result<Self, ValueError> {
        let SidesInput(values) = input.into();
        let [top, right, bottom, left] = match values.as_slice() {
            [all] => [all, all, all, all],
            [vertical, horizontal] => [vertical, horizontal, vertical, horizontal],
            [top, horizontal, bottom] => [top, horizontal, bottom, horizontal],
            [top, right, bottom, left] => [top, right, bottom, left],
            other => {
                return Err(ValueError::InvalidValue {
                    input: other
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(" "),
                    message: format!("expected 1-4 values, got {}", other.len()),
                })
            }
        };
        Ok(Self {
            top: ResolvedValue::parse_with(top.clone(), Axis::Height, preferred)?,
            right: ResolvedValue::parse_with(right.clone(), Axis::Width, preferred)?,
            bottom: ResolvedValue::parse_with(bottom.clone(), Axis::Height, preferred)?,
            left: ResolvedValue::parse_with(left.clone(), Axis::Width, preferred)?,
        })
    }

    /// Iterate sides in top, right, bottom, left order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedValue> {
        [&self.top, &self.right, &self.bottom, &self.left].into_iter()
    }

    /// Iterate sides mutably in top, right, bottom, left order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ResolvedValue> {
        [&mut self.top, &mut self.right, &mut self.bottom, &mut self.left].into_iter()
    }

    /// Resolved pixels as `[top, right, bottom, left]`.
    pub fn pixels(&self) -> [f64; 4] {
        [self.top.pixels(), self.right.pixels(), self.bottom.pixels(), self.left.pixels()]
    }

    /// `left + right` in pixels.
    pub fn horizontal(&self) -> f64 {
        self.left.pixels() + self.right.pixels()
    }

    /// `top + bottom` in pixels.
    pub fn vertical(&self) -> f64 {
        self.top.pixels() + self.bottom.pixels()
    }
}

impl Default for Sides {
    fn default() -> Self {
        Self::zero()
    }
}
