//! Resolved values: a size or position in an author-facing unit that is
//! converted to pixels in two phases (parse, then seed).

use std::fmt;

use thiserror::Error;

use super::tokenizer::{coefficient, tokenize, Token};

/// Errors from value parsing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("invalid value {input:?}: {message}")]
    InvalidValue { input: String, message: String },
}

/// The unit a value was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Pixel,
    Percent,
    ViewportWidth,
    ViewportHeight,
    Auto,
}

/// Which reference magnitude a value needs before it can be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    /// Already absolute.
    None,
    /// The container's resolved width or height (see [`Axis`]).
    Parent,
    /// The viewport (or, for layers, the canvas) width or height.
    Viewport,
    /// The owning layer's own resolved size, e.g. percent corner radii.
    SelfSize,
    /// Intrinsic content measurement supplied by the layer kind.
    Auto,
}

/// The dimension a parent-relative value reads from its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

/// The raw input a value was built from: a literal number or a text token.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueInput {
    Number(f64),
    Token(String),
}

impl From<f64> for ValueInput {
    fn from(value: f64) -> Self {
        ValueInput::Number(value)
    }
}

impl From<f32> for ValueInput {
    fn from(value: f32) -> Self {
        ValueInput::Number(f64::from(value))
    }
}

impl From<i32> for ValueInput {
    fn from(value: i32) -> Self {
        ValueInput::Number(f64::from(value))
    }
}

impl From<&str> for ValueInput {
    fn from(value: &str) -> Self {
        ValueInput::Token(value.to_string())
    }
}

impl From<String> for ValueInput {
    fn from(value: String) -> Self {
        ValueInput::Token(value)
    }
}

impl fmt::Display for ValueInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueInput::Number(n) => write!(f, "{n}"),
            ValueInput::Token(token) => f.write_str(token),
        }
    }
}

/// One geometric quantity (width, x, a margin side, a corner radius...).
///
/// The unit and dependency class are derived once at construction. The pixel
/// value of a dependent quantity only exists after [`seed`](Self::seed) has
/// run in the current resolution pass; reassigning the owning property builds
/// a fresh value instead of mutating this one.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedValue {
    input: ValueInput,
    unit: Unit,
    dependency: Dependency,
    axis: Axis,
    magnitude: f64,
    resolved: Option<f64>,
}

impl ResolvedValue {
    /// Parse `input` for the given axis. Percentages depend on the parent.
    pub fn parse(input: impl Into<ValueInput>, axis: Axis) -> Result<Self, ValueError> {
        Self::parse_with(input, axis, Dependency::None)
    }

    /// Parse `input`, letting `preferred` override what a percentage depends
    /// on (radii use [`Dependency::SelfSize`]).
    pub fn parse_with(
        input: impl Into<ValueInput>,
        axis: Axis,
        preferred: Dependency,
    ) -> Result<Self, ValueError> {
        let input = input.into();
        let (unit, dependency, magnitude) = match &input {
            ValueInput::Number(n) => {
                if !n.is_finite() {
                    return Err(ValueError::InvalidValue {
                        input: input.to_string(),
                        message: "number is not finite".into(),
                    });
                }
                (Unit::Pixel, Dependency::None, *n)
            }
            ValueInput::Token(text) => parse_token(text, preferred)?,
        };
        let resolved = match dependency {
            Dependency::None => Some(magnitude),
            _ => None,
        };
        Ok(Self { input, unit, dependency, axis, magnitude, resolved })
    }

    /// An absolute pixel value.
    pub fn px(value: f64, axis: Axis) -> Self {
        Self {
            input: ValueInput::Number(value),
            unit: Unit::Pixel,
            dependency: Dependency::None,
            axis,
            magnitude: value,
            resolved: Some(value),
        }
    }

    /// Resolve against `reference`.
    ///
    /// Pixel and auto values take the argument as-is, which is how auto
    /// dimensions are back-filled with a measured content size. Relative
    /// units scale it by their coefficient.
    pub fn seed(&mut self, reference: f64) {
        let value = match self.unit {
            Unit::Pixel | Unit::Auto => reference,
            Unit::Percent | Unit::ViewportWidth | Unit::ViewportHeight => {
                reference * self.magnitude / 100.0
            }
        };
        self.resolved = Some(value);
    }

    /// Resolved pixels, or `None` if this value still waits on a seed.
    pub fn resolved(&self) -> Option<f64> {
        self.resolved
    }

    /// Resolved pixels, reading an unseeded value as zero.
    pub fn pixels(&self) -> f64 {
        self.resolved.unwrap_or(0.0)
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    pub fn input(&self) -> &ValueInput {
        &self.input
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn dependency(&self) -> Dependency {
        self.dependency
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The parsed coefficient before resolution (zero for `auto`).
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn is_auto(&self) -> bool {
        self.unit == Unit::Auto
    }
}

fn parse_token(text: &str, preferred: Dependency) -> Result<(Unit, Dependency, f64), ValueError> {
    let tokens = tokenize(text)?;
    let (token, slice) = match tokens.as_slice() {
        [single] => *single,
        [] => {
            return Err(ValueError::InvalidValue {
                input: text.to_string(),
                message: "empty value".into(),
            })
        }
        _ => {
            return Err(ValueError::InvalidValue {
                input: text.to_string(),
                message: format!("expected a single value, got {}", tokens.len()),
            })
        }
    };

    let parsed = match token {
        Token::Auto => (Unit::Auto, Dependency::Auto, 0.0),
        Token::Pixels | Token::Number => (Unit::Pixel, Dependency::None, coefficient(token, slice)?),
        Token::Percent => {
            let dependency = match preferred {
                Dependency::None => Dependency::Parent,
                other => other,
            };
            (Unit::Percent, dependency, coefficient(token, slice)?)
        }
        Token::ViewportWidth => (Unit::ViewportWidth, Dependency::Viewport, coefficient(token, slice)?),
        Token::ViewportHeight => (Unit::ViewportHeight, Dependency::Viewport, coefficient(token, slice)?),
    };
    Ok(parsed)
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::Auto => write!(f, "auto"),
            Unit::Pixel => write!(f, "{}px", self.magnitude),
            Unit::Percent => write!(f, "{}%", self.magnitude),
            Unit::ViewportWidth => write!(f, "{}vw", self.magnitude),
            Unit::ViewportHeight => write!(f, "{}vh", self.magnitude),
        }
    }
}
