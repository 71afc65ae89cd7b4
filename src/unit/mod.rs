//! Resolved-value engine: size tokens, two-phase resolution, four-sided values.

pub mod sides;
pub mod tokenizer;
pub mod value;

pub use sides::{Sides, SidesInput};
pub use value::{Axis, Dependency, ResolvedValue, Unit, ValueError, ValueInput};
