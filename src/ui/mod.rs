pub mod span;
pub mod style;

pub use span::{line_width, Span, SpanLine};
pub use style::{Color, Style};
