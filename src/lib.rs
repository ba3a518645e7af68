pub mod field;
pub mod host;
pub mod terminal;
pub mod ui;
pub mod widget;

pub use field::layout::{Cell, FieldLayout};
pub use field::time::{HourMode, TimeValue};
pub use field::validate::ValidationError;
pub use field::{SpinDirection, TimeField};
pub use host::{HostBinding, TextHost};
pub use widget::{FieldAction, InteractionResult};
