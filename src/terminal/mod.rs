pub mod backend;
pub mod input;

pub use backend::{CursorPos, Frame, Terminal, TerminalEvent, TerminalSize};
pub use input::{KeyCode, KeyEvent, KeyModifiers};
