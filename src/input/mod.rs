//! Editor input: tool modes, pointer/toolbar/keyboard events and scripts.

pub mod events;
pub mod script;
pub mod tool;

pub use events::{PointerEvent, TextInput, ToolbarCommand};
pub use script::{Script, Step};
pub use tool::ToolMode;
