//! Embassy async tasks
//!
//! Tasks only raise flags; task bodies run in the main dispatch loop.

pub mod buttons;
pub mod tick;

pub use buttons::button_task;
pub use tick::tick_task;
