mod app_state;
pub mod events;
mod formatter;
mod orchestrator;
mod scroll;

pub use app_state::*;
pub use formatter::*;
pub use orchestrator::*;
pub use scroll::*;
