mod backend;
mod display;
mod error;
mod event;
mod loading;
mod request;
mod response;
mod textarea;

pub use backend::*;
pub use display::*;
pub use error::*;
pub use event::*;
pub use loading::*;
pub use request::*;
pub use response::*;
pub use textarea::*;
