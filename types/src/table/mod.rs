mod constants;
mod error;
mod event;
mod round;

pub use constants::*;
pub use error::*;
pub use event::*;
pub use round::*;
