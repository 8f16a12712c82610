mod message;
mod room;

pub use message::*;
pub use room::*;
