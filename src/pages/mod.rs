//! Page objects: intention-revealing actions over the two demo applications.

mod sauce;
mod todo;

pub use sauce::SaucePage;
pub use todo::TodoPage;
