pub mod drawer;
pub mod events;
pub mod guess;
pub mod lines;
pub mod registry;
pub mod session;
pub mod words;

// Re-export main components
pub use drawer::*;
pub use events::*;
pub use guess::*;
pub use lines::*;
pub use registry::*;
pub use session::*;
pub use words::*;
