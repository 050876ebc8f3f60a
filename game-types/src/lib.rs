pub mod canvas;
pub mod chat;
pub mod game;
pub mod messages;
pub mod player;

// Re-export all types
pub use canvas::*;
pub use chat::*;
pub use game::*;
pub use messages::*;
pub use player::*;
