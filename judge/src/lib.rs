mod config;
mod game;
mod recording;
pub use config::*;
pub use game::*;
pub use recording::*;
