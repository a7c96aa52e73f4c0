pub use cell::*;
pub use column_path::*;
pub use editor::*;
pub use errors::*;
pub use game::*;
pub use graph::*;
pub use snapshot::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod cell;
mod column_path;
mod editor;
mod errors;
mod game;
mod graph;
mod snapshot;
mod visualization;
