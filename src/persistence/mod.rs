//! Persistence - saving and restoring a game between sessions

pub mod snapshot;

pub use snapshot::{discard, load, save, SaveFile};
