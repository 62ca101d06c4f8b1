//! UI module - the advisor's text and the interactive terminal session

pub mod report;
pub mod session;

pub use session::{Session, SessionEnd};
