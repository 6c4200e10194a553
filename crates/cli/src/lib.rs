//! Client-side state for the docsys CLI.

pub mod session;

pub use session::{Session, SessionFile};
