//! X11 plumbing: session state, keyboard mapping, window queries and selections

mod context;
mod keymap;
pub mod keysym;
mod ops;
mod query;
pub mod selection;

pub use context::{CachedAtoms, X11Session, intern, sync};
pub use keymap::Keymap;
pub use ops::*;
pub use query::*;
