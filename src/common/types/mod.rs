//! Domain types for type safety and clarity

pub mod key;

pub use key::KeyEvent;
