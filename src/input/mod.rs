//! Global keyboard input: the event tap and XTEST synthesis

pub mod decode;
pub mod synth;
pub mod tap;

pub use synth::KeySynth;
pub use tap::EventTap;
