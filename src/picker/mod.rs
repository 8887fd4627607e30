//! Accent picker: headless model and the on-screen popup that drives it

mod model;
mod popup;

pub use model::{PickerEvent, PickerModel};
pub use popup::Popup;
