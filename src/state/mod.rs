//! Application state module

mod app_state;
pub mod forms;
mod preview;
mod toast;

pub use app_state::*;
pub use preview::{PdfHandle, PdfStore};
pub use toast::ToastLevel;
