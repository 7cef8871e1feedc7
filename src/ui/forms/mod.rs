//! Form rendering module
//!
//! - `field_renderer`: single inputs
//! - `document_form`: the multi-step document wizard

mod document_form;
mod field_renderer;

pub use document_form::draw_document_form;
