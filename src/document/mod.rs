//! Document types and their declared field schemas

pub mod catalog;
mod kind;
mod schema;

pub use kind::DocumentKind;
pub use schema::{DocumentSchema, FieldSpec, StepSpec};
