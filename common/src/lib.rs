//! Shared model for the staff registration form.
//!
//! Everything in this crate is plain Rust so it compiles both for the Yew
//! frontend (`wasm32`) and for the actix backend, which re-validates posted
//! records with the very same rule table.

pub mod form;
pub mod image;
pub mod model;
pub mod submission;
pub mod validation;
pub mod wards;
