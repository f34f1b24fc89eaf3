//! Form rendering module
//!
//! - `field_renderer`: a labelled input with its error line
//! - `auth_form`: the sign-in / sign-up screen

mod auth_form;
mod field_renderer;

pub use auth_form::draw as draw_auth_form;
