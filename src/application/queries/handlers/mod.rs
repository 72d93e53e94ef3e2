//! Query Handlers

mod tone_handlers;

pub use tone_handlers::*;
