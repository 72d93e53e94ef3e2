//! Command Handlers

mod generate_voice_handlers;

pub use generate_voice_handlers::*;
