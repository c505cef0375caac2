//! Password generation and strength scoring.

pub mod generator;
pub mod strength;

pub use generator::{generate_password, GeneratorOptions, DEFAULT_LENGTH};
pub use strength::{calculate_password_strength, strength_color, strength_label, Strength};
