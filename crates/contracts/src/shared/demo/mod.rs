//! Demo scaffolding that lives outside the navigation engine.

mod rotation;

pub use rotation::PersonaRotation;
