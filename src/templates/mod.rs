//! Text templates for the generated files.
//!
//! Every generator is a pure function of its inputs; writing is left to
//! the caller.

pub mod compose;
pub mod dockerfile;
pub mod entrypoint;

pub use compose::{generate_compose, GeneratedCompose, PortAssignment};
pub use dockerfile::generate_dockerfile;
pub use entrypoint::generate_entrypoint;
