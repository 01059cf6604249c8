//! Testing infrastructure for crunchtrace tests.
//!
//! - `script`: Fluent builder for occurrence scripts (what a host engine would deliver)
//! - `assertions`: Structural checks over recorded event sequences
//! - `fixtures`: Temporary session directories and canned traces

pub mod assertions;
pub mod fixtures;
pub mod script;

pub use fixtures::SessionFixture;
pub use script::ScriptBuilder;
