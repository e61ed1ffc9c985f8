//! Identity record types and the factory that builds them.
//!
//! Records are flat documents: the only relationships between them are
//! foreign-key style `user_id` references, resolved by the store at query
//! time. The factory is pure: it fills in generated identifiers and
//! clock-sourced timestamps but performs no I/O and cannot fail.

mod factory;
mod types;

pub use factory::{KeyOptions, OProfileOptions, RecordFactory, UserOptions};
pub use types::{Key, KeyLevel, OProfile, RecordKind, User};
