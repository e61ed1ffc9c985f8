//! Constants used throughout the Identra library.
//!
//! This module provides central definitions for the logical collection names
//! the account manager persists into. The manager holds no other fixed state.

/// Collection name for user account records.
pub const USER: &str = "user";

/// Collection name for authentication key records.
pub const KEY: &str = "key";

/// Collection name for open (external provider) profile records.
pub const OPROFILE: &str = "oprofile";

/// All collections the account manager requires a store to support.
pub const ALL_COLLECTIONS: &[&str] = &[USER, KEY, OPROFILE];
