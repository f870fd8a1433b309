//! Character classification and case utilities shared by the fsaspell crates.
//!
//! - [`character`] -- simple one-to-one case mapping and character classes
//! - [`case`] -- word-level case detection and conversion

pub mod case;
pub mod character;
