//! # Base types for finchess
//!
//! This is an auxiliary crate for `finchess`, which contains the primitive value
//! types and the board geometry tables the engine is built from.
//!
//! Normally you don't want to use this crate directly. Use `finchess` instead.

pub mod geometry;
pub mod types;
