//! # Base types for checkmatch
//!
//! This is an auxiliary crate for `checkmatch` with the plain value types of the board:
//! coordinates, colors, piece kinds and square masks. None of them know anything about chess rules.
//!
//! Normally you don't want to use this crate directly. Use `checkmatch` instead, which re-exports
//! everything declared here.

pub mod geometry;
pub mod mask;
pub mod types;
