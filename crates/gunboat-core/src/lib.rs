//! Core types and definitions for the gunboat arena.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry helpers, resource caches, radar contacts, ECS components,
//! commands, events, snapshot views, statistics and constants.
//! It has no dependency on the ECS or on any random source.

pub mod commands;
pub mod components;
pub mod constants;
pub mod contact;
pub mod enums;
pub mod error;
pub mod events;
pub mod math;
pub mod resource;
pub mod state;
pub mod stats;
pub mod types;

pub use glam::DVec2;
