/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # Fixscan Core
//!
//! Core types for the fixscan FIX log reader.
//!
//! This crate provides the fundamental building blocks used across all fixscan crates:
//! - **Hot-tag catalog**: the 19 tags promoted to dedicated typed columns
//! - **Parsed message**: zero-copy view of one tokenized log line
//! - **Error types**: structural parse errors with stable, user-visible wording
//!
//! ## Zero-Copy Design
//!
//! A [`ParsedMessage`] borrows every value from the line buffer it was tokenized
//! from. Hot values live in fixed slots, the rest in an overflow map, and every
//! tag additionally appears in an ordered sequence that preserves wire order.
//! Repeating groups are positional, so the order must survive tokenization.

pub mod error;
pub mod hot;
pub mod message;

pub use error::StructuralError;
pub use hot::{HotSlot, HOT_TAGS, NUM_HOT_TAGS};
pub use message::{ParsedMessage, TagRef};
