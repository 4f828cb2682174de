//! Word-level Markov chain text generation library.
//!
//! This crate provides an order-k Markov chain system including:
//! - Corpus tokenization that keeps line breaks as token markers
//! - Chain construction from overlapping word windows
//! - Line-counted generation with dead-end restarts
//! - Descriptive statistics over the built chain
//!
//! Randomness is always supplied by the caller so that runs can be
//! reproduced with a seeded generator.

/// Chain model, tokenizer, generator and statistics.
pub mod model;

/// Typed failures shared by every operation of the crate.
pub mod error;

/// Configuration surface (order, line count, input, seed).
pub mod config;

/// I/O utilities (corpus loading).
pub mod io;

pub use config::MarkovConfig;
pub use error::MarkovError;
