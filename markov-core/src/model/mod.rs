//! Top-level module for the Markov chain generation system.
//!
//! This module provides:
//! - Corpus tokenization (`tokenizer`)
//! - The fixed-order word chain (`ChainModel`)
//! - Line-counted text generation (`Generator`)
//! - Chain diagnostics (`Stats`)

/// Splits corpus lines into words, marking the last word of each line.
pub mod tokenizer;

/// Fixed-order word chain (`order >= 2`).
///
/// Maps every `(order - 1)`-word context to the words observed after it.
pub mod chain_model;

/// Walks a `ChainModel` to produce text, restarting on dead ends.
pub mod generator;

/// Branching statistics over a built chain.
pub mod stats;
