use std::collections::HashMap;

use log::{Level, info, log_enabled, trace};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::MarkovError;

/// Word-level Markov chain of a fixed order.
///
/// The `ChainModel` maps every context of `order - 1` consecutive words to
/// the list of words observed right after it in the corpus.
///
/// # Responsibilities
/// - Build the chain from a word sequence by sliding a window of `order` words
/// - Give access to the successors of a context
/// - Sample a successor uniformly from the recorded list
///
/// # Invariants
/// - `order` is always >= 2
/// - Every key holds exactly `order - 1` words
/// - No successor list is empty
/// - Duplicates are kept: a word seen twice after a context is twice as likely
#[derive(Clone, Debug)]
pub struct ChainModel {
	/// Window width (context words + the successor).
	order: usize,

	/// Context (length order-1) to successors, in order of occurrence.
	/// Example: { ["the", "cat"] => ["sat\n", "ran", "sat\n"] }
	transitions: HashMap<Vec<String>, Vec<String>>,
}

impl ChainModel {
	/// Builds the chain of order `order` from a word sequence.
	///
	/// Every window `tokens[i..i + order]`, for `i` in `0..=len - order`,
	/// records `tokens[i + order - 1]` as a successor of `tokens[i..i + order - 1]`.
	///
	/// # Errors
	/// - `InvalidOrder` if `order < 2`
	/// - `EmptyCorpus` if `tokens` holds fewer than `order` words
	pub fn build<S: AsRef<str>>(tokens: &[S], order: usize) -> Result<Self, MarkovError> {
		if order < 2 {
			return Err(MarkovError::InvalidOrder(order));
		}
		if tokens.len() < order {
			return Err(MarkovError::EmptyCorpus { tokens: tokens.len(), order });
		}

		let mut transitions: HashMap<Vec<String>, Vec<String>> = HashMap::new();
		for window in tokens.windows(order) {
			let (context, next) = window.split_at(order - 1);
			let key: Vec<String> = context.iter().map(|t| t.as_ref().to_owned()).collect();
			transitions.entry(key).or_default().push(next[0].as_ref().to_owned());
		}

		let model = Self { order, transitions };
		info!("Built chain of order {} with {} context(s) from {} token(s)", order, model.len(), tokens.len());
		if log_enabled!(Level::Trace) {
			for (context, successors) in model.iter() {
				trace!("{:?} : {:?}", context, successors);
			}
		}
		Ok(model)
	}

	/// Returns the order of the chain.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Returns the number of distinct contexts.
	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	/// Returns `true` if the chain has no context.
	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Returns the recorded successors of `context`, or `None` for a dead end.
	pub fn successors(&self, context: &[String]) -> Option<&[String]> {
		self.transitions.get(context).map(Vec::as_slice)
	}

	/// Picks one successor of `context` uniformly from its list.
	///
	/// Because duplicates are kept, frequent continuations are picked
	/// proportionally more often.
	///
	/// Returns `None` if the context is unknown.
	pub fn sample<R: Rng + ?Sized>(&self, context: &[String], rng: &mut R) -> Option<&str> {
		self.successors(context)?.choose(rng).map(String::as_str)
	}

	/// Iterates over every `(context, successors)` pair, in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = (&[String], &[String])> {
		self.transitions.iter().map(|(k, v)| (k.as_slice(), v.as_slice()))
	}
}
