use thiserror::Error;

/// Every failure the chain, generator and statistics can surface.
///
/// All of them are precondition failures detected before a loop starts,
/// except `ModelExhausted` which reports a bounded restart loop giving up.
#[derive(Debug, Error)]
pub enum MarkovError {
	#[error("corpus has {tokens} token(s), at least {order} are needed for a chain of order {order}")]
	EmptyCorpus { tokens: usize, order: usize },

	#[error("chain order must be >= 2, got {0}")]
	InvalidOrder(usize),

	#[error("no successor found after {attempts} restart(s)")]
	ModelExhausted { attempts: usize },

	/// Guard for callers holding an empty chain. `ChainModel::build` never
	/// returns one (it fails with `EmptyCorpus` first), so this is only a
	/// precondition check in `Generator::new` and `Stats::summarize`.
	#[error("chain model has no context")]
	EmptyModel,

	#[error("start offset {start} is out of range for {tokens} token(s) with order {order}")]
	StartOutOfRange { start: usize, tokens: usize, order: usize },

	#[error("invalid configuration: {0}")]
	Config(String),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}
