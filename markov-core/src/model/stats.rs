use std::fmt;

use serde::Serialize;

use crate::error::MarkovError;
use crate::model::chain_model::ChainModel;

/// Descriptive statistics of a chain's branching factors.
///
/// The branching factor of a context is the length of its successor list.
/// These numbers are diagnostic only and never influence generation.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Stats {
	/// Number of distinct contexts.
	pub key_count: usize,
	pub mean_branching: f64,
	pub min_branching: usize,
	pub max_branching: usize,
	/// Sum over contexts of `(branching - mean)^2`.
	pub sum_of_squared_deviations: f64,
	/// Population standard deviation of the branching factors.
	pub std_deviation: f64,
}

impl Stats {
	/// Computes the statistics of `model`.
	///
	/// # Errors
	/// Returns `EmptyModel` if the chain has no context.
	pub fn summarize(model: &ChainModel) -> Result<Self, MarkovError> {
		let key_count = model.len();
		if key_count == 0 {
			return Err(MarkovError::EmptyModel);
		}

		let mut min_branching = usize::MAX;
		let mut max_branching = 0;
		let mut total = 0;
		for (_, successors) in model.iter() {
			let branching = successors.len();
			total += branching;
			min_branching = min_branching.min(branching);
			max_branching = max_branching.max(branching);
		}
		let mean_branching = total as f64 / key_count as f64;

		let sum_of_squared_deviations: f64 = model
			.iter()
			.map(|(_, successors)| (successors.len() as f64 - mean_branching).powi(2))
			.sum();

		Ok(Self {
			key_count,
			mean_branching,
			min_branching,
			max_branching,
			sum_of_squared_deviations,
			std_deviation: (sum_of_squared_deviations / key_count as f64).sqrt(),
		})
	}
}

impl fmt::Display for Stats {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "Number of key tuples: {}", self.key_count)?;
		writeln!(f, "Mean Choices:         {:.6}", self.mean_branching)?;
		writeln!(f, "Min Choices:          {}", self.min_branching)?;
		writeln!(f, "Max Choices:          {}", self.max_branching)?;
		writeln!(f, "Sum of Squares:       {:.6}", self.sum_of_squared_deviations)?;
		write!(f, "Standard Deviation:   {:.6}", self.std_deviation)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::tokenizer::tokenize;
	use approx::assert_relative_eq;

	#[test]
	fn documented_example_has_no_spread() {
		let tokens = tokenize(["the cat sat", "the dog ran"]);
		let model = ChainModel::build(&tokens, 3).unwrap();
		let stats = Stats::summarize(&model).unwrap();

		assert_eq!(stats.key_count, 4);
		assert_eq!(stats.min_branching, 1);
		assert_eq!(stats.max_branching, 1);
		assert_relative_eq!(stats.mean_branching, 1.0);
		assert_relative_eq!(stats.sum_of_squared_deviations, 0.0);
		assert_relative_eq!(stats.std_deviation, 0.0);
	}

	#[test]
	fn uneven_branching() {
		// a -> [b, c, d], b -> [a], c -> [a]
		let model = ChainModel::build(&["a", "b", "a", "c", "a", "d"], 2).unwrap();
		let stats = Stats::summarize(&model).unwrap();

		assert_eq!(stats.key_count, 3);
		assert_eq!(stats.min_branching, 1);
		assert_eq!(stats.max_branching, 3);
		assert_relative_eq!(stats.mean_branching, 5.0 / 3.0);
		// (3 - 5/3)^2 + 2 * (1 - 5/3)^2 = 16/9 + 8/9
		assert_relative_eq!(stats.sum_of_squared_deviations, 24.0 / 9.0, epsilon = 1e-12);
		assert_relative_eq!(stats.std_deviation, (24.0_f64 / 27.0).sqrt(), epsilon = 1e-12);
	}

	#[test]
	fn report_labels_every_field() {
		let model = ChainModel::build(&["a", "b", "c"], 2).unwrap();
		let report = Stats::summarize(&model).unwrap().to_string();

		assert!(report.starts_with("Number of key tuples: 2\n"));
		assert!(report.contains("Mean Choices:         1.000000"));
		assert!(report.ends_with("Standard Deviation:   0.000000"));
		assert_eq!(report.lines().count(), 6);
	}
}
