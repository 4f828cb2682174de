use log::{debug, info};
use rand::Rng;

use crate::error::MarkovError;
use crate::model::chain_model::ChainModel;
use crate::model::tokenizer::is_line_end;

/// Walks a `ChainModel` to produce poem-like text.
///
/// # Responsibilities
/// - Pick random start windows from the training sequence
/// - Sample successors and slide the context window
/// - Restart from a fresh random window on dead ends
/// - Stop once the requested number of lines is complete
///
/// Generation counts lines rather than words, so the output follows the
/// line breaks of the corpus instead of being cut mid-line.
#[derive(Debug)]
pub struct Generator<'a> {
	tokens: &'a [String],
	model: &'a ChainModel,
	max_restarts: usize,
}

impl<'a> Generator<'a> {
	/// Creates a generator over a training sequence and the chain built from it.
	///
	/// # Parameters
	/// - `tokens`: the sequence the model was built from, used to pick start windows.
	/// - `model`: the chain to walk.
	/// - `max_restarts`: number of consecutive dead-end restarts allowed for a
	///   single step before giving up with `ModelExhausted`.
	///
	/// # Errors
	/// - `EmptyModel` if the chain has no context (every lookup would miss)
	/// - `EmptyCorpus` if `tokens` is shorter than the chain order
	/// - `Config` if `max_restarts` is zero (a dead end must always be recoverable)
	pub fn new(tokens: &'a [String], model: &'a ChainModel, max_restarts: usize) -> Result<Self, MarkovError> {
		if model.is_empty() {
			return Err(MarkovError::EmptyModel);
		}
		if tokens.len() < model.order() {
			return Err(MarkovError::EmptyCorpus { tokens: tokens.len(), order: model.order() });
		}
		if max_restarts == 0 {
			return Err(MarkovError::Config("max_restarts must be >= 1".to_owned()));
		}
		Ok(Self { tokens, model, max_restarts })
	}

	/// Number of words in a context window.
	fn width(&self) -> usize {
		self.model.order() - 1
	}

	/// Returns a uniformly random start offset in `[0, len - order]`.
	///
	/// Every such offset is followed by at least one word, so its window
	/// is a known context when the model was built from `tokens`.
	pub fn random_start<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
		rng.random_range(0..=self.tokens.len() - self.model.order())
	}

	fn window_at(&self, start: usize) -> Vec<String> {
		self.tokens[start..start + self.width()].to_vec()
	}

	/// Generates `target_lines` lines starting from a random window.
	///
	/// See `generate_from`.
	pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, target_lines: usize) -> Result<String, MarkovError> {
		let start = self.random_start(rng);
		self.generate_from(rng, start, target_lines)
	}

	/// Generates `target_lines` lines starting from the window at `start`.
	///
	/// # Parameters
	/// - `rng`: randomness provider, seed it for reproducible output.
	/// - `start`: offset of the first window; any offset with
	///   `start + order - 1 <= len` is accepted, including the terminal
	///   window which has no successor.
	/// - `target_lines`: number of line breaks in the output.
	///
	/// # Returns
	/// The generated words joined with single spaces. For `target_lines >= 1`
	/// the output holds exactly `target_lines` line breaks and ends with one.
	/// For `target_lines == 0` the output is the start window itself.
	///
	/// # Behavior
	/// - Each step emits the oldest word of the window, samples a successor
	///   for the window and slides it.
	/// - On a dead end the window is replaced by a random start window and
	///   the lookup is retried, nothing is emitted during retries.
	/// - Lines are counted on the words committed to the output: the words
	///   already emitted plus the pending window.
	/// - Once enough lines are committed the pending window is flushed.
	///
	/// # Errors
	/// - `StartOutOfRange` if the window at `start` does not fit in `tokens`
	/// - `ModelExhausted` if a step hits `max_restarts` consecutive dead ends
	pub fn generate_from<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		start: usize,
		target_lines: usize,
	) -> Result<String, MarkovError> {
		if start.checked_add(self.width()).is_none_or(|end| end > self.tokens.len()) {
			return Err(MarkovError::StartOutOfRange {
				start,
				tokens: self.tokens.len(),
				order: self.model.order(),
			});
		}
		info!("Generating {} line(s) from offset {}", target_lines, start);

		let mut window = self.window_at(start);
		let mut generated: Vec<String> = Vec::new();
		let mut emitted_lines = 0;

		while emitted_lines + count_lines(&window) < target_lines {
			debug!("Current line: {}, window: {:?}", emitted_lines, window);

			let head = window[0].clone();
			if is_line_end(&head) {
				emitted_lines += 1;
			}
			generated.push(head);

			let next = self.next_token(rng, &mut window)?;
			window.remove(0);
			window.push(next);
		}

		generated.extend(window);
		if target_lines > 0 {
			let last_break = generated
				.iter()
				.enumerate()
				.filter(|(_, token)| is_line_end(token))
				.nth(target_lines - 1)
				.map(|(i, _)| i);
			if let Some(i) = last_break {
				generated.truncate(i + 1);
			}
		}

		info!("Generated {} word(s)", generated.len());
		Ok(generated.join(" "))
	}

	/// Samples the word following `window`.
	///
	/// A dead end replaces `window` with a random start window and retries.
	fn next_token<R: Rng + ?Sized>(&self, rng: &mut R, window: &mut Vec<String>) -> Result<String, MarkovError> {
		let mut attempts = 0;
		loop {
			if let Some(next) = self.model.sample(window, rng) {
				return Ok(next.to_owned());
			}
			if attempts >= self.max_restarts {
				return Err(MarkovError::ModelExhausted { attempts });
			}
			attempts += 1;
			debug!("Dead end with: {:?}, restarting", window);
			*window = self.window_at(self.random_start(rng));
		}
	}
}

fn count_lines(window: &[String]) -> usize {
	window.iter().filter(|token| is_line_end(token)).count()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::tokenizer::tokenize;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	const SONNET: [&str; 6] = [
		"Shall I compare thee to a summer's day?",
		"Thou art more lovely and more temperate:",
		"Rough winds do shake the darling buds of May,",
		"And summer's lease hath all too short a date:",
		"Sometime too hot the eye of heaven shines,",
		"And often is his gold complexion dimm'd;",
	];

	fn example_tokens() -> Vec<String> {
		tokenize(["the cat sat", "the dog ran"])
	}

	fn line_breaks(text: &str) -> usize {
		text.split(' ').filter(|token| is_line_end(token)).count()
	}

	#[test]
	fn generates_the_documented_example() {
		let tokens = example_tokens();
		let model = ChainModel::build(&tokens, 3).unwrap();
		let generator = Generator::new(&tokens, &model, 10).unwrap();

		for seed in 0..5 {
			let mut rng = StdRng::seed_from_u64(seed);
			assert_eq!(generator.generate_from(&mut rng, 0, 1).unwrap(), "the cat sat\n");
		}
	}

	#[test]
	fn output_has_exactly_the_requested_lines() {
		let tokens = tokenize(SONNET);
		for order in 2..=4 {
			let model = ChainModel::build(&tokens, order).unwrap();
			let generator = Generator::new(&tokens, &model, 100).unwrap();
			for seed in 0..20 {
				let mut rng = StdRng::seed_from_u64(seed);
				for lines in 1..=8 {
					let text = generator.generate(&mut rng, lines).unwrap();
					assert_eq!(line_breaks(&text), lines, "order {} seed {}: {:?}", order, seed, text);
					assert!(text.ends_with('\n'));
				}
			}
		}
	}

	#[test]
	fn same_seed_gives_same_text() {
		let tokens = tokenize(SONNET);
		let model = ChainModel::build(&tokens, 3).unwrap();
		let generator = Generator::new(&tokens, &model, 100).unwrap();

		let first = generator.generate(&mut StdRng::seed_from_u64(42), 13).unwrap();
		let second = generator.generate(&mut StdRng::seed_from_u64(42), 13).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn terminal_window_restarts_instead_of_looping() {
		let tokens = example_tokens();
		let model = ChainModel::build(&tokens, 3).unwrap();
		let generator = Generator::new(&tokens, &model, 10).unwrap();
		// "dog ran\n" is the last window, it has no successor
		let terminal = tokens.len() - 2;

		let mut rng = StdRng::seed_from_u64(9);
		let text = generator.generate_from(&mut rng, terminal, 3).unwrap();
		assert!(text.starts_with("dog "));
		assert_eq!(line_breaks(&text), 3);
	}

	#[test]
	fn zero_lines_still_outputs_the_start_window() {
		let tokens = example_tokens();
		let model = ChainModel::build(&tokens, 3).unwrap();
		let generator = Generator::new(&tokens, &model, 10).unwrap();

		let mut rng = StdRng::seed_from_u64(1);
		assert_eq!(generator.generate_from(&mut rng, 0, 0).unwrap(), "the cat");
		assert!(!generator.generate(&mut rng, 0).unwrap().is_empty());
	}

	#[test]
	fn start_past_the_last_window_is_rejected() {
		let tokens = example_tokens();
		let model = ChainModel::build(&tokens, 3).unwrap();
		let generator = Generator::new(&tokens, &model, 10).unwrap();

		let mut rng = StdRng::seed_from_u64(1);
		let err = generator.generate_from(&mut rng, tokens.len() - 1, 1).unwrap_err();
		assert!(matches!(err, MarkovError::StartOutOfRange { start: 5, tokens: 6, order: 3 }));
	}

	#[test]
	fn huge_start_offset_is_rejected() {
		let tokens = example_tokens();
		let model = ChainModel::build(&tokens, 3).unwrap();
		let generator = Generator::new(&tokens, &model, 10).unwrap();

		let mut rng = StdRng::seed_from_u64(1);
		let err = generator.generate_from(&mut rng, usize::MAX, 1).unwrap_err();
		assert!(matches!(err, MarkovError::StartOutOfRange { start: usize::MAX, tokens: 6, order: 3 }));
	}

	#[test]
	fn zero_restarts_is_rejected() {
		let tokens = example_tokens();
		let model = ChainModel::build(&tokens, 3).unwrap();
		assert!(matches!(Generator::new(&tokens, &model, 0), Err(MarkovError::Config(_))));
	}

	#[test]
	fn single_restart_recovers_from_the_terminal_window() {
		let tokens = example_tokens();
		let model = ChainModel::build(&tokens, 3).unwrap();
		let generator = Generator::new(&tokens, &model, 1).unwrap();

		for seed in 0..10 {
			let mut rng = StdRng::seed_from_u64(seed);
			let text = generator.generate_from(&mut rng, tokens.len() - 2, 3).unwrap();
			assert_eq!(line_breaks(&text), 3);
		}
	}

	#[test]
	fn unrelated_model_is_exhausted() {
		let tokens = example_tokens();
		let other: Vec<String> = ["x", "y", "z"].iter().map(|s| s.to_string()).collect();
		let model = ChainModel::build(&other, 3).unwrap();
		let generator = Generator::new(&tokens, &model, 5).unwrap();

		let mut rng = StdRng::seed_from_u64(1);
		let err = generator.generate(&mut rng, 3).unwrap_err();
		assert!(matches!(err, MarkovError::ModelExhausted { attempts: 5 }));
	}

	#[test]
	fn corpus_shorter_than_order_is_rejected() {
		let tokens = example_tokens();
		let model = ChainModel::build(&tokens, 3).unwrap();
		let short = tokens[..2].to_vec();
		assert!(matches!(Generator::new(&short, &model, 10), Err(MarkovError::EmptyCorpus { tokens: 2, order: 3 })));
	}
}
