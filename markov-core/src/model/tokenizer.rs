/// Marker appended to the last word of every kept line.
pub const LINE_BREAK: char = '\n';

/// Turns corpus lines into an ordered word sequence.
///
/// # Behavior
/// - Splits each line on whitespace.
/// - Skips lines with fewer than two words (blank or single-word lines).
/// - Appends `LINE_BREAK` to the last word of every kept line.
///
/// An empty input yields an empty sequence.
pub fn tokenize<I, S>(lines: I) -> Vec<String>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut tokens = Vec::new();
	for line in lines {
		let mut words: Vec<String> = line.as_ref().split_whitespace().map(str::to_owned).collect();
		if words.len() < 2 {
			continue;
		}
		if let Some(last) = words.last_mut() {
			last.push(LINE_BREAK);
		}
		tokens.extend(words);
	}
	tokens
}

/// Returns `true` if the token closes a line.
pub fn is_line_end(token: &str) -> bool {
	token.ends_with(LINE_BREAK)
}
