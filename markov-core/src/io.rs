use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Streams the file through a buffered reader
/// - Splits on `\n` / `\r\n`, the terminators are not kept
pub fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let file = File::open(filename)?;
	read_lines(BufReader::new(file))
}

/// Reads every line of an already opened source.
///
/// Useful when the corpus does not come from disk (stdin, in-memory buffers).
pub fn read_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
	reader.lines().collect()
}
