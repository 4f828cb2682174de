use std::path::PathBuf;

use clap::Parser;
use log::info;
use markov_core::io::read_file;
use markov_core::model::chain_model::ChainModel;
use markov_core::model::generator::Generator;
use markov_core::model::stats::Stats;
use markov_core::model::tokenizer::tokenize;
use markov_core::{MarkovConfig, MarkovError};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate Markov poems from a text corpus", long_about = None)]
struct Args {
	/// Corpus file, overrides `input_source` from the configuration
	#[arg(value_name = "PATH")]
	input: Option<PathBuf>,

	#[arg(short, long, value_name = "PATH", help = "TOML or JSON configuration file")]
	config: Option<PathBuf>,

	#[arg(short = 'k', long, help = "Order of the chain (>= 2)")]
	chain_length: Option<usize>,

	#[arg(short = 'n', long, help = "Number of lines to generate")]
	line_count: Option<usize>,

	#[arg(short, long, help = "Seed for reproducible output")]
	seed: Option<u64>,

	#[arg(long, help = "Dead-end restarts allowed per word before giving up")]
	max_restarts: Option<usize>,

	#[arg(long, help = "Print chain statistics after the text")]
	stats: bool,

	#[arg(long, requires = "stats", help = "Print the statistics as JSON")]
	json: bool,

	#[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v info, -vv debug)")]
	verbose: u8,
}

impl Args {
	/// Loads the configuration file (if any) and applies command line overrides.
	fn resolve_config(&self) -> Result<MarkovConfig, MarkovError> {
		let mut config = match &self.config {
			Some(path) => MarkovConfig::from_path(path)?,
			None => MarkovConfig::default(),
		};
		if let Some(input) = &self.input {
			config.input_source = input.clone();
		}
		if let Some(chain_length) = self.chain_length {
			config.chain_length = chain_length;
		}
		if let Some(line_count) = self.line_count {
			config.line_count = line_count;
		}
		if let Some(max_restarts) = self.max_restarts {
			config.max_restarts = max_restarts;
		}
		if self.seed.is_some() {
			config.random_seed = self.seed;
		}
		config.validate()?;
		Ok(config)
	}
}

fn main() {
	let args = Args::parse();

	let level = match args.verbose {
		0 => "warn",
		1 => "info",
		_ => "debug",
	};
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

	if let Err(err) = run(&args) {
		eprintln!("markov failed: {}", err);
		std::process::exit(1);
	}
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
	info!("Starting Markov");
	let config = args.resolve_config()?;

	// Read words from the corpus, lines with less than two words are skipped
	let tokens = tokenize(read_file(&config.input_source)?);
	let model = ChainModel::build(&tokens, config.chain_length)?;
	let generator = Generator::new(&tokens, &model, config.max_restarts)?;

	// Seeded runs are reproducible, otherwise use the thread-local generator
	let text = match config.random_seed {
		Some(seed) => generator.generate(&mut StdRng::seed_from_u64(seed), config.line_count)?,
		None => generator.generate(&mut rand::rng(), config.line_count)?,
	};

	let banner = "*".repeat(40);
	println!("{}", banner);
	println!("Generated Text");
	println!("{}", banner);
	println!("{}", text);

	if args.stats {
		let stats = Stats::summarize(&model)?;
		if args.json {
			println!("{}", serde_json::to_string_pretty(&stats)?);
		} else {
			println!("{}", stats);
		}
	}

	info!("Finished Markov");
	Ok(())
}
