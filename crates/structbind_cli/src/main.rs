#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "structbind", about = "Map JSON objects through schema-described structs")]
struct Cli {
	/// Log debug events.
	#[arg(long, short, global = true, conflicts_with = "quiet")]
	verbose: bool,
	/// Log errors only.
	#[arg(long, short, global = true)]
	quiet: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Summarize a schema file or one of its types.
	Schema(cmd::schema::Args),
	/// Merge input into a record and print its mapping as JSON.
	Map(cmd::map::Args),
	/// Print the display string of a record.
	Show(cmd::show::Args),
	/// Invoke a dynamic `get<Field>` / `set<Field>` accessor.
	Call(cmd::call::Args),
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.quiet, cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run(command: Commands) -> structbind::bind::Result<()> {
	match command {
		Commands::Schema(args) => cmd::schema::run(args),
		Commands::Map(args) => cmd::map::run(args),
		Commands::Show(args) => cmd::show::run(args),
		Commands::Call(args) => cmd::call::run(args),
	}
}

fn init_tracing(quiet: bool, verbose: bool) {
	let level = if quiet {
		"error"
	} else if verbose {
		"debug"
	} else {
		"warn"
	};

	let filter = EnvFilter::try_from_env("STRUCTBIND_LOG").unwrap_or_else(|_| EnvFilter::new(level));

	if let Err(err) = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init() {
		eprintln!("warning: tracing disabled: {err}");
	}
}
