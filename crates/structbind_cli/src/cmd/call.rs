use structbind::bind::{JsonOptions, Result, Value, call, to_json};

use crate::cmd::util::{InstanceArgs, emit_json, load_instance};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub instance: InstanceArgs,
	/// Accessor name, e.g. `getUserName` or `setUserName`.
	pub method: String,
	/// Accessor arguments, each one JSON value. Put negative numbers after `--`.
	pub args: Vec<String>,
	/// Also print the record mapping after the call.
	#[arg(long)]
	pub dump: bool,
}

/// Invoke a dynamic accessor on the merged record and print its result.
pub fn run(args: Args) -> Result<()> {
	let Args {
		instance,
		method,
		args,
		dump,
	} = args;

	let mut record = load_instance(&instance)?;
	let values = args
		.iter()
		.map(|text| serde_json::from_str::<serde_json::Value>(text).map(Value::from))
		.collect::<std::result::Result<Vec<_>, _>>()?;

	let result = call(&mut record, &method, values)?;
	tracing::debug!(%method, "accessor returned");
	emit_json(&result.unwrap_or(Value::Null), &JsonOptions::default())?;

	if dump {
		println!("{}", to_json(&record, &JsonOptions::default())?);
	}
	Ok(())
}
