#![allow(missing_docs)]

use std::io::Write;
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use structbind_testkit::fixture_path;

fn schema_arg() -> String {
	fixture_path("account_schema.json").display().to_string()
}

fn input_arg() -> String {
	fixture_path("account.json").display().to_string()
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_structbind")).args(args).output().expect("command executes")
}

fn run_json(args: &[&str]) -> Value {
	let output = run(args);
	assert!(
		output.status.success(),
		"command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

#[test]
fn map_prints_wire_keys_in_declaration_order() {
	let schema = schema_arg();
	let input = input_arg();
	let json = run_json(&["map", &schema, "--type", "Account", "--input", &input]);

	let keys: Vec<&str> = json.as_object().expect("object").keys().map(String::as_str).collect();
	assert_eq!(keys, ["account_id", "user_name", "tier", "home_address", "balance", "tags", "active"]);
	assert_eq!(json["tier"], "PAID");
	assert_eq!(json["home_address"]["zip_code"], "H2X 1Y4");
	assert!(json.get("favorite_color").is_none(), "unresolved enum stays unset");
}

#[test]
fn map_declared_keys_and_escaping() {
	let schema = schema_arg();
	let input = input_arg();
	let output = run(&["map", &schema, "--type", "Account", "--input", &input, "--declared-keys", "--escape-unicode"]);
	assert!(output.status.success());

	let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
	assert!(stdout.is_ascii(), "escaped output is ascii: {stdout}");

	let json: Value = serde_json::from_str(&stdout).expect("valid json");
	assert_eq!(json["userName"], "Zoë Ångström");
	assert_eq!(json["homeAddress"]["zipCode"], "H2X 1Y4");
}

#[test]
fn map_reports_diagnostics_on_stderr() {
	let schema = schema_arg();
	let input = input_arg();
	let output = Command::new(env!("CARGO_BIN_EXE_structbind"))
		.args(["map", &schema, "--type", "Account", "--input", &input])
		.env_remove("STRUCTBIND_LOG")
		.output()
		.expect("command executes");
	assert!(output.status.success());

	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("WARN"), "{stderr}");
	assert!(stderr.contains("favorite_color: Color has no case matching PURPLE"), "{stderr}");
	assert!(stderr.contains("home_address.country: unknown key"), "{stderr}");
	assert!(stderr.contains("nickname: unknown key"), "{stderr}");
}

#[test]
fn quiet_silences_diagnostics() {
	let schema = schema_arg();
	let input = input_arg();
	let output = Command::new(env!("CARGO_BIN_EXE_structbind"))
		.args(["--quiet", "map", &schema, "--type", "Account", "--input", &input])
		.env_remove("STRUCTBIND_LOG")
		.output()
		.expect("command executes");

	assert!(output.status.success());
	assert!(output.stderr.is_empty(), "{}", String::from_utf8_lossy(&output.stderr));
	let json: Value = serde_json::from_slice(&output.stdout).expect("valid json");
	assert_eq!(json["account_id"], 42);
}

#[test]
fn pretty_and_escape_flags_are_documented() {
	let output = run(&["map", "--help"]);
	assert!(output.status.success());

	let help = String::from_utf8_lossy(&output.stdout);
	assert!(help.contains("Indent the JSON output"), "{help}");
	assert!(help.contains("non-ASCII characters"), "{help}");
}

#[test]
fn strict_mode_fails_on_diagnostics() {
	let schema = schema_arg();
	let input = input_arg();
	let output = run(&["map", &schema, "--type", "Account", "--input", &input, "--strict"]);

	assert_eq!(output.status.code(), Some(1));
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("error: strict merge rejected input with 3 diagnostic(s)"), "{stderr}");
}

#[test]
fn map_reads_stdin() {
	let schema = schema_arg();
	let mut child = Command::new(env!("CARGO_BIN_EXE_structbind"))
		.args(["map", &schema, "--type", "Address", "--input", "-"])
		.stdin(Stdio::piped())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.spawn()
		.expect("command spawns");
	child
		.stdin
		.take()
		.expect("stdin piped")
		.write_all(br#"{"city": "Oslo", "zip_code": "0150"}"#)
		.expect("stdin written");
	let output = child.wait_with_output().expect("command finishes");

	assert!(output.status.success());
	let json: Value = serde_json::from_slice(&output.stdout).expect("valid json");
	assert_eq!(json, serde_json::json!({ "city": "Oslo", "zip_code": "0150" }));
}

#[test]
fn show_prints_display_string() {
	let schema = schema_arg();
	let output = run(&["show", &schema, "--type", "Address"]);
	assert!(output.status.success());
	assert_eq!(String::from_utf8_lossy(&output.stdout).trim_end(), "Address ({})");
}

#[test]
fn call_get_and_set() {
	let schema = schema_arg();
	let input = input_arg();

	let got = run_json(&["call", &schema, "--type", "Account", "--input", &input, "getAccountId"]);
	assert_eq!(got, 42);

	let set = run_json(&["call", &schema, "--type", "Account", "--input", &input, "setFavoriteColor", r#""BLUE""#]);
	assert_eq!(set, "BLUE");

	let negative = run_json(&["call", &schema, "--type", "Account", "setAccountId", "--", "-7"]);
	assert_eq!(negative, -7);
}

#[test]
fn call_dump_prints_record_after_result() {
	let schema = schema_arg();
	let output = run(&["call", &schema, "--type", "Address", "--dump", "setCity", r#""Oslo""#]);
	assert!(output.status.success());

	let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
	let lines: Vec<&str> = stdout.lines().collect();
	assert_eq!(lines, [r#""Oslo""#, r#"{"city":"Oslo"}"#]);
}

#[test]
fn undefined_accessor_is_an_error() {
	let schema = schema_arg();
	let output = run(&["call", &schema, "--type", "Account", "fooY"]);

	assert_eq!(output.status.code(), Some(1));
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("error: call to undefined method Account::fooY()"), "{stderr}");
}

#[test]
fn schema_json_lists_fields_with_wire_names() {
	let schema = schema_arg();

	let summary = run_json(&["schema", &schema, "--json"]);
	assert_eq!(summary["structs"], serde_json::json!(["Account", "Address"]));
	assert_eq!(summary["enums"], serde_json::json!(["Tier", "Color"]));

	let detail = run_json(&["schema", &schema, "--type", "Account", "--json"]);
	assert_eq!(detail["fields"][4], serde_json::json!({ "name": "homeAddress", "wire": "home_address", "type": "Address" }));

	let tier = run_json(&["schema", &schema, "--type", "Tier", "--json"]);
	assert_eq!(tier["cases"][1], serde_json::json!({ "label": "PAID", "value": 2 }));
}

#[test]
fn unknown_type_fails() {
	let schema = schema_arg();
	let output = run(&["map", &schema, "--type", "Invoice"]);

	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&output.stderr).contains("error: schema type not found: Invoice"));
}
