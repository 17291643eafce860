#![allow(missing_docs)]

use structbind::bind::{
	ArrayOptions, DiagnosticKind, JsonOptions, Map, MergeOptions, Record, SchemaSet, Struct, Value, call, merge_json, to_json, to_map,
};
use structbind_testkit::{fixture_path, read_fixture};

fn account() -> (Record, Vec<structbind::bind::Diagnostic>) {
	let schemas = SchemaSet::open(fixture_path("account_schema.json")).expect("schema loads");
	let mut record = schemas.record("Account").expect("account declared");
	let diagnostics = merge_json(&mut record, &read_fixture("account.json"), &MergeOptions::default()).expect("fixture is an object");
	(record, diagnostics)
}

#[test]
fn fixture_merge_reports_skipped_input() {
	let (_, diagnostics) = account();

	let paths: Vec<&str> = diagnostics.iter().map(|item| item.path.as_str()).collect();
	assert_eq!(paths, ["favorite_color", "home_address.country", "nickname"]);
	assert!(matches!(diagnostics[0].kind, DiagnosticKind::UnresolvedEnumCase { .. }));
	assert_eq!(diagnostics[1].kind, DiagnosticKind::UnknownKey);
}

#[test]
fn fixture_maps_back_in_declaration_order() {
	let (record, _) = account();
	let out = to_map(&record, &ArrayOptions::default());

	assert_eq!(
		out.keys().collect::<Vec<_>>(),
		["account_id", "user_name", "tier", "home_address", "balance", "tags", "active"]
	);
	assert_eq!(out.get("tier"), Some(&Value::from("PAID")));
	assert_eq!(out.get("balance"), Some(&Value::F64(12.5)));

	let address = out.get("home_address").and_then(Value::as_map).expect("address flattened");
	let keys: Vec<&str> = address.keys().collect();
	assert_eq!(keys, ["street", "city", "zip_code"]);
}

#[test]
fn enum_underlying_value_survives_raw_output() {
	let (record, _) = account();
	let raw = to_map(&record, &ArrayOptions::raw());

	let tier = raw.get("tier").and_then(Value::as_enum).expect("tier kept as enum");
	assert_eq!(tier.value(), &Value::I64(2));
}

#[test]
fn unicode_text_round_trips_through_json() {
	let (record, _) = account();

	let plain = to_json(&record, &JsonOptions::default()).expect("encodes");
	assert!(plain.contains("Zoë Ångström"));

	let escaped = to_json(
		&record,
		&JsonOptions {
			escape_unicode: true,
			..JsonOptions::default()
		},
	)
	.expect("encodes");
	assert!(escaped.is_ascii());
	assert!(escaped.contains(r"Zo\u00eb"));

	let reparsed: serde_json::Value = serde_json::from_str(&escaped).expect("escaped output parses");
	assert_eq!(reparsed["user_name"], "Zoë Ångström");
	assert_eq!(reparsed["home_address"]["city"], "Montréal");
}

#[test]
fn reconstructed_record_matches_original() {
	let (record, _) = account();
	let first = to_map(&record, &ArrayOptions::default());

	let (again, diagnostics) = Record::from_map(record.schema_arc().clone(), first.clone(), &MergeOptions::default());
	assert!(diagnostics.is_empty(), "{diagnostics:?}");
	assert_eq!(to_map(&again, &ArrayOptions::default()), first);
}

#[test]
fn dynamic_accessors_work_on_records() {
	let (mut record, _) = account();

	assert_eq!(call(&mut record, "getAccountId", Vec::new()).expect("get"), Some(Value::I64(42)));
	call(&mut record, "setFavoriteColor", vec![Value::from("BLUE")]).expect("label resolves");

	let color = record.read_field(3).expect("color set");
	assert_eq!(color.as_enum().map(|item| item.label()), Some("BLUE"));

	let mut address = Map::new();
	address.insert("city", Value::from("Québec"));
	call(&mut record, "setHomeAddress", vec![Value::Map(address)]).expect("nested map");
	let out = to_map(&record, &ArrayOptions::declared());
	let nested = out.get("homeAddress").and_then(Value::as_map).expect("address replaced");
	assert_eq!(nested.keys().collect::<Vec<_>>(), ["city"]);
}
