#![allow(missing_docs)]

use std::cell::Cell;

use structbind::bind::{
	AccessorError, ArrayOptions, BindError, DiagnosticKind, JsonOptions, Map, Struct, StructType, Value, call, get, set, to_json, to_map,
};

structbind::enumeration! {
	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	enum Color {
		Red => "RED",
		Green => "GREEN",
	}
}

structbind::structure! {
	#[derive(Debug, Clone, Default, PartialEq)]
	struct Address {
		street: String => "street",
		zip_code: String => "zipCode",
	}
}

structbind::structure! {
	#[derive(Debug, Clone, Default)]
	struct Profile {
		user_name: String => "userName" [set = Profile::set_user_name],
		y: i64 => "y",
		age: i64 => "age" [set = Profile::set_age],
		color: Color => "color",
		address: Address => "address",
		tags: Vec<String> => "tags",
		secret: String => "secret" [get = Profile::masked_secret],
	}
}

thread_local! {
	static USER_NAME_SETS: Cell<usize> = const { Cell::new(0) };
}

fn user_name_sets() -> usize {
	USER_NAME_SETS.with(Cell::get)
}

impl Profile {
	fn set_user_name(&mut self, value: Option<String>) -> Result<(), AccessorError> {
		USER_NAME_SETS.with(|count| count.set(count.get() + 1));
		self.user_name = value.map(|name| name.trim().to_owned());
		Ok(())
	}

	fn set_age(&mut self, value: Option<i64>) -> Result<(), AccessorError> {
		if value.is_some_and(|age| age < 0) {
			return Err(AccessorError::rejected("age must not be negative"));
		}
		self.age = value;
		Ok(())
	}

	fn masked_secret(&self) -> Result<Option<String>, AccessorError> {
		Ok(self.secret.as_ref().map(|_| "***".to_owned()))
	}
}

fn map(json: serde_json::Value) -> Map {
	match Value::from(json) {
		Value::Map(map) => map,
		other => panic!("expected object, got {}", other.kind()),
	}
}

fn sample_input() -> Map {
	map(serde_json::json!({
		"user_name": "ada",
		"y": 3,
		"age": 36,
		"color": "GREEN",
		"address": { "street": "Main", "zip_code": "12345" },
		"tags": ["a", "b"]
	}))
}

#[test]
fn round_trip_preserves_wire_map() {
	let profile = Profile::from_map(sample_input());
	let first = to_map(&profile, &ArrayOptions::default());

	let again = Profile::from_map(first.clone());
	assert_eq!(to_map(&again, &ArrayOptions::default()), first);
	assert_eq!(first.keys().collect::<Vec<_>>(), ["user_name", "y", "age", "color", "address", "tags"]);
}

#[test]
fn unset_fields_are_omitted() {
	let profile = Profile::default();
	assert!(to_map(&profile, &ArrayOptions::default()).is_empty());
	assert_eq!(to_json(&profile, &JsonOptions::default()).expect("encodes"), "{}");

	let partial = Profile::from_map(map(serde_json::json!({ "y": 1, "color": null })));
	assert_eq!(to_json(&partial, &JsonOptions::default()).expect("encodes"), r#"{"y":1}"#);
}

#[test]
fn unknown_keys_are_reported_not_fatal() {
	let mut input = sample_input();
	input.insert("nickname", Value::from("x"));

	let (profile, diagnostics) = Profile::from_map_with(input, &Default::default());

	assert_eq!(profile.y, Some(3));
	assert_eq!(diagnostics.len(), 1);
	assert_eq!(diagnostics[0].path, "nickname");
	assert_eq!(diagnostics[0].kind, DiagnosticKind::UnknownKey);
}

#[test]
fn setter_runs_for_mapped_and_dynamic_writes() {
	let before = user_name_sets();
	let mut profile = Profile::from_map(map(serde_json::json!({ "user_name": "  ada  " })));
	assert_eq!(user_name_sets(), before + 1);
	assert_eq!(profile.user_name.as_deref(), Some("ada"));

	call(&mut profile, "setUserName", vec![Value::from(" grace ")]).expect("dynamic set");
	assert_eq!(user_name_sets(), before + 2);
	assert_eq!(profile.user_name.as_deref(), Some("grace"));

	set(&mut profile, "userName", Value::from("linus")).expect("named set");
	assert_eq!(user_name_sets(), before + 3);

	profile.write_field(0, Some(Value::from(" raw "))).expect("direct write");
	assert_eq!(user_name_sets(), before + 3);
	assert_eq!(profile.user_name.as_deref(), Some(" raw "));
}

#[test]
fn rejecting_setter_keeps_previous_value() {
	let mut profile = Profile::from_map(map(serde_json::json!({ "age": 30 })));

	let diagnostics = structbind::bind::merge(&mut profile, map(serde_json::json!({ "age": -1 })), &Default::default());

	assert_eq!(profile.age, Some(30));
	assert_eq!(
		diagnostics[0].kind,
		DiagnosticKind::AccessorInvocationFailure(AccessorError::rejected("age must not be negative"))
	);
}

#[test]
fn getter_overrides_direct_read() {
	let mut profile = Profile::default();
	set(&mut profile, "secret", Value::from("hunter2")).expect("set secret");

	assert_eq!(profile.secret.as_deref(), Some("hunter2"));
	assert_eq!(get(&profile, "secret").expect("get"), Some(Value::from("***")));
	assert_eq!(call(&mut profile, "getSecret", Vec::new()).expect("dynamic get"), Some(Value::from("***")));
	assert_eq!(to_map(&profile, &ArrayOptions::default()).get("secret"), Some(&Value::from("***")));
}

#[test]
fn dynamic_accessor_falls_back_to_fields() {
	let mut profile = Profile::default();

	assert_eq!(call(&mut profile, "setY", vec![Value::I64(9)]).expect("setY"), Some(Value::I64(9)));
	assert_eq!(profile.y, Some(9));
	assert_eq!(call(&mut profile, "getY", Vec::new()).expect("getY"), Some(Value::I64(9)));

	for method in ["fooY", "getZ"] {
		let err = call(&mut profile, method, Vec::new()).expect_err(method);
		assert!(matches!(err, BindError::UndefinedMethod { .. }), "{method}: {err}");
	}
}

#[test]
fn nested_construction_equals_direct_construction() {
	let direct = Address::from_map(map(serde_json::json!({ "street": "Main", "zip_code": "1" })));
	let profile = Profile::from_map(map(serde_json::json!({ "address": { "street": "Main", "zip_code": "1" } })));

	assert_eq!(profile.address, Some(direct.clone()));

	let mut input = Map::new();
	input.insert("address", Value::Struct(Box::new(direct.clone())));
	let (reused, diagnostics) = Profile::from_map_with(input, &Default::default());
	assert!(diagnostics.is_empty());
	assert_eq!(reused.address, Some(direct));
}

#[test]
fn enum_labels_resolve_and_serialize() {
	let (profile, diagnostics) = Profile::from_map_with(map(serde_json::json!({ "color": "RED" })), &Default::default());
	assert!(diagnostics.is_empty());
	assert_eq!(profile.color, Some(Color::Red));
	assert_eq!(to_json(&profile, &JsonOptions::default()).expect("encodes"), r#"{"color":"RED"}"#);

	let (profile, diagnostics) = Profile::from_map_with(map(serde_json::json!({ "color": "PURPLE" })), &Default::default());
	assert_eq!(profile.color, None);
	assert!(matches!(diagnostics[0].kind, DiagnosticKind::UnresolvedEnumCase { .. }));

	assert_eq!(Color::Green.to_string(), "GREEN");
}

#[test]
fn declared_and_wire_names_translate() {
	let (profile, diagnostics) = Profile::from_map_with(map(serde_json::json!({ "userName": "ada" })), &Default::default());
	assert!(diagnostics.is_empty());

	assert!(to_map(&profile, &ArrayOptions::default()).contains_key("user_name"));
	assert!(to_map(&profile, &ArrayOptions::declared()).contains_key("userName"));
}

#[test]
fn raw_output_keeps_typed_values() {
	let profile = Profile::from_map(sample_input());
	let raw = to_map(&profile, &ArrayOptions::raw());

	let address = raw.get("address").and_then(Value::as_struct).expect("nested struct kept");
	let address = address.as_any().downcast_ref::<Address>().expect("typed address");
	assert_eq!(address.street.as_deref(), Some("Main"));
	assert_eq!(raw.get("color").and_then(Value::as_enum).map(|item| item.label()), Some("GREEN"));
}

#[test]
fn list_element_mismatch_is_reported() {
	let (profile, diagnostics) = Profile::from_map_with(map(serde_json::json!({ "tags": ["a", 1] })), &Default::default());

	assert_eq!(profile.tags, None);
	assert!(matches!(diagnostics[0].kind, DiagnosticKind::AccessorInvocationFailure(AccessorError::TypeMismatch { .. })));
}

#[test]
fn json_entry_point_and_display() {
	let (profile, _) = Profile::from_json(r#"{"y": 2, "address": {"street": "Main"}}"#).expect("object parses");
	assert_eq!(profile.to_string(), r#"Profile ({"y":2,"address":{"street":"Main"}})"#);

	assert!(matches!(Profile::from_json("[]"), Err(BindError::NotAnObject { got: "list" })));
}

structbind::structure! {
	#[derive(Debug, Clone, Default)]
	struct Vault {
		pin: String => "pin" [get = Vault::sealed_pin],
		label: String => "label",
	}
}

impl Vault {
	fn sealed_pin(&self) -> Result<Option<String>, AccessorError> {
		Err(AccessorError::rejected("pin is sealed"))
	}
}

#[test]
fn failing_getter_omits_field_from_output() {
	let vault = Vault::from_map(map(serde_json::json!({ "pin": "1234", "label": "home" })));
	assert_eq!(vault.pin.as_deref(), Some("1234"));

	let out = to_map(&vault, &ArrayOptions::default());
	assert_eq!(out.keys().collect::<Vec<_>>(), ["label"]);
	assert_eq!(to_json(&vault, &JsonOptions::default()).expect("encodes"), r#"{"label":"home"}"#);

	let err = get(&vault, "pin").expect_err("getter failure surfaces");
	let BindError::Diagnostic(diagnostic) = err else {
		panic!("expected diagnostic, got {err}");
	};
	assert_eq!(diagnostic.path, "pin");
	assert!(matches!(diagnostic.kind, DiagnosticKind::AccessorInvocationFailure(AccessorError::Rejected(_))));
	assert_eq!(get(&vault, "label").expect("plain read"), Some(Value::from("home")));
}

structbind::structure! {
	#[derive(Debug, Clone, Default, PartialEq)]
	struct Shelf {
		items: Vec<Address> => "items",
	}
}

#[test]
fn list_elements_build_structs_and_only_log_skipped_keys() {
	let (shelf, diagnostics) = Shelf::from_json(r#"{"items": [{"street": "Main", "bogus": 2}, {"zip_code": "0150"}]}"#).expect("object input");

	assert!(diagnostics.is_empty(), "list element input is not reported: {diagnostics:?}");
	let items = shelf.items.expect("items set");
	assert_eq!(items.len(), 2);
	assert_eq!(items[0].street.as_deref(), Some("Main"));
	assert_eq!(items[1].zip_code.as_deref(), Some("0150"));
}
