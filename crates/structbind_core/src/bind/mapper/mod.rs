use std::ptr;
use std::sync::Arc;

use crate::bind::{BindError, Diagnostic, DiagnosticKind, FieldType, Map, Result, Struct, StructSchema, Value, instantiate, to_declared_style};

/// Limits for map-to-instance merging.
#[derive(Debug, Clone)]
pub struct MergeOptions {
	/// Maximum nesting depth of constructed struct values.
	pub max_depth: u32,
}

impl Default for MergeOptions {
	fn default() -> Self {
		Self { max_depth: 32 }
	}
}

/// Resolve an input key to a field index: exact name first, then the
/// declared-style translation of the key.
pub fn resolve_key(schema: &StructSchema, key: &str) -> Option<usize> {
	schema.field_index(key).or_else(|| schema.field_index(&to_declared_style(key, false)))
}

/// Merge `data` into `target`, returning every skipped key/value pair.
///
/// Never fails: unknown keys, unresolved enum labels, nested construction
/// failures and rejected assignments leave the affected field unchanged and
/// are reported as diagnostics.
pub fn merge(target: &mut dyn Struct, data: Map, opt: &MergeOptions) -> Vec<Diagnostic> {
	let mut diagnostics = Vec::new();
	merge_impl(target, data, opt, 0, "", &mut diagnostics);
	diagnostics
}

/// Parse JSON object text and merge it into `target`.
pub fn merge_json(target: &mut dyn Struct, json: &str, opt: &MergeOptions) -> Result<Vec<Diagnostic>> {
	let parsed: serde_json::Value = serde_json::from_str(json)?;
	match Value::from(parsed) {
		Value::Map(data) => Ok(merge(target, data, opt)),
		other => Err(BindError::NotAnObject { got: other.kind() }),
	}
}

/// Create a fresh instance of `schema` and merge `data` into it.
pub fn construct(schema: &Arc<StructSchema>, data: Map, opt: &MergeOptions) -> (Box<dyn Struct>, Vec<Diagnostic>) {
	let mut out = instantiate(schema);
	let diagnostics = merge(out.as_mut(), data, opt);
	(out, diagnostics)
}

fn merge_impl(target: &mut dyn Struct, data: Map, opt: &MergeOptions, depth: u32, prefix: &str, out: &mut Vec<Diagnostic>) {
	for (key, value) in data {
		let path = join_path(prefix, &key);

		let Some(index) = resolve_key(target.schema(), &key) else {
			tracing::debug!(type_name = target.schema().name(), %path, "skipping unknown key");
			out.push(Diagnostic::new(path, DiagnosticKind::UnknownKey));
			continue;
		};

		let resolved = if value.is_null() {
			None
		} else {
			let ty = target.schema().fields()[index].ty.clone();
			match resolve_value(&ty, value, opt, depth, &path, out) {
				Ok(value) => Some(value),
				Err(kind) => {
					record(out, path, kind);
					continue;
				}
			}
		};

		let outcome = if target.has_setter(index) {
			target.call_setter(index, resolved)
		} else {
			target.write_field(index, resolved)
		};
		if let Err(error) = outcome {
			record(out, path, DiagnosticKind::AccessorInvocationFailure(error));
		}
	}
}

/// Resolve an input value against a declared type.
///
/// Builtins pass through. Struct types accept an instance of the same
/// schema or a map to construct from. Enum types accept a value of the same
/// enum or a case label string.
pub(crate) fn resolve_value(
	ty: &FieldType,
	value: Value,
	opt: &MergeOptions,
	depth: u32,
	path: &str,
	out: &mut Vec<Diagnostic>,
) -> std::result::Result<Value, DiagnosticKind> {
	match ty {
		FieldType::Struct(schema) => match value {
			Value::Struct(item) if ptr::eq(item.schema(), &**schema) => Ok(Value::Struct(item)),
			Value::Map(data) => {
				if depth + 1 > opt.max_depth {
					return Err(DiagnosticKind::NestedConstructionFailure {
						type_name: schema.name().to_owned(),
						reason: format!("nesting exceeds max depth {}", opt.max_depth),
					});
				}
				let mut nested = instantiate(schema);
				merge_impl(nested.as_mut(), data, opt, depth + 1, path, out);
				Ok(Value::Struct(nested))
			}
			other => Err(DiagnosticKind::NestedConstructionFailure {
				type_name: schema.name().to_owned(),
				reason: format!("expected map, got {}", other.kind()),
			}),
		},
		FieldType::Enum(schema) => match value {
			Value::Enum(item) if item.enum_name() == schema.name() => Ok(Value::Enum(item)),
			Value::String(label) => schema.resolve(&label).map(Value::Enum).ok_or(DiagnosticKind::UnresolvedEnumCase {
				enum_name: schema.name().to_owned(),
				got: label,
			}),
			other => Err(DiagnosticKind::UnresolvedEnumCase {
				enum_name: schema.name().to_owned(),
				got: format!("<{}>", other.kind()),
			}),
		},
		_ => Ok(value),
	}
}

fn record(out: &mut Vec<Diagnostic>, path: String, kind: DiagnosticKind) {
	let diagnostic = Diagnostic::new(path, kind);
	tracing::debug!(%diagnostic, "merge skipped value");
	out.push(diagnostic);
}

fn join_path(prefix: &str, key: &str) -> String {
	if prefix.is_empty() { key.to_owned() } else { format!("{prefix}.{key}") }
}
