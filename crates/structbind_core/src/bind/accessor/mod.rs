use crate::bind::mapper::resolve_value;
use crate::bind::naming::lower_first;
use crate::bind::{BindError, Diagnostic, DiagnosticKind, MergeOptions, Result, Struct, Value};

/// Direction of a dynamic accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
	/// `get<Field>`
	Get,
	/// `set<Field>`
	Set,
}

/// Split `getUserName` into `(Get, "userName")`.
///
/// Returns `None` when the method has no `get`/`set` prefix. The field part
/// may be empty; it simply resolves to no field.
pub fn parse_accessor(method: &str) -> Option<(AccessorKind, String)> {
	let (kind, rest) = if let Some(rest) = method.strip_prefix("get") {
		(AccessorKind::Get, rest)
	} else if let Some(rest) = method.strip_prefix("set") {
		(AccessorKind::Set, rest)
	} else {
		return None;
	};
	Some((kind, lower_first(rest)))
}

/// Invoke a dynamic `get<Field>` / `set<Field>` accessor.
///
/// `set` assigns the first argument (none or null clears the field) and
/// returns the field's new value. `get` ignores its arguments. Fields with
/// an explicit accessor dispatch to it.
pub fn call(target: &mut dyn Struct, method: &str, args: Vec<Value>) -> Result<Option<Value>> {
	let undefined = || BindError::UndefinedMethod {
		type_name: target.schema().name().to_owned(),
		method: method.to_owned(),
	};
	let (kind, field) = parse_accessor(method).ok_or_else(&undefined)?;
	let index = target.schema().field_index(&field).ok_or_else(&undefined)?;

	if kind == AccessorKind::Set {
		let value = args.into_iter().next().unwrap_or(Value::Null);
		assign(target, index, &field, value)?;
	}
	read(target, index, &field)
}

/// Whether the type declares a field with this exact name.
pub fn has_field(target: &dyn Struct, name: &str) -> bool {
	target.schema().field_index(name).is_some()
}

/// Read a field by declared name, through its getter when one exists.
pub fn get(target: &dyn Struct, name: &str) -> Result<Option<Value>> {
	let index = field_index(target, name)?;
	read(target, index, name)
}

/// Assign a field by declared name.
///
/// The value is coerced like a merged value, but failures are returned
/// instead of collected.
pub fn set(target: &mut dyn Struct, name: &str, value: Value) -> Result<()> {
	let index = field_index(target, name)?;
	assign(target, index, name, value)
}

/// Clear a field by declared name.
pub fn unset(target: &mut dyn Struct, name: &str) -> Result<()> {
	set(target, name, Value::Null)
}

fn field_index(target: &dyn Struct, name: &str) -> Result<usize> {
	target.schema().field_index(name).ok_or_else(|| BindError::UnknownField {
		type_name: target.schema().name().to_owned(),
		field: name.to_owned(),
	})
}

fn read(target: &dyn Struct, index: usize, name: &str) -> Result<Option<Value>> {
	let read = if target.has_getter(index) {
		target.call_getter(index)
	} else {
		Ok(target.read_field(index))
	};
	read.map_err(|error| Diagnostic::new(name, DiagnosticKind::AccessorInvocationFailure(error)).into())
}

fn assign(target: &mut dyn Struct, index: usize, name: &str, value: Value) -> Result<()> {
	let resolved = if value.is_null() {
		None
	} else {
		let ty = target.schema().fields()[index].ty.clone();
		let mut nested = Vec::new();
		let resolved = resolve_value(&ty, value, &MergeOptions::default(), 0, name, &mut nested)
			.map_err(|kind| Diagnostic::new(name, kind))?;
		for diagnostic in &nested {
			tracing::debug!(%diagnostic, "nested assignment skipped input");
		}
		Some(resolved)
	};

	let outcome = if target.has_setter(index) {
		target.call_setter(index, resolved)
	} else {
		target.write_field(index, resolved)
	};
	outcome.map_err(|error| Diagnostic::new(name, DiagnosticKind::AccessorInvocationFailure(error)).into())
}
