use thiserror::Error;

use crate::bind::Diagnostic;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, BindError>;

/// Errors surfaced to callers of the binding API.
///
/// Malformed or partial input never produces one of these during a merge;
/// those problems are collected as [`Diagnostic`]s instead.
#[derive(Debug, Error)]
pub enum BindError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// JSON text could not be parsed.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Top-level JSON input was not an object.
	#[error("expected a JSON object at the top level, got {got}")]
	NotAnObject {
		/// Kind of the value that was found instead.
		got: &'static str,
	},
	/// Dynamic accessor name did not resolve to a declared field.
	#[error("call to undefined method {type_name}::{method}()")]
	UndefinedMethod {
		/// Struct type name.
		type_name: String,
		/// Requested method name.
		method: String,
	},
	/// Name-keyed access used a field the type does not declare.
	#[error("unknown field {field} on {type_name}")]
	UnknownField {
		/// Struct type name.
		type_name: String,
		/// Requested field name.
		field: String,
	},
	/// Explicit assignment or accessor invocation was rejected.
	#[error("{0}")]
	Diagnostic(#[from] Diagnostic),
	/// Schema file referenced a type that is neither builtin nor declared.
	#[error("schema type not found: {name}")]
	SchemaTypeNotFound {
		/// Referenced type name.
		name: String,
	},
	/// Schema file declared the same type name twice.
	#[error("schema duplicate type: {name}")]
	SchemaDuplicateType {
		/// Duplicated type name.
		name: String,
	},
	/// Struct declared the same field name twice.
	#[error("schema duplicate field {field} on {type_name}")]
	SchemaDuplicateField {
		/// Struct type name.
		type_name: String,
		/// Duplicated field name.
		field: String,
	},
	/// Enum declared the same case label twice.
	#[error("schema duplicate case {label} on {type_name}")]
	SchemaDuplicateCase {
		/// Enum type name.
		type_name: String,
		/// Duplicated label.
		label: String,
	},
	/// Struct references itself directly or through other structs.
	#[error("schema type {name} references itself")]
	SchemaRecursiveType {
		/// Struct type name where the cycle was detected.
		name: String,
	},
	/// Strict merge found diagnostics.
	#[error("strict merge rejected input with {count} diagnostic(s)")]
	StrictRejected {
		/// Number of recorded diagnostics.
		count: usize,
	},
}

/// Failure while reading or writing one field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccessorError {
	/// Value is not assignable to the declared field type.
	#[error("expected {expected}, got {got}")]
	TypeMismatch {
		/// Declared type name.
		expected: String,
		/// Kind of the supplied value.
		got: &'static str,
	},
	/// Label does not name a case of the enum.
	#[error("{enum_name} has no case {label}")]
	UnknownCase {
		/// Enum type name.
		enum_name: String,
		/// Supplied label.
		label: String,
	},
	/// Field index is outside the descriptor table.
	#[error("no field at index {index}")]
	NoSuchField {
		/// Requested index.
		index: usize,
	},
	/// Explicit accessor refused the value.
	#[error("rejected: {0}")]
	Rejected(String),
}

impl AccessorError {
	/// Build a rejection from an explicit accessor.
	pub fn rejected(message: impl Into<String>) -> Self {
		Self::Rejected(message.into())
	}
}
