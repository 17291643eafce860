use thiserror::Error;

use crate::bind::AccessorError;

/// Input that a merge skipped, with the dotted path of the offending key.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{path}: {kind}")]
pub struct Diagnostic {
	/// Dotted key path, e.g. `address.zip`.
	pub path: String,
	/// What went wrong.
	pub kind: DiagnosticKind,
}

impl Diagnostic {
	/// Create a diagnostic for `path`.
	pub fn new(path: impl Into<String>, kind: DiagnosticKind) -> Self {
		Self { path: path.into(), kind }
	}
}

/// Reasons a key/value pair was skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiagnosticKind {
	/// Key matched no declared field, even after naming translation.
	#[error("unknown key")]
	UnknownKey,
	/// Value does not name a case of the declared enum.
	#[error("{enum_name} has no case matching {got}")]
	UnresolvedEnumCase {
		/// Enum type name.
		enum_name: String,
		/// Rendering of the supplied value.
		got: String,
	},
	/// Nested struct could not be built from the value.
	#[error("cannot construct {type_name}: {reason}")]
	NestedConstructionFailure {
		/// Nested struct type name.
		type_name: String,
		/// Why construction failed.
		reason: String,
	},
	/// Setter, getter or direct assignment failed.
	#[error("accessor failed: {0}")]
	AccessorInvocationFailure(AccessorError),
}
