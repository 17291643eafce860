mod accessor;
mod diagnostic;
mod error;
mod instance;
mod macros;
mod mapper;
mod naming;
mod record;
mod schema;
mod serializer;
mod value;

/// Dynamic `get<Field>` / `set<Field>` dispatch and name-keyed field access.
pub use accessor::{AccessorKind, call, get, has_field, parse_accessor, set, unset};
/// Per-merge diagnostics.
pub use diagnostic::{Diagnostic, DiagnosticKind};
/// Error and result aliases.
pub use error::{AccessorError, BindError, Result};
/// Instance traits and helpers used by generated code.
pub use instance::{Bind, Enumerable, Struct, StructType, boxed_default, enum_from_value, enum_to_value, struct_from_value};
/// Map/JSON to instance entry points and options.
pub use mapper::{MergeOptions, construct, merge, merge_json, resolve_key};
/// Naming-convention transforms.
pub use naming::{to_declared_style, to_wire_style};
/// Schema-driven runtime instance.
pub use record::Record;
/// Descriptor tables and schema file loading.
pub use schema::{EnumCase, EnumSchema, FieldSchema, FieldType, SchemaSet, StructSchema, instantiate};
/// Instance to map/JSON entry points and options.
pub use serializer::{ArrayOptions, JsonOptions, display_string, encode_json, to_json, to_map};
/// Dynamic value types.
pub use value::{EnumValue, Map, Value};
