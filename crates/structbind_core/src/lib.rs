//! Lenient binding between plain data structs and ordered maps / JSON.

/// Descriptor tables, mapping, serialization and dynamic accessors.
pub mod bind;
