/// Dynamic accessor invocation command.
pub mod call;
/// Record mapping command.
pub mod map;
/// Schema file summary command.
pub mod schema;
/// Record display string command.
pub mod show;
/// Shared argument and IO helpers.
pub mod util;
