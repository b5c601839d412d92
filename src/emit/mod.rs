/// Command Generator.
pub mod command;
/// Data Serializer.
pub mod serialize;
