//! Domain model structs and DTOs.
//!
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO and its validated insert form
//! - A `Deserialize` update DTO (all `Option` fields) for partial updates

pub mod todo;
