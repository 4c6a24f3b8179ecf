//! Identifier generation adapter.

use uuid::Uuid;

use crate::domain::ports::IdGenerator;

/// Mints UUIDv7 strings, which sort by creation time.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidV7IdGenerator;

impl IdGenerator for UuidV7IdGenerator {
    fn next_id(&self) -> String {
        Uuid::now_v7().to_string()
    }
}
