//! Random device id generation.

use at_core::ports::IdGeneratorPort;

/// Generates UUID v4 tokens rendered as 32 lowercase hex characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl UuidIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGeneratorPort for UuidIdGenerator {
    fn generate_id(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}
