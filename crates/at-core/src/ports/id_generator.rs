//! ID generator port for producing last-resort device identifiers.

/// Generates unique identifiers.
///
/// Abstracting generation allows deterministic ids in tests.
pub trait IdGeneratorPort: Send + Sync {
    /// Generates a new, non-empty unique identifier string.
    fn generate_id(&self) -> String;
}
