//! Direct OS-level token extraction.

/// Zero-cost synchronous probe for the token.
///
/// Returns the raw bytes when the OS grants access, `None` when it does
/// not. Absence is not an error; the orchestrator falls back to the
/// privileged helper.
pub trait DirectTokenProbe: Send + Sync {
    fn probe(&self) -> Option<Vec<u8>>;
}
