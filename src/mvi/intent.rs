//! Base trait for intents in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent fetch lifecycle events:
/// - A load or fetch starting
/// - The bound operation settling with a value or an error
/// - The user cancelling an in-flight fetch
pub trait Intent: Send + 'static {}
