//! Base trait for observable loading state.

/// Marker trait for state objects published to renderers.
///
/// States are:
/// - Snapshots (Clone to hand a copy to observers)
/// - Self-contained (everything a renderer needs)
/// - Comparable (PartialEq for detecting changes)
pub trait UiState: Clone + PartialEq + Default + Send + Sync + 'static {}
