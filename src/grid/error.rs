/// Geometric queries that have no answer for the given input.
///
/// These are caller bugs rather than bad map data, so they propagate with `?`
/// instead of landing in a validation report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("invalid position: {x}, {y}")]
    InvalidPosition { x: i32, y: i32 },

    #[error("invalid region id: {0}")]
    InvalidRegionId(u32),
}
