use std::collections::TryReserveError;
use std::fmt;

/// Why a mutating map operation was refused.
///
/// A missing key is not an error; lookups and removals report it as `None`.
/// Whatever the variant, the map is left exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The map was never initialised or has been torn down with `deinit`.
    Uninitialized,
    /// The requested bucket count does not fit in `usize`.
    CapacityOverflow,
    /// The allocator refused the bucket array or a key buffer.
    Alloc(TryReserveError),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Uninitialized => write!(f, "map is not initialized"),
            MapError::CapacityOverflow => write!(f, "bucket count overflows usize"),
            MapError::Alloc(e) => write!(f, "allocation failed: {}", e),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Alloc(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TryReserveError> for MapError {
    fn from(e: TryReserveError) -> Self {
        MapError::Alloc(e)
    }
}
