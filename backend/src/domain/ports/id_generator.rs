//! Port for minting entity identifiers.

/// Source of opaque, unique identifiers for posts and follow edges.
///
/// Domain code never inspects the returned value.
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}
