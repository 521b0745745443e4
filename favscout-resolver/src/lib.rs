pub mod cache;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod origin;
pub mod resolver;
pub mod select;

pub use cache::{IconCache, MemoryCache, DEFAULT_MAX_ENTRIES};
pub use error::ResolveError;
pub use extract::LinkElement;
pub use origin::{fallback_letter, PageOrigin, COMPACT_FALLBACK_SIZE, DEFAULT_FALLBACK_SIZE};
pub use resolver::{IconResolver, ResolvedIcon};
pub use select::IconCandidate;
