pub mod analytics;
pub use analytics::{AppwriteAnalytics, DisabledAnalytics, RecordOutcome, SearchAnalytics};

pub mod catalog;
pub use catalog::MovieCatalog;

pub mod debounce;
pub use debounce::{SearchGate, SearchRequest, debounce};

pub mod discovery;
pub use discovery::{DiscoveryError, DiscoveryService, ListingKind, MovieListing, MoviePage};
