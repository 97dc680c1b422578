pub mod dedup;
pub mod draft;
pub mod movie;
pub mod options;
pub mod remote;

pub use dedup::DedupKey;
pub use draft::MovieDraft;
pub use movie::Movie;
pub use options::{ParseOptionError, SortOption, WatchedFilter};
pub use remote::RemoteMovie;
