pub mod catalog;
pub mod confirm;
pub mod error;
pub mod import;
pub mod list;
pub mod notice;
pub mod validation;
pub mod view;

pub use catalog::{HttpCatalog, MovieCatalog, SuggestedCatalog};
pub use confirm::PendingAction;
pub use error::{Action, ActionError, CatalogError, SubmitError};
pub use import::ImportReport;
pub use list::{ListStatus, MovieList};
pub use notice::{Notice, NoticeLevel};
pub use validation::{current_year, FieldErrors, MovieForm};
pub use view::{derive_view, ViewQuery};
