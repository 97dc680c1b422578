use tracing::{debug, info, warn};
use watchlist_models::{Movie, MovieDraft, SortOption, WatchedFilter};
use watchlist_store::MovieStore;
use crate::catalog::MovieCatalog;
use crate::confirm::PendingAction;
use crate::error::{Action, ActionError, SubmitError};
use crate::import::{insert_new, ImportReport};
use crate::notice::Notice;
use crate::validation::{current_year, MovieForm};
use crate::view::{derive_view, ViewQuery};

/// What the list screen should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStatus {
    Loading,
    /// The very first load failed; there is no list to fall back to
    FailedFirstLoad(String),
    Empty,
    /// Movies are available; `stale_error` is set when the latest reload
    /// failed and the list shown is the last good one
    Ready { stale_error: Option<String> },
}

/// In-memory state of the movie list screen.
///
/// Owns the injected [`MovieStore`]. Every mutation goes to storage and is
/// followed by a full reload, so `movies()` always mirrors the table after
/// a write.
pub struct MovieList {
    store: MovieStore,
    movies: Vec<Movie>,
    loading: bool,
    loaded_once: bool,
    error: Option<String>,
    query: ViewQuery,
    import_in_progress: bool,
    selected: Option<Movie>,
    pending: Option<PendingAction>,
}

impl MovieList {
    pub fn new(store: MovieStore) -> Self {
        Self {
            store,
            movies: Vec::new(),
            loading: false,
            loaded_once: false,
            error: None,
            query: ViewQuery::default(),
            import_in_progress: false,
            selected: None,
            pending: None,
        }
    }

    /// Hand the store back, e.g. to close it on shutdown
    pub fn into_store(self) -> MovieStore {
        self.store
    }

    /// Full unfiltered list in storage order (newest first)
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn find(&self, id: i64) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_importing(&self) -> bool {
        self.import_in_progress
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    pub fn set_filter(&mut self, filter: WatchedFilter) {
        self.query.filter = filter;
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.query.sort = sort;
    }

    /// Filtered and sorted projection, recomputed on every call
    pub fn visible(&self) -> Vec<&Movie> {
        derive_view(&self.movies, &self.query)
    }

    pub fn status(&self) -> ListStatus {
        if self.loading {
            return ListStatus::Loading;
        }
        if !self.loaded_once {
            return match &self.error {
                Some(e) => ListStatus::FailedFirstLoad(e.clone()),
                None => ListStatus::Loading,
            };
        }
        if self.movies.is_empty() {
            return ListStatus::Empty;
        }
        ListStatus::Ready {
            stale_error: self.error.clone(),
        }
    }

    /// Re-read the whole table. On failure the previous list is kept and
    /// the message is recorded in `error()`.
    pub fn reload(&mut self) -> Result<(), ActionError> {
        self.loading = true;
        let result = self.store.get_all();
        self.loading = false;

        match result {
            Ok(movies) => {
                debug!("Loaded {} movies", movies.len());
                self.movies = movies;
                self.error = None;
                self.loaded_once = true;
                Ok(())
            }
            Err(e) => {
                let err = ActionError::store(Action::Load, e);
                warn!("{}", err);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Reload after a successful write. A failed reload is already recorded
    /// in `error()` and does not turn the write into a failure.
    fn refresh(&mut self) {
        if self.reload().is_err() {
            debug!("Keeping previous list after failed reload");
        }
    }

    pub fn add_movie(&mut self, draft: &MovieDraft) -> Result<Notice, ActionError> {
        let id = self
            .store
            .insert(&draft.title, draft.year, draft.rating)
            .map_err(|e| ActionError::store(Action::Add, e))?;
        info!(id, title = %draft.title, "Added movie");

        self.refresh();
        Ok(Notice::success("Added", format!("Added \"{}\"", draft.title)))
    }

    /// Validate the add form and insert. The form is cleared only on success.
    pub fn submit_add(&mut self, form: &mut MovieForm) -> Result<Notice, SubmitError> {
        let draft = form.validate(current_year()).map_err(SubmitError::Invalid)?;
        let notice = self.add_movie(&draft)?;
        form.clear();
        Ok(notice)
    }

    pub fn select_for_edit(&mut self, movie: &Movie) {
        self.selected = Some(movie.clone());
    }

    pub fn selected(&self) -> Option<&Movie> {
        self.selected.as_ref()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn update_movie(&mut self, movie: &Movie, draft: &MovieDraft) -> Result<Notice, ActionError> {
        self.store
            .update(movie.id, &draft.title, draft.year, draft.rating)
            .map_err(|e| ActionError::store(Action::Update, e))?;
        info!(id = movie.id, title = %draft.title, "Updated movie");

        self.refresh();
        self.selected = None;
        Ok(Notice::success("Updated", format!("Updated \"{}\"", draft.title)))
    }

    /// Validate the edit form and update. The form keeps its values either way.
    pub fn submit_edit(&mut self, movie: &Movie, form: &MovieForm) -> Result<Notice, SubmitError> {
        let draft = form.validate(current_year()).map_err(SubmitError::Invalid)?;
        Ok(self.update_movie(movie, &draft)?)
    }

    /// Ask before flipping the watched flag; returns the question to show
    pub fn request_toggle_watched(&mut self, movie: &Movie) -> String {
        self.request(PendingAction::ToggleWatched(movie.clone()))
    }

    /// Ask before deleting; returns the question to show
    pub fn request_delete(&mut self, movie: &Movie) -> String {
        self.request(PendingAction::Delete(movie.clone()))
    }

    fn request(&mut self, action: PendingAction) -> String {
        let prompt = action.prompt();
        if let Some(previous) = self.pending.replace(action) {
            debug!("Replacing unanswered confirmation for \"{}\"", previous.movie().title);
        }
        prompt
    }

    /// Discard the pending action without touching storage
    pub fn cancel(&mut self) -> Option<PendingAction> {
        self.pending.take()
    }

    /// Run the pending action. Returns `None` when nothing was pending.
    pub fn confirm(&mut self) -> Option<Result<Notice, ActionError>> {
        let action = self.pending.take()?;
        Some(match action {
            PendingAction::ToggleWatched(movie) => self.toggle_watched(&movie),
            PendingAction::Delete(movie) => self.delete_movie(&movie),
        })
    }

    fn toggle_watched(&mut self, movie: &Movie) -> Result<Notice, ActionError> {
        let watched = self
            .store
            .toggle_watched(movie.id)
            .map_err(|e| ActionError::store(Action::Toggle, e))?;
        info!(id = movie.id, watched, "Toggled watched");

        self.refresh();
        let state = if watched { "watched" } else { "unwatched" };
        Ok(Notice::success("Updated", format!("Marked \"{}\" as {}", movie.title, state)))
    }

    fn delete_movie(&mut self, movie: &Movie) -> Result<Notice, ActionError> {
        self.store
            .delete(movie.id)
            .map_err(|e| ActionError::store(Action::Delete, e))?;
        info!(id = movie.id, title = %movie.title, "Deleted movie");

        if self.selected.as_ref().is_some_and(|s| s.id == movie.id) {
            self.selected = None;
        }
        self.refresh();
        Ok(Notice::success("Deleted", format!("Deleted \"{}\"", movie.title)))
    }

    /// Pull a catalog and insert every entry whose `(title, year)` is new.
    ///
    /// The list is reloaded at the end whether or not anything was inserted,
    /// and also after a storage failure part-way through the batch.
    pub async fn import_from(&mut self, catalog: &dyn MovieCatalog) -> Result<ImportReport, ActionError> {
        self.import_in_progress = true;
        let result = self.run_import(catalog).await;
        self.import_in_progress = false;
        result
    }

    async fn run_import(&mut self, catalog: &dyn MovieCatalog) -> Result<ImportReport, ActionError> {
        let remote = catalog.fetch_movies().await?;

        let mut report = ImportReport {
            catalog: catalog.name().to_string(),
            fetched: remote.len(),
            ..ImportReport::default()
        };

        let mut seen = self
            .store
            .dedup_keys()
            .map_err(|e| ActionError::store(Action::Import, e))?;
        let inserted = insert_new(&self.store, &remote, &mut seen, &mut report);

        self.refresh();

        inserted.map_err(|e| ActionError::store(Action::Import, e))?;
        info!(
            catalog = %report.catalog,
            fetched = report.fetched,
            inserted = report.inserted,
            duplicates = report.skipped_duplicates,
            untitled = report.skipped_untitled,
            "Import finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use async_trait::async_trait;
    use watchlist_models::RemoteMovie;
    use watchlist_store::StoreError;

    struct FixedCatalog(Vec<RemoteMovie>);

    #[async_trait]
    impl MovieCatalog for FixedCatalog {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn fetch_movies(&self) -> Result<Vec<RemoteMovie>, CatalogError> {
            Ok(self.0.clone())
        }
    }

    struct FailingCatalog;

    #[async_trait]
    impl MovieCatalog for FailingCatalog {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch_movies(&self) -> Result<Vec<RemoteMovie>, CatalogError> {
            Err(CatalogError::ImportFetchFailed {
                url: "https://example.com/movies".to_string(),
                reason: "HTTP 500 Internal Server Error".to_string(),
            })
        }
    }

    fn loaded_list() -> MovieList {
        let mut list = MovieList::new(MovieStore::open_in_memory().unwrap());
        list.reload().unwrap();
        list
    }

    fn add(list: &mut MovieList, title: &str, year: Option<i32>, rating: Option<i32>) -> Movie {
        list.add_movie(&MovieDraft::new(title, year, rating)).unwrap();
        list.movies().iter().find(|m| m.title == title).unwrap().clone()
    }

    #[test]
    fn test_status_before_and_after_first_load() {
        let mut list = MovieList::new(MovieStore::open_in_memory().unwrap());
        assert_eq!(list.status(), ListStatus::Loading);

        list.reload().unwrap();
        assert!(!list.is_loading());
        assert_eq!(list.status(), ListStatus::Empty);
    }

    #[test]
    fn test_first_load_failure() {
        // Store never initialized
        let mut list = MovieList::new(MovieStore::in_memory());
        let err = list.reload().unwrap_err();
        assert_eq!(err.action(), Action::Load);
        assert!(!list.is_loading());
        assert!(matches!(list.status(), ListStatus::FailedFirstLoad(_)));
    }

    #[test]
    fn test_failed_reload_keeps_last_list() {
        let mut list = loaded_list();
        add(&mut list, "Up", Some(2009), Some(4));

        list.store.close().unwrap();
        assert!(list.reload().is_err());
        assert!(!list.is_loading());
        assert_eq!(list.movies().len(), 1);
        assert!(matches!(list.status(), ListStatus::Ready { stale_error: Some(_) }));
    }

    #[test]
    fn test_add_reloads_from_storage() {
        let mut list = loaded_list();
        let notice = list.add_movie(&MovieDraft::new("Arrival", Some(2016), Some(5))).unwrap();

        assert_eq!(notice.message, "Added \"Arrival\"");
        assert_eq!(list.movies().len(), 1);
        let movie = &list.movies()[0];
        assert_eq!(movie.title, "Arrival");
        assert!(!movie.watched);
        assert!(movie.created_at > 0);
    }

    #[test]
    fn test_submit_add_clears_form_only_on_success() {
        let mut list = loaded_list();

        let mut invalid = MovieForm::new("", "1800", "");
        let err = list.submit_add(&mut invalid).unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(ref e) if e.title.is_some() && e.year.is_some()));
        assert_eq!(invalid, MovieForm::new("", "1800", ""));
        assert!(list.movies().is_empty());

        let mut valid = MovieForm::new("Heat", "1995", "5");
        list.submit_add(&mut valid).unwrap();
        assert_eq!(valid, MovieForm::default());
        assert_eq!(list.movies().len(), 1);
    }

    #[test]
    fn test_update_clears_selection() {
        let mut list = loaded_list();
        let movie = add(&mut list, "Dun", Some(2020), None);

        list.select_for_edit(&movie);
        assert_eq!(list.selected().map(|m| m.id), Some(movie.id));

        list.update_movie(&movie, &MovieDraft::new("Dune", Some(2021), Some(4))).unwrap();
        assert!(list.selected().is_none());

        let updated = list.find(movie.id).unwrap();
        assert_eq!(updated.title, "Dune");
        assert_eq!(updated.created_at, movie.created_at);
    }

    #[test]
    fn test_submit_edit_failure_keeps_form_and_selection() {
        let mut list = loaded_list();
        let movie = add(&mut list, "Heat", Some(1995), None);
        list.select_for_edit(&movie);

        let form = MovieForm::new("Heat", "1995", "9");
        assert!(matches!(list.submit_edit(&movie, &form), Err(SubmitError::Invalid(_))));
        assert_eq!(form.rating, "9");
        assert!(list.selected().is_some());

        let ghost = Movie { id: 999, ..movie.clone() };
        let err = list.submit_edit(&ghost, &MovieForm::new("Ghost", "", "")).unwrap_err();
        assert!(matches!(err, SubmitError::Action(ref e) if e.is_not_found()));
        assert!(list.selected().is_some());
    }

    #[test]
    fn test_toggle_requires_confirmation() {
        let mut list = loaded_list();
        let movie = add(&mut list, "Up", None, None);

        let prompt = list.request_toggle_watched(&movie);
        assert_eq!(prompt, "Mark \"Up\" as watched?");
        assert!(!list.find(movie.id).unwrap().watched);

        let notice = list.confirm().unwrap().unwrap();
        assert_eq!(notice.message, "Marked \"Up\" as watched");
        assert!(list.find(movie.id).unwrap().watched);
        assert!(list.pending.is_none());
    }

    #[test]
    fn test_cancel_is_a_no_op() {
        let mut list = loaded_list();
        let movie = add(&mut list, "Up", None, None);

        list.request_delete(&movie);
        let cancelled = list.cancel().unwrap();
        assert_eq!(cancelled, PendingAction::Delete(movie.clone()));
        assert!(list.confirm().is_none());
        assert!(list.find(movie.id).is_some());
    }

    #[test]
    fn test_new_request_replaces_pending() {
        let mut list = loaded_list();
        let up = add(&mut list, "Up", None, None);
        let down = add(&mut list, "Down", None, None);

        list.request_delete(&up);
        list.request_toggle_watched(&down);
        list.confirm().unwrap().unwrap();

        assert!(list.find(up.id).is_some());
        assert!(list.find(down.id).unwrap().watched);
    }

    #[test]
    fn test_confirmed_delete_removes_row() {
        let mut list = loaded_list();
        let movie = add(&mut list, "Up", None, None);
        list.select_for_edit(&movie);

        list.request_delete(&movie);
        list.confirm().unwrap().unwrap();

        assert!(list.movies().is_empty());
        assert!(list.selected().is_none());

        // Deleting again surfaces NotFound
        list.request_delete(&movie);
        let err = list.confirm().unwrap().unwrap_err();
        assert!(matches!(err, ActionError::Store { source: StoreError::NotFound { .. }, .. }));
    }

    #[test]
    fn test_visible_uses_query() {
        let mut list = loaded_list();
        let up = add(&mut list, "Up", None, Some(3));
        add(&mut list, "Down", None, Some(5));
        list.request_toggle_watched(&up);
        list.confirm().unwrap().unwrap();

        list.set_filter(WatchedFilter::Watched);
        let visible: Vec<&str> = list.visible().iter().map(|m| m.title.as_str()).collect();
        assert_eq!(visible, vec!["Up"]);

        list.set_filter(WatchedFilter::All);
        list.set_sort(SortOption::Rating);
        let visible: Vec<&str> = list.visible().iter().map(|m| m.title.as_str()).collect();
        assert_eq!(visible, vec!["Down", "Up"]);

        list.set_search("DO");
        let visible: Vec<&str> = list.visible().iter().map(|m| m.title.as_str()).collect();
        assert_eq!(visible, vec!["Down"]);
        assert_eq!(list.movies().len(), 2);
    }

    #[tokio::test]
    async fn test_import_dedup() {
        let mut list = loaded_list();
        add(&mut list, "Dune", Some(2021), None);

        let catalog = FixedCatalog(vec![
            RemoteMovie::new("Dune", Some(2021), Some(4)),
            RemoteMovie::new("Dune", Some(2021), Some(4)),
            RemoteMovie::new("Arrival", Some(2016), Some(5)),
        ]);
        let report = list.import_from(&catalog).await.unwrap();

        assert_eq!(report.inserted, 1);
        assert_eq!(report.fetched, 3);
        assert!(!list.is_importing());
        assert_eq!(list.movies().len(), 2);
        assert!(list.movies().iter().any(|m| m.title == "Arrival"));
        assert_eq!(report.notice().message, "Imported 1 new movies from fixed");
    }

    #[tokio::test]
    async fn test_import_nothing_new_still_reloads() {
        let mut list = loaded_list();
        add(&mut list, "Dune", Some(2021), None);

        let report = list
            .import_from(&FixedCatalog(vec![RemoteMovie::new("Dune", Some(2021), None)]))
            .await
            .unwrap();
        assert_eq!(report.inserted, 0);
        assert_eq!(report.notice().title, "Nothing to import");
        assert_eq!(list.status(), ListStatus::Ready { stale_error: None });
    }

    #[tokio::test]
    async fn test_import_fetch_failure() {
        let mut list = loaded_list();
        let err = list.import_from(&FailingCatalog).await.unwrap_err();

        assert!(matches!(err, ActionError::Catalog { source: CatalogError::ImportFetchFailed { .. } }));
        assert!(!list.is_importing());
        assert!(list.movies().is_empty());
    }

    #[tokio::test]
    async fn test_import_suggestions_twice() {
        let mut list = loaded_list();
        let first = list.import_from(&crate::catalog::SuggestedCatalog).await.unwrap();
        let second = list.import_from(&crate::catalog::SuggestedCatalog).await.unwrap();

        assert_eq!(first.inserted, watchlist_store::SUGGESTED_MOVIES.len());
        assert_eq!(second.inserted, 0);
        assert_eq!(list.movies().len(), watchlist_store::SUGGESTED_MOVIES.len());
    }
}
