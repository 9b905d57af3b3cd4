//! The dashboard state machine.
//!
//! All UI state lives in one explicit [`Dashboard`] struct: collection,
//! selection, the two form buffers, filter state, and busy/feedback flags.
//! Front ends dispatch user actions as method calls and re-render from the
//! fields afterward; no ambient mutable state anywhere.
//!
//! Destructive actions consult an injected [`Confirm`] capability instead of
//! prompting directly, so the whole machine is testable without a terminal.

use std::sync::Arc;

use crate::api::{ApiError, TutorialApi};
use crate::model::{Tutorial, TutorialDraft};

pub const CREATE_TITLE_REQUIRED: &str = "A title is required to create a tutorial.";
pub const UPDATE_TITLE_REQUIRED: &str = "A title is required to update a tutorial.";

pub const CONFIRM_DELETE: &str = "Delete this tutorial? This cannot be undone.";
pub const CONFIRM_DELETE_ALL: &str =
    "Delete every tutorial in the database? This action is permanent.";

pub const STATUS_CREATED: &str = "Tutorial created successfully.";
pub const STATUS_UPDATED: &str = "Tutorial updated.";
pub const STATUS_DELETED: &str = "Tutorial deleted.";
pub const STATUS_ALL_DELETED: &str = "All tutorials were deleted.";

/// Yes/no capability for destructive actions. The TUI answers it through a
/// modal; tests answer it with [`Answer`].
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Canned confirmation answer.
pub struct Answer(pub bool);

impl Confirm for Answer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Names the mutating action currently in flight. At most one at a time; the
/// view disables the matching control while set. Advisory only — it gates
/// affordances, it is not a lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Create,
    Update,
    Delete,
    DeleteAll,
}

/// Dashboard state plus its transition methods. Every mutating action awaits
/// its request *and* the follow-up reload before clearing `pending`, so
/// observers never see the flag cleared with the effect unapplied.
pub struct Dashboard {
    api: Arc<dyn TutorialApi>,

    /// Full server snapshot from the last successful load.
    pub tutorials: Vec<Tutorial>,
    /// At most one id referencing an entry in `tutorials`.
    pub selected_id: Option<i64>,
    pub create_form: TutorialDraft,
    pub edit_form: TutorialDraft,

    /// Live search input.
    pub search_term: String,
    /// Committed filter actually sent to the backend.
    pub applied_search: String,
    pub show_published_only: bool,

    /// Load in flight; gates refresh/search controls.
    pub loading: bool,
    pub pending: Option<PendingAction>,

    /// Last-write-wins feedback strings.
    pub error: Option<String>,
    pub status: Option<String>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn TutorialApi>) -> Self {
        Self {
            api,
            tutorials: Vec::new(),
            selected_id: None,
            create_form: TutorialDraft::default(),
            edit_form: TutorialDraft::default(),
            search_term: String::new(),
            applied_search: String::new(),
            show_published_only: false,
            loading: false,
            pending: None,
            error: None,
            status: None,
        }
    }

    // ------------------------------------------------------------------
    // Loading and filters
    // ------------------------------------------------------------------

    /// Replaces the collection from the backend using current filters. On
    /// failure the previous collection is kept and the error surfaced.
    pub async fn load(&mut self) {
        self.loading = true;
        let api = Arc::clone(&self.api);
        let result = if self.show_published_only {
            api.list_published().await
        } else {
            let filter = self.applied_search.trim().to_string();
            let filter = (!filter.is_empty()).then_some(filter);
            api.list(filter.as_deref()).await
        };
        match result {
            Ok(items) => {
                self.tutorials = items;
                self.error = None;
            }
            Err(err) => self.fail(&err),
        }
        self.loading = false;
        self.sync_selection();
    }

    /// Re-runs the load with current filters.
    pub async fn refresh(&mut self) {
        self.load().await;
    }

    /// Commits the trimmed live input as the applied filter and reloads.
    /// Ignored while published-only is active (search is disabled then).
    pub async fn submit_search(&mut self) {
        if self.show_published_only {
            return;
        }
        self.applied_search = self.search_term.trim().to_string();
        self.load().await;
    }

    /// Clears both search fields, drops published-only if set, and reloads
    /// once with empty filters.
    pub async fn clear_filters(&mut self) {
        self.search_term.clear();
        self.applied_search.clear();
        if self.show_published_only {
            self.show_published_only = false;
        }
        self.load().await;
    }

    /// Flips the published-only filter and reloads.
    pub async fn set_published_only(&mut self, on: bool) {
        self.show_published_only = on;
        self.load().await;
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn select(&mut self, id: i64) {
        self.selected_id = Some(id);
        self.sync_selection();
    }

    pub fn clear_selection(&mut self) {
        self.selected_id = None;
        self.sync_selection();
    }

    pub fn selected(&self) -> Option<&Tutorial> {
        self.selected_id
            .and_then(|id| self.tutorials.iter().find(|t| t.id == id))
    }

    /// Explicit derivation step run after every transition that can change
    /// the collection or the selection: drops a selection that no longer
    /// resolves to a collection entry and keeps the edit buffer in sync with
    /// whatever is selected.
    fn sync_selection(&mut self) {
        match self.selected().cloned() {
            Some(tutorial) => self.edit_form = TutorialDraft::from_tutorial(&tutorial),
            None => {
                self.selected_id = None;
                self.edit_form = TutorialDraft::default();
            }
        }
    }

    // ------------------------------------------------------------------
    // Mutating actions
    // ------------------------------------------------------------------

    pub async fn create(&mut self) {
        if self.create_form.title.trim().is_empty() {
            self.error = Some(CREATE_TITLE_REQUIRED.to_string());
            return;
        }
        self.pending = Some(PendingAction::Create);
        let api = Arc::clone(&self.api);
        match api.create(&self.create_form.trimmed()).await {
            Ok(_) => {
                self.create_form = TutorialDraft::default();
                self.status = Some(STATUS_CREATED.to_string());
                self.error = None;
                self.load().await;
            }
            Err(err) => self.fail(&err),
        }
        self.pending = None;
    }

    pub async fn update(&mut self) {
        let Some(id) = self.selected_id else {
            return;
        };
        if self.edit_form.title.trim().is_empty() {
            self.error = Some(UPDATE_TITLE_REQUIRED.to_string());
            return;
        }
        self.pending = Some(PendingAction::Update);
        let api = Arc::clone(&self.api);
        match api.update(id, &self.edit_form.trimmed()).await {
            Ok(_) => {
                self.status = Some(STATUS_UPDATED.to_string());
                self.error = None;
                // Selection persists unless the reload removed the entry.
                self.load().await;
            }
            Err(err) => self.fail(&err),
        }
        self.pending = None;
    }

    /// Declined confirmation aborts silently with zero state change.
    pub async fn delete(&mut self, confirm: &dyn Confirm) {
        let Some(id) = self.selected_id else {
            return;
        };
        if !confirm.confirm(CONFIRM_DELETE) {
            return;
        }
        self.pending = Some(PendingAction::Delete);
        let api = Arc::clone(&self.api);
        match api.delete(id).await {
            Ok(()) => {
                self.status = Some(STATUS_DELETED.to_string());
                self.error = None;
                self.selected_id = None;
                self.edit_form = TutorialDraft::default();
                self.load().await;
            }
            // Selection retained so the user can retry.
            Err(err) => self.fail(&err),
        }
        self.pending = None;
    }

    /// No-op on an empty collection; otherwise same confirmation contract as
    /// [`Dashboard::delete`].
    pub async fn delete_all(&mut self, confirm: &dyn Confirm) {
        if self.tutorials.is_empty() {
            return;
        }
        if !confirm.confirm(CONFIRM_DELETE_ALL) {
            return;
        }
        self.pending = Some(PendingAction::DeleteAll);
        let api = Arc::clone(&self.api);
        match api.delete_all().await {
            Ok(()) => {
                self.status = Some(STATUS_ALL_DELETED.to_string());
                self.error = None;
                self.selected_id = None;
                self.edit_form = TutorialDraft::default();
                self.load().await;
            }
            Err(err) => self.fail(&err),
        }
        self.pending = None;
    }

    // ------------------------------------------------------------------
    // View helpers
    // ------------------------------------------------------------------

    pub fn is_pending(&self, action: PendingAction) -> bool {
        self.pending == Some(action)
    }

    /// Search affordances are disabled while published-only is active.
    pub fn search_enabled(&self) -> bool {
        !self.show_published_only
    }

    /// Header copy describing what the collection currently shows.
    pub fn summary_line(&self) -> String {
        let count = self.tutorials.len();
        if self.show_published_only {
            format!("Published tutorials ({count})")
        } else if !self.applied_search.is_empty() {
            format!("Results for \"{}\" ({count})", self.applied_search)
        } else {
            format!("All tutorials ({count})")
        }
    }

    fn fail(&mut self, err: &ApiError) {
        let message = err.display_message();
        tracing::warn!(%message, "api call failed");
        self.error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiResult;
    use async_trait::async_trait;

    struct NoApi;

    #[async_trait]
    impl TutorialApi for NoApi {
        async fn list(&self, _f: Option<&str>) -> ApiResult<Vec<Tutorial>> {
            Ok(Vec::new())
        }
        async fn list_published(&self) -> ApiResult<Vec<Tutorial>> {
            Ok(Vec::new())
        }
        async fn get(&self, id: i64) -> ApiResult<Tutorial> {
            Ok(Tutorial {
                id,
                title: String::new(),
                description: String::new(),
                published: false,
            })
        }
        async fn create(&self, _d: &TutorialDraft) -> ApiResult<Tutorial> {
            unreachable!("not exercised here")
        }
        async fn update(&self, _id: i64, _d: &TutorialDraft) -> ApiResult<Tutorial> {
            unreachable!("not exercised here")
        }
        async fn delete(&self, _id: i64) -> ApiResult<()> {
            unreachable!("not exercised here")
        }
        async fn delete_all(&self) -> ApiResult<()> {
            unreachable!("not exercised here")
        }
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(Arc::new(NoApi))
    }

    #[test]
    fn summary_line_reflects_filter_state() {
        let mut dash = dashboard();
        dash.tutorials = vec![Tutorial {
            id: 1,
            title: "A".to_string(),
            description: String::new(),
            published: true,
        }];
        assert_eq!(dash.summary_line(), "All tutorials (1)");

        dash.applied_search = "rust".to_string();
        assert_eq!(dash.summary_line(), "Results for \"rust\" (1)");

        dash.show_published_only = true;
        assert_eq!(dash.summary_line(), "Published tutorials (1)");
    }

    #[test]
    fn search_disabled_while_published_only() {
        let mut dash = dashboard();
        assert!(dash.search_enabled());
        dash.show_published_only = true;
        assert!(!dash.search_enabled());
    }

    #[test]
    fn canned_answer_passes_through() {
        assert!(Answer(true).confirm("?"));
        assert!(!Answer(false).confirm("?"));
    }
}
