//! Optimistic update controller and command dispatcher.
//!
//! Every mutation flows through [`BoardController::dispatch`]: the
//! dispatcher checks preconditions centrally (write capability, ownership,
//! validation) and rejects illegal commands before any state is touched.
//! Legal mutations are applied to the local store synchronously, then
//! submitted to the remote store. A failed persistence call discards the
//! optimistic state by reloading everything; there is no fine-grained
//! rollback and no automatic retry.

use jiff::civil::Date;
use tracing::{debug, warn};

use crate::board::columns::{Column, column_index};
use crate::board::filter::FilterContext;
use crate::board::reorder::{self, DropPosition, MovePlan};
use crate::board::review;
use crate::error::{BoardError, Result};
use crate::remote::{IssueDraft, IssueStore, IssueUpdates};
use crate::store::WorkItemStore;
use crate::types::{BucketId, IssueId, StatusId, UserId};

/// Where the controller stands relative to the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerPhase {
    #[default]
    Idle,
    /// A mutation has been applied locally and its persistence call is in
    /// flight.
    Applying,
    /// Local state is being discarded and re-fetched.
    Reconciling,
}

/// A user-initiated mutation.
#[derive(Debug, Clone)]
pub enum BoardCommand {
    CreateIssue(IssueDraft),
    EditIssue {
        id: IssueId,
        updates: IssueUpdates,
    },
    /// Drag-and-drop move onto a column.
    MoveIssue {
        id: IssueId,
        dest: StatusId,
        drop: DropPosition,
    },
    /// Status change via a selection control; appends to the destination
    /// and resets the roadmap bucket.
    ChangeStatus {
        id: IssueId,
        dest: StatusId,
    },
    RequestReview {
        id: IssueId,
    },
    RejectReview {
        id: IssueId,
    },
    SetRoadmapBucket {
        id: IssueId,
        bucket: Option<BucketId>,
    },
    DeleteIssue {
        id: IssueId,
    },
    /// Manual full reload, the only recovery path besides failure handling.
    Refresh,
}

pub struct BoardController<S> {
    store: WorkItemStore,
    remote: S,
    acting_user: Option<UserId>,
    can_write: bool,
    phase: ControllerPhase,
}

impl<S: IssueStore> BoardController<S> {
    pub fn new(remote: S, acting_user: Option<UserId>, can_write: bool) -> Self {
        Self {
            store: WorkItemStore::new(),
            remote,
            acting_user,
            can_write,
            phase: ControllerPhase::Idle,
        }
    }

    pub fn store(&self) -> &WorkItemStore {
        &self.store
    }

    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    pub fn acting_user(&self) -> Option<&UserId> {
        self.acting_user.as_ref()
    }

    pub fn can_write(&self) -> bool {
        self.can_write
    }

    /// Current board columns derived from the store.
    pub fn columns(&self) -> Vec<Column> {
        column_index(self.store.issues(), self.store.statuses())
    }

    /// Context for running the filter engine against this controller's
    /// snapshot.
    pub fn filter_context(&self, today: Date) -> FilterContext {
        FilterContext {
            acting_user: self.acting_user.clone(),
            today,
        }
    }

    /// Load everything from the remote store. Called once at startup.
    pub async fn init(&mut self) -> Result<()> {
        self.reload().await
    }

    pub async fn dispatch(&mut self, cmd: BoardCommand) -> Result<()> {
        debug!(command = ?cmd, "dispatching board command");
        match cmd {
            BoardCommand::CreateIssue(draft) => self.create_issue(draft).await,
            BoardCommand::EditIssue { id, updates } => self.edit_issue(id, updates).await,
            BoardCommand::MoveIssue { id, dest, drop } => self.move_issue(id, dest, drop).await,
            BoardCommand::ChangeStatus { id, dest } => self.change_status(id, dest).await,
            BoardCommand::RequestReview { id } => self.request_review(id).await,
            BoardCommand::RejectReview { id } => self.reject_review(id).await,
            BoardCommand::SetRoadmapBucket { id, bucket } => self.set_bucket(id, bucket).await,
            BoardCommand::DeleteIssue { id } => self.delete_issue(id).await,
            BoardCommand::Refresh => self.reload().await,
        }
    }

    fn require_write(&self) -> Result<()> {
        if self.can_write {
            Ok(())
        } else {
            Err(BoardError::WriteDenied)
        }
    }

    async fn create_issue(&mut self, mut draft: IssueDraft) -> Result<()> {
        self.require_write()?;
        let created_by = self.acting_user.clone().ok_or(BoardError::WriteDenied)?;
        if draft.title.trim().is_empty() {
            return Err(BoardError::EmptyTitle);
        }
        let status = match &draft.status_id {
            Some(id) => self
                .store
                .status(id)
                .ok_or_else(|| BoardError::StatusNotFound(id.clone()))?,
            None => self
                .store
                .first_status()
                .ok_or_else(|| BoardError::Store("no statuses configured".to_string()))?,
        };
        let status_id = status.id.clone();
        draft.ordering = reorder::append_ordering(self.store.issues(), &status_id);
        draft.status_id = Some(status_id);

        // Creation is the one mutation that is not applied optimistically:
        // the id is minted by the store, so the record only exists locally
        // once the canonical row comes back.
        self.phase = ControllerPhase::Applying;
        match self.remote.create_issue(draft, &created_by).await {
            Ok(issue) => {
                self.store.upsert_issue(issue);
                self.phase = ControllerPhase::Idle;
                Ok(())
            }
            Err(err) => self.recover(err).await,
        }
    }

    async fn edit_issue(&mut self, id: IssueId, updates: IssueUpdates) -> Result<()> {
        self.require_write()?;
        if updates.is_empty() {
            return Ok(());
        }
        if let Some(title) = &updates.title
            && title.trim().is_empty()
        {
            return Err(BoardError::EmptyTitle);
        }
        // Review flags only move through RequestReview/RejectReview, which
        // enforce the rejected-implies-ready invariant. A raw edit could
        // set the flags into a state the review commands never produce.
        if updates.ready_for_review.is_some() || updates.review_rejected.is_some() {
            return Err(BoardError::ReviewFlagsNotEditable);
        }
        let mut local = self
            .store
            .issue(&id)
            .cloned()
            .ok_or_else(|| BoardError::IssueNotFound(id.clone()))?;
        updates.apply_to(&mut local);
        self.store.upsert_issue(local);

        self.phase = ControllerPhase::Applying;
        match self.remote.update_issue(&id, updates).await {
            Ok(canonical) => {
                self.store.upsert_issue(canonical);
                self.phase = ControllerPhase::Idle;
                Ok(())
            }
            Err(err) => self.recover(err).await,
        }
    }

    async fn move_issue(&mut self, id: IssueId, dest: StatusId, drop: DropPosition) -> Result<()> {
        self.require_write()?;
        if self.store.status(&dest).is_none() {
            return Err(BoardError::StatusNotFound(dest));
        }
        let plan = reorder::move_issue(self.store.issues(), &id, &dest, drop)?;
        self.persist_move(plan).await
    }

    async fn change_status(&mut self, id: IssueId, dest: StatusId) -> Result<()> {
        self.require_write()?;
        if self.store.status(&dest).is_none() {
            return Err(BoardError::StatusNotFound(dest));
        }
        let plan = reorder::change_status(self.store.issues(), &id, &dest)?;
        self.persist_move(plan).await
    }

    /// Apply a move plan locally, then persist the ordering batch and the
    /// follow-up field reset it implies.
    async fn persist_move(&mut self, plan: MovePlan) -> Result<()> {
        let MovePlan::Move {
            issue,
            entries,
            clear_review,
            reset_bucket,
        } = plan
        else {
            return Ok(());
        };

        self.store.apply_ordering(&entries);
        if let Some(moved) = self.store.issue_mut(&issue) {
            if clear_review {
                review::clear_review(moved);
            }
            if reset_bucket {
                moved.roadmap_bucket = None;
            }
        }

        self.phase = ControllerPhase::Applying;
        if let Err(err) = self.remote.apply_ordering(&entries).await {
            return self.recover(err).await;
        }

        let mut updates = IssueUpdates::default();
        if clear_review {
            updates = IssueUpdates::clear_review();
        }
        if reset_bucket {
            updates.roadmap_bucket = Some(None);
        }
        if !updates.is_empty() {
            match self.remote.update_issue(&issue, updates).await {
                Ok(canonical) => self.store.upsert_issue(canonical),
                Err(err) => return self.recover(err).await,
            }
        }
        self.phase = ControllerPhase::Idle;
        Ok(())
    }

    async fn request_review(&mut self, id: IssueId) -> Result<()> {
        let user = self.acting_user.clone().ok_or(BoardError::NotOwner)?;
        let issue = self
            .store
            .issue(&id)
            .ok_or_else(|| BoardError::IssueNotFound(id.clone()))?;
        if !issue.is_owned_by(&user) {
            return Err(BoardError::NotOwner);
        }
        if review::is_closed_and_clean(issue, self.store.statuses()) {
            return Err(BoardError::IssueClosed);
        }
        if let Some(issue) = self.store.issue_mut(&id) {
            review::request_review(issue);
        }

        let updates = IssueUpdates {
            ready_for_review: Some(true),
            review_rejected: Some(false),
            ..Default::default()
        };
        self.persist_update(id, updates).await
    }

    async fn reject_review(&mut self, id: IssueId) -> Result<()> {
        self.require_write()?;
        let issue = self
            .store
            .issue(&id)
            .ok_or_else(|| BoardError::IssueNotFound(id.clone()))?;
        if !review::can_reject_review(issue, self.can_write) {
            return Err(BoardError::ReviewNotPending);
        }
        if let Some(issue) = self.store.issue_mut(&id) {
            review::reject_review(issue);
        }

        let updates = IssueUpdates {
            review_rejected: Some(true),
            ..Default::default()
        };
        self.persist_update(id, updates).await
    }

    async fn set_bucket(&mut self, id: IssueId, bucket: Option<BucketId>) -> Result<()> {
        self.require_write()?;
        if let Some(bucket_id) = &bucket
            && !self.store.buckets().iter().any(|b| &b.id == bucket_id)
        {
            return Err(BoardError::BucketNotFound(bucket_id.clone()));
        }
        let issue = self
            .store
            .issue_mut(&id)
            .ok_or_else(|| BoardError::IssueNotFound(id.clone()))?;
        issue.roadmap_bucket = bucket.clone();

        let updates = IssueUpdates {
            roadmap_bucket: Some(bucket),
            ..Default::default()
        };
        self.persist_update(id, updates).await
    }

    async fn delete_issue(&mut self, id: IssueId) -> Result<()> {
        self.require_write()?;
        let removed = self
            .store
            .remove_issue(&id)
            .ok_or_else(|| BoardError::IssueNotFound(id.clone()))?;
        // Close the gap the deletion left in its column.
        let renumber = removed
            .status_id
            .as_ref()
            .map(|status| reorder::renumber_column(self.store.issues(), status))
            .unwrap_or_default();
        self.store.apply_ordering(&renumber);

        self.phase = ControllerPhase::Applying;
        if let Err(err) = self.remote.delete_issue(&id).await {
            return self.recover(err).await;
        }
        if !renumber.is_empty()
            && let Err(err) = self.remote.apply_ordering(&renumber).await
        {
            return self.recover(err).await;
        }
        self.phase = ControllerPhase::Idle;
        Ok(())
    }

    /// Optimistic state is already in the store; submit the update and
    /// reconcile with the canonical record or reload on failure.
    async fn persist_update(&mut self, id: IssueId, updates: IssueUpdates) -> Result<()> {
        self.phase = ControllerPhase::Applying;
        match self.remote.update_issue(&id, updates).await {
            Ok(canonical) => {
                self.store.upsert_issue(canonical);
                self.phase = ControllerPhase::Idle;
                Ok(())
            }
            Err(err) => self.recover(err).await,
        }
    }

    /// Reload everything from the remote store.
    pub async fn reload(&mut self) -> Result<()> {
        self.phase = ControllerPhase::Reconciling;
        let result = self.fetch_all().await;
        self.phase = ControllerPhase::Idle;
        result
    }

    async fn fetch_all(&mut self) -> Result<()> {
        let statuses = self.remote.list_statuses().await?;
        let buckets = self.remote.list_buckets().await?;
        let issues = self.remote.list_issues().await?;
        let owners = self.remote.list_owners().await?;
        debug!(
            issues = issues.len(),
            statuses = statuses.len(),
            "loaded board state from remote store"
        );
        self.store.replace_all(issues, statuses, buckets, owners);
        Ok(())
    }

    /// Discard optimistic local state after a failed persistence call and
    /// surface the original error. A failed reload is logged but does not
    /// mask the error that got us here.
    async fn recover(&mut self, err: BoardError) -> Result<()> {
        warn!(error = %err, "persistence call failed, discarding local state");
        self.phase = ControllerPhase::Reconciling;
        if let Err(reload_err) = self.fetch_all().await {
            warn!(error = %reload_err, "reload after failed mutation also failed");
        }
        self.phase = ControllerPhase::Idle;
        Err(err)
    }
}
