//! Membership page controller

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::api::PerpusClient;
use crate::error::ClientResult;
use crate::models::{
    Member, MemberFilter, MemberStats, MemberStatus, NewMemberRequest, UpdateMemberRequest,
};

/// Quiet period applied to search keystrokes before dispatching a request
const SEARCH_QUIET_PERIOD: Duration = Duration::from_millis(300);

#[derive(Default)]
struct MembersView {
    members: Vec<Member>,
    stats: Option<MemberStats>,
    filter: MemberFilter,
}

/// Drives the membership view: member list, aggregate stats, CRUD with
/// reload-to-reconcile, and debounced search.
///
/// A new keystroke cancels the pending search task, so a superseded search
/// never dispatches and its response is never observed.
pub struct MembersController {
    client: PerpusClient,
    state: Arc<Mutex<MembersView>>,
    quiet_period: Duration,
    pending_search: Option<JoinHandle<()>>,
}

impl MembersController {
    pub fn new(client: PerpusClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(MembersView::default())),
            quiet_period: SEARCH_QUIET_PERIOD,
            pending_search: None,
        }
    }

    /// Override the debounce quiet period (tests shrink it).
    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    /// Snapshot of the current member list.
    pub fn members(&self) -> Vec<Member> {
        self.state.lock().members.clone()
    }

    /// Last fetched aggregate stats, if any.
    pub fn stats(&self) -> Option<MemberStats> {
        self.state.lock().stats.clone()
    }

    /// Fetch the authoritative member list using the current filter.
    pub async fn reload(&self) -> ClientResult<()> {
        let filter = self.state.lock().filter.clone();
        let members = self.client.list_members(&filter).await?;
        self.state.lock().members = members;
        Ok(())
    }

    /// Refresh the aggregate counts.
    pub async fn refresh_stats(&self) -> ClientResult<()> {
        let stats = self.client.member_stats().await?;
        self.state.lock().stats = Some(stats);
        Ok(())
    }

    /// Switch the status filter and reload immediately; filter buttons are
    /// discrete actions, not keystrokes, so no debounce applies.
    pub async fn filter_by_status(&self, status: Option<MemberStatus>) -> ClientResult<()> {
        self.state.lock().filter.status = status;
        self.reload().await
    }

    /// Record a search keystroke and (re)arm the debounce timer.
    ///
    /// The request dispatches only after the quiet period elapses with no
    /// newer keystroke; until then nothing is sent.
    pub fn search(&mut self, term: &str) {
        if let Some(pending) = self.pending_search.take() {
            pending.abort();
        }
        self.state.lock().filter.search = Some(term.to_string());

        let client = self.client.clone();
        let state = Arc::clone(&self.state);
        let quiet_period = self.quiet_period;
        self.pending_search = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            let filter = state.lock().filter.clone();
            match client.list_members(&filter).await {
                Ok(members) => state.lock().members = members,
                Err(e) => tracing::warn!("debounced member search failed: {}", e),
            }
        }));
    }

    /// Create a member, then reconcile the list and stats from the server.
    pub async fn create(&self, member: &NewMemberRequest) -> ClientResult<Member> {
        let created = self.client.create_member(member).await?;
        self.reload().await?;
        self.refresh_stats().await?;
        Ok(created)
    }

    /// Update a member, then reconcile from the server.
    pub async fn update(
        &self,
        member_id: i64,
        member: &UpdateMemberRequest,
    ) -> ClientResult<Member> {
        let updated = self.client.update_member(member_id, member).await?;
        self.reload().await?;
        self.refresh_stats().await?;
        Ok(updated)
    }

    /// Delete a member, then reconcile from the server.
    pub async fn delete(&self, member_id: i64) -> ClientResult<()> {
        self.client.delete_member(member_id).await?;
        self.reload().await?;
        self.refresh_stats().await?;
        Ok(())
    }
}

impl Drop for MembersController {
    fn drop(&mut self) {
        if let Some(pending) = self.pending_search.take() {
            pending.abort();
        }
    }
}
