//! Member management operations

use reqwest::Method;
use validator::Validate;

use super::PerpusClient;
use crate::error::ClientResult;
use crate::models::{Member, MemberFilter, MemberStats, NewMemberRequest, UpdateMemberRequest};

impl PerpusClient {
    /// List members, optionally filtered by status or search term.
    pub async fn list_members(&self, filter: &MemberFilter) -> ClientResult<Vec<Member>> {
        let request = self
            .request(Method::GET, "/api/members")
            .query(&filter.query());
        let response = self.dispatch(request).await?;
        self.normalize(response).await
    }

    /// Fetch a single member by id.
    pub async fn get_member(&self, member_id: i64) -> ClientResult<Member> {
        let request = self.request(Method::GET, &format!("/api/members/{}", member_id));
        let response = self.dispatch(request).await?;
        self.normalize(response).await
    }

    /// Create a member. Fields are validated client-side first; no request is
    /// sent when validation fails. Writes update no local cache; callers
    /// trigger the read-reload.
    pub async fn create_member(&self, member: &NewMemberRequest) -> ClientResult<Member> {
        member.validate()?;
        let request = self.request(Method::POST, "/api/members").json(member);
        let response = self.dispatch(request).await?;
        self.normalize(response).await
    }

    /// Partially update a member; only fields present in the request are sent.
    pub async fn update_member(
        &self,
        member_id: i64,
        member: &UpdateMemberRequest,
    ) -> ClientResult<Member> {
        member.validate()?;
        let request = self
            .request(Method::PUT, &format!("/api/members/{}", member_id))
            .json(member);
        let response = self.dispatch(request).await?;
        self.normalize(response).await
    }

    /// Delete a member.
    pub async fn delete_member(&self, member_id: i64) -> ClientResult<()> {
        let request = self.request(Method::DELETE, &format!("/api/members/{}", member_id));
        let response = self.dispatch(request).await?;
        self.check_status(response).await?;
        Ok(())
    }

    /// Aggregate membership counts for the dashboard.
    pub async fn member_stats(&self) -> ClientResult<MemberStats> {
        let request = self.request(Method::GET, "/api/members/stats/summary");
        let response = self.dispatch(request).await?;
        self.normalize(response).await
    }
}
