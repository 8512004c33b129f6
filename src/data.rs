use crate::error::RegistrationResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod member;
pub mod postgres_store;
#[cfg(test)]
pub mod recording_store;

pub use member::MemberForm;

pub type TeamId = i64;

/// The remote side of a registration: looks up teams and writes rows into `teams` and `members`.
#[async_trait]
pub trait RegistrationStore: Send + Sync + std::fmt::Debug {
    /// Exact-match lookup of a team by name.
    async fn find_team_by_name(&self, team_name: &str) -> RegistrationResult<Option<TeamId>>;

    /// Writes one member row with no team reference.
    async fn insert_solo_member(&self, member: &MemberForm) -> RegistrationResult<()>;

    /// Creates the team row, then writes every member in one batch tagged with the new id.
    ///
    /// Fails with [`DuplicateTeamName`](crate::error::RegistrationError::DuplicateTeamName) if
    /// the backend refuses the name, [`CreateTeam`](crate::error::RegistrationError::CreateTeam)
    /// if the team row could not be written and [`InsertMembers`](crate::error::RegistrationError::InsertMembers)
    /// if the member batch was refused.
    async fn register_team(
        &self,
        team_name: &str,
        members: &[MemberForm],
    ) -> RegistrationResult<TeamId>;

    async fn health_check(&self) -> RegistrationResult<()>;
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationMode {
    Solo,
    Team,
}
