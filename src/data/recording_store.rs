use crate::{
    data::{MemberForm, RegistrationStore, TeamId},
    error::{
        CommitTransactionSnafu, CreateTeamSnafu, InsertMembersSnafu, MakeQuerySnafu,
        RegistrationError, RegistrationResult,
    },
};
use async_trait::async_trait;
use snafu::ResultExt;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailAt {
    #[default]
    Nowhere,
    Lookup,
    TeamInsert,
    MemberInsert,
    Commit,
    /// The lookup misses but the team row hits the unique constraint.
    NameTakenOnInsert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertedMember {
    pub member: MemberForm,
    pub team_id: Option<TeamId>,
}

#[derive(Debug, Default)]
struct Recorded {
    teams: Vec<(TeamId, String)>,
    member_batches: Vec<Vec<InsertedMember>>,
    lookups: usize,
}

/// Keeps every write in memory so a test can count the calls a submission made.
#[derive(Debug)]
pub struct RecordingStore {
    next_team_id: TeamId,
    fail_at: FailAt,
    recorded: Mutex<Recorded>,
}

impl RecordingStore {
    pub fn new(next_team_id: TeamId) -> Self {
        Self {
            next_team_id,
            fail_at: FailAt::Nowhere,
            recorded: Mutex::default(),
        }
    }

    pub fn failing_at(mut self, fail_at: FailAt) -> Self {
        self.fail_at = fail_at;
        self
    }

    pub fn with_existing_team(self, id: TeamId, team_name: &str) -> Self {
        self.recorded
            .lock()
            .unwrap()
            .teams
            .push((id, team_name.to_string()));
        self
    }

    pub fn teams(&self) -> Vec<(TeamId, String)> {
        self.recorded.lock().unwrap().teams.clone()
    }

    pub fn member_batches(&self) -> Vec<Vec<InsertedMember>> {
        self.recorded.lock().unwrap().member_batches.clone()
    }

    pub fn lookups(&self) -> usize {
        self.recorded.lock().unwrap().lookups
    }

    pub fn calls(&self) -> usize {
        let recorded = self.recorded.lock().unwrap();
        recorded.lookups + recorded.teams.len() + recorded.member_batches.len()
    }
}

fn injected_failure() -> sqlx::Error {
    sqlx::Error::Protocol("injected failure".into())
}

#[async_trait]
impl RegistrationStore for RecordingStore {
    async fn find_team_by_name(&self, team_name: &str) -> RegistrationResult<Option<TeamId>> {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.lookups += 1;
        if self.fail_at == FailAt::Lookup {
            return Err(injected_failure()).context(MakeQuerySnafu);
        }

        Ok(recorded
            .teams
            .iter()
            .find(|(_, name)| name == team_name)
            .map(|(id, _)| *id))
    }

    async fn insert_solo_member(&self, member: &MemberForm) -> RegistrationResult<()> {
        if self.fail_at == FailAt::MemberInsert {
            return Err(injected_failure()).context(InsertMembersSnafu { count: 1_usize });
        }

        self.recorded
            .lock()
            .unwrap()
            .member_batches
            .push(vec![InsertedMember {
                member: member.clone(),
                team_id: None,
            }]);
        Ok(())
    }

    async fn register_team(
        &self,
        team_name: &str,
        members: &[MemberForm],
    ) -> RegistrationResult<TeamId> {
        let mut recorded = self.recorded.lock().unwrap();
        if self.fail_at == FailAt::NameTakenOnInsert
            || recorded.teams.iter().any(|(_, name)| name == team_name)
        {
            return Err(RegistrationError::DuplicateTeamName {
                team_name: team_name.to_string(),
            });
        }
        if self.fail_at == FailAt::TeamInsert {
            return Err(injected_failure()).context(CreateTeamSnafu { team_name });
        }
        if self.fail_at == FailAt::MemberInsert {
            return Err(injected_failure()).context(InsertMembersSnafu {
                count: members.len(),
            });
        }
        if self.fail_at == FailAt::Commit {
            return Err(injected_failure()).context(CommitTransactionSnafu);
        }

        let team_id = self.next_team_id;
        recorded.teams.push((team_id, team_name.to_string()));
        recorded.member_batches.push(
            members
                .iter()
                .map(|member| InsertedMember {
                    member: member.clone(),
                    team_id: Some(team_id),
                })
                .collect(),
        );
        Ok(team_id)
    }

    async fn health_check(&self) -> RegistrationResult<()> {
        Ok(())
    }
}
