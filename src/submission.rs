use crate::{
    data::{RegistrationMode, RegistrationStore, TeamId},
    error::RegistrationError,
    notification::Notification,
    validation::{ValidationError, validate_solo, validate_team},
    wizard::Wizard,
};
use snafu::Snafu;
use tracing::instrument;

#[derive(Debug, Snafu)]
pub enum SubmissionError {
    #[snafu(display("{source}"))]
    Invalid { source: ValidationError },
    #[snafu(display("Registration type has not been chosen."))]
    NotReady,
    #[snafu(display("This team has already been registered."))]
    AlreadyRegistered { team_id: TeamId },
    #[snafu(display("Failed to check existing team."))]
    CheckExistingTeam { source: RegistrationError },
    #[snafu(display("A team with this name already exists."))]
    TeamNameTaken { team_name: String },
    #[snafu(display("Failed to create team."))]
    CreateTeam { source: RegistrationError },
    #[snafu(display("Failed to submit members."))]
    SubmitMembers { source: RegistrationError },
    #[snafu(display("Failed to submit member."))]
    SubmitSolo { source: RegistrationError },
}

impl SubmissionError {
    /// Only the message reaches the user: store errors stay in the logs.
    pub fn notification(&self) -> Notification {
        match self {
            Self::AlreadyRegistered { .. } => Notification::info(self.to_string()),
            _ => Notification::error(self.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registered {
    Solo,
    Team { team_id: TeamId, team_name: String },
}

impl Registered {
    pub fn notification(&self) -> Notification {
        match self {
            Self::Solo => Notification::success("Solo registration submitted!"),
            Self::Team { .. } => Notification::success("Team registered successfully!"),
        }
    }
}

pub async fn submit(
    wizard: &mut Wizard,
    store: &dyn RegistrationStore,
) -> Result<Registered, SubmissionError> {
    match wizard.mode() {
        Some(RegistrationMode::Solo) => submit_solo(wizard, store).await,
        Some(RegistrationMode::Team) => submit_team(wizard, store).await,
        None => Err(SubmissionError::NotReady),
    }
}

#[instrument(skip_all, fields(draft_id = %wizard.draft_id))]
pub async fn submit_solo(
    wizard: &Wizard,
    store: &dyn RegistrationStore,
) -> Result<Registered, SubmissionError> {
    let Some(member) = wizard.form_states().first() else {
        return Err(SubmissionError::Invalid {
            source: ValidationError::NoMembers,
        });
    };

    if let Err(source) = validate_solo(member) {
        log_rejection(&source);
        return Err(SubmissionError::Invalid { source });
    }

    info!("submitting solo registration");
    if let Err(source) = store.insert_solo_member(member).await {
        error!(?source, "failed to insert solo member");
        return Err(SubmissionError::SubmitSolo { source });
    }

    Ok(Registered::Solo)
}

#[instrument(skip_all, fields(draft_id = %wizard.draft_id))]
pub async fn submit_team(
    wizard: &mut Wizard,
    store: &dyn RegistrationStore,
) -> Result<Registered, SubmissionError> {
    //the completion panel drops the token, so a browser replay lands on the name check instead
    if let Some(team_id) = wizard.team_id() {
        return Err(SubmissionError::AlreadyRegistered { team_id });
    }

    let team_name = match validate_team(wizard.form_states()) {
        Ok(team_name) => team_name.to_string(),
        Err(source) => {
            log_rejection(&source);
            return Err(SubmissionError::Invalid { source });
        }
    };

    match store.find_team_by_name(&team_name).await {
        Ok(None) => {}
        Ok(Some(existing)) => {
            info!(%team_name, existing, "team name already taken");
            return Err(SubmissionError::TeamNameTaken { team_name });
        }
        Err(source) => {
            error!(?source, "failed to check for an existing team");
            return Err(SubmissionError::CheckExistingTeam { source });
        }
    }

    info!(%team_name, members = wizard.form_states().len(), "submitting team registration");
    let team_id = match store.register_team(&team_name, wizard.form_states()).await {
        Ok(team_id) => team_id,
        Err(RegistrationError::DuplicateTeamName { team_name }) => {
            //someone else got there between the check and the insert
            info!(%team_name, "team name taken while registering");
            return Err(SubmissionError::TeamNameTaken { team_name });
        }
        Err(source @ RegistrationError::InsertMembers { .. })
        | Err(source @ RegistrationError::CommitTransaction { .. }) => {
            error!(?source, "failed to insert team members");
            return Err(SubmissionError::SubmitMembers { source });
        }
        Err(source) => {
            error!(?source, "failed to create team");
            return Err(SubmissionError::CreateTeam { source });
        }
    };

    wizard.mark_registered(team_id);
    info!(team_id, "team registered");

    Ok(Registered::Team { team_id, team_name })
}

fn log_rejection(source: &ValidationError) {
    match source {
        ValidationError::MissingRequiredFields {
            member_index,
            missing,
        } => {
            let missing: Vec<_> = missing.field_names().collect();
            debug!(member_index, ?missing, "registration rejected");
        }
        other => debug!(?other, "registration rejected"),
    }
}
