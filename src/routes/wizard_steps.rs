use crate::{
    data::{MemberForm, RegistrationMode},
    error::RegistrationResult,
    notification::Notification,
    routes::wizard_view::{completion_view, wizard_fragment},
    state::RegistrationState,
    submission::submit,
    wizard::Wizard,
};
use axum::{Form, extract::State};
use maud::Markup;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct ChoiceForm {
    wizard: String,
    choice: RegistrationMode,
}

pub async fn internal_post_choice(
    Form(ChoiceForm { wizard, choice }): Form<ChoiceForm>,
) -> RegistrationResult<Markup> {
    let mut wizard = Wizard::decode(&wizard)?;

    let notification = match wizard.choose(choice) {
        Ok(()) => Notification::success(match choice {
            RegistrationMode::Solo => "Solo registration selected",
            RegistrationMode::Team => "Team registration selected",
        }),
        Err(e) => Notification::error(e.to_string()),
    };

    wizard_fragment(&wizard, &[notification])
}

#[derive(Deserialize)]
pub struct TeamSizeForm {
    wizard: String,
    num_members: Option<u8>,
}

pub async fn internal_post_team_size(
    Form(TeamSizeForm {
        wizard,
        num_members,
    }): Form<TeamSizeForm>,
) -> RegistrationResult<Markup> {
    let mut wizard = Wizard::decode(&wizard)?;
    //nothing picked is the same as a team of one
    let requested = num_members.unwrap_or(1);

    let notification = match wizard.submit_team_size(requested) {
        Ok(()) => Notification::success(format!("{requested} team members set")),
        Err(e) => Notification::error(e.to_string()),
    };

    wizard_fragment(&wizard, &[notification])
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Previous,
    Next,
}

#[derive(Deserialize)]
pub struct NavigateForm {
    wizard: String,
    direction: Direction,
    #[serde(flatten)]
    record: MemberForm,
}

pub async fn internal_post_navigate(
    Form(NavigateForm {
        wizard,
        direction,
        record,
    }): Form<NavigateForm>,
) -> RegistrationResult<Markup> {
    let mut wizard = Wizard::decode(&wizard)?;

    let moved = wizard.save_current(record).and_then(|()| match direction {
        Direction::Previous => wizard.previous(),
        Direction::Next => wizard.next(),
    });

    match moved {
        Ok(()) => wizard_fragment(&wizard, &[]),
        Err(e) => wizard_fragment(&wizard, &[Notification::error(e.to_string())]),
    }
}

#[derive(Deserialize)]
pub struct SubmitForm {
    wizard: String,
    #[serde(flatten)]
    record: MemberForm,
}

pub async fn internal_post_submit(
    State(state): State<RegistrationState>,
    Form(SubmitForm { wizard, record }): Form<SubmitForm>,
) -> RegistrationResult<Markup> {
    let mut wizard = Wizard::decode(&wizard)?;

    if let Err(e) = wizard.save_current(record) {
        return wizard_fragment(&wizard, &[Notification::error(e.to_string())]);
    }

    match submit(&mut wizard, state.store()).await {
        Ok(registered) => Ok(completion_view(&registered)),
        Err(e) => wizard_fragment(&wizard, &[e.notification()]),
    }
}
