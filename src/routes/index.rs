use crate::{
    error::RegistrationResult, routes::wizard_view::wizard_fragment, state::RegistrationState,
    wizard::Wizard,
};
use axum::extract::State;
use maud::Markup;

pub async fn get_index_route(State(state): State<RegistrationState>) -> RegistrationResult<Markup> {
    let wizard = Wizard::new();
    debug!(draft_id = %wizard.draft_id, "starting a new registration");

    Ok(state.render(wizard_fragment(&wizard, &[])?))
}

pub async fn get_healthz(State(state): State<RegistrationState>) -> RegistrationResult<&'static str> {
    state.store().health_check().await?;
    Ok("ok")
}
