use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;
use snafu::Snafu;
use std::num::ParseIntError;

pub type RegistrationResult<T> = Result<T, RegistrationError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RegistrationError {
    #[snafu(display("Error opening database"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error getting db connection"))]
    GetDatabaseConnection { source: sqlx::Error },
    #[snafu(display("Error making SQL query"))]
    MakeQuery { source: sqlx::Error },
    #[snafu(display("Error commiting SQL transaction"))]
    CommitTransaction { source: sqlx::Error },
    #[snafu(display("Error rolling back SQL transaction"))]
    RollbackTransaction { source: sqlx::Error },
    #[snafu(display("Error migrating DB schema"))]
    MigrateError { source: sqlx::migrate::MigrateError },
    #[snafu(display("Error inserting team {:?}", team_name))]
    CreateTeam {
        source: sqlx::Error,
        team_name: String,
    },
    #[snafu(display("Error inserting {} member(s)", count))]
    InsertMembers { source: sqlx::Error, count: usize },
    #[snafu(display("A team named {:?} already exists", team_name))]
    DuplicateTeamName { team_name: String },
    #[snafu(display("Error serialising with rmp_serde"))]
    RmpSerdeEncode { source: rmp_serde::encode::Error },
    #[snafu(display("Error deserialising with rmp_serde"))]
    RmpSerdeDecode { source: rmp_serde::decode::Error },
    #[snafu(display("Error decoding Base64"))]
    B64 { source: base64::DecodeError },
    #[snafu(display("Registration state was invalid: {}", reason))]
    InvalidWizard { reason: &'static str },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse env var `{}` as a number", name))]
    ParseEnvNumber {
        source: ParseIntError,
        name: &'static str,
    },
}

impl IntoResponse for RegistrationError {
    #[allow(clippy::match_same_arms)]
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const CF: StatusCode = StatusCode::CONFLICT; //conflict
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input

        let basic_error = |desc| {
            html! {
                div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                    strong class="font-bold" {"Registration Error "}
                    span {(desc)}
                }
            }
        };

        let status_code = match &self {
            Self::OpenDatabase { .. } | Self::GetDatabaseConnection { .. } => ISE,
            Self::MakeQuery { source } => match source {
                sqlx::Error::RowNotFound => NF,
                _ => ISE,
            },
            Self::CommitTransaction { .. } | Self::RollbackTransaction { .. } => ISE,
            Self::MigrateError { .. } => ISE,
            Self::CreateTeam { .. } | Self::InsertMembers { .. } => ISE,
            Self::DuplicateTeamName { .. } => CF,
            Self::RmpSerdeEncode { .. } => ISE,
            Self::RmpSerdeDecode { .. } | Self::B64 { .. } | Self::InvalidWizard { .. } => BI,
            Self::BadEnvVar { .. } | Self::ParseEnvNumber { .. } => ISE,
        };

        error!(?self, "Error!");
        (status_code, Html(basic_error(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_wizard_tokens_are_bad_requests() {
        let response = RegistrationError::InvalidWizard {
            reason: "index out of range",
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn duplicate_team_names_conflict() {
        let response = RegistrationError::DuplicateTeamName {
            team_name: "Rocket".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn missing_rows_are_not_found() {
        let response = RegistrationError::MakeQuery {
            source: sqlx::Error::RowNotFound,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
