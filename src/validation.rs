use crate::data::MemberForm;
use bitflags::bitflags;
use snafu::Snafu;

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct MissingFields: u8 {
        const FULL_NAME =   0b0000_0001;
        const EMAIL =       0b0000_0010;
        const UNIVERSITY =  0b0000_0100;
        const LINKEDIN =    0b0000_1000;
        const DISCORD_ID =  0b0001_0000;
        const PHONE =       0b0010_0000;
        const NATIONAL_ID = 0b0100_0000;
        const STUDY_FIELD = 0b1000_0000;
    }
}

impl MissingFields {
    /// Column names of the missing fields, for logs. Users only ever see the generic message.
    pub fn field_names(self) -> impl Iterator<Item = &'static str> {
        self.iter().filter_map(|x| match x {
            Self::FULL_NAME => Some("full_name"),
            Self::EMAIL => Some("email"),
            Self::UNIVERSITY => Some("university"),
            Self::LINKEDIN => Some("linkedin"),
            Self::DISCORD_ID => Some("discord_id"),
            Self::PHONE => Some("phone"),
            Self::NATIONAL_ID => Some("national_id"),
            Self::STUDY_FIELD => Some("study_field"),
            _ => None,
        })
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum ValidationError {
    #[snafu(display("No team members data."))]
    NoMembers,
    #[snafu(display("Team name is required!"))]
    MissingTeamName,
    #[snafu(display("Please fill in all the required fields!"))]
    MissingRequiredFields {
        member_index: usize,
        missing: MissingFields,
    },
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn missing_required(member: &MemberForm) -> MissingFields {
    let mut missing = MissingFields::empty();
    for (value, flag) in [
        (&member.full_name, MissingFields::FULL_NAME),
        (&member.email, MissingFields::EMAIL),
        (&member.university, MissingFields::UNIVERSITY),
        (&member.linkedin, MissingFields::LINKEDIN),
        (&member.discord_id, MissingFields::DISCORD_ID),
        (&member.phone, MissingFields::PHONE),
        (&member.national_id, MissingFields::NATIONAL_ID),
        (&member.study_field, MissingFields::STUDY_FIELD),
    ] {
        if is_blank(value) {
            missing |= flag;
        }
    }
    missing
}

fn check_member(member_index: usize, member: &MemberForm) -> Result<(), ValidationError> {
    let missing = missing_required(member);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingRequiredFields {
            member_index,
            missing,
        })
    }
}

pub fn validate_solo(member: &MemberForm) -> Result<(), ValidationError> {
    check_member(0, member)
}

/// Checks the leader's team name, then every member. Returns the team name.
pub fn validate_team(members: &[MemberForm]) -> Result<&str, ValidationError> {
    let Some(leader) = members.first() else {
        return Err(ValidationError::NoMembers);
    };
    if is_blank(&leader.team_name) {
        return Err(ValidationError::MissingTeamName);
    }

    for (i, member) in members.iter().enumerate() {
        check_member(i, member)?;
    }

    Ok(leader.team_name.trim())
}

#[cfg(test)]
pub(crate) fn filled_member(name: &str) -> MemberForm {
    MemberForm {
        full_name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        university: "University of Tests".into(),
        linkedin: format!("https://linkedin.com/in/{}", name.to_lowercase()),
        discord_id: format!("{}#0001", name.to_lowercase()),
        phone: "+44 7700 900000".into(),
        national_id: "AB123456C".into(),
        study_field: "Computer Science".into(),
        ..Default::default()
    }
}
