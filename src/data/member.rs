use serde::{Deserialize, Serialize};

/// One person's answers, exactly as typed into the personal-info form.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct MemberForm {
    pub full_name: String,
    pub email: String,
    pub university: String,
    pub linkedin: String,
    pub discord_id: String,
    pub year_of_study: String,
    pub phone: String,
    pub national_id: String,
    pub study_field: String,
    pub skills: String,
    /// Only read from the leader of a team.
    pub team_name: String,
    pub hypscb: String,
    pub elaborate: String,
    pub experience: String,
    pub software: String,
}

impl MemberForm {
    /// Values in the column order of `public.members`, minus `team_id`.
    pub fn member_columns(&self) -> [&str; 13] {
        [
            self.full_name.as_str(),
            self.email.as_str(),
            self.university.as_str(),
            self.linkedin.as_str(),
            self.discord_id.as_str(),
            self.phone.as_str(),
            self.national_id.as_str(),
            self.study_field.as_str(),
            self.skills.as_str(),
            self.hypscb.as_str(),
            self.elaborate.as_str(),
            self.experience.as_str(),
            self.software.as_str(),
        ]
    }
}

pub const MEMBER_COLUMN_NAMES: [&str; 13] = [
    "full_name",
    "email",
    "university",
    "linkedin",
    "discord_id",
    "phone",
    "national_id",
    "study_field",
    "skills",
    "hypscb",
    "elaborate",
    "experience",
    "software",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_name_and_year_are_not_member_columns() {
        let form = MemberForm {
            full_name: "Ada".into(),
            year_of_study: "3".into(),
            team_name: "Rocket".into(),
            software: "vim".into(),
            ..Default::default()
        };

        let columns = form.member_columns();
        assert_eq!(columns[0], "Ada");
        assert_eq!(columns[12], "vim");
        assert!(!columns.contains(&"Rocket"));
        assert!(!columns.contains(&"3"));
        assert!(!MEMBER_COLUMN_NAMES.contains(&"team_name"));
    }
}
