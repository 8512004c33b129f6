use crate::{
    data::{MemberForm, RegistrationMode, TeamId},
    error::{B64Snafu, RegistrationError, RegistrationResult, RmpSerdeDecodeSnafu, RmpSerdeEncodeSnafu},
};
use base64::{Engine, prelude::BASE64_URL_SAFE};
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};
use uuid::Uuid;

pub const MIN_TEAM_SIZE: u8 = 2;
pub const MAX_TEAM_SIZE: u8 = 4;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Choice,
    TeamSize,
    Form,
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum WizardError {
    #[snafu(display("That isn't possible at this step of the registration"))]
    WrongStep { expected: Step, found: Step },
    #[snafu(display("Team must have at least {} members", MIN_TEAM_SIZE))]
    TeamTooSmall { requested: u8 },
    #[snafu(display("Team can have at most {} members", MAX_TEAM_SIZE))]
    TeamTooLarge { requested: u8 },
    #[snafu(display("Already on the first form"))]
    AtFirstForm,
    #[snafu(display("Already on the last form"))]
    AtLastForm,
}

/// Everything the registration flow remembers between clicks.
///
/// It is never written to the database: it travels with each request as an encoded hidden field
/// (see [`Wizard::encode`]) and is thrown away once the registration has been written.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Wizard {
    pub draft_id: Uuid,
    step: Step,
    mode: Option<RegistrationMode>,
    num_members: u8,
    form_states: Vec<MemberForm>,
    current_form_index: usize,
    team_id: Option<TeamId>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            draft_id: Uuid::new_v4(),
            step: Step::Choice,
            mode: None,
            num_members: 1,
            form_states: vec![],
            current_form_index: 0,
            team_id: None,
        }
    }

    pub const fn step(&self) -> Step {
        self.step
    }

    pub const fn mode(&self) -> Option<RegistrationMode> {
        self.mode
    }

    pub const fn is_solo(&self) -> bool {
        matches!(self.mode, Some(RegistrationMode::Solo))
    }

    pub const fn num_members(&self) -> u8 {
        self.num_members
    }

    pub fn form_states(&self) -> &[MemberForm] {
        &self.form_states
    }

    pub const fn current_form_index(&self) -> usize {
        self.current_form_index
    }

    pub const fn team_id(&self) -> Option<TeamId> {
        self.team_id
    }

    pub fn current_record(&self) -> Option<&MemberForm> {
        self.form_states.get(self.current_form_index)
    }

    fn ensure_step(&self, expected: Step) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                expected,
                found: self.step,
            })
        }
    }

    pub fn choose(&mut self, mode: RegistrationMode) -> Result<(), WizardError> {
        self.ensure_step(Step::Choice)?;

        self.mode = Some(mode);
        match mode {
            RegistrationMode::Solo => {
                self.form_states = vec![MemberForm::default()];
                self.current_form_index = 0;
                self.step = Step::Form;
            }
            RegistrationMode::Team => {
                self.step = Step::TeamSize;
            }
        }

        debug!(draft_id = %self.draft_id, ?mode, "registration mode chosen");
        Ok(())
    }

    pub fn submit_team_size(&mut self, requested: u8) -> Result<(), WizardError> {
        self.ensure_step(Step::TeamSize)?;

        if requested < MIN_TEAM_SIZE {
            return Err(WizardError::TeamTooSmall { requested });
        }
        if requested > MAX_TEAM_SIZE {
            return Err(WizardError::TeamTooLarge { requested });
        }

        self.num_members = requested;
        self.form_states = vec![MemberForm::default(); usize::from(requested)];
        self.current_form_index = 0;
        self.step = Step::Form;

        debug!(draft_id = %self.draft_id, requested, "team size set");
        Ok(())
    }

    /// Writes the edited record back into its slot, so navigating away never loses it.
    pub fn save_current(&mut self, record: MemberForm) -> Result<(), WizardError> {
        self.ensure_step(Step::Form)?;
        if let Some(slot) = self.form_states.get_mut(self.current_form_index) {
            *slot = record;
        }
        Ok(())
    }

    pub fn previous(&mut self) -> Result<(), WizardError> {
        self.ensure_step(Step::Form)?;
        if self.current_form_index == 0 {
            return Err(WizardError::AtFirstForm);
        }
        self.current_form_index -= 1;
        Ok(())
    }

    pub fn next(&mut self) -> Result<(), WizardError> {
        self.ensure_step(Step::Form)?;
        if self.is_last_form() {
            return Err(WizardError::AtLastForm);
        }
        self.current_form_index += 1;
        Ok(())
    }

    pub fn is_last_form(&self) -> bool {
        self.is_solo() || self.current_form_index + 1 >= self.form_states.len()
    }

    pub fn section_titles(&self) -> Vec<String> {
        (0..self.form_states.len())
            .map(|i| match (self.is_solo(), i) {
                (true, _) => "Member".to_string(),
                (false, 0) => "Leader".to_string(),
                (false, i) => format!("Member {i}"),
            })
            .collect()
    }

    pub fn current_title(&self) -> String {
        self.section_titles()
            .into_iter()
            .nth(self.current_form_index)
            .unwrap_or_default()
    }

    /// Records the id of the team row, once.
    pub(crate) fn mark_registered(&mut self, team_id: TeamId) {
        if self.team_id.is_none() {
            self.team_id = Some(team_id);
        }
    }

    pub fn check_invariants(&self) -> RegistrationResult<()> {
        let fail = |reason| Err(RegistrationError::InvalidWizard { reason });

        match (self.step, self.mode) {
            (Step::Choice, None) => {
                if !self.form_states.is_empty() {
                    return fail("member forms exist before a registration type was chosen");
                }
            }
            (Step::Choice, Some(_)) => return fail("registration type chosen but still on the choice step"),
            (Step::TeamSize, Some(RegistrationMode::Team)) => {
                if !self.form_states.is_empty() {
                    return fail("member forms exist before the team size was chosen");
                }
            }
            (Step::TeamSize, _) => return fail("team size step outside of a team registration"),
            (Step::Form, None) => return fail("member forms without a registration type"),
            (Step::Form, Some(RegistrationMode::Solo)) => {
                if self.form_states.len() != 1 {
                    return fail("solo registration must have exactly one member form");
                }
            }
            (Step::Form, Some(RegistrationMode::Team)) => {
                if !(MIN_TEAM_SIZE..=MAX_TEAM_SIZE).contains(&self.num_members)
                    || self.form_states.len() != usize::from(self.num_members)
                {
                    return fail("team member forms do not match the team size");
                }
            }
        }

        if self.step == Step::Form && self.current_form_index >= self.form_states.len() {
            return fail("current member form is out of range");
        }
        if self.team_id.is_some() && self.mode != Some(RegistrationMode::Team) {
            return fail("team id outside of a team registration");
        }

        Ok(())
    }

    pub fn encode(&self) -> RegistrationResult<String> {
        Ok(BASE64_URL_SAFE.encode(rmp_serde::to_vec(self).context(RmpSerdeEncodeSnafu)?))
    }

    pub fn decode(token: &str) -> RegistrationResult<Self> {
        let wizard: Self = rmp_serde::from_slice(&BASE64_URL_SAFE.decode(token).context(B64Snafu)?)
            .context(RmpSerdeDecodeSnafu)?;
        wizard.check_invariants()?;
        Ok(wizard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::filled_member;

    fn team_of(n: u8) -> Wizard {
        let mut wizard = Wizard::new();
        wizard.choose(RegistrationMode::Team).unwrap();
        wizard.submit_team_size(n).unwrap();
        wizard
    }

    #[test]
    fn starts_at_the_choice() {
        let wizard = Wizard::new();
        assert_eq!(wizard.step(), Step::Choice);
        assert_eq!(wizard.mode(), None);
        assert!(wizard.form_states().is_empty());
        assert_eq!(wizard.team_id(), None);
        wizard.check_invariants().unwrap();
    }

    #[test]
    fn solo_gets_exactly_one_blank_form() {
        let mut wizard = Wizard::new();
        wizard.choose(RegistrationMode::Solo).unwrap();

        assert!(wizard.is_solo());
        assert_eq!(wizard.step(), Step::Form);
        assert_eq!(wizard.form_states(), &[MemberForm::default()]);
        assert!(wizard.is_last_form());
        assert_eq!(wizard.section_titles(), vec!["Member"]);
        wizard.check_invariants().unwrap();
    }

    #[test]
    fn team_goes_through_team_size() {
        let mut wizard = Wizard::new();
        wizard.choose(RegistrationMode::Team).unwrap();

        assert_eq!(wizard.step(), Step::TeamSize);
        assert_eq!(wizard.mode(), Some(RegistrationMode::Team));
        assert!(wizard.form_states().is_empty());
        wizard.check_invariants().unwrap();
    }

    #[test]
    fn every_allowed_team_size_allocates_that_many_forms() {
        for n in MIN_TEAM_SIZE..=MAX_TEAM_SIZE {
            let wizard = team_of(n);
            assert_eq!(wizard.form_states().len(), usize::from(n));
            assert!(!wizard.is_solo());
            assert_eq!(wizard.current_form_index(), 0);
            wizard.check_invariants().unwrap();
        }
    }

    #[test]
    fn team_sizes_outside_the_range_are_rejected() {
        let mut wizard = Wizard::new();
        wizard.choose(RegistrationMode::Team).unwrap();

        assert_eq!(
            wizard.submit_team_size(1),
            Err(WizardError::TeamTooSmall { requested: 1 })
        );
        assert_eq!(
            wizard.submit_team_size(0),
            Err(WizardError::TeamTooSmall { requested: 0 })
        );
        assert_eq!(
            wizard.submit_team_size(5),
            Err(WizardError::TeamTooLarge { requested: 5 })
        );
        assert_eq!(wizard.step(), Step::TeamSize);
        assert!(wizard.form_states().is_empty());
        assert_eq!(
            WizardError::TeamTooSmall { requested: 1 }.to_string(),
            "Team must have at least 2 members"
        );
    }

    #[test]
    fn mode_cannot_be_chosen_twice() {
        let mut wizard = Wizard::new();
        wizard.choose(RegistrationMode::Solo).unwrap();
        assert_eq!(
            wizard.choose(RegistrationMode::Team),
            Err(WizardError::WrongStep {
                expected: Step::Choice,
                found: Step::Form
            })
        );
        assert!(wizard.is_solo());
    }

    #[test]
    fn leader_then_numbered_members() {
        let wizard = team_of(3);
        assert_eq!(
            wizard.section_titles(),
            vec!["Leader", "Member 1", "Member 2"]
        );
        assert_eq!(wizard.current_title(), "Leader");
    }

    #[test]
    fn navigation_is_bounded() {
        let mut wizard = team_of(2);
        assert_eq!(wizard.previous(), Err(WizardError::AtFirstForm));
        wizard.next().unwrap();
        assert!(wizard.is_last_form());
        assert_eq!(wizard.next(), Err(WizardError::AtLastForm));
        assert_eq!(wizard.current_form_index(), 1);
    }

    #[test]
    fn solo_never_moves() {
        let mut wizard = Wizard::new();
        wizard.choose(RegistrationMode::Solo).unwrap();
        assert_eq!(wizard.next(), Err(WizardError::AtLastForm));
        assert_eq!(wizard.previous(), Err(WizardError::AtFirstForm));
    }

    #[test]
    fn edits_survive_navigation() {
        let mut wizard = team_of(4);
        let mut leader = filled_member("Ada");
        leader.team_name = "Rocket".into();

        wizard.save_current(leader.clone()).unwrap();
        wizard.next().unwrap();
        wizard.next().unwrap();
        wizard.save_current(filled_member("Linus")).unwrap();
        wizard.previous().unwrap();
        wizard.previous().unwrap();

        assert_eq!(wizard.current_record(), Some(&leader));
        assert_eq!(wizard.form_states()[1], MemberForm::default());
        assert_eq!(wizard.form_states()[2], filled_member("Linus"));
        assert_eq!(wizard.form_states()[0].team_name, "Rocket");
    }

    #[test]
    fn team_id_is_set_once() {
        let mut wizard = team_of(2);
        wizard.mark_registered(42);
        wizard.mark_registered(43);
        assert_eq!(wizard.team_id(), Some(42));
    }

    #[test]
    fn encoded_wizards_decode_to_the_same_state() {
        let mut wizard = team_of(3);
        wizard.save_current(filled_member("Ada")).unwrap();
        wizard.next().unwrap();

        let decoded = Wizard::decode(&wizard.encode().unwrap()).unwrap();
        assert_eq!(decoded, wizard);
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        assert!(matches!(
            Wizard::decode("not base64!!"),
            Err(RegistrationError::B64 { .. })
        ));
        let not_a_wizard = BASE64_URL_SAFE.encode(b"hello");
        assert!(matches!(
            Wizard::decode(&not_a_wizard),
            Err(RegistrationError::RmpSerdeDecode { .. })
        ));
    }

    #[test]
    fn tampered_wizards_are_rejected() {
        let mut wizard = team_of(2);
        wizard.current_form_index = 5;
        assert!(matches!(
            Wizard::decode(&wizard.encode().unwrap()),
            Err(RegistrationError::InvalidWizard { .. })
        ));

        let mut wizard = team_of(2);
        wizard.form_states.push(MemberForm::default());
        assert!(wizard.check_invariants().is_err());

        let mut wizard = Wizard::new();
        wizard.choose(RegistrationMode::Solo).unwrap();
        wizard.team_id = Some(1);
        assert!(wizard.check_invariants().is_err());
    }
}
