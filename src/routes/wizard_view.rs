use crate::{
    data::MemberForm,
    error::RegistrationResult,
    maud_conveniences::{
        form_submit_button, panel, text_form_element, textarea_form_element, title,
    },
    notification::{Notification, toasts},
    submission::Registered,
    wizard::{MAX_TEAM_SIZE, MIN_TEAM_SIZE, Step, Wizard},
};
use maud::{Markup, html};

const CHOICE_BUTTON: &str = "bg-yellow-400 text-indigo-950 font-semibold px-4 py-2 rounded hover:bg-indigo-950 hover:text-yellow-400";
const DISABLED_BUTTON: &str = "bg-gray-300 text-gray-600 font-semibold px-4 py-2 rounded cursor-not-allowed";

/// The whole `#wizard` element plus the toasts for this response.
pub fn wizard_fragment(wizard: &Wizard, notifications: &[Notification]) -> RegistrationResult<Markup> {
    let token = wizard.encode()?;

    let inner = match wizard.step() {
        Step::Choice => choice_view(&token),
        Step::TeamSize => team_size_view(&token, wizard.num_members()),
        Step::Form => member_form_view(&token, wizard),
    };

    Ok(html! {
        div id="wizard" {
            (inner)
        }
        (toasts(notifications))
    })
}

fn choice_view(token: &str) -> Markup {
    panel(html! {
        (title("Register as:"))
        form hx-post="/internal/choice" hx-target="#wizard" hx-swap="outerHTML" class="flex justify-center gap-6" {
            input type="hidden" name="wizard" value=(token);
            button type="button" hx-post="/internal/choice" hx-vals="{\"choice\": \"solo\"}" class=(CHOICE_BUTTON) {"Solo"}
            button type="button" hx-post="/internal/choice" hx-vals="{\"choice\": \"team\"}" class=(CHOICE_BUTTON) {"Team"}
        }
    })
}

fn team_size_view(token: &str, selected: u8) -> Markup {
    panel(html! {
        (title("Select number of team members:"))
        form hx-post="/internal/team_size" hx-target="#wizard" hx-swap="outerHTML" class="space-y-6 text-center" {
            input type="hidden" name="wizard" value=(token);
            div class="flex justify-center gap-4" {
                @for n in MIN_TEAM_SIZE..=MAX_TEAM_SIZE {
                    label class="cursor-pointer" {
                        input type="radio" name="num_members" value=(n) class="peer sr-only" checked[n == selected];
                        span class="block px-6 py-3 rounded-full font-semibold bg-yellow-400 text-indigo-950 peer-checked:bg-white hover:bg-indigo-950 hover:text-yellow-400" {(n)}
                    }
                }
            }
            div class="flex justify-center" {
                (form_submit_button(Some("Continue")))
            }
        }
    })
}

fn member_form_view(token: &str, wizard: &Wizard) -> Markup {
    let index = wizard.current_form_index();
    let blank = MemberForm::default();
    let record = wizard.current_record().unwrap_or(&blank);
    let show_next = !wizard.is_solo() && !wizard.is_last_form();

    html! {
        (panel(html! {
            form hx-post="/internal/submit" hx-target="#wizard" hx-swap="outerHTML" hx-indicator="#loading" {
                input type="hidden" name="wizard" value=(token);
                (personal_info_form(&wizard.current_title(), record, wizard.is_solo(), index == 0))

                div class="flex justify-between pt-4" {
                    @if index == 0 {
                        button type="button" disabled class=(DISABLED_BUTTON) {"Previous"}
                    } @else {
                        button type="button" hx-post="/internal/navigate" hx-vals="{\"direction\": \"previous\"}" class=(CHOICE_BUTTON) {"Previous"}
                    }

                    @if wizard.is_last_form() {
                        (form_submit_button(Some("Submit")))
                    }

                    @if show_next {
                        button type="button" hx-post="/internal/navigate" hx-vals="{\"direction\": \"next\"}" class=(CHOICE_BUTTON) {"Next"}
                    }
                }
            }
        }))
    }
}

/// Field rendering for one member. Validation and persistence happen elsewhere.
pub fn personal_info_form(section_title: &str, record: &MemberForm, is_solo: bool, is_leader: bool) -> Markup {
    html! {
        (title(section_title))
        @if !is_solo && is_leader {
            (text_form_element("team_name", "Team Name", true, None, &record.team_name))
        }
        (text_form_element("full_name", "Full Name", true, None, &record.full_name))
        (text_form_element("email", "Email", true, Some("email"), &record.email))
        (text_form_element("phone", "Phone Number", true, Some("tel"), &record.phone))
        (text_form_element("national_id", "National ID", true, None, &record.national_id))
        (text_form_element("university", "University", true, None, &record.university))
        (text_form_element("study_field", "Field of Study", true, None, &record.study_field))
        (text_form_element("year_of_study", "Year of Study", false, None, &record.year_of_study))
        (text_form_element("linkedin", "LinkedIn", true, Some("url"), &record.linkedin))
        (text_form_element("discord_id", "Discord ID", true, None, &record.discord_id))
        (text_form_element("skills", "Skills", false, None, &record.skills))
        (text_form_element("hypscb", "Have you participated in a similar competition before?", false, None, &record.hypscb))
        (textarea_form_element("elaborate", "If so, please elaborate", &record.elaborate))
        (textarea_form_element("experience", "Relevant Experience", &record.experience))
        (text_form_element("software", "Software & Tools You Use", false, None, &record.software))
    }
}

pub fn completion_view(registered: &Registered) -> Markup {
    html! {
        div id="wizard" {
            (panel(html! {
                @match registered {
                    Registered::Solo => {
                        (title("You're registered!"))
                        p class="text-gray-200 text-center" {"See you at the event."}
                    },
                    Registered::Team { team_id, team_name } => {
                        (title(html! { "Team " (team_name) " is registered!" }))
                        p class="text-gray-200 text-center" {
                            "Team number: "
                            span class="font-semibold" {(team_id)}
                        }
                    },
                }
                div class="flex justify-center pt-4" {
                    a href="/" class=(CHOICE_BUTTON) {"Register someone else"}
                }
            }))
        }
        (toasts(&[registered.notification()]))
    }
}
