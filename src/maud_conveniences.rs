use maud::{Markup, Render, html};

const INPUT_CLASSES: &str = "shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600";

pub fn title(s: impl Render) -> Markup {
    html! {
        h2 class="text-2xl font-semibold mb-4 text-center" {(s)}
    }
}

pub fn form_element(id: &str, label: &str, required: bool, input: Markup) -> Markup {
    html! {
        div class="mb-4" {
            label for=(id) class="block text-sm font-bold mb-2 text-gray-300" {
                (label)
                @if required {
                    span class="text-red-400" {" *"}
                }
            }
            (input)
        }
    }
}

pub fn text_form_element(
    id: &str,
    label: &str,
    required: bool,
    kind: Option<&str>,
    value: &str,
) -> Markup {
    form_element(
        id,
        label,
        required,
        html! {
            input type=(kind.unwrap_or("text")) id=(id) name=(id) value=(value) class=(INPUT_CLASSES) {}
        },
    )
}

pub fn textarea_form_element(id: &str, label: &str, value: &str) -> Markup {
    form_element(
        id,
        label,
        false,
        html! {
            textarea id=(id) name=(id) rows="3" class={(INPUT_CLASSES) " resize-y"} {(value)}
        },
    )
}

pub fn form_submit_button(text: Option<&str>) -> Markup {
    html! {
        div class="flex items-center justify-between" {
            button type="submit" class="bg-blue-500 hover:bg-blue-700 font-bold py-2 px-4 rounded focus:outline-none focus:shadow-outline" {
                (text.unwrap_or("Submit"))
            }
        }
    }
}

pub fn panel(content: Markup) -> Markup {
    html! {
        div class="bg-gray-800 p-8 rounded shadow-md max-w-2xl w-full mx-auto" {
            (content)
        }
    }
}
