use std::fmt::Write as _;

use crate::screens::detail::DetailState;
use crate::screens::form::{FieldInput, FORM_FIELDS};
use crate::screens::home::Company;
use crate::screens::state::{ViewState, LOADING_MESSAGE};

pub fn view_state(title: &str, state: &ViewState) -> String {
    let mut out = String::new();
    if !title.is_empty() {
        let _ = writeln!(out, "== {title} ==");
    }
    match state {
        ViewState::Loading => {
            let _ = writeln!(out, "{LOADING_MESSAGE}");
        }
        ViewState::Error { message } => {
            let _ = writeln!(out, "error: {message}");
        }
        ViewState::Empty { message } => {
            let _ = writeln!(out, "{message}");
        }
        ViewState::Populated { cards } => {
            for card in cards {
                let _ = writeln!(out, "[{}] {}", card.id, card.company_name);
                let _ = writeln!(out, "    {}", card.student_name);
                let _ = writeln!(out, "    {}  (read: :open {})", card.year_label, card.id);
                let _ = writeln!(out, "    image: {}", card.thumbnail_url);
            }
        }
    }
    out
}

pub fn detail(state: &DetailState) -> String {
    let mut out = String::new();
    match state {
        DetailState::Loading => {
            let _ = writeln!(out, "{LOADING_MESSAGE}");
        }
        DetailState::NotFound { message } => {
            let _ = writeln!(out, "{message}");
        }
        DetailState::Error { message } => {
            let _ = writeln!(out, "error: {message}");
        }
        DetailState::Loaded { view } => {
            let _ = writeln!(out, "image: {}", view.image_url);
            let _ = writeln!(out, "{}", view.company_name);
            let _ = writeln!(out, "{}", view.student_name);
            for row in &view.rows {
                let _ = writeln!(out, "  - {}", row.text);
            }
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", view.details);
        }
    }
    out
}

pub fn companies(list: &[Company]) -> String {
    let mut out = String::from("Companies We Have Experiences With\n");
    for c in list {
        let _ = writeln!(out, "  {:>2}. {}", c.id, c.name);
    }
    out
}

pub fn form_fields() -> String {
    let mut out = String::from("Share Your Experience\n");
    for spec in FORM_FIELDS {
        let marker = if spec.required { " *" } else { "" };
        let hint = match spec.input {
            FieldInput::Picker(choices) => format!(" [{}]", choices.join(" | ")),
            FieldInput::Numeric => " (number)".to_string(),
            FieldInput::Multiline => " (multi-line)".to_string(),
            FieldInput::Text => String::new(),
        };
        let _ = writeln!(out, "  {:<20} {}{}{}", spec.field.key(), spec.label, marker, hint);
    }
    out
}
