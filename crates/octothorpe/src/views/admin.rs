// File: src/views/admin.rs
// Purpose: Admin event form, shared by the create and edit routes

use maud::{html, Markup};

use crate::events::Event;
use crate::fields;

/// Whether the form creates a new event or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

impl FormMode {
    fn heading(&self) -> &'static str {
        match self {
            FormMode::Create => "Create Event",
            FormMode::Edit => "Edit Event",
        }
    }

    fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Create",
            FormMode::Edit => "Save",
        }
    }
}

/// The event form, prefilled from `initial` when editing
///
/// `error` is the outcome of the last failed submit. The create form
/// renders blank fields; capacity starts at 1.
pub fn event_form(mode: FormMode, initial: Option<&Event>, error: Option<&str>) -> Markup {
    let title = initial.map(|event| event.title.as_str()).unwrap_or("");
    let description = initial.map(|event| event.description.as_str()).unwrap_or("");
    let date = initial.map(|event| event.date.as_str()).unwrap_or("");
    let time = initial.map(|event| event.time.as_str()).unwrap_or("");
    let location = initial.map(|event| event.location.as_str()).unwrap_or("");
    let capacity = initial.map(|event| event.capacity).unwrap_or(1);

    html! {
        div class="row" {
            h3 style="margin:0;" { (mode.heading()) }
            a href="#/events" { "Back" }
        }

        div style="height:12px;" {}

        form id=(fields::EVENT_FORM) class="grid" style="max-width:720px;" {
            div {
                label class="small" { "Title" }
                input id=(fields::TITLE) type="text" value=(title);
            }

            div {
                label class="small" { "Description" }
                textarea id=(fields::DESCRIPTION) rows="3" { (description) }
            }

            div class="grid two" {
                div {
                    label class="small" { "Date" }
                    input id=(fields::DATE) type="date" value=(date);
                }

                div {
                    label class="small" { "Time" }
                    input id=(fields::TIME) type="time" value=(time);
                }
            }

            div class="grid two" {
                div {
                    label class="small" { "Location" }
                    input id=(fields::LOCATION) type="text" value=(location);
                }

                div {
                    label class="small" { "Capacity" }
                    input id=(fields::CAPACITY) type="number" min="1" value=(capacity);
                }
            }

            @if let Some(error) = error {
                p class="error" style="margin:0;" { (error) }
            }

            div class="row" style="justify-content:flex-start;" {
                button class="primary" type="submit" { (mode.submit_label()) }
                @if mode == FormMode::Edit {
                    button id=(fields::DELETE_BTN) class="secondary" type="button" { "Delete" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> Event {
        Event {
            id: 4,
            title: "Rust meetup".to_string(),
            description: "Monthly".to_string(),
            date: "2026-09-01".to_string(),
            time: "18:30".to_string(),
            location: "Main hall".to_string(),
            capacity: 40,
            registered_count: 5,
            created_by: None,
        }
    }

    #[test]
    fn test_create_form_is_blank() {
        let rendered = event_form(FormMode::Create, None, None).into_string();
        assert!(rendered.contains("Create Event"));
        assert!(rendered.contains(">Create</button>"));
        assert!(rendered.contains("value=\"1\""));
        assert!(!rendered.contains("id=\"deleteBtn\""));
    }

    #[test]
    fn test_edit_form_prefills_and_offers_delete() {
        let rendered = event_form(FormMode::Edit, Some(&event()), None).into_string();
        assert!(rendered.contains("Edit Event"));
        assert!(rendered.contains("value=\"Rust meetup\""));
        assert!(rendered.contains("value=\"40\""));
        assert!(rendered.contains(">Save</button>"));
        assert!(rendered.contains("id=\"deleteBtn\""));
    }

    #[test]
    fn test_form_error_paragraph() {
        let rendered = event_form(FormMode::Create, None, Some("Title is required.")).into_string();
        assert!(rendered.contains("Title is required."));

        let clean = event_form(FormMode::Create, None, None).into_string();
        assert!(!clean.contains("class=\"error\""));
    }
}
