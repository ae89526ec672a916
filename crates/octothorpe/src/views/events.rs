// File: src/views/events.rs
// Purpose: Event list and event detail views

use maud::{html, Markup};

use octothorpe_router::Role;

use crate::events::Event;
use crate::fields;
use crate::session::SessionView;
use crate::views::Notice;

/// Event catalog, with admin edit links when the viewer is an admin
pub fn list(events: &[Event], viewer: &SessionView) -> Markup {
    let admin = viewer.role() == Some(Role::Admin);

    html! {
        div class="row" {
            h3 style="margin:0;" { "Events" }
            p class="small" style="margin:0;" { "Total: " (events.len()) }
        }

        div style="height:12px;" {}

        div class="grid two" {
            @for event in events {
                div class="card" style="box-shadow:none; border:1px solid #eef0f7;" {
                    h4 style="margin:0 0 6px 0;" { (event.title) }
                    p class="small" style="margin:0 0 10px 0;" {
                        (event.date) " • " (event.time) " • " (event.location)
                    }
                    p style="margin:0 0 10px 0;" { (event.description) }
                    p class="small" style="margin:0 0 10px 0;" {
                        "Capacity: " b { (event.capacity) }
                        " • Registered: " b { (event.registered_count) }
                    }

                    div class="row" style="justify-content:flex-start;" {
                        a class="secondary" href={ "#/events/" (event.id) } style="padding:10px 12px; border-radius:10px;" { "View" }

                        @if admin {
                            a class="secondary" href={ "#/admin/events/" (event.id) "/edit" } style="padding:10px 12px; border-radius:10px;" { "Edit" }
                        }
                    }
                }
            }
        }
    }
}

/// One event, with a register button for viewers who may sign up
///
/// `notice` carries the outcome of the last registration attempt and is
/// rendered between the stats and the button.
pub fn detail(event: &Event, can_register: bool, notice: Option<&Notice>) -> Markup {
    html! {
        div class="row" {
            h3 style="margin:0;" { "Event Detail" }
            a href="#/events" { "Back" }
        }

        div style="height:12px;" {}

        h4 style="margin:0 0 6px 0;" { (event.title) }
        p class="small" style="margin:0 0 10px 0;" {
            (event.date) " • " (event.time) " • " (event.location)
        }
        p style="margin:0 0 10px 0;" { (event.description) }

        p class="small" style="margin:0 0 12px 0;" {
            "Capacity: " b { (event.capacity) }
            " • Registered: " b { (event.registered_count) }
        }

        @if let Some(notice) = notice {
            p class=(notice.tone.class()) style="margin:0 0 12px 0;" { (notice.text) }
        }

        @if can_register {
            button id=(fields::REGISTER_BTN) class="primary" type="button" { "Register" }
        } @else {
            p class="small" style="margin:0;" { "Sign in as visitor to register." }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::User;
    use uuid::Uuid;

    fn event(id: i64, title: &str) -> Event {
        Event {
            id,
            title: title.to_string(),
            description: "About".to_string(),
            date: "2026-09-01".to_string(),
            time: "18:30".to_string(),
            location: "Main hall".to_string(),
            capacity: 50,
            registered_count: 12,
            created_by: None,
        }
    }

    fn viewer(role: Role) -> SessionView {
        SessionView {
            user: Some(User {
                id: Uuid::new_v4(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                role,
            }),
        }
    }

    #[test]
    fn test_list_counts_and_links() {
        let events = vec![event(1, "Rust meetup"), event(2, "Workshop")];
        let rendered = list(&events, &viewer(Role::Visitor)).into_string();

        assert!(rendered.contains("Total: 2"));
        assert!(rendered.contains("Rust meetup"));
        assert!(rendered.contains("href=\"#/events/1\""));
        assert!(rendered.contains("href=\"#/events/2\""));
        assert!(!rendered.contains("/edit"));
    }

    #[test]
    fn test_list_shows_edit_links_to_admins() {
        let events = vec![event(3, "Rust meetup")];
        let rendered = list(&events, &viewer(Role::Admin)).into_string();
        assert!(rendered.contains("href=\"#/admin/events/3/edit\""));
    }

    #[test]
    fn test_detail_with_register_button() {
        let rendered = detail(&event(1, "Rust meetup"), true, None).into_string();
        assert!(rendered.contains("Event Detail"));
        assert!(rendered.contains("id=\"registerBtn\""));
        assert!(!rendered.contains("Sign in as visitor to register."));
    }

    #[test]
    fn test_detail_without_register_button() {
        let rendered = detail(&event(1, "Rust meetup"), false, None).into_string();
        assert!(!rendered.contains("id=\"registerBtn\""));
        assert!(rendered.contains("Sign in as visitor to register."));
    }

    #[test]
    fn test_detail_notice_tones() {
        let ok = Notice::success("Registered successfully!");
        let rendered = detail(&event(1, "Rust meetup"), true, Some(&ok)).into_string();
        assert!(rendered.contains("class=\"success\""));
        assert!(rendered.contains("Registered successfully!"));

        let bad = Notice::error("This event is at full capacity.");
        let rendered = detail(&event(1, "Rust meetup"), true, Some(&bad)).into_string();
        assert!(rendered.contains("class=\"error\""));
        assert!(rendered.contains("This event is at full capacity."));
    }
}
