// File: src/views/layout.rs
// Purpose: Page chrome wrapped around every committed view

use maud::{html, Markup};

use octothorpe_router::Role;

use crate::config::AppConfig;
use crate::fields;
use crate::session::SessionView;

/// Wraps a view in the header card and content card
///
/// The header reflects the session snapshot it is given, so one cycle
/// renders one coherent signed-in state. `nav_open` controls the
/// `open` class on the top nav.
pub fn layout(app: &AppConfig, session: &SessionView, nav_open: bool, content: Markup) -> Markup {
    let admin = session.role() == Some(Role::Admin);
    let nav_class = if nav_open { "toolbar open" } else { "toolbar" };

    html! {
        section class="card" {
            div class="row" {
                div style="display:flex; align-items:center; gap:12px;" {
                    img src=(app.logo_url) alt="EMS logo" style="width:44px; height:44px; border-radius:12px;";
                    div {
                        h2 style="margin:0;" { (app.title) }
                        p class="small" style="margin:6px 0 0 0;" {
                            @if let Some(user) = &session.user {
                                "Signed in as " b { (user.name) } " (" (user.role) ")"
                            } @else {
                                "Not signed in"
                            }
                        }
                    }
                }

                button id=(fields::NAV_TOGGLE) class="nav-toggle" type="button" aria-label="Toggle navigation" {
                    "☰ Menu"
                }

                nav id=(fields::TOP_NAV) class=(nav_class) {
                    a href="#/" { "Home" }
                    @if session.authenticated() {
                        a href="#/events" { "Events" }
                    }
                    @if admin {
                        a href="#/admin/events/new" { "New Event" }
                    }
                    @if session.authenticated() {
                        a href="#/logout" { "Logout" }
                    } @else {
                        a href="#/login" { "Login" }
                    }
                }
            }
        }

        div style="height:12px;" {}

        section class="card" {
            (content)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::User;
    use uuid::Uuid;

    fn app() -> AppConfig {
        AppConfig::default()
    }

    fn signed_in(role: Role) -> SessionView {
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
    fn test_anonymous_chrome() {
        let rendered = layout(&app(), &SessionView::default(), false, html! { p { "x" } })
            .into_string();
        assert!(rendered.contains("Not signed in"));
        assert!(rendered.contains("href=\"#/login\""));
        assert!(!rendered.contains("href=\"#/events\""));
        assert!(!rendered.contains("href=\"#/logout\""));
        assert!(rendered.contains("class=\"toolbar\""));
    }

    #[test]
    fn test_visitor_chrome() {
        let rendered = layout(&app(), &signed_in(Role::Visitor), false, html! {})
            .into_string();
        assert!(rendered.contains("Signed in as <b>Ada</b> (visitor)"));
        assert!(rendered.contains("href=\"#/events\""));
        assert!(rendered.contains("href=\"#/logout\""));
        assert!(!rendered.contains("href=\"#/admin/events/new\""));
    }

    #[test]
    fn test_admin_chrome_has_new_event_link() {
        let rendered = layout(&app(), &signed_in(Role::Admin), false, html! {})
            .into_string();
        assert!(rendered.contains("Signed in as <b>Ada</b> (admin)"));
        assert!(rendered.contains("href=\"#/admin/events/new\""));
    }

    #[test]
    fn test_nav_open_class() {
        let closed = layout(&app(), &SessionView::default(), false, html! {}).into_string();
        let open = layout(&app(), &SessionView::default(), true, html! {}).into_string();
        assert!(closed.contains("class=\"toolbar\""));
        assert!(open.contains("class=\"toolbar open\""));
    }

    #[test]
    fn test_content_lands_in_second_card() {
        let rendered = layout(&app(), &SessionView::default(), false, html! { p { "inner" } })
            .into_string();
        assert!(rendered.contains("<p>inner</p>"));
    }
}
