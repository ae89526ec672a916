// File: src/views/auth.rs
// Purpose: Login and register form views

use maud::{html, Markup};

use crate::fields;

fn form_error(error: Option<&str>) -> Markup {
    html! {
        @if let Some(error) = error {
            p id=(fields::FORM_ERROR) class="error" style="margin:0;" { (error) }
        } @else {
            p id=(fields::FORM_ERROR) class="error" style="margin:0; display:none;" {}
        }
    }
}

/// Sign-in form, with an optional inline error from the last attempt
pub fn login(error: Option<&str>) -> Markup {
    html! {
        h3 style="margin-top:0;" { "Login" }

        form id=(fields::LOGIN_FORM) class="grid" style="max-width:520px;" {
            div {
                label class="small" { "Email" }
                input id=(fields::EMAIL) type="email" placeholder="Enter your email";
            }

            div {
                label class="small" { "Password" }
                input id=(fields::PASSWORD) type="password" placeholder="Enter your password";
            }

            (form_error(error))

            div class="row" style="justify-content:flex-start;" {
                button class="primary" type="submit" { "Sign in" }
                a class="secondary" href="#/register" style="padding:10px 12px; border-radius:10px;" { "Create account" }
            }
        }
    }
}

/// Account-creation form, with an optional inline error
pub fn register(error: Option<&str>) -> Markup {
    html! {
        h3 style="margin-top:0;" { "Register" }

        form id=(fields::REGISTER_FORM) class="grid" style="max-width:520px;" {
            div {
                label class="small" { "Name" }
                input id=(fields::NAME) type="text" placeholder="Your name";
            }

            div {
                label class="small" { "Email" }
                input id=(fields::EMAIL) type="email" placeholder="you@email.com";
            }

            div {
                label class="small" { "Password" }
                input id=(fields::PASSWORD) type="password" placeholder="At least 8 characters";
            }

            div {
                label class="small" { "Role" }
                select id=(fields::ROLE) {
                    option value="visitor" { "visitor" }
                    option value="admin" { "admin" }
                }
            }

            (form_error(error))

            div class="row" style="justify-content:flex-start;" {
                button class="primary" type="submit" { "Create account" }
                a class="secondary" href="#/login" style="padding:10px 12px; border-radius:10px;" { "Back to login" }
            }
        }
    }
}
