/// Access guards for matched routes
///
/// A guard decision is a pure function of (route access requirements,
/// viewer snapshot). Redirects correct missing or excess authentication
/// state; a role mismatch is an intentional refusal and renders in place
/// so the address stays on the denied path.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Redirect target for unauthenticated access to a protected route.
pub const SIGN_IN_PATH: &str = "/login";

/// Redirect target for authenticated access to a public-only route.
pub const MEMBER_HOME_PATH: &str = "/events";

/// Account role carried by a session
///
/// Wire strings are lowercase (`"admin"` / `"visitor"`), matching the
/// role select options in the register view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Visitor,
}

impl Role {
    /// Canonical wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Visitor => "visitor",
        }
    }

    /// Parses a wire string; anything but the two canonical values is `None`
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            "visitor" => Some(Role::Visitor),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access requirements declared on a route
///
/// `requires_auth` and `public_only` are mutually exclusive in practice;
/// `required_role` only makes sense together with `requires_auth`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Access {
    /// Route is reachable only with an authenticated session
    pub requires_auth: bool,
    /// Route is reachable only without an authenticated session
    pub public_only: bool,
    /// Route additionally requires this role
    pub required_role: Option<Role>,
}

/// Snapshot of the session state a guard evaluates against
///
/// Taken once at the start of a render cycle so the guard outcome cannot
/// change mid-cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewer {
    pub authenticated: bool,
    pub role: Option<Role>,
}

/// Outcome of guard evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Proceed to the route handler
    Allow,
    /// Terminate the cycle and navigate to the given path
    Redirect(&'static str),
    /// Render the access-denied view in place, address unchanged
    Deny,
}

impl Access {
    /// Evaluates the guard chain in its fixed order
    ///
    /// 1. protected and not authenticated → redirect to [`SIGN_IN_PATH`]
    /// 2. public-only and authenticated → redirect to [`MEMBER_HOME_PATH`]
    /// 3. role required and viewer role differs → deny in place
    /// 4. otherwise allow
    ///
    /// The order must not change: the auth check runs first so a role
    /// requirement is only ever compared against an authenticated viewer.
    pub fn evaluate(&self, viewer: &Viewer) -> GuardOutcome {
        if self.requires_auth && !viewer.authenticated {
            return GuardOutcome::Redirect(SIGN_IN_PATH);
        }

        if self.public_only && viewer.authenticated {
            return GuardOutcome::Redirect(MEMBER_HOME_PATH);
        }

        if let Some(required) = self.required_role {
            if viewer.role != Some(required) {
                return GuardOutcome::Deny;
            }
        }

        GuardOutcome::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anonymous() -> Viewer {
        Viewer::default()
    }

    fn visitor() -> Viewer {
        Viewer {
            authenticated: true,
            role: Some(Role::Visitor),
        }
    }

    fn admin() -> Viewer {
        Viewer {
            authenticated: true,
            role: Some(Role::Admin),
        }
    }

    #[test]
    fn test_protected_without_session_redirects_to_login() {
        let access = Access {
            requires_auth: true,
            ..Access::default()
        };
        assert_eq!(access.evaluate(&anonymous()), GuardOutcome::Redirect(SIGN_IN_PATH));
    }

    #[test]
    fn test_public_only_with_session_redirects_to_events() {
        let access = Access {
            public_only: true,
            ..Access::default()
        };
        assert_eq!(access.evaluate(&visitor()), GuardOutcome::Redirect(MEMBER_HOME_PATH));
        assert_eq!(access.evaluate(&anonymous()), GuardOutcome::Allow);
    }

    #[test]
    fn test_role_mismatch_denies_in_place() {
        let access = Access {
            requires_auth: true,
            required_role: Some(Role::Admin),
            ..Access::default()
        };
        assert_eq!(access.evaluate(&visitor()), GuardOutcome::Deny);
        assert_eq!(access.evaluate(&admin()), GuardOutcome::Allow);
    }

    #[test]
    fn test_auth_check_precedes_role_check() {
        let access = Access {
            requires_auth: true,
            required_role: Some(Role::Admin),
            ..Access::default()
        };
        // An anonymous viewer is redirected, never denied, regardless of role.
        assert_eq!(access.evaluate(&anonymous()), GuardOutcome::Redirect(SIGN_IN_PATH));
    }

    #[test]
    fn test_open_route_allows_everyone() {
        let access = Access::default();
        assert_eq!(access.evaluate(&anonymous()), GuardOutcome::Allow);
        assert_eq!(access.evaluate(&admin()), GuardOutcome::Allow);
    }

    #[test]
    fn test_role_wire_strings() {
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::from_str("visitor"), Some(Role::Visitor));
        assert_eq!(Role::from_str("owner"), None);
        assert_eq!(Role::from_str("Admin"), None);
    }
}
