// File: src/fields.rs
// Purpose: Element-id schema shared between view templates and the wiring layer

//! The fixed id contract between templates and wiring.
//!
//! Templates render these ids; the wiring layer reads input values and binds
//! interactions through them. Renaming one side silently breaks the other,
//! so both sides must reference these constants instead of string literals.

// Input fields
pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const NAME: &str = "name";
pub const ROLE: &str = "role";
pub const TITLE: &str = "title";
pub const DESCRIPTION: &str = "description";
pub const DATE: &str = "date";
pub const TIME: &str = "time";
pub const LOCATION: &str = "location";
pub const CAPACITY: &str = "capacity";

// Buttons and header controls
pub const REGISTER_BTN: &str = "registerBtn";
pub const DELETE_BTN: &str = "deleteBtn";
pub const NAV_TOGGLE: &str = "navToggle";
pub const TOP_NAV: &str = "topNav";

// Inline form error line
pub const FORM_ERROR: &str = "formError";

// Forms
pub const LOGIN_FORM: &str = "loginForm";
pub const REGISTER_FORM: &str = "registerForm";
pub const EVENT_FORM: &str = "eventForm";
