//! Authentication UI module
//!
//! This module provides the login form, its role selector, and the state
//! machine behind them.

mod login_form;
mod role_switch;
pub mod state;

pub use login_form::LoginForm;
pub use role_switch::RoleSwitch;
pub use state::{GENERIC_LOGIN_ERROR, LoginError, LoginState, authenticate};
