pub mod auth;
pub mod common;
pub mod http;
pub mod pages;
pub mod storage;
pub mod theme;

pub use auth::{LoginForm, RoleSwitch};
pub use pages::{LoginPage, NotFoundPage};
pub use theme::{LoginTheme, Style, provide_login_theme, use_login_theme};
