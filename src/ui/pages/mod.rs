//! Application pages module
//!
//! - Login page (home)
//! - Not found page

mod login;
mod not_found;

pub use login::LoginPage;
pub use not_found::NotFoundPage;
