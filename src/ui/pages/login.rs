//! Login page component
//!
//! Brand header above the login form. A successful login only shows an
//! acknowledgement; where to go next is up to the host application.

use leptos::prelude::*;

use crate::ui::auth::LoginForm;
use crate::ui::theme::use_login_theme;

/// Login page component
#[component]
pub fn LoginPage() -> impl IntoView {
    let theme = use_login_theme();

    view! {
        <div style=theme.page.css()>
            <div style=theme.center.css()>
                // Header
                <div style=theme.header.css()>
                    <div style=theme.logo.css() aria-hidden="true">"♥"</div>
                    <h1 style=theme.title.css()>"CareLink+"</h1>
                    <p style=theme.subtitle.css()>"Post-Referral Continuity Platform"</p>
                </div>

                <LoginForm />
            </div>
        </div>
    }
}
