//! Not found page component
//!
//! A 404 error page displayed when a route is not found.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::ui::theme::use_login_theme;

/// Not found (404) page component
#[component]
pub fn NotFoundPage() -> impl IntoView {
    let theme = use_login_theme();
    let link = theme.submit_button_style(true).with("display", "inline-block");

    view! {
        <div style=theme.page.css()>
            <div style=theme.header.css()>
                <h1 style=theme.title.css()>"404"</h1>
                <p style=theme.subtitle.css()>"The page you're looking for doesn't exist."</p>
                <A href="/" attr:style=link.with("width", "auto").css()>
                    "Back to sign in"
                </A>
            </div>
        </div>
    }
}
