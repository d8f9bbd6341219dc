//! Mutually exclusive role selector

use leptos::prelude::*;

use crate::core::Role;
use crate::ui::theme::use_login_theme;

/// One button per role; exactly one is active at a time
#[component]
pub fn RoleSwitch(
    /// Currently selected role
    #[prop(into)]
    selected: Signal<Role>,
    /// Called with the role whose button was clicked
    on_select: Callback<Role>,
) -> impl IntoView {
    let theme = use_login_theme();

    let buttons = Role::ALL
        .into_iter()
        .map(|role| {
            let theme = theme.clone();
            view! {
                <button
                    type="button"
                    aria-pressed=move || (selected.get() == role).to_string()
                    style=move || theme.role_button_style(selected.get() == role).css()
                    on:click=move |_| on_select.run(role)
                >
                    {role.label()}
                </button>
            }
        })
        .collect_view();

    view! {
        <div role="group" aria-label="Sign in as" style=theme.role_row.css()>
            {buttons}
        </div>
    }
}
