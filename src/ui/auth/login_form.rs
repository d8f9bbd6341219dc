//! Login form component
//!
//! Role selector plus email and password inputs. Submitting posts the
//! credentials to the auth endpoint and stores the returned session in
//! `localStorage`.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::role_switch::RoleSwitch;
use super::state::{LoginState, authenticate};
use crate::core::SessionArtifact;
use crate::ui::common::{ErrorMessage, SuccessMessage};
use crate::ui::http::FetchAuthClient;
use crate::ui::storage::BrowserStorage;
use crate::ui::theme::use_login_theme;

/// Login form component
#[component]
pub fn LoginForm(
    /// Callback when login is successful
    #[prop(optional, into)]
    on_success: Option<Callback<SessionArtifact>>,
    /// Origin of the API; empty means same origin
    #[prop(optional, into)]
    api_base: String,
) -> impl IntoView {
    let theme = use_login_theme();
    let client = FetchAuthClient::new(api_base);

    let form = RwSignal::new(LoginState::new());
    let can_submit = Memo::new(move |_| form.with(LoginState::can_submit));
    let role = Signal::derive(move || form.with(|f| f.role));
    let error = Signal::derive(move || form.with(|f| f.error.clone()));
    let notice = Signal::derive(move || form.with(|f| f.notice.clone()));

    // Handle form submission
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let Some(credentials) = form.try_update(LoginState::begin_submit).flatten() else {
            return;
        };

        let client = client.clone();
        spawn_local(async move {
            let mut storage = BrowserStorage;
            let outcome = authenticate(&client, &mut storage, &credentials).await;
            let session = form.try_update(|f| f.finish_submit(outcome)).flatten();

            if let (Some(session), Some(callback)) = (session, on_success) {
                callback.run(session);
            }
        });
    };

    let submit_theme = theme.clone();
    let password_label = theme.label.clone().with("margin-top", "12px");

    view! {
        <div style=theme.card.css()>
            <p style=theme.sign_in_as.css()>"Sign in as"</p>

            <RoleSwitch
                selected=role
                on_select=Callback::new(move |r| form.update(|f| f.role = r))
            />

            <form on:submit=on_submit>
                <label for="login-email" style=theme.label.css()>"Email Address"</label>
                <input
                    id="login-email"
                    name="email"
                    style=theme.input.css()
                    placeholder="name@example.com"
                    autocomplete="email"
                    prop:value=move || form.with(|f| f.email.clone())
                    on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                />

                <label for="login-password" style=password_label.css()>"Password"</label>
                <input
                    id="login-password"
                    name="password"
                    type="password"
                    style=theme.input.css()
                    placeholder="Minimum 6 characters"
                    autocomplete="current-password"
                    prop:value=move || form.with(|f| f.password.clone())
                    on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                />

                <ErrorMessage error=error style=theme.error.clone() />
                <SuccessMessage message=notice style=theme.notice.clone() />

                <button
                    type="submit"
                    disabled=move || !can_submit.get()
                    style=move || submit_theme.submit_button_style(can_submit.get()).css()
                >
                    {move || form.with(|f| f.submit_label())}
                </button>
            </form>
        </div>
    }
}
