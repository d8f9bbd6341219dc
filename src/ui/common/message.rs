//! Message components for showing errors and acknowledgements

use leptos::prelude::*;

use crate::ui::theme::Style;

/// Error message component
/// Displays an error message while the signal holds one
#[component]
pub fn ErrorMessage(
    /// Error signal - shows message when Some, hidden when None
    #[prop(into)]
    error: Signal<Option<String>>,
    /// Box style
    #[prop(optional)]
    style: Style,
) -> impl IntoView {
    let css = style.css();
    view! {
        <Show when=move || error.get().is_some()>
            <div role="alert" style=css.clone()>
                {move || error.get().unwrap_or_default()}
            </div>
        </Show>
    }
}

/// Success message component
/// Displays a success message while the signal holds one
#[component]
pub fn SuccessMessage(
    /// Success message signal - shows when Some, hidden when None
    #[prop(into)]
    message: Signal<Option<String>>,
    /// Box style
    #[prop(optional)]
    style: Style,
) -> impl IntoView {
    let css = style.css();
    view! {
        <Show when=move || message.get().is_some()>
            <div role="status" style=css.clone()>
                {move || message.get().unwrap_or_default()}
            </div>
        </Show>
    }
}
