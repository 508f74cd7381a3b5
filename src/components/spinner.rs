use leptos::prelude::*;

#[component]
pub fn Spinner() -> impl IntoView {
    view! { <div class="spinner" role="status" aria-label="loading"></div> }
}
