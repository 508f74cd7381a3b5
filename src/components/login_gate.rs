use leptos::prelude::*;

use crate::components::spinner::Spinner;
use crate::session::{use_auth, SessionState};

/// Blocks the app until the session probe resolves: spinner while checking,
/// login call-to-action for anonymous visitors, children once authenticated.
#[component]
pub fn LoginGate(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();

    move || match auth.state() {
        SessionState::Checking => view! {
            <div class="gate-screen">
                <Spinner />
            </div>
        }
        .into_any(),
        SessionState::Anonymous => view! {
            <div class="gate-screen">
                <div class="gate-cta">
                    <h2>"Please login to continue"</h2>
                    <button class="btn btn-primary" on:click=move |_| auth.login()>
                        "Login with institute account"
                    </button>
                </div>
            </div>
        }
        .into_any(),
        SessionState::Authenticated => children().into_any(),
    }
}
