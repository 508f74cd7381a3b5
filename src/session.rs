use leptos::logging;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;

/// Where the one-shot session probe stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Probe still in flight; the gate shows a blocking spinner.
    Checking,
    /// Session cookie is valid; the app renders.
    Authenticated,
    /// No usable session; the gate shows the login call-to-action.
    Anonymous,
}

/// Session context passed explicitly through the component tree.
///
/// The state resolves exactly once per app load. It is never re-checked
/// reactively; a 401 on a later call means the session expired and the
/// caller redirects through [`AuthContext::login`] instead of flipping it.
#[derive(Clone, Copy)]
pub struct AuthContext {
    state: ReadSignal<SessionState>,
}

impl AuthContext {
    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    pub fn login(&self) {
        api::redirect_to_login();
    }

    pub fn logout(&self) {
        api::redirect_to_logout();
    }
}

/// Create the auth context and kick off the mount-time probe.
///
/// Fail-closed: a probe that errors out for any reason, including a 429,
/// resolves to [`SessionState::Anonymous`] rather than leaving the user in
/// an ambiguous state.
pub fn provide_auth_context() {
    let (state, set_state) = signal(SessionState::Checking);
    provide_context(AuthContext { state });

    spawn_local(async move {
        let resolved = match api::has_login().await {
            Ok(true) => SessionState::Authenticated,
            Ok(false) => SessionState::Anonymous,
            Err(e) => {
                logging::error!("session probe failed: {e}");
                SessionState::Anonymous
            }
        };
        set_state.set(resolved);
    });
}

pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}
