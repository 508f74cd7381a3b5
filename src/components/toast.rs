use std::time::Duration;

use leptos::prelude::*;

const TOAST_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ToastKind {
    Success,
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
struct Toast {
    id: u32,
    kind: ToastKind,
    title: &'static str,
    message: String,
}

/// Transient, non-blocking notifications. Each toast dismisses itself after
/// a few seconds; nothing here blocks or retries anything.
#[derive(Clone, Copy)]
pub struct Toaster {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u32>,
}

impl Toaster {
    pub fn success(&self, title: &'static str, message: String) {
        self.push(ToastKind::Success, title, message);
    }

    pub fn error(&self, title: &'static str, message: String) {
        self.push(ToastKind::Error, title, message);
    }

    /// Used for rate-limit notices: visible, transient, not a form error.
    pub fn warning(&self, title: &'static str, message: String) {
        self.push(ToastKind::Warning, title, message);
    }

    fn push(&self, kind: ToastKind, title: &'static str, message: String) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.toasts.update(|list| {
            list.push(Toast {
                id,
                kind,
                title,
                message,
            })
        });

        let toasts = self.toasts;
        set_timeout(
            move || toasts.update(|list| list.retain(|t| t.id != id)),
            TOAST_LIFETIME,
        );
    }
}

pub fn provide_toaster() {
    provide_context(Toaster {
        toasts: RwSignal::new(Vec::new()),
        next_id: RwSignal::new(0),
    });
}

pub fn use_toaster() -> Toaster {
    expect_context::<Toaster>()
}

/// Fixed-position stack that renders whatever the [`Toaster`] currently holds.
#[component]
pub fn ToastTray() -> impl IntoView {
    let toaster = use_toaster();

    view! {
        <div class="toast-tray">
            {move || {
                toaster
                    .toasts
                    .get()
                    .into_iter()
                    .map(|toast| {
                        let kind_class = match toast.kind {
                            ToastKind::Success => "toast toast-success",
                            ToastKind::Error => "toast toast-error",
                            ToastKind::Warning => "toast toast-warning",
                        };
                        view! {
                            <div class=kind_class>
                                <span class="toast-title">{toast.title}</span>
                                <span class="toast-message">{toast.message}</span>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
