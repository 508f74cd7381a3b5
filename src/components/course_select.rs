use leptos::prelude::*;

use crate::grades::{filter_courses, Course};

/// A searchable course picker.
///
/// Replaces a native `<select>` with a text input that filters the directory
/// by name or composite identifier on every keystroke. Selection hands the
/// `id_sem` key to the parent; nothing persists across a reload.
#[component]
pub fn CourseSelect(
    /// Full course directory, fetched once per app load.
    courses: Signal<Vec<Course>>,
    /// True while the directory fetch is still in flight.
    loading: ReadSignal<bool>,
    /// The currently selected course id, empty when none.
    value: ReadSignal<String>,
    /// Callback when a course is picked.
    on_select: impl Fn(String) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    let (is_open, set_is_open) = signal(false);
    let (search_text, set_search_text) = signal(String::new());

    // Display name for the current selection
    let display_label = move || {
        let id = value.get();
        if id.is_empty() {
            return String::new();
        }
        courses
            .get()
            .iter()
            .find(|c| c.id_sem == id)
            .map(|c| c.name.clone())
            .unwrap_or(id)
    };

    let matching_courses = move || filter_courses(&courses.get(), &search_text.get());

    let on_input_focus = move |_: leptos::ev::FocusEvent| {
        set_is_open.set(true);
        set_search_text.set(String::new());
    };

    let on_input_change = move |ev: leptos::ev::Event| {
        set_search_text.set(event_target_value(&ev));
        set_is_open.set(true);
    };

    let on_pick = move |id: String| {
        on_select(id);
        set_is_open.set(false);
        set_search_text.set(String::new());
    };

    // Close dropdown when clicking outside. The listener is installed once
    // when the container node mounts and lives as long as the page; it is a
    // no-op while the dropdown is closed.
    let container_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move |_| {
        use wasm_bindgen::prelude::*;
        use wasm_bindgen::JsCast;

        let Some(container) = container_ref.get() else {
            return;
        };

        let closure = Closure::<dyn Fn(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
            if !is_open.get_untracked() {
                return;
            }
            if let Some(target) = ev.target() {
                if let Some(node) = target.dyn_ref::<web_sys::Node>() {
                    if !container.contains(Some(node)) {
                        set_is_open.set(false);
                    }
                }
            }
        });

        let window = web_sys::window().unwrap();
        let _ = window
            .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());

        closure.forget();
    });

    view! {
        <div
            class="course-select"
            class:open=move || is_open.get()
            node_ref=container_ref
        >
            <style>{include_str!("course_select.css")}</style>

            {move || {
                if is_open.get() {
                    // Open state: show search input
                    view! {
                        <input
                            type="text"
                            class="cs-search input"
                            placeholder="Search by name or course code..."
                            prop:value=move || search_text.get()
                            on:input=on_input_change
                            on:focus=on_input_focus
                            autofocus=true
                        />
                    }
                    .into_any()
                } else {
                    let label = display_label();
                    let placeholder = if loading.get() {
                        "Loading courses..."
                    } else {
                        "Select course"
                    };
                    let display_text = if label.is_empty() {
                        placeholder.to_string()
                    } else {
                        label
                    };
                    let has_value = !value.get().is_empty();
                    let display_class = if has_value {
                        "cs-display has-value"
                    } else {
                        "cs-display"
                    };

                    view! {
                        <div
                            class=display_class
                            on:click=move |_| {
                                set_is_open.set(true);
                                set_search_text.set(String::new());
                            }
                        >
                            <span class="cs-display-text">{display_text}</span>
                            <span class="cs-chevron">"\u{25BE}"</span>
                        </div>
                    }
                    .into_any()
                }
            }}

            {move || {
                if !is_open.get() {
                    return view! { <div style="display:none"></div> }.into_any();
                }

                let matches = matching_courses();

                if matches.is_empty() {
                    let notice = if loading.get() {
                        "Loading courses..."
                    } else {
                        "No matching courses"
                    };
                    return view! {
                        <div class="cs-dropdown">
                            <div class="cs-empty">{notice}</div>
                        </div>
                    }
                    .into_any();
                }

                let count = matches.len();
                let option_views: Vec<_> = matches
                    .into_iter()
                    .map(|course| {
                        let id = course.id_sem.clone();
                        let is_selected = value.get() == id;
                        let option_class = if is_selected {
                            "cs-option selected"
                        } else {
                            "cs-option"
                        };
                        let tag = format!("{} {}", course.code(), course.semester());
                        view! {
                            <div
                                class=option_class
                                on:mousedown=move |_| on_pick(id.clone())
                            >
                                <span class="cs-option-name">{course.name.clone()}</span>
                                <span class="cs-option-tag">{tag}</span>
                            </div>
                        }
                    })
                    .collect();

                let count_label =
                    format!("{} course{}", count, if count == 1 { "" } else { "s" });

                view! {
                    <div class="cs-dropdown">
                        <div class="cs-options">
                            {option_views}
                            <div class="cs-count">{count_label}</div>
                        </div>
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}
