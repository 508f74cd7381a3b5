use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, ApiError};
use crate::components::course_select::CourseSelect;
use crate::components::grade_chart::GradeChart;
use crate::components::grade_form::GradeForm;
use crate::components::login_gate::LoginGate;
use crate::components::toast::{provide_toaster, use_toaster, ToastTray};
use crate::grades::Course;
use crate::session::{provide_auth_context, use_auth};

/// Counter bumped after each acknowledged submission. The distribution chart
/// tracks it and refetches; this is the only cross-component invalidation
/// primitive in the app.
#[derive(Clone, Copy)]
pub struct GradesVersion(pub RwSignal<u32>);

#[component]
pub fn App() -> impl IntoView {
    provide_toaster();
    provide_auth_context();
    provide_context(GradesVersion(RwSignal::new(0)));

    view! {
        <style>{include_str!("app.css")}</style>
        <LoginGate>
            <Main />
        </LoginGate>
        <ToastTray />
    }
}

/// Everything behind the login gate: course picker, submission form, chart.
#[component]
fn Main() -> impl IntoView {
    let auth = use_auth();
    let toaster = use_toaster();

    let (selected_course, set_selected_course) = signal(String::new());
    let (courses, set_courses) = signal::<Vec<Course>>(Vec::new());
    let (courses_loading, set_courses_loading) = signal(true);

    // Load the course directory once per app load.
    Effect::new(move |_| {
        spawn_local(async move {
            match api::list_courses().await {
                Ok(list) => set_courses.set(list),
                Err(ApiError::Unauthorized) => auth.login(),
                Err(e @ ApiError::RateLimited) => {
                    toaster.warning("Slow down", e.to_string());
                }
                Err(e) => toaster.error("Error", e.to_string()),
            }
            set_courses_loading.set(false);
        });
    });

    view! {
        <div class="app-shell">
            <header class="app-header">
                <h1>"gradeboard"</h1>
                <button class="btn" on:click=move |_| auth.logout()>
                    "logout"
                </button>
            </header>

            <CourseSelect
                courses=Signal::from(courses)
                loading=courses_loading
                value=selected_course
                on_select=move |id| set_selected_course.set(id)
            />

            {move || {
                if selected_course.get().is_empty() {
                    view! {
                        <p class="app-hint">
                            "pick a course to share your grade and see its distribution"
                        </p>
                    }
                    .into_any()
                } else {
                    view! {
                        <div class="course-panel">
                            <GradeForm course_id=Signal::from(selected_course) />
                            <GradeChart course_id=Signal::from(selected_course) />
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
