use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, ApiError};
use crate::app::GradesVersion;
use crate::components::toast::use_toaster;
use crate::grades::{parse_total_marks, Grade, GradeSubmission, GRADE_OPTIONS};
use crate::session::use_auth;

/// Self-report form for one course: total marks plus a letter grade.
///
/// Everything is validated locally before a request goes out. Submits are
/// not re-entrant; the button stays disabled while one is in flight.
#[component]
pub fn GradeForm(course_id: Signal<String>) -> impl IntoView {
    let auth = use_auth();
    let toaster = use_toaster();
    let grades_version = expect_context::<GradesVersion>();

    let (marks_input, set_marks_input) = signal(String::new());
    let (marks_error, set_marks_error) = signal::<Option<String>>(None);
    let (selected_grade, set_selected_grade) = signal(String::from("F"));
    let (grade_error, set_grade_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

    let submit = move |_| {
        if submitting.get() {
            return;
        }

        let total_marks = match parse_total_marks(&marks_input.get()) {
            Ok(v) => {
                set_marks_error.set(None);
                v
            }
            Err(e) => {
                set_marks_error.set(Some(e.to_string()));
                return;
            }
        };

        // The segmented control only offers valid symbols, but the strict
        // parse still guards the wire format.
        let grade = match selected_grade.get().parse::<Grade>() {
            Ok(g) => {
                set_grade_error.set(None);
                g
            }
            Err(e) => {
                set_grade_error.set(Some(e.to_string()));
                return;
            }
        };

        let submission = GradeSubmission {
            course_id: course_id.get(),
            total_marks,
            grade: grade.to_string(),
        };

        set_submitting.set(true);
        spawn_local(async move {
            match api::submit_grade(&submission).await {
                Ok(_) => {
                    toaster.success("Success", "grade submitted".to_string());
                    set_marks_input.set(String::new());
                    set_selected_grade.set(String::from("F"));
                    // Invalidate only after the server ack, so the chart
                    // refetch sees the new record.
                    grades_version.0.update(|v| *v += 1);
                }
                Err(ApiError::Unauthorized) => auth.login(),
                Err(e @ ApiError::RateLimited) => {
                    toaster.warning("Slow down", e.to_string());
                }
                Err(e) => toaster.error("Error", e.to_string()),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="grade-form">
            <p class="form-notice">
                "only 1 grade allowed per user per course. resubmitting will overwrite the previous grade."
            </p>

            <div class="form-group">
                <label>"course total"</label>
                <input
                    type="number"
                    class="input marks-input"
                    placeholder="course total"
                    prop:value=move || marks_input.get()
                    on:input=move |ev| {
                        set_marks_input.set(event_target_value(&ev));
                    }
                    disabled=move || submitting.get()
                />
                {move || {
                    marks_error.get().map(|e| {
                        view! { <span class="field-error">{e}</span> }
                    })
                }}
            </div>

            <div class="form-group">
                <label>"grade"</label>
                <div class="grade-options" role="radiogroup">
                    {GRADE_OPTIONS
                        .iter()
                        .map(|&option| {
                            let option_class = move || {
                                if selected_grade.get() == option {
                                    "grade-option selected"
                                } else {
                                    "grade-option"
                                }
                            };
                            view! {
                                <button
                                    class=option_class
                                    on:click=move |_| set_selected_grade.set(option.to_string())
                                    disabled=move || submitting.get()
                                >
                                    {option}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>
                {move || {
                    grade_error.get().map(|e| {
                        view! { <span class="field-error">{e}</span> }
                    })
                }}
            </div>

            <div class="form-group">
                <button
                    class="btn btn-primary"
                    on:click=submit
                    disabled=move || submitting.get()
                >
                    {move || if submitting.get() { "submitting..." } else { "submit" }}
                </button>
                <span class="form-footnote">"submissions are anonymous"</span>
            </div>
        </div>
    }
}
