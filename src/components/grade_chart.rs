use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, ApiError};
use crate::app::GradesVersion;
use crate::components::spinner::Spinner;
use crate::components::toast::use_toaster;
use crate::grades::{grade_to_number, number_to_grade, GradeRecord};
use crate::session::use_auth;

// Fixed plot geometry. The x domain is the 0..=100 marks range, the y domain
// is the 0..=11 grade scale, matching the codec.
const PLOT_WIDTH: f64 = 640.0;
const PLOT_HEIGHT: f64 = 320.0;
const MARGIN_LEFT: f64 = 48.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 16.0;
const MARGIN_BOTTOM: f64 = 40.0;
const X_MAX: f64 = 100.0;
const Y_MAX: f64 = 11.0;

const X_TICKS: [f64; 6] = [0.0, 20.0, 40.0, 60.0, 80.0, 100.0];

fn inner_width() -> f64 {
    PLOT_WIDTH - MARGIN_LEFT - MARGIN_RIGHT
}

fn inner_height() -> f64 {
    PLOT_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
}

/// Horizontal pixel for a marks value, clamped into the fixed domain.
fn x_pixel(marks: f64) -> f64 {
    let clamped = marks.clamp(0.0, X_MAX);
    MARGIN_LEFT + (clamped / X_MAX) * inner_width()
}

/// Vertical pixel for a grade-scale value (0 at the bottom).
fn y_pixel(scale: i32) -> f64 {
    let clamped = f64::from(scale).clamp(0.0, Y_MAX);
    MARGIN_TOP + (1.0 - clamped / Y_MAX) * inner_height()
}

/// Integer y ticks with their decoded labels. Off-scale steps get the
/// codec's empty label and render as bare gridlines.
fn y_ticks() -> Vec<(i32, &'static str)> {
    (0..=11).map(|n| (n, number_to_grade(n))).collect()
}

/// Hover text for one record, decoding through the codec both ways so the
/// label always shows a symbol the scale knows about.
fn tooltip_label(record: &GradeRecord) -> String {
    format!(
        "total: {}, grade: {}",
        record.total_marks,
        number_to_grade(grade_to_number(&record.grade))
    )
}

/// Scatter plot of every submitted record for the selected course.
///
/// Refetches whenever the course id or the invalidation counter changes and
/// rebuilds the whole plot from the new result, so a course switch never
/// shows the previous course's points. Fetch failures are terminal for that
/// attempt; nothing retries.
#[component]
pub fn GradeChart(course_id: Signal<String>) -> impl IntoView {
    let auth = use_auth();
    let toaster = use_toaster();
    let grades_version = expect_context::<GradesVersion>();

    let (records, set_records) = signal::<Vec<GradeRecord>>(Vec::new());
    let (loading, set_loading) = signal(true);
    let (hover, set_hover) = signal::<Option<(f64, f64, String)>>(None);

    Effect::new(move |_| {
        let id = course_id.get();
        let _version = grades_version.0.get();
        if id.is_empty() {
            return;
        }

        // Clear the previous course's points before the new fetch lands.
        set_records.set(Vec::new());
        set_hover.set(None);
        set_loading.set(true);

        spawn_local(async move {
            match api::course_grades(&id).await {
                Ok(rows) => set_records.set(rows),
                Err(ApiError::Unauthorized) => auth.login(),
                Err(e @ ApiError::RateLimited) => {
                    toaster.warning("Slow down", e.to_string());
                }
                Err(e) => toaster.error("Error", e.to_string()),
            }
            set_loading.set(false);
        });
    });

    let plot_right = PLOT_WIDTH - MARGIN_RIGHT;
    let plot_bottom = PLOT_HEIGHT - MARGIN_BOTTOM;

    view! {
        <div class="grade-chart">
            {move || {
                if loading.get() {
                    return view! {
                        <div class="chart-loading">
                            <Spinner />
                        </div>
                    }
                    .into_any();
                }

                let y_grid: Vec<_> = y_ticks()
                    .into_iter()
                    .map(|(n, label)| {
                        let y = y_pixel(n);
                        let label_x = MARGIN_LEFT - 8.0;
                        let label_y = y + 4.0;
                        view! {
                            <line
                                x1=MARGIN_LEFT
                                y1=y
                                x2=plot_right
                                y2=y
                                class="chart-grid"
                            />
                            <text x=label_x y=label_y class="chart-tick chart-tick-y">
                                {label}
                            </text>
                        }
                    })
                    .collect();

                let x_grid: Vec<_> = X_TICKS
                    .iter()
                    .map(|&m| {
                        let x = x_pixel(m);
                        let label_y = plot_bottom + 16.0;
                        view! {
                            <line
                                x1=x
                                y1=MARGIN_TOP
                                x2=x
                                y2=plot_bottom
                                class="chart-grid"
                            />
                            <text x=x y=label_y class="chart-tick chart-tick-x">
                                {format!("{m}")}
                            </text>
                        }
                    })
                    .collect();

                let points: Vec<_> = records
                    .get()
                    .iter()
                    .map(|record| {
                        let x = x_pixel(record.total_marks);
                        let y = y_pixel(grade_to_number(&record.grade));
                        let top = y - 6.0;
                        let bottom = y + 6.0;
                        let label = tooltip_label(record);
                        view! {
                            <line
                                x1=x
                                y1=top
                                x2=x
                                y2=bottom
                                class="chart-point"
                                on:mouseenter=move |_| {
                                    set_hover.set(Some((x, y, label.clone())))
                                }
                                on:mouseleave=move |_| set_hover.set(None)
                            />
                        }
                    })
                    .collect();

                let x_title_x = PLOT_WIDTH / 2.0;
                let x_title_y = PLOT_HEIGHT - 4.0;
                let y_title_y = PLOT_HEIGHT / 2.0;
                let y_title_transform = format!("rotate(-90 12 {y_title_y})");

                view! {
                    <div class="chart-frame">
                        <svg width=PLOT_WIDTH height=PLOT_HEIGHT class="chart-svg">
                            {y_grid}
                            {x_grid}
                            {points}
                            <text x=x_title_x y=x_title_y class="chart-axis-title">
                                "course total"
                            </text>
                            <text
                                x=12.0
                                y=y_title_y
                                class="chart-axis-title"
                                transform=y_title_transform
                            >
                                "grade"
                            </text>
                        </svg>
                        {move || {
                            hover.get().map(|(x, y, label)| {
                                let left = format!("{x}px");
                                let top = format!("{y}px");
                                view! {
                                    <div class="chart-tooltip" style:left=left style:top=top>
                                        {label}
                                    </div>
                                }
                            })
                        }}
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(total_marks: f64, grade: &str) -> GradeRecord {
        GradeRecord {
            total_marks,
            grade: grade.to_string(),
        }
    }

    #[test]
    fn test_x_pixel_spans_inner_plot() {
        assert_eq!(x_pixel(0.0), MARGIN_LEFT);
        assert_eq!(x_pixel(100.0), PLOT_WIDTH - MARGIN_RIGHT);
        assert_eq!(x_pixel(50.0), MARGIN_LEFT + inner_width() / 2.0);
    }

    #[test]
    fn test_x_pixel_clamps_out_of_domain() {
        assert_eq!(x_pixel(-5.0), x_pixel(0.0));
        assert_eq!(x_pixel(250.0), x_pixel(100.0));
    }

    #[test]
    fn test_y_pixel_is_inverted() {
        assert_eq!(y_pixel(0), PLOT_HEIGHT - MARGIN_BOTTOM);
        assert_eq!(y_pixel(11), MARGIN_TOP);
        assert!(y_pixel(10) < y_pixel(3), "higher grades sit higher up");
    }

    #[test]
    fn test_y_ticks_decode_through_codec() {
        let ticks = y_ticks();
        assert_eq!(ticks.len(), 12);
        assert_eq!(ticks[0], (0, "F"));
        assert_eq!(ticks[1], (1, ""));
        assert_eq!(ticks[2], (2, ""));
        assert_eq!(ticks[3], (3, "D-"));
        assert_eq!(ticks[10], (10, "A"));
        assert_eq!(ticks[11], (11, ""));
    }

    #[test]
    fn test_tooltip_decodes_grade_round_trip() {
        assert_eq!(tooltip_label(&record(87.5, "A-")), "total: 87.5, grade: A-");
        assert_eq!(tooltip_label(&record(90.0, "B")), "total: 90, grade: B");
    }

    #[test]
    fn test_tooltip_unknown_grade_falls_back_to_scale_floor() {
        // Unknown symbols encode to 0, which decodes to F.
        assert_eq!(tooltip_label(&record(12.0, "E")), "total: 12, grade: F");
    }
}
