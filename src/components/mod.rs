pub mod course_select;
pub mod grade_chart;
pub mod grade_form;
pub mod login_gate;
pub mod spinner;
pub mod toast;
