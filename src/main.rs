mod api;
mod app;
mod components;
mod grades;
mod session;

use app::App;

fn main() {
    leptos::mount::mount_to_body(App);
}
