use yew::prelude::*;

mod api;
mod app;
mod config;
mod device;
mod download;
mod realtime;
mod styles;

use app::App;
use config::Config;
use styles::*;

#[function_component(Root)]
fn root() -> Html {
    match Config::from_build_env() {
        Some(config) => html! {
            <div class="min-h-screen bg-gray-900 text-gray-200 px-4 pb-10">
                <App {config} />
            </div>
        },
        None => html! {
            <div class="min-h-screen bg-gray-900 flex items-center justify-center px-4">
                <div class={alert_style("error")}>
                    <h1 class="text-xl font-bold mb-2">{"Configuration error"}</h1>
                    <p>{"SUPABASE_URL and SUPABASE_ANON_KEY must be set when building this app."}</p>
                </div>
            </div>
        },
    }
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
    yew::Renderer::<Root>::new().render();
}
