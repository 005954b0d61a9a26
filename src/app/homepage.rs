use leptos::prelude::*;
use leptos_meta::Title;
use leptos_use::{use_timeout_fn, UseTimeoutFnReturn};

use super::bento::BentoGrid;

/// How long the greeting covers the page on first load.
const LOADING_MS: f64 = 5000.0;

#[component]
pub fn HomePage() -> impl IntoView {
    let (loading, set_loading) = signal(true);

    // cancelled with this scope, so the flag never flips on a torn-down page
    let UseTimeoutFnReturn { start, .. } =
        use_timeout_fn(move |_: ()| set_loading.set(false), LOADING_MS);
    start(());

    view! {
        <Title text="Home" />
        <Show when=move || !loading.get() fallback=|| view! { <Greeting /> }>
            <section class="pb-20 pt-36 text-center">
                <h1 class="text-4xl md:text-7xl font-bold">"Hello World"</h1>
            </section>
            <BentoGrid />
        </Show>
    }
}

#[component]
fn Greeting() -> impl IntoView {
    view! {
        <div class="min-h-screen flex justify-center items-center px-4">
            <h2 class="text-4xl md:text-7xl font-bold text-neutral-400">"Hello"</h2>
        </div>
    }
}
