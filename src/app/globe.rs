#[cfg(feature = "hydrate")]
mod three;

use std::sync::Arc;

use leptos::{html, prelude::*};

use crate::data::{get_arcs, get_globe_config, get_land, GLOBE_CONFIG, LAND, SAMPLE_ARCS};
use crate::globe::{validate_arcs, CandidateArc, GlobeConfig};

/// The globe as it sits in the bento grid, fed from the embedded sample data.
#[component]
pub fn GlobeTile() -> impl IntoView {
    let config = get_globe_config(GLOBE_CONFIG).unwrap_or_else(|err| {
        log::error!("{err}; using default globe config");
        GlobeConfig::default()
    });
    let land = get_land(LAND).unwrap_or_else(|err| {
        log::error!("{err}");
        Arc::new(Vec::new())
    });
    let arcs = get_arcs(SAMPLE_ARCS)
        .map(|arcs| arcs.to_vec())
        .unwrap_or_else(|err| {
            log::error!("{err}");
            Vec::new()
        });

    view! {
        <div class="flex items-center justify-center absolute -left-5 top-36 md:top-40 w-full h-full">
            <div class="max-w-7xl mx-auto w-full relative overflow-hidden px-4 h-96">
                <div class="absolute w-full bottom-0 inset-x-0 h-40 bg-gradient-to-b pointer-events-none select-none from-transparent to-slate-950 z-40" />
                <div class="absolute w-full -bottom-20 h-72 md:h-full z-10">
                    <World config land data=Signal::stored(arcs) />
                </div>
            </div>
        </div>
    }
}

/// Renders nothing unless `data` holds at least one valid arc. On the client, mounts the
/// three-globe renderer and pulses a random subset of points every two seconds while mounted.
#[component]
pub fn World(
    config: GlobeConfig,
    land: Arc<Vec<serde_json::Value>>,
    data: Signal<Vec<CandidateArc>>,
) -> impl IntoView {
    let container = NodeRef::<html::Div>::new();
    let has_data = Memo::new(move |_| data.with(|d| !validate_arcs(d).is_empty()));

    #[cfg(feature = "hydrate")]
    {
        use leptos_use::use_interval_fn;

        use crate::globe::{GlobeController, RING_INTERVAL_MS};
        use three::ThreeGlobeEngine;

        let controller =
            StoredValue::new_local(GlobeController::<ThreeGlobeEngine>::new(config, land));

        Effect::watch(
            move || data.get(),
            move |arcs, _, _| {
                controller.update_value(|c| {
                    c.set_data(arcs);
                });
            },
            true,
        );

        // the container only exists while there is valid data; the engine follows it
        Effect::new(move |_| {
            let visible = has_data.get();
            let el = container.get().filter(|_| visible);
            controller.update_value(|c| match el {
                Some(el) if !c.is_attached() => {
                    match ThreeGlobeEngine::mount(&el, &c.scene_options()) {
                        Ok(engine) => c.attach(engine),
                        Err(err) => log::error!("Error mounting globe: {err}"),
                    }
                }
                Some(_) => {}
                None => {
                    c.detach();
                }
            });
        });

        // paused automatically when this scope is disposed
        use_interval_fn(
            move || {
                controller.try_update_value(|c| {
                    c.tick();
                });
            },
            RING_INTERVAL_MS,
        );

        on_cleanup(move || {
            // dropping the engine disposes the renderer
            controller.try_update_value(|c| c.detach());
        });
    }

    #[cfg(not(feature = "hydrate"))]
    let _ = (config, land);

    view! {
        <Show when=move || has_data.get()>
            <div node_ref=container class="w-full h-full" />
        </Show>
    }
}
