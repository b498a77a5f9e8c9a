use crate::analytics::page_view;
use leptos::*;
use leptos_router::use_location;

/// Sends a page view every time the router location changes, including the
/// initial render. Must sit inside a `<Router>`; renders nothing.
#[component]
pub fn PageViewTracker() -> impl IntoView {
    let location = use_location();

    create_effect(move |_| {
        // Subscribe to both path and query changes
        location.pathname.track();
        location.search.track();

        if let Some(href) = web_sys::window().and_then(|w| w.location().href().ok()) {
            page_view(&href, None);
        }
    });
}
