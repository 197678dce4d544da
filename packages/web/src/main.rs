use dioxus::prelude::*;

use ui::{load_config, Access, NavTarget, Navbar, SessionProvider, use_session};
use views::{AddProduct, Home, Login, NotFound, Notifications, ProductDetail, Profile, Register};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},
        #[route("/add-product")]
        AddProduct {},
        #[route("/product/:id")]
        ProductDetail { id: u64 },
        #[route("/notifications")]
        Notifications {},
        #[route("/profile")]
        Profile {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl Route {
    /// The page this route shows, or `None` for unknown paths.
    fn nav_target(&self) -> Option<NavTarget> {
        match self {
            Route::Home {} => Some(NavTarget::Home),
            Route::Login {} => Some(NavTarget::Login),
            Route::Register {} => Some(NavTarget::Register),
            Route::AddProduct {} => Some(NavTarget::AddProduct),
            Route::ProductDetail { id } => Some(NavTarget::Product(*id)),
            Route::Notifications {} => Some(NavTarget::Notifications),
            Route::Profile {} => Some(NavTarget::Profile),
            Route::NotFound { .. } => None,
        }
    }
}

impl From<NavTarget> for Route {
    fn from(target: NavTarget) -> Self {
        match target {
            NavTarget::Home => Route::Home {},
            NavTarget::Login => Route::Login {},
            NavTarget::Register => Route::Register {},
            NavTarget::AddProduct => Route::AddProduct {},
            NavTarget::Product(id) => Route::ProductDetail { id },
            NavTarget::Notifications => Route::Notifications {},
            NavTarget::Profile => Route::Profile {},
        }
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    if let Err(e) = dioxus::logger::init(tracing::Level::INFO) {
        eprintln!("logger already initialised: {e}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // baked in at build time, e.g. STOREFRONT_API_URL=https://shop.example/api/
    let config = use_hook(|| load_config(option_env!("STOREFRONT_API_URL")));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        SessionProvider {
            config,
            Router::<Route> {}
        }
    }
}

/// Layout around every known page: the navbar plus session gating.
#[component]
fn Shell() -> Element {
    let session = use_session();
    let route = use_route::<Route>();
    let nav = use_navigator();

    let authenticated = session().is_authenticated();
    let redirect = route
        .nav_target()
        .and_then(|target| match target.access(authenticated) {
            Access::Allow => None,
            Access::Redirect(to) => Some(to),
        });

    use_effect(use_reactive(&redirect, move |redirect| {
        if let Some(to) = redirect {
            tracing::debug!(%to, "redirecting");
            nav.replace(Route::from(to));
        }
    }));

    rsx! {
        Navbar {
            on_navigate: move |target: NavTarget| {
                nav.push(Route::from(target));
            },
        }
        main {
            class: "app-main",
            if redirect.is_none() {
                Outlet::<Route> {}
            }
        }
    }
}
