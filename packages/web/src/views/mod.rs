//! Route components. Each one hosts a shared view and turns its navigation
//! requests into router pushes.

use dioxus::prelude::*;
use ui::views::{
    CreateProductView, HomeView, LoginView, NotFoundView, NotificationsView, ProductDetailView,
    ProfileView, RegisterView,
};
use ui::NavTarget;

use crate::Route;

fn use_nav_handler() -> impl FnMut(NavTarget) + Copy + 'static {
    let nav = use_navigator();
    move |target: NavTarget| {
        nav.push(Route::from(target));
    }
}

#[component]
pub fn Home() -> Element {
    let on_navigate = use_nav_handler();
    rsx! { HomeView { on_navigate } }
}

#[component]
pub fn Login() -> Element {
    let on_navigate = use_nav_handler();
    rsx! { LoginView { on_navigate } }
}

#[component]
pub fn Register() -> Element {
    let on_navigate = use_nav_handler();
    rsx! { RegisterView { on_navigate } }
}

#[component]
pub fn AddProduct() -> Element {
    let on_navigate = use_nav_handler();
    rsx! { CreateProductView { on_navigate } }
}

#[component]
pub fn ProductDetail(id: u64) -> Element {
    let on_navigate = use_nav_handler();
    rsx! { ProductDetailView { id, on_navigate } }
}

#[component]
pub fn Notifications() -> Element {
    let on_navigate = use_nav_handler();
    rsx! { NotificationsView { on_navigate } }
}

#[component]
pub fn Profile() -> Element {
    let on_navigate = use_nav_handler();
    rsx! { ProfileView { on_navigate } }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let on_navigate = use_nav_handler();
    rsx! { NotFoundView { path: segments.join("/"), on_navigate } }
}
