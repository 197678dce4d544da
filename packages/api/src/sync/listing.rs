use super::resource::Resource;
use crate::error::ApiError;
use crate::models::Product;

/// What the product listing should render.
#[derive(Debug, PartialEq)]
pub enum ListingView<'a> {
    Loading,
    /// The backend has no products at all.
    Empty,
    /// Products exist but none match the search box.
    NoMatches,
    Items(Vec<&'a Product>),
    Failed(&'a ApiError),
}

/// Case-insensitive match on product name or owner username. A blank query
/// matches everything.
pub fn matches_search(product: &Product, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty()
        || product.name.to_lowercase().contains(&needle)
        || product.owner.username.to_lowercase().contains(&needle)
}

pub fn listing_view<'a>(state: &'a Resource<Vec<Product>>, search: &str) -> ListingView<'a> {
    match state {
        Resource::Idle | Resource::Loading => ListingView::Loading,
        Resource::Failed(err) => ListingView::Failed(err),
        Resource::Loaded(products) if products.is_empty() => ListingView::Empty,
        Resource::Loaded(products) => {
            let hits: Vec<&Product> = products
                .iter()
                .filter(|p| matches_search(p, search))
                .collect();
            if hits.is_empty() {
                ListingView::NoMatches
            } else {
                ListingView::Items(hits)
            }
        }
    }
}
