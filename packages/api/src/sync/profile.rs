use store::{SessionStore, UserProfile};

use super::auth::remember_user;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Product, ProductQuery, Transaction};
use crate::transport::Transport;

/// Everything the profile page shows.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileData {
    pub user: UserProfile,
    pub products: Vec<Product>,
    pub transactions: Vec<Transaction>,
}

/// Load the signed-in user's account, listings and wallet history as one
/// resource. The fresh account also replaces the cached profile, whose balance
/// goes stale after purchases made elsewhere.
pub async fn load_profile<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
) -> Result<ProfileData, ApiError> {
    let user = client.current_user().await?;
    remember_user(client.session(), &user);
    let products = client.products(&ProductQuery::mine()).await?;
    let transactions = client.transactions().await?;
    Ok(ProfileData {
        user,
        products,
        transactions,
    })
}
