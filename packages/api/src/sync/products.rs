//! Product mutations.
//!
//! Each function checks the session first, then any client-side rule, then
//! that the view has a loaded snapshot, and only then talks to the backend.
//! None of them touch the snapshot: on `Ok` the caller reloads the product.

use store::SessionStore;

use super::action::{authorize, require_loaded, settle, Action, ActionError};
use super::auth::refresh_profile;
use super::resource::Phase;
use crate::client::ApiClient;
use crate::models::{LikeStatus, NewProduct, PurchaseReceipt};
use crate::transport::Transport;

pub async fn toggle_like<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
    phase: Phase,
    product_id: u64,
) -> Result<LikeStatus, ActionError> {
    authorize(client.session(), Action::Like)?;
    require_loaded(phase, Action::Like)?;
    client
        .toggle_like(product_id)
        .await
        .map_err(|e| settle(client.session(), e))
}

pub async fn submit_comment<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
    phase: Phase,
    product_id: u64,
    content: &str,
) -> Result<(), ActionError> {
    authorize(client.session(), Action::Comment)?;
    let content = content.trim();
    if content.is_empty() {
        return Err(ActionError::Invalid {
            field: "content",
            message: "Comment cannot be empty",
        });
    }
    require_loaded(phase, Action::Comment)?;
    client
        .add_comment(product_id, content)
        .await
        .map_err(|e| settle(client.session(), e))
}

/// Buy a product. On success the cached profile is refreshed so the new
/// balance shows up; a failed refresh only logs.
pub async fn buy<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
    phase: Phase,
    product_id: u64,
) -> Result<PurchaseReceipt, ActionError> {
    authorize(client.session(), Action::Buy)?;
    require_loaded(phase, Action::Buy)?;
    let receipt = client
        .buy(product_id)
        .await
        .map_err(|e| settle(client.session(), e))?;
    tracing::info!(product_id, "purchase completed");

    if let Err(e) = refresh_profile(client).await {
        tracing::warn!("could not refresh profile after purchase: {e}");
    }
    Ok(receipt)
}

pub async fn delete_product<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
    phase: Phase,
    product_id: u64,
) -> Result<(), ActionError> {
    authorize(client.session(), Action::DeleteProduct)?;
    require_loaded(phase, Action::DeleteProduct)?;
    client
        .delete_product(product_id)
        .await
        .map_err(|e| settle(client.session(), e))
}

/// Submit the add-product form. Field problems come back as
/// [`crate::ApiError::Validation`] for the form to show inline.
pub async fn create_product<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
    form: &NewProduct,
) -> Result<(), ActionError> {
    authorize(client.session(), Action::CreateProduct)?;
    client
        .create_product(form)
        .await
        .map_err(|e| settle(client.session(), e))?;
    tracing::info!(name = %form.name, "product listed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::action::Feedback;
    use crate::sync::resource::ResourceCell;
    use crate::testing::FakeBackend;
    use crate::transport::{FilePart, Method};
    use crate::ApiError;
    use rust_decimal::Decimal;
    use store::MemorySessionStore;

    fn signed_in(backend: &FakeBackend, user: &str) -> ApiClient<FakeBackend, MemorySessionStore> {
        let session =
            MemorySessionStore::signed_in(&backend.token_for(user), backend.profile(user));
        ApiClient::new(backend.clone(), session)
    }

    fn anonymous(backend: &FakeBackend) -> ApiClient<FakeBackend, MemorySessionStore> {
        ApiClient::new(backend.clone(), MemorySessionStore::new())
    }

    #[tokio::test]
    async fn test_like_then_refetch_reflects_toggle() {
        let backend = FakeBackend::new();
        let id = backend.add_product("bob", "Lamp", "12.00");
        let client = signed_in(&backend, "alice");

        let mut cell = ResourceCell::new();
        let ticket = cell.begin_load();
        cell.finish_load(ticket, client.product(id).await);
        let before = cell.state().value().cloned().unwrap();
        assert!(!before.is_liked_by_current_user);

        let status = toggle_like(&client, cell.phase(), id).await.unwrap();
        assert_eq!(status.liked, Some(true));
        // the snapshot is untouched until the re-fetch lands
        assert_eq!(cell.state().value(), Some(&before));

        let ticket = cell.begin_load();
        cell.finish_load(ticket, client.product(id).await);
        let after = cell.state().value().unwrap();
        assert!(after.is_liked_by_current_user);
        assert_eq!(after.like_count, before.like_count + 1);

        toggle_like(&client, cell.phase(), id).await.unwrap();
        let again = client.product(id).await.unwrap();
        assert!(!again.is_liked_by_current_user);
        assert_eq!(again.like_count, before.like_count);
    }

    #[tokio::test]
    async fn test_anonymous_mutations_send_nothing() {
        let backend = FakeBackend::new();
        let id = backend.add_product("bob", "Lamp", "12.00");
        let client = anonymous(&backend);
        let loaded = Phase::Loaded;

        let like = toggle_like(&client, loaded, id).await.unwrap_err();
        assert_eq!(like.feedback(), Feedback::LoginPrompt(Action::Like));
        let comment = submit_comment(&client, loaded, id, "hi").await.unwrap_err();
        assert_eq!(comment, ActionError::AuthenticationRequired(Action::Comment));
        let purchase = buy(&client, loaded, id).await.unwrap_err();
        assert_eq!(purchase, ActionError::AuthenticationRequired(Action::Buy));

        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_blank_comment_rejected_before_request() {
        let backend = FakeBackend::new();
        let id = backend.add_product("bob", "Lamp", "12.00");
        let client = signed_in(&backend, "alice");

        for content in ["", "   ", "\n\t"] {
            let err = submit_comment(&client, Phase::Loaded, id, content)
                .await
                .unwrap_err();
            assert_eq!(
                err,
                ActionError::Invalid {
                    field: "content",
                    message: "Comment cannot be empty"
                }
            );
        }
        assert!(backend.requests().is_empty());

        submit_comment(&client, Phase::Loaded, id, "  Nice  ").await.unwrap();
        assert_eq!(client.product(id).await.unwrap().comments[0].content, "Nice");
    }

    #[tokio::test]
    async fn test_mutation_waits_for_loaded_snapshot() {
        let backend = FakeBackend::new();
        let id = backend.add_product("bob", "Lamp", "12.00");
        let client = signed_in(&backend, "alice");

        let err = toggle_like(&client, Phase::Loading, id).await.unwrap_err();
        assert_eq!(err, ActionError::NotReady(Action::Like));
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_buy_moves_money_and_refreshes_profile() {
        let backend = FakeBackend::new();
        let id = backend.add_product("bob", "Lamp", "12.00");
        let client = signed_in(&backend, "alice");
        let start = client.session().get_session().unwrap().user.balance;

        buy(&client, Phase::Loaded, id).await.unwrap();

        let cached = client.session().get_session().unwrap().user.balance;
        assert_eq!(cached, start - Decimal::new(1_200, 2));
        let paths: Vec<_> = backend.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec![format!("products/{id}/buy/"), "auth/user/".to_string()]);
    }

    #[tokio::test]
    async fn test_buy_insufficient_balance_is_notice() {
        let backend = FakeBackend::new();
        let id = backend.add_product("bob", "Yacht", "99999.00");
        let client = signed_in(&backend, "alice");

        let err = buy(&client, Phase::Loaded, id).await.unwrap_err();
        assert_eq!(
            err.feedback(),
            Feedback::Notice("Insufficient balance".to_string())
        );
    }

    #[tokio::test]
    async fn test_expired_token_clears_session() {
        let backend = FakeBackend::new();
        let id = backend.add_product("bob", "Lamp", "12.00");
        let session = MemorySessionStore::signed_in("revoked", backend.profile("alice"));
        let client = ApiClient::new(backend.clone(), session);

        let err = toggle_like(&client, Phase::Loaded, id).await.unwrap_err();
        assert_eq!(err, ActionError::SessionExpired);
        assert_eq!(err.feedback(), Feedback::LoginRedirect);
        assert!(!client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_create_product_bad_price_is_inline() {
        let backend = FakeBackend::new();
        let client = signed_in(&backend, "alice");
        let form = NewProduct {
            name: "Lamp".to_string(),
            description: "Desk lamp".to_string(),
            price: "abc".to_string(),
            image: Some(FilePart::new("lamp.png", vec![1, 2, 3])),
        };

        let err = create_product(&client, &form).await.unwrap_err();
        match err.feedback() {
            Feedback::Inline(fields) => {
                assert_eq!(fields.first("price"), Some("must be a number"))
            }
            other => panic!("unexpected feedback {other:?}"),
        }
        // the caller still owns the form; nothing was cleared
        assert_eq!(form.price, "abc");
        assert_eq!(backend.requests()[0].method, Method::Post);
    }

    #[tokio::test]
    async fn test_delete_by_non_owner_is_forbidden() {
        let backend = FakeBackend::new();
        let id = backend.add_product("bob", "Lamp", "12.00");

        let err = delete_product(&signed_in(&backend, "alice"), Phase::Loaded, id)
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Api(ApiError::Forbidden(_))));

        delete_product(&signed_in(&backend, "bob"), Phase::Loaded, id)
            .await
            .unwrap();
        let gone = anonymous(&backend).product(id).await.unwrap_err();
        assert!(matches!(gone, ApiError::NotFound(_)));
    }
}
