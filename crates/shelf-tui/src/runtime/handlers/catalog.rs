use shelf_core::api::CatalogClient;
use shelf_core::catalog::ProductPayload;

use crate::events::UiEvent;

/// Fetches the full product list.
pub async fn fetch_products(client: CatalogClient, token: String) -> UiEvent {
    UiEvent::ProductsLoaded(client.with_token(token).list_products().await)
}

pub async fn create_product(client: CatalogClient, token: String, payload: ProductPayload) -> UiEvent {
    UiEvent::ProductSaved(client.with_token(token).create_product(&payload).await)
}

pub async fn update_product(
    client: CatalogClient,
    token: String,
    id: String,
    payload: ProductPayload,
) -> UiEvent {
    UiEvent::ProductSaved(client.with_token(token).update_product(&id, &payload).await)
}

pub async fn delete_product(client: CatalogClient, token: String, id: String) -> UiEvent {
    UiEvent::ProductDeleted(client.with_token(token).delete_product(&id).await)
}
