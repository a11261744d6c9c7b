//! Route table

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{health, menu_category, menu_item};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let categories = Router::new()
        .route(
            "/",
            get(menu_category::find_by_language).post(menu_category::create),
        )
        .route("/all", get(menu_category::find_all))
        .route("/position", post(menu_category::change_position))
        .route(
            "/{id}",
            get(menu_category::find_by_id)
                .patch(menu_category::update)
                .delete(menu_category::delete),
        )
        .route("/{id}/items", get(menu_category::find_items));

    let items = Router::new()
        .route("/", post(menu_item::create))
        .route("/position", post(menu_item::change_position))
        .route(
            "/{id}",
            get(menu_item::find_by_id)
                .patch(menu_item::update)
                .delete(menu_item::delete),
        );

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1/menu-categories", categories)
        .nest("/api/v1/menu-items", items)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
}
