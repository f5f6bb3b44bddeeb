// src/lib.rs

use axum::{
    Router,
    routing::{delete, get},
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

pub mod entities {
    pub mod prelude;
    pub mod sales;
}

pub mod services {
    pub mod sales;
}

pub mod handlers {
    pub mod sales;
}

pub mod models {
    pub mod sale;
}

pub mod config;
pub mod database;
pub mod error;

/// Build the HTTP router with CORS open to all origins.
pub fn build_router(state: AppState) -> Router {
    use handlers::sales;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(sales::hello_sales))
        .route(
            "/sales",
            get(sales::list_sales)
                .post(sales::create_sale)
                .delete(sales::delete_all_sales),
        )
        .route("/sales/{transaction_id}", delete(sales::delete_sale))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
