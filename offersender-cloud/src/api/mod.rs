//! API routes

pub mod admin;
pub mod auth;
pub mod health;
pub mod relay;
pub mod tenant;

use axum::routing::{delete, get, post, put};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::session::{admin_auth_middleware, tenant_auth_middleware};
use crate::error::ServiceError;
use crate::state::AppState;

/// Handler result: db/infrastructure errors propagate with `?` through
/// [`ServiceError`], business-rule errors pass through as `AppError`.
pub type ApiResult<T> = Result<axum::Json<T>, ServiceError>;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Tenant self-service (JWT, role=tenant)
    let tenant_routes = Router::new()
        .route(
            "/api/tenant/profile",
            get(tenant::get_profile).put(tenant::update_profile),
        )
        .route("/api/tenant/change-password", post(tenant::change_password))
        .route("/api/tenant/plan", post(tenant::change_plan))
        .route(
            "/api/tenant/customers",
            get(tenant::list_customers).post(tenant::create_customer),
        )
        .route(
            "/api/tenant/customers/{id}",
            put(tenant::update_customer).delete(tenant::delete_customer),
        )
        .route(
            "/api/tenant/campaigns",
            get(tenant::list_campaigns).post(tenant::create_campaign),
        )
        .route(
            "/api/tenant/campaigns/{id}",
            delete(tenant::delete_campaign),
        )
        .route("/api/tenant/dispatch", post(tenant::bulk_send))
        .route("/api/tenant/dispatch/test", post(tenant::test_connection))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            tenant_auth_middleware,
        ));

    // Platform administration (JWT, role=admin)
    let admin_routes = Router::new()
        .route("/api/admin/businesses", get(admin::list_businesses))
        .route(
            "/api/admin/businesses/{id}",
            put(admin::update_business).delete(admin::delete_business),
        )
        .route(
            "/api/admin/admins",
            get(admin::list_admins).post(admin::create_admin),
        )
        .route("/api/admin/admins/{id}", delete(admin::delete_admin))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ));

    // Public (no auth)
    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/relay/send-sms", post(relay::send_sms));

    Router::new()
        .merge(public)
        .merge(tenant_routes)
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
