//! Account Router

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::application::config::AccountConfig;
use crate::domain::repository::AccountRepository;
use crate::presentation::handlers::{self, AccountAppState};
use crate::presentation::middleware::require_bearer;

/// Routes under `/api/users`
///
/// signup, login and refresh are public; everything else sits behind
/// [`require_bearer`].
pub fn account_router<R>(state: AccountAppState<R>) -> Router
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let public = Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/refresh", post(handlers::refresh::<R>));

    let protected = Router::new()
        .route(
            "/me",
            patch(handlers::update_me::<R>).delete(handlers::delete_me::<R>),
        )
        .route("/by-login/{login}", get(handlers::get_by_login::<R>))
        .route("/{id}", get(handlers::get_by_id::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer::<R>,
        ));

    public.merge(protected).with_state(state)
}

/// `GET /health`
pub fn health_router<R>(state: AccountAppState<R>) -> Router
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(handlers::health::<R>))
        .with_state(state)
}

/// The full service: account routes nested at `/api/users` plus health
pub fn app_router<R>(repo: R, config: AccountConfig) -> Router
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let state = AccountAppState::new(repo, config);

    Router::new()
        .nest("/api/users", account_router(state.clone()))
        .merge(health_router(state))
}
