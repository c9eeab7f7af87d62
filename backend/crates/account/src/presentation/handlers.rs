//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kernel::error::app_error::AppError;
use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::application::{
    DeleteAccountUseCase, GetAccountUseCase, Principal, RefreshInput, RefreshUseCase,
    SignInInput, SignInUseCase, SignUpInput, SignUpUseCase, TokenCodec, UpdateProfileInput,
    UpdateProfileUseCase,
};
use crate::domain::repository::AccountRepository;
use crate::error::AccountResult;
use crate::presentation::dto::{
    LoginRequest, RefreshRequest, SignUpRequest, SignUpResponse, SuccessResponse, TokenResponse,
    UpdateRequest, UserEnvelope, UserResponse,
};

/// Shared state for account handlers
#[derive(Clone)]
pub struct AccountAppState<R>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub codec: Arc<TokenCodec>,
    pub config: Arc<AccountConfig>,
}

impl<R> AccountAppState<R>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AccountConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            codec: Arc::new(TokenCodec::new(&config)),
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Public
// ============================================================================

/// POST /api/users/signup
pub async fn sign_up<R>(
    State(state): State<AccountAppState<R>>,
    Json(req): Json<SignUpRequest>,
) -> AccountResult<(StatusCode, Json<SignUpResponse>)>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.codec.clone(),
        state.config.clone(),
    );

    let input = SignUpInput {
        login: req.login,
        email: req.email,
        password: req.password,
        name: req.name,
        age: req.age,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            user: UserResponse::from(&output.account),
            access_token: output.tokens.access_token,
            refresh_token: output.tokens.refresh_token,
        }),
    ))
}

/// POST /api/users/login
pub async fn login<R>(
    State(state): State<AccountAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AccountResult<Json<TokenResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.codec.clone(),
        state.config.clone(),
    );

    let tokens = use_case
        .execute(SignInInput {
            login: req.login,
            password: req.password,
        })
        .await?;

    Ok(Json(tokens.into()))
}

/// POST /api/users/refresh
pub async fn refresh<R>(
    State(state): State<AccountAppState<R>>,
    Json(req): Json<RefreshRequest>,
) -> AccountResult<Json<TokenResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = RefreshUseCase::new(state.repo.clone(), state.codec.clone());

    let tokens = use_case
        .execute(RefreshInput {
            id: req.id,
            refresh_token: req.refresh_token,
        })
        .await?;

    Ok(Json(tokens.into()))
}

// ============================================================================
// Authenticated (behind `require_bearer`)
// ============================================================================

/// PATCH /api/users/me
pub async fn update_me<R>(
    State(state): State<AccountAppState<R>>,
    principal: Principal,
    Json(req): Json<UpdateRequest>,
) -> AccountResult<Json<SuccessResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateProfileUseCase::new(state.repo.clone());

    let input = UpdateProfileInput {
        email: req.email,
        name: req.name,
        age: req.age,
    };

    use_case.execute(&principal, input).await?;

    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/users/me
pub async fn delete_me<R>(
    State(state): State<AccountAppState<R>>,
    principal: Principal,
) -> AccountResult<Json<SuccessResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    DeleteAccountUseCase::new(state.repo.clone())
        .execute(&principal)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/users/{id} (admin)
pub async fn get_by_id<R>(
    State(state): State<AccountAppState<R>>,
    principal: Principal,
    Path(id): Path<String>,
) -> AccountResult<Json<UserEnvelope>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let account = GetAccountUseCase::new(state.repo.clone())
        .by_id(&principal, &id)
        .await?;

    Ok(Json(UserEnvelope {
        user: UserResponse::from(&account),
    }))
}

/// GET /api/users/by-login/{login} (admin)
pub async fn get_by_login<R>(
    State(state): State<AccountAppState<R>>,
    principal: Principal,
    Path(login): Path<String>,
) -> AccountResult<Json<UserEnvelope>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let account = GetAccountUseCase::new(state.repo.clone())
        .by_login(&principal, &login)
        .await?;

    Ok(Json(UserEnvelope {
        user: UserResponse::from(&account),
    }))
}

// ============================================================================
// Health
// ============================================================================

/// GET /health
pub async fn health<R>(
    State(state): State<AccountAppState<R>>,
) -> Result<Json<serde_json::Value>, AppError>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    state.repo.ping().await.map_err(|e| {
        tracing::error!(error = %e, "Health check failed");
        AppError::service_unavailable("Database unavailable").with_source(e)
    })?;

    Ok(Json(serde_json::json!({ "status": "ok" })))
}
