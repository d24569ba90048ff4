use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            normalize_email, required, AuthResponse, EmailRequest, LoginRequest, RegisterRequest,
            RegisterResponse,
        },
        extractors::AuthUser,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
    },
    error::ApiError,
    extractors::AppJson,
    state::AppState,
    users::repo_types::{NewUser, User, UserStatus},
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/check-email", post(check_email))
}

pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route("/check-current-user", post(check_current_user))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let email = normalize_email(&required(payload.email, "email")?);
    let name = required(payload.name, "name")?;
    let role = required(payload.role, "role")?;
    let status = required(payload.status, "status")?;
    let password = required(payload.password, "password")?;

    if !is_valid_email(&email) {
        return Err(ApiError::validation("invalid email"));
    }
    let status = status
        .parse::<UserStatus>()
        .map_err(|e| ApiError::validation(e.to_string()))?;

    // Existence check and insert are separate statements.
    if state.store.find_by_email(&email).await?.is_some() {
        warn!(%email, "email already registered");
        return Err(ApiError::validation("email already exists"));
    }

    let password_hash = hash_password(&password)?;

    let user = state
        .store
        .insert(NewUser {
            email,
            name,
            role,
            status,
            password_hash,
            last_seen: OffsetDateTime::now_utc(),
        })
        .await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((StatusCode::CREATED, Json(RegisterResponse { user })))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = normalize_email(&required(payload.email, "email")?);
    let password = required(payload.password, "password")?;

    let user = state
        .store
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".into()))?;

    if user.status.is_blocked() {
        warn!(user_id = %user.id, "login attempt by blocked user");
        return Err(ApiError::Forbidden("user is blocked".into()));
    }

    if !verify_password(&password, &user.password) {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::Unauthorized("invalid password".into()));
    }

    let token = JwtKeys::from_ref(&state).sign(user.id)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(AuthResponse { token, user }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<User>, ApiError> {
    let user = state
        .store
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".into()))?;
    Ok(Json(user))
}

#[instrument(skip(state, payload))]
pub async fn check_email(
    State(state): State<AppState>,
    AppJson(payload): AppJson<EmailRequest>,
) -> Result<Json<User>, ApiError> {
    lookup_unblocked(&state, payload).await.map(Json)
}

#[instrument(skip(state, payload))]
pub async fn check_current_user(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    AppJson(payload): AppJson<EmailRequest>,
) -> Result<Json<User>, ApiError> {
    lookup_unblocked(&state, payload).await.map(Json)
}

async fn lookup_unblocked(state: &AppState, payload: EmailRequest) -> Result<User, ApiError> {
    let email = normalize_email(&required(payload.email, "email")?);
    let user = state
        .store
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".into()))?;
    if user.status.is_blocked() {
        return Err(ApiError::Forbidden("user is blocked".into()));
    }
    Ok(user)
}
