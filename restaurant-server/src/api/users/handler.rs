//! User API Handlers
//!
//! Signup, login and token refresh, plus profile listing and updates.

use std::time::Duration;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::util::{new_record_key, now_millis};

use crate::api::Pagination;
use crate::auth::{JwtError, TokenKind, TokenPair, TokenSubject};
use crate::core::ServerState;
use crate::db::UpdateResult;
use crate::db::models::{
    LoginRequest, RefreshRequest, SignupRequest, User, UserPage, UserResponse, UserUpdate,
};
use crate::security_log;
use crate::utils::validation::ValidatedJson;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Emails are matched case-insensitively
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Sign a fresh access / refresh token pair for `user`
fn issue_tokens(state: &ServerState, user: &User) -> AppResult<TokenPair> {
    state
        .get_jwt_service()
        .generate_token_pair(TokenSubject {
            uid: &user.user_id,
            email: &user.email,
            first_name: &user.first_name,
            last_name: &user.last_name,
        })
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))
}

/// Issue, persist and attach a new token pair, replacing any earlier one
async fn rotate_tokens(state: &ServerState, mut user: User) -> AppResult<User> {
    let tokens = issue_tokens(state, &user)?;
    state
        .users()
        .update_tokens(&user.user_id, &tokens.token, &tokens.refresh_token)
        .await?;
    user.token = Some(tokens.token);
    user.refresh_token = Some(tokens.refresh_token);
    user.updated_at = now_millis();
    Ok(user)
}

fn hash_password(state: &ServerState, password: &str) -> AppResult<String> {
    state
        .passwords
        .hash_password(password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))
}

/// POST /users/signup - 注册
///
/// Email and phone uniqueness are checked before the password is hashed.
pub async fn signup(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let SignupRequest {
        first_name: Some(first_name),
        last_name: Some(last_name),
        email: Some(email),
        password: Some(password),
        phone: Some(phone),
        avatar,
    } = req
    else {
        return Err(AppError::new(ErrorCode::RequiredField));
    };
    let email = normalize_email(&email);

    let users = state.users();
    if users.count_with("email", &email, None).await? > 0 {
        security_log!("INFO", "signup_rejected", reason = "email_in_use");
        return Err(AppError::new(ErrorCode::EmailInUse));
    }
    if users.count_with("phone", &phone, None).await? > 0 {
        security_log!("INFO", "signup_rejected", reason = "phone_in_use");
        return Err(AppError::new(ErrorCode::PhoneInUse));
    }

    let now = now_millis();
    let mut user = User {
        user_id: new_record_key(),
        first_name,
        last_name,
        email,
        phone,
        avatar,
        password: hash_password(&state, &password)?,
        token: None,
        refresh_token: None,
        created_at: now,
        updated_at: now,
    };
    let tokens = issue_tokens(&state, &user)?;
    user.token = Some(tokens.token);
    user.refresh_token = Some(tokens.refresh_token);

    let user = users.insert(user).await?;

    security_log!("INFO", "signup", user_id = user.user_id.clone());
    Ok((StatusCode::CREATED, Json(UserResponse::with_tokens(user))))
}

/// POST /users/login - 登录
///
/// Unknown email and wrong password give the same 401 after the same delay.
pub async fn login(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> AppResult<Json<UserResponse>> {
    let email = req.email.as_deref().map(normalize_email).unwrap_or_default();
    let password = req.password.unwrap_or_default();

    let user = state.users().find_by_email(&email).await?;
    let verified = match &user {
        Some(u) => state.passwords.verify_password(&password, &u.password),
        None => state.passwords.verify_unknown_user(&password),
    };
    let user = user.filter(|_| verified);

    let Some(user) = user else {
        tokio::time::sleep(Duration::from_millis(state.config.login_fixed_delay_ms)).await;
        security_log!("WARN", "login_failed", email = email);
        return Err(AppError::invalid_credentials());
    };

    let user = rotate_tokens(&state, user).await?;

    security_log!("INFO", "login_success", user_id = user.user_id.clone());
    Ok(Json(UserResponse::with_tokens(user)))
}

/// POST /users/refresh - 使用刷新令牌换取新令牌
///
/// Only the most recently issued refresh token is accepted.
pub async fn refresh(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> AppResult<Json<UserResponse>> {
    let token = req.refresh_token.unwrap_or_default();

    let claims = state
        .jwt_service
        .validate_kind(&token, TokenKind::Refresh)
        .map_err(|e| {
            security_log!("WARN", "refresh_failed", error = format!("{}", e));
            match e {
                JwtError::ExpiredToken => AppError::token_expired(),
                _ => AppError::invalid_token("Invalid refresh token"),
            }
        })?;

    let user = state
        .users()
        .find_by_id(&claims.uid)
        .await?
        .filter(|u| u.refresh_token.as_deref() == Some(token.as_str()))
        .ok_or_else(|| {
            security_log!("WARN", "refresh_revoked", user_id = claims.uid.clone());
            AppError::invalid_token("Refresh token is no longer valid")
        })?;

    let user = rotate_tokens(&state, user).await?;
    Ok(Json(UserResponse::with_tokens(user)))
}

/// GET /users?page=&recordPerPage= - 分页用户列表 (不含密码和令牌)
pub async fn list(
    State(state): State<ServerState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<UserPage>> {
    let (users, total) = state
        .users()
        .find_page(pagination.skip(), pagination.per_page())
        .await?;

    Ok(Json(UserPage {
        users: users.into_iter().map(UserResponse::from).collect(),
        total_count: total as usize,
        page: pagination.page(),
        per_page: pagination.per_page(),
    }))
}

/// GET /users/{id} - 获取用户
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .users()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(UserResponse::from(user)))
}

/// PATCH /users/{id} - 更新用户
///
/// A changed email or phone must not belong to another user; a new
/// password is hashed before it is stored.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ValidatedJson(mut payload): ValidatedJson<UserUpdate>,
) -> AppResult<Json<UpdateResult>> {
    let users = state.users();

    if let Some(email) = payload.email.as_deref().map(normalize_email) {
        if users.count_with("email", &email, Some(&id)).await? > 0 {
            return Err(AppError::new(ErrorCode::EmailInUse));
        }
        payload.email = Some(email);
    }
    if let Some(phone) = &payload.phone
        && users.count_with("phone", phone, Some(&id)).await? > 0
    {
        return Err(AppError::new(ErrorCode::PhoneInUse));
    }
    if let Some(password) = payload.password.take() {
        payload.password = Some(hash_password(&state, &password)?);
    }

    let result = users.update(&id, &payload).await?;
    Ok(Json(result))
}
