use crate::{
    api::models::*,
    auth::jwt::{Claims, JwtService},
    core::{
        errors::LedgerError,
        models::{Balance, NewTransaction, Transaction, TransactionUpdate},
        services::LedgerService,
    },
    infrastructure::storage::in_memory::InMemoryStorage,
};
use axum::{
    Extension, Json, Router,
    extract::{Path, Query, Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
};
use std::sync::Arc;
use uuid::Uuid;

pub struct AppState {
    pub service: LedgerService<InMemoryStorage>,
    pub jwt: JwtService,
}

impl AppState {
    pub fn new(storage: InMemoryStorage, jwt_secret: String) -> Self {
        AppState {
            service: LedgerService::new(storage),
            jwt: JwtService::new(jwt_secret),
        }
    }
}

// Middleware to validate the bearer token and expose its claims to handlers
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| LedgerError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| LedgerError::Unauthorized("Invalid Authorization header".to_string()))?;

    let claims = state.jwt.validate_token(token)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/balances", get(get_balance))
        .route("/groups/{group_id}/balances", get(get_group_balance))
        .route("/groups/{group_id}/transactions", get(list_group_transactions))
        .route("/transactions", axum::routing::post(create_transaction))
        .route(
            "/transactions/{transaction_id}",
            get(get_transaction).patch(update_transaction).delete(delete_transaction),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/balances",
    params(BalanceQuery),
    responses(
        (status = 200, description = "Balance of the caller", body = Balance),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<BalanceQuery>,
) -> Result<Json<Balance>, ApiError> {
    let balance = state.service.get_balance(claims.user_id()?, query.group_id).await?;
    Ok(Json(balance))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/balances",
    params(
        ("group_id" = Uuid, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Balance of the caller within the group", body = Balance),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not a group member", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_group_balance(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<Balance>, ApiError> {
    let balance = state.service.get_group_balance(claims.user_id()?, group_id).await?;
    Ok(Json(balance))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/transactions",
    params(
        ("group_id" = Uuid, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Transactions of the group, newest first", body = Vec<Transaction>),
        (status = 403, description = "Caller is not a group member", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn list_group_transactions(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let transactions = state
        .service
        .list_group_transactions(claims.user_id()?, group_id)
        .await?;
    Ok(Json(transactions))
}

#[utoipa::path(
    post,
    path = "/api/transactions",
    request_body = NewTransaction,
    responses(
        (status = 201, description = "Transaction created with its participants", body = Transaction),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 403, description = "Caller or payer is not a group member", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<NewTransaction>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let transaction = state.service.create_transaction(claims.user_id()?, req).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

#[utoipa::path(
    get,
    path = "/api/transactions/{transaction_id}",
    params(
        ("transaction_id" = Uuid, Path, description = "ID of the transaction")
    ),
    responses(
        (status = 200, description = "Transaction retrieved successfully", body = Transaction),
        (status = 403, description = "Caller is not a group member", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(transaction_id): Path<Uuid>,
) -> Result<Json<Transaction>, ApiError> {
    let transaction = state.service.get_transaction(claims.user_id()?, transaction_id).await?;
    Ok(Json(transaction))
}

#[utoipa::path(
    patch,
    path = "/api/transactions/{transaction_id}",
    params(
        ("transaction_id" = Uuid, Path, description = "ID of the transaction")
    ),
    request_body = TransactionUpdate,
    responses(
        (status = 200, description = "Transaction updated successfully", body = Transaction),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 403, description = "Caller or payer is not a group member", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(transaction_id): Path<Uuid>,
    Json(req): Json<TransactionUpdate>,
) -> Result<Json<Transaction>, ApiError> {
    let transaction = state
        .service
        .update_transaction(claims.user_id()?, transaction_id, req)
        .await?;
    Ok(Json(transaction))
}

#[utoipa::path(
    delete,
    path = "/api/transactions/{transaction_id}",
    params(
        ("transaction_id" = Uuid, Path, description = "ID of the transaction")
    ),
    responses(
        (status = 204, description = "Transaction and its participants deleted"),
        (status = 403, description = "Caller is not a group member", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(transaction_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .delete_transaction(claims.user_id()?, transaction_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
