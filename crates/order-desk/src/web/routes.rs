//! Route table and the thin handlers that feed controllers.

use super::customers::CustomersController;
use super::error::WebError;
use super::flash::PendingFlash;
use super::orders::OrdersController;
use super::outcome::Outcome;
use super::request::{Format, Submission};
use crate::lifecycle::OrderSystem;
use crate::model::{CustomerParams, OrderParams};
use axum::body::{self, Body};
use axum::extract::{Path, Request, State};
use axum::http::{header, Method, Uri};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::debug;
use url::form_urlencoded;

const MAX_FORM_BYTES: usize = 2 * 1024 * 1024;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub orders: OrdersController,
    pub customers: CustomersController,
}

impl AppState {
    pub fn new(system: &OrderSystem) -> Self {
        Self {
            orders: OrdersController::new(
                system.order_client.clone(),
                system.customer_client.clone(),
            ),
            customers: CustomersController::new(
                system.customer_client.clone(),
                system.order_client.clone(),
            ),
        }
    }
}

/// Builds the application.
///
/// Method override and the `.json` suffix rewrite wrap the whole route table, so a tunnelled
/// `PATCH` is routed as that method and `/orders/1.json` as `/orders/1`.
pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(customers_index))
        .route("/orders", get(orders_index).post(orders_create))
        .route("/orders/new", get(orders_new))
        .route(
            "/orders/{id}",
            get(orders_show)
                .patch(orders_update)
                .put(orders_update)
                .delete(orders_destroy),
        )
        .route("/orders/{id}/edit", get(orders_edit))
        .route("/customers", get(customers_index).post(customers_create))
        .route("/customers/new", get(customers_new))
        .route(
            "/customers/{id}",
            get(customers_show)
                .patch(customers_update)
                .put(customers_update)
                .delete(customers_destroy),
        )
        .route("/customers/{id}/edit", get(customers_edit))
        .route(
            "/customers/customerAndOrders/{id}",
            delete(customers_destroy_guarded),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Router::new()
        .fallback_service(routes)
        .layer(middleware::from_fn(method_override))
        .layer(middleware::from_fn(json_suffix))
}

/// Serves `/orders/1.json` as `/orders/1` answered in JSON.
async fn json_suffix(mut request: Request, next: Next) -> Response {
    if let Some(uri) = without_json_suffix(request.uri()) {
        debug!(from = %request.uri(), to = %uri, "JSON suffix");
        *request.uri_mut() = uri;
        request.extensions_mut().insert(Format::Json);
    }
    next.run(request).await
}

fn without_json_suffix(uri: &Uri) -> Option<Uri> {
    let path = uri.path().strip_suffix(".json")?;
    if path.is_empty() || path.ends_with('/') {
        return None;
    }
    let path_and_query = match uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse().ok()?);
    Uri::from_parts(parts).ok()
}

/// Rewrites `POST` form submissions carrying `_method=patch|put|delete`.
async fn method_override(request: Request, next: Next) -> Response {
    if request.method() != Method::POST || !is_form(&request) {
        return next.run(request).await;
    }

    let (mut parts, body) = request.into_parts();
    let bytes = match body::to_bytes(body, MAX_FORM_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => return WebError::BadRequest(format!("unreadable form body: {}", e)).into_response(),
    };
    if let Some(method) = overridden_method(&bytes) {
        debug!(%method, uri = %parts.uri, "Method override");
        parts.method = method;
    }
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn is_form(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

fn overridden_method(body: &[u8]) -> Option<Method> {
    let (_, value) = form_urlencoded::parse(body).find(|(key, _)| key == "_method")?;
    match value.to_ascii_uppercase().as_str() {
        "PATCH" => Some(Method::PATCH),
        "PUT" => Some(Method::PUT),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

fn respond(result: Result<Outcome, WebError>, format: Format, flash: PendingFlash) -> Response {
    match result {
        Ok(outcome) => outcome.respond(format, flash.0),
        Err(e) => e.into_response(),
    }
}

// --- Orders ---

async fn orders_index(State(state): State<AppState>, format: Format, flash: PendingFlash) -> Response {
    respond(state.orders.index().await, format, flash)
}

async fn orders_new(State(state): State<AppState>, format: Format, flash: PendingFlash) -> Response {
    respond(state.orders.new_order().await, format, flash)
}

async fn orders_show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    format: Format,
    flash: PendingFlash,
) -> Response {
    respond(state.orders.show(&id).await, format, flash)
}

async fn orders_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    format: Format,
    flash: PendingFlash,
) -> Response {
    respond(state.orders.edit(&id).await, format, flash)
}

async fn orders_create(
    State(state): State<AppState>,
    format: Format,
    flash: PendingFlash,
    Submission(params): Submission<OrderParams>,
) -> Response {
    respond(state.orders.create(params).await, format, flash)
}

async fn orders_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    format: Format,
    flash: PendingFlash,
    Submission(params): Submission<OrderParams>,
) -> Response {
    respond(state.orders.update(&id, params).await, format, flash)
}

async fn orders_destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
    format: Format,
    flash: PendingFlash,
) -> Response {
    respond(state.orders.destroy(&id).await, format, flash)
}

// --- Customers ---

async fn customers_index(State(state): State<AppState>, format: Format, flash: PendingFlash) -> Response {
    respond(state.customers.index().await, format, flash)
}

async fn customers_new(State(state): State<AppState>, format: Format, flash: PendingFlash) -> Response {
    respond(state.customers.new_customer().await, format, flash)
}

async fn customers_show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    format: Format,
    flash: PendingFlash,
) -> Response {
    respond(state.customers.show(&id).await, format, flash)
}

async fn customers_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    format: Format,
    flash: PendingFlash,
) -> Response {
    respond(state.customers.edit(&id).await, format, flash)
}

async fn customers_create(
    State(state): State<AppState>,
    format: Format,
    flash: PendingFlash,
    Submission(params): Submission<CustomerParams>,
) -> Response {
    respond(state.customers.create(params).await, format, flash)
}

async fn customers_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    format: Format,
    flash: PendingFlash,
    Submission(params): Submission<CustomerParams>,
) -> Response {
    respond(state.customers.update(&id, params).await, format, flash)
}

async fn customers_destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
    format: Format,
    flash: PendingFlash,
) -> Response {
    respond(state.customers.destroy(&id).await, format, flash)
}

async fn customers_destroy_guarded(
    State(state): State<AppState>,
    Path(id): Path<String>,
    format: Format,
    flash: PendingFlash,
) -> Response {
    respond(state.customers.destroy_with_orders_guard(&id).await, format, flash)
}
