//! Order request handling.

use super::error::WebError;
use super::flash::Flash;
use super::outcome::{Outcome, Page};
use crate::clients::{CustomerClient, OrderClient};
use crate::model::{Order, OrderId, OrderParams, ValidationErrors};
use crate::order_actor::OrderError;
use actor_framework::ActorClient;
use axum::http::StatusCode;
use serde_json::json;
use tracing::info;

pub const ORDERS_PATH: &str = "/orders";

pub const CREATED: &str = "The order record was created successfully.";
pub const UPDATED: &str = "The order record was updated successfully.";
pub const DESTROYED: &str = "Order was successfully deleted.";

fn order_path(id: OrderId) -> String {
    format!("{}/{}", ORDERS_PATH, id)
}

#[derive(Clone)]
pub struct OrdersController {
    orders: OrderClient,
    customers: CustomerClient,
}

impl OrdersController {
    pub fn new(orders: OrderClient, customers: CustomerClient) -> Self {
        Self { orders, customers }
    }

    pub async fn index(&self) -> Result<Outcome, WebError> {
        let orders = self.orders.list().await?;
        Ok(Outcome::page(Page::OrderIndex { orders }))
    }

    pub async fn show(&self, id: &str) -> Result<Outcome, WebError> {
        let order = match self.load(id).await? {
            Ok(order) => order,
            Err(redirect) => return Ok(redirect),
        };
        Ok(Outcome::page(Page::OrderShow { order }))
    }

    pub async fn new_order(&self) -> Result<Outcome, WebError> {
        Ok(Outcome::page(Page::OrderNew {
            form: OrderParams::default(),
            customers: self.customers.list().await?,
            errors: ValidationErrors::new(),
        }))
    }

    pub async fn create(&self, params: Option<OrderParams>) -> Result<Outcome, WebError> {
        let Some(params) = params else {
            return Ok(Outcome::MissingParams("order"));
        };

        match self.orders.create_order(params.clone()).await {
            Ok(id) => {
                let order = self.orders.find(id).await?;
                info!(order_id = %id, "Order created");
                Ok(Outcome::Saved {
                    location: order_path(id),
                    notice: CREATED,
                    record: json!(order),
                    status: StatusCode::CREATED,
                })
            }
            Err(OrderError::Invalid(errors)) => Ok(Outcome::invalid(Page::OrderNew {
                form: params,
                customers: self.customers.list().await?,
                errors,
            })),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn edit(&self, id: &str) -> Result<Outcome, WebError> {
        let order = match self.load(id).await? {
            Ok(order) => order,
            Err(redirect) => return Ok(redirect),
        };
        Ok(Outcome::page(Page::OrderEdit {
            id: order.id,
            form: OrderParams::from(&order),
            customers: self.customers.list().await?,
            errors: ValidationErrors::new(),
        }))
    }

    /// Validation failures re-render the edit form with the submitted values merged over
    /// the stored ones; the stored order is untouched.
    pub async fn update(&self, id: &str, params: Option<OrderParams>) -> Result<Outcome, WebError> {
        let order = match self.load(id).await? {
            Ok(order) => order,
            Err(redirect) => return Ok(redirect),
        };
        let Some(params) = params else {
            return Ok(Outcome::MissingParams("order"));
        };

        match self.orders.update_order(order.id, params.clone()).await {
            Ok(updated) => {
                info!(order_id = %updated.id, "Order updated");
                Ok(Outcome::Saved {
                    location: order_path(updated.id),
                    notice: UPDATED,
                    record: json!(updated),
                    status: StatusCode::OK,
                })
            }
            Err(OrderError::Invalid(errors)) => Ok(Outcome::invalid(Page::OrderEdit {
                id: order.id,
                form: params.merged_over(&order),
                customers: self.customers.list().await?,
                errors,
            })),
            Err(e @ OrderError::NotFound(_)) => Ok(missing(e)),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn destroy(&self, id: &str) -> Result<Outcome, WebError> {
        let order = match self.load(id).await? {
            Ok(order) => order,
            Err(redirect) => return Ok(redirect),
        };
        self.orders.delete(order.id).await?;
        info!(order_id = %order.id, "Order deleted");
        Ok(Outcome::Removed {
            location: ORDERS_PATH.to_string(),
            notice: DESTROYED,
        })
    }

    /// Resolves a raw path id. Unknown and unparseable ids both become a redirect to the
    /// order list carrying the lookup error.
    async fn load(&self, raw_id: &str) -> Result<Result<Order, Outcome>, WebError> {
        let found = match raw_id.parse::<OrderId>() {
            Ok(id) => self.orders.find(id).await,
            Err(_) => Err(OrderError::NotFound(raw_id.to_string())),
        };
        match found {
            Ok(order) => Ok(Ok(order)),
            Err(e @ OrderError::NotFound(_)) => Ok(Err(missing(e))),
            Err(e) => Err(e.into()),
        }
    }
}

fn missing(e: OrderError) -> Outcome {
    info!(error = %e, "Order lookup failed");
    Outcome::redirect(ORDERS_PATH, Flash::alert(e.to_string()))
}
