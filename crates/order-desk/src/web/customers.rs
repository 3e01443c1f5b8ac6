//! Customer request handling, including the guarded deletes.

use super::error::WebError;
use super::flash::Flash;
use super::outcome::{Outcome, Page};
use crate::clients::{CustomerClient, OrderClient};
use crate::customer_actor::CustomerError;
use crate::model::{Customer, CustomerId, CustomerParams, ValidationErrors};
use actor_framework::ActorClient;
use axum::http::StatusCode;
use serde_json::json;
use tracing::info;

pub const CUSTOMERS_PATH: &str = "/customers";

pub const CREATED: &str = "Customer was successfully created.";
pub const UPDATED: &str = "Customer was successfully updated.";
pub const DESTROYED: &str = "Customer was successfully destroyed.";

fn customer_path(id: CustomerId) -> String {
    format!("{}/{}", CUSTOMERS_PATH, id)
}

#[derive(Clone)]
pub struct CustomersController {
    customers: CustomerClient,
    orders: OrderClient,
}

impl CustomersController {
    pub fn new(customers: CustomerClient, orders: OrderClient) -> Self {
        Self { customers, orders }
    }

    pub async fn index(&self) -> Result<Outcome, WebError> {
        let customers = self.customers.list().await?;
        Ok(Outcome::page(Page::CustomerIndex { customers }))
    }

    pub async fn show(&self, id: &str) -> Result<Outcome, WebError> {
        let customer = match self.load(id).await? {
            Ok(customer) => customer,
            Err(redirect) => return Ok(redirect),
        };
        let orders = self.orders.list_for_customer(customer.id).await?;
        Ok(Outcome::page(Page::CustomerShow { customer, orders }))
    }

    pub async fn new_customer(&self) -> Result<Outcome, WebError> {
        Ok(Outcome::page(Page::CustomerNew {
            form: CustomerParams::default(),
            errors: ValidationErrors::new(),
        }))
    }

    pub async fn create(&self, params: Option<CustomerParams>) -> Result<Outcome, WebError> {
        let Some(params) = params else {
            return Ok(Outcome::MissingParams("customer"));
        };

        match self.customers.create_customer(params.clone()).await {
            Ok(id) => {
                let customer = self.customers.find(id).await?;
                info!(customer_id = %id, "Customer created");
                Ok(Outcome::Saved {
                    location: customer_path(id),
                    notice: CREATED,
                    record: json!(customer),
                    status: StatusCode::CREATED,
                })
            }
            Err(CustomerError::Invalid(errors)) => Ok(Outcome::invalid(Page::CustomerNew {
                form: params,
                errors,
            })),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn edit(&self, id: &str) -> Result<Outcome, WebError> {
        let customer = match self.load(id).await? {
            Ok(customer) => customer,
            Err(redirect) => return Ok(redirect),
        };
        Ok(Outcome::page(Page::CustomerEdit {
            id: customer.id,
            form: CustomerParams::from(&customer),
            errors: ValidationErrors::new(),
        }))
    }

    pub async fn update(
        &self,
        id: &str,
        params: Option<CustomerParams>,
    ) -> Result<Outcome, WebError> {
        let customer = match self.load(id).await? {
            Ok(customer) => customer,
            Err(redirect) => return Ok(redirect),
        };
        let Some(params) = params else {
            return Ok(Outcome::MissingParams("customer"));
        };

        match self.customers.update_customer(customer.id, params.clone()).await {
            Ok(updated) => Ok(Outcome::Saved {
                location: customer_path(updated.id),
                notice: UPDATED,
                record: json!(updated),
                status: StatusCode::OK,
            }),
            Err(CustomerError::Invalid(errors)) => Ok(Outcome::invalid(Page::CustomerEdit {
                id: customer.id,
                form: params.merged_over(&customer),
                errors,
            })),
            Err(e @ CustomerError::NotFound(_)) => Ok(missing(e)),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes the customer unless orders still reference it. A refusal is a no-op that
    /// redirects to the customer list with the reason as a notice.
    pub async fn destroy(&self, id: &str) -> Result<Outcome, WebError> {
        let customer = match self.load(id).await? {
            Ok(customer) => customer,
            Err(redirect) => return Ok(redirect),
        };

        match self
            .customers
            .delete_unless_ordered(customer.id, &self.orders)
            .await
        {
            Ok(()) => {
                info!(customer_id = %customer.id, "Customer deleted");
                Ok(Outcome::Removed {
                    location: CUSTOMERS_PATH.to_string(),
                    notice: DESTROYED,
                })
            }
            Err(e @ CustomerError::HasOrders) => {
                Ok(Outcome::redirect(CUSTOMERS_PATH, Flash::notice(e.to_string())))
            }
            Err(e @ CustomerError::NotFound(_)) => Ok(missing(e)),
            Err(e) => Err(e.into()),
        }
    }

    /// `DELETE /customers/customerAndOrders/{id}`; same rule as [`destroy`](Self::destroy).
    pub async fn destroy_with_orders_guard(&self, id: &str) -> Result<Outcome, WebError> {
        self.destroy(id).await
    }

    async fn load(&self, raw_id: &str) -> Result<Result<Customer, Outcome>, WebError> {
        let found = match raw_id.parse::<CustomerId>() {
            Ok(id) => self.customers.find(id).await,
            Err(_) => Err(CustomerError::NotFound(raw_id.to_string())),
        };
        match found {
            Ok(customer) => Ok(Ok(customer)),
            Err(e @ CustomerError::NotFound(_)) => Ok(Err(missing(e))),
            Err(e) => Err(e.into()),
        }
    }
}

fn missing(e: CustomerError) -> Outcome {
    info!(error = %e, "Customer lookup failed");
    Outcome::redirect(CUSTOMERS_PATH, Flash::alert(e.to_string()))
}
