//! Typed access to the customer store, plus the deletion guard that also consults orders.

use super::OrderClient;
use crate::customer_actor::CustomerError;
use crate::model::{Customer, CustomerId, CustomerParams};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct CustomerClient {
    inner: ResourceClient<Customer>,
}

impl CustomerClient {
    pub fn new(inner: ResourceClient<Customer>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Customer> for CustomerClient {
    type Error = CustomerError;

    fn inner(&self) -> &ResourceClient<Customer> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => CustomerError::NotFound(id),
            other => other
                .into_entity_error::<CustomerError>()
                .unwrap_or_else(|e| CustomerError::StoreUnavailable(e.to_string())),
        }
    }
}

impl CustomerClient {
    #[instrument(skip(self))]
    pub async fn create_customer(&self, params: CustomerParams) -> Result<CustomerId, CustomerError> {
        debug!("create_customer");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_customer(
        &self,
        id: CustomerId,
        params: CustomerParams,
    ) -> Result<Customer, CustomerError> {
        debug!(%id, "update_customer");
        self.inner.update(id, params).await.map_err(Self::map_error)
    }

    /// Like `get`, but a missing customer is an error.
    pub async fn find(&self, id: CustomerId) -> Result<Customer, CustomerError> {
        self.get(id)
            .await?
            .ok_or_else(|| CustomerError::NotFound(id.to_string()))
    }

    /// Deletes the customer unless at least one order still references it.
    ///
    /// A refused deletion is [`CustomerError::HasOrders`] and leaves both stores untouched.
    #[instrument(skip(self, orders))]
    pub async fn delete_unless_ordered(
        &self,
        id: CustomerId,
        orders: &OrderClient,
    ) -> Result<(), CustomerError> {
        self.find(id).await?;

        let dependents = orders
            .list_for_customer(id)
            .await
            .map_err(|e| CustomerError::StoreUnavailable(e.to_string()))?;
        if !dependents.is_empty() {
            info!(customer_id = %id, orders = dependents.len(), "Customer still has orders");
            return Err(CustomerError::HasOrders);
        }

        self.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Order, OrderId};
    use crate::model::ValidationErrors;
    use actor_framework::mock::MockClient;

    fn grace(id: u32) -> Customer {
        Customer {
            id: CustomerId(id),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            phone: String::new(),
            email: "grace@example.com".into(),
        }
    }

    fn order_for(id: u32, customer: u32) -> Order {
        Order {
            id: OrderId(id),
            product_name: "Compiler".into(),
            product_count: 1,
            customer_id: CustomerId(customer),
        }
    }

    #[tokio::test]
    async fn test_delete_refused_while_orders_exist() {
        let mut customers = MockClient::<Customer>::new();
        let mut orders = MockClient::<Order>::new();
        customers.expect_get(CustomerId(1)).return_ok(Some(grace(1)));
        orders
            .expect_list()
            .return_ok(vec![order_for(1, 2), order_for(2, 1)]);

        let client = CustomerClient::new(customers.client());
        let result = client
            .delete_unless_ordered(CustomerId(1), &OrderClient::new(orders.client()))
            .await;

        assert_eq!(result, Err(CustomerError::HasOrders));
        customers.verify();
        orders.verify();
    }

    #[tokio::test]
    async fn test_delete_allowed_without_orders() {
        let mut customers = MockClient::<Customer>::new();
        let mut orders = MockClient::<Order>::new();
        customers.expect_get(CustomerId(1)).return_ok(Some(grace(1)));
        orders.expect_list().return_ok(vec![order_for(1, 2)]);
        customers.expect_delete(CustomerId(1)).return_ok(());

        let client = CustomerClient::new(customers.client());
        client
            .delete_unless_ordered(CustomerId(1), &OrderClient::new(orders.client()))
            .await
            .unwrap();

        customers.verify();
        orders.verify();
    }

    #[tokio::test]
    async fn test_delete_of_missing_customer_is_not_found() {
        let mut customers = MockClient::<Customer>::new();
        let orders = MockClient::<Order>::new();
        customers.expect_get(CustomerId(9)).return_ok(None);

        let client = CustomerClient::new(customers.client());
        let result = client
            .delete_unless_ordered(CustomerId(9), &OrderClient::new(orders.client()))
            .await;

        assert_eq!(result, Err(CustomerError::NotFound("9".into())));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Couldn't find Customer with 'id'=9"
        );
    }

    #[tokio::test]
    async fn test_entity_errors_come_back_typed() {
        let mut customers = MockClient::<Customer>::new();
        let mut errors = ValidationErrors::new();
        errors.add("email", "is invalid");
        customers
            .expect_create()
            .return_err(FrameworkError::EntityError(Box::new(CustomerError::Invalid(
                errors.clone(),
            ))));

        let client = CustomerClient::new(customers.client());
        let result = client.create_customer(CustomerParams::default()).await;
        assert_eq!(result, Err(CustomerError::Invalid(errors)));
    }
}
