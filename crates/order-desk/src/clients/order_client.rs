//! Typed access to the order store.

use crate::model::{CustomerId, Order, OrderId, OrderParams};
use crate::order_actor::OrderError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Cheap to clone; every clone talks to the same order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => other
                .into_entity_error::<OrderError>()
                .unwrap_or_else(|e| OrderError::StoreUnavailable(e.to_string())),
        }
    }
}

impl OrderClient {
    /// Validates and stores a new order. Rule failures come back as [`OrderError::Invalid`].
    #[instrument(skip(self))]
    pub async fn create_order(&self, params: OrderParams) -> Result<OrderId, OrderError> {
        debug!("create_order");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Merges `params` over the stored order and saves the result if it still passes
    /// every rule.
    #[instrument(skip(self))]
    pub async fn update_order(&self, id: OrderId, params: OrderParams) -> Result<Order, OrderError> {
        debug!(%id, "update_order");
        self.inner.update(id, params).await.map_err(Self::map_error)
    }

    pub async fn find(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// Orders that reference `customer_id`, in id order.
    #[instrument(skip(self))]
    pub async fn list_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>, OrderError> {
        let orders = self.list().await?;
        Ok(orders
            .into_iter()
            .filter(|order| order.customer_id == customer_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_client, expect_create, expect_get, expect_update};

    fn lamp(id: u32) -> Order {
        Order {
            id: OrderId(id),
            product_name: "Lamp".into(),
            product_count: 2,
            customer_id: CustomerId(1),
        }
    }

    #[tokio::test]
    async fn test_create_order_forwards_params() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let client = OrderClient::new(client);

        let handle = tokio::spawn(async move {
            client
                .create_order(OrderParams::new("Lamp", 2i64, 1i64))
                .await
        });

        let (params, respond_to) = expect_create(&mut receiver).await.unwrap();
        assert_eq!(params, OrderParams::new("Lamp", 2i64, 1i64));
        respond_to.send(Ok(OrderId(1))).unwrap();

        assert_eq!(handle.await.unwrap(), Ok(OrderId(1)));
    }

    #[tokio::test]
    async fn test_update_maps_missing_order() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let client = OrderClient::new(client);

        let handle = tokio::spawn(async move {
            client
                .update_order(OrderId(77), OrderParams::default())
                .await
        });

        let (id, _update, respond_to) = expect_update(&mut receiver).await.unwrap();
        assert_eq!(id, OrderId(77));
        respond_to
            .send(Err(FrameworkError::NotFound("77".into())))
            .unwrap();

        let err = handle.await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "Couldn't find Order with 'id'=77");
    }

    #[tokio::test]
    async fn test_find() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let client = OrderClient::new(client);

        let handle = tokio::spawn(async move {
            (
                client.find(OrderId(1)).await,
                client.find(OrderId(2)).await,
            )
        });

        let (_, respond_to) = expect_get(&mut receiver).await.unwrap();
        respond_to.send(Ok(Some(lamp(1)))).unwrap();
        let (_, respond_to) = expect_get(&mut receiver).await.unwrap();
        respond_to.send(Ok(None)).unwrap();

        let (found, missing) = handle.await.unwrap();
        assert_eq!(found, Ok(lamp(1)));
        assert_eq!(missing, Err(OrderError::NotFound("2".into())));
    }
}
