use crate::clients::{CustomerClient, OrderClient};
use crate::config::StoreConfig;
use tracing::{error, info};

/// Starts, wires and stops the resource actors.
///
/// The Customer actor runs with no context. The Order actor gets a [`CustomerClient`] so
/// validation can resolve `customer_id`.
///
/// ```ignore
/// let system = OrderSystem::new(&StoreConfig::default());
/// let customer_id = system.customer_client.create_customer(params).await?;
/// system.shutdown().await?;
/// ```
pub struct OrderSystem {
    pub customer_client: CustomerClient,
    pub order_client: OrderClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderSystem {
    /// Spawns both actors. Must be called inside a Tokio runtime.
    pub fn new(store: &StoreConfig) -> Self {
        let (customer_actor, customer_client) = crate::customer_actor::new(store.channel_buffer);
        let (order_actor, order_client) = crate::order_actor::new(store.channel_buffer);

        let customer_handle = tokio::spawn(customer_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(customer_client.clone()));

        info!(channel_buffer = store.channel_buffer, "Order system started");

        Self {
            customer_client,
            order_client,
            handles: vec![customer_handle, order_handle],
        }
    }

    /// Drops the clients held here and waits for every actor to stop.
    ///
    /// Actors stop once *every* clone of their client is gone, so callers must drop their
    /// own clones (router state included) before awaiting this. The Order actor goes first;
    /// its context holds the last customer client.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Stopping order system");
        let Self {
            customer_client,
            order_client,
            handles,
        } = self;
        drop((order_client, customer_client));

        for task in handles.into_iter().rev() {
            task.await.map_err(|e| {
                error!(error = %e, "Actor task ended abnormally");
                format!("actor task ended abnormally: {e}")
            })?;
        }

        info!("Order system stopped");
        Ok(())
    }
}
