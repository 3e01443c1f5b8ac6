//! Caller side of a resource actor.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use tokio::sync::{mpsc, oneshot};

/// Handle to a running [`ResourceActor`](crate::ResourceActor).
///
/// Each call sends one [`ResourceRequest`] and waits for its answer. The handle is only a
/// channel sender: clone it freely, and the actor stops once every clone is gone.
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    /// `ActorClosed` if the actor is gone before the request is queued, `ActorDropped` if it
    /// goes away without answering.
    async fn call<R>(
        &self,
        make: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (reply, answer) = oneshot::channel();
        let request = make(reply);
        tracing::trace!(operation = request.operation(), "queueing request");
        if self.sender.send(request).await.is_err() {
            return Err(FrameworkError::ActorClosed);
        }
        match answer.await {
            Ok(result) => result,
            Err(_) => Err(FrameworkError::ActorDropped),
        }
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    /// Ascending by id.
    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.call(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    /// Returns the entity as stored after the change.
    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.call(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }
}
