//! # Request Protocol
//!
//! What a [`ResourceClient`](crate::ResourceClient) sends and how the answer comes back. Each
//! request carries its own oneshot [`Response`] sender; the actor answers exactly once or
//! drops the sender, which the client reports as `ActorDropped`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Where the actor sends the result of one request.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// One store operation on `T`.
///
/// Typed per entity: an `Order` payload cannot reach the `Customer` actor.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    /// Build a `T` from its create payload under the next free id.
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    /// Everything, ascending by id.
    List { respond_to: Response<Vec<T>> },
    /// Answers with the entity as stored after the update.
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    /// `on_delete` may refuse.
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}

impl<T: ActorEntity> ResourceRequest<T> {
    /// Lower-case operation name for logs and test diagnostics.
    pub fn operation(&self) -> &'static str {
        match self {
            ResourceRequest::Create { .. } => "create",
            ResourceRequest::Get { .. } => "get",
            ResourceRequest::List { .. } => "list",
            ResourceRequest::Update { .. } => "update",
            ResourceRequest::Delete { .. } => "delete",
        }
    }

    /// The id the request targets; `None` for create and list.
    pub fn target(&self) -> Option<&T::Id> {
        match self {
            ResourceRequest::Get { id, .. }
            | ResourceRequest::Update { id, .. }
            | ResourceRequest::Delete { id, .. } => Some(id),
            ResourceRequest::Create { .. } | ResourceRequest::List { .. } => None,
        }
    }
}
