//! The store side of a resource: one Tokio task, one ordered map, no locks.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Sole owner of every `T`, keyed and ordered by id.
///
/// Requests are taken off the channel one at a time and finished before the next, including
/// any awaits inside entity hooks. Two writes to the same store therefore never interleave.
///
/// `new` hands back the actor and its first client; the actor does nothing until `run` is
/// spawned with the hook context.
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { id: u32, text: String }
/// #[derive(Debug)] struct NoteCreate { text: String }
/// #[derive(Debug)] struct NoteUpdate { text: String }
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl ActorEntity for Note {
///     type Id = u32;
///     type Create = NoteCreate;
///     type Update = NoteUpdate;
///     type Context = ();
///     type Error = NoteError;
///
///     async fn from_create_params(id: u32, p: NoteCreate, _: &()) -> Result<Self, NoteError> {
///         Ok(Self { id, text: p.text })
///     }
///     async fn on_update(&mut self, u: NoteUpdate, _: &()) -> Result<(), NoteError> {
///         self.text = u.text;
///         Ok(())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Note>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(NoteCreate { text: "hello".into() }).await.unwrap();
///     assert_eq!(id, 1);
///     assert_eq!(client.list().await.unwrap().len(), 1);
/// }
/// ```
///
/// Ids are handed out from 1 and only consumed by a create that succeeds. Updates run
/// `on_update` against a copy that replaces the stored entity only on success. `on_delete`
/// can refuse a delete.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

/// `Order` rather than `order_desk::model::order::Order`.
fn short_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

fn rejected<E: std::error::Error + Send + Sync + 'static>(error: E) -> FrameworkError {
    FrameworkError::EntityError(Box::new(error))
}

impl<T: ActorEntity> ResourceActor<T> {
    /// `buffer_size` bounds the request queue; callers wait while it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Serves requests until the last client is dropped. `context` is lent to every hook.
    pub async fn run(mut self, context: T::Context) {
        let entity = short_name::<T>();
        info!(entity, "Actor started");

        while let Some(request) = self.receiver.recv().await {
            debug!(entity, operation = request.operation(), id = ?request.target(), "Request");
            match request {
                ResourceRequest::Create { params, respond_to } => {
                    let result = self.insert(params, &context).await;
                    match &result {
                        Ok(id) => info!(entity, %id, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity, error = %e, "Create rejected"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity, ?update, "Update payload");
                    let result = self.replace(&id, update, &context).await;
                    match &result {
                        Ok(_) => info!(entity, %id, "Updated"),
                        Err(e) => warn!(entity, %id, error = %e, "Update rejected"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let result = self.remove(&id, &context).await;
                    match &result {
                        Ok(()) => info!(entity, %id, size = self.store.len(), "Deleted"),
                        Err(e) => warn!(entity, %id, error = %e, "Delete rejected"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity, size = self.store.len(), "Actor stopped");
    }

    async fn insert(&mut self, params: T::Create, ctx: &T::Context) -> Result<T::Id, FrameworkError> {
        debug!(?params, "Create payload");
        let id = T::Id::from(self.next_id);
        let entity = T::from_create_params(id.clone(), params, ctx)
            .await
            .map_err(rejected)?;
        self.next_id += 1;
        self.store.insert(id.clone(), entity);
        Ok(id)
    }

    async fn replace(
        &mut self,
        id: &T::Id,
        update: T::Update,
        ctx: &T::Context,
    ) -> Result<T, FrameworkError> {
        let mut draft = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        draft.on_update(update, ctx).await.map_err(rejected)?;
        self.store.insert(id.clone(), draft.clone());
        Ok(draft)
    }

    async fn remove(&mut self, id: &T::Id, ctx: &T::Context) -> Result<(), FrameworkError> {
        let current = self
            .store
            .get(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        current.on_delete(ctx).await.map_err(rejected)?;
        self.store.remove(id);
        Ok(())
    }
}
