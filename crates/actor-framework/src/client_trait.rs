//! Shared read and delete calls for typed resource clients.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Implemented by wrappers such as `OrderClient` around a [`ResourceClient`].
///
/// A wrapper supplies its inner client and a `map_error`; `get`, `list` and `delete` then
/// return the wrapper's own error type. Create and update stay on the wrapper since their
/// payloads are resource specific.
///
/// ```rust
/// use actor_framework::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Tag { id: u32 }
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct TagError(String);
/// impl From<String> for TagError {
///     fn from(s: String) -> Self { TagError(s) }
/// }
///
/// #[async_trait]
/// impl ActorEntity for Tag {
///     type Id = u32; type Create = (); type Update = ();
///     type Context = (); type Error = TagError;
///     async fn from_create_params(id: u32, _: (), _: &()) -> Result<Self, TagError> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), TagError> { Ok(()) }
/// }
///
/// struct TagClient(ResourceClient<Tag>);
///
/// impl ActorClient<Tag> for TagClient {
///     type Error = TagError;
///     fn inner(&self) -> &ResourceClient<Tag> { &self.0 }
///     fn map_error(e: FrameworkError) -> TagError { TagError(e.to_string()) }
/// }
///
/// async fn tidy(tags: &TagClient) -> Result<(), TagError> {
///     for tag in tags.list().await? {
///         tags.delete(tag.id).await?;
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    type Error: From<String> + Send + Sync;

    fn inner(&self) -> &ResourceClient<T>;

    /// Turns transport and store failures into `Self::Error`.
    fn map_error(e: FrameworkError) -> Self::Error;

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Ascending by id.
    #[tracing::instrument(level = "debug", skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        self.inner().list().await.map_err(Self::map_error)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
