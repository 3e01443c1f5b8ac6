//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered from a queue
//! of expectations instead of a running actor. Use it to test code that *depends* on an actor,
//! e.g. the Order actor resolving customers, without starting that actor.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | Scripted answers | Real store |
//! | **Determinism** | Fully deterministic | Subject to scheduler |
//! | **Error Injection** | Easy (`return_err`) | Needs a specific state |
//! | **Use Case** | Logic *around* a client | The actor itself or the full system |
//!
//! ## Patterns
//!
//! 1. **Client logic**: `create_mock_client` + `expect_*` helpers; answer each request by hand.
//! 2. **Actor with mocked dependencies**: real `ResourceActor` for the entity under test, its
//!    context built from `MockClient::client()`.
//! 3. **Full system**: no mocks; start everything through the lifecycle module.
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Account { id: u32 }
//! #[derive(Debug)] struct AccountCreate;
//! #[derive(Debug)] struct AccountUpdate;
//! #[derive(Debug, thiserror::Error)] #[error("account error")] struct AccountError;
//!
//! #[async_trait]
//! impl ActorEntity for Account {
//!     type Id = u32; type Create = AccountCreate; type Update = AccountUpdate;
//!     type Context = (); type Error = AccountError;
//!     async fn from_create_params(id: u32, _: AccountCreate, _: &()) -> Result<Self, AccountError> {
//!         Ok(Self { id })
//!     }
//!     async fn on_update(&mut self, _: AccountUpdate, _: &()) -> Result<(), AccountError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Account>::new();
//!     mock.expect_get(1).return_ok(Some(Account { id: 1 }));
//!     mock.expect_get(2).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert!(client.get(1).await.unwrap().is_some());
//!     assert!(matches!(client.get(2).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Response, ResourceRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

/// The next request the mock should see, with its canned answer.
enum Expectation<T: ActorEntity> {
    Create(Result<T::Id, FrameworkError>),
    Get(T::Id, Result<Option<T>, FrameworkError>),
    List(Result<Vec<T>, FrameworkError>),
    Update(T::Id, Result<T, FrameworkError>),
    Delete(T::Id, Result<(), FrameworkError>),
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn queue<T: ActorEntity>(expectations: &Expectations<T>) -> MutexGuard<'_, VecDeque<Expectation<T>>> {
    expectations.lock().unwrap_or_else(PoisonError::into_inner)
}

fn reply<R>(respond_to: Response<R>, response: Result<R, FrameworkError>) {
    let _ = respond_to.send(response);
}

/// Answers one request from the front expectation.
///
/// Panics when the operation or the id differs from what was scripted.
fn answer<T: ActorEntity>(request: ResourceRequest<T>, expected: Option<Expectation<T>>) {
    match (request, expected) {
        (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create(response))) => {
            reply(respond_to, response)
        }
        (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get(want, response))) => {
            assert_eq!(id, want, "get for the wrong id");
            reply(respond_to, response)
        }
        (ResourceRequest::List { respond_to }, Some(Expectation::List(response))) => {
            reply(respond_to, response)
        }
        (ResourceRequest::Update { id, respond_to, .. }, Some(Expectation::Update(want, response))) => {
            assert_eq!(id, want, "update for the wrong id");
            reply(respond_to, response)
        }
        (ResourceRequest::Delete { id, respond_to }, Some(Expectation::Delete(want, response))) => {
            assert_eq!(id, want, "delete for the wrong id");
            reply(respond_to, response)
        }
        (request, None) => panic!("unscripted {} request", request.operation()),
        (request, Some(_)) => panic!(
            "{} request does not match the next expectation",
            request.operation()
        ),
    }
}

/// Scripted stand-in for a running actor.
///
/// Expectations are answered strictly in the order they were queued. A request that does not
/// match panics the background task, which the caller observes as `ActorDropped`.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    _task: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Needs a running Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::default();
        let script = Arc::clone(&expectations);

        let task = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expected = queue(&script).pop_front();
                answer(request, expected);
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _task: task,
        }
    }

    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&mut self) -> Reply<T, T::Id> {
        self.reply_with(Expectation::Create)
    }

    pub fn expect_get(&mut self, id: T::Id) -> Reply<T, Option<T>> {
        self.reply_with(move |response| Expectation::Get(id, response))
    }

    pub fn expect_list(&mut self) -> Reply<T, Vec<T>> {
        self.reply_with(Expectation::List)
    }

    pub fn expect_update(&mut self, id: T::Id) -> Reply<T, T> {
        self.reply_with(move |response| Expectation::Update(id, response))
    }

    pub fn expect_delete(&mut self, id: T::Id) -> Reply<T, ()> {
        self.reply_with(move |response| Expectation::Delete(id, response))
    }

    fn reply_with<R>(
        &self,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'static,
    ) -> Reply<T, R> {
        Reply {
            expectations: Arc::clone(&self.expectations),
            build: Box::new(build),
        }
    }

    /// Panics if any scripted request never arrived.
    pub fn verify(&self) {
        let pending = queue(&self.expectations).len();
        assert!(pending == 0, "{pending} expectation(s) never met");
    }
}

/// Completes an `expect_*` call with the answer to send back.
pub struct Reply<T: ActorEntity, R> {
    expectations: Expectations<T>,
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T>>,
}

impl<T: ActorEntity, R> Reply<T, R> {
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.build)(response);
        queue(&self.expectations).push_back(expectation);
    }
}

/// A client plus the receiving end of its channel, with no actor behind it.
///
/// The test plays the actor: pull each request with one of the `expect_*` functions below,
/// inspect the payload, and answer through the sender that comes with it. Dropping the
/// receiver makes every call fail with `ActorClosed`.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

type Inbox<T> = mpsc::Receiver<ResourceRequest<T>>;

/// `None` if the channel closed or the next request is not a create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut Inbox<T>,
) -> Option<(T::Create, Response<T::Id>)> {
    let Some(ResourceRequest::Create { params, respond_to }) = receiver.recv().await else {
        return None;
    };
    Some((params, respond_to))
}

pub async fn expect_get<T: ActorEntity>(
    receiver: &mut Inbox<T>,
) -> Option<(T::Id, Response<Option<T>>)> {
    let Some(ResourceRequest::Get { id, respond_to }) = receiver.recv().await else {
        return None;
    };
    Some((id, respond_to))
}

pub async fn expect_list<T: ActorEntity>(receiver: &mut Inbox<T>) -> Option<Response<Vec<T>>> {
    let Some(ResourceRequest::List { respond_to }) = receiver.recv().await else {
        return None;
    };
    Some(respond_to)
}

pub async fn expect_update<T: ActorEntity>(
    receiver: &mut Inbox<T>,
) -> Option<(T::Id, T::Update, Response<T>)> {
    let Some(ResourceRequest::Update {
        id,
        update,
        respond_to,
    }) = receiver.recv().await
    else {
        return None;
    };
    Some((id, update, respond_to))
}

pub async fn expect_delete<T: ActorEntity>(
    receiver: &mut Inbox<T>,
) -> Option<(T::Id, Response<()>)> {
    let Some(ResourceRequest::Delete { id, respond_to }) = receiver.recv().await else {
        return None;
    };
    Some((id, respond_to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Contact {
        id: u32,
        email: String,
    }

    #[derive(Debug)]
    struct ContactCreate {
        email: String,
    }

    #[derive(Debug)]
    struct ContactUpdate;

    #[derive(Debug, thiserror::Error)]
    #[error("Contact error")]
    struct ContactError;

    #[async_trait]
    impl ActorEntity for Contact {
        type Id = u32;
        type Create = ContactCreate;
        type Update = ContactUpdate;
        type Context = ();
        type Error = ContactError;

        async fn from_create_params(
            id: u32,
            params: ContactCreate,
            _ctx: &(),
        ) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                email: params.email,
            })
        }

        async fn on_update(&mut self, _update: ContactUpdate, _ctx: &()) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn contact(id: u32, email: &str) -> Contact {
        Contact {
            id,
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Contact>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(ContactCreate {
                    email: "ada@example.com".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.email, "ada@example.com");
        responder.send(Ok(1)).unwrap();

        let result = create_task.await.unwrap();
        assert!(matches!(result, Ok(1)));
    }

    #[tokio::test]
    async fn test_mock_client_list_and_delete_helpers() {
        let (client, mut receiver) = create_mock_client::<Contact>(10);

        let list_client = client.clone();
        let list_task = tokio::spawn(async move { list_client.list().await });
        let responder = expect_list(&mut receiver).await.expect("Expected List request");
        responder.send(Ok(vec![contact(1, "a@example.com")])).unwrap();
        assert_eq!(list_task.await.unwrap().unwrap().len(), 1);

        let delete_task = tokio::spawn(async move { client.delete(4).await });
        let (id, responder) = expect_delete(&mut receiver)
            .await
            .expect("Expected Delete request");
        assert_eq!(id, 4);
        responder.send(Err(FrameworkError::NotFound("4".into()))).unwrap();
        assert!(matches!(
            delete_task.await.unwrap(),
            Err(FrameworkError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Contact>::new();

        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(contact(1, "ada@example.com")));
        mock.expect_list().return_ok(vec![contact(1, "ada@example.com")]);
        mock.expect_update(1).return_ok(contact(1, "ada@example.org"));
        mock.expect_delete(1).return_ok(());

        let client = mock.client();

        let id = client
            .create(ContactCreate {
                email: "ada@example.com".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);

        let fetched = client.get(1).await.unwrap();
        assert_eq!(fetched.unwrap().email, "ada@example.com");
        assert_eq!(client.list().await.unwrap().len(), 1);
        assert_eq!(
            client.update(1, ContactUpdate).await.unwrap().email,
            "ada@example.org"
        );
        client.delete(1).await.unwrap();

        mock.verify();
    }

    #[tokio::test]
    async fn test_mismatched_request_drops_the_reply() {
        let mut mock = MockClient::<Contact>::new();
        mock.expect_get(1).return_ok(None);

        let result = mock.client().list().await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
