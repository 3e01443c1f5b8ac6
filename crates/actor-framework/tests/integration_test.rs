use actor_framework::{ActorEntity, FrameworkError, ResourceActor};
use async_trait::async_trait;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Ticket {
    id: u32,
    title: String,
    seats: u32,
    locked: bool,
}

#[derive(Debug)]
struct TicketCreate {
    title: String,
    seats: u32,
}

#[derive(Debug)]
struct TicketUpdate {
    title: Option<String>,
    seats: Option<u32>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum TicketError {
    #[error("title can't be blank")]
    BlankTitle,
    #[error("seats must be positive")]
    NoSeats,
    #[error("ticket is locked")]
    Locked,
}

#[async_trait]
impl ActorEntity for Ticket {
    type Id = u32;
    type Create = TicketCreate;
    type Update = TicketUpdate;
    type Context = ();
    type Error = TicketError;

    async fn from_create_params(
        id: u32,
        params: TicketCreate,
        _ctx: &Self::Context,
    ) -> Result<Self, Self::Error> {
        if params.title.trim().is_empty() {
            return Err(TicketError::BlankTitle);
        }
        Ok(Self {
            id,
            title: params.title,
            seats: params.seats,
            locked: params.seats > 100,
        })
    }

    async fn on_update(
        &mut self,
        update: TicketUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        // Title is applied before seats are checked, so a rejected update has already
        // mutated the copy it ran on.
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(seats) = update.seats {
            if seats == 0 {
                return Err(TicketError::NoSeats);
            }
            self.seats = seats;
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        if self.locked {
            return Err(TicketError::Locked);
        }
        Ok(())
    }
}

fn create(title: &str, seats: u32) -> TicketCreate {
    TicketCreate {
        title: title.to_string(),
        seats,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::new(10);
    tokio::spawn(actor.run(()));

    // 1. Create
    let id: u32 = client.create(create("Matinee", 2)).await.unwrap();
    assert_eq!(id, 1); // First ID should be 1

    // 2. Get
    let ticket: Ticket = client.get(id).await.unwrap().unwrap();
    assert_eq!(ticket.title, "Matinee");

    // 3. Update
    let update = TicketUpdate {
        title: None,
        seats: Some(4),
    };
    let updated = client.update(id, update).await.unwrap();
    assert_eq!(updated.seats, 4);
    assert_eq!(updated.title, "Matinee");

    // 4. Delete
    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_failed_create_stores_nothing_and_keeps_id_sequence() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(()));

    let err = client.create(create("  ", 1)).await.unwrap_err();
    assert_eq!(
        err.into_entity_error::<TicketError>().unwrap(),
        TicketError::BlankTitle
    );
    assert!(client.list().await.unwrap().is_empty());

    let id = client.create(create("Evening", 1)).await.unwrap();
    assert_eq!(id, 1);
}

#[tokio::test]
async fn test_rejected_update_leaves_stored_entity_unchanged() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(create("Matinee", 2)).await.unwrap();

    let update = TicketUpdate {
        title: Some("Renamed".into()),
        seats: Some(0),
    };
    let err = client.update(id, update).await.unwrap_err();
    assert_eq!(
        err.into_entity_error::<TicketError>().unwrap(),
        TicketError::NoSeats
    );

    let stored = client.get(id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Matinee");
    assert_eq!(stored.seats, 2);
}

#[tokio::test]
async fn test_list_returns_entities_in_id_order() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(()));

    for title in ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l"] {
        client.create(create(title, 1)).await.unwrap();
    }
    client.delete(3).await.unwrap();

    let ids: Vec<u32> = client.list().await.unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
}

#[tokio::test]
async fn test_on_delete_can_veto_removal() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(create("Gala", 500)).await.unwrap();

    let err = client.delete(id).await.unwrap_err();
    assert_eq!(
        err.into_entity_error::<TicketError>().unwrap(),
        TicketError::Locked
    );
    assert!(client.get(id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_missing_ids_report_not_found() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(()));

    let update = TicketUpdate {
        title: None,
        seats: None,
    };
    assert!(matches!(
        client.update(42, update).await,
        Err(FrameworkError::NotFound(id)) if id == "42"
    ));
    assert!(matches!(
        client.delete(42).await,
        Err(FrameworkError::NotFound(_))
    ));
    assert!(client.get(42).await.unwrap().is_none());
}

#[tokio::test]
async fn test_client_reports_closed_actor() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    drop(actor);

    assert!(matches!(
        client.list().await,
        Err(FrameworkError::ActorClosed)
    ));
}
