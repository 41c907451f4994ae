//! Routing of gateway component interactions to live pagination sessions.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use rusty_pager::{Activation, InteractionFeed, UserId};
use tokio::sync::{Mutex, mpsc};
use tracing::debug;
use twilight_model::{
    application::interaction::InteractionData,
    gateway::payload::incoming::InteractionCreate,
    id::{Id, marker::MessageMarker},
};

/// A button press on a pagination message.
#[derive(Debug)]
pub struct ComponentActivation {
    interaction: Box<InteractionCreate>,
    user_id: UserId,
    custom_id: String,
    acknowledged: AtomicBool,
}

impl ComponentActivation {
    /// Extract the pressing user and custom ID from a component interaction.
    ///
    /// Hands the interaction back when it is not a button press with a known user.
    pub fn from_interaction(
        interaction: Box<InteractionCreate>,
    ) -> Result<Self, Box<InteractionCreate>> {
        let Some(InteractionData::MessageComponent(data)) = interaction.data.as_ref() else {
            return Err(interaction);
        };
        let custom_id = data.custom_id.clone();
        let Some(author_id) = interaction.author_id() else {
            return Err(interaction);
        };

        Ok(Self {
            interaction,
            user_id: UserId(author_id.get()),
            custom_id,
            acknowledged: AtomicBool::new(false),
        })
    }

    pub fn interaction(&self) -> &InteractionCreate {
        &self.interaction
    }

    pub fn into_interaction(self) -> Box<InteractionCreate> {
        self.interaction
    }

    /// Mark acknowledged; returns whether it already was.
    pub(crate) fn mark_acknowledged(&self) -> bool {
        self.acknowledged.swap(true, Ordering::SeqCst)
    }

    pub(crate) fn clear_acknowledged(&self) {
        self.acknowledged.store(false, Ordering::SeqCst);
    }
}

impl Activation for ComponentActivation {
    fn user_id(&self) -> UserId {
        self.user_id
    }

    fn control_id(&self) -> &str {
        &self.custom_id
    }
}

/// Outcome of [`ComponentRouter::route`].
#[derive(Debug)]
pub enum Routed {
    /// Handed to a live session.
    Delivered,
    /// No session listens on the interaction's message.
    Unclaimed(Box<InteractionCreate>),
}

type RouteMap = HashMap<Id<MessageMarker>, mpsc::UnboundedSender<ComponentActivation>>;

/// Maps pagination message IDs to the feeds of their sessions.
///
/// Cheap to clone; every clone shares the same table.
#[derive(Debug, Clone, Default)]
pub struct ComponentRouter {
    routes: Arc<Mutex<RouteMap>>,
}

impl ComponentRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a feed for presses on `message_id`, replacing any previous one.
    pub async fn register(
        &self,
        message_id: Id<MessageMarker>,
    ) -> InteractionFeed<ComponentActivation> {
        let (tx, feed) = InteractionFeed::channel();
        let mut routes = self.routes.lock().await;
        routes.retain(|_, sender| !sender.is_closed());
        routes.insert(message_id, tx);
        feed
    }

    /// Forward a gateway interaction to the session listening on its message.
    pub async fn route(&self, interaction: Box<InteractionCreate>) -> Routed {
        let Some(message_id) = interaction.message.as_ref().map(|message| message.id) else {
            return Routed::Unclaimed(interaction);
        };

        let mut routes = self.routes.lock().await;
        let Some(sender) = routes.get(&message_id) else {
            return Routed::Unclaimed(interaction);
        };

        let activation = match ComponentActivation::from_interaction(interaction) {
            Ok(activation) => activation,
            Err(interaction) => return Routed::Unclaimed(interaction),
        };

        match sender.send(activation) {
            Ok(()) => Routed::Delivered,
            Err(mpsc::error::SendError(activation)) => {
                debug!(message_id = message_id.get(), "pagination session ended, dropping route");
                routes.remove(&message_id);
                Routed::Unclaimed(activation.into_interaction())
            }
        }
    }

    /// Drop routes whose session has ended.
    pub async fn prune(&self) {
        self.routes
            .lock()
            .await
            .retain(|_, sender| !sender.is_closed());
    }

    pub async fn len(&self) -> usize {
        self.routes.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
