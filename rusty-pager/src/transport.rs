//! The capabilities a chat platform must provide to host a session.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::controls::UserId;
use crate::error::TransportError;
use crate::render::ContentPayload;

/// What kind of thing the session was started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginKind {
    /// A regular channel message.
    Message,
    /// An application command interaction.
    Command,
    /// A message component (button) interaction.
    ComponentInteraction,
}

impl OriginKind {
    pub fn is_interaction(self) -> bool {
        !matches!(self, OriginKind::Message)
    }
}

/// How the first page should be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendMode {
    /// Post a new message in the parent's channel.
    NewMessage,
    /// Replace the parent (or its interaction response) with the pagination.
    EditParent,
    /// Reply to the parent.
    #[default]
    ReplyToParent,
}

/// Concrete transport call chosen once at start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    NewMessage,
    EditParent,
    Reply,
    /// Interaction parents that already hold a response get a follow-up.
    FollowUp,
}

impl Delivery {
    pub fn resolve(origin: OriginKind, mode: SendMode, parent_responded: bool) -> Self {
        match mode {
            SendMode::NewMessage => Delivery::NewMessage,
            SendMode::EditParent => Delivery::EditParent,
            SendMode::ReplyToParent if origin.is_interaction() && parent_responded => {
                Delivery::FollowUp
            }
            SendMode::ReplyToParent => Delivery::Reply,
        }
    }
}

/// A control activation delivered by the platform.
pub trait Activation: Send + 'static {
    /// User who pressed the control.
    fn user_id(&self) -> UserId;
    /// Custom ID of the pressed control.
    fn control_id(&self) -> &str;
}

/// Raw stream of interactions targeting one rendered message.
#[derive(Debug)]
pub struct InteractionFeed<I> {
    rx: mpsc::UnboundedReceiver<I>,
}

impl<I> InteractionFeed<I> {
    pub fn new(rx: mpsc::UnboundedReceiver<I>) -> Self {
        Self { rx }
    }

    /// Create a feed together with the sender a transport pushes into.
    pub fn channel() -> (mpsc::UnboundedSender<I>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self::new(rx))
    }

    /// Next interaction, or `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<I> {
        self.rx.recv().await
    }
}

/// Chat platform operations used by a [`Pagination`](crate::Pagination).
///
/// `Message` is a handle to a displayed message. Edits return a fresh
/// handle which replaces the previous one.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    type Content: Clone + Send + Sync + 'static;
    type Parent: Send + Sync + 'static;
    type Message: Send + Sync + 'static;
    type Interaction: Activation;

    fn origin_kind(&self, parent: &Self::Parent) -> OriginKind;

    /// Whether an interaction parent already has a response.
    fn has_responded(&self, parent: &Self::Parent) -> bool;

    /// User who created the parent, if known.
    fn resolve_user_id(&self, parent: &Self::Parent) -> Option<UserId>;

    async fn send_message(
        &self,
        parent: &Self::Parent,
        payload: &ContentPayload<Self::Content>,
    ) -> Result<Self::Message, TransportError>;

    async fn reply_to(
        &self,
        parent: &Self::Parent,
        payload: &ContentPayload<Self::Content>,
    ) -> Result<Self::Message, TransportError>;

    async fn follow_up(
        &self,
        parent: &Self::Parent,
        payload: &ContentPayload<Self::Content>,
    ) -> Result<Self::Message, TransportError>;

    async fn edit_parent(
        &self,
        parent: &Self::Parent,
        payload: &ContentPayload<Self::Content>,
    ) -> Result<Self::Message, TransportError>;

    async fn edit_message(
        &self,
        message: &Self::Message,
        payload: &ContentPayload<Self::Content>,
    ) -> Result<Self::Message, TransportError>;

    async fn delete_message(&self, message: &Self::Message) -> Result<(), TransportError>;

    /// Start forwarding component interactions on `message` into a feed.
    async fn open_listener(
        &self,
        message: &Self::Message,
    ) -> Result<InteractionFeed<Self::Interaction>, TransportError>;

    /// Acknowledge an interaction. Must be a no-op when already acknowledged.
    async fn acknowledge(&self, interaction: &Self::Interaction) -> Result<(), TransportError>;
}
