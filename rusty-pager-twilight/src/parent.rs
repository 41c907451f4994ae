//! What a pagination is anchored to, and the handle of what it displays.

use rusty_pager::{OriginKind, UserId};
use twilight_model::{
    application::interaction::InteractionType,
    channel::Message,
    gateway::payload::incoming::InteractionCreate,
    id::{
        Id,
        marker::{ApplicationMarker, ChannelMarker, MessageMarker},
    },
};

/// The message or interaction a pagination is started from.
#[derive(Debug, Clone)]
pub enum PaginationParent {
    Message(Box<Message>),
    /// `responded` is true once the interaction has an initial response.
    Command {
        interaction: Box<InteractionCreate>,
        responded: bool,
    },
    Component {
        interaction: Box<InteractionCreate>,
        responded: bool,
    },
}

impl PaginationParent {
    pub fn message(message: Message) -> Self {
        Self::Message(Box::new(message))
    }

    /// Classify an interaction by its type.
    ///
    /// Returns `None` for interaction types that cannot anchor a pagination.
    pub fn interaction(interaction: Box<InteractionCreate>, responded: bool) -> Option<Self> {
        match interaction.kind {
            InteractionType::ApplicationCommand => Some(Self::Command {
                interaction,
                responded,
            }),
            InteractionType::MessageComponent => Some(Self::Component {
                interaction,
                responded,
            }),
            _ => None,
        }
    }

    pub fn origin_kind(&self) -> OriginKind {
        match self {
            Self::Message(_) => OriginKind::Message,
            Self::Command { .. } => OriginKind::Command,
            Self::Component { .. } => OriginKind::ComponentInteraction,
        }
    }

    pub fn has_responded(&self) -> bool {
        match self {
            Self::Message(_) => false,
            Self::Command { responded, .. } | Self::Component { responded, .. } => *responded,
        }
    }

    pub fn author_id(&self) -> Option<UserId> {
        match self {
            Self::Message(message) => Some(UserId(message.author.id.get())),
            Self::Command { interaction, .. } | Self::Component { interaction, .. } => {
                interaction.author_id().map(|id| UserId(id.get()))
            }
        }
    }

    pub fn channel_id(&self) -> Option<Id<ChannelMarker>> {
        match self {
            Self::Message(message) => Some(message.channel_id),
            Self::Command { interaction, .. } | Self::Component { interaction, .. } => {
                interaction.channel.as_ref().map(|channel| channel.id)
            }
        }
    }

    pub(crate) fn as_interaction(&self) -> Option<&InteractionCreate> {
        match self {
            Self::Message(_) => None,
            Self::Command { interaction, .. } | Self::Component { interaction, .. } => {
                Some(&**interaction)
            }
        }
    }
}

/// Handle to the displayed pagination message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationMessage {
    /// A regular channel message.
    Channel {
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
    },
    /// The original response of an interaction.
    Response {
        application_id: Id<ApplicationMarker>,
        token: String,
        message_id: Id<MessageMarker>,
    },
    /// A follow-up message of an interaction.
    FollowUp {
        application_id: Id<ApplicationMarker>,
        token: String,
        message_id: Id<MessageMarker>,
    },
}

impl PaginationMessage {
    pub fn message_id(&self) -> Id<MessageMarker> {
        match self {
            Self::Channel { message_id, .. }
            | Self::Response { message_id, .. }
            | Self::FollowUp { message_id, .. } => *message_id,
        }
    }

    /// Same handle pointing at the message returned by an edit.
    pub(crate) fn refreshed(&self, message: &Message) -> Self {
        match self {
            Self::Channel { .. } => Self::Channel {
                channel_id: message.channel_id,
                message_id: message.id,
            },
            Self::Response {
                application_id,
                token,
                ..
            } => Self::Response {
                application_id: *application_id,
                token: token.clone(),
                message_id: message.id,
            },
            Self::FollowUp {
                application_id,
                token,
                ..
            } => Self::FollowUp {
                application_id: *application_id,
                token: token.clone(),
                message_id: message.id,
            },
        }
    }
}
