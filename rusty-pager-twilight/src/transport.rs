//! [`Transport`] implementation backed by the twilight HTTP client.

use std::sync::Arc;

use async_trait::async_trait;
use rusty_pager::{
    ContentPayload, InteractionFeed, OriginKind, Transport, TransportError, UserId,
};
use tracing::debug;
use twilight_http::Client;
use twilight_model::{
    channel::{Message, message::embed::Embed},
    gateway::payload::incoming::InteractionCreate,
    http::interaction::{InteractionResponse, InteractionResponseData, InteractionResponseType},
};
use twilight_util::builder::InteractionResponseDataBuilder;

use crate::components::build_control_row;
use crate::parent::{PaginationMessage, PaginationParent};
use crate::router::{ComponentActivation, ComponentRouter};

fn failed<E>(operation: &'static str) -> impl FnOnce(E) -> TransportError
where
    E: std::error::Error + Send + Sync + 'static,
{
    move |source| TransportError::new(operation, source)
}

/// Paginates embeds on Discord through the HTTP API.
///
/// Interactions reach sessions through the shared [`ComponentRouter`], which
/// the gateway loop must feed with every `InteractionCreate` event.
#[derive(Debug, Clone)]
pub struct TwilightTransport {
    http: Arc<Client>,
    router: ComponentRouter,
}

impl TwilightTransport {
    pub fn new(http: Arc<Client>, router: ComponentRouter) -> Self {
        Self { http, router }
    }

    pub fn router(&self) -> &ComponentRouter {
        &self.router
    }

    async fn respond(
        &self,
        interaction: &InteractionCreate,
        kind: InteractionResponseType,
        payload: Option<&ContentPayload<Embed>>,
    ) -> Result<(), TransportError> {
        let response = InteractionResponse {
            kind,
            data: payload.map(response_data),
        };

        self.http
            .interaction(interaction.application_id)
            .create_response(interaction.id, &interaction.token, &response)
            .await
            .map_err(failed("create_response"))?;

        Ok(())
    }

    async fn update_response(
        &self,
        interaction: &InteractionCreate,
        payload: &ContentPayload<Embed>,
    ) -> Result<Message, TransportError> {
        let components = build_control_row(&payload.controls);
        self.http
            .interaction(interaction.application_id)
            .update_response(&interaction.token)
            .content(Some(payload.text.as_str()))
            .embeds(Some(std::slice::from_ref(&payload.content)))
            .components(Some(components.as_slice()))
            .await
            .map_err(failed("update_response"))?
            .model()
            .await
            .map_err(failed("update_response"))
    }
}

fn response_data(payload: &ContentPayload<Embed>) -> InteractionResponseData {
    InteractionResponseDataBuilder::new()
        .content(payload.text.clone())
        .embeds(vec![payload.content.clone()])
        .components(build_control_row(&payload.controls))
        .build()
}

fn interaction_handle(
    interaction: &InteractionCreate,
    message: &Message,
    follow_up: bool,
) -> PaginationMessage {
    if follow_up {
        PaginationMessage::FollowUp {
            application_id: interaction.application_id,
            token: interaction.token.clone(),
            message_id: message.id,
        }
    } else {
        PaginationMessage::Response {
            application_id: interaction.application_id,
            token: interaction.token.clone(),
            message_id: message.id,
        }
    }
}

#[async_trait]
impl Transport for TwilightTransport {
    type Content = Embed;
    type Parent = PaginationParent;
    type Message = PaginationMessage;
    type Interaction = ComponentActivation;

    fn origin_kind(&self, parent: &PaginationParent) -> OriginKind {
        parent.origin_kind()
    }

    fn has_responded(&self, parent: &PaginationParent) -> bool {
        parent.has_responded()
    }

    fn resolve_user_id(&self, parent: &PaginationParent) -> Option<UserId> {
        parent.author_id()
    }

    async fn send_message(
        &self,
        parent: &PaginationParent,
        payload: &ContentPayload<Embed>,
    ) -> Result<PaginationMessage, TransportError> {
        let channel_id = parent
            .channel_id()
            .ok_or_else(|| TransportError::new("send_message", "parent has no channel"))?;
        let components = build_control_row(&payload.controls);

        let message = self
            .http
            .create_message(channel_id)
            .content(&payload.text)
            .embeds(std::slice::from_ref(&payload.content))
            .components(&components)
            .await
            .map_err(failed("send_message"))?
            .model()
            .await
            .map_err(failed("send_message"))?;

        Ok(PaginationMessage::Channel {
            channel_id: message.channel_id,
            message_id: message.id,
        })
    }

    async fn reply_to(
        &self,
        parent: &PaginationParent,
        payload: &ContentPayload<Embed>,
    ) -> Result<PaginationMessage, TransportError> {
        let PaginationParent::Message(parent_message) = parent else {
            let interaction = parent
                .as_interaction()
                .ok_or_else(|| TransportError::new("reply_to", "parent is not an interaction"))?;

            self.respond(
                interaction,
                InteractionResponseType::ChannelMessageWithSource,
                Some(payload),
            )
            .await?;

            let message = self
                .http
                .interaction(interaction.application_id)
                .response(&interaction.token)
                .await
                .map_err(failed("fetch_response"))?
                .model()
                .await
                .map_err(failed("fetch_response"))?;

            return Ok(interaction_handle(interaction, &message, false));
        };

        let components = build_control_row(&payload.controls);
        let message = self
            .http
            .create_message(parent_message.channel_id)
            .reply(parent_message.id)
            .content(&payload.text)
            .embeds(std::slice::from_ref(&payload.content))
            .components(&components)
            .await
            .map_err(failed("reply_to"))?
            .model()
            .await
            .map_err(failed("reply_to"))?;

        Ok(PaginationMessage::Channel {
            channel_id: message.channel_id,
            message_id: message.id,
        })
    }

    async fn follow_up(
        &self,
        parent: &PaginationParent,
        payload: &ContentPayload<Embed>,
    ) -> Result<PaginationMessage, TransportError> {
        let Some(interaction) = parent.as_interaction() else {
            return self.reply_to(parent, payload).await;
        };
        let components = build_control_row(&payload.controls);

        let message = self
            .http
            .interaction(interaction.application_id)
            .create_followup(&interaction.token)
            .content(&payload.text)
            .embeds(std::slice::from_ref(&payload.content))
            .components(&components)
            .await
            .map_err(failed("follow_up"))?
            .model()
            .await
            .map_err(failed("follow_up"))?;

        Ok(interaction_handle(interaction, &message, true))
    }

    async fn edit_parent(
        &self,
        parent: &PaginationParent,
        payload: &ContentPayload<Embed>,
    ) -> Result<PaginationMessage, TransportError> {
        match parent {
            PaginationParent::Message(message) => {
                let handle = PaginationMessage::Channel {
                    channel_id: message.channel_id,
                    message_id: message.id,
                };
                self.edit_message(&handle, payload).await
            }
            PaginationParent::Command { interaction, .. }
            | PaginationParent::Component { interaction, .. } => {
                let message = self.update_response(interaction, payload).await?;
                Ok(interaction_handle(interaction, &message, false))
            }
        }
    }

    async fn edit_message(
        &self,
        message: &PaginationMessage,
        payload: &ContentPayload<Embed>,
    ) -> Result<PaginationMessage, TransportError> {
        let components = build_control_row(&payload.controls);
        let embeds = std::slice::from_ref(&payload.content);

        let updated = match message {
            PaginationMessage::Channel {
                channel_id,
                message_id,
            } => self
                .http
                .update_message(*channel_id, *message_id)
                .content(Some(payload.text.as_str()))
                .embeds(Some(embeds))
                .components(Some(components.as_slice()))
                .await
                .map_err(failed("edit_message"))?
                .model()
                .await
                .map_err(failed("edit_message"))?,
            PaginationMessage::Response {
                application_id,
                token,
                ..
            } => self
                .http
                .interaction(*application_id)
                .update_response(token)
                .content(Some(payload.text.as_str()))
                .embeds(Some(embeds))
                .components(Some(components.as_slice()))
                .await
                .map_err(failed("edit_message"))?
                .model()
                .await
                .map_err(failed("edit_message"))?,
            PaginationMessage::FollowUp {
                application_id,
                token,
                message_id,
            } => self
                .http
                .interaction(*application_id)
                .update_followup(token, *message_id)
                .content(Some(payload.text.as_str()))
                .embeds(Some(embeds))
                .components(Some(components.as_slice()))
                .await
                .map_err(failed("edit_message"))?
                .model()
                .await
                .map_err(failed("edit_message"))?,
        };

        Ok(message.refreshed(&updated))
    }

    async fn delete_message(&self, message: &PaginationMessage) -> Result<(), TransportError> {
        match message {
            PaginationMessage::Channel {
                channel_id,
                message_id,
            } => {
                self.http
                    .delete_message(*channel_id, *message_id)
                    .await
                    .map_err(failed("delete_message"))?;
            }
            PaginationMessage::Response {
                application_id,
                token,
                ..
            } => {
                self.http
                    .interaction(*application_id)
                    .delete_response(token)
                    .await
                    .map_err(failed("delete_message"))?;
            }
            PaginationMessage::FollowUp {
                application_id,
                token,
                message_id,
            } => {
                self.http
                    .interaction(*application_id)
                    .delete_followup(token, *message_id)
                    .await
                    .map_err(failed("delete_message"))?;
            }
        }

        Ok(())
    }

    async fn open_listener(
        &self,
        message: &PaginationMessage,
    ) -> Result<InteractionFeed<ComponentActivation>, TransportError> {
        debug!(message_id = message.message_id().get(), "listening for pagination presses");
        Ok(self.router.register(message.message_id()).await)
    }

    async fn acknowledge(&self, activation: &ComponentActivation) -> Result<(), TransportError> {
        if activation.mark_acknowledged() {
            return Ok(());
        }

        let result = self
            .respond(
                activation.interaction(),
                InteractionResponseType::DeferredUpdateMessage,
                None,
            )
            .await;

        if result.is_err() {
            activation.clear_acknowledged();
        }

        result
    }
}
