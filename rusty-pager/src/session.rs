//! The pagination state machine.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::collector::{CloseReason, Collected, Collector};
use crate::config::{EndPolicy, PaginationConfig, validate_idle_timeout};
use crate::controls::{ControlKind, ControlSet, ControlSetBuilder, UserId};
use crate::error::{PaginationError, Result};
use crate::events::{EventHub, EventKind, PaginationEvent};
use crate::page::PageStore;
use crate::render::{ContentPayload, render};
use crate::transport::{Activation, Delivery, SendMode, Transport};

/// Lifecycle position of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unstarted,
    Started,
    Closed(CloseReason),
}

/// Result of dispatching one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The control ran and the interaction was acknowledged.
    Handled(ControlKind),
    /// The activating user may not drive this session.
    Unauthorized,
    /// The custom ID matches no configured control.
    Unrecognized,
}

enum Command {
    Stop,
    JumpTo {
        index: usize,
        reply: oneshot::Sender<Result<()>>,
    },
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Stop => f.write_str("Stop"),
            Command::JumpTo { index, .. } => {
                f.debug_struct("JumpTo").field("index", index).finish()
            }
        }
    }
}

enum Step<I> {
    Collected(Collected<I>),
    Command(Command),
}

/// Cloneable remote control for a session driven by [`Pagination::run`].
#[derive(Debug, Clone)]
pub struct PaginationHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl PaginationHandle {
    /// Ask the session to close as if Stop was pressed.
    pub fn stop(&self) -> Result<()> {
        self.commands
            .send(Command::Stop)
            .map_err(|_| PaginationError::InvalidState("pagination already closed"))
    }

    /// Ask the running session to show `index`.
    pub async fn jump_to(&self, index: usize) -> Result<()> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::JumpTo { index, reply })
            .map_err(|_| PaginationError::InvalidState("pagination already closed"))?;

        response
            .await
            .map_err(|_| PaginationError::InvalidState("pagination already closed"))?
    }
}

/// A paginated message bound to one parent and one listener.
///
/// Configure it, [`start`](Self::start) it, then drive it with
/// [`run`](Self::run) until it closes.
pub struct Pagination<T: Transport> {
    transport: Arc<T>,
    store: PageStore<T::Content>,
    controls: ControlSet,
    config: PaginationConfig,
    owner: Option<UserId>,
    events: EventHub,
    phase: Phase,
    parent: Option<T::Parent>,
    message: Option<T::Message>,
    collector: Option<Collector<T::Interaction>>,
    commands_tx: mpsc::UnboundedSender<Command>,
    commands_rx: mpsc::UnboundedReceiver<Command>,
}

impl<T: Transport> std::fmt::Debug for Pagination<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pagination")
            .field("pages", &self.store.len())
            .field("current_index", &self.store.current_index())
            .field("config", &self.config)
            .field("owner", &self.owner)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> Pagination<T> {
    pub fn new(transport: Arc<T>) -> Self {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        Self {
            transport,
            store: PageStore::new(),
            controls: ControlSet::default(),
            config: PaginationConfig::default(),
            owner: None,
            events: EventHub::new(),
            phase: Phase::Unstarted,
            parent: None,
            message: None,
            collector: None,
            commands_tx,
            commands_rx,
        }
    }

    pub fn add_page(&mut self, content: T::Content, caption: Option<&str>) -> Result<&mut Self> {
        self.store.add_page(content, caption)?;
        Ok(self)
    }

    pub fn set_controls(&mut self, controls: ControlSet) -> &mut Self {
        self.controls = controls;
        self
    }

    /// Build the control set from an empty builder.
    pub fn set_controls_with<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(ControlSetBuilder) -> ControlSetBuilder,
    {
        self.controls = build(ControlSet::builder()).build();
        self
    }

    /// Let anyone drive the session instead of only its owner.
    pub fn set_owner_independent(&mut self, owner_independent: bool) -> &mut Self {
        self.config.owner_independent = owner_independent;
        self
    }

    /// Override the owner otherwise resolved from the parent.
    pub fn set_owner(&mut self, owner: UserId) -> &mut Self {
        self.owner = Some(owner);
        self
    }

    /// Limit accepted activations; `0` means unlimited.
    pub fn set_max_activations(&mut self, max: usize) -> &mut Self {
        self.config.max_activations = (max > 0).then_some(max);
        self
    }

    pub fn set_idle_timeout(&mut self, timeout: Duration) -> Result<&mut Self> {
        validate_idle_timeout(timeout)?;
        self.config.idle_timeout = timeout;
        Ok(self)
    }

    pub fn set_end_policy(&mut self, policy: EndPolicy) -> &mut Self {
        self.config.end_policy = policy;
        self
    }

    /// Choose the page shown first. Does not render.
    pub fn set_current_index(&mut self, index: usize) -> Result<&mut Self> {
        self.store.set_current_index(index)?;
        Ok(self)
    }

    /// Replace every tunable at once.
    pub fn with_config(&mut self, config: PaginationConfig) -> Result<&mut Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn on<F>(&self, kind: EventKind, observer: F) -> &Self
    where
        F: Fn(&PaginationEvent) + Send + Sync + 'static,
    {
        self.events.on(kind, observer);
        self
    }

    /// Shared event hub; clones stay valid after the session moves into a task.
    pub fn events(&self) -> EventHub {
        self.events.clone()
    }

    pub fn handle(&self) -> PaginationHandle {
        PaginationHandle {
            commands: self.commands_tx.clone(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.store.current_index()
    }

    pub fn page_count(&self) -> usize {
        self.store.len()
    }

    pub fn owner(&self) -> Option<UserId> {
        self.owner
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    pub fn controls(&self) -> &ControlSet {
        &self.controls
    }

    pub fn parent(&self) -> Option<&T::Parent> {
        self.parent.as_ref()
    }

    /// The displayed pagination message, once sent.
    pub fn message(&self) -> Option<&T::Message> {
        self.message.as_ref()
    }

    /// Render the current page without touching the platform.
    pub fn render(
        &self,
        disabled: bool,
        include_controls: bool,
    ) -> Result<ContentPayload<T::Content>> {
        render(&self.store, &self.controls, disabled, include_controls)
    }

    /// Send the first page and open the interaction listener.
    pub async fn start(&mut self, parent: T::Parent, mode: SendMode) -> Result<()> {
        if self.phase != Phase::Unstarted {
            return Err(PaginationError::InvalidState("pagination already started"));
        }
        if self.store.is_empty() {
            return Err(PaginationError::InvalidState("pagination has no pages"));
        }

        let transport = Arc::clone(&self.transport);
        if self.owner.is_none() {
            self.owner = transport.resolve_user_id(&parent);
        }

        let delivery = Delivery::resolve(
            transport.origin_kind(&parent),
            mode,
            transport.has_responded(&parent),
        );
        let payload = self.render(false, true)?;

        let message = match delivery {
            Delivery::NewMessage => transport.send_message(&parent, &payload).await?,
            Delivery::EditParent => transport.edit_parent(&parent, &payload).await?,
            Delivery::Reply => transport.reply_to(&parent, &payload).await?,
            Delivery::FollowUp => transport.follow_up(&parent, &payload).await?,
        };

        self.parent = Some(parent);
        let message = self.message.insert(message);
        let opened = transport.open_listener(message).await;
        let feed = match opened {
            Ok(feed) => feed,
            Err(source) => {
                self.close(CloseReason::Disconnected).await;
                return Err(source.into());
            }
        };

        let controls = self.controls.clone();
        let require_owner_match = !self.config.owner_independent;
        let owner = self.owner;
        self.collector = Some(Collector::new(
            feed,
            move |interaction: &T::Interaction| {
                controls.find(interaction.control_id()).is_some()
                    && ControlSet::authorize(interaction.user_id(), require_owner_match, owner)
            },
            self.config.max_activations,
            self.config.idle_timeout,
        ));
        self.phase = Phase::Started;

        debug!(
            ?delivery,
            owner = owner.map(UserId::get),
            pages = self.store.len(),
            "pagination started"
        );

        Ok(())
    }

    /// Drive the listener until the session closes.
    ///
    /// Activation errors propagate and leave the session started on its
    /// previous page; call [`stop`](Self::stop) to apply the end policy
    /// afterwards.
    pub async fn run(&mut self) -> Result<CloseReason> {
        loop {
            match self.phase {
                Phase::Closed(reason) => return Ok(reason),
                Phase::Unstarted => {
                    return Err(PaginationError::InvalidState("pagination not started"));
                }
                Phase::Started => {}
            }

            let step = {
                let Some(collector) = self.collector.as_mut() else {
                    return Err(PaginationError::InvalidState("interaction listener is not open"));
                };

                tokio::select! {
                    collected = collector.next() => Step::Collected(collected),
                    Some(command) = self.commands_rx.recv() => Step::Command(command),
                }
            };

            match step {
                Step::Collected(Collected::Accepted(interaction)) => {
                    self.dispatch(interaction).await?;
                }
                Step::Collected(Collected::Rejected(interaction)) => {
                    if let Err(source) = self.transport.acknowledge(&interaction).await {
                        warn!(?source, "failed to acknowledge filtered interaction");
                    }
                }
                Step::Collected(Collected::Closed(reason)) => {
                    return Ok(self.close(reason).await);
                }
                Step::Command(Command::Stop) => {
                    self.close(CloseReason::Stop).await;
                }
                Step::Command(Command::JumpTo { index, reply }) => {
                    let _ = reply.send(self.jump_to(index).await);
                }
            }
        }
    }

    /// Apply one interaction to the session.
    pub async fn dispatch(&mut self, interaction: T::Interaction) -> Result<Dispatch> {
        self.ensure_started()?;

        let user_id = interaction.user_id();
        if !ControlSet::authorize(user_id, !self.config.owner_independent, self.owner) {
            return Ok(Dispatch::Unauthorized);
        }

        let Some(control) = self.controls.find(interaction.control_id()) else {
            debug!(control_id = interaction.control_id(), "ignoring unrecognized control");
            return Ok(Dispatch::Unrecognized);
        };

        debug!(
            %control,
            user_id = user_id.get(),
            index = self.store.current_index(),
            "dispatching control"
        );

        let shown = match control {
            ControlKind::First => self.show(0).await,
            ControlKind::Previous => self.show(self.store.previous_index()).await,
            ControlKind::Stop => Ok(()),
            ControlKind::Next => self.show(self.store.next_index()).await,
            ControlKind::Last => self.show(self.store.last_index()).await,
        };

        if let Err(source) = shown {
            if let Err(ack) = self.transport.acknowledge(&interaction).await {
                warn!(source = ?ack, "failed to acknowledge interaction after failed update");
            }
            return Err(source);
        }

        self.events.emit(PaginationEvent::Control { control, user_id });
        self.transport.acknowledge(&interaction).await?;
        self.events.emit(PaginationEvent::Collect { control, user_id });

        if control == ControlKind::Stop {
            self.close(CloseReason::Stop).await;
        } else if let Some(collector) = self.collector.as_mut() {
            collector.reset_timer();
        }

        Ok(Dispatch::Handled(control))
    }

    /// Show `index` on the live message.
    pub async fn jump_to(&mut self, index: usize) -> Result<()> {
        self.ensure_started()?;
        self.show(index).await
    }

    /// Close the session as if Stop was pressed.
    pub async fn stop(&mut self) -> Result<CloseReason> {
        self.ensure_started()?;
        Ok(self.close(CloseReason::Stop).await)
    }

    fn ensure_started(&self) -> Result<()> {
        match self.phase {
            Phase::Started => Ok(()),
            Phase::Unstarted => Err(PaginationError::InvalidState("pagination not started")),
            Phase::Closed(_) => Err(PaginationError::InvalidState("pagination already closed")),
        }
    }

    /// The index only moves once the message shows the new page.
    async fn show(&mut self, index: usize) -> Result<()> {
        let previous = self.store.current_index();
        self.store.set_current_index(index)?;
        if let Err(source) = self.update_message(false, true).await {
            self.store.set_current_index(previous)?;
            return Err(source);
        }
        self.events.emit(PaginationEvent::PageChange { index });
        Ok(())
    }

    async fn update_message(&mut self, disabled: bool, include_controls: bool) -> Result<()> {
        let payload = self.render(disabled, include_controls)?;
        let message = self
            .message
            .as_ref()
            .ok_or(PaginationError::InvalidState("pagination message not sent"))?;

        let updated = self.transport.edit_message(message, &payload).await?;
        self.message = Some(updated);
        Ok(())
    }

    async fn close(&mut self, reason: CloseReason) -> CloseReason {
        if let Phase::Closed(existing) = self.phase {
            return existing;
        }

        self.phase = Phase::Closed(reason);
        self.commands_rx.close();
        while let Ok(command) = self.commands_rx.try_recv() {
            if let Command::JumpTo { reply, .. } = command {
                let _ = reply.send(Err(PaginationError::InvalidState("pagination already closed")));
            }
        }
        if let Some(collector) = self.collector.as_mut() {
            collector.stop();
        }
        self.collector = None;

        let error = self.apply_end_policy().await.err().map(Arc::new);
        debug!(
            %reason,
            policy = self.config.end_policy.as_str(),
            failed = error.is_some(),
            "pagination closed"
        );

        self.events.emit(PaginationEvent::End { reason, error });
        reason
    }

    async fn apply_end_policy(&mut self) -> Result<()> {
        match self.config.end_policy {
            EndPolicy::None => Ok(()),
            EndPolicy::DeleteButtons => self.update_message(false, false).await,
            EndPolicy::DisableButtons => self.update_message(true, true).await,
            EndPolicy::DeleteMessage => {
                if let Some(message) = self.message.take()
                    && let Err(source) = self.transport.delete_message(&message).await
                {
                    warn!(?source, "failed to delete pagination message");
                }
                Ok(())
            }
        }
    }
}
