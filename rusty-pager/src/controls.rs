//! Navigation control descriptions and the activation authorization rule.

use std::fmt;

/// Prefix shared by the default control custom IDs.
pub const CUSTOM_ID_PREFIX: &str = "pg";

/// Platform user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u64);

impl UserId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the five navigation controls, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ControlKind {
    First,
    Previous,
    Stop,
    Next,
    Last,
}

impl ControlKind {
    /// All controls in fixed rendering order.
    pub const ALL: [ControlKind; 5] = [
        ControlKind::First,
        ControlKind::Previous,
        ControlKind::Stop,
        ControlKind::Next,
        ControlKind::Last,
    ];

    /// Short action segment used in default custom IDs.
    pub fn action(self) -> &'static str {
        match self {
            ControlKind::First => "first",
            ControlKind::Previous => "prev",
            ControlKind::Stop => "stop",
            ControlKind::Next => "next",
            ControlKind::Last => "last",
        }
    }

    fn default_label(self) -> &'static str {
        match self {
            ControlKind::First => "⏮ First",
            ControlKind::Previous => "◀ Prev",
            ControlKind::Stop => "Stop",
            ControlKind::Next => "Next ▶",
            ControlKind::Last => "Last ⏭",
        }
    }

    fn default_style(self) -> ControlStyle {
        match self {
            ControlKind::Stop => ControlStyle::Danger,
            _ => ControlStyle::Secondary,
        }
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action())
    }
}

/// Visual emphasis of a control; transports map it to their own styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlStyle {
    Primary,
    #[default]
    Secondary,
    Success,
    Danger,
}

/// Configuration of a single navigation control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlDescriptor {
    pub kind: ControlKind,
    /// Stable identifier echoed back by the platform on activation.
    pub custom_id: String,
    pub label: Option<String>,
    pub emoji: Option<String>,
    pub style: ControlStyle,
}

impl ControlDescriptor {
    /// Descriptor with the default custom ID, label and style for `kind`.
    pub fn new(kind: ControlKind) -> Self {
        Self {
            kind,
            custom_id: format!("{CUSTOM_ID_PREFIX}:{}", kind.action()),
            label: Some(kind.default_label().to_owned()),
            emoji: None,
            style: kind.default_style(),
        }
    }

    pub fn custom_id(mut self, custom_id: impl Into<String>) -> Self {
        self.custom_id = custom_id.into();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Replace the label with an emoji-only control.
    pub fn emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self.label = None;
        self
    }

    pub fn style(mut self, style: ControlStyle) -> Self {
        self.style = style;
        self
    }
}

/// A control ready to be turned into a platform widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedControl {
    pub kind: ControlKind,
    pub custom_id: String,
    pub label: Option<String>,
    pub emoji: Option<String>,
    pub style: ControlStyle,
    pub disabled: bool,
}

/// The renderable control group; empty when controls are removed.
pub type RenderedControls = Vec<RenderedControl>;

/// The configured navigation controls of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSet {
    controls: Vec<ControlDescriptor>,
}

impl Default for ControlSet {
    /// All five controls with default IDs and labels.
    fn default() -> Self {
        Self::builder().all().build()
    }
}

impl ControlSet {
    /// Start an empty builder.
    pub fn builder() -> ControlSetBuilder {
        ControlSetBuilder::default()
    }

    /// A set with no controls at all.
    pub fn empty() -> Self {
        Self {
            controls: Vec::new(),
        }
    }

    /// Build the control group, every control carrying `disabled`.
    pub fn build(&self, disabled: bool) -> RenderedControls {
        self.controls
            .iter()
            .map(|control| RenderedControl {
                kind: control.kind,
                custom_id: control.custom_id.clone(),
                label: control.label.clone(),
                emoji: control.emoji.clone(),
                style: control.style,
                disabled,
            })
            .collect()
    }

    /// Resolve an incoming custom ID to a configured control.
    pub fn find(&self, custom_id: &str) -> Option<ControlKind> {
        self.controls
            .iter()
            .find(|control| control.custom_id == custom_id)
            .map(|control| control.kind)
    }

    pub fn get(&self, kind: ControlKind) -> Option<&ControlDescriptor> {
        self.controls.iter().find(|control| control.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Whether `actor` may drive a session owned by `owner`.
    pub fn authorize(actor: UserId, require_owner_match: bool, owner: Option<UserId>) -> bool {
        match owner {
            Some(owner) if require_owner_match => actor == owner,
            _ => true,
        }
    }
}

/// Builder selecting and customizing controls.
///
/// Adding the same kind twice replaces the earlier descriptor. Order is
/// always normalized to First, Previous, Stop, Next, Last.
#[derive(Debug, Default)]
pub struct ControlSetBuilder {
    controls: Vec<ControlDescriptor>,
}

impl ControlSetBuilder {
    pub fn control(mut self, descriptor: ControlDescriptor) -> Self {
        self.controls.retain(|existing| existing.kind != descriptor.kind);
        self.controls.push(descriptor);
        self
    }

    pub fn first(self) -> Self {
        self.control(ControlDescriptor::new(ControlKind::First))
    }

    pub fn previous(self) -> Self {
        self.control(ControlDescriptor::new(ControlKind::Previous))
    }

    pub fn stop(self) -> Self {
        self.control(ControlDescriptor::new(ControlKind::Stop))
    }

    pub fn next(self) -> Self {
        self.control(ControlDescriptor::new(ControlKind::Next))
    }

    pub fn last(self) -> Self {
        self.control(ControlDescriptor::new(ControlKind::Last))
    }

    /// Add every control with its defaults.
    pub fn all(self) -> Self {
        ControlKind::ALL
            .into_iter()
            .fold(self, |builder, kind| builder.control(ControlDescriptor::new(kind)))
    }

    pub fn build(mut self) -> ControlSet {
        self.controls.sort_by_key(|control| control.kind);
        ControlSet {
            controls: self.controls,
        }
    }
}
