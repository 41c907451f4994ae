//! Rendered controls to twilight button components.

use rusty_pager::{ControlStyle, RenderedControl};
use twilight_model::channel::message::{
    EmojiReactionType,
    component::{ActionRow, Button, ButtonStyle, Component},
};

/// Build a single action row holding every rendered control.
///
/// Returns no components when `controls` is empty so the message row is removed.
pub fn build_control_row(controls: &[RenderedControl]) -> Vec<Component> {
    if controls.is_empty() {
        return vec![];
    }

    let buttons = controls
        .iter()
        .map(|control| {
            Component::Button(Button {
                id: None,
                custom_id: Some(control.custom_id.clone()),
                disabled: control.disabled,
                emoji: control
                    .emoji
                    .as_ref()
                    .map(|name| EmojiReactionType::Unicode { name: name.clone() }),
                label: control.label.clone(),
                style: button_style(control.style),
                url: None,
                sku_id: None,
            })
        })
        .collect();

    vec![Component::ActionRow(ActionRow {
        id: None,
        components: buttons,
    })]
}

pub fn button_style(style: ControlStyle) -> ButtonStyle {
    match style {
        ControlStyle::Primary => ButtonStyle::Primary,
        ControlStyle::Secondary => ButtonStyle::Secondary,
        ControlStyle::Success => ButtonStyle::Success,
        ControlStyle::Danger => ButtonStyle::Danger,
    }
}
