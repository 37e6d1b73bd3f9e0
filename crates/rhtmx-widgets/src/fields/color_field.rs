// File: src/fields/color_field.rs
// Purpose: Color picker with alpha slider and a hidden rgba mirror

use super::{class_attr, non_empty, FieldProps, Widget};
use crate::color::Color;
use crate::control::{CompositeKind, Control, ControlType, FieldControl, GroupControl};
use crate::value::{format_number, Value};
use maud::{html, Markup};
use std::fmt;

/// Payload handed to a color field's change handler
#[derive(Debug, Clone, PartialEq)]
pub struct ColorChangeEvent {
    pub target: ColorChangeTarget,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorChangeTarget {
    /// Name of the color field
    pub name: String,
    /// Raw value of the input that changed
    pub value: String,
    /// New color as `rgba(r, g, b, a)`
    pub color: String,
}

pub type ColorChangeHandler = Box<dyn FnMut(&ColorChangeEvent)>;

/// Name of the hidden input holding the current rgba string
pub fn mirror_name(name: &str) -> String {
    format!("{}_color", name)
}

/// Color picker field
///
/// A swatch toggles the editor panel; the panel holds a native color
/// picker for r/g/b, a 0-100 range slider for alpha, and a hidden input
/// named `<name>_color` that always carries the rgba string.
pub struct ColorField {
    props: FieldProps,
    editor_hidden: bool,
    color: Color,
    on_change: Option<ColorChangeHandler>,
}

impl fmt::Debug for ColorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorField")
            .field("name", &self.props.name)
            .field("color", &self.color)
            .field("editor_hidden", &self.editor_hidden)
            .finish()
    }
}

impl ColorField {
    /// New field; starts from the default value, or opaque black without one
    pub fn new(props: FieldProps) -> Self {
        let color = props
            .default_value
            .as_deref()
            .map(Color::parse)
            .unwrap_or_default();
        Self {
            props,
            editor_hidden: true,
            color,
            on_change: None,
        }
    }

    pub fn on_change(mut self, handler: impl FnMut(&ColorChangeEvent) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn hex(&self) -> String {
        self.color.to_hex()
    }

    pub fn rgba(&self) -> String {
        self.color.to_rgba()
    }

    pub fn is_editor_hidden(&self) -> bool {
        self.editor_hidden
    }

    /// Show or hide the editor panel; the value is unaffected
    pub fn toggle(&mut self) {
        self.editor_hidden = !self.editor_hidden;
    }

    /// Color picker changed: take r/g/b from the new value, keep alpha
    pub fn on_color_change(&mut self, value: &str) {
        self.color = self.color.with_rgb(Color::parse(value));
        self.notify(value);
    }

    /// Alpha slider changed (0-100)
    pub fn on_alpha_change(&mut self, slider: f64) {
        self.color = self.color.with_alpha(slider / 100.0);
        self.notify(&format_number(slider));
    }

    fn notify(&mut self, value: &str) {
        let event = ColorChangeEvent {
            target: ColorChangeTarget {
                name: self.props.name.clone(),
                value: value.to_string(),
                color: self.rgba(),
            },
        };
        if let Some(handler) = self.on_change.as_mut() {
            handler(&event);
        }
    }

    fn slider_value(&self) -> String {
        format_number(self.color.a * 100.0)
    }
}

impl Widget for ColorField {
    fn render(&self) -> Markup {
        let mut classes: Vec<&str> = CompositeKind::Color.marker_classes().to_vec();
        classes.extend(self.props.class.as_deref());
        let display = if self.editor_hidden { "none" } else { "block" };
        let style = match self.props.style.as_deref() {
            Some(style) => format!("{}; display: {}", style.trim_end_matches(';'), display),
            None => format!("display: {}", display),
        };
        let rgba = self.rgba();

        html! {
            div {
                svg width="25" height="25" {
                    rect height="25" width="25" rx="7" fill=(rgba) {}
                }
                fieldset
                    name=[non_empty(&self.props.name)]
                    style=(style)
                    class=[class_attr(&classes)]
                    id=[self.props.id.as_deref()]
                    hidden[self.props.hidden]
                    role=[self.props.role.as_deref()] {
                    input
                        type="color"
                        value=(self.hex())
                        placeholder=[self.props.placeholder.as_deref()]
                        hidden[self.editor_hidden]
                        class="colorPalette";
                    input
                        type="range"
                        value=(self.slider_value())
                        placeholder=[self.props.placeholder.as_deref()];
                    input name=(mirror_name(&self.props.name)) value=(rgba) readonly hidden;
                }
            }
        }
    }

    fn control(&self) -> Option<Control> {
        let mut picker = FieldControl::new(ControlType::Color, "").with_value(self.hex());
        picker.hidden = self.editor_hidden;
        let slider = FieldControl::new(ControlType::Range, "").with_value(self.slider_value());
        let mut mirror = FieldControl::new(ControlType::Text, mirror_name(&self.props.name))
            .with_value(self.rgba());
        mirror.hidden = true;
        mirror.readonly = true;

        let mut group = GroupControl::new(&self.props.name)
            .with_composite(CompositeKind::Color)
            .with_children(vec![picker.into(), slider.into(), mirror.into()]);
        group.classes = self.props.class_names();
        Some(group.into())
    }
}

/// Serialize a color group: the mirror input's rgba string, verbatim
pub fn serialize(group: &GroupControl) -> Option<Value> {
    let mirror = group.named_element(&mirror_name(&group.name))?.as_field()?;
    Some(Value::String(mirror.current_value().to_string()))
}
