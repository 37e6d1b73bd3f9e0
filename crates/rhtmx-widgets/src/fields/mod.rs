// File: src/fields/mod.rs
// Purpose: Widget trait, shared field props and native control markup

pub mod color_field;
pub mod list_field;
pub mod typed_field;

use crate::control::{Control, ControlType, FieldControl, GroupControl};
use maud::{html, Markup};
use std::fmt;

pub use color_field::{ColorChangeEvent, ColorChangeTarget, ColorField};
pub use list_field::{ListField, ListFieldFactory, MIN_SLOTS};
pub use typed_field::{FieldType, RepeatedGroup, RepeatedGroupFactory, TypedField};

/// Something that renders to markup and exposes its live controls
pub trait Widget: fmt::Debug {
    /// Render the widget as HTML
    fn render(&self) -> Markup;

    /// Current control state, or `None` when the widget renders nothing
    fn control(&self) -> Option<Control>;
}

/// Attributes shared by every field widget
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldProps {
    pub name: String,
    pub default_value: Option<String>,
    pub required: bool,
    pub placeholder: Option<String>,
    pub class: Option<String>,
    pub id: Option<String>,
    pub style: Option<String>,
    pub hidden: bool,
    /// ARIA role, passed through untouched
    pub role: Option<String>,
}

impl FieldProps {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Extra classes as a list, for group controls
    pub(crate) fn class_names(&self) -> Vec<String> {
        self.class
            .as_deref()
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

/// Build a typed field whose list types render as [`ListField`]s
pub fn typed_field(props: FieldProps, field_type: FieldType) -> TypedField {
    TypedField::new(props, field_type, &ListFieldFactory)
}

impl Widget for Control {
    fn render(&self) -> Markup {
        render_control(self)
    }

    fn control(&self) -> Option<Control> {
        Some(self.clone())
    }
}

/// Render any control as plain HTML
pub fn render_control(control: &Control) -> Markup {
    match control {
        Control::Field(field) => render_field(field),
        Control::Group(group) => render_group(group),
    }
}

fn render_group(group: &GroupControl) -> Markup {
    html! {
        fieldset name=[non_empty(&group.name)] class=[class_attr(&group.class_list())] {
            @for child in &group.children {
                (render_control(child))
            }
        }
    }
}

pub(crate) fn render_field(field: &FieldControl) -> Markup {
    let name = non_empty(&field.name);
    match field.control_type {
        ControlType::SelectOne | ControlType::SelectMultiple => html! {
            select
                name=[name]
                multiple[field.control_type == ControlType::SelectMultiple]
                required[field.required]
                class=[field.class.as_deref()] {
                @for opt in &field.options {
                    option value=(opt.value) selected[opt.selected] { (opt.text()) }
                }
            }
        },
        ControlType::Textarea => html! {
            textarea
                name=[name]
                required[field.required]
                placeholder=[field.placeholder.as_deref()]
                class=[field.class.as_deref()] { (field.value) }
        },
        ControlType::Output => html! {
            output name=[name] class=[field.class.as_deref()] { (field.value) }
        },
        ControlType::Fieldset => html! {
            fieldset name=[name] class=[field.class.as_deref()] {}
        },
        ControlType::Untyped | ControlType::Other => html! {
            input name=[name] value=[non_empty(&field.value)] hidden[field.hidden];
        },
        ty => html! {
            input
                type=(ty.as_str())
                name=[name]
                value=[non_empty(&field.value)]
                checked[field.checked]
                required[field.required]
                hidden[field.hidden]
                readonly[field.readonly]
                placeholder=[field.placeholder.as_deref()]
                step=[field.step.as_deref()]
                class=[field.class.as_deref()];
        },
    }
}

pub(crate) fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

pub(crate) fn class_attr<S: AsRef<str>>(classes: &[S]) -> Option<String> {
    let joined = classes
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<_>>()
        .join(" ");
    non_empty(&joined).map(str::to_string)
}
