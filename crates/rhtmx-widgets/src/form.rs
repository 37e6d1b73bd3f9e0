// File: src/form.rs
// Purpose: Form wrapper that hands typed data to the submit handler

use crate::config::WidgetsConfig;
use crate::control::GroupControl;
use crate::error::Result;
use crate::fields::Widget;
use crate::serialize::FormSerializer;
use crate::value::FormData;
use maud::{html, Markup};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Autocomplete {
    On,
    Off,
}

impl Autocomplete {
    pub fn as_str(&self) -> &'static str {
        match self {
            Autocomplete::On => "on",
            Autocomplete::Off => "off",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Enctype {
    #[serde(rename = "application/x-www-form-urlencoded")]
    UrlEncoded,
    #[serde(rename = "multipart/form-data")]
    Multipart,
    #[serde(rename = "text/plain")]
    TextPlain,
}

impl Enctype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Enctype::UrlEncoded => "application/x-www-form-urlencoded",
            Enctype::Multipart => "multipart/form-data",
            Enctype::TextPlain => "text/plain",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMethod {
    Get,
    Post,
    Dialog,
}

impl FormMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormMethod::Get => "get",
            FormMethod::Post => "post",
            FormMethod::Dialog => "dialog",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormTarget {
    #[serde(rename = "_self")]
    SelfFrame,
    #[serde(rename = "_blank")]
    Blank,
    #[serde(rename = "_parent")]
    Parent,
    #[serde(rename = "_top")]
    Top,
}

impl FormTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormTarget::SelfFrame => "_self",
            FormTarget::Blank => "_blank",
            FormTarget::Parent => "_parent",
            FormTarget::Top => "_top",
        }
    }
}

/// Attributes rendered verbatim onto the `<form>` element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormProps {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub enctype: Option<Enctype>,
    #[serde(default)]
    pub method: Option<FormMethod>,
    #[serde(default)]
    pub autocomplete: Option<Autocomplete>,
    #[serde(default)]
    pub novalidate: bool,
    #[serde(default)]
    pub target: Option<FormTarget>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

/// A native submit event
#[derive(Debug, Clone)]
pub struct SubmitEvent {
    /// The submitted form's controls
    pub target: GroupControl,
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new(target: GroupControl) -> Self {
        Self {
            target,
            default_prevented: false,
        }
    }

    /// Stop the browser from navigating
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Submit event as seen by the host, with typed data attached
#[derive(Debug, Clone)]
pub struct FormSubmitEvent {
    pub target: SubmitTarget,
    pub default_prevented: bool,
}

#[derive(Debug, Clone)]
pub struct SubmitTarget {
    /// The original event target
    pub form: GroupControl,
    pub data: FormData,
}

pub type SubmitHandler = Box<dyn FnMut(FormSubmitEvent)>;

/// Form container
///
/// Intercepts submission, serializes the submitted controls and passes
/// the typed result to the submit handler.
pub struct Form {
    props: FormProps,
    children: Vec<Box<dyn Widget>>,
    on_submit: Option<SubmitHandler>,
    serializer: FormSerializer,
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("props", &self.props)
            .field("children", &self.children)
            .field("has_submit_handler", &self.on_submit.is_some())
            .finish()
    }
}

impl Form {
    pub fn new(props: FormProps) -> Self {
        Self {
            props,
            children: Vec::new(),
            on_submit: None,
            serializer: FormSerializer::default(),
        }
    }

    /// New form using the serializer options from configuration
    pub fn with_config(props: FormProps, config: &WidgetsConfig) -> Self {
        Self {
            serializer: FormSerializer::new(config.serialize),
            ..Self::new(props)
        }
    }

    pub fn child(mut self, widget: impl Widget + 'static) -> Self {
        self.push(widget);
        self
    }

    pub fn push(&mut self, widget: impl Widget + 'static) {
        self.children.push(Box::new(widget));
    }

    pub fn on_submit(mut self, handler: impl FnMut(FormSubmitEvent) + 'static) -> Self {
        self.on_submit = Some(Box::new(handler));
        self
    }

    pub fn props(&self) -> &FormProps {
        &self.props
    }

    /// Current controls of the form, as a submit event would carry them
    pub fn control(&self) -> GroupControl {
        let name = self.props.name.clone().unwrap_or_default();
        let children = self.children.iter().filter_map(|c| c.control()).collect();
        GroupControl::new(name).with_children(children)
    }

    /// Handle a submit event
    ///
    /// Default navigation is always prevented. The data is serialized even
    /// without a handler, and dropped in that case.
    pub fn submit(&mut self, event: &mut SubmitEvent) -> Result<()> {
        event.prevent_default();
        let data = self.serializer.serialize_set(&event.target)?;

        match self.on_submit.as_mut() {
            Some(handler) => handler(FormSubmitEvent {
                target: SubmitTarget {
                    form: event.target.clone(),
                    data,
                },
                default_prevented: event.default_prevented(),
            }),
            None => tracing::debug!(
                "Form submitted without a handler, {} fields dropped",
                data.len()
            ),
        }
        Ok(())
    }

    /// Submit the form's current state
    pub fn submit_current(&mut self) -> Result<()> {
        let mut event = SubmitEvent::new(self.control());
        self.submit(&mut event)
    }

    pub fn render(&self) -> Markup {
        let props = &self.props;
        html! {
            form
                autocomplete=[props.autocomplete.map(|a| a.as_str())]
                name=[props.name.as_deref()]
                action=[props.action.as_deref()]
                enctype=[props.enctype.map(|e| e.as_str())]
                method=[props.method.map(|m| m.as_str())]
                novalidate[props.novalidate]
                target=[props.target.map(|t| t.as_str())]
                style=[props.style.as_deref()]
                class=[props.class.as_deref()]
                id=[props.id.as_deref()] {
                @for child in &self.children {
                    (child.render())
                }
            }
        }
    }
}
