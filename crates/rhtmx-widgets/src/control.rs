// File: src/control.rs
// Purpose: Control tree model (native leaf controls and group controls)

use crate::value::FileRef;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Class name shared by every composite widget
pub const CUSTOM_FIELD_CLASS: &str = "CustomFormField";
/// Class name identifying a list field group
pub const LIST_FIELD_CLASS: &str = "ListFieldClassLabel";
/// Class name identifying a color field group
pub const COLOR_FIELD_CLASS: &str = "ColorFieldClassLabel";

/// Native `type` of a form control
///
/// Types the serializer has no special case for fall through to their
/// raw string value, so unknown type strings deserialize to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlType {
    Button,
    Checkbox,
    Color,
    Date,
    DatetimeLocal,
    Email,
    File,
    Hidden,
    Image,
    Month,
    Number,
    Password,
    Radio,
    Range,
    Reset,
    Search,
    Submit,
    Tel,
    Text,
    Time,
    Url,
    Week,
    SelectOne,
    SelectMultiple,
    Textarea,
    Fieldset,
    Output,
    /// Element without a `type` property (e.g. `<object>`)
    #[default]
    Untyped,
    #[serde(other)]
    Other,
}

impl ControlType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlType::Button => "button",
            ControlType::Checkbox => "checkbox",
            ControlType::Color => "color",
            ControlType::Date => "date",
            ControlType::DatetimeLocal => "datetime-local",
            ControlType::Email => "email",
            ControlType::File => "file",
            ControlType::Hidden => "hidden",
            ControlType::Image => "image",
            ControlType::Month => "month",
            ControlType::Number => "number",
            ControlType::Password => "password",
            ControlType::Radio => "radio",
            ControlType::Range => "range",
            ControlType::Reset => "reset",
            ControlType::Search => "search",
            ControlType::Submit => "submit",
            ControlType::Tel => "tel",
            ControlType::Text => "text",
            ControlType::Time => "time",
            ControlType::Url => "url",
            ControlType::Week => "week",
            ControlType::SelectOne => "select-one",
            ControlType::SelectMultiple => "select-multiple",
            ControlType::Textarea => "textarea",
            ControlType::Fieldset => "fieldset",
            ControlType::Output => "output",
            ControlType::Untyped => "untyped",
            ControlType::Other => "other",
        }
    }

    /// Whether this type is rendered as an `<input>` element
    pub fn is_input(&self) -> bool {
        !matches!(
            self,
            ControlType::SelectOne
                | ControlType::SelectMultiple
                | ControlType::Textarea
                | ControlType::Fieldset
                | ControlType::Output
        )
    }
}

impl fmt::Display for ControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ty = match s.to_ascii_lowercase().as_str() {
            "button" => ControlType::Button,
            "checkbox" => ControlType::Checkbox,
            "color" => ControlType::Color,
            "date" => ControlType::Date,
            "datetime-local" => ControlType::DatetimeLocal,
            "email" => ControlType::Email,
            "file" => ControlType::File,
            "hidden" => ControlType::Hidden,
            "image" => ControlType::Image,
            "month" => ControlType::Month,
            "number" => ControlType::Number,
            "password" => ControlType::Password,
            "radio" => ControlType::Radio,
            "range" => ControlType::Range,
            "reset" => ControlType::Reset,
            "search" => ControlType::Search,
            "submit" => ControlType::Submit,
            "tel" => ControlType::Tel,
            "text" => ControlType::Text,
            "time" => ControlType::Time,
            "url" => ControlType::Url,
            "week" => ControlType::Week,
            "select-one" => ControlType::SelectOne,
            "select-multiple" => ControlType::SelectMultiple,
            "textarea" => ControlType::Textarea,
            "fieldset" => ControlType::Fieldset,
            "output" => ControlType::Output,
            "" | "untyped" => ControlType::Untyped,
            _ => ControlType::Other,
        };
        Ok(ty)
    }
}

/// Which composite widget owns a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositeKind {
    /// Plain native group
    #[default]
    None,
    List,
    Color,
    /// Marked as a custom field, but by a widget this library does not know
    Unrecognized,
}

impl CompositeKind {
    /// Resolve the kind from an HTML class list
    ///
    /// The list label is checked before the color label, so a group carrying
    /// both is treated as a list.
    pub fn from_classes<S: AsRef<str>>(classes: &[S]) -> Self {
        let has = |name: &str| classes.iter().any(|c| c.as_ref() == name);
        if !has(CUSTOM_FIELD_CLASS) {
            CompositeKind::None
        } else if has(LIST_FIELD_CLASS) {
            CompositeKind::List
        } else if has(COLOR_FIELD_CLASS) {
            CompositeKind::Color
        } else {
            CompositeKind::Unrecognized
        }
    }

    /// Marker classes rendered on the group element
    pub fn marker_classes(&self) -> &'static [&'static str] {
        match self {
            CompositeKind::None => &[],
            CompositeKind::List => &[CUSTOM_FIELD_CLASS, LIST_FIELD_CLASS],
            CompositeKind::Color => &[CUSTOM_FIELD_CLASS, COLOR_FIELD_CLASS],
            CompositeKind::Unrecognized => &[CUSTOM_FIELD_CLASS],
        }
    }

    pub fn is_composite(&self) -> bool {
        !matches!(self, CompositeKind::None)
    }
}

/// An `<option>` of a select control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Text shown for the option (the value when no label is set)
    pub fn text(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.value)
    }
}

/// A native leaf control: input, select, textarea, output or button
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldControl {
    #[serde(rename = "type", default)]
    pub control_type: ControlType,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub files: Vec<FileRef>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub step: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
}

impl FieldControl {
    pub fn new(control_type: ControlType, name: impl Into<String>) -> Self {
        Self {
            control_type,
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_files(mut self, files: Vec<FileRef>) -> Self {
        self.files = files;
        self
    }

    /// Current value as the browser reports it
    ///
    /// For single selects this is the first selected option, or the first
    /// option when none is explicitly selected.
    pub fn current_value(&self) -> &str {
        match self.control_type {
            ControlType::SelectOne => self
                .options
                .iter()
                .find(|opt| opt.selected)
                .or_else(|| self.options.first())
                .map(|opt| opt.value.as_str())
                .unwrap_or(""),
            _ => &self.value,
        }
    }

    /// Set the value the way user input would
    ///
    /// Selects pick the option with a matching value instead.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        match self.control_type {
            ControlType::SelectOne => {
                for opt in &mut self.options {
                    opt.selected = opt.value == value;
                }
            }
            ControlType::SelectMultiple => {
                for opt in &mut self.options {
                    if opt.value == value {
                        opt.selected = true;
                    }
                }
            }
            _ => self.value = value,
        }
    }
}

/// A grouping control (`<fieldset>` or a form root)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupControl {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub composite: CompositeKind,
    /// Class names in addition to the composite markers
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub children: Vec<Control>,
}

impl GroupControl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_composite(mut self, composite: CompositeKind) -> Self {
        self.composite = composite;
        self
    }

    pub fn with_children(mut self, children: Vec<Control>) -> Self {
        self.children = children;
        self
    }

    pub fn push(&mut self, control: impl Into<Control>) {
        self.children.push(control.into());
    }

    /// All descendant controls, flattened in document order
    ///
    /// Like a native `elements` collection, nested groups appear themselves
    /// and are followed by their own descendants.
    pub fn elements(&self) -> Vec<&Control> {
        let mut out = Vec::new();
        collect_elements(&self.children, &mut out);
        out
    }

    /// First descendant with the given name
    pub fn named_element(&self, name: &str) -> Option<&Control> {
        self.elements().into_iter().find(|el| el.name() == name)
    }

    /// Every class rendered on the group element
    pub fn class_list(&self) -> Vec<&str> {
        self.composite
            .marker_classes()
            .iter()
            .copied()
            .chain(self.classes.iter().map(String::as_str))
            .collect()
    }

    /// Turn marker classes into composite kinds, recursively
    ///
    /// Used for trees that arrive from the browser with only a class list.
    pub fn adopt_class_markers(&mut self) {
        if !self.composite.is_composite() {
            self.composite = CompositeKind::from_classes(&self.classes);
        }
        let markers = self.composite.marker_classes();
        self.classes.retain(|c| !markers.contains(&c.as_str()));
        for child in &mut self.children {
            if let Control::Group(group) = child {
                group.adopt_class_markers();
            }
        }
    }
}

fn collect_elements<'a>(children: &'a [Control], out: &mut Vec<&'a Control>) {
    for child in children {
        out.push(child);
        if let Control::Group(group) = child {
            collect_elements(&group.children, out);
        }
    }
}

/// A node in the control tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Control {
    Field(FieldControl),
    Group(GroupControl),
}

impl Control {
    pub fn name(&self) -> &str {
        match self {
            Control::Field(field) => &field.name,
            Control::Group(group) => &group.name,
        }
    }

    pub fn control_type(&self) -> ControlType {
        match self {
            Control::Field(field) => field.control_type,
            Control::Group(_) => ControlType::Fieldset,
        }
    }

    pub fn as_group(&self) -> Option<&GroupControl> {
        match self {
            Control::Group(group) => Some(group),
            Control::Field(_) => None,
        }
    }

    pub fn as_field(&self) -> Option<&FieldControl> {
        match self {
            Control::Field(field) => Some(field),
            Control::Group(_) => None,
        }
    }

    // Shorthand constructors

    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        FieldControl::new(ControlType::Text, name).with_value(value).into()
    }

    pub fn number(name: impl Into<String>, value: impl Into<String>) -> Self {
        FieldControl::new(ControlType::Number, name).with_value(value).into()
    }

    pub fn checkbox(name: impl Into<String>, checked: bool) -> Self {
        FieldControl::new(ControlType::Checkbox, name).with_checked(checked).into()
    }

    pub fn radio(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
        FieldControl::new(ControlType::Radio, name)
            .with_value(value)
            .with_checked(checked)
            .into()
    }

    pub fn button(name: impl Into<String>, label: impl Into<String>) -> Self {
        FieldControl::new(ControlType::Button, name).with_value(label).into()
    }

    pub fn select(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        FieldControl::new(ControlType::SelectOne, name).with_options(options).into()
    }

    pub fn select_multiple(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        FieldControl::new(ControlType::SelectMultiple, name)
            .with_options(options)
            .into()
    }

    pub fn group(name: impl Into<String>, children: Vec<Control>) -> Self {
        GroupControl::new(name).with_children(children).into()
    }
}

impl From<FieldControl> for Control {
    fn from(field: FieldControl) -> Self {
        Control::Field(field)
    }
}

impl From<GroupControl> for Control {
    fn from(group: GroupControl) -> Self {
        Control::Group(group)
    }
}
