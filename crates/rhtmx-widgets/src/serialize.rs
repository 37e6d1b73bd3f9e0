// File: src/serialize.rs
// Purpose: Turn a control tree into typed form data

use crate::config::SerializeOptions;
use crate::control::{CompositeKind, Control, ControlType, FieldControl, GroupControl};
use crate::error::{Result, WidgetError};
use crate::fields::{color_field, list_field};
use crate::value::{FormData, Value};
use std::collections::HashSet;

/// Walks groups of controls and produces typed values
#[derive(Debug, Clone, Copy, Default)]
pub struct FormSerializer {
    options: SerializeOptions,
}

impl FormSerializer {
    pub fn new(options: SerializeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> SerializeOptions {
        self.options
    }

    /// Serialize the named controls of a group into a mapping
    ///
    /// The group's element list is flat, so controls inside nested groups
    /// are skipped here and picked up when the nested group itself is
    /// serialized. Later controls overwrite earlier ones with the same name.
    pub fn serialize_set(&self, set: &GroupControl) -> Result<FormData> {
        let elements = set.elements();

        // Identity, not equality: two identical controls in different groups
        // must not shadow each other.
        let nested: HashSet<*const Control> = elements
            .iter()
            .filter_map(|el| el.as_group())
            .flat_map(|group| group.elements())
            .map(|el| el as *const Control)
            .collect();

        let mut serialized = FormData::new();
        for element in elements {
            if nested.contains(&(element as *const Control)) || element.name().is_empty() {
                continue;
            }
            let Some(value) = self.serialize_element(element)? else {
                continue;
            };
            if self.options.drop_falsy && !value.is_truthy() {
                continue;
            }
            serialized.insert(element.name().to_string(), value);
        }
        Ok(serialized)
    }

    /// Serialize one control; `None` means the control is left out
    pub fn serialize_element(&self, element: &Control) -> Result<Option<Value>> {
        tracing::trace!("Serializing {} '{}'", element.control_type(), element.name());
        match element {
            Control::Group(group) => self.serialize_group(group),
            Control::Field(field) => Ok(serialize_field(field)),
        }
    }

    fn serialize_group(&self, group: &GroupControl) -> Result<Option<Value>> {
        match group.composite {
            CompositeKind::None => Ok(Some(Value::Object(self.serialize_set(group)?))),
            CompositeKind::List => list_field::serialize(self, group).map(Some),
            CompositeKind::Color => Ok(color_field::serialize(group)),
            CompositeKind::Unrecognized if self.options.strict_markers => {
                Err(WidgetError::UnrecognizedComposite {
                    name: group.name.clone(),
                })
            }
            CompositeKind::Unrecognized => {
                tracing::debug!("Skipping unrecognized custom field '{}'", group.name);
                Ok(None)
            }
        }
    }
}

fn serialize_field(field: &FieldControl) -> Option<Value> {
    match field.control_type {
        ControlType::Checkbox => Some(Value::Bool(field.checked)),
        ControlType::Number | ControlType::Range => {
            // Rust also accepts "NaN" and "inf", which a number input never yields
            field
                .value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Value::Number)
        }
        ControlType::File => field.files.first().cloned().map(Value::File),
        ControlType::Radio => field.checked.then(|| Value::String(field.value.clone())),
        ControlType::SelectMultiple => Some(Value::Array(
            field
                .options
                .iter()
                .filter(|opt| opt.selected)
                .map(|opt| Value::String(opt.value.clone()))
                .collect(),
        )),
        // A field claiming to be a fieldset has no children to serialize
        ControlType::Fieldset => Some(Value::Object(FormData::new())),
        ControlType::Button
        | ControlType::Hidden
        | ControlType::Image
        | ControlType::Reset
        | ControlType::Submit
        | ControlType::Untyped => None,
        _ => Some(Value::String(field.current_value().to_string())),
    }
}

/// Serialize a group with default options
pub fn serialize_set(set: &GroupControl) -> FormData {
    // Lenient mode never errors
    FormSerializer::default().serialize_set(set).unwrap_or_default()
}
