// File: src/fields/typed_field.rs
// Purpose: Pick a control for a logical field type

use super::{render_field, FieldProps, Widget};
use crate::control::{Control, ControlType, FieldControl, SelectOption};
use crate::value::format_number;
use maud::{html, Markup};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Step used by float inputs
pub const FLOAT_STEP: &str = "0.001";

/// Declared semantic type of a field
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawFieldType")]
pub enum FieldType {
    Int,
    Number,
    Float,
    Str,
    Text,
    ListInt,
    ListFloat,
    ListStr,
    /// One of a fixed set of literal values
    Choice(Vec<String>),
    /// A tag no control is known for; renders nothing
    Unrecognized(String),
}

impl FieldType {
    pub fn choice<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldType::Choice(values.into_iter().map(Into::into).collect())
    }

    pub fn is_list(&self) -> bool {
        matches!(self, FieldType::ListInt | FieldType::ListFloat | FieldType::ListStr)
    }
}

impl FromStr for FieldType {
    type Err = std::convert::Infallible;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let ty = match tag {
            "int" => FieldType::Int,
            "number" => FieldType::Number,
            "float" => FieldType::Float,
            "str" => FieldType::Str,
            "text" => FieldType::Text,
            "list[int]" => FieldType::ListInt,
            "list[float]" => FieldType::ListFloat,
            "list[str]" => FieldType::ListStr,
            other => FieldType::Unrecognized(other.to_string()),
        };
        Ok(ty)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Int => f.write_str("int"),
            FieldType::Number => f.write_str("number"),
            FieldType::Float => f.write_str("float"),
            FieldType::Str => f.write_str("str"),
            FieldType::Text => f.write_str("text"),
            FieldType::ListInt => f.write_str("list[int]"),
            FieldType::ListFloat => f.write_str("list[float]"),
            FieldType::ListStr => f.write_str("list[str]"),
            FieldType::Choice(values) => write!(f, "[{}]", values.join(", ")),
            FieldType::Unrecognized(tag) => f.write_str(tag),
        }
    }
}

/// Wire shape: a tag string or an array of literals
#[derive(Deserialize)]
#[serde(untagged)]
enum RawFieldType {
    Tag(String),
    Literals(Vec<Literal>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Literal {
    Str(String),
    Num(f64),
}

impl From<RawFieldType> for FieldType {
    fn from(raw: RawFieldType) -> Self {
        match raw {
            RawFieldType::Tag(tag) => tag.parse().unwrap_or(FieldType::Unrecognized(tag)),
            RawFieldType::Literals(literals) => FieldType::Choice(
                literals
                    .into_iter()
                    .map(|lit| match lit {
                        Literal::Str(s) => s,
                        Literal::Num(n) => format_number(n),
                    })
                    .collect(),
            ),
        }
    }
}

/// A dynamically sized group of typed slots
pub trait RepeatedGroup: Widget {
    fn slot_count(&self) -> usize;

    /// Append a slot at the end
    fn grow(&mut self);

    /// Remove the last slot; `false` when already at the minimum
    fn shrink(&mut self) -> bool;

    fn slot_mut(&mut self, index: usize) -> Option<&mut TypedField>;
}

/// Builds the repeated group used for list types
pub trait RepeatedGroupFactory {
    fn build(&self, props: FieldProps, slot_type: FieldType) -> Box<dyn RepeatedGroup>;
}

#[derive(Debug)]
enum Rendered {
    Native(FieldControl),
    Repeated(Box<dyn RepeatedGroup>),
    Empty,
}

/// A field rendered according to its [`FieldType`]
///
/// The control is chosen once, when the field is built.
#[derive(Debug)]
pub struct TypedField {
    field_type: FieldType,
    rendered: Rendered,
}

impl TypedField {
    pub fn new(props: FieldProps, field_type: FieldType, lists: &dyn RepeatedGroupFactory) -> Self {
        let rendered = match &field_type {
            FieldType::Int | FieldType::Number => {
                Rendered::Native(native_input(&props, ControlType::Number))
            }
            FieldType::Float => {
                let mut input = native_input(&props, ControlType::Number);
                input.step = Some(FLOAT_STEP.to_string());
                Rendered::Native(input)
            }
            FieldType::Str | FieldType::Text => {
                Rendered::Native(native_input(&props, ControlType::Text))
            }
            // Slots are plain text inputs whatever the element type
            FieldType::ListInt | FieldType::ListFloat | FieldType::ListStr => {
                Rendered::Repeated(lists.build(props, FieldType::Text))
            }
            FieldType::Choice(values) => {
                let selected = props.default_value.as_ref();
                let options = values
                    .iter()
                    .map(|v| SelectOption::new(v.clone()).selected(selected == Some(v)))
                    .collect();
                Rendered::Native(
                    FieldControl::new(ControlType::SelectOne, &props.name).with_options(options),
                )
            }
            FieldType::Unrecognized(tag) => {
                tracing::debug!("No control for field type '{}' ('{}')", tag, props.name);
                Rendered::Empty
            }
        };

        Self { field_type, rendered }
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    /// Whether this field renders nothing
    pub fn is_empty(&self) -> bool {
        matches!(self.rendered, Rendered::Empty)
    }

    pub fn native(&self) -> Option<&FieldControl> {
        match &self.rendered {
            Rendered::Native(field) => Some(field),
            _ => None,
        }
    }

    pub fn list(&self) -> Option<&(dyn RepeatedGroup + 'static)> {
        match &self.rendered {
            Rendered::Repeated(list) => Some(list.as_ref()),
            _ => None,
        }
    }

    pub fn list_mut(&mut self) -> Option<&mut (dyn RepeatedGroup + 'static)> {
        match &mut self.rendered {
            Rendered::Repeated(list) => Some(list.as_mut()),
            _ => None,
        }
    }

    /// Simulate user input on a native control; `false` for list or empty fields
    pub fn set_value(&mut self, value: impl Into<String>) -> bool {
        match &mut self.rendered {
            Rendered::Native(field) => {
                field.set_value(value);
                true
            }
            _ => false,
        }
    }
}

impl Widget for TypedField {
    fn render(&self) -> Markup {
        match &self.rendered {
            Rendered::Native(field) => render_field(field),
            Rendered::Repeated(list) => list.render(),
            Rendered::Empty => html! {},
        }
    }

    fn control(&self) -> Option<Control> {
        match &self.rendered {
            Rendered::Native(field) => Some(Control::Field(field.clone())),
            Rendered::Repeated(list) => list.control(),
            Rendered::Empty => None,
        }
    }
}

fn native_input(props: &FieldProps, control_type: ControlType) -> FieldControl {
    let mut input = FieldControl::new(control_type, &props.name);
    input.value = props.default_value.clone().unwrap_or_default();
    input.required = props.required;
    input.placeholder = props.placeholder.clone();
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Factory that must never be asked for a list
    struct NoLists;

    impl RepeatedGroupFactory for NoLists {
        fn build(&self, _props: FieldProps, _slot_type: FieldType) -> Box<dyn RepeatedGroup> {
            panic!("scalar types must not build a list");
        }
    }

    #[rstest]
    #[case("int", ControlType::Number, None)]
    #[case("number", ControlType::Number, None)]
    #[case("float", ControlType::Number, Some(FLOAT_STEP))]
    #[case("str", ControlType::Text, None)]
    #[case("text", ControlType::Text, None)]
    fn test_scalar_dispatch(
        #[case] tag: &str,
        #[case] expected: ControlType,
        #[case] step: Option<&str>,
    ) {
        let field = TypedField::new(FieldProps::new("x"), tag.parse().unwrap(), &NoLists);
        let native = field.native().unwrap();
        assert_eq!(native.control_type, expected);
        assert_eq!(native.step.as_deref(), step);
        assert_eq!(native.name, "x");
    }

    #[test]
    fn test_choice_renders_select() {
        let props = FieldProps::new("size").with_default("m");
        let field = TypedField::new(props, FieldType::choice(["s", "m", "l"]), &NoLists);
        let native = field.native().unwrap();
        assert_eq!(native.control_type, ControlType::SelectOne);
        assert_eq!(native.current_value(), "m");

        let html = field.render().into_string();
        assert!(html.contains(r#"<option value="m" selected>m</option>"#));
    }

    #[test]
    fn test_unrecognized_renders_nothing() {
        let field = TypedField::new(FieldProps::new("x"), "dict[str]".parse().unwrap(), &NoLists);
        assert_eq!(field.field_type(), &FieldType::Unrecognized("dict[str]".to_string()));
        assert!(field.is_empty());
        assert!(field.control().is_none());
        assert_eq!(field.render().into_string(), "");
    }

    #[test]
    fn test_default_value_and_required() {
        let props = FieldProps::new("age").with_default("7").required();
        let field = TypedField::new(props, FieldType::Int, &NoLists);
        let html = field.render().into_string();
        assert_eq!(html, r#"<input type="number" name="age" value="7" required>"#);
    }

    #[test]
    fn test_field_type_deserialize() {
        let tag: FieldType = serde_json::from_str(r#""list[float]""#).unwrap();
        assert_eq!(tag, FieldType::ListFloat);
        let choice: FieldType = serde_json::from_str(r#"["a", 2, 2.5]"#).unwrap();
        assert_eq!(choice, FieldType::choice(["a", "2", "2.5"]));
        let unknown: FieldType = serde_json::from_str(r#""blob""#).unwrap();
        assert_eq!(unknown, FieldType::Unrecognized("blob".to_string()));
    }

    #[test]
    fn test_field_type_display() {
        assert_eq!(FieldType::ListInt.to_string(), "list[int]");
        assert!(FieldType::ListStr.is_list());
        assert!(!FieldType::Str.is_list());
    }
}
