// File: src/fields/list_field.rs
// Purpose: Dynamically resizable list of typed slots

use super::typed_field::{FieldType, RepeatedGroup, RepeatedGroupFactory, TypedField};
use super::{class_attr, non_empty, FieldProps, Widget};
use crate::control::{CompositeKind, Control, GroupControl};
use crate::error::Result;
use crate::serialize::FormSerializer;
use crate::value::Value;
use maud::{html, Markup};

/// A list field never has fewer slots than this
pub const MIN_SLOTS: usize = 2;

/// Repeated group of [`TypedField`] slots named `<name>_<index>`
///
/// Slots are only ever appended or removed at the end, so a slot keeps
/// its index (and therefore its name) for as long as it exists.
#[derive(Debug)]
pub struct ListField {
    props: FieldProps,
    slot_type: FieldType,
    slots: Vec<TypedField>,
}

impl ListField {
    pub fn new(props: FieldProps, slot_type: FieldType) -> Self {
        let mut list = Self {
            props,
            slot_type,
            slots: Vec::with_capacity(MIN_SLOTS),
        };
        while list.slots.len() < MIN_SLOTS {
            list.push_slot();
        }
        list
    }

    pub fn name(&self) -> &str {
        &self.props.name
    }

    pub fn slots(&self) -> &[TypedField] {
        &self.slots
    }

    /// Whether the remove button is shown
    pub fn can_shrink(&self) -> bool {
        self.slots.len() > MIN_SLOTS
    }

    /// Type user input into a slot; `false` if the slot does not take text
    pub fn set_slot_value(&mut self, index: usize, value: impl Into<String>) -> bool {
        self.slots
            .get_mut(index)
            .map(|slot| slot.set_value(value))
            .unwrap_or(false)
    }

    fn push_slot(&mut self) {
        let index = self.slots.len();
        let props = FieldProps {
            name: slot_name(&self.props.name, index),
            default_value: self.props.default_value.clone(),
            required: self.props.required,
            placeholder: self.props.placeholder.clone(),
            ..FieldProps::default()
        };
        self.slots
            .push(TypedField::new(props, self.slot_type.clone(), &ListFieldFactory));
    }
}

fn slot_name(name: &str, index: usize) -> String {
    format!("{}_{}", name, index)
}

impl RepeatedGroup for ListField {
    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn grow(&mut self) {
        self.push_slot();
        tracing::debug!("List '{}' grew to {} slots", self.props.name, self.slots.len());
    }

    fn shrink(&mut self) -> bool {
        if !self.can_shrink() {
            return false;
        }
        self.slots.pop();
        tracing::debug!("List '{}' shrank to {} slots", self.props.name, self.slots.len());
        true
    }

    fn slot_mut(&mut self, index: usize) -> Option<&mut TypedField> {
        self.slots.get_mut(index)
    }
}

impl Widget for ListField {
    fn render(&self) -> Markup {
        let mut classes: Vec<&str> = CompositeKind::List.marker_classes().to_vec();
        classes.extend(self.props.class.as_deref());
        html! {
            fieldset
                name=[non_empty(&self.props.name)]
                style=[self.props.style.as_deref()]
                class=[class_attr(&classes)]
                id=[self.props.id.as_deref()]
                hidden[self.props.hidden]
                role=[self.props.role.as_deref()] {
                @for slot in &self.slots {
                    (slot.render())
                }
                input type="button" value="+";
                @if self.can_shrink() {
                    input type="button" value="-";
                }
            }
        }
    }

    fn control(&self) -> Option<Control> {
        let mut children: Vec<Control> = self.slots.iter().filter_map(|s| s.control()).collect();
        children.push(Control::button("", "+"));
        if self.can_shrink() {
            children.push(Control::button("", "-"));
        }
        let mut group = GroupControl::new(&self.props.name)
            .with_composite(CompositeKind::List)
            .with_children(children);
        group.classes = self.props.class_names();
        Some(group.into())
    }
}

/// Builds [`ListField`]s for typed fields with list types
#[derive(Debug, Clone, Copy, Default)]
pub struct ListFieldFactory;

impl RepeatedGroupFactory for ListFieldFactory {
    fn build(&self, props: FieldProps, slot_type: FieldType) -> Box<dyn RepeatedGroup> {
        Box::new(ListField::new(props, slot_type))
    }
}

/// Serialize a list group to its slot values, in slot order
pub fn serialize(serializer: &FormSerializer, group: &GroupControl) -> Result<Value> {
    let values = serializer.serialize_set(group)?.into_values().collect();
    Ok(Value::Array(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::serialize_set;
    use pretty_assertions::assert_eq;

    fn list_values(list: &ListField) -> Value {
        let group = list.control().unwrap();
        let group = group.as_group().unwrap();
        serialize(&FormSerializer::default(), group).unwrap()
    }

    fn strings(values: &[&str]) -> Value {
        Value::Array(values.iter().map(|v| Value::from(*v)).collect())
    }

    #[test]
    fn test_starts_with_two_slots() {
        let list = ListField::new(FieldProps::new("tags"), FieldType::Text);
        assert_eq!(list.slot_count(), MIN_SLOTS);
        let names: Vec<_> = list
            .slots()
            .iter()
            .map(|s| s.native().unwrap().name.clone())
            .collect();
        assert_eq!(names, vec!["tags_0", "tags_1"]);
    }

    #[test]
    fn test_shrink_at_floor_is_noop() {
        let mut list = ListField::new(FieldProps::new("tags"), FieldType::Text);
        assert!(!list.shrink());
        assert_eq!(list.slot_count(), 2);

        list.grow();
        assert_eq!(list.slot_count(), 3);
        assert!(list.shrink());
        assert_eq!(list.slot_count(), 2);
        assert!(!list.shrink());
    }

    #[test]
    fn test_serialize_in_slot_order() {
        let mut list = ListField::new(FieldProps::new("nums"), FieldType::Text);
        list.grow();
        for (i, v) in ["1", "2", "3"].iter().enumerate() {
            assert!(list.set_slot_value(i, *v));
        }
        assert_eq!(list_values(&list), strings(&["1", "2", "3"]));
    }

    #[test]
    fn test_empty_slots_serialize_as_empty_strings() {
        let list = ListField::new(FieldProps::new("nums"), FieldType::Text);
        assert_eq!(list_values(&list), strings(&["", ""]));
    }

    #[test]
    fn test_remove_button_only_above_floor() {
        let mut list = ListField::new(FieldProps::new("tags"), FieldType::Text);
        let html = list.render().into_string();
        assert!(html.contains(r#"<input type="button" value="+">"#));
        assert!(!html.contains(r#"value="-""#));

        list.grow();
        let html = list.render().into_string();
        assert!(html.contains(r#"<input type="button" value="-">"#));
        assert!(html.contains(r#"name="tags_2""#));
    }

    #[test]
    fn test_render_markers_and_class() {
        let list = ListField::new(FieldProps::new("tags").with_class("wide"), FieldType::Text);
        let html = list.render().into_string();
        assert!(html.starts_with(
            r#"<fieldset name="tags" class="CustomFormField ListFieldClassLabel wide">"#
        ));
    }

    #[test]
    fn test_render_passes_props_through() {
        let props = FieldProps::new("tags")
            .with_id("tag-list")
            .with_role("list")
            .with_placeholder("tag");
        let list = ListField::new(props, FieldType::Text);
        let html = list.render().into_string();
        assert!(html.contains(r#"id="tag-list""#));
        assert!(html.contains(r#"role="list""#));
        // Every slot inherits the placeholder
        assert_eq!(html.matches(r#"placeholder="tag""#).count(), 2);
    }

    #[test]
    fn test_list_inside_form_is_array() {
        let mut list = ListField::new(FieldProps::new("tags"), FieldType::Text);
        list.set_slot_value(0, "a");
        list.set_slot_value(1, "b");
        let form = GroupControl::new("form").with_children(vec![
            Control::text("title", "t"),
            list.control().unwrap(),
        ]);
        let data = serialize_set(&form);
        assert_eq!(data.len(), 2);
        assert_eq!(data["tags"].as_array().map(<[Value]>::len), Some(2));
        assert_eq!(data["tags"], strings(&["a", "b"]));
        assert_eq!(data["title"], Value::from("t"));
    }

    #[test]
    fn test_nested_list_slots() {
        let mut outer = ListField::new(FieldProps::new("matrix"), FieldType::ListInt);
        let inner = outer.slot_mut(0).unwrap().list_mut().unwrap();
        inner.slot_mut(0).unwrap().set_value("7");

        let expected = Value::Array(vec![strings(&["7", ""]), strings(&["", ""])]);
        assert_eq!(list_values(&outer), expected);
    }
}
