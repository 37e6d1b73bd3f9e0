/// End-to-end form submission tests
///
/// Forms are built from native controls and widgets, submitted, and the
/// typed data handed to the submit handler is checked.

use pretty_assertions::assert_eq;
use rhtmx_widgets::{
    typed_field, ColorField, Control, FieldProps, FieldType, Form, FormData, FormProps,
    FormSubmitEvent, GroupControl, RepeatedGroup, SelectOption, SubmitEvent, Value, WidgetsConfig,
};
use std::cell::RefCell;
use std::rc::Rc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Submit a form and return the data its handler received
fn submit(form: Form) -> FormData {
    let received: Rc<RefCell<Option<FormSubmitEvent>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&received);
    let mut form = form.on_submit(move |event| *sink.borrow_mut() = Some(event));
    form.submit_current().expect("lenient submit never fails");
    let event = received.borrow_mut().take().expect("handler was called");
    event.target.data
}

fn strings(values: &[&str]) -> Value {
    Value::Array(values.iter().map(|v| Value::from(*v)).collect())
}

#[test]
fn test_native_controls() {
    init_tracing();
    let form = Form::new(FormProps::default())
        .child(Control::checkbox("a", true))
        .child(Control::text("b", "x"))
        .child(Control::button("c", "Send"));

    let data = submit(form);
    let expected: FormData = [
        ("a".to_string(), Value::Bool(true)),
        ("b".to_string(), Value::from("x")),
    ]
    .into_iter()
    .collect();
    assert_eq!(data, expected);
}

#[test]
fn test_nested_fieldset_is_not_duplicated() {
    init_tracing();
    let form = Form::new(FormProps::default())
        .child(Control::text("name", "Ada"))
        .child(Control::group(
            "address",
            vec![Control::text("street", "Main"), Control::number("no", "12")],
        ));

    let data = submit(form);
    assert_eq!(data.len(), 2);
    assert!(!data.contains_key("street"));
    assert!(!data.contains_key("no"));

    let address = data["address"].as_object().unwrap();
    assert_eq!(address["street"], Value::from("Main"));
    assert_eq!(address["no"], Value::Number(12.0));
}

#[test]
fn test_deeply_nested_groups() {
    let leaf = Control::group("c", vec![Control::text("v", "deep")]);
    let tree = Control::group("a", vec![Control::group("b", vec![leaf])]);
    let form = Form::new(FormProps::default()).child(tree);

    let data = submit(form);
    let value = data["a"].as_object().unwrap()["b"].as_object().unwrap()["c"]
        .as_object()
        .unwrap()["v"]
        .clone();
    assert_eq!(value, Value::from("deep"));
}

#[test]
fn test_typed_list_field_with_empty_slots() {
    let field = typed_field(FieldProps::new("scores"), FieldType::ListInt);
    assert!(field.list().is_some());

    let data = submit(Form::new(FormProps::default()).child(field));
    assert_eq!(data["scores"], strings(&["", ""]));
}

#[test]
fn test_list_field_after_growing() {
    let mut field = typed_field(FieldProps::new("tags"), "list[str]".parse().unwrap());
    let list = field.list_mut().unwrap();
    list.grow();
    for (i, v) in ["1", "2", "3"].iter().enumerate() {
        list.slot_mut(i).unwrap().set_value(*v);
    }

    let data = submit(Form::new(FormProps::default()).child(field));
    assert_eq!(data["tags"], strings(&["1", "2", "3"]));
}

#[test]
fn test_color_field_in_form() {
    let mut color = ColorField::new(FieldProps::new("accent"));
    color.on_color_change("#ff0000");
    color.on_alpha_change(50.0);

    let data = submit(Form::new(FormProps::default()).child(color));
    assert_eq!(data["accent"], Value::from("rgba(255, 0, 0, 0.5)"));
    assert!(!data.contains_key("accent_color"));
}

#[test]
fn test_mixed_form() {
    let mut age = typed_field(FieldProps::new("age"), FieldType::Int);
    age.set_value("30");
    let mut ratio = typed_field(FieldProps::new("ratio"), FieldType::Float);
    ratio.set_value("0.125");
    let size = typed_field(
        FieldProps::new("size").with_default("m"),
        FieldType::choice(["s", "m", "l"]),
    );
    let unknown = typed_field(FieldProps::new("blob"), "blob".parse().unwrap());

    let form = Form::new(FormProps::default())
        .child(age)
        .child(ratio)
        .child(size)
        .child(unknown)
        .child(Control::select_multiple(
            "langs",
            vec![SelectOption::new("x").selected(true), SelectOption::new("y")],
        ));

    let data = submit(form);
    assert_eq!(data["age"], Value::Number(30.0));
    assert_eq!(data["ratio"], Value::Number(0.125));
    assert_eq!(data["size"], Value::from("m"));
    assert_eq!(data["langs"], strings(&["x"]));
    assert!(!data.contains_key("blob"));
}

#[test]
fn test_strict_config_rejects_unknown_widgets() {
    let config = WidgetsConfig::from_toml("[serialize]\nstrict_markers = true").unwrap();
    let mut unknown = GroupControl::new("rating");
    unknown.classes = vec!["CustomFormField".to_string(), "StarFieldClassLabel".to_string()];
    unknown.adopt_class_markers();

    let mut form = Form::with_config(FormProps::default(), &config);
    let mut event = SubmitEvent::new(GroupControl::new("form").with_children(vec![unknown.into()]));
    assert!(form.submit(&mut event).is_err());
    assert!(event.default_prevented());
}

#[test]
fn test_rendered_form_contains_widgets() {
    let form = Form::new(FormProps::default())
        .child(typed_field(FieldProps::new("tags"), FieldType::ListStr))
        .child(ColorField::new(FieldProps::new("bg")));
    let html = form.render().into_string();
    assert!(html.starts_with("<form>"));
    assert!(html.contains(r#"name="tags_0""#));
    assert!(html.contains(r#"name="tags_1""#));
    assert!(html.contains(r#"name="bg_color""#));
    assert_eq!(form.control().children.len(), 2);
    // Widgets render in the order they were added
    assert!(html.find("tags_0").unwrap() < html.find("bg_color").unwrap());
}
