//! RHTMX Widgets WASM
//!
//! WebAssembly bindings for RHTMX typed form widgets.
//! Serializes a snapshot of a submitted form into typed data in the browser,
//! using the same logic as the Rust side.

use rhtmx_widgets::{
    typed_field, Color, FieldProps, FieldType, FormData, FormSerializer, GroupControl,
    SerializeOptions, Widget, WidgetError,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Field description for `renderTypedField`
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub placeholder: Option<String>,
}

/// Serialize a form snapshot into typed data
///
/// # Arguments
/// * `tree` - The form as a control tree; composite widgets may be marked
///   either with `composite` or with their class list
/// * `strict` - Fail on custom fields no widget claims
///
/// # Example (JavaScript)
/// ```javascript
/// const data = serializeForm({
///     name: 'profile',
///     children: [
///         { kind: 'field', type: 'checkbox', name: 'agree', checked: true },
///         { kind: 'group', name: 'tags', classes: ['CustomFormField', 'ListFieldClassLabel'],
///           children: [{ kind: 'field', type: 'text', name: 'tags_0', value: 'a' }] },
///     ],
/// }, false);
/// // { agree: true, tags: ['a'] }
/// ```
#[wasm_bindgen(js_name = serializeForm)]
pub fn serialize_form(tree: JsValue, strict: bool) -> Result<JsValue, JsValue> {
    let group: GroupControl = serde_wasm_bindgen::from_value(tree)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse form: {}", e)))?;

    let data = serialize_tree(group, strict).map_err(|e| {
        let msg = JsValue::from_str(&e.to_string());
        web_sys::console::warn_1(&msg);
        msg
    })?;

    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    data.serialize(&serializer)
        .map_err(|e| JsValue::from_str(&format!("Failed to convert data: {}", e)))
}

/// Normalize any supported color string to `rgba(r, g, b, a)`
#[wasm_bindgen(js_name = parseColor)]
pub fn parse_color(text: &str) -> String {
    Color::parse(text).to_rgba()
}

/// Convert a color string to `#rrggbb` (alpha is dropped)
#[wasm_bindgen(js_name = colorToHex)]
pub fn color_to_hex(text: &str) -> String {
    Color::parse(text).to_hex()
}

/// Render a typed field to HTML
///
/// Unknown types render as an empty string.
#[wasm_bindgen(js_name = renderTypedField)]
pub fn render_typed_field(spec: JsValue) -> Result<String, JsValue> {
    let spec: FieldSpec = serde_wasm_bindgen::from_value(spec)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse field: {}", e)))?;
    Ok(render_spec(spec))
}

/// Serialize a control tree that may carry composite markers only as classes
fn serialize_tree(mut group: GroupControl, strict: bool) -> Result<FormData, WidgetError> {
    group.adopt_class_markers();
    let options = SerializeOptions {
        strict_markers: strict,
        ..SerializeOptions::default()
    };
    FormSerializer::new(options).serialize_set(&group)
}

fn render_spec(spec: FieldSpec) -> String {
    let props = FieldProps {
        name: spec.name,
        default_value: spec.default_value,
        required: spec.required,
        placeholder: spec.placeholder,
        ..FieldProps::default()
    };
    typed_field(props, spec.field_type).render().into_string()
}
