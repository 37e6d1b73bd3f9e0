// RHTMX Widgets - typed form fields for RHTMX
// Forms whose fields carry semantic types and submit as typed value trees

pub mod color;
pub mod config;
pub mod control;
pub mod error;
pub mod fields;
pub mod form;
pub mod serialize;
pub mod value;

// Re-export core types
pub use color::{Color, ColorSyntax};
pub use config::{SerializeOptions, WidgetsConfig};
pub use control::{CompositeKind, Control, ControlType, FieldControl, GroupControl, SelectOption};
pub use error::WidgetError;
pub use value::{FileRef, FormData, Value};

// Re-export widgets and the form
pub use fields::{
    render_control, typed_field, ColorChangeEvent, ColorField, FieldProps, FieldType, ListField,
    RepeatedGroup, TypedField, Widget,
};
pub use form::{Form, FormProps, FormSubmitEvent, SubmitEvent};
pub use serialize::{serialize_set, FormSerializer};

// Re-export Maud for hosts composing markup
pub use maud::{Markup, PreEscaped};
