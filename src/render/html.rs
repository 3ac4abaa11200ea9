//! Static-HTML render backend.

use crate::render::{escape_html, value_is_on, RenderBackend, RenderUnit};

/// Backend emitting plain HTML with the field's current value baked in as a
/// literal.
///
/// There is no runtime data binding, so the control-flow primitives degrade:
/// `echo`/`echo_if` render nothing and `wrap_if` passes its markup through
/// (trait defaults). The value trio renders literals from the field's
/// current value.
#[derive(Debug, Default)]
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn value_attr(&self, unit: &RenderUnit<'_>) -> String {
        match unit.field.value.as_deref() {
            Some(v) if !v.is_empty() => format!("value='{}'", escape_html(v)),
            _ => String::new(),
        }
    }

    fn value_content(&self, unit: &RenderUnit<'_>) -> String {
        match unit.field.value.as_deref() {
            Some(v) => escape_html(v),
            None => String::new(),
        }
    }

    fn checked_attr(&self, unit: &RenderUnit<'_>) -> String {
        if value_is_on(unit.field) {
            "checked".to_string()
        } else {
            String::new()
        }
    }
}
