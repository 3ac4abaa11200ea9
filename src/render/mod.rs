//! Pluggable render backends for form-field markup.
//!
//! Every widget is classified into one of nine render primitives and handed
//! to the active [`RenderBackend`] as a [`RenderUnit`]. The nine per-kind
//! render methods are fixed templates built from a handful of low-level
//! syntax primitives plus literal markup; a backend for a new target syntax
//! only overrides the primitives (and, typically, the signature kind) and
//! inherits all per-kind structure:
//! - [`HtmlBackend`]: static HTML, field values baked in as literals
//! - [`PhpBackend`]: PHP source that reads values from a data array at runtime
//! - [`JinjaBackend`]: Jinja-style template syntax

pub mod html;
pub mod jinja;
pub mod php;

pub use html::HtmlBackend;
pub use jinja::JinjaBackend;
pub use php::PhpBackend;

use crate::error::{Error, Result};
use crate::form::Field;
use crate::geometry::Rect;

/// The nine canonical interactive-control kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderKind {
    /// Push button
    Button,
    /// Checkbox
    Checkbox,
    /// File upload
    File,
    /// Password text input
    Password,
    /// Radio group member
    Radio,
    /// Choice list (select element)
    Select,
    /// Signature area
    Signature,
    /// Single-line text input
    Text,
    /// Multi-line text area
    Textarea,
}

impl RenderKind {
    /// Lowercase primitive name, used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderKind::Button => "button",
            RenderKind::Checkbox => "checkbox",
            RenderKind::File => "file",
            RenderKind::Password => "password",
            RenderKind::Radio => "radio",
            RenderKind::Select => "select",
            RenderKind::Signature => "signature",
            RenderKind::Text => "text",
            RenderKind::Textarea => "textarea",
        }
    }
}

/// Absolute positioning derived from a widget rectangle and a zoom factor.
///
/// Lengths are in px; the bottom-left origin matches the PDF coordinate
/// space, so fields are anchored with `bottom` rather than `top`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionStyle {
    /// Distance from the page's left edge
    pub left: f32,
    /// Distance from the page's bottom edge
    pub bottom: f32,
    /// Rendered width
    pub width: f32,
    /// Rendered height
    pub height: f32,
}

impl PositionStyle {
    /// Scale a widget rectangle by the zoom factor.
    pub fn from_rect(rect: &Rect, zoom: f32) -> Self {
        Self {
            left: rect.left() * zoom,
            bottom: rect.bottom() * zoom,
            width: rect.width() * zoom,
            height: rect.height() * zoom,
        }
    }

    /// Render as a CSS declaration list for a style attribute.
    pub fn css(&self) -> String {
        format!(
            "position:absolute;left:{}px;bottom:{}px;width:{}px;height:{}px",
            self.left, self.bottom, self.width, self.height
        )
    }
}

/// Everything a backend needs to render one widget.
///
/// Created by the dispatcher once per widget, consumed immediately, never
/// persisted.
#[derive(Debug)]
pub struct RenderUnit<'a> {
    /// Render primitive selected by the classifier
    pub kind: RenderKind,
    /// The widget's owning field
    pub field: &'a Field,
    /// Generated output name (after rename strategy)
    pub name: String,
    /// Resolved human-readable label
    pub label: String,
    /// Absolute positioning over the widget's original location
    pub style: PositionStyle,
}

/// Escape a literal string for inclusion in HTML text or attribute values.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// True when a field's current value should light up a checked marker.
///
/// PDF checkboxes store `Off` for the unchecked state rather than omitting
/// the value.
pub fn value_is_on(field: &Field) -> bool {
    match field.value.as_deref() {
        Some("") | Some("Off") | Some("false") | None => false,
        Some(_) => true,
    }
}

/// A render backend for one target output syntax.
///
/// The nine `render_*` methods and [`render`](RenderBackend::render) have
/// default bodies shared by all backends; concrete backends override only
/// the syntax primitives (`value_variable`, `html_escape`, `echo`,
/// `echo_if`, `wrap_if`) and the value trio (`value_attr`, `value_content`,
/// `checked_attr`). The defaults below degrade to the "no runtime data
/// binding" case: conditionals vanish and values render empty.
pub trait RenderBackend {
    /// Target-language expression that holds this field's submitted value.
    ///
    /// Empty for backends without runtime data binding.
    fn value_variable(&self, _unit: &RenderUnit<'_>) -> String {
        String::new()
    }

    /// Wrap a target-language expression with the language's HTML-escaping
    /// idiom.
    fn html_escape(&self, expr: &str) -> String {
        expr.to_string()
    }

    /// Syntax that outputs the result of a target-language statement.
    fn echo(&self, _stmt: &str) -> String {
        String::new()
    }

    /// Syntax that outputs `stmt` only when `condition` holds, HTML-escaping
    /// the result unless `escape` is false.
    fn echo_if(&self, _condition: &str, _stmt: &str, _escape: bool) -> String {
        String::new()
    }

    /// Syntax that emits `markup` only when `condition` holds.
    fn wrap_if(&self, _condition: &str, markup: &str) -> String {
        markup.to_string()
    }

    /// Render the value attribute of a field, or code computing it.
    fn value_attr(&self, _unit: &RenderUnit<'_>) -> String {
        String::new()
    }

    /// Render the raw field value as element content (textareas), or code
    /// computing it.
    fn value_content(&self, _unit: &RenderUnit<'_>) -> String {
        String::new()
    }

    /// Render the `checked` marker for checkboxes/radios, or code computing
    /// it.
    fn checked_attr(&self, _unit: &RenderUnit<'_>) -> String {
        String::new()
    }

    /// Attributes common to every rendered element: name, accessible label,
    /// and the positioning style.
    fn attrs(&self, unit: &RenderUnit<'_>) -> String {
        format!(
            "name='{}' aria-label='{}' style='{}'",
            escape_html(&unit.name),
            escape_html(&unit.label),
            escape_html(&unit.style.css())
        )
    }

    /// Render the unit by dispatching to its primitive's render method.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownPrimitive`] when the backend cannot render the
    /// selected primitive; this is a dispatcher/backend contract violation
    /// and must not be swallowed.
    fn render(&self, unit: &RenderUnit<'_>) -> Result<String> {
        match unit.kind {
            RenderKind::Button => self.render_button(unit),
            RenderKind::Checkbox => self.render_checkbox(unit),
            RenderKind::File => self.render_file(unit),
            RenderKind::Password => self.render_password(unit),
            RenderKind::Radio => self.render_radio(unit),
            RenderKind::Select => self.render_select(unit),
            RenderKind::Signature => self.render_signature(unit),
            RenderKind::Text => self.render_text(unit),
            RenderKind::Textarea => self.render_textarea(unit),
        }
    }

    /// Render a push button. Buttons carry no submitted value; nothing is
    /// emitted by default.
    fn render_button(&self, _unit: &RenderUnit<'_>) -> Result<String> {
        Ok(String::new())
    }

    /// Render a checkbox.
    fn render_checkbox(&self, unit: &RenderUnit<'_>) -> Result<String> {
        Ok(format!(
            "<input type='checkbox' {} {}/>",
            self.attrs(unit),
            self.checked_attr(unit)
        ))
    }

    /// Render a file input. Not reachable from the default classifier;
    /// nothing is emitted by default.
    fn render_file(&self, _unit: &RenderUnit<'_>) -> Result<String> {
        Ok(String::new())
    }

    /// Render a password input.
    fn render_password(&self, unit: &RenderUnit<'_>) -> Result<String> {
        Ok(format!(
            "<input type='password' {} {}/>",
            self.attrs(unit),
            self.value_attr(unit)
        ))
    }

    /// Render one member of a radio group.
    fn render_radio(&self, unit: &RenderUnit<'_>) -> Result<String> {
        Ok(format!(
            "<input type='radio' {} {}/>",
            self.attrs(unit),
            self.checked_attr(unit)
        ))
    }

    /// Render a choice list as a select element with one option per field
    /// choice, showing the display value.
    fn render_select(&self, unit: &RenderUnit<'_>) -> Result<String> {
        let options: String = unit
            .field
            .options
            .iter()
            .map(|opt| format!("<option>{}</option>", escape_html(&opt.display_value)))
            .collect();
        Ok(format!("<select {}>{}</select>", self.attrs(unit), options))
    }

    /// Render a signature area.
    ///
    /// The default is a file-upload control tagged as a signature; real
    /// signature handling is domain-specific, so specialized backends are
    /// expected to override this one primitive.
    fn render_signature(&self, unit: &RenderUnit<'_>) -> Result<String> {
        Ok(format!(
            "<input type='file' data-real-type='signature' {}/>",
            self.attrs(unit)
        ))
    }

    /// Render a single-line text input.
    fn render_text(&self, unit: &RenderUnit<'_>) -> Result<String> {
        Ok(format!(
            "<input type='text' {} {}/>",
            self.attrs(unit),
            self.value_attr(unit)
        ))
    }

    /// Render a multi-line text area.
    fn render_textarea(&self, unit: &RenderUnit<'_>) -> Result<String> {
        Ok(format!(
            "<textarea {}>{}</textarea>",
            self.attrs(unit),
            self.value_content(unit)
        ))
    }
}

/// Helper for backends that decline a primitive.
pub(crate) fn unknown_primitive(unit: &RenderUnit<'_>) -> Error {
    Error::UnknownPrimitive {
        field: unit.field.qualified_name.clone(),
        primitive: unit.kind.as_str().to_string(),
    }
}
