//! Read-only form-field data model.
//!
//! The conversion core does not parse PDF files itself. It consumes field
//! metadata through the [`FormSource`] trait, which a PDF reader implements.
//! The types here mirror the AcroForm model of ISO 32000-1:2008, Section 12.7:
//! fields carry a type from the /FT key, behavior flags from /Ff, and one
//! widget annotation per visual placement on a page.

use bitflags::bitflags;

use crate::geometry::Rect;

/// Field type from the /FT key in a field dictionary.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// Button field (/Btn) - checkbox, radio button, push button
    Button,
    /// Text field (/Tx) - single or multi-line text
    Text,
    /// Choice field (/Ch) - list box or combo box
    Choice,
    /// Signature field (/Sig)
    Signature,
    /// Unknown/unrecognized field type
    Unknown(String),
}

impl FieldType {
    /// Parse a field type from its PDF /FT name.
    pub fn from_pdf_name(ft: &str) -> Self {
        match ft {
            "Btn" => FieldType::Button,
            "Tx" => FieldType::Text,
            "Ch" => FieldType::Choice,
            "Sig" => FieldType::Signature,
            _ => FieldType::Unknown(ft.to_string()),
        }
    }
}

bitflags! {
    /// Field flags from the /Ff key.
    ///
    /// Per PDF spec Tables 221, 226, 228 and 230. Bits from the per-type
    /// tables do not overlap, so one set covers all field types.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FieldFlags: u32 {
        /// Bit 1: Field is read-only; user cannot change the value
        const READ_ONLY = 1 << 0;
        /// Bit 2: Field is required; must have a value before submit
        const REQUIRED = 1 << 1;
        /// Bit 3: Field should not be exported by submit-form action
        const NO_EXPORT = 1 << 2;

        /// Bit 13: Text may include multiple lines
        const MULTILINE = 1 << 12;
        /// Bit 14: Text should be displayed as asterisks (password)
        const PASSWORD = 1 << 13;
        /// Bit 21: File path should be submitted as field value
        const FILE_SELECT = 1 << 20;

        /// Bit 15: (checkbox/radio) No toggle to off
        const NO_TOGGLE_TO_OFF = 1 << 14;
        /// Bit 16: This is a radio button group
        const RADIO = 1 << 15;
        /// Bit 17: This is a push button (performs action, retains no value)
        const PUSHBUTTON = 1 << 16;

        /// Bit 18: This is a combo box (dropdown); if not set, a list box
        const COMBO = 1 << 17;
        /// Bit 19: (combo only) User may enter custom text
        const EDIT = 1 << 18;
        /// Bit 22: (list only) Allow multiple selections
        const MULTI_SELECT = 1 << 21;
    }
}

impl Default for FieldFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// One selectable option of a choice field or radio group.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldOption {
    /// Raw on-value stored in the PDF (/Opt export value or /AP on-state)
    pub on_value: String,
    /// Human-readable display value
    pub display_value: String,
}

impl FieldOption {
    /// Create an option whose export and display values are the same.
    pub fn simple(value: &str) -> Self {
        Self {
            on_value: value.to_string(),
            display_value: value.to_string(),
        }
    }
}

/// A named form field, read-only to the conversion core.
///
/// One field may be placed on a page by several widgets (e.g. the members of
/// a radio group).
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Fully-qualified dot-delimited name, unique within the document
    pub qualified_name: String,
    /// Display label ("alternate name", /TU key)
    pub alternate_name: String,
    /// Field type from /FT
    pub field_type: FieldType,
    /// Behavior flags from /Ff
    pub flags: FieldFlags,
    /// Selectable options for choice fields and radio groups
    pub options: Vec<FieldOption>,
    /// Current value from /V, if any
    pub value: Option<String>,
    /// Default value from /DV, if any
    pub default_value: Option<String>,
}

impl Field {
    /// Create a field with the given name and type, no flags, no value.
    pub fn new(qualified_name: &str, field_type: FieldType) -> Self {
        Self {
            qualified_name: qualified_name.to_string(),
            alternate_name: String::new(),
            field_type,
            flags: FieldFlags::empty(),
            options: Vec::new(),
            value: None,
            default_value: None,
        }
    }
}

/// Index of a field inside its [`FormSource`].
pub type FieldRef = usize;

/// A single interactive placement of a field on one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Widget {
    /// Annotation rectangle in PDF coordinates (origin bottom-left)
    pub rect: Rect,
    /// The field this widget belongs to
    pub field: FieldRef,
    /// Zero-based page index the widget sits on
    pub page_index: usize,
}

/// Read-only access to a document's form-field layer.
///
/// Implemented by PDF readers; the conversion core only ever iterates pages,
/// lists the widget annotations of a page, and resolves each widget to its
/// owning field.
pub trait FormSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Widget annotations placed on the given zero-based page, in document
    /// order.
    fn widgets_on_page(&self, page_index: usize) -> Vec<Widget>;

    /// Resolve a widget to its owning field.
    fn field(&self, field_ref: FieldRef) -> &Field;
}

/// In-memory [`FormSource`] backed by plain vectors.
///
/// Useful for tests and for adapters that have already extracted all fields.
#[derive(Debug, Default)]
pub struct FormModel {
    fields: Vec<Field>,
    widgets: Vec<Widget>,
    page_count: usize,
}

impl FormModel {
    /// Create an empty model with the given page count.
    pub fn new(page_count: usize) -> Self {
        Self {
            fields: Vec::new(),
            widgets: Vec::new(),
            page_count,
        }
    }

    /// Add a field, returning its reference for widget placement.
    pub fn add_field(&mut self, field: Field) -> FieldRef {
        self.fields.push(field);
        self.fields.len() - 1
    }

    /// Place a widget for a previously added field.
    pub fn add_widget(&mut self, field: FieldRef, page_index: usize, rect: Rect) {
        debug_assert!(field < self.fields.len());
        self.widgets.push(Widget {
            rect,
            field,
            page_index,
        });
    }
}

impl FormSource for FormModel {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn widgets_on_page(&self, page_index: usize) -> Vec<Widget> {
        self.widgets
            .iter()
            .filter(|w| w.page_index == page_index)
            .copied()
            .collect()
    }

    fn field(&self, field_ref: FieldRef) -> &Field {
        &self.fields[field_ref]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_from_pdf_name() {
        assert_eq!(FieldType::from_pdf_name("Btn"), FieldType::Button);
        assert_eq!(FieldType::from_pdf_name("Tx"), FieldType::Text);
        assert_eq!(FieldType::from_pdf_name("Ch"), FieldType::Choice);
        assert_eq!(FieldType::from_pdf_name("Sig"), FieldType::Signature);
        assert!(matches!(FieldType::from_pdf_name("Weird"), FieldType::Unknown(_)));
    }

    #[test]
    fn test_field_flags_bits() {
        assert_eq!(FieldFlags::MULTILINE.bits(), 1 << 12);
        assert_eq!(FieldFlags::PASSWORD.bits(), 1 << 13);
        assert_eq!(FieldFlags::RADIO.bits(), 1 << 15);
        assert_eq!(FieldFlags::PUSHBUTTON.bits(), 1 << 16);
        assert_eq!(FieldFlags::COMBO.bits(), 1 << 17);
    }

    #[test]
    fn test_combined_flags() {
        let flags = FieldFlags::REQUIRED | FieldFlags::MULTILINE;
        assert!(flags.contains(FieldFlags::REQUIRED));
        assert!(flags.contains(FieldFlags::MULTILINE));
        assert!(!flags.contains(FieldFlags::PASSWORD));
    }

    #[test]
    fn test_form_model_widgets_on_page() {
        let mut model = FormModel::new(2);
        let f = model.add_field(Field::new("a", FieldType::Text));
        model.add_widget(f, 0, Rect::new(0.0, 0.0, 10.0, 10.0));
        model.add_widget(f, 1, Rect::new(0.0, 0.0, 10.0, 10.0));
        model.add_widget(f, 1, Rect::new(20.0, 0.0, 30.0, 10.0));

        assert_eq!(model.widgets_on_page(0).len(), 1);
        assert_eq!(model.widgets_on_page(1).len(), 2);
        assert!(model.widgets_on_page(5).is_empty());
    }

    #[test]
    fn test_form_model_field_lookup() {
        let mut model = FormModel::new(1);
        let f = model.add_field(Field::new("applicant.name", FieldType::Text));
        assert_eq!(model.field(f).qualified_name, "applicant.name");
    }
}
