//! Field classification and page composition.
//!
//! This is the glue between the collaborators: the rasterizer's base HTML,
//! the [`FormSource`] field layer, and the active render backend. For each
//! page, the widgets are (optionally) reordered, classified into render
//! primitives, rendered by the backend, and overlaid on the page element at
//! their original visual location.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};
use crate::form::{Field, FieldFlags, FieldRef, FieldType, FormSource};
use crate::naming::{NameAllocator, RenameStrategy};
use crate::order::SortMode;
use crate::render::{HtmlBackend, PositionStyle, RenderBackend, RenderKind, RenderUnit};
use crate::tree::TemplateDocument;

/// Stylesheet for the per-page field overlays.
///
/// Inputs sit in an absolutely-positioned container anchored at the page's
/// bottom-left corner, matching the PDF coordinate origin, with the native
/// input chrome suppressed so the page background shows through.
const OVERLAY_CSS: &str = "\
.form-inputs{\
bottom:0;\
left:0;\
position:absolute;\
}\
.form-inputs input,\
.form-inputs textarea,\
.form-inputs select{\
border:none;\
background:rgba(0,0,0,.05);\
resize:none;\
appearance:none;\
margin:0\
}\
.form-inputs input:hover,\
.form-inputs textarea:hover,\
.form-inputs select:hover{\
box-shadow:inset 0 0 5px 5px rgba(0,0,0,.1);\
}\
.form-inputs input:checked::after{\
display:block;\
content:'\\2714';\
width:100%;\
height:100%;\
text-align:center;\
}";

/// Configuration for one conversion run.
pub struct RenderOptions {
    /// Scale factor applied to widget rectangles; must match the zoom the
    /// rasterizer was invoked with.
    pub zoom: f32,
    /// How output field names are derived from PDF field names.
    pub rename_fields: RenameStrategy,
    /// Human-readable labels keyed by PDF field name; fields not present
    /// fall back to their alternate name.
    pub field_labels: HashMap<String, String>,
    /// Widget ordering applied per page before rendering.
    pub sort_widgets: SortMode,
    /// First page (1-based) present in the base document; earlier pages are
    /// skipped.
    pub start_page: usize,
    /// The active render backend.
    pub backend: Box<dyn RenderBackend>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            rename_fields: RenameStrategy::Keep,
            field_labels: HashMap::new(),
            sort_widgets: SortMode::Off,
            start_page: 1,
            backend: Box::new(HtmlBackend),
        }
    }
}

impl std::fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderOptions")
            .field("zoom", &self.zoom)
            .field("rename_fields", &self.rename_fields)
            .field("field_labels", &self.field_labels.len())
            .field("sort_widgets", &self.sort_widgets)
            .field("start_page", &self.start_page)
            .finish_non_exhaustive()
    }
}

/// Map a field to its render primitive.
///
/// A fixed-priority decision list over the field's type and flags; the first
/// matching rule wins. Pure: depends only on the field, so classifying the
/// same field twice yields the same primitive. Returns `None` for fields no
/// rule matches; those widgets are skipped without error.
///
/// Note that text fields never map to [`RenderKind::File`]: the file
/// primitive exists for backends but is not reachable from classification.
pub fn classify(field: &Field) -> Option<RenderKind> {
    match &field.field_type {
        FieldType::Button => {
            if field.flags.contains(FieldFlags::RADIO) {
                Some(RenderKind::Radio)
            } else if !field.flags.contains(FieldFlags::PUSHBUTTON) {
                Some(RenderKind::Checkbox)
            } else {
                Some(RenderKind::Button)
            }
        },
        FieldType::Text => {
            if field.flags.contains(FieldFlags::MULTILINE) {
                Some(RenderKind::Textarea)
            } else if field.flags.contains(FieldFlags::PASSWORD) {
                Some(RenderKind::Password)
            } else {
                Some(RenderKind::Text)
            }
        },
        FieldType::Choice => Some(RenderKind::Select),
        FieldType::Signature => Some(RenderKind::Signature),
        FieldType::Unknown(_) => None,
    }
}

lazy_static! {
    /// UI rules pdf2htmlEX puts between its base-CSS header comment and the
    /// first page-frame rule
    static ref RE_BASE_CSS_UI: Regex = Regex::new(r"(?s)(\*/).*?(\.pf\{)").unwrap();
    /// Selection highlight and everything after it (page info, css drawings,
    /// text/radio input styling)
    static ref RE_SELECTION_CSS: Regex =
        Regex::new(r"(?s)::(-moz-)?selection\{background:rgba\(127,255,255,0\.4\)\}.*").unwrap();
}

/// Remove rasterizer-only chrome from the base document: scripts, the
/// sidebar, the loading indicator, and page-info elements.
///
/// Also drops the "Fancy styles" stylesheet entirely and trims the viewer-UI
/// rules out of the base stylesheet, keeping only the page/text layout rules
/// the overlaid form still needs.
pub fn strip_converter_chrome(doc: &mut TemplateDocument) {
    doc.decompose("script");
    doc.decompose("#sidebar");
    doc.decompose(".loading-indicator");
    doc.decompose(".pi");
    doc.rewrite_styles(|css| {
        if css.contains("Fancy styles for pdf2htmlEX") {
            None
        } else if css.contains("Base CSS for pdf2htmlEX") {
            let css = RE_BASE_CSS_UI.replace(css, "${1}${2}");
            let css = RE_SELECTION_CSS.replace(&css, "");
            Some(css.into_owned())
        } else {
            Some(css.to_string())
        }
    });
}

/// Overlay every form field onto its page in the base document.
///
/// Wraps the page container in a `<form>` element, appends one
/// `.form-inputs` container per page holding that page's rendered fields in
/// render order, and appends the overlay stylesheet to `<head>`.
///
/// # Errors
///
/// [`Error::MissingElement`] when the base document lacks `#page-container`
/// or a page element; [`Error::UnknownPrimitive`] when the backend declines
/// a primitive the dispatcher selected.
pub fn add_form_fields(
    doc: &mut TemplateDocument,
    form: &dyn FormSource,
    options: &RenderOptions,
) -> Result<()> {
    let container = doc
        .node_id("#page-container")
        .ok_or_else(|| Error::MissingElement("#page-container".to_string()))?;
    doc.insert_raw_before(container, "<form>".to_string());
    doc.insert_raw_after(container, "</form>".to_string());

    let pages = doc.node_ids(".pf");
    let start_page = options.start_page.max(1);

    // Output names are fixed per field, not per widget, so all members of a
    // radio group share one name. Only automatic sanitization can collide by
    // accident and gets the dedup table; Map/Func output is the caller's
    // responsibility and may unify fields on purpose.
    let auto_rename = matches!(options.rename_fields, RenameStrategy::Auto);
    let mut allocator = NameAllocator::new();
    let mut names: HashMap<FieldRef, String> = HashMap::new();

    for page_no in start_page..=form.page_count() {
        let mut widgets = form.widgets_on_page(page_no - 1);
        if widgets.is_empty() {
            continue;
        }
        let html_page = *pages
            .get(page_no - start_page)
            .ok_or_else(|| Error::MissingElement(format!("page element for page {}", page_no)))?;
        options.sort_widgets.apply(&mut widgets);

        let mut fieldset = String::from("<div class='form-inputs'>");
        for widget in &widgets {
            let field = form.field(widget.field);
            let kind = match classify(field) {
                Some(kind) => kind,
                None => {
                    log::debug!(
                        "Skipping unclassifiable field '{}'",
                        field.qualified_name
                    );
                    continue;
                },
            };
            let name = names
                .entry(widget.field)
                .or_insert_with(|| {
                    let name = options.rename_fields.apply(&field.qualified_name, field);
                    if auto_rename {
                        allocator.dedupe(&name)
                    } else {
                        name
                    }
                })
                .clone();
            let label = options
                .field_labels
                .get(&field.qualified_name)
                .cloned()
                .unwrap_or_else(|| field.alternate_name.clone());
            let unit = RenderUnit {
                kind,
                field,
                name,
                label,
                style: PositionStyle::from_rect(&widget.rect, options.zoom),
            };
            fieldset.push_str(&options.backend.render(&unit)?);
        }
        fieldset.push_str("</div>");
        doc.append_raw(html_page, fieldset);
    }

    if let Some(head) = doc.node_id("head") {
        doc.append_raw(head, format!("<style>{}</style>", OVERLAY_CSS));
    }
    Ok(())
}

/// Compose a base HTML document and a form-field layer into the final
/// template text: parse, strip chrome, overlay fields, serialize.
pub fn build_template(
    base_html: &str,
    form: &dyn FormSource,
    options: &RenderOptions,
) -> Result<String> {
    let mut doc = TemplateDocument::parse(base_html);
    strip_converter_chrome(&mut doc);
    add_form_fields(&mut doc, form, options)?;
    Ok(doc.serialize())
}

/// Find the 1-based page range that actually carries widgets, so leading
/// and trailing instruction pages can be excluded from conversion.
///
/// Returns `(first_page, last_page)`; `last_page` is `None` when the
/// document has no widgets at all.
pub fn calc_form_pages(form: &dyn FormSource) -> (usize, Option<usize>) {
    let mut first_page = 1;
    let mut last_page = None;
    for page_no in 1..=form.page_count() {
        if form.widgets_on_page(page_no - 1).is_empty() {
            if last_page.is_none() {
                first_page = page_no + 1;
            }
        } else {
            last_page = Some(page_no);
        }
    }
    (first_page, last_page)
}
