//! # Form Oxide
//!
//! Convert a PDF document's interactive form-field layer into positioned
//! HTML, PHP, or Jinja template markup.
//!
//! The rasterized page backgrounds come from `pdf2htmlEX`
//! ([`rasterize`]); this crate overlays each form field on its original
//! visual location and encodes the field's interactive semantics (text,
//! checkbox, radio group, choice list, signature) as markup or code in the
//! chosen target syntax.
//!
//! ## Architecture
//!
//! - **Classification** ([`compose::classify`]): a fixed-priority decision
//!   list maps each widget's field to one of nine render primitives.
//! - **Render backends** ([`render`]): one implementation per output syntax
//!   ([`render::HtmlBackend`], [`render::PhpBackend`],
//!   [`render::JinjaBackend`]); per-kind structure is shared, only a small
//!   set of syntax primitives varies.
//! - **Placeholders** ([`placeholder`]): rendered fragments pass through the
//!   HTML tree as inert tokens and are substituted after serialization, so
//!   template syntax survives unescaped.
//! - **Visual ordering** ([`order`]): coarse and exact geometric comparators
//!   approximate a natural tab order.
//! - **Naming** ([`naming`]): deterministic sanitization and per-run
//!   deduplication of generated field identifiers.
//!
//! ## Quick start
//!
//! ```
//! use form_oxide::compose::{build_template, RenderOptions};
//! use form_oxide::form::{Field, FieldType, FormModel};
//! use form_oxide::geometry::Rect;
//!
//! # fn main() -> form_oxide::Result<()> {
//! let mut form = FormModel::new(1);
//! let name = form.add_field(Field::new("applicant.name", FieldType::Text));
//! form.add_widget(name, 0, Rect::new(100.0, 700.0, 300.0, 720.0));
//!
//! let base = "<html><head></head><body>\
//!     <div id='page-container'><div class='pf'></div></div></body></html>";
//! let output = build_template(base, &form, &RenderOptions::default())?;
//! assert!(output.contains("name='applicant.name'"));
//! # Ok(())
//! # }
//! ```
//!
//! The conversion core is single-threaded and synchronous; per-run state is
//! limited to the placeholder registry and the name-collision table.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Field data model and geometry
pub mod form;
pub mod geometry;

// Core conversion
pub mod compose;
pub mod naming;
pub mod order;
pub mod placeholder;
pub mod render;
pub mod tree;

// External rasterizer wrapper
pub mod rasterize;

// Re-exports
pub use compose::{add_form_fields, build_template, classify, RenderOptions};
pub use error::{Error, Result};
pub use form::{Field, FieldFlags, FieldOption, FieldType, FormModel, FormSource, Widget};
pub use geometry::Rect;
pub use render::{RenderBackend, RenderKind, RenderUnit};
pub use tree::TemplateDocument;

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.starts_with("0."));
    }
}
