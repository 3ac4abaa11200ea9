//! Visual-order comparators for widget tab/reading order.
//!
//! Many scanned or generated forms carry an illogical tab order in the
//! document itself. These comparators reorder a page's widgets by geometry to
//! approximate natural reading order: top-to-bottom, then left-to-right.

use std::cmp::Ordering;

use crate::form::Widget;
use crate::geometry::Rect;

/// Grid size used by the coarse comparator to absorb misalignment noise.
const COARSE_BUCKET: f32 = 10.0;

/// Widget ordering applied per page before rendering.
pub enum SortMode {
    /// Keep document order.
    Off,
    /// Bucket edges to a 10-unit grid and sort by (top desc, left asc).
    /// Stable against minor misalignment in scanned forms.
    Coarse,
    /// Exact three-way geometric comparator; see [`exact_cmp`].
    Exact,
    /// Caller-supplied comparator; takes precedence over the built-in modes.
    Custom(Box<dyn Fn(&Widget, &Widget) -> Ordering>),
}

impl SortMode {
    /// Reorder widgets in place according to this mode (stable sort).
    pub fn apply(&self, widgets: &mut [Widget]) {
        match self {
            SortMode::Off => {},
            SortMode::Coarse => widgets.sort_by_key(|w| coarse_key(&w.rect)),
            SortMode::Exact => widgets.sort_by(|a, b| exact_cmp(&a.rect, &b.rect)),
            SortMode::Custom(f) => widgets.sort_by(|a, b| f(a, b)),
        }
    }
}

impl std::fmt::Debug for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortMode::Off => write!(f, "Off"),
            SortMode::Coarse => write!(f, "Coarse"),
            SortMode::Exact => write!(f, "Exact"),
            SortMode::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl Default for SortMode {
    fn default() -> Self {
        SortMode::Off
    }
}

/// Coarse sort key: negated bucketed top edge, then bucketed left edge.
///
/// Rectangles whose top edges fall in the same 10-unit band count as one row.
pub fn coarse_key(rect: &Rect) -> (i64, i64) {
    (-bucket(rect.top()), bucket(rect.left()))
}

fn bucket(v: f32) -> i64 {
    ((v / COARSE_BUCKET).round() * COARSE_BUCKET) as i64
}

/// Exact three-way comparator for use with a stable sort.
///
/// In PDF coordinates the y axis points up, so "A entirely above B" means
/// A's bottom edge is at or above B's top edge.
///
/// 1. A entirely above B -> A first
/// 2. A entirely below B -> B first
/// 3. A entirely left of B -> A first
/// 4. A entirely right of B -> B first
/// 5. Overlapping boxes: higher top edge first, then smaller left edge
/// 6. Same upper-left corner: equal (stable sort keeps document order)
pub fn exact_cmp(a: &Rect, b: &Rect) -> Ordering {
    if a.bottom() >= b.top() {
        return Ordering::Less;
    }
    if a.top() <= b.bottom() {
        return Ordering::Greater;
    }
    if a.right() <= b.left() {
        return Ordering::Less;
    }
    if a.left() >= b.right() {
        return Ordering::Greater;
    }
    // Overlapping bounding boxes
    match float_cmp(b.top(), a.top()) {
        Ordering::Equal => float_cmp(a.left(), b.left()),
        other => other,
    }
}

/// Compare floats without panicking on NaN (NaN sorts last, NaN == NaN).
fn float_cmp(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap(),
    }
}
