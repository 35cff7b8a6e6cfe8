//! Overflow policies.
//!
//! Overflow is decided on the raw, unaligned layout: alignment only moves
//! lines inside the box, it never changes which characters fit.

use scribe_core::math::Vec2;

use crate::layout::LayoutOutput;
use crate::style::OverflowType;

/// Characters given up in front of the ellipsis by [`OverflowType::Dotted`].
pub const DOTTED_BACKOFF: usize = 4;

pub const ELLIPSIS: &str = "...";

/// Index of the first character whose quad leaves the box.
///
/// A visible quad leaves the box when its right edge passes `box_size.x`.
/// Any quad leaves it when its bottom edge passes `box_size.y`. Whitespace
/// and line breaks have zero-area quads at the pen, so they never overflow
/// to the right, however far past the edge a wrapped line leaves them.
pub fn find_overflow(layout: &LayoutOutput, box_size: Vec2) -> Option<usize> {
    layout.entries().position(|entry| {
        let quad = layout.quad_bounds(entry);
        let past_right = !quad.is_empty() && quad.right() > box_size.x;
        past_right || quad.bottom() > box_size.y
    })
}

/// The string to display when character `index` is the first one that does
/// not fit. Returns `None` for [`OverflowType::Overflow`].
pub fn overflow_string(text: &str, index: usize, policy: OverflowType) -> Option<String> {
    match policy {
        OverflowType::Overflow => None,
        OverflowType::Truncate => Some(text.chars().take(index).collect()),
        OverflowType::Dotted => {
            let mut shown: String = text.chars().take(index.saturating_sub(DOTTED_BACKOFF)).collect();
            shown.push_str(ELLIPSIS);
            Some(shown)
        }
    }
}
