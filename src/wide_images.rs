//! Wide images in posts.
//!
//! Landscape images wider than the text column break out of it, centered on
//! the page, up to the column width plus an extra margin.

use crate::imaging::Dimensions;

/// Inline style applied to a widened image.
pub const WIDE_IMAGE_STYLE: &str =
    "display:block;margin-left:50%;transform:translateX(-50%);max-width:95vw;";

/// Page widths, in em, the theme can be configured with.
pub const PAGE_WIDTHS: [i64; 3] = [30, 35, 40];

const DEFAULT_FONT_SIZE_PX: i64 = 16;

/// Display size of a widened image, or `None` when the image keeps its
/// natural size in the text column.
pub fn widen(
    page_width_em: i64,
    font_size_px: i64,
    extra_px: u32,
    image: Dimensions,
) -> Option<Dimensions> {
    let page_width_em = if PAGE_WIDTHS.contains(&page_width_em) {
        page_width_em
    } else {
        PAGE_WIDTHS[0]
    };
    let font_size_px = if font_size_px > 0 {
        font_size_px
    } else {
        DEFAULT_FONT_SIZE_PX
    };

    let page_px = page_width_em * font_size_px;
    let wide_px = page_px + i64::from(extra_px);
    let (width, height) = (i64::from(image.width), i64::from(image.height));

    if width <= page_px || width <= height {
        return None;
    }
    if width <= wide_px {
        return Some(image);
    }
    Some(Dimensions {
        width: u32::try_from(wide_px).ok()?,
        height: u32::try_from(wide_px * height / width).ok()?,
    })
}
