use serde::Serialize;
use std::ops::Range;

/// Below this a leftover height is float noise, not another page.
const HEIGHT_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSlice {
    pub page_index: usize,
    /// Vertical shift applied to the content on this page: `-page_index * page_height`.
    pub offset_y: f32,
    pub visible_height: f32,
}

/// Height of a `content_width` x `content_height` surface once scaled to `page_width`.
pub fn scaled_height(content_width: f32, content_height: f32, page_width: f32) -> f32 {
    if content_width <= 0.0 {
        return 0.0;
    }
    content_height * page_width / content_width
}

/// Height-based slicing of one tall surface over fixed-height pages.
/// Always yields at least one page.
pub fn slice_pages(content_height: f32, page_height: f32) -> Vec<PageSlice> {
    let mut out = Vec::new();
    if page_height <= 0.0 {
        return out;
    }
    let mut remaining = content_height.max(0.0);
    loop {
        let page_index = out.len();
        out.push(PageSlice {
            page_index,
            offset_y: -(page_index as f32) * page_height,
            visible_height: remaining.min(page_height),
        });
        remaining -= page_height;
        if remaining <= HEIGHT_EPSILON {
            break;
        }
    }
    out
}

/// Row-aware flow: whole rows per page, at least one row per page even if it
/// overflows. An empty body still gets one (empty) page.
pub fn flow_rows(row_heights: &[f32], body_height: f32) -> Vec<Range<usize>> {
    let mut pages = Vec::new();
    let mut start = 0;
    let mut used = 0.0;
    for (i, h) in row_heights.iter().copied().enumerate() {
        if i > start && used + h > body_height + HEIGHT_EPSILON {
            pages.push(start..i);
            start = i;
            used = 0.0;
        }
        used += h;
    }
    if start < row_heights.len() || pages.is_empty() {
        pages.push(start..row_heights.len());
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_point_four_page_heights_make_three_pages() {
        let page_h = 500.0;
        let slices = slice_pages(2.4 * page_h, page_h);
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].offset_y, 0.0);
        assert_eq!(slices[1].offset_y, -500.0);
        assert_eq!(slices[2].offset_y, -1000.0);
        assert!((slices[2].visible_height - 200.0).abs() < 1e-3);
        assert_eq!(slices[0].visible_height, 500.0);
    }

    #[test]
    fn exact_multiple_does_not_add_blank_page() {
        assert_eq!(slice_pages(1000.0, 500.0).len(), 2);
        assert_eq!(slice_pages(1000.0004, 500.0).len(), 2);
    }

    #[test]
    fn short_or_empty_content_still_gets_one_page() {
        assert_eq!(slice_pages(120.0, 500.0).len(), 1);
        assert_eq!(slice_pages(0.0, 500.0).len(), 1);
        assert!(slice_pages(100.0, 0.0).is_empty());
    }

    #[test]
    fn scaled_height_follows_width_ratio() {
        assert_eq!(scaled_height(2000.0, 3000.0, 800.0), 1200.0);
        assert_eq!(scaled_height(0.0, 3000.0, 800.0), 0.0);
    }

    #[test]
    fn flow_rows_never_splits_rows() {
        let rows = vec![10.0; 7];
        assert_eq!(flow_rows(&rows, 30.0), vec![0..3, 3..6, 6..7]);
        assert_eq!(flow_rows(&rows, 35.0), vec![0..3, 3..6, 6..7]);
    }

    #[test]
    fn flow_rows_handles_empty_and_oversized_rows() {
        assert_eq!(flow_rows(&[], 30.0), vec![0..0]);
        assert_eq!(flow_rows(&[50.0, 10.0], 30.0), vec![0..1, 1..2]);
    }
}
