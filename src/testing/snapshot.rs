//! Snapshot rendering helpers.
//!
//! Plain-text views of layouts for snapshot testing and assertions. Lines are joined with
//! `'\n'`; the final line has no trailing newline.

use crate::layout::RenderedLayout;
use crate::masonry::MasonryLayout;

/// One line per column listing the original indices it holds.
///
/// ```ignore
/// assert_eq!(layout_to_string(&masonry.layout()), "col 0: 0 2\ncol 1: 1 3");
/// ```
pub fn layout_to_string<T>(layout: &MasonryLayout<T>) -> String {
    layout
        .indices()
        .iter()
        .enumerate()
        .map(|(col, indices)| {
            let mut line = format!("col {col}:");
            for index in indices {
                line.push_str(&format!(" {index}"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per column with its box, followed by `index@y+height` per item.
///
/// Numbers are rounded to whole pixels.
pub fn rendered_to_string(rendered: &RenderedLayout) -> String {
    rendered
        .columns
        .iter()
        .enumerate()
        .map(|(col, region)| {
            let mut line = format!(
                "col {col} x={} w={} h={}:",
                region.x.round(),
                region.width.round(),
                region.height.round()
            );
            for item in rendered.items.iter().filter(|item| item.column == col) {
                line.push_str(&format!(
                    " {}@{}+{}",
                    item.index,
                    item.region.y.round(),
                    item.content_height.round()
                ));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Draw the rendered layout as a character grid.
///
/// Every `scale` pixels become one cell; each item is filled with the last digit of its
/// original index, gaps stay blank. Rows are right-trimmed.
pub fn rendered_to_grid(rendered: &RenderedLayout, scale: f32) -> String {
    if scale <= 0.0 {
        return String::new();
    }
    let cells = |px: f32| (px / scale).round().max(0.0) as usize;
    let width = cells(rendered.container.width);
    let height = cells(rendered.container.height);
    if width == 0 || height == 0 {
        return String::new();
    }

    let mut grid = vec![vec![' '; width]; height];
    for item in &rendered.items {
        let glyph = char::from_digit((item.index % 10) as u32, 10).unwrap_or('#');
        let (x0, y0) = (cells(item.region.x), cells(item.region.y));
        let (x1, y1) = (cells(item.region.right()), cells(item.region.bottom()));
        for row in grid.iter_mut().take(y1.min(height)).skip(y0) {
            for cell in row.iter_mut().take(x1.min(width)).skip(x0) {
                *cell = glyph;
            }
        }
    }

    grid.iter()
        .map(|row| row.iter().collect::<String>().trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
