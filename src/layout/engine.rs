//! Headless column layout on a taffy tree.
//!
//! [`ColumnLayout`] turns a [`MasonryLayout`] into positioned boxes: a flex row of equally
//! wide columns, each a flex column of items. Gaps are padding: non-first columns get
//! `padding-left`, non-first items get `padding-top`. Item heights come from an
//! [`ItemExtent`] per item, resolved by a taffy measure function.

use taffy::prelude::*;

use crate::geometry::Region;
use crate::masonry::{MasonryLayout, MeasureTicket};
use crate::spacing::SpacingContext;

/// Errors from the layout tree.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("layout tree error: {0}")]
    Tree(#[from] taffy::TaffyError),
}

/// How tall an item is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemExtent {
    /// A fixed height in pixels.
    Fixed(f32),
    /// Height as a multiple of the column's content width.
    AspectRatio(f32),
}

impl ItemExtent {
    /// The item's content height at `width`. Negative results clamp to zero.
    pub fn height_at(self, width: f32) -> f32 {
        let height = match self {
            ItemExtent::Fixed(height) => height,
            ItemExtent::AspectRatio(ratio) => width * ratio,
        };
        if height.is_finite() {
            height.max(0.0)
        } else {
            0.0
        }
    }
}

/// One rendered item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedItem {
    /// Original index of the item.
    pub index: usize,
    /// Column the item was placed in.
    pub column: usize,
    /// Content box in container coordinates (gap padding excluded).
    pub region: Region,
    pub ticket: MeasureTicket,
    /// Height to report back to the height table.
    pub content_height: f32,
}

/// Positioned output of [`ColumnLayout::render`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedLayout {
    pub container: Region,
    /// Content box of each column.
    pub columns: Vec<Region>,
    pub items: Vec<RenderedItem>,
}

impl RenderedLayout {
    /// `(ticket, height)` pairs ready for [`Masonry::record_height`](crate::masonry::Masonry::record_height).
    pub fn measurements(&self) -> impl Iterator<Item = (MeasureTicket, f32)> + '_ {
        self.items.iter().map(|item| (item.ticket, item.content_height))
    }

    /// Height of each column's content box.
    pub fn column_heights(&self) -> Vec<f32> {
        self.columns.iter().map(|column| column.height).collect()
    }
}

/// Reusable taffy tree for rendering masonry layouts.
pub struct ColumnLayout {
    tree: TaffyTree<ItemExtent>,
    font_size: f32,
}

impl ColumnLayout {
    pub fn new() -> Self {
        let mut tree = TaffyTree::new();
        // Unrounded so every column reports identical widths.
        tree.disable_rounding();
        Self {
            tree,
            font_size: 16.0,
        }
    }

    /// Font size used to resolve `rem`/`em` gaps (builder).
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Lay out `layout` in a container as wide as its viewport width.
    pub fn render<T>(
        &mut self,
        layout: &MasonryLayout<T>,
        extent: impl Fn(&T) -> ItemExtent,
    ) -> Result<RenderedLayout, LayoutError> {
        self.tree.clear();

        let container_width = layout.width as f32;
        let ctx = SpacingContext::for_viewport(container_width).with_font_size(self.font_size);
        let gap = layout.gap.to_pixels(&ctx);
        let count = layout.columns.len();
        let item_width = if count == 0 {
            0.0
        } else {
            ((container_width - gap * (count - 1) as f32) / count as f32).max(0.0)
        };

        let mut column_nodes = Vec::with_capacity(count);
        let mut item_nodes = Vec::with_capacity(count);
        for column in &layout.columns {
            let mut nodes = Vec::with_capacity(column.items.len());
            for entry in &column.items {
                let style = Style {
                    flex_shrink: 0.0,
                    padding: top_padding(entry.leading_gap.to_pixels(&ctx)),
                    ..Style::default()
                };
                let extent = extent(&entry.item);
                let node = self.tree.new_leaf_with_context(style, extent)?;
                nodes.push((node, extent.height_at(item_width)));
            }

            let style = Style {
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                flex_grow: 1.0,
                flex_basis: Dimension::from_length(0.0),
                padding: left_padding(column.leading_gap.to_pixels(&ctx)),
                ..Style::default()
            };
            let children: Vec<NodeId> = nodes.iter().map(|(node, _)| *node).collect();
            column_nodes.push(self.tree.new_with_children(style, &children)?);
            item_nodes.push(nodes);
        }

        let root_style = Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            align_items: Some(AlignItems::FlexStart),
            size: Size {
                width: Dimension::from_length(container_width),
                height: Dimension::AUTO,
            },
            ..Style::default()
        };
        let root = self.tree.new_with_children(root_style, &column_nodes)?;

        self.tree.compute_layout_with_measure(
            root,
            Size {
                width: AvailableSpace::Definite(container_width),
                height: AvailableSpace::MaxContent,
            },
            |known, _available, _node, context, _style| {
                let Some(extent) = context else {
                    return Size::ZERO;
                };
                Size {
                    width: known.width.unwrap_or(item_width),
                    height: known.height.unwrap_or(extent.height_at(item_width)),
                }
            },
        )?;

        let root_layout = self.tree.layout(root)?;
        let mut rendered = RenderedLayout {
            container: Region::new(0.0, 0.0, root_layout.size.width, root_layout.size.height),
            columns: Vec::with_capacity(count),
            items: Vec::new(),
        };

        for (col, (column, nodes)) in layout.columns.iter().zip(&item_nodes).enumerate() {
            let column_layout = self.tree.layout(column_nodes[col])?;
            let origin_x = column_layout.location.x;
            let origin_y = column_layout.location.y;
            rendered.columns.push(Region::new(
                origin_x + column_layout.padding.left,
                origin_y,
                column_layout.size.width - column_layout.padding.left,
                column_layout.size.height,
            ));

            for (entry, &(node, content_height)) in column.items.iter().zip(nodes) {
                let item_layout = self.tree.layout(node)?;
                let region = Region::new(
                    origin_x + item_layout.location.x,
                    origin_y + item_layout.location.y + item_layout.padding.top,
                    item_layout.size.width,
                    content_height,
                );
                rendered.items.push(RenderedItem {
                    index: entry.index,
                    column: col,
                    region,
                    ticket: entry.ticket,
                    content_height,
                });
            }
        }

        tracing::trace!(
            target: "masonry_columns::layout",
            columns = count,
            items = rendered.items.len(),
            height = rendered.container.height,
            "layout rendered"
        );
        Ok(rendered)
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ColumnLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnLayout")
            .field("nodes", &self.tree.total_node_count())
            .field("font_size", &self.font_size)
            .finish()
    }
}

fn top_padding(px: f32) -> taffy::geometry::Rect<LengthPercentage> {
    taffy::geometry::Rect {
        top: LengthPercentage::from_length(px),
        right: LengthPercentage::ZERO,
        bottom: LengthPercentage::ZERO,
        left: LengthPercentage::ZERO,
    }
}

fn left_padding(px: f32) -> taffy::geometry::Rect<LengthPercentage> {
    taffy::geometry::Rect {
        top: LengthPercentage::ZERO,
        right: LengthPercentage::ZERO,
        bottom: LengthPercentage::ZERO,
        left: LengthPercentage::from_length(px),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masonry::{Masonry, MasonryConfig};
    use crate::spacing::Spacing;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    fn masonry(columns: i32, gap: Spacing, width: u32, items: Vec<f32>) -> Masonry<f32> {
        let config = MasonryConfig::new().with_columns(columns).with_gap(gap);
        let mut masonry = Masonry::new(config, width);
        masonry.set_items(items);
        masonry
    }

    #[test]
    fn extent_heights() {
        assert_eq!(ItemExtent::Fixed(12.0).height_at(100.0), 12.0);
        assert_eq!(ItemExtent::AspectRatio(0.5).height_at(100.0), 50.0);
        assert_eq!(ItemExtent::Fixed(-3.0).height_at(100.0), 0.0);
        assert_eq!(ItemExtent::Fixed(f32::NAN).height_at(100.0), 0.0);
    }

    #[test]
    fn columns_share_width_and_gap() {
        let m = masonry(2, Spacing::px(10.0), 210, vec![20.0, 30.0, 40.0, 50.0]);
        let mut engine = ColumnLayout::new();
        let out = engine.render(&m.layout(), |h| ItemExtent::Fixed(**h)).unwrap();

        assert_eq!(out.columns.len(), 2);
        assert!(approx(out.columns[0].x, 0.0));
        assert!(approx(out.columns[0].width, 100.0));
        assert!(approx(out.columns[1].x, 110.0));
        assert!(approx(out.columns[1].width, 100.0));
    }

    #[test]
    fn items_stack_with_gap() {
        let m = masonry(2, Spacing::px(10.0), 210, vec![20.0, 30.0, 40.0, 50.0]);
        let mut engine = ColumnLayout::new();
        let out = engine.render(&m.layout(), |h| ItemExtent::Fixed(**h)).unwrap();

        // Column 0 holds items 0 and 2.
        let first = out.items.iter().find(|i| i.index == 0).unwrap();
        let third = out.items.iter().find(|i| i.index == 2).unwrap();
        assert_eq!(first.column, 0);
        assert!(approx(first.region.y, 0.0));
        assert!(approx(first.region.height, 20.0));
        assert!(approx(third.region.y, 30.0));
        assert!(approx(third.content_height, 40.0));

        let heights = out.column_heights();
        assert!(approx(heights[0], 70.0));
        assert!(approx(heights[1], 90.0));
        assert!(approx(out.container.height, 90.0));
    }

    #[test]
    fn aspect_ratio_uses_column_width() {
        let m = masonry(3, Spacing::ZERO, 300, vec![1.0, 0.5, 2.0]);
        let mut engine = ColumnLayout::new();
        let out = engine.render(&m.layout(), |r| ItemExtent::AspectRatio(**r)).unwrap();
        let heights: Vec<f32> = out.items.iter().map(|i| i.content_height).collect();
        assert!(approx(heights[0], 100.0));
        assert!(approx(heights[1], 50.0));
        assert!(approx(heights[2], 200.0));
    }

    #[test]
    fn measurements_carry_tickets() {
        let m = masonry(1, Spacing::rem(1.0), 100, vec![5.0, 6.0]);
        let layout = m.layout();
        let mut engine = ColumnLayout::new();
        let out = engine.render(&layout, |h| ItemExtent::Fixed(**h)).unwrap();
        let measured: Vec<_> = out.measurements().collect();
        assert_eq!(measured.len(), 2);
        assert_eq!(measured[0].0, layout.columns[0].items[0].ticket);
        // Second item sits below a 16px gap.
        assert!(approx(out.items[1].region.y, 21.0));
    }

    #[test]
    fn zero_columns_render_empty() {
        let m = masonry(0, Spacing::ZERO, 300, vec![1.0]);
        let mut engine = ColumnLayout::new();
        let out = engine.render(&m.layout(), |h| ItemExtent::Fixed(**h)).unwrap();
        assert!(out.columns.is_empty());
        assert!(out.items.is_empty());
        assert!(approx(out.container.width, 300.0));
    }

    #[test]
    fn engine_is_reusable() {
        let mut engine = ColumnLayout::new();
        for n in 1..4 {
            let m = masonry(n, Spacing::px(4.0), 400, vec![10.0; 6]);
            let out = engine.render(&m.layout(), |h| ItemExtent::Fixed(**h)).unwrap();
            assert_eq!(out.columns.len(), n as usize);
            assert_eq!(out.items.len(), 6);
        }
    }
}
