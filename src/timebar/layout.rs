//! Geometry model for the time bar.
//!
//! The bar is three nested regions inside the outer area the host gives it:
//!
//! ```text
//! outer (boundary color)
//! └── padding region, inset by the boundary width
//!     └── fill region, inset by the padding
//!         └── label, pinned to the fill's bottom edge
//! ```
//!
//! Every inset lives in a [`Layout`] record keyed by [`Region`]. Changing a
//! width rewrites the record for that region only, and [`Layout::apply`] is the
//! one place where rectangles are derived from it.

/// Height of the countdown label in cells.
pub const LABEL_HEIGHT: u16 = 1;

/// A rectangle in terminal cells, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Creates a rectangle.
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle at the origin.
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Returns `true` when the rectangle covers no cells.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` when the cell at `(x, y)` lies inside the rectangle.
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrinks the rectangle by `margin` on each side.
    ///
    /// Margins larger than the rectangle collapse it to an empty rectangle
    /// instead of wrapping.
    pub fn inner(&self, margin: Sides) -> Rect {
        let x = self.x.saturating_add(margin.left).min(self.right());
        let y = self.y.saturating_add(margin.top).min(self.bottom());
        let width = self
            .width
            .saturating_sub(margin.left)
            .saturating_sub(margin.right);
        let height = self
            .height
            .saturating_sub(margin.top)
            .saturating_sub(margin.bottom);

        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

/// Inset distances for the four edges of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sides {
    /// Distance from the parent's top edge.
    pub top: u16,
    /// Distance from the parent's right edge.
    pub right: u16,
    /// Distance from the parent's bottom edge.
    pub bottom: u16,
    /// Distance from the parent's left edge.
    pub left: u16,
}

impl Sides {
    /// Same inset on every edge.
    pub const fn all(val: u16) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Inset on the left and right edges only.
    pub const fn horizontal(val: u16) -> Self {
        Self {
            top: 0,
            right: val,
            bottom: 0,
            left: val,
        }
    }

    /// Returns the inset for one edge.
    pub fn get(&self, edge: Edge) -> u16 {
        match edge {
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
        }
    }

    /// Replaces the inset for one edge.
    pub fn set(&mut self, edge: Edge, val: u16) {
        match edge {
            Edge::Top => self.top = val,
            Edge::Right => self.right = val,
            Edge::Bottom => self.bottom = val,
            Edge::Left => self.left = val,
        }
    }
}

/// One edge of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Top edge.
    Top,
    /// Right edge.
    Right,
    /// Bottom edge.
    Bottom,
    /// Left edge.
    Left,
}

/// The inset regions of the bar, named by the view being inset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Second border ring, inset from the outer area by the boundary width.
    Padding,
    /// The shrinking timer bar, inset from the padding region by the padding.
    Fill,
    /// Countdown text, pinned to the fill's bottom edge.
    Label,
}

impl Region {
    fn index(self) -> usize {
        match self {
            Region::Padding => 0,
            Region::Fill => 1,
            Region::Label => 2,
        }
    }
}

/// Rectangles produced by [`Layout::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frames {
    /// The full area of the widget.
    pub outer: Rect,
    /// The padding region.
    pub padding: Rect,
    /// The fill region at its current (possibly animated) size.
    pub fill: Rect,
    /// The label, when one is shown and there is room for it.
    pub label: Option<Rect>,
}

/// Inset record for every region of the bar.
///
/// The label only uses its left and right insets; its vertical placement is
/// fixed to the fill's bottom edge with a height of [`LABEL_HEIGHT`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Layout {
    insets: [Sides; 3],
    show_label: bool,
}

impl Layout {
    /// Creates a layout with the given boundary width and padding.
    pub fn new(boundary_width: u16, padding: u16) -> Self {
        let mut layout = Self::default();
        layout.set_boundary_width(boundary_width);
        layout.set_padding(padding);
        layout
    }

    /// Returns the insets stored for `region`.
    pub fn insets(&self, region: Region) -> Sides {
        self.insets[region.index()]
    }

    /// Replaces all four insets of `region`.
    pub fn set_insets(&mut self, region: Region, sides: Sides) {
        self.insets[region.index()] = sides;
    }

    /// Replaces one inset of `region`, leaving the other edges alone.
    pub fn set_edge(&mut self, region: Region, edge: Edge, val: u16) {
        self.insets[region.index()].set(edge, val);
    }

    /// Sets the inset between the outer area and the padding region.
    pub fn set_boundary_width(&mut self, width: u16) {
        self.set_insets(Region::Padding, Sides::all(width));
    }

    /// Sets the inset between the padding region and the fill, and the
    /// label's horizontal inset.
    pub fn set_padding(&mut self, padding: u16) {
        self.set_insets(Region::Fill, Sides::all(padding));
        self.set_insets(Region::Label, Sides::horizontal(padding));
    }

    /// Whether a label will be placed by [`Layout::apply`].
    pub fn show_label(&self) -> bool {
        self.show_label
    }

    /// Enables or disables the label region.
    pub fn set_show_label(&mut self, show: bool) {
        self.show_label = show;
    }

    /// Derives every region's rectangle from `outer`.
    pub fn apply(&self, outer: Rect) -> Frames {
        let padding = outer.inner(self.insets(Region::Padding));
        let fill = padding.inner(self.insets(Region::Fill));

        let label = if self.show_label {
            // Pinned to where the fill's bottom edge sits, whatever its top.
            let fill_bottom = padding
                .bottom()
                .saturating_sub(self.insets(Region::Fill).bottom)
                .max(padding.y);
            let sides = self.insets(Region::Label);
            let x = fill.x.saturating_add(sides.left);
            let width = fill.width.saturating_sub(sides.left).saturating_sub(sides.right);
            let y = fill_bottom.saturating_sub(LABEL_HEIGHT).max(padding.y);
            let rect = Rect::new(x, y, width, fill_bottom - y);
            (!rect.is_empty()).then_some(rect)
        } else {
            None
        };

        Frames {
            outer,
            padding,
            fill,
            label,
        }
    }
}
