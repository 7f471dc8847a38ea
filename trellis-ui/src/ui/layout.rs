/// Page-level arrangement of top-level components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Responsive grid, up to three columns
    Grid,
    /// Wrapping flex row
    Flex,
    /// Vertical stack
    Single,
}

/// Container style descriptor handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutDescriptor {
    pub layout: Layout,
    pub classes: &'static str,
}

const GRID: LayoutDescriptor = LayoutDescriptor {
    layout: Layout::Grid,
    classes: "grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6",
};

const FLEX: LayoutDescriptor = LayoutDescriptor {
    layout: Layout::Flex,
    classes: "flex flex-wrap gap-6",
};

const SINGLE: LayoutDescriptor = LayoutDescriptor {
    layout: Layout::Single,
    classes: "space-y-6",
};

/// Resolve a layout token. Unknown or missing tokens fall back to the grid.
pub fn select_layout(token: Option<&str>) -> LayoutDescriptor {
    match token {
        Some("flex") => FLEX,
        Some("single") => SINGLE,
        _ => GRID,
    }
}
