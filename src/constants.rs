//! Application constants.
//!
//! Centralizes the logical canvas, import layout and history limits.

/// Logical slide canvas. All element geometry lives in this space.
pub mod canvas {
    /// Canvas width in slide-space units.
    pub const WIDTH: f64 = 800.0;

    /// Canvas height in slide-space units.
    pub const HEIGHT: f64 = 600.0;
}

/// Deterministic layout applied to decoded slides.
pub mod layout {
    /// Outer margin on every side of the canvas.
    pub const MARGIN: f64 = 50.0;

    /// Height of the title band.
    pub const TITLE_HEIGHT: f64 = 80.0;

    /// Vertical gap between the title band and the body band.
    pub const BAND_GAP: f64 = 20.0;

    /// Default font family for imported text.
    pub const FONT_FAMILY: &str = "Arial";

    /// Title font size in points.
    pub const TITLE_FONT_SIZE: f64 = 32.0;

    /// Body font size in points.
    pub const BODY_FONT_SIZE: f64 = 16.0;

    /// Title text color.
    pub const TITLE_COLOR: &str = "#333333";

    /// Body text color.
    pub const BODY_COLOR: &str = "#666666";

    /// Default slide background.
    pub const BACKGROUND_COLOR: &str = "#ffffff";
}

/// Render projection defaults.
pub mod render {
    /// Font size used for placeholder labels (chart, table, missing image).
    pub const PLACEHOLDER_FONT_SIZE: f64 = 12.0;

    /// Fill used for shapes that carry no background.
    pub const SHAPE_FILL: &str = "#e0e0e0";

    /// Fill behind placeholders.
    pub const PLACEHOLDER_FILL: &str = "#f0f0f0";
}

/// Thumbnail generation.
pub mod thumbnail {
    /// Thumbnail width in pixels.
    pub const WIDTH: u32 = 160;

    /// Thumbnail height in pixels.
    pub const HEIGHT: u32 = 120;
}

/// Undo history.
pub mod history {
    /// Default number of snapshots kept by the undo log.
    pub const DEFAULT_UNDO_DEPTH: usize = 50;
}

/// Async task constants.
pub mod async_tasks {
    /// Channel buffer size for the engine request queue.
    pub const CHANNEL_BUFFER_SIZE: usize = 32;
}
