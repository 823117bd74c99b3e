//! Renderer trait abstraction.

use kurbo::Size;
use peniko::Color;
use polydraw_core::controller::SceneController;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Background grid display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    /// Plain background.
    None,
    /// Square grid centred on the world origin.
    #[default]
    Lines,
}

impl GridStyle {
    /// Get display name for this grid style.
    pub fn name(self) -> &'static str {
        match self {
            GridStyle::None => "None",
            GridStyle::Lines => "Lines",
        }
    }
}

/// World-space grid laid under the shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// Total side length in world units.
    pub size: f64,
    /// Number of cells along each side.
    pub divisions: u32,
    pub color: Color,
    /// Line width in surface pixels.
    pub line_width: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            size: 1600.0,
            divisions: 20,
            color: Color::from_rgba8(0, 0, 0, 255),
            line_width: 1.0,
        }
    }
}

impl GridSpec {
    /// World coordinates of every grid line along one axis.
    pub fn line_offsets(&self) -> Vec<f64> {
        if self.divisions == 0 {
            return Vec::new();
        }
        let half = self.size / 2.0;
        let step = self.size / f64::from(self.divisions);
        (0..=self.divisions)
            .map(|i| -half + step * f64::from(i))
            .collect()
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The controller whose visible scene is drawn.
    pub controller: &'a SceneController,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Background clear color.
    pub background_color: Color,
    /// Grid display style.
    pub grid_style: GridStyle,
    pub grid: GridSpec,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(controller: &'a SceneController, viewport_size: Size) -> Self {
        Self {
            controller,
            viewport_size,
            background_color: Color::WHITE,
            grid_style: GridStyle::Lines,
            grid: GridSpec::default(),
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the grid style.
    pub fn with_grid(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_line_offsets() {
        let offsets = GridSpec::default().line_offsets();
        assert_eq!(offsets.len(), 21);
        assert!((offsets[0] + 800.0).abs() < f64::EPSILON);
        assert!((offsets[10]).abs() < f64::EPSILON);
        assert!((offsets[20] - 800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_grid_without_divisions() {
        let grid = GridSpec {
            divisions: 0,
            ..GridSpec::default()
        };
        assert!(grid.line_offsets().is_empty());
    }

    #[test]
    fn test_context_builder() {
        let controller = SceneController::new(Size::new(800.0, 600.0));
        let ctx = RenderContext::new(&controller, Size::new(800.0, 600.0))
            .with_background(Color::BLACK)
            .with_grid(GridStyle::None);
        assert_eq!(ctx.background_color, Color::BLACK);
        assert_eq!(ctx.grid_style, GridStyle::None);
        assert_eq!(ctx.grid_style.name(), "None");
    }
}
