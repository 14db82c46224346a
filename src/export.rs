//! Plot export of a finished mesh.
//!
//! Rendering itself is delegated to a [`MeshRenderer`]; this module only
//! validates the target and hands over the data to draw.

use std::path::{Path, PathBuf};

use crate::error::{Result, ShapeMeshError};
use crate::math::Point2;

/// File name endings accepted for plot export (last four characters).
pub const SUPPORTED_FORMATS: [&str; 7] = [".png", ".jpg", "jpeg", ".pdf", ".gif", ".eps", ".fig"];

/// Everything needed to draw a mesh coloured by owning shape.
#[derive(Debug, Clone, Copy)]
pub struct PlotData<'a> {
    pub vertices: &'a [Point2],
    pub triangles: &'a [[usize; 3]],
    /// Owning shape index per triangle, used as the face colour.
    pub shape_map: &'a [usize],
    pub shape_count: usize,
}

impl PlotData<'_> {
    /// Colour scale limits `(0, shape_count + 0.5)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn color_limits(&self) -> (f64, f64) {
        (0.0, self.shape_count as f64 + 0.5)
    }

    /// Axis-aligned extent of the vertices as `(min, max)`.
    #[must_use]
    pub fn bounds(&self) -> Option<(Point2, Point2)> {
        let first = self.vertices.first()?;
        let (mut min, mut max) = (*first, *first);
        for v in self.vertices {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
        }
        Some((min, max))
    }
}

/// Backend that draws a mesh.
pub trait MeshRenderer {
    /// Writes the plot to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be produced or written.
    fn save(&mut self, plot: &PlotData<'_>, path: &Path) -> Result<()>;

    /// Displays the plot interactively.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend has no display.
    fn show(&mut self, plot: &PlotData<'_>) -> Result<()>;
}

/// Saves or shows a mesh plot.
pub struct ExportPlot {
    path: Option<PathBuf>,
}

impl ExportPlot {
    /// Creates a new `ExportPlot` operation. `None` displays the plot
    /// instead of saving it.
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Checks the target file name without rendering anything.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` for a file name whose last four
    /// characters are not in [`SUPPORTED_FORMATS`].
    pub fn check_target(&self) -> Result<()> {
        self.path.as_deref().map_or(Ok(()), check_format)
    }

    /// Executes the export.
    ///
    /// The file name is checked before the renderer is touched.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` for a file name whose last four
    /// characters are not in [`SUPPORTED_FORMATS`], or the renderer's error.
    pub fn execute(&self, plot: &PlotData<'_>, renderer: &mut impl MeshRenderer) -> Result<()> {
        match &self.path {
            None => renderer.show(plot),
            Some(path) => {
                check_format(path)?;
                renderer.save(plot, path)
            }
        }
    }
}

fn check_format(path: &Path) -> Result<()> {
    let name = path.to_string_lossy();
    let chars: Vec<char> = name.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    if chars.len() >= 4 && SUPPORTED_FORMATS.contains(&tail.as_str()) {
        Ok(())
    } else {
        Err(ShapeMeshError::UnsupportedFormat(name.into_owned()))
    }
}
