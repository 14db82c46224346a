use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::info;

use crate::config::MesherConfig;
use crate::error::{Result, ShapeMeshError};
use crate::export::{ExportPlot, MeshRenderer, PlotData};
use crate::io::{read_poly, PolyFileData};
use crate::math::Point2;
use crate::mesh::{
    boundary_supported, triangle_centroids, BuildMeshInput, ClassifyBoundary, MapShapeOwnership,
    MeshInput, MeshResult, SpadeEngine, TriangulationEngine,
};
use crate::registry::{ShapeId, ShapeRegistry};

/// Meshes a set of named shapes and tracks which shape owns each triangle.
///
/// Typical use: register shapes, call [`ShapeMesher::meshit`], optionally
/// [`ShapeMesher::refine_mesh`], then read [`ShapeMesher::shape_map`].
/// The triangulation input of the last `meshit` call is kept so that
/// refinements only vary the engine options.
#[derive(Debug)]
pub struct ShapeMesher<E = SpadeEngine> {
    config: MesherConfig,
    engine: E,
    registry: ShapeRegistry,
    mesh_input: Option<MeshInput>,
    is_concave: bool,
    result: Option<MeshResult>,
}

impl ShapeMesher<SpadeEngine> {
    /// Creates a mesher backed by [`SpadeEngine`].
    #[must_use]
    pub fn new(config: MesherConfig) -> Self {
        let engine =
            SpadeEngine::new().with_max_additional_vertices(config.max_additional_vertices);
        Self::with_engine(config, engine)
    }
}

impl Default for ShapeMesher<SpadeEngine> {
    fn default() -> Self {
        Self::new(MesherConfig::default())
    }
}

impl<E: TriangulationEngine> ShapeMesher<E> {
    /// Creates a mesher with a custom triangulation engine.
    #[must_use]
    pub fn with_engine(config: MesherConfig, engine: E) -> Self {
        Self {
            config,
            engine,
            registry: ShapeRegistry::new(),
            mesh_input: None,
            is_concave: false,
            result: None,
        }
    }

    /// The mesher's configuration.
    #[must_use]
    pub fn config(&self) -> &MesherConfig {
        &self.config
    }

    /// The registered shapes.
    #[must_use]
    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    /// Registers a shape. `kind` is `"polygon"`, `"line"` or `"point"`.
    ///
    /// Vertices must be ordered to preserve concavities.
    ///
    /// # Errors
    ///
    /// See [`ShapeRegistry::register`].
    pub fn new_shape(&mut self, name: &str, vertices: &[Point2], kind: &str) -> Result<ShapeId> {
        let id = self.registry.register(name, vertices, kind)?;
        if self.config.verbose {
            info!(kind, shape = name, vertices = vertices.len(), "shape created");
        }
        self.invalidate_shape_map();
        Ok(id)
    }

    /// Simplifies one shape, or all shapes when `name` is `None`.
    ///
    /// # Errors
    ///
    /// See [`ShapeRegistry::simplify`].
    pub fn simplify(&mut self, tolerance: f64, name: Option<&str>) -> Result<()> {
        self.registry.simplify(tolerance, name)?;
        self.invalidate_shape_map();
        Ok(())
    }

    /// Returns `true` if `point` touches the named shape.
    ///
    /// # Errors
    ///
    /// Returns `UnknownShape` if `name` is not registered.
    pub fn intersect(&self, point: &Point2, name: &str) -> Result<bool> {
        self.registry.contains_point(name, point)
    }

    /// Diagnostic resolution from the total shape area and configured
    /// sample count. Not used to build mesh options.
    #[must_use]
    pub fn resolution(&self) -> f64 {
        let resolution = self.registry.resolution(self.config.samples);
        if self.config.verbose {
            info!(
                area = self.registry.total_area(),
                resolution,
                "total mesh area and resolution"
            );
        }
        resolution
    }

    /// Triangulates the registered shapes.
    ///
    /// With `is_concave`, the convex hull of the shape vertices is inserted
    /// as constraint segments and the options gain `p`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` with no shapes registered, or the engine's
    /// error. The previous mesh is kept on failure.
    pub fn meshit(&mut self, is_concave: bool) -> Result<()> {
        let input = BuildMeshInput::new(&self.registry, is_concave).execute(&self.engine)?;
        self.mesh_from_input(input, is_concave)
    }

    /// Triangulates the contents of a `.poly` file instead of the shapes.
    ///
    /// # Errors
    ///
    /// Returns `Io` or `MalformedPolyFile` if the file cannot be read, or
    /// the engine's error.
    pub fn meshit_poly_file(&mut self, path: impl AsRef<Path>, is_concave: bool) -> Result<()> {
        let data = read_poly(path)?;
        self.meshit_poly(data, is_concave)
    }

    /// Triangulates already-parsed `.poly` data.
    ///
    /// # Errors
    ///
    /// Returns the engine's error.
    pub fn meshit_poly(&mut self, data: PolyFileData, is_concave: bool) -> Result<()> {
        self.mesh_from_input(BuildMeshInput::from_poly(data), is_concave)
    }

    /// Re-triangulates the retained input with new engine options.
    ///
    /// Options use Triangle's syntax: `p` planar straight-line graph,
    /// `a<area>` maximum triangle area, `q<deg>` minimum angle (default
    /// 20), `c` enclose the convex hull.
    ///
    /// # Errors
    ///
    /// Returns `NoMesh` before the first `meshit`, `InvalidOptions` for a
    /// bad option string, or the engine's error. The previous mesh is kept
    /// on failure.
    pub fn refine_mesh(&mut self, options: &str) -> Result<()> {
        let input = self.mesh_input.as_ref().ok_or(ShapeMeshError::NoMesh)?;
        let result = self.run(input, options, self.is_concave, "refinement")?;
        self.result = Some(result);
        Ok(())
    }

    /// The current mesh, if any.
    #[must_use]
    pub fn result(&self) -> Option<&MeshResult> {
        self.result.as_ref()
    }

    /// The triangulation input retained from the last `meshit`.
    #[must_use]
    pub fn mesh_input(&self) -> Option<&MeshInput> {
        self.mesh_input.as_ref()
    }

    /// Whether the current mesh was built in concave mode.
    #[must_use]
    pub fn is_concave(&self) -> bool {
        self.is_concave
    }

    /// Returns `true` if the current mesh carries a boundary mask.
    #[must_use]
    pub fn boundary_supported(&self) -> bool {
        boundary_supported(self.is_concave)
    }

    /// Owning shape index of every triangle, computed on first request.
    ///
    /// # Errors
    ///
    /// Returns `NoMesh` before the first `meshit`.
    pub fn shape_map(&mut self) -> Result<&[usize]> {
        let result = self.result.as_mut().ok_or(ShapeMeshError::NoMesh)?;
        let registry = &self.registry;
        let owners = result
            .shape_of_triangle
            .get_or_insert_with(|| MapShapeOwnership::new(&result.centroids).execute(registry));
        Ok(owners.as_slice())
    }

    /// Saves the mesh plot to `path`, or shows it when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` for an unsupported file name, checked
    /// before anything else, then `NoMesh` before the first `meshit`, or
    /// the renderer's error.
    pub fn plot(&mut self, path: Option<PathBuf>, renderer: &mut impl MeshRenderer) -> Result<()> {
        let export = ExportPlot::new(path);
        export.check_target()?;
        self.shape_map()?;
        let result = self.result.as_ref().ok_or(ShapeMeshError::NoMesh)?;
        let plot = PlotData {
            vertices: &result.vertices,
            triangles: &result.triangles,
            shape_map: result.shape_of_triangle.as_deref().unwrap_or_default(),
            shape_count: self.registry.len(),
        };
        export.execute(&plot, renderer)
    }

    fn mesh_from_input(&mut self, input: MeshInput, is_concave: bool) -> Result<()> {
        let options = self.config.default_options(is_concave);
        let result = self.run(&input, &options, is_concave, "triangulation")?;
        self.mesh_input = Some(input);
        self.is_concave = is_concave;
        self.result = Some(result);
        Ok(())
    }

    /// Runs the engine and derives centroids and boundary flags. Nothing is
    /// stored, so a failure leaves the mesher untouched.
    fn run(
        &self,
        input: &MeshInput,
        options: &str,
        is_concave: bool,
        stage: &str,
    ) -> Result<MeshResult> {
        let start = Instant::now();
        let output = self.engine.triangulate(input, options)?;
        let centroids = triangle_centroids(&output.vertices, &output.triangles);
        let boundary_mask = ClassifyBoundary::new(is_concave).execute(&output.vertices, &self.engine)?;

        if self.config.verbose {
            info!(
                vertices = output.vertices.len(),
                triangles = output.triangles.len(),
                elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                options,
                "mesh {stage} complete"
            );
        }

        Ok(MeshResult {
            vertices: output.vertices,
            triangles: output.triangles,
            centroids,
            boundary_mask,
            shape_of_triangle: None,
        })
    }

    fn invalidate_shape_map(&mut self) {
        if let Some(result) = self.result.as_mut() {
            result.shape_of_triangle = None;
        }
    }
}
