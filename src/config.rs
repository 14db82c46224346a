use crate::mesh::DEFAULT_MAX_ADDITIONAL_VERTICES;

/// Settings for a [`crate::ShapeMesher`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MesherConfig {
    /// Target number of samples along the domain's characteristic length,
    /// used by [`crate::ShapeMesher::resolution`].
    pub samples: usize,
    /// Minimum angle in degrees requested by the default mesh options.
    pub min_angle: f64,
    /// Log shape creation and mesh summaries at `info` level.
    pub verbose: bool,
    /// Cap on Steiner vertices inserted by one refinement.
    pub max_additional_vertices: usize,
}

impl Default for MesherConfig {
    fn default() -> Self {
        Self {
            samples: 100,
            min_angle: 20.0,
            verbose: true,
            max_additional_vertices: DEFAULT_MAX_ADDITIONAL_VERTICES,
        }
    }
}

impl MesherConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    #[must_use]
    pub fn with_min_angle(mut self, degrees: f64) -> Self {
        self.min_angle = degrees;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn with_max_additional_vertices(mut self, max: usize) -> Self {
        self.max_additional_vertices = max;
        self
    }

    /// Option string used by a first mesh run: `q<min_angle>`, with `p`
    /// appended for concave domains.
    #[must_use]
    pub fn default_options(&self, is_concave: bool) -> String {
        let mut options = format!("q{}", self.min_angle);
        if is_concave {
            options.push('p');
        }
        options
    }
}
