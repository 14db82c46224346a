use crate::error::{Result, ShapeMeshError};

/// Minimum angle used by `q` when no value follows it.
pub const DEFAULT_MIN_ANGLE: f64 = 20.0;

/// Triangulation switches in Triangle's option-string syntax.
///
/// Supported switches:
/// - `p` triangulate a planar straight-line graph (honour segments and holes)
/// - `q[deg]` quality mesh with no angle below `deg` (default 20)
/// - `a<area>` maximum triangle area
/// - `c` keep the convex hull triangulated even with `p`
/// - `z`, `Q`, `V` accepted; indices are always zero-based and the last two
///   only change log verbosity
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TriangulateOptions {
    pub planar_graph: bool,
    pub min_angle: Option<f64>,
    pub max_area: Option<f64>,
    pub convex_hull: bool,
    pub quiet: bool,
    pub verbose: bool,
}

impl TriangulateOptions {
    /// Parses an option string such as `"pq30a0.5"`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOptions` for unknown switches, a missing area value,
    /// or a malformed number.
    pub fn parse(options: &str) -> Result<Self> {
        let mut parsed = Self::default();
        let chars: Vec<char> = options.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            let switch = chars[i];
            i += 1;
            match switch {
                'p' => parsed.planar_graph = true,
                'c' => parsed.convex_hull = true,
                'z' => {}
                'Q' => parsed.quiet = true,
                'V' => parsed.verbose = true,
                'q' => {
                    let (value, next) = read_number(&chars, i, switch)?;
                    i = next;
                    let angle = value.unwrap_or(DEFAULT_MIN_ANGLE);
                    if !(0.0..60.0).contains(&angle) {
                        return Err(ShapeMeshError::InvalidOptions(format!(
                            "minimum angle {angle} must lie in [0, 60)"
                        )));
                    }
                    parsed.min_angle = Some(angle);
                }
                'a' => {
                    let (value, next) = read_number(&chars, i, switch)?;
                    i = next;
                    let area = value.ok_or_else(|| {
                        ShapeMeshError::InvalidOptions(
                            "'a' needs a maximum area (regional area constraints are not supported)"
                                .into(),
                        )
                    })?;
                    if area <= 0.0 {
                        return Err(ShapeMeshError::InvalidOptions(format!(
                            "maximum area {area} must be positive"
                        )));
                    }
                    parsed.max_area = Some(area);
                }
                c if c.is_whitespace() => {}
                other => {
                    return Err(ShapeMeshError::InvalidOptions(format!(
                        "unsupported switch '{other}' in \"{options}\""
                    )));
                }
            }
        }

        Ok(parsed)
    }

    /// Returns `true` if quality or area constraints require refinement.
    #[must_use]
    pub fn needs_refinement(&self) -> bool {
        self.min_angle.is_some() || self.max_area.is_some()
    }

    /// Returns `true` unless `Q` silenced engine diagnostics. `V` wins over `Q`.
    #[must_use]
    pub fn reports(&self) -> bool {
        self.verbose || !self.quiet
    }

    /// Returns `true` if faces outside the segment-bounded region are dropped.
    #[must_use]
    pub fn carves_exterior(&self) -> bool {
        self.planar_graph && !self.convex_hull
    }
}

/// Reads an optional decimal number starting at `start`.
fn read_number(chars: &[char], start: usize, switch: char) -> Result<(Option<f64>, usize)> {
    let mut end = start;
    while end < chars.len() && (chars[end].is_ascii_digit() || chars[end] == '.') {
        end += 1;
    }
    if end == start {
        return Ok((None, start));
    }
    let text: String = chars[start..end].iter().collect();
    let value = text.parse::<f64>().map_err(|_| {
        ShapeMeshError::InvalidOptions(format!("bad number '{text}' after '{switch}'"))
    })?;
    Ok((Some(value), end))
}
