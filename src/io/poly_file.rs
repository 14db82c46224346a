use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::error::{Result, ShapeMeshError};
use crate::math::Point2;

/// Vertices, segments and holes read from a Triangle `.poly` file.
///
/// Segment endpoints are converted to zero-based indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolyFileData {
    pub vertices: Vec<Point2>,
    pub segments: Vec<[usize; 2]>,
    pub holes: Vec<Point2>,
}

impl PolyFileData {
    /// Parses the contents of a `.poly` file.
    ///
    /// Vertex attributes, boundary markers, regional attributes and area
    /// constraints are not read. Blank lines and `#` comments are skipped.
    ///
    /// # Errors
    ///
    /// Returns `MalformedPolyFile` on a bad count, a truncated or missing
    /// line, an unparseable number, or a segment endpoint outside the
    /// vertex list.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = Lines::new(text);

        let header = lines.next_record("vertex header")?;
        header.expect_fields(4)?;
        let n_vertices: usize = header.field(0)?;
        let dimension: usize = header.field(1)?;
        if dimension != 2 {
            return Err(header.error(format!("dimension must be 2, got {dimension}")));
        }

        let mut vertices = Vec::new();
        for _ in 0..n_vertices {
            let rec = lines.next_record("vertex")?;
            rec.expect_fields(3)?;
            vertices.push(Point2::new(rec.field(1)?, rec.field(2)?));
        }

        let header = lines.next_record("segment header")?;
        header.expect_fields(2)?;
        let n_segments: usize = header.field(0)?;

        let mut segments = Vec::new();
        for _ in 0..n_segments {
            let rec = lines.next_record("segment")?;
            rec.expect_fields(3)?;
            let a = rec.endpoint(1, n_vertices)?;
            let b = rec.endpoint(2, n_vertices)?;
            segments.push([a, b]);
        }

        let header = lines.next_record("hole header")?;
        let n_holes: usize = header.field(0)?;

        let mut holes = Vec::new();
        for _ in 0..n_holes {
            let rec = lines.next_record("hole")?;
            rec.expect_fields(3)?;
            holes.push(Point2::new(rec.field(1)?, rec.field(2)?));
        }

        debug!(
            vertices = vertices.len(),
            segments = segments.len(),
            holes = holes.len(),
            "poly file parsed"
        );

        Ok(Self {
            vertices,
            segments,
            holes,
        })
    }
}

/// Reads and parses a `.poly` file from disk.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read and `MalformedPolyFile` if its
/// contents do not parse.
pub fn read_poly(path: impl AsRef<Path>) -> Result<PolyFileData> {
    let text = fs::read_to_string(path)?;
    PolyFileData::parse(&text)
}

/// Non-empty, comment-stripped lines with their 1-based line numbers.
struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
    last_line: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines().enumerate(),
            last_line: 0,
        }
    }

    fn next_record(&mut self, what: &str) -> Result<Record<'a>> {
        for (i, raw) in self.inner.by_ref() {
            self.last_line = i + 1;
            let content = raw.split('#').next().unwrap_or_default();
            let fields: Vec<&str> = content.split_whitespace().collect();
            if !fields.is_empty() {
                return Ok(Record {
                    line: i + 1,
                    fields,
                });
            }
        }
        Err(ShapeMeshError::MalformedPolyFile {
            line: self.last_line + 1,
            reason: format!("unexpected end of file, expected {what} line"),
        })
    }
}

struct Record<'a> {
    line: usize,
    fields: Vec<&'a str>,
}

impl Record<'_> {
    fn error(&self, reason: String) -> ShapeMeshError {
        ShapeMeshError::MalformedPolyFile {
            line: self.line,
            reason,
        }
    }

    fn expect_fields(&self, n: usize) -> Result<()> {
        if self.fields.len() < n {
            return Err(self.error(format!(
                "expected {n} fields, found {}",
                self.fields.len()
            )));
        }
        Ok(())
    }

    fn field<T: FromStr>(&self, idx: usize) -> Result<T> {
        let raw = self
            .fields
            .get(idx)
            .ok_or_else(|| self.error(format!("missing field {}", idx + 1)))?;
        raw.parse()
            .map_err(|_| self.error(format!("cannot parse '{raw}'")))
    }

    /// One-based vertex reference converted to a zero-based index.
    fn endpoint(&self, idx: usize, n_vertices: usize) -> Result<usize> {
        let one_based: usize = self.field(idx)?;
        if one_based == 0 || one_based > n_vertices {
            return Err(self.error(format!(
                "segment endpoint {one_based} outside 1..={n_vertices}"
            )));
        }
        Ok(one_based - 1)
    }
}
