//! ASCII STL writer.

use std::io::Write;

use tracing::{debug, error, warn};

use crate::error::{ExportError, Result};
use crate::geometry::{Geometry, PolySet, Polyhedron};
use crate::operations::convert::PolyhedronToPolySet;
use crate::operations::query::IsManifold;
use crate::tessellation::{mesh_triangles, Triangle};

/// Settings for [`export_stl_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StlOptions {
    /// Name written after `solid` and `endsolid`.
    pub solid_name: String,
}

impl Default for StlOptions {
    fn default() -> Self {
        Self {
            solid_name: "boardsolid".into(),
        }
    }
}

/// Writes `geometry` as an ASCII STL document using default options.
///
/// # Errors
///
/// See [`export_stl_with`].
pub fn export_stl<W: Write>(geometry: &Geometry, out: &mut W) -> Result<usize> {
    export_stl_with(geometry, out, &StlOptions::default())
}

/// Writes `geometry` as an ASCII STL document and returns the number of
/// facets written.
///
/// Composite geometry is walked depth-first. A polyhedron that cannot be
/// flattened is logged and contributes no facets; its siblings are still
/// written.
///
/// # Errors
///
/// Returns [`ExportError::Unsupported`] before writing anything if the
/// geometry contains a flat 2D polygon, or an I/O error from `out`.
pub fn export_stl_with<W: Write>(
    geometry: &Geometry,
    out: &mut W,
    options: &StlOptions,
) -> Result<usize> {
    if let Some(kind) = unsupported_kind(geometry) {
        return Err(ExportError::Unsupported(kind).into());
    }

    let mut writer = StlWriter::begin(out, &options.solid_name)?;
    append(&mut writer, geometry)?;
    let facets = writer.finish()?;
    debug!(facets, solid = %options.solid_name, "STL written");
    Ok(facets)
}

fn unsupported_kind(geometry: &Geometry) -> Option<&'static str> {
    match geometry {
        Geometry::List(children) => children.iter().find_map(unsupported_kind),
        Geometry::Polygon(_) => Some(geometry.kind()),
        Geometry::Polyhedron(_) | Geometry::Mesh(_) => None,
    }
}

fn append<W: Write>(writer: &mut StlWriter<'_, W>, geometry: &Geometry) -> Result<()> {
    match geometry {
        Geometry::List(children) => {
            for child in children {
                append(writer, child)?;
            }
        }
        Geometry::Polyhedron(poly) => {
            if let Some(mesh) = flatten(poly) {
                writer.mesh(&mesh)?;
            }
        }
        Geometry::Mesh(mesh) => writer.mesh(mesh)?,
        Geometry::Polygon(_) => return Err(ExportError::Unsupported(geometry.kind()).into()),
    }
    Ok(())
}

/// Converts a polyhedron to plain faces, or `None` if it can't be done.
fn flatten(poly: &Polyhedron) -> Option<PolySet> {
    match IsManifold::new(poly.solid()).execute(poly.store()) {
        Ok(true) => {}
        Ok(false) => warn!("object isn't a valid 2-manifold, export may be broken"),
        Err(err) => warn!(%err, "object isn't a valid 2-manifold, export may be broken"),
    }

    match PolyhedronToPolySet::new(poly.solid()).execute(poly.store()) {
        Ok(mesh) => Some(mesh),
        Err(err) => {
            error!(%err, "polyhedron conversion failed, object skipped");
            None
        }
    }
}

/// Formatting context for one STL document.
///
/// Numbers go through `Display` for `f64`, which always uses `.` as the
/// decimal separator.
struct StlWriter<'w, W: Write> {
    out: &'w mut W,
    name: &'w str,
    facets: usize,
}

impl<'w, W: Write> StlWriter<'w, W> {
    fn begin(out: &'w mut W, name: &'w str) -> std::io::Result<Self> {
        writeln!(out, "solid {name}")?;
        Ok(Self {
            out,
            name,
            facets: 0,
        })
    }

    fn mesh(&mut self, mesh: &PolySet) -> std::io::Result<()> {
        for triangle in mesh_triangles(mesh) {
            self.facet(&triangle)?;
        }
        Ok(())
    }

    fn facet(&mut self, triangle: &Triangle) -> std::io::Result<()> {
        let n = &triangle.normal;
        writeln!(self.out, "  facet normal {} {} {}", n.x, n.y, n.z)?;
        writeln!(self.out, "    outer loop")?;
        for v in &triangle.vertices {
            writeln!(self.out, "      vertex {} {} {}", v.x, v.y, v.z)?;
        }
        writeln!(self.out, "    endloop")?;
        writeln!(self.out, "  endfacet")?;
        self.facets += 1;
        Ok(())
    }

    fn finish(self) -> std::io::Result<usize> {
        writeln!(self.out, "endsolid {}", self.name)?;
        self.out.flush()?;
        Ok(self.facets)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::BoardsolidError;
    use crate::geometry::{Outline2d, Polygon2d};
    use crate::io::idf::IdfData;
    use crate::math::{Point2, Point3};
    use crate::operations::creation::{MakeBox, MakePolyhedron};
    use crate::topology::{SolidId, TopologyStore};

    fn render(geometry: &Geometry, name: &str) -> (usize, String) {
        let mut out = Vec::new();
        let options = StlOptions {
            solid_name: name.into(),
        };
        let facets = export_stl_with(geometry, &mut out, &options).unwrap();
        (facets, String::from_utf8(out).unwrap())
    }

    fn single(a: Point3, b: Point3, c: Point3) -> Geometry {
        let mut mesh = PolySet::new();
        mesh.push(vec![a, b, c]);
        Geometry::Mesh(mesh)
    }

    fn broken_polyhedron() -> Geometry {
        Geometry::Polyhedron(Polyhedron::new(TopologyStore::new(), SolidId::default()))
    }

    /// Pulls the three normal components out of every facet line.
    fn normals(text: &str) -> Vec<[f64; 3]> {
        text.lines()
            .filter_map(|line| line.trim().strip_prefix("facet normal "))
            .map(|rest| {
                let v: Vec<f64> = rest.split(' ').map(|t| t.parse().unwrap()).collect();
                [v[0], v[1], v[2]]
            })
            .collect()
    }

    // ── Layout ─────────────────────────────────────────────────

    #[test]
    fn single_facet_layout() {
        let geometry = single(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.5, 0.0),
        );
        let (facets, text) = render(&geometry, "board");
        assert_eq!(facets, 1);
        assert_eq!(
            text,
            "solid board\n\
             \x20 facet normal 0 0 1\n\
             \x20   outer loop\n\
             \x20     vertex 0 0 0\n\
             \x20     vertex 1 0 0\n\
             \x20     vertex 0 1.5 0\n\
             \x20   endloop\n\
             \x20 endfacet\n\
             endsolid board\n"
        );
    }

    #[test]
    fn empty_geometry_still_has_solid_lines() {
        let (facets, text) = render(&Geometry::Mesh(PolySet::new()), "empty");
        assert_eq!(facets, 0);
        assert_eq!(text, "solid empty\nendsolid empty\n");
    }

    #[test]
    fn default_solid_name() {
        let mut out = Vec::new();
        export_stl(&Geometry::List(Vec::new()), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "solid boardsolid\nendsolid boardsolid\n");
    }

    #[test]
    fn decimal_point_is_a_period() {
        let geometry = single(
            Point3::new(0.25, 0.0, 1.6),
            Point3::new(1.75, 0.0, 1.6),
            Point3::new(0.5, 2.125, 1.6),
        );
        let (_, text) = render(&geometry, "s");
        assert!(text.contains("vertex 1.75 0 1.6"));
        assert!(!text.contains(','));
    }

    // ── Degenerate triangles ───────────────────────────────────

    #[test]
    fn collinear_facet_gets_default_normal() {
        let geometry = single(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(3.0, 3.0, 3.0),
        );
        let (facets, text) = render(&geometry, "s");
        assert_eq!(facets, 1);
        assert!(text.contains("  facet normal 1 0 0\n"));
    }

    #[test]
    fn coincident_facet_is_dropped() {
        let geometry = single(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 3.0, 3.0),
        );
        let (facets, text) = render(&geometry, "s");
        assert_eq!(facets, 0);
        assert!(!text.contains("facet"));
    }

    // ── Geometry kinds ─────────────────────────────────────────

    #[test]
    fn polygon_is_rejected_before_writing() {
        let mut polygon = Polygon2d::new();
        polygon.add_outline(Outline2d::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ]));
        let geometry = Geometry::List(vec![
            single(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ),
            Geometry::Polygon(polygon),
        ]);
        let mut out = Vec::new();
        let result = export_stl(&geometry, &mut out);
        assert!(matches!(
            result,
            Err(BoardsolidError::Export(ExportError::Unsupported(_)))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn box_polyhedron_has_12_facets() {
        let poly = MakeBox::new(Point3::origin(), Point3::new(2.0, 3.0, 4.0))
            .execute()
            .unwrap();
        let (facets, text) = render(&Geometry::Polyhedron(poly), "box");
        assert_eq!(facets, 12);
        assert_eq!(normals(&text).len(), 12);
    }

    #[test]
    fn open_polyhedron_is_still_exported() {
        let poly = MakePolyhedron::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
            ],
            vec![vec![0, 2, 1], vec![0, 1, 3]],
        )
        .execute()
        .unwrap();
        assert!(!IsManifold::new(poly.solid()).execute(poly.store()).unwrap());

        let (facets, text) = render(&Geometry::Polyhedron(poly), "open");
        assert_eq!(facets, 2);
        assert_eq!(
            normals(&text),
            vec![[0.0, 0.0, -1.0], [0.0, -1.0, 0.0]]
        );
    }

    #[test]
    fn broken_polyhedron_contributes_nothing() {
        let (facets, _) = render(&broken_polyhedron(), "s");
        assert_eq!(facets, 0);
    }

    #[test]
    fn broken_child_does_not_stop_siblings() {
        let geometry = Geometry::List(vec![
            broken_polyhedron(),
            Geometry::List(vec![single(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            )]),
        ]);
        let (facets, text) = render(&geometry, "s");
        assert_eq!(facets, 1);
        assert!(text.ends_with("endsolid s\n"));
    }

    // ── Board round trip ───────────────────────────────────────

    #[test]
    fn quad_board_exports_12_unit_normals() {
        let text = "\
.HEADER
BOARD_FILE 3.0 \"test\" 2024/01/01 1
quad THOU
.END_HEADER
.BOARD_OUTLINE ECAD
62.0
0 0 0 0
0 2000 0 0
0 2400 1500 0
0 -100 1200 0
.END_BOARD_OUTLINE
";
        let data = IdfData::from_reader(text.as_bytes());
        let geometry = data.to_geometry().unwrap();
        let (facets, stl) = render(&geometry, "quad");
        assert_eq!(facets, 12);

        let normals = normals(&stl);
        assert_eq!(normals.len(), 12);
        for [x, y, z] in normals {
            let len = (x * x + y * y + z * z).sqrt();
            assert!((len - 1.0).abs() < 1e-6);
        }
    }
}
