//! Reader for IDF 3.0 board files.
//!
//! Only the `HEADER` and `BOARD_OUTLINE` sections are interpreted; every
//! other section is skipped up to its `.END_` terminator. Arcs in the
//! outline are read as straight edges.

mod record;
mod warning;

pub use warning::ParseWarning;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, error, warn};

use crate::error::{ParseError, Result};
use crate::geometry::{Geometry, Outline2d, PolySet, Polygon2d};
use crate::math::Point2;
use crate::operations::shaping::LinearExtrude;

use record::{is_blank_or_comment, keyword, Record};

const HEADER: &str = ".HEADER";
const END_HEADER: &str = ".END_HEADER";
const BOARD_OUTLINE: &str = ".BOARD_OUTLINE";
const END_BOARD_OUTLINE: &str = ".END_BOARD_OUTLINE";

/// Highest outline label accepted; larger labels are treated as garbage.
const MAX_LABEL: i64 = 1 << 20;

/// Length units declared by a board file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    /// Thousandths of an inch.
    Thou,
    /// Millimeters.
    Millimeters,
}

impl Units {
    /// Multiplier from file units to millimeters.
    #[must_use]
    pub fn conversion(self) -> f64 {
        match self {
            Self::Thou => 0.0254,
            Self::Millimeters => 1.0,
        }
    }

    fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "THOU" => Some(Self::Thou),
            "MM" => Some(Self::Millimeters),
            _ => None,
        }
    }
}

/// Metadata from the `HEADER` section.
#[derive(Debug, Clone, PartialEq)]
pub struct IdfHeader {
    /// Name of the system that wrote the file.
    pub source_system: Option<String>,
    /// Creation date, as written.
    pub date: Option<String>,
    /// Board file revision, as written.
    pub board_version: Option<String>,
    pub board_name: String,
    pub units: Units,
}

/// A parsed board file: global scalars plus outlines indexed by label.
///
/// Coordinates are already in millimeters; [`IdfData::thickness`] is still
/// in file units.
#[derive(Debug, Clone, Default)]
pub struct IdfData {
    header: Option<IdfHeader>,
    conversion: Option<f64>,
    thickness: f64,
    outline_owner: Option<String>,
    outlines: Vec<Outline2d>,
    warnings: Vec<ParseWarning>,
    error: Option<ParseError>,
}

impl IdfData {
    /// Reads a board file from disk.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be opened. Problems with the
    /// file's content are reported through [`IdfData::error`] and
    /// [`IdfData::warnings`] instead.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).inspect_err(|err| {
            warn!(path = %path.display(), %err, "can't open IDF file");
        })?;
        Ok(Self::from_reader(BufReader::new(file)))
    }

    /// Parses a board file from a line stream.
    ///
    /// Never fails outright: a fatal problem stops the parse, clears the
    /// outlines and is kept in [`IdfData::error`]. Bytes that are not valid
    /// UTF-8 are replaced rather than rejected; only a failing reader is
    /// fatal.
    pub fn from_reader<R: BufRead>(mut reader: R) -> Self {
        let mut parser = Parser::default();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(err) => {
                    parser.fail(ParseError::Read(err.to_string()));
                    return parser.data;
                }
            }
            let line = String::from_utf8_lossy(&buf);
            if let Err(err) = parser.feed(line.trim_end_matches(|c| c == '\n' || c == '\r')) {
                parser.fail(err);
                return parser.data;
            }
        }
        if let Err(err) = parser.finish() {
            parser.fail(err);
        }
        parser.data
    }

    /// Header metadata, once a complete `HEADER` section has been read.
    #[must_use]
    pub fn header(&self) -> Option<&IdfHeader> {
        self.header.as_ref()
    }

    /// Multiplier from file units to millimeters, if the header set one.
    #[must_use]
    pub fn conversion(&self) -> Option<f64> {
        self.conversion
    }

    /// Board thickness in file units.
    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Owner field of the `BOARD_OUTLINE` section (`ECAD`, `MCAD`, `UNOWNED`).
    #[must_use]
    pub fn outline_owner(&self) -> Option<&str> {
        self.outline_owner.as_deref()
    }

    /// Outlines indexed by label. Labels never seen hold empty outlines.
    #[must_use]
    pub fn outlines(&self) -> &[Outline2d] {
        &self.outlines
    }

    /// Recovered anomalies, in the order they were met.
    #[must_use]
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// The fatal error that stopped the parse, if any.
    #[must_use]
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Returns `true` if the parse completed without a fatal error.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Collects the non-empty outlines in label order.
    #[must_use]
    pub fn to_polygon(&self) -> Polygon2d {
        let mut polygon = Polygon2d::new();
        for outline in self.outlines.iter().filter(|o| !o.is_empty()) {
            polygon.add_outline(outline.clone());
        }
        polygon
    }

    /// Builds the board solid: the outlines extruded by the board thickness.
    ///
    /// A file without outlines gives an empty mesh.
    ///
    /// # Errors
    ///
    /// Returns the recorded [`ParseError`] if the parse failed, or an
    /// extrusion error if the outlines cannot be tessellated.
    pub fn to_geometry(&self) -> Result<Geometry> {
        if let Some(err) = &self.error {
            return Err(err.clone().into());
        }
        let Some(conversion) = self.conversion else {
            return Ok(Geometry::Mesh(PolySet::new()));
        };
        let solid = LinearExtrude::new(self.to_polygon(), self.thickness * conversion).execute()?;
        Ok(Geometry::Mesh(solid))
    }
}

// ── Parser state machine ──────────────────────────────────────

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Header(HeaderStage),
    Outline { conversion: f64, thickness_read: bool },
    Skip { name: String, terminator: String },
}

#[derive(Debug)]
enum HeaderStage {
    FileType,
    Units(HeaderDraft),
    End(IdfHeader),
}

#[derive(Debug)]
struct HeaderDraft {
    source_system: Option<String>,
    date: Option<String>,
    board_version: Option<String>,
}

#[derive(Debug, Default)]
struct Parser {
    data: IdfData,
    state: State,
}

impl Parser {
    fn feed(&mut self, line: &str) -> std::result::Result<(), ParseError> {
        let state = std::mem::take(&mut self.state);
        self.state = match state {
            State::Skip { name, terminator } => self.skip_line(name, terminator, line),
            other if is_blank_or_comment(line) => other,
            State::Idle => self.open_section(line)?,
            State::Header(stage) => self.header_record(stage, line)?,
            State::Outline {
                conversion,
                thickness_read,
            } => self.outline_record(conversion, thickness_read, line),
        };
        Ok(())
    }

    fn finish(&mut self) -> std::result::Result<(), ParseError> {
        match std::mem::take(&mut self.state) {
            State::Idle => Ok(()),
            State::Skip { name, .. } => {
                self.warn(ParseWarning::UnknownSection {
                    name,
                    terminated: false,
                });
                Ok(())
            }
            State::Header(_) => Err(ParseError::MissingHeaderEnd),
            State::Outline { .. } => Err(ParseError::UnterminatedSection(END_BOARD_OUTLINE.into())),
        }
    }

    fn fail(&mut self, err: ParseError) {
        error!(%err, "IDF parse aborted");
        self.data.outlines.clear();
        self.data.error = Some(err);
    }

    fn warn(&mut self, warning: ParseWarning) {
        warn!(%warning, "IDF parse");
        self.data.warnings.push(warning);
    }

    fn open_section(&mut self, line: &str) -> std::result::Result<State, ParseError> {
        let mut record = Record::new(line);
        let name = record.next_token().unwrap_or_default().to_ascii_uppercase();
        debug!(section = %name, "IDF section");

        match name.as_str() {
            HEADER => Ok(State::Header(HeaderStage::FileType)),
            BOARD_OUTLINE => {
                let Some(conversion) = self.data.conversion else {
                    return Err(ParseError::MissingHeader(name));
                };
                self.data.outline_owner = record.next_token().map(str::to_ascii_uppercase);
                Ok(State::Outline {
                    conversion,
                    thickness_read: false,
                })
            }
            _ => {
                let terminator = format!(".END_{}", name.trim_start_matches('.'));
                Ok(State::Skip { name, terminator })
            }
        }
    }

    fn skip_line(&mut self, name: String, terminator: String, line: &str) -> State {
        if keyword(line).as_deref() == Some(terminator.as_str()) {
            self.warn(ParseWarning::UnknownSection {
                name,
                terminated: true,
            });
            State::Idle
        } else {
            State::Skip { name, terminator }
        }
    }

    #[allow(clippy::float_cmp)]
    fn header_record(
        &mut self,
        stage: HeaderStage,
        line: &str,
    ) -> std::result::Result<State, ParseError> {
        let mut record = Record::new(line);
        match stage {
            // BOARD_FILE version source_system date board_version
            HeaderStage::FileType => {
                let file_type = record.next_token().unwrap_or_default().to_ascii_uppercase();
                if file_type != "BOARD_FILE" {
                    return Err(ParseError::UnsupportedFileType(file_type));
                }
                let version = self.take_float(&mut record, "version");
                if version != 3.0 {
                    return Err(ParseError::UnsupportedVersion(version));
                }
                let draft = HeaderDraft {
                    source_system: record.next_token().map(str::to_owned),
                    date: record.next_token().map(str::to_owned),
                    board_version: record.next_token().map(str::to_owned),
                };
                Ok(State::Header(HeaderStage::Units(draft)))
            }
            // board_name units
            HeaderStage::Units(draft) => {
                let board_name = record.next_token().unwrap_or_default().to_owned();
                let token = record.next_token().unwrap_or_default();
                let units = Units::parse(token)
                    .ok_or_else(|| ParseError::InvalidUnits(token.to_owned()))?;
                Ok(State::Header(HeaderStage::End(IdfHeader {
                    source_system: draft.source_system,
                    date: draft.date,
                    board_version: draft.board_version,
                    board_name,
                    units,
                })))
            }
            HeaderStage::End(header) => {
                if keyword(line).as_deref() != Some(END_HEADER) {
                    return Err(ParseError::MissingHeaderEnd);
                }
                self.data.conversion = Some(header.units.conversion());
                self.data.header = Some(header);
                Ok(State::Idle)
            }
        }
    }

    #[allow(clippy::float_cmp)]
    fn outline_record(&mut self, conversion: f64, thickness_read: bool, line: &str) -> State {
        if keyword(line).as_deref() == Some(END_BOARD_OUTLINE) {
            return State::Idle;
        }

        let mut record = Record::new(line);
        if thickness_read {
            // label x y angle
            let label = self.take_int(&mut record, "label");
            let x = self.take_float(&mut record, "x coordinate") * conversion;
            let y = self.take_float(&mut record, "y coordinate") * conversion;
            let angle = self.take_float(&mut record, "angle");
            if angle != 0.0 {
                self.warn(ParseWarning::ArcIgnored { angle });
            }
            self.push_point(label, Point2::new(x, y));
        } else {
            self.data.thickness = self.take_float(&mut record, "thickness");
        }

        State::Outline {
            conversion,
            thickness_read: true,
        }
    }

    fn push_point(&mut self, label: i64, point: Point2) {
        let index = match usize::try_from(label) {
            Ok(index) if label <= MAX_LABEL => index,
            _ => {
                self.warn(ParseWarning::InvalidLabel { label });
                return;
            }
        };
        if self.data.outlines.len() <= index {
            self.data.outlines.resize_with(index + 1, Outline2d::default);
        }
        self.data.outlines[index].vertices.push(point);
    }

    fn take_float(&mut self, record: &mut Record<'_>, field: &'static str) -> f64 {
        let token = record.next_token().unwrap_or_default();
        match token.parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                self.warn(ParseWarning::MalformedNumber {
                    field,
                    token: token.to_owned(),
                });
                0.0
            }
        }
    }

    fn take_int(&mut self, record: &mut Record<'_>, field: &'static str) -> i64 {
        let token = record.next_token().unwrap_or_default();
        token.parse::<i64>().unwrap_or_else(|_| {
            self.warn(ParseWarning::MalformedNumber {
                field,
                token: token.to_owned(),
            });
            0
        })
    }
}
