use thiserror::Error;

/// A recovered anomaly met while reading a board file.
///
/// Parsing continues after each of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseWarning {
    #[error("'{name}' not understood section{}", unterminated_note(.terminated))]
    UnknownSection { name: String, terminated: bool },

    #[error("malformed {field} '{token}', using 0")]
    MalformedNumber { field: &'static str, token: String },

    #[error("arc or circle ignored, treating as line ({angle} degrees)")]
    ArcIgnored { angle: f64 },

    #[error("outline label {label} out of range, point skipped")]
    InvalidLabel { label: i64 },
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn unterminated_note(terminated: &bool) -> &'static str {
    if *terminated {
        ""
    } else {
        " (stream ended before its terminator)"
    }
}
