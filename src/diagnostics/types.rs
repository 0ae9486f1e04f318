// Fault types recorded by the reporter

use serde::Serialize;

/// Category of a recovered fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// Runner-supplied data could not be serialized into a custom field or reason
    Serialization,
    /// Attachment directory could not be read (other than "not found")
    Attachments,
    /// Supplemental store was unavailable
    Store,
    /// Annotation call with no case to attach it to
    Annotation,
    /// Upload client returned an error
    Upload,
}

impl FaultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultKind::Serialization => "serialization",
            FaultKind::Attachments => "attachments",
            FaultKind::Store => "store",
            FaultKind::Annotation => "annotation",
            FaultKind::Upload => "upload",
        }
    }
}

/// A single recovered fault
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fault {
    pub kind: FaultKind,
    pub case_id: Option<String>,
    pub message: String,
}
