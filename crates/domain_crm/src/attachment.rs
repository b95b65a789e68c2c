//! Files attached to history items

use serde::{Deserialize, Serialize};

use core_kernel::payload::lenient_option;
use core_kernel::AttachmentId;

/// Read-only attachment metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default, deserialize_with = "lenient_option")]
    pub id: Option<AttachmentId>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
}
