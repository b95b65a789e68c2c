//! Tracks: predefined task lists applied to opportunities and cases

use serde::{Deserialize, Serialize};

use core_kernel::payload::lenient_option;
use core_kernel::TrackId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    #[serde(default, deserialize_with = "lenient_option")]
    pub id: Option<TrackId>,
    #[serde(default)]
    pub description: Option<String>,
    /// `OPPORTUNITY` or `KASE`
    #[serde(default)]
    pub capture_rule: Option<String>,
}

impl Track {
    pub fn applies_to_opportunities(&self) -> bool {
        self.capture_rule.as_deref() == Some("OPPORTUNITY")
    }

    pub fn applies_to_cases(&self) -> bool {
        self.capture_rule.as_deref() == Some("KASE")
    }
}
