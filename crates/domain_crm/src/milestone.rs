//! Sales pipeline milestones

use serde::{Deserialize, Serialize};

use core_kernel::payload::lenient_option;
use core_kernel::MilestoneId;

/// A stage of the sales pipeline, listed at `/api/opportunity/milestones`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    #[serde(default, deserialize_with = "lenient_option")]
    pub id: Option<MilestoneId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Win probability in percent
    #[serde(default, deserialize_with = "lenient_option")]
    pub probability: Option<u8>,
    /// Whether opportunities at this milestone are closed
    #[serde(default, deserialize_with = "lenient_option")]
    pub complete: Option<bool>,
}

impl Milestone {
    pub fn new(id: MilestoneId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quoted_fields() {
        let milestone: Milestone = serde_json::from_value(json!({
            "id": "2", "name": "Won", "probability": "100", "complete": "true"
        }))
        .unwrap();

        assert_eq!(milestone.id, Some(MilestoneId::new(2)));
        assert_eq!(milestone.probability, Some(100));
        assert!(milestone.is_complete());
    }
}
