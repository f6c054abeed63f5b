use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    pub section: String,
}

/// Board contents used when neither the remote nor the local cache has one.
pub fn default_projects() -> Vec<Project> {
    vec![
        Project {
            id: "1".to_string(),
            title: "Lab Portfolio".to_string(),
            link: Some("https://lab.animeshvarma.dev".to_string()),
            desc: Some("The interface you are currently looking at.".to_string()),
            section: "ongoing".to_string(),
        },
        Project {
            id: "2".to_string(),
            title: "Upload Service".to_string(),
            link: Some("https://upload.animeshvarma.dev".to_string()),
            desc: Some("Secure file transmission protocol.".to_string()),
            section: "completed".to_string(),
        },
    ]
}
