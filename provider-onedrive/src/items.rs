//! Drive item model and Graph request shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for one drive entry (file or folder).
///
/// Exactly one of the `folder`/`file` facets is present on well-formed
/// entries; the helpers below are how operations gate on entry kind.
#[derive(Debug, Clone, Deserialize)]
pub struct DriveItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub folder: Option<FolderFacet>,
    #[serde(default)]
    pub file: Option<FileFacet>,
    #[serde(rename = "parentReference", default)]
    pub parent_reference: Option<ParentReference>,
    #[serde(rename = "lastModifiedDateTime", default)]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(rename = "webUrl", default)]
    pub web_url: Option<String>,
}

impl DriveItem {
    pub fn is_folder(&self) -> bool {
        self.folder.is_some()
    }

    pub fn is_file(&self) -> bool {
        self.file.is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FolderFacet {
    #[serde(rename = "childCount", default, skip_serializing)]
    pub child_count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileFacet {
    #[serde(rename = "mimeType", default)]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ParentReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "driveId", default, skip_serializing_if = "Option::is_none")]
    pub drive_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Request body for folder creation.
#[derive(Debug, Serialize)]
pub(crate) struct NewFolder<'a> {
    pub name: &'a str,
    pub folder: FolderFacet,
    /// Fail on name collision rather than rename or replace
    #[serde(rename = "@microsoft.graph.conflictBehavior")]
    pub conflict_behavior: &'a str,
}

/// Request body for move/rename.
#[derive(Debug, Serialize)]
pub(crate) struct ItemUpdate<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(rename = "parentReference", skip_serializing_if = "Option::is_none")]
    pub parent_reference: Option<ParentReference>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_item_folder_deserialization() {
        let json = r#"{
            "id": "item-1",
            "name": "Documents",
            "size": 4096,
            "folder": {"childCount": 12},
            "parentReference": {"id": "root-id", "driveId": "drive-1", "path": "/drive/root:"},
            "lastModifiedDateTime": "2024-06-01T12:30:00Z",
            "webUrl": "https://onedrive.live.com/..."
        }"#;

        let item: DriveItem = serde_json::from_str(json).unwrap();
        assert!(item.is_folder());
        assert!(!item.is_file());
        assert_eq!(item.folder.as_ref().unwrap().child_count, Some(12));
        assert_eq!(
            item.parent_reference.as_ref().unwrap().id.as_deref(),
            Some("root-id")
        );
        assert!(item.last_modified.is_some());
    }

    #[test]
    fn test_drive_item_file_deserialization() {
        let json = r#"{
            "id": "item-2",
            "name": "report.pdf",
            "size": 123456,
            "file": {"mimeType": "application/pdf"}
        }"#;

        let item: DriveItem = serde_json::from_str(json).unwrap();
        assert!(item.is_file());
        assert!(!item.is_folder());
        assert_eq!(
            item.file.as_ref().unwrap().mime_type.as_deref(),
            Some("application/pdf")
        );
    }

    #[test]
    fn test_new_folder_serialization() {
        let body = NewFolder {
            name: "Reports",
            folder: FolderFacet::default(),
            conflict_behavior: "fail",
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["name"], "Reports");
        assert_eq!(value["folder"], serde_json::json!({}));
        assert_eq!(value["@microsoft.graph.conflictBehavior"], "fail");
    }

    #[test]
    fn test_item_update_skips_absent_fields() {
        let update = ItemUpdate {
            name: Some("renamed.txt"),
            parent_reference: None,
        };

        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["name"], "renamed.txt");
        assert!(value.get("parentReference").is_none());
    }

    #[test]
    fn test_item_update_move_serialization() {
        let update = ItemUpdate {
            name: None,
            parent_reference: Some(ParentReference {
                id: Some("new-parent".to_string()),
                drive_id: None,
                path: None,
            }),
        };

        let value = serde_json::to_value(&update).unwrap();
        assert!(value.get("name").is_none());
        assert_eq!(value["parentReference"]["id"], "new-parent");
        assert!(value["parentReference"].get("driveId").is_none());
    }
}
