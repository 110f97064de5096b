//! Outbound request bodies and the form inputs they are built from.

use serde::{Deserialize, Serialize};

/// Form input for the create-post flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatePostInput {
    pub content: String,
    pub title: Option<String>,
    pub studio_id: Option<String>,
}

/// Body of `POST /api/posts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub studio_id: Option<String>,
}

impl From<CreatePostInput> for CreatePostRequest {
    /// The title is trimmed and dropped when nothing is left.
    fn from(input: CreatePostInput) -> Self {
        let title = input
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Self {
            content: input.content,
            title,
            studio_id: input.studio_id,
        }
    }
}

/// Form input for the create-studio flow.
///
/// `private` is the older spelling of `is_private`; when set it also decides
/// `isPublic` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateStudioInput {
    pub name: String,
    pub description: String,
    pub slug: Option<String>,
    pub category: Option<String>,
    pub is_private: Option<bool>,
    pub private: Option<bool>,
    pub studio_rules: Option<String>,
}

/// Body of `POST /api/studios`.
///
/// Carries both `isPrivate` and `isPublic` because the API accepts either.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudioRequest {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub category: String,
    pub is_private: bool,
    pub studio_rules: String,
    pub is_public: bool,
}

impl From<CreateStudioInput> for CreateStudioRequest {
    fn from(input: CreateStudioInput) -> Self {
        let is_private = input.is_private.or(input.private).unwrap_or(false);
        let is_public = match input.private {
            Some(private) => !private,
            None => !is_private,
        };

        Self {
            name: input.name,
            description: input.description,
            slug: input.slug,
            category: input.category.unwrap_or_default(),
            is_private,
            studio_rules: input.studio_rules.unwrap_or_default(),
            is_public,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_title_is_omitted() {
        let request = CreatePostRequest::from(CreatePostInput {
            content: "Hello".to_string(),
            title: Some("  ".to_string()),
            studio_id: None,
        });
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"content": "Hello"}));
    }

    #[test]
    fn test_title_is_trimmed() {
        let request = CreatePostRequest::from(CreatePostInput {
            content: "Body".to_string(),
            title: Some("  Villa Savoye  ".to_string()),
            studio_id: Some("s1".to_string()),
        });
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"content": "Body", "title": "Villa Savoye", "studioId": "s1"})
        );
    }

    #[test]
    fn test_legacy_private_flag_sets_both_fields() {
        let request = CreateStudioRequest::from(CreateStudioInput {
            name: "Arch".to_string(),
            description: "d".to_string(),
            private: Some(true),
            ..Default::default()
        });
        assert!(request.is_private);
        assert!(!request.is_public);
    }

    #[test]
    fn test_studio_defaults() {
        let request = CreateStudioRequest::from(CreateStudioInput {
            name: "Arch".to_string(),
            description: "d".to_string(),
            ..Default::default()
        });
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "name": "Arch",
                "description": "d",
                "category": "",
                "isPrivate": false,
                "studioRules": "",
                "isPublic": true
            })
        );
    }

    #[test]
    fn test_is_private_without_legacy_flag() {
        let request = CreateStudioRequest::from(CreateStudioInput {
            name: "Arch".to_string(),
            description: "d".to_string(),
            is_private: Some(true),
            ..Default::default()
        });
        assert!(request.is_private);
        assert!(!request.is_public);
    }

    #[test]
    fn test_legacy_flag_wins_for_is_public() {
        let request = CreateStudioRequest::from(CreateStudioInput {
            name: "Arch".to_string(),
            description: "d".to_string(),
            is_private: Some(true),
            private: Some(false),
            ..Default::default()
        });
        assert!(request.is_private);
        assert!(request.is_public);
    }
}
