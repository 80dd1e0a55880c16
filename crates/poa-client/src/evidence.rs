//! Evidence files (`/evidencias`).
//!
//! Uploads are multipart; everything else is JSON. Stored files are served
//! outside the API prefix, see [`ApiClient::file_url`].

use std::path::{Path, PathBuf};

use poa_core::entities::Evidence;
use poa_core::normalize_id;
use poa_core::responses::ApiResponse;
use reqwest::multipart::{Form, Part};
use serde::Serialize;

use crate::http::with_query;
use crate::{ApiClient, ClientError, segment};

const ENTITY: &str = "evidencia";

/// A local file to attach to an activity.
#[derive(Debug, Clone)]
pub struct EvidenceUpload {
    pub path: PathBuf,
    pub activity: String,
    pub plan: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Editable metadata. File contents cannot be replaced in place.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EvidencePatch {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EvidencePatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

impl ApiClient {
    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn list_evidence(
        &self,
        activity: Option<&str>,
        plan: Option<&str>,
    ) -> Result<Vec<Evidence>, ClientError> {
        let path = with_query("/evidencias", &[("actividadId", activity), ("poaId", plan)]);
        self.list_records(&path, ENTITY).await
    }

    /// # Errors
    ///
    /// Transport, status (other than 404), or `success: false` failures.
    pub async fn get_evidence(&self, id: &str) -> Result<Option<Evidence>, ClientError> {
        self.fetch_record(&format!("/evidencias/{}", segment(id)), ENTITY)
            .await
    }

    /// Upload a file as evidence for an activity.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotAuthenticated`] without a token (checked before the
    /// file is read), [`ClientError::Io`] if the file cannot be read, plus
    /// the usual transport, status and rejection failures.
    pub async fn upload_evidence(&self, upload: &EvidenceUpload) -> Result<Evidence, ClientError> {
        const FALLBACK: &str = "Failed to upload evidencia";
        if self.token().is_none() {
            return Err(ClientError::NotAuthenticated);
        }
        let bytes = tokio::fs::read(&upload.path).await?;
        let file_name = file_name(&upload.path);
        tracing::debug!(file = %file_name, size = bytes.len(), "uploading evidence");

        let mut form = Form::new()
            .part("archivo", Part::bytes(bytes).file_name(file_name))
            .text("actividadId", upload.activity.clone())
            .text("poaId", upload.plan.clone());
        if let Some(name) = upload.name.as_ref().filter(|name| !name.is_empty()) {
            form = form.text("nombre", name.clone());
        }
        if let Some(description) = upload
            .description
            .as_ref()
            .filter(|description| !description.is_empty())
        {
            form = form.text("descripcion", description.clone());
        }

        let response: ApiResponse<Evidence> = self.send_multipart("/evidencias", form).await?;
        if !response.success {
            return Err(ClientError::Rejected(response.message_or(FALLBACK)));
        }
        response
            .into_data()
            .map(normalize_id)
            .ok_or_else(|| ClientError::Rejected(FALLBACK.into()))
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn update_evidence(
        &self,
        id: &str,
        patch: &EvidencePatch,
    ) -> Result<Evidence, ClientError> {
        self.update_record(&format!("/evidencias/{}", segment(id)), patch, ENTITY)
            .await
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn delete_evidence(&self, id: &str) -> Result<(), ClientError> {
        self.delete_record(&format!("/evidencias/{}", segment(id)), ENTITY)
            .await
    }

    /// Public URL of a stored evidence file:
    /// `<base without /api>/public/evidencia/<archivo>`.
    #[must_use]
    pub fn file_url(&self, stored_name: &str) -> String {
        let base = self.base_url();
        let root = base.strip_suffix("/api").unwrap_or(base);
        format!("{root}/public/evidencia/{}", segment(stored_name))
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| "archivo".to_string(), |name| name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn file_url_drops_api_prefix() {
        let client = ApiClient::with_base_url("http://localhost:3000/api").unwrap();
        assert_eq!(
            client.file_url("1717-acta.pdf"),
            "http://localhost:3000/public/evidencia/1717-acta.pdf"
        );
    }

    #[test]
    fn file_url_without_api_prefix_keeps_base() {
        let client = ApiClient::with_base_url("https://poa.example.edu").unwrap();
        assert_eq!(
            client.file_url("foto 1.png"),
            "https://poa.example.edu/public/evidencia/foto%201.png"
        );
    }

    #[test]
    fn patch_serializes_present_fields_only() {
        let patch = EvidencePatch {
            name: Some("Acta final".into()),
            description: None,
        };
        assert!(!patch.is_empty());
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"nombre": "Acta final"})
        );
    }

    #[tokio::test]
    async fn upload_requires_token_before_reading_file() {
        let client = ApiClient::with_base_url("http://127.0.0.1:9/api").unwrap();
        let upload = EvidenceUpload {
            path: PathBuf::from("/definitely/missing.pdf"),
            activity: "a1".into(),
            plan: "p1".into(),
            name: None,
            description: None,
        };
        let err = client.upload_evidence(&upload).await.unwrap_err();
        assert!(matches!(err, ClientError::NotAuthenticated));
    }
}
