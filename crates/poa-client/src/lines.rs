//! Strategic lines (`/lineas`).

use poa_core::entities::StrategicLine;
use serde::Serialize;

use crate::{ApiClient, ClientError, segment};

const ENTITY: &str = "linea";

impl ApiClient {
    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn list_lines(&self) -> Result<Vec<StrategicLine>, ClientError> {
        self.list_records("/lineas", ENTITY).await
    }

    /// # Errors
    ///
    /// Transport, status (other than 404), or `success: false` failures.
    pub async fn get_line(&self, id: &str) -> Result<Option<StrategicLine>, ClientError> {
        self.fetch_record(&format!("/lineas/{}", segment(id)), ENTITY).await
    }

    /// Create a line.
    ///
    /// The server echoes the stored record; one missing its name is treated
    /// as a failed write.
    ///
    /// # Errors
    ///
    /// Transport, status, or `success: false` failures, and
    /// [`ClientError::Rejected`] for an incomplete echo.
    pub async fn create_line<B: Serialize + ?Sized>(
        &self,
        line: &B,
    ) -> Result<StrategicLine, ClientError> {
        let created: StrategicLine = self.create_record("/lineas", line, ENTITY).await?;
        if created.name.trim().is_empty() {
            tracing::error!(id = created.key.resolve(), "incomplete line returned by server");
            return Err(ClientError::Rejected(
                "Incomplete linea data returned from server".into(),
            ));
        }
        Ok(created)
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn update_line<B: Serialize + ?Sized>(
        &self,
        id: &str,
        changes: &B,
    ) -> Result<StrategicLine, ClientError> {
        self.update_record(&format!("/lineas/{}", segment(id)), changes, ENTITY)
            .await
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn delete_line(&self, id: &str) -> Result<(), ClientError> {
        self.delete_record(&format!("/lineas/{}", segment(id)), ENTITY)
            .await
    }
}
