//! Faculties (`/facultades`).

use poa_core::entities::Faculty;
use serde::Serialize;

use crate::{ApiClient, ClientError, segment};

const ENTITY: &str = "facultad";

impl ApiClient {
    /// List every faculty. Public; works without a token.
    ///
    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn list_faculties(&self) -> Result<Vec<Faculty>, ClientError> {
        self.list_records("/facultades", ENTITY).await
    }

    /// # Errors
    ///
    /// Transport, status (other than 404), or `success: false` failures.
    pub async fn get_faculty(&self, id: &str) -> Result<Option<Faculty>, ClientError> {
        self.fetch_record(&format!("/facultades/{}", segment(id)), ENTITY)
            .await
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn create_faculty<B: Serialize + ?Sized>(
        &self,
        faculty: &B,
    ) -> Result<Faculty, ClientError> {
        self.create_record("/facultades", faculty, ENTITY).await
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn update_faculty<B: Serialize + ?Sized>(
        &self,
        id: &str,
        changes: &B,
    ) -> Result<Faculty, ClientError> {
        self.update_record(&format!("/facultades/{}", segment(id)), changes, ENTITY)
            .await
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn delete_faculty(&self, id: &str) -> Result<(), ClientError> {
        self.delete_record(&format!("/facultades/{}", segment(id)), ENTITY)
            .await
    }
}
