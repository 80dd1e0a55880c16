//! Careers (`/carreras`), optionally filtered by faculty.

use poa_core::entities::Career;
use serde::Serialize;

use crate::http::with_query;
use crate::{ApiClient, ClientError, segment};

const ENTITY: &str = "carrera";

impl ApiClient {
    /// List careers, restricted to one faculty when `faculty` is given.
    ///
    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn list_careers(&self, faculty: Option<&str>) -> Result<Vec<Career>, ClientError> {
        let path = with_query("/carreras", &[("facultad", faculty)]);
        self.list_records(&path, ENTITY).await
    }

    /// # Errors
    ///
    /// Transport, status (other than 404), or `success: false` failures.
    pub async fn get_career(&self, id: &str) -> Result<Option<Career>, ClientError> {
        self.fetch_record(&format!("/carreras/{}", segment(id)), ENTITY)
            .await
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn create_career<B: Serialize + ?Sized>(
        &self,
        career: &B,
    ) -> Result<Career, ClientError> {
        self.create_record("/carreras", career, ENTITY).await
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn update_career<B: Serialize + ?Sized>(
        &self,
        id: &str,
        changes: &B,
    ) -> Result<Career, ClientError> {
        self.update_record(&format!("/carreras/{}", segment(id)), changes, ENTITY)
            .await
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn delete_career(&self, id: &str) -> Result<(), ClientError> {
        self.delete_record(&format!("/carreras/{}", segment(id)), ENTITY)
            .await
    }
}
