//! Objectives (`/objetivos`), optionally filtered by line.

use poa_core::entities::Objective;
use serde::Serialize;

use crate::http::with_query;
use crate::{ApiClient, ClientError, segment};

const ENTITY: &str = "objetivo";

impl ApiClient {
    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn list_objectives(&self, line: Option<&str>) -> Result<Vec<Objective>, ClientError> {
        let path = with_query("/objetivos", &[("lineaId", line)]);
        self.list_records(&path, ENTITY).await
    }

    /// # Errors
    ///
    /// Transport, status (other than 404), or `success: false` failures.
    pub async fn get_objective(&self, id: &str) -> Result<Option<Objective>, ClientError> {
        self.fetch_record(&format!("/objetivos/{}", segment(id)), ENTITY)
            .await
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn create_objective<B: Serialize + ?Sized>(
        &self,
        objective: &B,
    ) -> Result<Objective, ClientError> {
        self.create_record("/objetivos", objective, ENTITY).await
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn update_objective<B: Serialize + ?Sized>(
        &self,
        id: &str,
        changes: &B,
    ) -> Result<Objective, ClientError> {
        self.update_record(&format!("/objetivos/{}", segment(id)), changes, ENTITY)
            .await
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn delete_objective(&self, id: &str) -> Result<(), ClientError> {
        self.delete_record(&format!("/objetivos/{}", segment(id)), ENTITY)
            .await
    }
}
