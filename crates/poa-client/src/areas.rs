//! Administrative areas (`/areas`).

use poa_core::entities::Area;
use serde::Serialize;

use crate::{ApiClient, ClientError, segment};

const ENTITY: &str = "area";

impl ApiClient {
    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn list_areas(&self) -> Result<Vec<Area>, ClientError> {
        self.list_records("/areas", ENTITY).await
    }

    /// # Errors
    ///
    /// Transport, status (other than 404), or `success: false` failures.
    pub async fn get_area(&self, id: &str) -> Result<Option<Area>, ClientError> {
        self.fetch_record(&format!("/areas/{}", segment(id)), ENTITY).await
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn create_area<B: Serialize + ?Sized>(&self, area: &B) -> Result<Area, ClientError> {
        self.create_record("/areas", area, ENTITY).await
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn update_area<B: Serialize + ?Sized>(
        &self,
        id: &str,
        changes: &B,
    ) -> Result<Area, ClientError> {
        self.update_record(&format!("/areas/{}", segment(id)), changes, ENTITY)
            .await
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn delete_area(&self, id: &str) -> Result<(), ClientError> {
        self.delete_record(&format!("/areas/{}", segment(id)), ENTITY).await
    }
}
