//! Indicators (`/indicadores`), filterable by objective and line.

use poa_core::entities::Indicator;
use serde::Serialize;

use crate::http::with_query;
use crate::{ApiClient, ClientError, segment};

const ENTITY: &str = "indicador";

/// Optional filters for [`ApiClient::list_indicators`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IndicatorFilter<'a> {
    pub objective: Option<&'a str>,
    pub line: Option<&'a str>,
}

impl ApiClient {
    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn list_indicators(
        &self,
        filter: IndicatorFilter<'_>,
    ) -> Result<Vec<Indicator>, ClientError> {
        let path = with_query(
            "/indicadores",
            &[("objetivoId", filter.objective), ("lineaId", filter.line)],
        );
        self.list_records(&path, ENTITY).await
    }

    /// # Errors
    ///
    /// Transport, status (other than 404), or `success: false` failures.
    pub async fn get_indicator(&self, id: &str) -> Result<Option<Indicator>, ClientError> {
        self.fetch_record(&format!("/indicadores/{}", segment(id)), ENTITY)
            .await
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn create_indicator<B: Serialize + ?Sized>(
        &self,
        indicator: &B,
    ) -> Result<Indicator, ClientError> {
        self.create_record("/indicadores", indicator, ENTITY).await
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn update_indicator<B: Serialize + ?Sized>(
        &self,
        id: &str,
        changes: &B,
    ) -> Result<Indicator, ClientError> {
        self.update_record(&format!("/indicadores/{}", segment(id)), changes, ENTITY)
            .await
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn delete_indicator(&self, id: &str) -> Result<(), ClientError> {
        self.delete_record(&format!("/indicadores/{}", segment(id)), ENTITY)
            .await
    }
}
