//! Annual operational plans (`/poas`) and their embedded activities.
//!
//! Activities have no endpoint of their own: adding, changing or removing
//! one answers with the whole updated plan.

use poa_core::entities::Plan;
use poa_core::normalize_id;
use poa_core::responses::ApiResponse;
use reqwest::Method;
use serde::Serialize;

use crate::{ApiClient, ClientError, segment};

const ENTITY: &str = "POA";

fn plan_path(id: &str) -> String {
    format!("/poas/{}", segment(id))
}

fn activity_path(plan_id: &str, activity_id: &str) -> String {
    format!("/poas/{}/actividades/{}", segment(plan_id), segment(activity_id))
}

impl ApiClient {
    /// All plans visible to the current token. Plans without activities
    /// come back with an empty list.
    ///
    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn list_plans(&self) -> Result<Vec<Plan>, ClientError> {
        self.list_records("/poas", ENTITY).await
    }

    /// # Errors
    ///
    /// Transport, status (other than 404), or `success: false` failures.
    pub async fn get_plan(&self, id: &str) -> Result<Option<Plan>, ClientError> {
        self.fetch_record(&plan_path(id), ENTITY).await
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn create_plan<B: Serialize + ?Sized>(&self, plan: &B) -> Result<Plan, ClientError> {
        self.create_record("/poas", plan, ENTITY).await
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn update_plan<B: Serialize + ?Sized>(
        &self,
        id: &str,
        changes: &B,
    ) -> Result<Plan, ClientError> {
        self.update_record(&plan_path(id), changes, ENTITY).await
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn delete_plan(&self, id: &str) -> Result<(), ClientError> {
        self.delete_record(&plan_path(id), ENTITY).await
    }

    /// Append an activity; returns the updated plan.
    ///
    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn add_activity<B: Serialize + ?Sized>(
        &self,
        plan_id: &str,
        activity: &B,
    ) -> Result<Plan, ClientError> {
        let path = format!("{}/actividades", plan_path(plan_id));
        self.write_record(Method::POST, &path, activity, "Failed to add actividad")
            .await
    }

    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn update_activity<B: Serialize + ?Sized>(
        &self,
        plan_id: &str,
        activity_id: &str,
        changes: &B,
    ) -> Result<Plan, ClientError> {
        self.write_record(
            Method::PUT,
            &activity_path(plan_id, activity_id),
            changes,
            "Failed to update actividad",
        )
        .await
    }

    /// Remove an activity; returns the plan without it.
    ///
    /// # Errors
    ///
    /// Transport, status, or `success: false` failures.
    pub async fn delete_activity(
        &self,
        plan_id: &str,
        activity_id: &str,
    ) -> Result<Plan, ClientError> {
        const FALLBACK: &str = "Failed to delete actividad";
        let response: ApiResponse<Plan> =
            self.delete_json(&activity_path(plan_id, activity_id)).await?;
        if !response.success {
            return Err(ClientError::Rejected(response.message_or(FALLBACK)));
        }
        response
            .into_data()
            .map(normalize_id)
            .ok_or_else(|| ClientError::Rejected(FALLBACK.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_paths_are_encoded() {
        assert_eq!(activity_path("p1", "a 1"), "/poas/p1/actividades/a%201");
        assert_eq!(plan_path("p/1"), "/poas/p%2F1");
    }
}
