//! Reference data (kitchens, categories, products, tables, ...) and staff
//! accounts, managed through plain CRUD screens

use serde::Serialize;
use shared::{
    ApiItem, ApiList, Badge, CatalogEntry, CatalogResource, Kitchen, ListQuery, Page, Staff,
    StaffInput,
};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::external::{segment, BackofficeApi};
use crate::middleware::StaffToken;

const STAFF_PATH: &str = "auth/staff";

#[derive(Clone)]
pub struct CatalogService {
    api: BackofficeApi,
}

/// Row of a reference-data table
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRow {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    #[serde(flatten)]
    pub entry: CatalogEntry,
}

impl From<CatalogEntry> for CatalogRow {
    fn from(entry: CatalogEntry) -> Self {
        Self {
            id: entry.id.clone(),
            label: entry.label(),
            badge: entry.badge(),
            entry,
        }
    }
}

impl CatalogService {
    pub fn new(api: BackofficeApi) -> Self {
        Self { api }
    }

    pub async fn list(
        &self,
        token: &StaffToken,
        resource: CatalogResource,
        query: &ListQuery,
    ) -> AppResult<Page<CatalogRow>> {
        let entries: ApiList<CatalogEntry> = self
            .api
            .get(token, resource.path(), &query.to_pairs())
            .await?;
        Ok(entries.into_page().map(CatalogRow::from))
    }

    pub async fn get(
        &self,
        token: &StaffToken,
        resource: CatalogResource,
        id: &str,
    ) -> AppResult<CatalogEntry> {
        let entry: ApiItem<CatalogEntry> = self
            .api
            .get(token, &format!("{}/{}", resource.path(), segment(id)?), &[])
            .await?;
        Ok(entry.into_inner())
    }

    pub async fn create(
        &self,
        token: &StaffToken,
        resource: CatalogResource,
        body: serde_json::Value,
    ) -> AppResult<serde_json::Value> {
        require_object(&body)?;
        tracing::info!("Creating {} entry", resource.slug());
        self.api.post(token, resource.path(), &body).await
    }

    pub async fn update(
        &self,
        token: &StaffToken,
        resource: CatalogResource,
        id: &str,
        body: serde_json::Value,
    ) -> AppResult<serde_json::Value> {
        require_object(&body)?;
        self.api
            .put(token, &format!("{}/{}", resource.path(), segment(id)?), &body)
            .await
    }

    pub async fn delete(
        &self,
        token: &StaffToken,
        resource: CatalogResource,
        id: &str,
    ) -> AppResult<serde_json::Value> {
        self.api
            .delete(token, &format!("{}/{}", resource.path(), segment(id)?))
            .await
    }

    /// Kitchens for the pickers of the transfer form and the kitchen board
    pub async fn kitchens(&self, token: &StaffToken) -> AppResult<Vec<Kitchen>> {
        let kitchens: ApiList<Kitchen> = self
            .api
            .get(token, CatalogResource::Kitchen.path(), &[])
            .await?;
        Ok(kitchens.into_vec())
    }

    // ------------------------------------------------------------------------
    // Staff
    // ------------------------------------------------------------------------

    pub async fn staff(&self, token: &StaffToken, query: &ListQuery) -> AppResult<Page<Staff>> {
        let staff: ApiList<Staff> = self.api.get(token, STAFF_PATH, &query.to_pairs()).await?;
        Ok(staff.into_page())
    }

    pub async fn create_staff(&self, token: &StaffToken, input: StaffInput) -> AppResult<serde_json::Value> {
        input.validate()?;
        if input.password.is_none() {
            return Err(AppError::Validation {
                field: "password".to_string(),
                message: "Password is required".to_string(),
            });
        }
        tracing::info!("Creating staff account for {}", input.email);
        self.api.post(token, STAFF_PATH, &input).await
    }

    pub async fn update_staff(
        &self,
        token: &StaffToken,
        staff_id: &str,
        input: StaffInput,
    ) -> AppResult<serde_json::Value> {
        input.validate()?;
        self.api
            .put(token, &format!("{}/{}", STAFF_PATH, segment(staff_id)?), &input)
            .await
    }

    pub async fn delete_staff(&self, token: &StaffToken, staff_id: &str) -> AppResult<serde_json::Value> {
        self.api
            .delete(token, &format!("{}/{}", STAFF_PATH, segment(staff_id)?))
            .await
    }
}

fn require_object(body: &serde_json::Value) -> AppResult<()> {
    if body.as_object().map_or(true, |o| o.is_empty()) {
        return Err(AppError::Validation {
            field: "body".to_string(),
            message: "Request body must be a non-empty JSON object".to_string(),
        });
    }
    Ok(())
}
