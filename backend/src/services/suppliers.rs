//! Supplier directory

use serde::Serialize;
use shared::{
    ApiItem, ApiList, Badge, Badged, ListQuery, Page, Supplier, SupplierInput, SupplierStatus,
};
use validator::Validate;

use crate::error::AppResult;
use crate::external::{segment, BackofficeApi};
use crate::middleware::StaffToken;

#[derive(Clone)]
pub struct SupplierService {
    api: BackofficeApi,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierRow {
    #[serde(flatten)]
    pub supplier: Supplier,
    pub badge: Badge,
}

impl SupplierService {
    pub fn new(api: BackofficeApi) -> Self {
        Self { api }
    }

    pub async fn list(&self, token: &StaffToken, query: &ListQuery) -> AppResult<Page<SupplierRow>> {
        let suppliers: ApiList<Supplier> = self.api.get(token, "supplier", &query.to_pairs()).await?;
        Ok(suppliers.into_page().map(|supplier| SupplierRow {
            badge: supplier.status.badge(),
            supplier,
        }))
    }

    /// Active suppliers only, for the purchase form's picker
    pub async fn options(&self, token: &StaffToken) -> AppResult<Vec<Supplier>> {
        let suppliers: ApiList<Supplier> = self.api.get(token, "supplier", &[]).await?;
        Ok(suppliers
            .into_vec()
            .into_iter()
            .filter(|s| s.status == SupplierStatus::Active)
            .collect())
    }

    pub async fn get(&self, token: &StaffToken, supplier_id: &str) -> AppResult<Supplier> {
        let supplier: ApiItem<Supplier> = self
            .api
            .get(token, &format!("supplier/{}", segment(supplier_id)?), &[])
            .await?;
        Ok(supplier.into_inner())
    }

    pub async fn create(&self, token: &StaffToken, input: SupplierInput) -> AppResult<serde_json::Value> {
        input.validate()?;
        tracing::info!("Creating supplier '{}' ({})", input.name, input.code);
        self.api.post(token, "supplier", &input).await
    }

    pub async fn update(
        &self,
        token: &StaffToken,
        supplier_id: &str,
        input: SupplierInput,
    ) -> AppResult<serde_json::Value> {
        input.validate()?;
        self.api
            .put(token, &format!("supplier/{}", segment(supplier_id)?), &input)
            .await
    }

    pub async fn delete(&self, token: &StaffToken, supplier_id: &str) -> AppResult<serde_json::Value> {
        let deleted = self
            .api
            .delete(token, &format!("supplier/{}", segment(supplier_id)?))
            .await?;
        // Purchase rows show the supplier name
        self.api.invalidate("purchase").await;
        Ok(deleted)
    }
}
