// src/services/search.rs

use std::time::Duration;

use serde_json::json;

use crate::{common::error::AppError, models::tenancy::Tenant};

// Cliente do serviço externo de descoberta/indexação. Todas as chamadas
// são disparadas via fire_and_forget pelos serviços: nenhuma falha daqui
// chega ao chamador da operação que disparou.
#[derive(Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    base_url: Option<String>,
}

impl SearchClient {
    pub fn new(base_url: Option<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self { http, base_url })
    }

    // Sem URL configurada o cliente vira no-op (ambiente de dev/teste).
    #[cfg(test)]
    pub(crate) fn disabled() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: None,
        }
    }

    pub async fn register_tenant(&self, tenant: &Tenant) -> Result<(), AppError> {
        let Some(base_url) = &self.base_url else {
            tracing::debug!(
                "SEARCH_INGEST_URL não configurada; ignorando registro do tenant {}",
                tenant.slug
            );
            return Ok(());
        };

        self.http
            .post(format!("{base_url}/tenants"))
            .json(&json!({
                "tenantId": tenant.id,
                "slug": tenant.slug,
                "name": tenant.name,
            }))
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("falha ao registrar tenant no serviço de busca: {e}"))?
            .error_for_status()
            .map_err(|e| anyhow::anyhow!("serviço de busca respondeu erro: {e}"))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[tokio::test]
    async fn cliente_desabilitado_e_noop() {
        let client = SearchClient::disabled();
        let tenant = Tenant {
            id: Uuid::new_v4(),
            slug: "alice".into(),
            custom_domain: None,
            custom_domain_verified: false,
            theme: "classic".into(),
            name: "Alice's Blog".into(),
            description: None,
            logo: None,
            owner_user_id: Uuid::new_v4(),
            owner_username: "alice".into(),
            database_name: "blog_tenant_x".into(),
            status: crate::models::tenancy::TenantStatus::Active,
            plan: crate::models::tenancy::TenantPlan::Free,
            deleted_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(client.register_tenant(&tenant).await.is_ok());
    }
}
