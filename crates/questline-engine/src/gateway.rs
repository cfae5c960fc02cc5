//! Data-access collaborator boundary.
//!
//! The engine never performs I/O itself; it calls a [`Gateway`] and turns
//! the results into terminal events. Transport (HTTP in the deployed
//! system) lives behind this trait and is out of scope here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::feature::Feature;

/// Pagination metadata reported by the collaborator alongside a list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// 1-based page index.
    pub page_index: u32,
    /// Requested page size.
    pub page_size: u32,
    /// Total matching items across all pages.
    pub total_items: u64,
}

/// One page of summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    /// Items in presentation order.
    pub items: Vec<T>,
    /// Pagination metadata.
    pub page: PageInfo,
}

/// Asynchronous data access for one feature.
///
/// Every method maps to exactly one remote operation. Implementations must
/// return an error rather than panic; the orchestrator normalizes errors
/// into `Failure` events.
#[async_trait]
pub trait Gateway<F: Feature>: Send + Sync {
    /// Fetch a page of summaries matching `filters`.
    async fn list(&self, filters: &F::Filters) -> Result<PageResult<F::Summary>, GatewayError>;

    /// Fetch one detail entity.
    async fn get_by_id(&self, id: &F::Id) -> Result<F::Detail, GatewayError>;

    /// Fetch the feature's static reference data.
    async fn fetch_auxiliary(&self) -> Result<F::Auxiliary, GatewayError>;

    /// Create a new entity, returning the created detail record.
    async fn create(&self, payload: &F::CreatePayload) -> Result<F::Detail, GatewayError>;

    /// Apply a change set to an existing entity.
    async fn update(&self, id: &F::Id, changes: &F::Changes) -> Result<F::Detail, GatewayError>;

    /// Delete an entity.
    async fn delete(&self, id: &F::Id) -> Result<(), GatewayError>;
}
