//! Shared fixtures for unit tests: a minimal feature with `u64` ids.

use crate::feature::{Entity, Feature};
use crate::gateway::PageInfo;
use crate::state::FeatureState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSummary {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDetail {
    pub id: u64,
    pub name: String,
}

impl Entity for TestSummary {
    type Id = u64;
    fn id(&self) -> &u64 {
        &self.id
    }
}

impl Entity for TestDetail {
    type Id = u64;
    fn id(&self) -> &u64 {
        &self.id
    }
}

#[derive(Debug, Clone)]
pub struct TestFeature;

impl Feature for TestFeature {
    const NAME: &'static str = "test";
    type Id = u64;
    type Summary = TestSummary;
    type Detail = TestDetail;
    type Auxiliary = Vec<String>;
    type Filters = ();
    type CreatePayload = String;
    type Changes = Option<String>;

    fn patch_detail(detail: &mut TestDetail, changes: &Option<String>) {
        if let Some(name) = changes {
            detail.name = name.clone();
        }
    }

    fn patch_summary(summary: &mut TestSummary, changes: &Option<String>) {
        if let Some(name) = changes {
            summary.name = name.clone();
        }
    }
}

pub type TestState = FeatureState<TestFeature>;

pub fn summary(id: u64) -> TestSummary {
    TestSummary {
        id,
        name: format!("summary-{id}"),
    }
}

pub fn detail(id: u64) -> TestDetail {
    TestDetail {
        id,
        name: format!("detail-{id}"),
    }
}

pub fn detail_named(id: u64, name: &str) -> TestDetail {
    TestDetail {
        id,
        name: name.to_string(),
    }
}

pub fn page_info(page_index: u32, page_size: u32, total_items: u64) -> PageInfo {
    PageInfo {
        page_index,
        page_size,
        total_items,
    }
}
