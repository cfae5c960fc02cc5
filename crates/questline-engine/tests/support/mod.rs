//! Test support: a minimal "quests" feature and a scripted gateway whose
//! per-call delays and outcomes are queued up front.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use questline_engine::{
    Entity, Feature, Filters, Gateway, GatewayError, PageInfo, PageResult,
};

// ─── Feature ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestSummary {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestDetail {
    pub id: u64,
    pub name: String,
}

impl Entity for QuestSummary {
    type Id = u64;
    fn id(&self) -> &u64 {
        &self.id
    }
}

impl Entity for QuestDetail {
    type Id = u64;
    fn id(&self) -> &u64 {
        &self.id
    }
}

#[derive(Debug, Clone)]
pub struct Quests;

impl Feature for Quests {
    const NAME: &'static str = "quests";
    type Id = u64;
    type Summary = QuestSummary;
    type Detail = QuestDetail;
    type Auxiliary = Vec<String>;
    type Filters = Filters;
    type CreatePayload = String;
    type Changes = Option<String>;

    fn patch_detail(detail: &mut QuestDetail, changes: &Option<String>) {
        if let Some(name) = changes {
            detail.name = name.clone();
        }
    }

    fn patch_summary(summary: &mut QuestSummary, changes: &Option<String>) {
        if let Some(name) = changes {
            summary.name = name.clone();
        }
    }
}

pub fn summary(id: u64) -> QuestSummary {
    QuestSummary {
        id,
        name: format!("quest-{id}"),
    }
}

pub fn detail(id: u64) -> QuestDetail {
    QuestDetail {
        id,
        name: format!("quest-{id}"),
    }
}

pub fn page_of(ids: impl IntoIterator<Item = u64>, page_index: u32, page_size: u32, total_items: u64) -> PageResult<QuestSummary> {
    PageResult {
        items: ids.into_iter().map(summary).collect(),
        page: PageInfo {
            page_index,
            page_size,
            total_items,
        },
    }
}

// ─── Scripted gateway ────────────────────────────────────────────

type Step<T> = (Duration, Result<T, GatewayError>);

#[derive(Default)]
struct Script {
    list: VecDeque<Step<PageResult<QuestSummary>>>,
    detail: VecDeque<Step<QuestDetail>>,
    auxiliary: VecDeque<Step<Vec<String>>>,
    create: VecDeque<Step<QuestDetail>>,
    update: VecDeque<Step<QuestDetail>>,
    delete: VecDeque<Step<()>>,
}

/// Gateway whose responses are scripted per call, in order. When a script
/// queue is empty the call succeeds immediately with data derived from its
/// arguments.
#[derive(Default)]
pub struct ScriptedGateway {
    script: Mutex<Script>,
    pub list_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_list(&self, delay: Duration, step: Result<PageResult<QuestSummary>, GatewayError>) {
        self.script.lock().list.push_back((delay, step));
    }

    pub fn script_detail(&self, delay: Duration, step: Result<QuestDetail, GatewayError>) {
        self.script.lock().detail.push_back((delay, step));
    }

    pub fn script_create(&self, delay: Duration, step: Result<QuestDetail, GatewayError>) {
        self.script.lock().create.push_back((delay, step));
    }

    pub fn script_update(&self, delay: Duration, step: Result<QuestDetail, GatewayError>) {
        self.script.lock().update.push_back((delay, step));
    }

    pub fn script_delete(&self, delay: Duration, step: Result<(), GatewayError>) {
        self.script.lock().delete.push_back((delay, step));
    }

    pub fn calls(&self, counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    async fn run<T>(step: Option<Step<T>>, fallback: T) -> Result<T, GatewayError> {
        match step {
            Some((delay, outcome)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                outcome
            }
            None => Ok(fallback),
        }
    }
}

#[async_trait]
impl Gateway<Quests> for ScriptedGateway {
    async fn list(&self, _filters: &Filters) -> Result<PageResult<QuestSummary>, GatewayError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let step = self.script.lock().list.pop_front();
        Self::run(step, page_of([], 1, 9, 0)).await
    }

    async fn get_by_id(&self, id: &u64) -> Result<QuestDetail, GatewayError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let step = self.script.lock().detail.pop_front();
        Self::run(step, detail(*id)).await
    }

    async fn fetch_auxiliary(&self) -> Result<Vec<String>, GatewayError> {
        let step = self.script.lock().auxiliary.pop_front();
        Self::run(step, vec!["fitness".into(), "social".into()]).await
    }

    async fn create(&self, payload: &String) -> Result<QuestDetail, GatewayError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let step = self.script.lock().create.pop_front();
        Self::run(
            step,
            QuestDetail {
                id: 1000,
                name: payload.clone(),
            },
        )
        .await
    }

    async fn update(&self, id: &u64, changes: &Option<String>) -> Result<QuestDetail, GatewayError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let step = self.script.lock().update.pop_front();
        let mut fallback = detail(*id);
        if let Some(name) = changes {
            fallback.name = name.clone();
        }
        Self::run(step, fallback).await
    }

    async fn delete(&self, _id: &u64) -> Result<(), GatewayError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        let step = self.script.lock().delete.pop_front();
        Self::run(step, ()).await
    }
}

/// Wait until the combined loading flag settles to false.
pub async fn settle(engine: &questline_engine::Engine<Quests>) {
    let mut loading = engine.loading();
    while loading.get() {
        assert!(loading.changed().await, "engine dropped while settling");
    }
}
