// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::candidate::Candidate;
use crate::domain::repositories::frontier_repository::{
    AcceptSink, DuplicateCorpus, FrontierStage, PendingSource, RejectSink, RepositoryError,
    SnapshotCursor,
};
use crate::infrastructure::database::entities::crawl_url;
use crate::infrastructure::database::entities::crawl_url::Entity as CrawlUrlEntity;

/// 单个前沿阶段的仓库实现
///
/// 所有阶段共用 `crawl_urls` 表，实例绑定一个阶段后只读写该阶段的行。
#[derive(Clone)]
pub struct StageRepositoryImpl {
    db: Arc<DatabaseConnection>,
    stage: FrontierStage,
}

impl StageRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>, stage: FrontierStage) -> Self {
        Self { db, stage }
    }

    /// 统计该阶段的行数
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        let count = CrawlUrlEntity::find()
            .filter(crawl_url::Column::Stage.eq(self.stage.as_str()))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }

    async fn insert(&self, candidate: &Candidate) -> Result<(), RepositoryError> {
        let active_model = crawl_url::ActiveModel {
            // sinks get a fresh row; the pending row id is not reused
            id: Set(Uuid::new_v4()),
            stage: Set(self.stage.as_str().to_string()),
            url: Set(candidate.url().to_string()),
            domain: Set(candidate.domain().map(str::to_string)),
            status: Set(Some(candidate.status().to_string())),
            reject_reason: Set(candidate.reject_reason().map(|r| r.to_string())),
            processed_at: Set(candidate.processed_at().map(|dt| dt.into())),
            created_at: Set(Utc::now().into()),
        };

        active_model.insert(self.db.as_ref()).await?;
        Ok(())
    }
}

impl From<crawl_url::Model> for Candidate {
    fn from(model: crawl_url::Model) -> Self {
        Candidate::pending(model.id, model.url, model.domain)
    }
}

#[async_trait]
impl PendingSource for StageRepositoryImpl {
    async fn next_batch(
        &self,
        after: Option<&SnapshotCursor>,
        limit: u64,
    ) -> Result<Vec<Candidate>, RepositoryError> {
        let mut query = CrawlUrlEntity::find()
            .filter(crawl_url::Column::Stage.eq(self.stage.as_str()))
            .order_by_desc(crawl_url::Column::Url)
            .order_by_desc(crawl_url::Column::Id)
            .limit(limit);

        if let Some(cursor) = after {
            query = query.filter(
                Condition::any()
                    .add(crawl_url::Column::Url.lt(cursor.url.as_str()))
                    .add(
                        Condition::all()
                            .add(crawl_url::Column::Url.eq(cursor.url.as_str()))
                            .add(crawl_url::Column::Id.lt(cursor.id)),
                    ),
            );
        }

        let results = query.all(self.db.as_ref()).await?;
        Ok(results.into_iter().map(Candidate::from).collect())
    }

    async fn claim(&self, candidate: &Candidate) -> Result<bool, RepositoryError> {
        let result = CrawlUrlEntity::delete_many()
            .filter(crawl_url::Column::Id.eq(candidate.id))
            .filter(crawl_url::Column::Stage.eq(self.stage.as_str()))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn enqueue(&self, url: &str) -> Result<Candidate, RepositoryError> {
        let candidate = Candidate::new(url);
        let active_model = crawl_url::ActiveModel {
            id: Set(candidate.id),
            stage: Set(self.stage.as_str().to_string()),
            url: Set(url.to_string()),
            domain: Set(None),
            status: Set(None),
            reject_reason: Set(None),
            processed_at: Set(None),
            created_at: Set(Utc::now().into()),
        };

        active_model.insert(self.db.as_ref()).await?;
        Ok(candidate)
    }
}

#[async_trait]
impl DuplicateCorpus for StageRepositoryImpl {
    fn name(&self) -> &'static str {
        self.stage.as_str()
    }

    async fn exists(&self, url: &str) -> Result<bool, RepositoryError> {
        let found = CrawlUrlEntity::find()
            .filter(crawl_url::Column::Stage.eq(self.stage.as_str()))
            .filter(crawl_url::Column::Url.eq(url))
            .one(self.db.as_ref())
            .await?;
        Ok(found.is_some())
    }
}

#[async_trait]
impl RejectSink for StageRepositoryImpl {
    async fn append(&self, candidate: &Candidate) -> Result<(), RepositoryError> {
        self.insert(candidate).await
    }
}

#[async_trait]
impl AcceptSink for StageRepositoryImpl {
    async fn append(&self, candidate: &Candidate) -> Result<(), RepositoryError> {
        self.insert(candidate).await
    }
}
