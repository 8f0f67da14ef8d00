// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use uuid::Uuid;

/// 抓取前沿URL数据库实体模型
///
/// 对应数据库中的 crawl_urls 表，所有阶段共用一张表，以 `stage` 区分
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "crawl_urls")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub stage: String,
    #[sea_orm(column_type = "Text")]
    pub url: String,
    pub domain: Option<String>,
    pub status: Option<String>,
    pub reject_reason: Option<String>,
    pub processed_at: Option<ChronoDateTimeWithTimeZone>,
    pub created_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
