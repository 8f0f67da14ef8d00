// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One table holds every frontier stage, partitioned by `stage`
        manager
            .create_table(
                Table::create()
                    .table(CrawlUrls::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CrawlUrls::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CrawlUrls::Stage).string().not_null())
                    .col(ColumnDef::new(CrawlUrls::Url).text().not_null())
                    .col(ColumnDef::new(CrawlUrls::Domain).string())
                    .col(ColumnDef::new(CrawlUrls::Status).string())
                    .col(ColumnDef::new(CrawlUrls::RejectReason).string())
                    .col(ColumnDef::new(CrawlUrls::ProcessedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(CrawlUrls::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_crawl_urls_stage_url")
                    .table(CrawlUrls::Table)
                    .col(CrawlUrls::Stage)
                    .col(CrawlUrls::Url)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CrawlUrls::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CrawlUrls {
    Table,
    Id,
    Stage,
    Url,
    Domain,
    Status,
    RejectReason,
    ProcessedAt,
    CreatedAt,
}
