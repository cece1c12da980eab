use sea_orm::DatabaseBackend;
use sea_orm_migration::prelude::*;

/// Creates the events table and converts it into a TimescaleDB hypertable
/// partitioned on the `time` column.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // `id` stays auto-incrementing but is not a primary key constraint:
        // hypertables require the partitioning column in every unique index.
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("events"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("time"))
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("page")).text().not_null())
                    .col(ColumnDef::new(Alias::new("user_agent")).text().null())
                    .col(ColumnDef::new(Alias::new("description")).text().null())
                    .to_owned(),
            )
            .await?;

        // Configure TimescaleDB for the events table
        if manager.get_database_backend() == DatabaseBackend::Postgres {
            let sql = r#"
                SELECT create_hypertable('events', 'time',
                    chunk_time_interval => INTERVAL '1 day',
                    if_not_exists => TRUE);

                CREATE INDEX IF NOT EXISTS idx_events_id
                    ON events (id);
                CREATE INDEX IF NOT EXISTS idx_events_page_time
                    ON events (page, time DESC);
            "#;

            manager
                .get_connection()
                .execute_unprepared(sql)
                .await
                .map_err(|e| DbErr::Custom(format!("Failed to configure TimescaleDB: {}", e)))?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("events")).to_owned())
            .await
    }
}
