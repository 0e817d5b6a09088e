use crate::idens;
use async_trait::async_trait;
use sea_orm::{
    sea_query::{IndexCreateStatement, TableCreateStatement, TableDropStatement},
    ActiveModelTrait, DatabaseBackend, DatabaseTransaction, DbErr, EntityTrait,
};

/// Schema and seed contributor for one table, derived with `#[derive(Initializer)]`.
#[async_trait]
pub trait BKInitializer: Send + Sync {
    fn order(&self) -> i32;

    fn name(&self) -> &str;

    fn has_update_col(&self) -> bool;

    fn to_create_table_stmt(&self, backend: DatabaseBackend) -> TableCreateStatement;

    fn to_drop_table_stmt(&self, backend: DatabaseBackend) -> TableDropStatement;

    fn to_create_indexes_stmt(&self, backend: DatabaseBackend)
        -> Option<Vec<IndexCreateStatement>>;

    async fn seeding_data(&self, transaction: &DatabaseTransaction) -> Result<(), DbErr>;
}

/// Trait for types that can be seeded into the database
pub trait SeedableTrait: Send + Sync + 'static {
    /// The active model type for database insertion
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity>;
    /// The entity type for database operations
    type Entity: EntityTrait;

    /// Convert self into an active model
    fn get_active_model(&self) -> Self::ActiveModel;
}

#[async_trait]
pub trait DataSeederTrait<T: SeedableTrait + Clone> {
    async fn get_seed_data(&self) -> Result<Option<Vec<T>>, DbErr>;
}

#[async_trait]
pub trait SeedableInitializerTrait<T: SeedableTrait + Clone>:
    BKInitializer + DataSeederTrait<T>
{
    async fn seed_data(&self, transaction: &DatabaseTransaction) -> Result<(), DbErr> {
        let Some(seed_data) = self.get_seed_data().await? else {
            return Ok(());
        };
        // insert_many rejects an empty batch
        if seed_data.is_empty() {
            return Ok(());
        }

        let active_models: Vec<T::ActiveModel> =
            seed_data.iter().map(|d| d.get_active_model()).collect();

        T::Entity::insert_many(active_models)
            .exec(transaction)
            .await?;
        Ok(())
    }
}

/// All table initializers, in migration order.
pub fn initializers() -> Vec<Box<dyn BKInitializer>> {
    let mut initializers: Vec<Box<dyn BKInitializer>> = vec![
        Box::new(idens::menu_config::MenuConfig::Table),
        Box::new(idens::company::Company::Table),
        Box::new(idens::company_staging::CompanyStaging::Table),
        Box::new(idens::header::Header::Table),
        Box::new(idens::header_staging::HeaderStaging::Table),
    ];

    initializers.sort_by_key(|init| init.order());
    initializers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initializers_are_ordered_and_named() {
        let names: Vec<String> = initializers().iter().map(|i| i.name().to_string()).collect();
        assert_eq!(
            names,
            vec![
                "company",
                "company_staging",
                "header",
                "header_staging",
                "menu_config"
            ]
        );
        assert!(initializers().iter().all(|i| i.has_update_col()));
    }
}
