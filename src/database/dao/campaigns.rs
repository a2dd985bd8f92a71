use crate::database::entities::{CampaignRecord, campaigns};
use crate::database::{DatabaseError, DatabaseResult};
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

/// Campaigns DAO for database operations
pub struct CampaignsDao {
    db: DatabaseConnection,
}

impl CampaignsDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Store a campaign, letting the database assign the id
    pub async fn store(&self, campaign: &CampaignRecord) -> DatabaseResult<CampaignRecord> {
        let active_model = campaigns::ActiveModel {
            id: ActiveValue::NotSet,
            name: Set(campaign.name.clone()),
            start_date: Set(campaign.start_date),
            end_date: Set(campaign.end_date),
            budget: Set(campaign.budget),
            description: Set(campaign.description.clone()),
        };

        active_model
            .insert(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn find_all(&self) -> DatabaseResult<Vec<CampaignRecord>> {
        campaigns::Entity::find()
            .order_by_asc(campaigns::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn count(&self) -> DatabaseResult<u64> {
        campaigns::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }
}
