//! Database queries for the mold registry.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::entity::mold::{self, ActiveModel, Entity as Mold};
use crate::error::{AppError, AppResult};
use crate::models::mold::ListMoldsQuery;
use crate::models::{MoldStatus, RegisterMoldRequest};

use super::DbPool;

impl DbPool {
    /// Insert a new mold.
    pub async fn insert_mold(&self, request: &RegisterMoldRequest) -> AppResult<mold::Model> {
        let now = Utc::now();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            mold_code: Set(request.mold_code.trim().to_string()),
            name: Set(request.name.trim().to_string()),
            maker_name: Set(request.maker_name.trim().to_string()),
            plant_name: Set(request.plant_name.trim().to_string()),
            status: Set(MoldStatus::Active.as_str().to_string()),
            cavity_count: Set(request.cavity_count),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert mold: {}", e)))?;

        Ok(result)
    }

    /// Get a mold by ID, excluding soft-deleted rows.
    pub async fn get_mold_by_id(&self, id: Uuid) -> AppResult<Option<mold::Model>> {
        let result = Mold::find_by_id(id)
            .filter(mold::Column::DeletedAt.is_null())
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get mold: {}", e)))?;

        Ok(result)
    }

    /// Find a mold by its unique code.
    pub async fn find_mold_by_code(&self, mold_code: &str) -> AppResult<Option<mold::Model>> {
        let result = Mold::find()
            .filter(mold::Column::MoldCode.eq(mold_code))
            .filter(mold::Column::DeletedAt.is_null())
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to find mold by code: {}", e)))?;

        Ok(result)
    }

    /// List molds with optional filtering.
    pub async fn list_molds(&self, query: &ListMoldsQuery) -> AppResult<(Vec<mold::Model>, u64)> {
        let mut select = Mold::find().filter(mold::Column::DeletedAt.is_null());

        if let Some(status) = query.status {
            select = select.filter(mold::Column::Status.eq(status.as_str()));
        }

        if let Some(ref plant) = query.plant {
            select = select.filter(mold::Column::PlantName.eq(plant.as_str()));
        }

        // Count total before pagination
        let total = select
            .clone()
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count molds: {}", e)))?;

        let limit = query.limit.clamp(1, 100) as u64;
        let offset = query.offset.max(0) as u64;

        let molds = select
            .order_by_asc(mold::Column::MoldCode)
            .offset(offset)
            .limit(limit)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list molds: {}", e)))?;

        Ok((molds, total))
    }

    /// Update a mold's lifecycle flag.
    pub async fn update_mold_status(
        &self,
        id: Uuid,
        status: MoldStatus,
    ) -> AppResult<mold::Model> {
        let mold = self
            .get_mold_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Mold {}", id)))?;

        let mut active: ActiveModel = mold.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now());

        let result = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update mold status: {}", e)))?;

        Ok(result)
    }
}
