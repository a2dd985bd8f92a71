use crate::database::entities::{ProductRecord, products};
use crate::database::{DatabaseError, DatabaseResult};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde::Serialize;
use utoipa::ToSchema;

/// One page of the product listing
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<ProductRecord>,
    /// Offset of the next page, `None` when this was the last one
    pub new_offset: Option<u64>,
    pub total_products: u64,
}

/// Products DAO for database operations
pub struct ProductsDao {
    db: DatabaseConnection,
}

impl ProductsDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Store a product, letting the database assign the id
    pub async fn store(&self, product: &ProductRecord) -> DatabaseResult<ProductRecord> {
        let active_model = products::ActiveModel {
            id: ActiveValue::NotSet,
            image_url: Set(product.image_url.clone()),
            name: Set(product.name.clone()),
            status: Set(product.status),
            price: Set(product.price),
            stock: Set(product.stock),
            available_at: Set(product.available_at),
        };

        active_model
            .insert(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn find_all(&self) -> DatabaseResult<Vec<ProductRecord>> {
        products::Entity::find()
            .order_by_asc(products::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<ProductRecord>> {
        products::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// Page through products; an exact name search returns every match on one page
    pub async fn find_page(
        &self,
        search: Option<&str>,
        offset: u64,
        page_size: u64,
    ) -> DatabaseResult<ProductPage> {
        if let Some(name) = search.filter(|s| !s.is_empty()) {
            let products = products::Entity::find()
                .filter(products::Column::Name.eq(name))
                .order_by_asc(products::Column::Id)
                .all(&self.db)
                .await
                .map_err(|e| DatabaseError::Database(e.to_string()))?;
            let total_products = products.len() as u64;
            return Ok(ProductPage {
                products,
                new_offset: None,
                total_products,
            });
        }

        let total_products = self.count().await?;
        let products = products::Entity::find()
            .order_by_asc(products::Column::Id)
            .offset(Some(offset))
            .limit(Some(page_size))
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        let new_offset = if offset + (products.len() as u64) < total_products {
            Some(offset + page_size)
        } else {
            None
        };

        Ok(ProductPage {
            products,
            new_offset,
            total_products,
        })
    }

    pub async fn count(&self) -> DatabaseResult<u64> {
        products::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// Delete a product by id
    pub async fn delete(&self, id: i32) -> DatabaseResult<()> {
        let result = products::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(DatabaseError::NotFound);
        }
        Ok(())
    }
}
