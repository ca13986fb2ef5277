//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductFilter, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
        stock::{StockAdjustment, StockDirection},
    },
    pagination::Page,
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
        page: Page,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.list_products(&mut tx, filter, page).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if product.name.trim().is_empty() {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        if product.price == 0 {
            return Err(ProductsServiceError::InvalidPrice);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = match self.repository.create_product(&mut tx, product).await {
            Ok(created) => created,
            // The insert selects from the live store row; no row means no store.
            Err(sqlx::Error::RowNotFound) => return Err(ProductsServiceError::InvalidReference),
            Err(error) => return Err(error.into()),
        };

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if update.is_empty() {
            return Err(ProductsServiceError::EmptyUpdate);
        }

        if update.price == Some(0) {
            return Err(ProductsServiceError::InvalidPrice);
        }

        if update.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn adjust_stock(
        &self,
        product: ProductUuid,
        adjustment: StockAdjustment,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if adjustment.quantity == 0 {
            return Err(ProductsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin_transaction().await?;

        let current = self.repository.get_product(&mut tx, product).await?;

        let stock = match adjustment.direction {
            StockDirection::Add => {
                self.repository
                    .add_stock(&mut tx, product, adjustment.quantity)
                    .await?
            }
            StockDirection::Subtract => {
                self.repository
                    .subtract_stock(&mut tx, product, adjustment.quantity)
                    .await?
            }
        };

        let Some(stock) = stock else {
            warn!(
                product = %product,
                available = current.stock,
                requested = adjustment.quantity,
                "stock adjustment rejected"
            );

            return Err(ProductsServiceError::InsufficientStock {
                product,
                available: current.stock,
                requested: adjustment.quantity,
            });
        };

        tx.commit().await?;

        info!(
            product = %product,
            direction = ?adjustment.direction,
            quantity = adjustment.quantity,
            stock,
            "stock adjusted"
        );

        Ok(ProductRecord { stock, ..current })
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves live products matching the filter.
    async fn list_products(
        &self,
        filter: ProductFilter,
        page: Page,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product in a live store.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Applies a partial update.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-deletes a product.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;

    /// Moves stock up or down, never below zero.
    async fn adjust_stock(
        &self,
        product: ProductUuid,
        adjustment: StockAdjustment,
    ) -> Result<ProductRecord, ProductsServiceError>;
}
