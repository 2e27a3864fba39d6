//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DatabaseService` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use persona_cart_core::domain::{
    CartAddition, CartItem, Preferences, Product, ProductCategory, Profile, ProfileDraft, User,
    UserCredentials,
};
use persona_cart_core::ports::{DatabaseService, PortError, PortResult};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DatabaseService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

fn not_found_or_unexpected(e: sqlx::Error, what: String) -> PortError {
    match e {
        sqlx::Error::RowNotFound => PortError::NotFound(what),
        _ => PortError::Unexpected(e.to_string()),
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct UserRecord {
    user_id: Uuid,
    email: String,
    hashed_password: String,
}

#[derive(FromRow)]
struct ProfileRecord {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    age_group: String,
    gender: String,
    avatar: Option<String>,
    shirt_size: Option<String>,
    shoe_size: Option<String>,
    personal_care: Option<String>,
}
impl ProfileRecord {
    fn to_domain(self) -> PortResult<Profile> {
        Ok(Profile {
            id: self.id,
            owner_id: self.owner_id,
            name: self.name,
            age_group: self
                .age_group
                .parse()
                .map_err(|e| PortError::Unexpected(format!("profile {}: {}", self.id, e)))?,
            gender: self
                .gender
                .parse()
                .map_err(|e| PortError::Unexpected(format!("profile {}: {}", self.id, e)))?,
            avatar: self.avatar,
            preferences: Preferences {
                shirt_size: self.shirt_size,
                shoe_size: self.shoe_size,
                personal_care: self.personal_care,
            },
        })
    }
}

#[derive(FromRow)]
struct ProductRecord {
    id: String,
    name: String,
    category: String,
    price: Decimal,
    sizes: Option<Vec<String>>,
    gender: String,
    brand: Option<String>,
}
impl ProductRecord {
    fn to_domain(self) -> PortResult<Product> {
        let gender = self
            .gender
            .parse()
            .map_err(|e| PortError::Unexpected(format!("product {}: {}", self.id, e)))?;
        Ok(Product {
            category: ProductCategory::from_stored(&self.category),
            id: self.id,
            name: self.name,
            price: self.price,
            sizes: self.sizes,
            gender,
            brand: self.brand,
        })
    }
}

#[derive(FromRow)]
struct CartItemRecord {
    id: Uuid,
    owner_id: Uuid,
    product_id: String,
    quantity: i32,
}
impl CartItemRecord {
    fn to_domain(self) -> CartItem {
        CartItem {
            id: self.id,
            owner_id: self.owner_id,
            product_id: self.product_id,
            quantity: self.quantity,
        }
    }
}

#[derive(FromRow)]
struct CartUpsertRecord {
    #[sqlx(flatten)]
    item: CartItemRecord,
    inserted: bool,
}

const PROFILE_COLUMNS: &str =
    "id, owner_id, name, age_group, gender, avatar, shirt_size, shoe_size, personal_care";
const PRODUCT_COLUMNS: &str = "id, name, category, price, sizes, gender, brand";

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DatabaseService for DbAdapter {
    async fn create_user_with_email(&self, email: &str, hashed_password: &str) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (user_id, email, hashed_password) VALUES ($1, $2, $3) \
             RETURNING user_id, email, hashed_password",
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => {
                PortError::Conflict(format!("An account for {} already exists", email))
            }
            _ => unexpected(e),
        })?;

        Ok(User {
            user_id: record.user_id,
            email: record.email,
        })
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT user_id, email, hashed_password FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| not_found_or_unexpected(e, format!("User {} not found", email)))?;

        Ok(UserCredentials {
            user_id: record.user_id,
            email: record.email,
            hashed_password: record.hashed_password,
        })
    }

    async fn create_auth_session(
        &self,
        session_id: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()> {
        sqlx::query("INSERT INTO auth_sessions (id, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(session_id)
            .bind(user_id)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT user_id FROM auth_sessions WHERE id = $1 AND expires_at > now()",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or(PortError::Unauthorized)
    }

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    async fn list_profiles(&self, owner_id: Uuid) -> PortResult<Vec<Profile>> {
        let records = sqlx::query_as::<_, ProfileRecord>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE owner_id = $1 ORDER BY created_at ASC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        records.into_iter().map(|r| r.to_domain()).collect()
    }

    async fn get_profile(&self, owner_id: Uuid, profile_id: Uuid) -> PortResult<Profile> {
        let record = sqlx::query_as::<_, ProfileRecord>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE owner_id = $1 AND id = $2"
        ))
        .bind(owner_id)
        .bind(profile_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| not_found_or_unexpected(e, "Profile not found".to_string()))?;

        record.to_domain()
    }

    async fn create_profile(&self, owner_id: Uuid, draft: ProfileDraft) -> PortResult<Profile> {
        let record = sqlx::query_as::<_, ProfileRecord>(&format!(
            "INSERT INTO profiles ({PROFILE_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(&draft.name)
        .bind(draft.age_group.as_str())
        .bind(draft.gender.as_str())
        .bind(&draft.avatar)
        .bind(&draft.preferences.shirt_size)
        .bind(&draft.preferences.shoe_size)
        .bind(&draft.preferences.personal_care)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;

        record.to_domain()
    }

    async fn update_profile(
        &self,
        owner_id: Uuid,
        profile_id: Uuid,
        draft: ProfileDraft,
    ) -> PortResult<Profile> {
        let record = sqlx::query_as::<_, ProfileRecord>(&format!(
            "UPDATE profiles SET name = $1, age_group = $2, gender = $3, avatar = $4, \
             shirt_size = $5, shoe_size = $6, personal_care = $7 \
             WHERE owner_id = $8 AND id = $9 RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(&draft.name)
        .bind(draft.age_group.as_str())
        .bind(draft.gender.as_str())
        .bind(&draft.avatar)
        .bind(&draft.preferences.shirt_size)
        .bind(&draft.preferences.shoe_size)
        .bind(&draft.preferences.personal_care)
        .bind(owner_id)
        .bind(profile_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| not_found_or_unexpected(e, "Profile not found".to_string()))?;

        record.to_domain()
    }

    async fn delete_profile(&self, owner_id: Uuid, profile_id: Uuid) -> PortResult<Profile> {
        let record = sqlx::query_as::<_, ProfileRecord>(&format!(
            "DELETE FROM profiles WHERE owner_id = $1 AND id = $2 RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(owner_id)
        .bind(profile_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| not_found_or_unexpected(e, "Profile not found".to_string()))?;

        record.to_domain()
    }

    async fn list_products(&self) -> PortResult<Vec<Product>> {
        let records = sqlx::query_as::<_, ProductRecord>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY seq ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        records.into_iter().map(|r| r.to_domain()).collect()
    }

    async fn get_product(&self, product_id: &str) -> PortResult<Product> {
        let record = sqlx::query_as::<_, ProductRecord>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(product_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| not_found_or_unexpected(e, format!("Product {} not found", product_id)))?;

        record.to_domain()
    }

    async fn seed_products(&self, products: &[Product]) -> PortResult<usize> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;
        let mut inserted = 0;
        for product in products {
            let result = sqlx::query(&format!(
                "INSERT INTO products ({PRODUCT_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7) \
                 ON CONFLICT (id) DO NOTHING"
            ))
            .bind(&product.id)
            .bind(&product.name)
            .bind(product.category.as_str())
            .bind(product.price)
            .bind(&product.sizes)
            .bind(product.gender.as_str())
            .bind(&product.brand)
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;
            inserted += result.rows_affected() as usize;
        }
        tx.commit().await.map_err(unexpected)?;
        debug!(inserted, "Seeded products");
        Ok(inserted)
    }

    async fn list_cart(&self, owner_id: Uuid) -> PortResult<Vec<CartItem>> {
        let records = sqlx::query_as::<_, CartItemRecord>(
            "SELECT id, owner_id, product_id, quantity FROM cart_items \
             WHERE owner_id = $1 ORDER BY created_at ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn add_to_cart(
        &self,
        owner_id: Uuid,
        product_id: &str,
        quantity: i32,
    ) -> PortResult<CartAddition> {
        // xmax is zero only for a freshly inserted row.
        let record = sqlx::query_as::<_, CartUpsertRecord>(
            "INSERT INTO cart_items (id, owner_id, product_id, quantity) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (owner_id, product_id) \
             DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity \
             RETURNING id, owner_id, product_id, quantity, (xmax = 0) AS inserted",
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err) if db_err.is_foreign_key_violation() => {
                PortError::NotFound(format!("Product {} not found", product_id))
            }
            _ => unexpected(e),
        })?;

        let item = record.item.to_domain();
        Ok(if record.inserted {
            CartAddition::Created(item)
        } else {
            CartAddition::Incremented(item)
        })
    }

    async fn remove_cart_item(&self, owner_id: Uuid, item_id: Uuid) -> PortResult<()> {
        sqlx::query("DELETE FROM cart_items WHERE owner_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(item_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    async fn clear_cart(&self, owner_id: Uuid) -> PortResult<()> {
        sqlx::query("DELETE FROM cart_items WHERE owner_id = $1")
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }
}
