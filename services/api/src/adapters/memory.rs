//! services/api/src/adapters/memory.rs
//!
//! An in-process implementation of the `DatabaseService` port. It backs the
//! service when no `DATABASE_URL` is configured and drives the HTTP tests.
//! Nothing survives a restart.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use persona_cart_core::domain::{
    AuthSession, CartAddition, CartItem, Product, Profile, ProfileDraft, User, UserCredentials,
};
use persona_cart_core::ports::{DatabaseService, PortError, PortResult};
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    users: Vec<UserCredentials>,
    sessions: HashMap<String, AuthSession>,
    // Vecs keep insertion order, which is the listing order.
    profiles: Vec<Profile>,
    products: Vec<Product>,
    cart: Vec<CartItem>,
}

/// All tables behind a single lock, so every operation is atomic.
#[derive(Default)]
pub struct InMemoryDb {
    tables: Mutex<Tables>,
}

impl InMemoryDb {
    pub fn new() -> Self {
        Self::default()
    }
}

fn profile_not_found() -> PortError {
    PortError::NotFound("Profile not found".to_string())
}

#[async_trait]
impl DatabaseService for InMemoryDb {
    async fn create_user_with_email(&self, email: &str, hashed_password: &str) -> PortResult<User> {
        let mut tables = self.tables.lock().await;
        if tables.users.iter().any(|u| u.email == email) {
            return Err(PortError::Conflict(format!("An account for {} already exists", email)));
        }
        let user_id = Uuid::new_v4();
        tables.users.push(UserCredentials {
            user_id,
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
        });
        Ok(User {
            user_id,
            email: email.to_string(),
        })
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        let tables = self.tables.lock().await;
        tables
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("User {} not found", email)))
    }

    async fn create_auth_session(
        &self,
        session_id: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()> {
        let mut tables = self.tables.lock().await;
        tables.sessions.insert(
            session_id.to_string(),
            AuthSession {
                id: session_id.to_string(),
                user_id,
                expires_at,
            },
        );
        Ok(())
    }

    async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        let user_id = tables
            .sessions
            .get(session_id)
            .filter(|session| !session.is_expired(now))
            .map(|session| session.user_id);
        if user_id.is_none() {
            tables.sessions.remove(session_id);
        }
        user_id.ok_or(PortError::Unauthorized)
    }

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()> {
        self.tables.lock().await.sessions.remove(session_id);
        Ok(())
    }

    async fn list_profiles(&self, owner_id: Uuid) -> PortResult<Vec<Profile>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .profiles
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn get_profile(&self, owner_id: Uuid, profile_id: Uuid) -> PortResult<Profile> {
        let tables = self.tables.lock().await;
        tables
            .profiles
            .iter()
            .find(|p| p.owner_id == owner_id && p.id == profile_id)
            .cloned()
            .ok_or_else(profile_not_found)
    }

    async fn create_profile(&self, owner_id: Uuid, draft: ProfileDraft) -> PortResult<Profile> {
        let profile = draft.into_profile(Uuid::new_v4(), owner_id);
        self.tables.lock().await.profiles.push(profile.clone());
        Ok(profile)
    }

    async fn update_profile(
        &self,
        owner_id: Uuid,
        profile_id: Uuid,
        draft: ProfileDraft,
    ) -> PortResult<Profile> {
        let mut tables = self.tables.lock().await;
        let slot = tables
            .profiles
            .iter_mut()
            .find(|p| p.owner_id == owner_id && p.id == profile_id)
            .ok_or_else(profile_not_found)?;
        *slot = draft.into_profile(profile_id, owner_id);
        Ok(slot.clone())
    }

    async fn delete_profile(&self, owner_id: Uuid, profile_id: Uuid) -> PortResult<Profile> {
        let mut tables = self.tables.lock().await;
        let index = tables
            .profiles
            .iter()
            .position(|p| p.owner_id == owner_id && p.id == profile_id)
            .ok_or_else(profile_not_found)?;
        Ok(tables.profiles.remove(index))
    }

    async fn list_products(&self) -> PortResult<Vec<Product>> {
        Ok(self.tables.lock().await.products.clone())
    }

    async fn get_product(&self, product_id: &str) -> PortResult<Product> {
        let tables = self.tables.lock().await;
        tables
            .products
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Product {} not found", product_id)))
    }

    async fn seed_products(&self, products: &[Product]) -> PortResult<usize> {
        let mut tables = self.tables.lock().await;
        let mut inserted = 0;
        for product in products {
            if tables.products.iter().all(|p| p.id != product.id) {
                tables.products.push(product.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn list_cart(&self, owner_id: Uuid) -> PortResult<Vec<CartItem>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .cart
            .iter()
            .filter(|item| item.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn add_to_cart(
        &self,
        owner_id: Uuid,
        product_id: &str,
        quantity: i32,
    ) -> PortResult<CartAddition> {
        let mut tables = self.tables.lock().await;
        if tables.products.iter().all(|p| p.id != product_id) {
            return Err(PortError::NotFound(format!("Product {} not found", product_id)));
        }

        if let Some(item) = tables
            .cart
            .iter_mut()
            .find(|item| item.owner_id == owner_id && item.product_id == product_id)
        {
            item.quantity = item.quantity.checked_add(quantity).ok_or_else(|| {
                PortError::Unexpected(format!("quantity overflow for product {}", product_id))
            })?;
            return Ok(CartAddition::Incremented(item.clone()));
        }

        let item = CartItem {
            id: Uuid::new_v4(),
            owner_id,
            product_id: product_id.to_string(),
            quantity,
        };
        tables.cart.push(item.clone());
        Ok(CartAddition::Created(item))
    }

    async fn remove_cart_item(&self, owner_id: Uuid, item_id: Uuid) -> PortResult<()> {
        self.tables
            .lock()
            .await
            .cart
            .retain(|item| !(item.owner_id == owner_id && item.id == item_id));
        Ok(())
    }

    async fn clear_cart(&self, owner_id: Uuid) -> PortResult<()> {
        self.tables
            .lock()
            .await
            .cart
            .retain(|item| item.owner_id != owner_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use persona_cart_core::catalog::sample_products;
    use persona_cart_core::domain::{AgeGroup, Gender, Preferences};

    fn draft(name: &str) -> ProfileDraft {
        ProfileDraft {
            name: name.to_string(),
            age_group: AgeGroup::Child,
            gender: Gender::Female,
            avatar: Some("🦊".to_string()),
            preferences: Preferences::default(),
        }
    }

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let db = InMemoryDb::new();
        assert_eq!(db.seed_products(&sample_products()).await.unwrap(), 12);
        assert_eq!(db.seed_products(&sample_products()).await.unwrap(), 0);
        assert_eq!(db.list_products().await.unwrap().len(), 12);
    }

    #[tokio::test]
    async fn profiles_are_scoped_to_their_owner() {
        let db = InMemoryDb::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let profile = db.create_profile(alice, draft("Mia")).await.unwrap();

        assert!(db.list_profiles(bob).await.unwrap().is_empty());
        assert!(matches!(
            db.get_profile(bob, profile.id).await,
            Err(PortError::NotFound(_))
        ));
        assert!(matches!(
            db.update_profile(bob, profile.id, draft("Stolen")).await,
            Err(PortError::NotFound(_))
        ));
        assert!(matches!(
            db.delete_profile(bob, profile.id).await,
            Err(PortError::NotFound(_))
        ));

        let updated = db.update_profile(alice, profile.id, draft("Mila")).await.unwrap();
        assert_eq!(updated.id, profile.id);
        assert_eq!(updated.name, "Mila");
        let deleted = db.delete_profile(alice, profile.id).await.unwrap();
        assert_eq!(deleted.name, "Mila");
        assert!(db.list_profiles(alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn re_adding_a_product_increments_quantity() {
        let db = InMemoryDb::new();
        db.seed_products(&sample_products()).await.unwrap();
        let owner = Uuid::new_v4();

        let first = db.add_to_cart(owner, "p1", 1).await.unwrap();
        assert!(matches!(first, CartAddition::Created(_)));
        let second = db.add_to_cart(owner, "p1", 2).await.unwrap();
        assert!(matches!(second, CartAddition::Incremented(_)));
        assert_eq!(second.item().id, first.item().id);
        assert_eq!(second.item().quantity, 3);
        assert_eq!(db.list_cart(owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_products_cannot_be_added() {
        let db = InMemoryDb::new();
        assert!(matches!(
            db.add_to_cart(Uuid::new_v4(), "p404", 1).await,
            Err(PortError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn expired_sessions_are_rejected() {
        let db = InMemoryDb::new();
        let user = Uuid::new_v4();
        db.create_auth_session("old", user, Utc::now() - chrono::Duration::minutes(1))
            .await
            .unwrap();
        db.create_auth_session("new", user, Utc::now() + chrono::Duration::days(1))
            .await
            .unwrap();
        assert!(matches!(
            db.validate_auth_session("old").await,
            Err(PortError::Unauthorized)
        ));
        assert_eq!(db.validate_auth_session("new").await.unwrap(), user);
    }

    #[tokio::test]
    async fn duplicate_emails_conflict() {
        let db = InMemoryDb::new();
        db.create_user_with_email("a@example.com", "hash").await.unwrap();
        assert!(matches!(
            db.create_user_with_email("a@example.com", "hash").await,
            Err(PortError::Conflict(_))
        ));
    }
}
