//! crates/persona_cart_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific storage implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{CartAddition, CartItem, Product, Profile, ProfileDraft, User, UserCredentials};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Storage for accounts, profiles, the product catalog and carts.
///
/// Every profile and cart operation takes the owning account's id and must
/// never read or touch rows belonging to another account.
#[async_trait]
pub trait DatabaseService: Send + Sync {
    // --- Accounts ---
    /// Fails with `PortError::Conflict` when the email is already registered.
    async fn create_user_with_email(&self, email: &str, hashed_password: &str) -> PortResult<User>;

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials>;

    async fn create_auth_session(
        &self,
        session_id: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()>;

    /// Resolves a live session to its account; unknown or expired sessions
    /// yield `PortError::Unauthorized`.
    async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid>;

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()>;

    // --- Profiles ---
    async fn list_profiles(&self, owner_id: Uuid) -> PortResult<Vec<Profile>>;

    async fn get_profile(&self, owner_id: Uuid, profile_id: Uuid) -> PortResult<Profile>;

    async fn create_profile(&self, owner_id: Uuid, draft: ProfileDraft) -> PortResult<Profile>;

    async fn update_profile(
        &self,
        owner_id: Uuid,
        profile_id: Uuid,
        draft: ProfileDraft,
    ) -> PortResult<Profile>;

    /// Returns the removed profile.
    async fn delete_profile(&self, owner_id: Uuid, profile_id: Uuid) -> PortResult<Profile>;

    // --- Catalog ---
    /// All products in a stable order.
    async fn list_products(&self) -> PortResult<Vec<Product>>;

    async fn get_product(&self, product_id: &str) -> PortResult<Product>;

    /// Inserts products whose ids are not stored yet; returns how many were added.
    async fn seed_products(&self, products: &[Product]) -> PortResult<usize>;

    // --- Cart ---
    async fn list_cart(&self, owner_id: Uuid) -> PortResult<Vec<CartItem>>;

    /// Adds `quantity` of a product, incrementing an existing line if present.
    async fn add_to_cart(
        &self,
        owner_id: Uuid,
        product_id: &str,
        quantity: i32,
    ) -> PortResult<CartAddition>;

    async fn remove_cart_item(&self, owner_id: Uuid, item_id: Uuid) -> PortResult<()>;

    async fn clear_cart(&self, owner_id: Uuid) -> PortResult<()>;
}
