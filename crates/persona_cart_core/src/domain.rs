//! crates/persona_cart_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database; the enums carry the exact
//! wire spellings used by the JSON API and the stored rows.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Returned when a stored or submitted string names no known enum value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

//=========================================================================================
// Profiles
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    Child,
    Teen,
    Adult,
    Senior,
}

impl AgeGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Child => "Child",
            Self::Teen => "Teen",
            Self::Adult => "Adult",
            Self::Senior => "Senior",
        }
    }
}

impl FromStr for AgeGroup {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Child" => Ok(Self::Child),
            "Teen" => Ok(Self::Teen),
            "Adult" => Ok(Self::Adult),
            "Senior" => Ok(Self::Senior),
            other => Err(UnknownVariant {
                kind: "age group",
                value: other.to_string(),
            }),
        }
    }
}

/// The gender a profile shops as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

impl FromStr for Gender {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Self::Male),
            "Female" => Ok(Self::Female),
            "Other" => Ok(Self::Other),
            other => Err(UnknownVariant {
                kind: "gender",
                value: other.to_string(),
            }),
        }
    }
}

/// Shopping preferences attached to a profile. Every field is independently
/// optional; an empty string is treated the same as an absent value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub shirt_size: Option<String>,
    #[serde(default)]
    pub shoe_size: Option<String>,
    #[serde(default)]
    pub personal_care: Option<String>,
}

impl Preferences {
    pub fn shirt_size(&self) -> Option<&str> {
        non_empty(self.shirt_size.as_deref())
    }

    pub fn shoe_size(&self) -> Option<&str> {
        non_empty(self.shoe_size.as_deref())
    }

    pub fn personal_care(&self) -> Option<&str> {
        non_empty(self.personal_care.as_deref())
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// A named shopping persona owned by exactly one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub age_group: AgeGroup,
    pub gender: Gender,
    pub avatar: Option<String>,
    pub preferences: Preferences,
}

/// The mutable part of a profile, as submitted on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: String,
    pub age_group: AgeGroup,
    pub gender: Gender,
    pub avatar: Option<String>,
    pub preferences: Preferences,
}

impl ProfileDraft {
    pub fn into_profile(self, id: Uuid, owner_id: Uuid) -> Profile {
        Profile {
            id,
            owner_id,
            name: self.name,
            age_group: self.age_group,
            gender: self.gender,
            avatar: self.avatar,
            preferences: self.preferences,
        }
    }
}

//=========================================================================================
// Products
//=========================================================================================

/// Product category. Values outside the three known ones are carried as
/// `Other` and only ever see the gender gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    #[serde(rename = "clothing")]
    Clothing,
    #[serde(rename = "footwear")]
    Footwear,
    #[serde(rename = "personal-care")]
    PersonalCare,
    #[serde(rename = "other", other)]
    Other,
}

impl ProductCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clothing => "clothing",
            Self::Footwear => "footwear",
            Self::PersonalCare => "personal-care",
            Self::Other => "other",
        }
    }

    /// Lenient parse used for stored rows: unknown values become `Other`.
    pub fn from_stored(s: &str) -> Self {
        s.parse().unwrap_or(Self::Other)
    }
}

impl FromStr for ProductCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clothing" => Ok(Self::Clothing),
            "footwear" => Ok(Self::Footwear),
            "personal-care" => Ok(Self::PersonalCare),
            "other" => Ok(Self::Other),
            other => Err(UnknownVariant {
                kind: "category",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductGender {
    Male,
    Female,
    Unisex,
}

impl ProductGender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Unisex => "Unisex",
        }
    }

    /// `Unisex` suits every profile; otherwise the genders must be the same.
    pub fn suits(self, gender: Gender) -> bool {
        match self {
            Self::Unisex => true,
            Self::Male => gender == Gender::Male,
            Self::Female => gender == Gender::Female,
        }
    }
}

impl FromStr for ProductGender {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Self::Male),
            "Female" => Ok(Self::Female),
            "Unisex" => Ok(Self::Unisex),
            other => Err(UnknownVariant {
                kind: "product gender",
                value: other.to_string(),
            }),
        }
    }
}

/// Immutable catalog reference data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: ProductCategory,
    pub price: Decimal,
    pub sizes: Option<Vec<String>>,
    pub gender: ProductGender,
    pub brand: Option<String>,
}

//=========================================================================================
// Cart
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub product_id: String,
    pub quantity: i32,
}

/// Outcome of adding a product to a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAddition {
    /// The product was not in the cart yet; a new line was created.
    Created(CartItem),
    /// The product was already in the cart; its quantity was increased.
    Incremented(CartItem),
}

impl CartAddition {
    pub fn item(&self) -> &CartItem {
        match self {
            Self::Created(item) | Self::Incremented(item) => item,
        }
    }

    pub fn into_item(self) -> CartItem {
        match self {
            Self::Created(item) | Self::Incremented(item) => item,
        }
    }
}

//=========================================================================================
// Accounts
//=========================================================================================

// Represents an account - used throughout app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: Uuid,
    pub email: String,
}

// Only used internally for login/signup - contains sensitive data
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user_id: Uuid,
    pub email: String,
    pub hashed_password: String,
}

// Represents a login session (cookie or bearer token)
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub id: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_preferences_count_as_absent() {
        let prefs = Preferences {
            shirt_size: Some(String::new()),
            shoe_size: Some("9".to_string()),
            personal_care: None,
        };
        assert_eq!(prefs.shirt_size(), None);
        assert_eq!(prefs.shoe_size(), Some("9"));
        assert_eq!(prefs.personal_care(), None);
    }

    #[test]
    fn unisex_suits_every_gender() {
        for gender in [Gender::Male, Gender::Female, Gender::Other] {
            assert!(ProductGender::Unisex.suits(gender));
        }
        assert!(ProductGender::Male.suits(Gender::Male));
        assert!(!ProductGender::Male.suits(Gender::Female));
        assert!(!ProductGender::Female.suits(Gender::Other));
    }

    #[test]
    fn category_uses_wire_spelling() {
        let json = serde_json::to_string(&ProductCategory::PersonalCare).unwrap();
        assert_eq!(json, "\"personal-care\"");
        let parsed: ProductCategory = serde_json::from_str("\"gadgets\"").unwrap();
        assert_eq!(parsed, ProductCategory::Other);
        assert_eq!(ProductCategory::from_stored("footwear"), ProductCategory::Footwear);
        assert!("Clothing".parse::<ProductCategory>().is_err());
    }

    #[test]
    fn preferences_use_camel_case_and_tolerate_missing_fields() {
        let prefs: Preferences = serde_json::from_str(r#"{"shirtSize":"M"}"#).unwrap();
        assert_eq!(prefs.shirt_size(), Some("M"));
        assert_eq!(prefs.shoe_size(), None);
    }

    #[test]
    fn session_expiry_is_inclusive() {
        let now = Utc::now();
        let session = AuthSession {
            id: "t".to_string(),
            user_id: Uuid::new_v4(),
            expires_at: now,
        };
        assert!(session.is_expired(now));
        assert!(!session.is_expired(now - chrono::Duration::seconds(1)));
    }
}
