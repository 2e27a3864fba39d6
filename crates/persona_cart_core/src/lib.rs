pub mod catalog;
pub mod domain;
pub mod personalization;
pub mod ports;

pub use domain::{
    AgeGroup, AuthSession, CartAddition, CartItem, Gender, Preferences, Product, ProductCategory,
    ProductGender, Profile, ProfileDraft, User, UserCredentials,
};
pub use personalization::{browse, personalize, CatalogQuery};
pub use ports::{DatabaseService, PortError, PortResult};
