//! crates/persona_cart_core/src/personalization.rs
//!
//! Narrows the product catalog to what a profile should see.
//!
//! Every check here is a stable filter over an explicit product list: no
//! re-sorting, no I/O, no shared state.

use crate::domain::{non_empty, Product, ProductCategory, Profile};

/// Returns the products `profile` should see, in input order.
///
/// Without a profile the list is returned unchanged.
pub fn personalize(profile: Option<&Profile>, products: Vec<Product>) -> Vec<Product> {
    match profile {
        None => products,
        Some(profile) => products
            .into_iter()
            .filter(|product| matches_profile(profile, product))
            .collect(),
    }
}

/// The conjunction of every gate for a single product.
pub fn matches_profile(profile: &Profile, product: &Product) -> bool {
    if !product.gender.suits(profile.gender) {
        return false;
    }

    let prefs = &profile.preferences;
    match product.category {
        ProductCategory::Clothing => size_allowed(prefs.shirt_size(), product.sizes.as_deref()),
        ProductCategory::Footwear => size_allowed(prefs.shoe_size(), product.sizes.as_deref()),
        ProductCategory::PersonalCare => {
            brand_allowed(prefs.personal_care(), non_empty(product.brand.as_deref()))
        }
        ProductCategory::Other => true,
    }
}

// Missing preference or missing size data means no constraint.
fn size_allowed(preferred: Option<&str>, sizes: Option<&[String]>) -> bool {
    match (preferred, sizes) {
        (Some(preferred), Some(sizes)) => sizes.iter().any(|s| s == preferred),
        _ => true,
    }
}

// The preference text must contain the brand, not the other way round.
fn brand_allowed(preference_text: Option<&str>, brand: Option<&str>) -> bool {
    match (preference_text, brand) {
        (Some(text), Some(brand)) => text.to_lowercase().contains(&brand.to_lowercase()),
        _ => true,
    }
}

//=========================================================================================
// Catalog browsing
//=========================================================================================

/// Search term and category selector applied on top of personalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub category: Option<ProductCategory>,
}

impl CatalogQuery {
    fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category {
            if product.category != category {
                return false;
            }
        }
        match non_empty(self.search.as_deref()) {
            Some(term) => {
                let term = term.to_lowercase();
                product.name.to_lowercase().contains(&term)
                    || product
                        .brand
                        .as_deref()
                        .is_some_and(|b| b.to_lowercase().contains(&term))
            }
            None => true,
        }
    }
}

/// Applies the search term, then the category, then the profile's gates.
pub fn browse(query: &CatalogQuery, profile: Option<&Profile>, products: Vec<Product>) -> Vec<Product> {
    let narrowed = products.into_iter().filter(|p| query.matches(p)).collect();
    personalize(profile, narrowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_products;
    use crate::domain::{AgeGroup, Gender, Preferences, ProductGender};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn profile(gender: Gender, shirt: Option<&str>, shoe: Option<&str>, care: Option<&str>) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name: "Sam".to_string(),
            age_group: AgeGroup::Adult,
            gender,
            avatar: None,
            preferences: Preferences {
                shirt_size: shirt.map(str::to_string),
                shoe_size: shoe.map(str::to_string),
                personal_care: care.map(str::to_string),
            },
        }
    }

    fn product(
        id: &str,
        category: ProductCategory,
        gender: ProductGender,
        sizes: Option<&[&str]>,
        brand: Option<&str>,
    ) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            category,
            price: Decimal::new(999, 2),
            sizes: sizes.map(|s| s.iter().map(|v| v.to_string()).collect()),
            gender,
            brand: brand.map(str::to_string),
        }
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn no_profile_returns_list_unchanged() {
        let products = sample_products();
        assert_eq!(personalize(None, products.clone()), products);
        assert!(personalize(None, Vec::new()).is_empty());
    }

    #[test]
    fn gender_gate_hides_other_gender_but_not_unisex() {
        let female = profile(Gender::Female, None, None, None);
        let products = vec![
            product("m", ProductCategory::Clothing, ProductGender::Male, None, None),
            product("u", ProductCategory::Clothing, ProductGender::Unisex, None, None),
            product("f", ProductCategory::Clothing, ProductGender::Female, None, None),
        ];
        assert_eq!(ids(&personalize(Some(&female), products)), vec!["u", "f"]);
    }

    #[test]
    fn other_gender_only_sees_unisex() {
        let other = profile(Gender::Other, None, None, None);
        let kept = personalize(Some(&other), sample_products());
        assert_eq!(ids(&kept), vec!["p6", "p9", "p10"]);
    }

    #[test]
    fn clothing_size_must_be_offered() {
        let p = profile(Gender::Male, Some("M"), None, None);
        let with_m = product("a", ProductCategory::Clothing, ProductGender::Male, Some(&["S", "M", "L"]), None);
        let without_m = product("b", ProductCategory::Clothing, ProductGender::Male, Some(&["S", "L"]), None);
        assert!(matches_profile(&p, &with_m));
        assert!(!matches_profile(&p, &without_m));
    }

    #[test]
    fn missing_size_preference_is_no_constraint() {
        let p = profile(Gender::Male, None, Some(""), None);
        let shirt = product("a", ProductCategory::Clothing, ProductGender::Male, Some(&["XS"]), None);
        let shoe = product("b", ProductCategory::Footwear, ProductGender::Male, Some(&["4"]), None);
        assert!(matches_profile(&p, &shirt));
        assert!(matches_profile(&p, &shoe));
    }

    #[test]
    fn missing_size_data_is_no_constraint() {
        let p = profile(Gender::Male, Some("M"), Some("10"), None);
        let shirt = product("a", ProductCategory::Clothing, ProductGender::Male, None, None);
        let shoe = product("b", ProductCategory::Footwear, ProductGender::Male, None, None);
        assert!(matches_profile(&p, &shirt));
        assert!(matches_profile(&p, &shoe));
    }

    #[test]
    fn empty_size_list_rejects_a_size_preference() {
        let p = profile(Gender::Male, Some("M"), None, None);
        let shirt = product("a", ProductCategory::Clothing, ProductGender::Male, Some(&[]), None);
        assert!(!matches_profile(&p, &shirt));
    }

    #[test]
    fn shoe_size_is_not_applied_to_clothing() {
        let p = profile(Gender::Male, None, Some("10"), None);
        let shirt = product("a", ProductCategory::Clothing, ProductGender::Male, Some(&["S", "M"]), None);
        assert!(matches_profile(&p, &shirt));
    }

    #[test]
    fn personal_care_brand_is_a_case_insensitive_substring_of_preference() {
        let p = profile(Gender::Male, None, None, Some("Dove Men+Care Body Wash"));
        let dove = product("a", ProductCategory::PersonalCare, ProductGender::Unisex, None, Some("DOVE"));
        let nivea = product("b", ProductCategory::PersonalCare, ProductGender::Unisex, None, Some("Nivea"));
        let unbranded = product("c", ProductCategory::PersonalCare, ProductGender::Unisex, None, None);
        assert!(matches_profile(&p, &dove));
        assert!(!matches_profile(&p, &nivea));
        assert!(matches_profile(&p, &unbranded));
    }

    #[test]
    fn brand_containing_preference_does_not_match() {
        let p = profile(Gender::Male, None, None, Some("Dove"));
        let longer = product("a", ProductCategory::PersonalCare, ProductGender::Male, None, Some("Dove Men"));
        assert!(!matches_profile(&p, &longer));
    }

    #[test]
    fn uncategorised_products_only_see_the_gender_gate() {
        let p = profile(Gender::Female, Some("M"), Some("7"), Some("Nivea"));
        let gadget = product("a", ProductCategory::Other, ProductGender::Unisex, Some(&["XL"]), Some("Acme"));
        let male_gadget = product("b", ProductCategory::Other, ProductGender::Male, None, None);
        assert!(matches_profile(&p, &gadget));
        assert!(!matches_profile(&p, &male_gadget));
    }

    #[test]
    fn survivors_keep_their_relative_order() {
        let p = profile(Gender::Female, None, None, None);
        let products: Vec<Product> = sample_products().into_iter().rev().collect();
        let kept = personalize(Some(&p), products);
        assert_eq!(ids(&kept), vec!["p11", "p10", "p9", "p8", "p6", "p5", "p3", "p2"]);
    }

    #[test]
    fn male_profile_over_sample_catalog() {
        let p = profile(Gender::Male, Some("L"), Some("10"), Some("Old Spice"));
        let kept = personalize(Some(&p), sample_products());
        assert_eq!(ids(&kept), vec!["p1", "p4", "p12"]);
    }

    #[test]
    fn browse_narrows_by_search_term_on_name_or_brand() {
        let query = CatalogQuery {
            search: Some("shampoo".to_string()),
            category: None,
        };
        assert_eq!(ids(&browse(&query, None, sample_products())), vec!["p9", "p11"]);

        let by_brand = CatalogQuery {
            search: Some("sports BRAND".to_string()),
            category: None,
        };
        assert_eq!(ids(&browse(&by_brand, None, sample_products())), vec!["p4"]);
    }

    #[test]
    fn browse_combines_category_and_profile() {
        let query = CatalogQuery {
            search: None,
            category: Some(ProductCategory::Footwear),
        };
        let p = profile(Gender::Female, None, Some("8"), None);
        assert_eq!(ids(&browse(&query, None, sample_products())), vec!["p4", "p5", "p6"]);
        assert_eq!(ids(&browse(&query, Some(&p), sample_products())), vec!["p5"]);
    }

    #[test]
    fn empty_search_term_is_ignored() {
        let query = CatalogQuery {
            search: Some(String::new()),
            category: None,
        };
        assert_eq!(browse(&query, None, sample_products()).len(), 12);
    }
}
