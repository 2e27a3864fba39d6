//! crates/persona_cart_core/src/catalog.rs
//!
//! The sample catalog seeded into an empty product store.

use crate::domain::{Product, ProductCategory, ProductGender};
use rust_decimal::Decimal;

struct Seed {
    id: &'static str,
    name: &'static str,
    category: ProductCategory,
    cents: i64,
    sizes: Option<&'static [&'static str]>,
    gender: ProductGender,
    brand: &'static str,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "p1",
        name: "Men's Cotton T-Shirt",
        category: ProductCategory::Clothing,
        cents: 2499,
        sizes: Some(&["S", "M", "L", "XL"]),
        gender: ProductGender::Male,
        brand: "Generic Brand",
    },
    Seed {
        id: "p2",
        name: "Women's Blouse",
        category: ProductCategory::Clothing,
        cents: 3999,
        sizes: Some(&["XS", "S", "M", "L"]),
        gender: ProductGender::Female,
        brand: "Fashion Brand",
    },
    Seed {
        id: "p3",
        name: "Kids Summer Dress",
        category: ProductCategory::Clothing,
        cents: 1999,
        sizes: Some(&["2T", "3T", "4T", "5T"]),
        gender: ProductGender::Female,
        brand: "Kids Fashion",
    },
    Seed {
        id: "p4",
        name: "Men's Running Shoes",
        category: ProductCategory::Footwear,
        cents: 7999,
        sizes: Some(&["8", "9", "10", "11", "12"]),
        gender: ProductGender::Male,
        brand: "Sports Brand",
    },
    Seed {
        id: "p5",
        name: "Women's Sandals",
        category: ProductCategory::Footwear,
        cents: 3499,
        sizes: Some(&["6", "7", "8", "9"]),
        gender: ProductGender::Female,
        brand: "Summer Style",
    },
    Seed {
        id: "p6",
        name: "Kids Sneakers",
        category: ProductCategory::Footwear,
        cents: 2999,
        sizes: Some(&["1", "2", "3", "4"]),
        gender: ProductGender::Unisex,
        brand: "Kids Comfort",
    },
    Seed {
        id: "p7",
        name: "Dove Men+Care Body Wash",
        category: ProductCategory::PersonalCare,
        cents: 899,
        sizes: None,
        gender: ProductGender::Male,
        brand: "Dove",
    },
    Seed {
        id: "p8",
        name: "Nivea Women's Body Lotion",
        category: ProductCategory::PersonalCare,
        cents: 1299,
        sizes: None,
        gender: ProductGender::Female,
        brand: "Nivea",
    },
    Seed {
        id: "p9",
        name: "Johnson & Johnson Baby Shampoo",
        category: ProductCategory::PersonalCare,
        cents: 699,
        sizes: None,
        gender: ProductGender::Unisex,
        brand: "Johnson & Johnson",
    },
    Seed {
        id: "p10",
        name: "Head & Shoulders Anti-Dandruff",
        category: ProductCategory::PersonalCare,
        cents: 999,
        sizes: None,
        gender: ProductGender::Unisex,
        brand: "Head & Shoulders",
    },
    Seed {
        id: "p11",
        name: "Pantene Pro-V Shampoo",
        category: ProductCategory::PersonalCare,
        cents: 1199,
        sizes: None,
        gender: ProductGender::Female,
        brand: "Pantene",
    },
    Seed {
        id: "p12",
        name: "Old Spice Deodorant",
        category: ProductCategory::PersonalCare,
        cents: 799,
        sizes: None,
        gender: ProductGender::Male,
        brand: "Old Spice",
    },
];

/// The twelve products `p1`..`p12`, in seed order.
pub fn sample_products() -> Vec<Product> {
    SEEDS
        .iter()
        .map(|seed| Product {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            category: seed.category,
            price: Decimal::new(seed.cents, 2),
            sizes: seed
                .sizes
                .map(|sizes| sizes.iter().map(|s| s.to_string()).collect()),
            gender: seed.gender,
            brand: Some(seed.brand.to_string()),
        })
        .collect()
}
