//! Fixed catalog data served when the catalog API is unreachable.

use falcon_core::{Category, CategoryId, Price, Product, ProductId, ProductVariation, VariationId};

/// The five top-level categories.
#[must_use]
pub fn categories() -> Vec<Category> {
    [
        ("1", "Electronics", "electronics"),
        ("2", "Home Appliances", "home-appliances"),
        ("3", "Mother & Baby", "mother-baby"),
        ("4", "Automotive", "automotive"),
        ("5", "Sports Gear", "sports-gear"),
    ]
    .into_iter()
    .map(|(id, name, slug)| category(id, name, slug))
    .collect()
}

fn category(id: &str, name: &str, slug: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_string(),
        slug: slug.to_string(),
        description: None,
        image: None,
    }
}

/// Demo product shown in place of any product that cannot be fetched.
#[must_use]
pub fn product() -> Product {
    Product {
        id: ProductId::new("1"),
        name: "iPhone 15 Plus".to_string(),
        slug: "iphone-15-plus".to_string(),
        description: "The iPhone 15 Plus features a stunning 6.7-inch Super Retina XDR display, \
            advanced dual-camera system, and the powerful A16 Bionic chip. Experience incredible \
            performance, all-day battery life, and innovative features that make every day \
            extraordinary."
            .to_string(),
        specification: Some(
            [
                "Display: 6.7-inch Super Retina XDR OLED",
                "Processor: A16 Bionic chip",
                "Storage: 128GB, 256GB, 512GB",
                "Camera: 48MP Main + 12MP Ultra Wide",
                "Battery: All-day battery life",
                "Connectivity: 5G, Wi-Fi 6, Bluetooth 5.3",
                "Operating System: iOS 17",
            ]
            .join("\n"),
        ),
        price: Price::from_major(89_999),
        original_price: Some(Price::from_major(99_999)),
        discount: None,
        rating: 4.5,
        review_count: 1250,
        images: [404_280, 47_261, 699_122, 1_092_644]
            .iter()
            .map(|photo| {
                format!(
                    "https://images.pexels.com/photos/{photo}/pexels-photo-{photo}.jpeg\
                     ?auto=compress&cs=tinysrgb&w=400&h=400"
                )
            })
            .collect(),
        category: Some(category("1", "Electronics", "electronics")),
        variations: vec![
            variation("v1", "Blue", "128GB", 89_999, 10, "IP15P-BL-128"),
            variation("v2", "Blue", "256GB", 99_999, 8, "IP15P-BL-256"),
            variation("v3", "Pink", "128GB", 89_999, 5, "IP15P-PK-128"),
            variation("v4", "Pink", "256GB", 99_999, 3, "IP15P-PK-256"),
            variation("v5", "Black", "128GB", 89_999, 12, "IP15P-BK-128"),
            variation("v6", "Black", "256GB", 99_999, 7, "IP15P-BK-256"),
        ],
        in_stock: true,
        brand: Some("Apple".to_string()),
        tags: ["smartphone", "apple", "iphone", "5g"]
            .iter()
            .map(ToString::to_string)
            .collect(),
    }
}

fn variation(id: &str, color: &str, size: &str, price: i64, stock: u32, sku: &str) -> ProductVariation {
    ProductVariation {
        id: VariationId::new(id),
        color: Some(color.to_string()),
        size: Some(size.to_string()),
        price: Price::from_major(price),
        stock,
        sku: Some(sku.to_string()),
    }
}
