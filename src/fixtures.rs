//! Fixture catalog: the seed data written by `catalog::seed_if_empty`.
//!
//! 22 products across 5 categories and 12 stores. Entities are immutable
//! after seeding; `distance` on a store is a display string, not a computed
//! value.

use crate::catalog::{Product, SpecField, SpecKind, Store};

/// The eight color swatches a requester can pick from.
pub const COLOR_SWATCHES: [&str; 8] = [
    "white", "black", "red", "blue", "green", "yellow", "gray", "silver",
];

fn text(key: &str, label: &str) -> SpecField {
    SpecField {
        key: key.to_string(),
        label: label.to_string(),
        kind: SpecKind::Text,
        options: None,
    }
}

fn select(key: &str, label: &str, options: &[&str]) -> SpecField {
    SpecField {
        key: key.to_string(),
        label: label.to_string(),
        kind: SpecKind::Select,
        options: Some(options.iter().map(|s| s.to_string()).collect()),
    }
}

fn color() -> SpecField {
    SpecField {
        key: "color".to_string(),
        label: "Color".to_string(),
        kind: SpecKind::Color,
        options: Some(COLOR_SWATCHES.iter().map(|s| s.to_string()).collect()),
    }
}

fn product(id: &str, name: &str, category: &str, specs: Vec<SpecField>) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        specs,
    }
}

pub fn products() -> Vec<Product> {
    vec![
        // Home & Kitchen
        product(
            "prod_001",
            "Rice Cooker",
            "home-kitchen",
            vec![
                text("brand", "Brand"),
                select("capacity", "Capacity", &["1L", "1.8L", "2.2L"]),
                color(),
            ],
        ),
        product(
            "prod_002",
            "Mixer Grinder",
            "home-kitchen",
            vec![
                text("brand", "Brand"),
                select("wattage", "Wattage", &["500W", "750W", "1000W"]),
                select("jars", "Number of Jars", &["2", "3", "4"]),
                color(),
            ],
        ),
        product(
            "prod_003",
            "Pressure Cooker",
            "home-kitchen",
            vec![
                text("brand", "Brand"),
                select("capacity", "Capacity", &["3L", "5L", "7L"]),
                select("material", "Material", &["Aluminum", "Stainless Steel"]),
            ],
        ),
        product(
            "prod_004",
            "Induction Cooktop",
            "home-kitchen",
            vec![
                text("brand", "Brand"),
                select("wattage", "Wattage", &["1200W", "1800W", "2000W"]),
                select("burners", "Burners", &["1", "2"]),
                color(),
            ],
        ),
        product(
            "prod_005",
            "Electric Kettle",
            "home-kitchen",
            vec![
                text("brand", "Brand"),
                select("capacity", "Capacity", &["1L", "1.5L", "2L"]),
                color(),
            ],
        ),
        // Hardware & Tools
        product(
            "prod_006",
            "Angle Grinder",
            "hardware-tools",
            vec![
                text("brand", "Brand"),
                select("wattage", "Wattage", &["850W", "1050W", "1400W"]),
                select("rpm", "RPM", &["10000", "11000", "12000"]),
                select("disc_size", "Disc Size", &["4 inch", "5 inch", "6 inch"]),
            ],
        ),
        product(
            "prod_007",
            "Drill Machine",
            "hardware-tools",
            vec![
                text("brand", "Brand"),
                select("wattage", "Wattage", &["500W", "650W", "850W"]),
                select("chuck_size", "Chuck Size", &["10mm", "13mm"]),
                select("type", "Type", &["Corded", "Cordless"]),
            ],
        ),
        product(
            "prod_008",
            "Circular Saw",
            "hardware-tools",
            vec![
                text("brand", "Brand"),
                select("wattage", "Wattage", &["1200W", "1400W", "1600W"]),
                select("blade_size", "Blade Size", &["7 inch", "9 inch"]),
            ],
        ),
        product(
            "prod_009",
            "Wrench Set",
            "hardware-tools",
            vec![
                text("brand", "Brand"),
                select("pieces", "Number of Pieces", &["6", "12", "24"]),
                select(
                    "material",
                    "Material",
                    &["Chrome Vanadium", "Carbon Steel"],
                ),
            ],
        ),
        // Electrical & Plumbing
        product(
            "prod_010",
            "LED Bulb",
            "electrical-plumbing",
            vec![
                text("brand", "Brand"),
                select("wattage", "Wattage", &["5W", "9W", "12W", "15W"]),
                select("base_type", "Base Type", &["B22", "E27"]),
                select(
                    "color_temp",
                    "Color Temperature",
                    &["Warm White", "Cool White", "Daylight"],
                ),
            ],
        ),
        product(
            "prod_011",
            "Ceiling Fan",
            "electrical-plumbing",
            vec![
                text("brand", "Brand"),
                select("sweep", "Sweep Size", &["1200mm", "1400mm"]),
                color(),
                select("speed", "Speed Settings", &["3 Speed", "4 Speed"]),
            ],
        ),
        product(
            "prod_012",
            "Water Heater",
            "electrical-plumbing",
            vec![
                text("brand", "Brand"),
                select("capacity", "Capacity", &["10L", "15L", "25L"]),
                select("type", "Type", &["Instant", "Storage"]),
            ],
        ),
        product(
            "prod_013",
            "Kitchen Sink",
            "electrical-plumbing",
            vec![
                text("brand", "Brand"),
                select("material", "Material", &["Stainless Steel", "Granite"]),
                select("bowl", "Bowl Type", &["Single Bowl", "Double Bowl"]),
                select("size", "Size", &["24 inch", "30 inch", "36 inch"]),
            ],
        ),
        product(
            "prod_014",
            "PVC Pipe",
            "electrical-plumbing",
            vec![
                text("brand", "Brand"),
                select(
                    "diameter",
                    "Diameter",
                    &["1/2 inch", "3/4 inch", "1 inch", "2 inch"],
                ),
                select("length", "Length", &["10 feet", "20 feet"]),
            ],
        ),
        // Mobile Accessories
        product(
            "prod_015",
            "Mobile Charger",
            "mobile-accessories",
            vec![
                text("brand", "Brand"),
                select("output_power", "Output Power", &["10W", "20W", "33W", "65W"]),
                select("type", "Type", &["Type-C", "Type-C PD", "Dual Port"]),
                select("cable_included", "Cable Included", &["Yes", "No"]),
            ],
        ),
        product(
            "prod_016",
            "Phone Case",
            "mobile-accessories",
            vec![
                text("brand", "Brand"),
                text("phone_model", "Phone Model"),
                select(
                    "material",
                    "Material",
                    &["Silicone", "Hard Plastic", "Leather"],
                ),
                color(),
            ],
        ),
        product(
            "prod_017",
            "Screen Protector",
            "mobile-accessories",
            vec![
                text("brand", "Brand"),
                text("phone_model", "Phone Model"),
                select("type", "Type", &["Tempered Glass", "Hydrogel", "Privacy"]),
            ],
        ),
        product(
            "prod_018",
            "Power Bank",
            "mobile-accessories",
            vec![
                text("brand", "Brand"),
                select(
                    "capacity",
                    "Capacity",
                    &["10000mAh", "20000mAh", "30000mAh"],
                ),
                select("fast_charging", "Fast Charging", &["Yes", "No"]),
                color(),
            ],
        ),
        // Apparel & Footwear
        product(
            "prod_019",
            "Men's Shirt",
            "apparel-footwear",
            vec![
                text("brand", "Brand"),
                select("size", "Size", &["S", "M", "L", "XL", "XXL"]),
                color(),
                select("fabric", "Fabric", &["Cotton", "Linen", "Polyester"]),
                select("fit", "Fit", &["Slim Fit", "Regular Fit", "Relaxed Fit"]),
            ],
        ),
        product(
            "prod_020",
            "Women's Jeans",
            "apparel-footwear",
            vec![
                text("brand", "Brand"),
                select("size", "Size", &["28", "30", "32", "34", "36"]),
                color(),
                select("fit", "Fit", &["Skinny", "Straight", "Bootcut"]),
            ],
        ),
        product(
            "prod_021",
            "Running Shoes",
            "apparel-footwear",
            vec![
                text("brand", "Brand"),
                select("size", "Size", &["7", "8", "9", "10", "11"]),
                color(),
                select("gender", "Gender", &["Men", "Women", "Unisex"]),
            ],
        ),
        product(
            "prod_022",
            "T-Shirt",
            "apparel-footwear",
            vec![
                text("brand", "Brand"),
                select("size", "Size", &["S", "M", "L", "XL", "XXL"]),
                color(),
                select("neck", "Neck Type", &["Round Neck", "V-Neck", "Polo"]),
            ],
        ),
    ]
}

fn store(
    id: &str,
    name: &str,
    category: &str,
    address: &str,
    distance: &str,
    phone: &str,
) -> Store {
    Store {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        address: address.to_string(),
        distance: distance.to_string(),
        phone: phone.to_string(),
    }
}

pub fn stores() -> Vec<Store> {
    vec![
        store(
            "store_001",
            "Kitchen World",
            "home-kitchen",
            "123 Main Street, Downtown",
            "0.5 km",
            "+91 98765 43210",
        ),
        store(
            "store_002",
            "Home Appliances Hub",
            "home-kitchen",
            "456 Market Road, Central",
            "1.2 km",
            "+91 98765 43211",
        ),
        store(
            "store_003",
            "Kitchen Paradise",
            "home-kitchen",
            "789 Park Avenue, North",
            "2.3 km",
            "+91 98765 43212",
        ),
        store(
            "store_004",
            "Power Tools Pro",
            "hardware-tools",
            "321 Industrial Area, East",
            "1.0 km",
            "+91 98765 43213",
        ),
        store(
            "store_005",
            "Hardware Central",
            "hardware-tools",
            "654 Construction Lane, West",
            "1.8 km",
            "+91 98765 43214",
        ),
        store(
            "store_006",
            "Bright Lights Electrical",
            "electrical-plumbing",
            "987 Electric Street, South",
            "0.8 km",
            "+91 98765 43215",
        ),
        store(
            "store_007",
            "Plumber's Choice",
            "electrical-plumbing",
            "147 Water Works Road, East",
            "1.5 km",
            "+91 98765 43216",
        ),
        store(
            "store_008",
            "Mobile Zone",
            "mobile-accessories",
            "258 Tech Plaza, Downtown",
            "0.3 km",
            "+91 98765 43217",
        ),
        store(
            "store_009",
            "Gadget Hub",
            "mobile-accessories",
            "369 Smart Street, Central",
            "0.9 km",
            "+91 98765 43218",
        ),
        store(
            "store_010",
            "Phone Accessories Plus",
            "mobile-accessories",
            "741 Digital Avenue, North",
            "1.7 km",
            "+91 98765 43219",
        ),
        store(
            "store_011",
            "Fashion Street",
            "apparel-footwear",
            "852 Style Boulevard, West",
            "0.6 km",
            "+91 98765 43220",
        ),
        store(
            "store_012",
            "Trendy Wear",
            "apparel-footwear",
            "963 Fashion District, South",
            "1.1 km",
            "+91 98765 43221",
        ),
    ]
}
