//! The fixed checklist catalog
//!
//! Categories and their item labels are compiled in and never edited at
//! runtime. Order matters: it is the render order and the export order.

use std::fmt;
use std::str::FromStr;

/// Separator between category id and item index in a composite key
pub const KEY_SEPARATOR: &str = "::";

/// A checklist category with its ordered items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub items: &'static [&'static str],
}

/// One entry of the catalog, addressed by category and position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogItem {
    pub category_id: &'static str,
    pub index: usize,
    pub label: &'static str,
}

impl CatalogItem {
    pub fn key(&self) -> String {
        make_key(self.category_id, self.index)
    }
}

impl Category {
    /// Items of this category in catalog order
    pub fn entries(&self) -> impl Iterator<Item = CatalogItem> + '_ {
        self.items
            .iter()
            .enumerate()
            .map(move |(index, label)| CatalogItem {
                category_id: self.id,
                index,
                label: *label,
            })
    }

    /// Composite keys of this category in catalog order
    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.items.len()).map(move |i| make_key(self.id, i))
    }
}

pub static CATALOG: &[Category] = &[
    Category {
        id: "training-floor",
        name: "Training Floor / Main Area",
        items: &[
            "Sweep all hard floors",
            "Mop all hard floors",
            "Disinfect mats and training surfaces",
            "Vacuum carpeted areas",
            "Clean all mirrors",
            "Wipe down heavy bags, pads, and equipment",
            "Organize and straighten equipment storage",
            "Check equipment for damage or wear",
            "Empty training area trash cans",
            "Remove scuff marks from floors",
        ],
    },
    Category {
        id: "lobby",
        name: "Lobby / Front Desk / Waiting Area",
        items: &[
            "Clean and organize the waiting/sitting area",
            "Wipe down front desk and counter surfaces",
            "Organize brochures, flyers, and marketing materials",
            "Clean entrance doors and glass",
            "Empty lobby trash cans",
            "Dust shelves, displays, and surfaces",
            "Check and straighten retail/pro shop display",
            "Vacuum or sweep lobby floors",
            "Wipe down chairs and benches",
            "Ensure sign-in area is clean with working pens",
        ],
    },
    Category {
        id: "bathrooms",
        name: "Bathrooms / Changing Areas",
        items: &[
            "Clean and disinfect toilets",
            "Clean sinks and countertops",
            "Clean bathroom mirrors",
            "Mop bathroom floors",
            "Restock toilet paper",
            "Restock paper towels or refill hand dryer",
            "Refill hand soap dispensers",
            "Empty bathroom trash cans",
            "Check for plumbing issues or leaks",
            "Wipe down changing area benches and lockers",
            "Check showers if applicable (clean and drain)",
        ],
    },
    Category {
        id: "windows-walls",
        name: "Windows, Walls & Fixtures",
        items: &[
            "Clean interior windows",
            "Wipe down window sills and ledges",
            "Dust all pictures, frames, and wall decor",
            "Clean light switches and door handles",
            "Check and clean light fixtures",
            "Wipe down baseboards (spot check)",
            "Check for scuffs or marks on walls",
            "Ensure all interior signage is straight and clean",
        ],
    },
    Category {
        id: "intro-room",
        name: "Intro / Consultation Room",
        items: &[
            "Clean and organize table and chairs",
            "Stock enrollment forms and pens",
            "Ensure presentation materials are ready",
            "Check that TV/screen is working (if applicable)",
            "Dust and wipe all surfaces",
            "Empty trash can",
            "Ensure room smells fresh and inviting",
        ],
    },
    Category {
        id: "exterior",
        name: "Exterior / Entrance",
        items: &[
            "Sweep entrance walkway and entryway",
            "Clean front windows and door glass",
            "Check exterior signage (lit, clean, straight)",
            "Pick up any litter around entrance",
            "Check parking lot for debris or hazards",
            "Ensure outdoor lighting is working",
            "Water plants or landscaping (if applicable)",
            "Clean welcome mat or entry rug",
        ],
    },
    Category {
        id: "brand-standards",
        name: "Brand Standards & Atmosphere",
        items: &[
            "Music/sound system on and at proper volume",
            "Proper lighting throughout facility",
            "Temperature and AC/heat set correctly",
            "Fresh air and ventilation adequate",
            "Brand materials and banners properly displayed",
            "Staff in proper uniform/dress code",
            "Achievement boards and student photos current",
            "Schedule boards and class info updated",
            "Overall facility smells clean and fresh",
        ],
    },
];

/// Build the composite key `categoryId::itemIndex`
pub fn make_key(category_id: &str, index: usize) -> String {
    format!("{}{}{}", category_id, KEY_SEPARATOR, index)
}

/// Total number of items across all categories
pub fn total_items(catalog: &[Category]) -> usize {
    catalog.iter().map(|c| c.items.len()).sum()
}

/// Find a category by id
pub fn find_category<'a>(catalog: &'a [Category], id: &str) -> Option<&'a Category> {
    catalog.iter().find(|c| c.id == id)
}

/// Look up the catalog entry for a composite key, if it still exists
pub fn lookup(catalog: &[Category], key: &CompositeKey) -> Option<CatalogItem> {
    let category = find_category(catalog, &key.category_id)?;
    category.entries().nth(key.index)
}

/// A parsed `categoryId::itemIndex` key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeKey {
    pub category_id: String,
    pub index: usize,
}

impl CompositeKey {
    pub fn new(category_id: impl Into<String>, index: usize) -> Self {
        Self {
            category_id: category_id.into(),
            index,
        }
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.category_id, KEY_SEPARATOR, self.index)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("Missing '::' separator in key: {0}")]
    MissingSeparator(String),

    #[error("Empty category id in key: {0}")]
    EmptyCategory(String),

    #[error("Invalid item index '{index}' in key: {key}")]
    InvalidIndex { key: String, index: String },
}

impl FromStr for CompositeKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Category ids may not contain the separator, the index never does
        let (category_id, index) = s
            .rsplit_once(KEY_SEPARATOR)
            .ok_or_else(|| KeyParseError::MissingSeparator(s.to_string()))?;

        if category_id.is_empty() {
            return Err(KeyParseError::EmptyCategory(s.to_string()));
        }

        let index = index.parse::<usize>().map_err(|_| KeyParseError::InvalidIndex {
            key: s.to_string(),
            index: index.to_string(),
        })?;

        Ok(CompositeKey::new(category_id, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_shape() {
        assert_eq!(CATALOG.len(), 7);
        assert_eq!(total_items(CATALOG), 63);
        assert_eq!(CATALOG[0].id, "training-floor");
        assert_eq!(CATALOG[6].id, "brand-standards");
    }

    #[test]
    fn test_category_ids_unique() {
        let ids: HashSet<_> = CATALOG.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), CATALOG.len());
        assert!(CATALOG.iter().all(|c| !c.id.contains(KEY_SEPARATOR)));
    }

    #[test]
    fn test_make_key() {
        assert_eq!(make_key("lobby", 3), "lobby::3");
        let keys: Vec<_> = CATALOG[4].keys().collect();
        assert_eq!(keys.first().map(String::as_str), Some("intro-room::0"));
        assert_eq!(keys.len(), 7);
    }

    #[test]
    fn test_parse_key() {
        let key: CompositeKey = "bathrooms::10".parse().unwrap();
        assert_eq!(key, CompositeKey::new("bathrooms", 10));
        assert_eq!(key.to_string(), "bathrooms::10");
    }

    #[test]
    fn test_parse_key_errors() {
        assert!(matches!(
            "bathrooms".parse::<CompositeKey>(),
            Err(KeyParseError::MissingSeparator(_))
        ));
        assert!(matches!(
            "::2".parse::<CompositeKey>(),
            Err(KeyParseError::EmptyCategory(_))
        ));
        assert!(matches!(
            "lobby::two".parse::<CompositeKey>(),
            Err(KeyParseError::InvalidIndex { .. })
        ));
    }

    #[test]
    fn test_lookup() {
        let item = lookup(CATALOG, &CompositeKey::new("exterior", 7)).unwrap();
        assert_eq!(item.label, "Clean welcome mat or entry rug");
        assert!(lookup(CATALOG, &CompositeKey::new("exterior", 8)).is_none());
        assert!(lookup(CATALOG, &CompositeKey::new("garage", 0)).is_none());
    }
}
