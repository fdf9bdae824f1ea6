//! Product Models
//!
//! Two concrete product subtypes stored in disjoint tables. The old
//! generic "content type + object id" reference is replaced with an
//! explicit tagged union: [`ProductKind`] names the table, and
//! [`ProductRef`] carries the tag plus the record id. [`AnyProduct`]
//! is the sum type handed to presentation code.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use surrealdb::sql::Thing;

/// Product subtype tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    Notebook,
    Smartphone,
}

impl ProductKind {
    /// Table holding this subtype
    pub fn table(&self) -> &'static str {
        match self {
            ProductKind::Notebook => "notebook",
            ProductKind::Smartphone => "smartphone",
        }
    }

    /// Canonical category slug for this subtype, used by the admin
    /// category picker
    pub fn category_slug(&self) -> &'static str {
        match self {
            ProductKind::Notebook => "notebooks",
            ProductKind::Smartphone => "smartphones",
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

impl FromStr for ProductKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notebook" => Ok(ProductKind::Notebook),
            "smartphone" => Ok(ProductKind::Smartphone),
            other => Err(format!("Unknown product kind: {}", other)),
        }
    }
}

/// Reference to one product of either subtype
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRef {
    pub kind: ProductKind,
    pub id: Thing,
}

/// Capabilities shared by every product subtype
pub trait StoreProduct {
    fn get_title(&self) -> &str;
    fn get_slug(&self) -> &str;
    fn get_price(&self) -> Decimal;
}

// =============================================================================
// Notebook
// =============================================================================

/// Notebook product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    pub id: Option<Thing>,
    pub title: String,
    pub description: Option<String>,
    /// URL slug, unique within the table
    pub slug: String,
    /// Relative path of the stored image
    #[serde(default)]
    pub image: String,
    pub price: Decimal,
    /// Record link to category
    pub category: Thing,
    /// Creation time in Unix milliseconds, used for the latest feed
    #[serde(default)]
    pub created_at: i64,

    pub diagonal: String,
    pub display_type: String,
    pub processor_freq: String,
    pub ram: String,
    pub video: String,
    pub time_without_charge: String,
}

impl StoreProduct for Notebook {
    fn get_title(&self) -> &str {
        &self.title
    }

    fn get_slug(&self) -> &str {
        &self.slug
    }

    fn get_price(&self) -> Decimal {
        self.price
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotebookCreate {
    pub title: String,
    pub description: Option<String>,
    pub slug: String,
    pub price: Decimal,
    /// Category id ("category:xxx" or bare id)
    pub category: String,

    pub diagonal: String,
    pub display_type: String,
    pub processor_freq: String,
    pub ram: String,
    pub video: String,
    pub time_without_charge: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotebookUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagonal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processor_freq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_without_charge: Option<String>,
}

// =============================================================================
// Smartphone
// =============================================================================

/// Smartphone product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Smartphone {
    pub id: Option<Thing>,
    pub title: String,
    pub description: Option<String>,
    pub slug: String,
    #[serde(default)]
    pub image: String,
    pub price: Decimal,
    pub category: Thing,
    #[serde(default)]
    pub created_at: i64,

    pub diagonal: String,
    pub display_type: String,
    pub resolution: String,
    pub accum_volume: String,
    pub ram: String,
    /// Whether an SD card slot is present
    #[serde(default = "default_true")]
    pub sd: bool,
    /// Maximum supported SD card size; cleared when `sd` is false
    pub sd_volume_max: Option<String>,
    pub main_cam_mp: String,
    pub frontal_cam_mp: String,
}

fn default_true() -> bool {
    true
}

impl Smartphone {
    /// Display value for the SD slot row
    pub fn sd_display(&self) -> &'static str {
        if self.sd { "Да" } else { "Нет" }
    }
}

impl StoreProduct for Smartphone {
    fn get_title(&self) -> &str {
        &self.title
    }

    fn get_slug(&self) -> &str {
        &self.slug
    }

    fn get_price(&self) -> Decimal {
        self.price
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartphoneCreate {
    pub title: String,
    pub description: Option<String>,
    pub slug: String,
    pub price: Decimal,
    pub category: String,

    pub diagonal: String,
    pub display_type: String,
    pub resolution: String,
    pub accum_volume: String,
    pub ram: String,
    pub sd: Option<bool>,
    pub sd_volume_max: Option<String>,
    pub main_cam_mp: String,
    pub frontal_cam_mp: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SmartphoneUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagonal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accum_volume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sd: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sd_volume_max: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_cam_mp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontal_cam_mp: Option<String>,
}

// =============================================================================
// AnyProduct
// =============================================================================

/// Sum type over the product subtypes, used by the latest feed and the
/// specification renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnyProduct {
    Notebook(Notebook),
    Smartphone(Smartphone),
}

impl AnyProduct {
    pub fn kind(&self) -> ProductKind {
        match self {
            AnyProduct::Notebook(_) => ProductKind::Notebook,
            AnyProduct::Smartphone(_) => ProductKind::Smartphone,
        }
    }

    pub fn created_at(&self) -> i64 {
        match self {
            AnyProduct::Notebook(n) => n.created_at,
            AnyProduct::Smartphone(s) => s.created_at,
        }
    }
}

impl StoreProduct for AnyProduct {
    fn get_title(&self) -> &str {
        match self {
            AnyProduct::Notebook(n) => n.get_title(),
            AnyProduct::Smartphone(s) => s.get_title(),
        }
    }

    fn get_slug(&self) -> &str {
        match self {
            AnyProduct::Notebook(n) => n.get_slug(),
            AnyProduct::Smartphone(s) => s.get_slug(),
        }
    }

    fn get_price(&self) -> Decimal {
        match self {
            AnyProduct::Notebook(n) => n.get_price(),
            AnyProduct::Smartphone(s) => s.get_price(),
        }
    }
}
