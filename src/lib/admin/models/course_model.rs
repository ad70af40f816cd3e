//! Course models: the console's `Course` and the backend's `Product`.
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::admin::helpers::{deserialize_number_or_string, deserialize_text_or_number};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Pemasaran")]
    Marketing,
    #[serde(rename = "Desain")]
    Design,
    #[serde(rename = "Pengembangan Diri")]
    SelfDevelopment,
    #[serde(rename = "Bisnis")]
    Business,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Marketing,
        Category::Design,
        Category::SelfDevelopment,
        Category::Business,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Marketing => "Pemasaran",
            Category::Design => "Desain",
            Category::SelfDevelopment => "Pengembangan Diri",
            Category::Business => "Bisnis",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category {0:?}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.label() == s.trim())
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// Course as shown in the console and kept in the `courses` snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub rating: f64,
    pub review_count: u32,
    pub course_image: String,
    pub tutor_name: String,
    pub tutor_image: String,
    pub position: String,
    pub company: String,
}

impl Course {
    /// `None` when the backend holds a category outside the known set.
    pub fn category(&self) -> Option<Category> {
        self.category.parse().ok()
    }
}

impl From<Product> for Course {
    fn from(product: Product) -> Self {
        Course {
            id: product.id.unwrap_or_default(),
            title: product.title,
            description: product.description,
            category: product.category,
            price: product.price,
            rating: product.rating,
            review_count: product.review_count,
            course_image: product.photos,
            tutor_name: product.mentor,
            tutor_image: product.avatar,
            position: product.rolementor,
            company: product.company,
        }
    }
}

/// Course as stored in the backend's `products` collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub photos: String,
    pub title: String,
    pub description: String,
    pub mentor: String,
    pub rolementor: String,
    pub avatar: String,
    pub company: String,
    #[serde(deserialize_with = "deserialize_number_or_string")]
    pub rating: f64,
    #[serde(rename = "reviewCount", deserialize_with = "deserialize_number_or_string")]
    pub review_count: u32,
    #[serde(deserialize_with = "deserialize_text_or_number")]
    pub price: String,
    pub category: String,
}
