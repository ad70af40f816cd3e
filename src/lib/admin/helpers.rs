use std::{fmt::Display, path::Path, str::FromStr};

use figment::{
    providers::{Env, Format, Json},
    Figment,
};
use log::{debug, info, warn};
use serde::{
    de::{DeserializeOwned, IgnoredAny},
    Deserialize, Deserializer,
};
use serde_json::Value;

use crate::admin::models::{Category, Collection, Config, Course, Product, User};

/// Unit marker the backend keeps at the end of every price, `"300K"`.
pub const PRICE_UNIT_SUFFIX: &str = "K";

pub fn read_config(config_json_path: &Path) -> Result<Config, figment::Error> {
    let config: Config = Figment::new()
        .merge(Json::file(config_json_path))
        .merge(Env::prefixed("COURSE_"))
        .extract()?;
    info!(
        "Read config from {}, backend at {}",
        config_json_path.display(),
        config.api_base_url
    );
    Ok(config)
}

pub fn log_all_users(users: &[User]) -> () {
    for user in users.iter() {
        debug!(
            "User {} <{}>, {} {}, role {:?}",
            user.name, user.email, user.gender, user.phone, user.role
        );
    }
}

pub fn log_all_courses(courses: &[Course]) -> () {
    for course in courses.iter() {
        debug!(
            "Course {} [{}] by {}, Rp {}",
            course.title, course.category, course.tutor_name, course.price
        );
    }
}

pub fn strip_price_unit(price: &str) -> &str {
    let price = price.trim();
    price.strip_suffix(PRICE_UNIT_SUFFIX).unwrap_or(price).trim_end()
}

pub fn with_price_unit(price: &str) -> String {
    format!("{}{}", strip_price_unit(price), PRICE_UNIT_SUFFIX)
}

pub fn round_rating(rating: f64) -> f64 {
    (rating * 10.0).round() / 10.0
}

/// Numbers typed into the backend's dashboard sometimes come back quoted,
/// blank or null. Anything that doesn't parse reads as the default value.
pub fn deserialize_number_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de> + Default,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString<N> {
        Number(N),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match NumberOrString::<T>::deserialize(deserializer)? {
        NumberOrString::Number(value) => value,
        NumberOrString::Text(text) => match text.trim().parse() {
            Ok(value) => value,
            Err(err) => {
                if !text.trim().is_empty() {
                    warn!("Unreadable number {:?}: {}", text, err);
                }
                T::default()
            }
        },
        NumberOrString::Other(_) => T::default(),
    })
}

pub fn deserialize_text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(serde_json::Number),
        Other(IgnoredAny),
    }

    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(text) => text,
        TextOrNumber::Number(number) => number.to_string(),
        TextOrNumber::Other(_) => String::new(),
    })
}

/// Decodes a collection listing one record at a time. A record that still
/// doesn't fit is logged and left out, the rest of the listing is kept.
pub fn decode_records<T: DeserializeOwned>(collection: Collection, records: Vec<Value>) -> Vec<T> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value(record) {
            Ok(item) => Some(item),
            Err(err) => {
                warn!("Skipping malformed {} record: {}", collection, err);
                None
            }
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn default_product(
    index: u8,
    title: &str,
    description: &str,
    mentor: &str,
    rolementor: &str,
    company: &str,
    rating: f64,
    review_count: u32,
    price: &str,
    category: Category,
) -> Product {
    Product {
        id: None,
        photos: format!("/images/cards/card{}.png", index),
        title: title.to_owned(),
        description: description.to_owned(),
        mentor: mentor.to_owned(),
        rolementor: rolementor.to_owned(),
        avatar: format!("/images/tutors/tutor-card{}.png", index),
        company: company.to_owned(),
        rating,
        review_count,
        price: price.to_owned(),
        category: category.label().to_owned(),
    }
}

/// Courses the catalog is restored to by "Reset Default Courses".
pub fn default_courses() -> Vec<Product> {
    vec![
        default_product(
            1,
            "Big 4 Auditor Financial Analyst",
            "Mulai transformasi dengan instruktur profesional, harga yang terjangkau, dan sistem pembelajaran yang mudah dipahami.",
            "Jenna Ortega",
            "Senior Accountant",
            "Gojek",
            4.5,
            126,
            "300K",
            Category::Business,
        ),
        default_product(
            2,
            "Digital Marketing Strategy",
            "Pelajari strategi pemasaran digital yang efektif untuk meningkatkan brand awareness dan konversi.",
            "Sarah Johnson",
            "Marketing Director",
            "Tokopedia",
            4.2,
            98,
            "250K",
            Category::Marketing,
        ),
        default_product(
            3,
            "UI/UX Design Fundamentals",
            "Kuasai dasar-dasar desain UI/UX untuk menciptakan pengalaman pengguna yang luar biasa.",
            "Michael Chen",
            "Lead Designer",
            "Grab",
            4.7,
            204,
            "400K",
            Category::Design,
        ),
    ]
}
