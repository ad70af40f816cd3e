//! Course add/edit form: the shared draft, its validation and field errors.
use std::{fmt, str::FromStr};

use log::debug;
use thiserror::Error;

use super::{
    helpers::{round_rating, strip_price_unit, with_price_unit},
    image_picker::GalleryKind,
    models::{Category, Course, Product},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourseField {
    Title,
    Description,
    Category,
    Price,
    Rating,
    ReviewCount,
    CourseImage,
    TutorName,
    TutorImage,
    Position,
    Company,
}

impl CourseField {
    pub const ALL: [CourseField; 11] = [
        CourseField::Title,
        CourseField::Description,
        CourseField::Category,
        CourseField::Price,
        CourseField::Rating,
        CourseField::ReviewCount,
        CourseField::CourseImage,
        CourseField::TutorName,
        CourseField::TutorImage,
        CourseField::Position,
        CourseField::Company,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CourseField::Title => "title",
            CourseField::Description => "description",
            CourseField::Category => "category",
            CourseField::Price => "price",
            CourseField::Rating => "rating",
            CourseField::ReviewCount => "reviewCount",
            CourseField::CourseImage => "courseImage",
            CourseField::TutorName => "tutorName",
            CourseField::TutorImage => "tutorImage",
            CourseField::Position => "position",
            CourseField::Company => "company",
        }
    }
}

impl fmt::Display for CourseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown course field {0:?}")]
pub struct UnknownField(pub String);

impl FromStr for CourseField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CourseField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownField(s.to_owned()))
    }
}

/// Course inputs exactly as typed, not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub rating: String,
    pub review_count: String,
    pub course_image: String,
    pub tutor_name: String,
    pub tutor_image: String,
    pub position: String,
    pub company: String,
}

impl CourseDraft {
    /// Draft for editing `course`; the price loses its unit suffix.
    pub fn from_course(course: &Course) -> Self {
        CourseDraft {
            title: course.title.clone(),
            description: course.description.clone(),
            category: course.category.clone(),
            price: strip_price_unit(&course.price).to_owned(),
            rating: course.rating.to_string(),
            review_count: course.review_count.to_string(),
            course_image: course.course_image.clone(),
            tutor_name: course.tutor_name.clone(),
            tutor_image: course.tutor_image.clone(),
            position: course.position.clone(),
            company: course.company.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == CourseDraft::default()
    }

    fn slot_mut(&mut self, field: CourseField) -> &mut String {
        match field {
            CourseField::Title => &mut self.title,
            CourseField::Description => &mut self.description,
            CourseField::Category => &mut self.category,
            CourseField::Price => &mut self.price,
            CourseField::Rating => &mut self.rating,
            CourseField::ReviewCount => &mut self.review_count,
            CourseField::CourseImage => &mut self.course_image,
            CourseField::TutorName => &mut self.tutor_name,
            CourseField::TutorImage => &mut self.tutor_image,
            CourseField::Position => &mut self.position,
            CourseField::Company => &mut self.company,
        }
    }

    pub fn get(&self, field: CourseField) -> &str {
        match field {
            CourseField::Title => &self.title,
            CourseField::Description => &self.description,
            CourseField::Category => &self.category,
            CourseField::Price => &self.price,
            CourseField::Rating => &self.rating,
            CourseField::ReviewCount => &self.review_count,
            CourseField::CourseImage => &self.course_image,
            CourseField::TutorName => &self.tutor_name,
            CourseField::TutorImage => &self.tutor_image,
            CourseField::Position => &self.position,
            CourseField::Company => &self.company,
        }
    }

    pub fn set(&mut self, field: CourseField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// Checks every field and either builds the backend record or reports
    /// all failing fields at once.
    pub fn validate(&self) -> Result<Product, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        for (field, message) in [
            (CourseField::Title, "Title is required"),
            (CourseField::Description, "Description is required"),
            (CourseField::TutorName, "Tutor name is required"),
            (CourseField::Position, "Position is required"),
            (CourseField::Company, "Company is required"),
        ] {
            if self.get(field).trim().is_empty() {
                errors.set(field, message);
            }
        }

        let rating = self
            .rating
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|rating| (1.0..=5.0).contains(rating));
        if rating.is_none() {
            errors.set(CourseField::Rating, "Rating must be between 1 and 5");
        }

        let review_count = self
            .review_count
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|count| *count > 0);
        if review_count.is_none() {
            errors.set(CourseField::ReviewCount, "Review count must be greater than 0");
        }

        let price = strip_price_unit(&self.price);
        let price_is_positive = price
            .parse::<f64>()
            .is_ok_and(|price| price.is_finite() && price > 0.0);
        if !price_is_positive {
            errors.set(CourseField::Price, "Price must be greater than 0");
        }

        let category = if self.category.trim().is_empty() {
            errors.set(CourseField::Category, "Category must be selected");
            None
        } else {
            match self.category.parse::<Category>() {
                Ok(category) => Some(category),
                Err(err) => {
                    errors.set(CourseField::Category, format!("Category is not offered: {}", err.0));
                    None
                }
            }
        };

        if self.course_image.trim().is_empty() {
            errors.set(CourseField::CourseImage, "Course image must be selected");
        }
        if self.tutor_image.trim().is_empty() {
            errors.set(CourseField::TutorImage, "Tutor image must be selected");
        }

        match (rating, review_count, category) {
            (Some(rating), Some(review_count), Some(category)) if errors.is_empty() => {
                Ok(Product {
                    id: None,
                    photos: self.course_image.trim().to_owned(),
                    title: self.title.trim().to_owned(),
                    description: self.description.trim().to_owned(),
                    mentor: self.tutor_name.trim().to_owned(),
                    rolementor: self.position.trim().to_owned(),
                    avatar: self.tutor_image.trim().to_owned(),
                    company: self.company.trim().to_owned(),
                    rating: round_rating(rating),
                    review_count,
                    price: with_price_unit(price),
                    category: category.label().to_owned(),
                })
            }
            _ => Err(errors),
        }
    }
}

/// One optional message per validated field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
    pub rating: Option<String>,
    pub review_count: Option<String>,
    pub course_image: Option<String>,
    pub tutor_name: Option<String>,
    pub tutor_image: Option<String>,
    pub position: Option<String>,
    pub company: Option<String>,
}

impl ValidationErrors {
    fn slot_mut(&mut self, field: CourseField) -> &mut Option<String> {
        match field {
            CourseField::Title => &mut self.title,
            CourseField::Description => &mut self.description,
            CourseField::Category => &mut self.category,
            CourseField::Price => &mut self.price,
            CourseField::Rating => &mut self.rating,
            CourseField::ReviewCount => &mut self.review_count,
            CourseField::CourseImage => &mut self.course_image,
            CourseField::TutorName => &mut self.tutor_name,
            CourseField::TutorImage => &mut self.tutor_image,
            CourseField::Position => &mut self.position,
            CourseField::Company => &mut self.company,
        }
    }

    pub fn get(&self, field: CourseField) -> Option<&str> {
        let slot = match field {
            CourseField::Title => &self.title,
            CourseField::Description => &self.description,
            CourseField::Category => &self.category,
            CourseField::Price => &self.price,
            CourseField::Rating => &self.rating,
            CourseField::ReviewCount => &self.review_count,
            CourseField::CourseImage => &self.course_image,
            CourseField::TutorName => &self.tutor_name,
            CourseField::TutorImage => &self.tutor_image,
            CourseField::Position => &self.position,
            CourseField::Company => &self.company,
        };
        slot.as_deref()
    }

    pub fn set(&mut self, field: CourseField, message: impl Into<String>) {
        *self.slot_mut(field) = Some(message.into());
    }

    pub fn clear(&mut self, field: CourseField) {
        *self.slot_mut(field) = None;
    }

    pub fn iter(&self) -> impl Iterator<Item = (CourseField, &str)> + '_ {
        CourseField::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|message| (field, message)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>();
        f.write_str(&messages.join("; "))
    }
}

/// Draft plus the errors of the last submit attempt, shared by the add and
/// edit flows.
#[derive(Debug, Clone, Default)]
pub struct CourseForm {
    draft: CourseDraft,
    errors: ValidationErrors,
}

impl CourseForm {
    pub fn draft(&self) -> &CourseDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn seed(&mut self, course: &Course) {
        self.draft = CourseDraft::from_course(course);
        self.errors = ValidationErrors::default();
    }

    /// Typing into a field drops that field's error; the rest stay until the
    /// next submit.
    pub fn edit(&mut self, field: CourseField, value: impl Into<String>) {
        self.draft.set(field, value);
        self.errors.clear(field);
    }

    pub fn select_image(&mut self, gallery: GalleryKind, path: &str) {
        debug!("Selected {} {}", gallery, path);
        self.edit(gallery.field(), path);
    }

    pub fn submit(&mut self) -> Result<Product, &ValidationErrors> {
        match self.draft.validate() {
            Ok(product) => {
                self.errors = ValidationErrors::default();
                Ok(product)
            }
            Err(errors) => {
                debug!("Course form rejected: {}", errors);
                self.errors = errors;
                Err(&self.errors)
            }
        }
    }

    pub fn reset(&mut self) {
        self.draft = CourseDraft::default();
        self.errors = ValidationErrors::default();
    }
}
