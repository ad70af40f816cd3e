//! Public course list with category tabs.
use std::{fmt, path::PathBuf, str::FromStr};

use clap::Parser;
use log::{error, info};
use serde_json::Value;

use crate::admin::{
    backend::Backend,
    course_form::CourseField,
    helpers::decode_records,
    loading::LoadingFlag,
    models::{course_model::UnknownCategory, Category, Collection, Course, Product},
};

pub const ALL_COURSES_LABEL: &str = "Semua Kelas";

const LOAD_FAILED_MESSAGE: &str = "Failed to load courses. Please refresh the page.";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CatalogArgs {
    #[arg(long, value_name = "FILE", default_value = "config.json")]
    pub config_json_path: PathBuf,
    #[arg(long, default_value = ALL_COURSES_LABEL)]
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Tabs in the order they are shown.
    pub fn tabs() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
            .collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => ALL_COURSES_LABEL,
            CategoryFilter::Only(category) => category.label(),
        }
    }

    pub fn matches(&self, course: &Course) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => course.category == category.label(),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == ALL_COURSES_LABEL {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

#[derive(Debug, Default)]
pub struct CatalogView {
    all_courses: Vec<Course>,
    filtered: Vec<Course>,
    active: CategoryFilter,
    error: Option<String>,
    loading: LoadingFlag,
}

impl CatalogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn courses(&self) -> &[Course] {
        &self.filtered
    }

    pub fn all_courses(&self) -> &[Course] {
        &self.all_courses
    }

    pub fn active(&self) -> CategoryFilter {
        self.active
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn loading(&self) -> LoadingFlag {
        self.loading.clone()
    }

    /// Unlike the admin screen there is no snapshot fallback here, a failed
    /// read empties the page and shows an error instead.
    pub async fn load<B: Backend>(&mut self, backend: &B) {
        let _busy = self.loading.raise();
        self.error = None;
        match backend.get_all::<Value>(Collection::Products).await {
            Ok(records) => {
                self.all_courses = decode_records::<Product>(Collection::Products, records)
                    .into_iter()
                    .map(Course::from)
                    .collect();
                info!("Loaded {} courses", self.all_courses.len());
            }
            Err(err) => {
                error!("Error loading courses: {}", err);
                self.error = Some(LOAD_FAILED_MESSAGE.to_owned());
                self.all_courses.clear();
            }
        }
        self.refilter();
    }

    /// Recomputed from the courses already in memory.
    pub fn select_category(&mut self, filter: CategoryFilter) {
        self.active = filter;
        self.refilter();
    }

    fn refilter(&mut self) {
        let active = self.active;
        self.filtered = self
            .all_courses
            .iter()
            .filter(|course| active.matches(course))
            .cloned()
            .collect();
    }
}

/// One line per course card.
pub fn format_course_card(course: &Course) -> String {
    format!(
        "{} [{}] {} | {} ({} at {}) | {} ({}) | Rp {}",
        course.title,
        course.category,
        course.description,
        course.tutor_name,
        course.position,
        course.company,
        course.rating,
        course.review_count,
        course.price
    )
}

/// Field names shown on a card, used to spot incomplete backend records.
pub fn missing_card_fields(course: &Course) -> Vec<CourseField> {
    [
        (CourseField::Title, &course.title),
        (CourseField::Description, &course.description),
        (CourseField::CourseImage, &course.course_image),
        (CourseField::TutorName, &course.tutor_name),
        (CourseField::TutorImage, &course.tutor_image),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect()
}
