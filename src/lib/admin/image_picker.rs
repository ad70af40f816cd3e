//! Images bundled with the site that a course can be decorated with.
use std::fmt;

use super::course_form::CourseField;

pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageAsset {
    pub id: u8,
    pub path: &'static str,
    pub label: &'static str,
}

const fn asset(id: u8, path: &'static str, label: &'static str) -> ImageAsset {
    ImageAsset { id, path, label }
}

pub const COURSE_CARD_IMAGES: [ImageAsset; 9] = [
    asset(1, "/images/cards/card1.png", "Card 1"),
    asset(2, "/images/cards/card2.png", "Card 2"),
    asset(3, "/images/cards/card3.png", "Card 3"),
    asset(4, "/images/cards/card4.png", "Card 4"),
    asset(5, "/images/cards/card5.png", "Card 5"),
    asset(6, "/images/cards/card6.png", "Card 6"),
    asset(7, "/images/cards/card7.png", "Card 7"),
    asset(8, "/images/cards/card8.png", "Card 8"),
    asset(9, "/images/cards/card9.png", "Card 9"),
];

pub const TUTOR_IMAGES: [ImageAsset; 9] = [
    asset(1, "/images/tutors/tutor-card1.png", "Tutor 1"),
    asset(2, "/images/tutors/tutor-card2.png", "Tutor 2"),
    asset(3, "/images/tutors/tutor-card3.png", "Tutor 3"),
    asset(4, "/images/tutors/tutor-card4.png", "Tutor 4"),
    asset(5, "/images/tutors/tutor-card5.png", "Tutor 5"),
    asset(6, "/images/tutors/tutor-card6.png", "Tutor 6"),
    asset(7, "/images/tutors/tutor-card7.png", "Tutor 7"),
    asset(8, "/images/tutors/tutor-card8.png", "Tutor 8"),
    asset(9, "/images/tutors/tutor-card9.png", "Tutor 9"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GalleryKind {
    CourseImage,
    TutorImage,
}

impl GalleryKind {
    pub fn assets(&self) -> &'static [ImageAsset] {
        match self {
            GalleryKind::CourseImage => &COURSE_CARD_IMAGES,
            GalleryKind::TutorImage => &TUTOR_IMAGES,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GalleryKind::CourseImage => "Select Course Image",
            GalleryKind::TutorImage => "Select Tutor Image",
        }
    }

    /// Draft field a selection from this gallery is written into.
    pub fn field(&self) -> CourseField {
        match self {
            GalleryKind::CourseImage => CourseField::CourseImage,
            GalleryKind::TutorImage => CourseField::TutorImage,
        }
    }

    pub fn find(&self, id: u8) -> Option<&'static ImageAsset> {
        self.assets().iter().find(|asset| asset.id == id)
    }
}

impl fmt::Display for GalleryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GalleryKind::CourseImage => f.write_str("course image"),
            GalleryKind::TutorImage => f.write_str("tutor image"),
        }
    }
}

/// Path to render for an image, swapping in the placeholder once loading it failed.
pub fn display_path(path: &str, load_failed: bool) -> &str {
    if load_failed || path.trim().is_empty() {
        PLACEHOLDER_IMAGE
    } else {
        path
    }
}
