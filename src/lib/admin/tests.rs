use std::path::PathBuf;

use crate::admin::{
    course_form::{CourseDraft, CourseField, CourseForm},
    helpers::{decode_records, default_courses, read_config, strip_price_unit, with_price_unit},
    image_picker::{display_path, GalleryKind, PLACEHOLDER_IMAGE},
    local_storage::{LocalStorage, StorageError, ADMIN_TOKEN_KEY, COURSES_SNAPSHOT_KEY, USER_KEY},
    modal_stack::{DeleteTarget, ModalError, ModalStack, Overlay},
    models::{Category, Collection, Course, Product, User},
    session::Session,
};

fn filled_draft() -> CourseDraft {
    CourseDraft {
        title: "Data Analyst Bootcamp".to_owned(),
        description: "SQL, spreadsheets and dashboards from scratch.".to_owned(),
        category: "Bisnis".to_owned(),
        price: "350".to_owned(),
        rating: "4.66".to_owned(),
        review_count: "87".to_owned(),
        course_image: "/images/cards/card4.png".to_owned(),
        tutor_name: "Dewi Lestari".to_owned(),
        tutor_image: "/images/tutors/tutor-card4.png".to_owned(),
        position: "Data Lead".to_owned(),
        company: "Traveloka".to_owned(),
    }
}

fn stored_course() -> Course {
    Course {
        id: "12".to_owned(),
        title: "UI/UX Design Fundamentals".to_owned(),
        description: "Kuasai dasar-dasar desain UI/UX.".to_owned(),
        category: "Desain".to_owned(),
        price: "300K".to_owned(),
        rating: 4.7,
        review_count: 204,
        course_image: "/images/cards/card3.png".to_owned(),
        tutor_name: "Michael Chen".to_owned(),
        tutor_image: "/images/tutors/tutor-card3.png".to_owned(),
        position: "Lead Designer".to_owned(),
        company: "Grab".to_owned(),
    }
}

fn fixture_storage() -> LocalStorage {
    LocalStorage::new(PathBuf::from("tests/test.storage.json"))
}

#[test]
fn validate_filled_draft_builds_product() {
    let product = filled_draft().validate().unwrap();
    assert_eq!(product.id, None);
    assert_eq!(product.price, "350K");
    assert_eq!(product.rating, 4.7);
    assert_eq!(product.review_count, 87);
    assert_eq!(product.photos, "/images/cards/card4.png");
    assert_eq!(product.avatar, "/images/tutors/tutor-card4.png");
    assert_eq!(product.mentor, "Dewi Lestari");
    assert_eq!(product.rolementor, "Data Lead");
    assert_eq!(product.category, "Bisnis");
}

#[test]
fn validate_rating_six_sets_only_rating_error() {
    let mut draft = filled_draft();
    draft.rating = "6".to_owned();
    let errors = draft.validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.rating.as_deref(), Some("Rating must be between 1 and 5"));
}

#[test]
fn validate_rating_bounds_are_inclusive() {
    for rating in ["1", "5", "3.2"] {
        let mut draft = filled_draft();
        draft.rating = rating.to_owned();
        assert!(draft.validate().is_ok(), "rating {} rejected", rating);
    }
    for rating in ["0.9", "5.01", "", "five", "NaN"] {
        let mut draft = filled_draft();
        draft.rating = rating.to_owned();
        assert!(draft.validate().is_err(), "rating {:?} accepted", rating);
    }
}

#[test]
fn validate_requires_positive_review_count_and_price() {
    let mut draft = filled_draft();
    draft.review_count = "0".to_owned();
    draft.price = "0".to_owned();
    let errors = draft.validate().unwrap_err();
    assert!(errors.review_count.is_some());
    assert!(errors.price.is_some());
    assert_eq!(errors.len(), 2);

    draft.review_count = "-3".to_owned();
    draft.price = "-100".to_owned();
    let errors = draft.validate().unwrap_err();
    assert!(errors.review_count.is_some());
    assert!(errors.price.is_some());
}

#[test]
fn validate_empty_draft_reports_every_field() {
    let errors = CourseDraft::default().validate().unwrap_err();
    assert_eq!(errors.len(), CourseField::ALL.len());
    for field in CourseField::ALL {
        assert!(errors.get(field).is_some(), "{} has no error", field);
    }
}

#[test]
fn validate_whitespace_counts_as_empty() {
    let mut draft = filled_draft();
    draft.title = "   ".to_owned();
    draft.company = "\t".to_owned();
    let errors = draft.validate().unwrap_err();
    assert!(errors.title.is_some());
    assert!(errors.company.is_some());
    assert_eq!(errors.len(), 2);
}

#[test]
fn validate_rejects_category_outside_the_set() {
    let mut draft = filled_draft();
    draft.category = "Memasak".to_owned();
    let errors = draft.validate().unwrap_err();
    assert!(errors.category.as_deref().unwrap().contains("Memasak"));
}

#[test]
fn validate_tolerates_price_typed_with_unit() {
    let mut draft = filled_draft();
    draft.price = "300K".to_owned();
    assert_eq!(draft.validate().unwrap().price, "300K");
}

#[test]
fn draft_from_course_strips_price_unit() {
    let draft = CourseDraft::from_course(&stored_course());
    assert_eq!(draft.price, "300");
    assert_eq!(draft.rating, "4.7");
    assert_eq!(draft.review_count, "204");
    assert_eq!(draft.course_image, "/images/cards/card3.png");
    assert_eq!(draft.tutor_image, "/images/tutors/tutor-card3.png");
}

#[test]
fn price_unit_helpers() {
    assert_eq!(strip_price_unit("300K"), "300");
    assert_eq!(strip_price_unit(" 250 "), "250");
    assert_eq!(with_price_unit("300"), "300K");
    assert_eq!(with_price_unit("300K"), "300K");
}

#[test]
fn editing_field_clears_only_its_error() {
    let mut form = CourseForm::default();
    assert!(form.submit().is_err());
    assert_eq!(form.errors().len(), CourseField::ALL.len());

    form.edit(CourseField::Rating, "9");
    assert!(form.errors().rating.is_none());
    assert!(form.errors().title.is_some());
    assert_eq!(form.errors().len(), CourseField::ALL.len() - 1);

    // still invalid, the error only comes back on the next submit
    assert!(form.submit().is_err());
    assert!(form.errors().rating.is_some());
}

#[test]
fn select_image_writes_draft_and_clears_error() {
    let mut form = CourseForm::default();
    let _ = form.submit();
    form.select_image(GalleryKind::TutorImage, "/images/tutors/tutor-card2.png");
    assert_eq!(form.draft().tutor_image, "/images/tutors/tutor-card2.png");
    assert!(form.errors().tutor_image.is_none());
    assert!(form.errors().course_image.is_some());
}

#[test]
fn form_reset_empties_draft_and_errors() {
    let mut form = CourseForm::default();
    form.seed(&stored_course());
    form.edit(CourseField::Rating, "7");
    let _ = form.submit();
    form.reset();
    assert!(form.draft().is_empty());
    assert!(form.errors().is_empty());
}

#[test]
fn course_field_names_round_trip() {
    for field in CourseField::ALL {
        assert_eq!(field.name().parse::<CourseField>(), Ok(field));
    }
    assert!("photos".parse::<CourseField>().is_err());
}

#[test]
fn gallery_opens_only_over_course_form() {
    let mut modals = ModalStack::default();
    assert_eq!(
        modals.open_gallery(GalleryKind::CourseImage),
        Err(ModalError::GalleryWithoutForm(GalleryKind::CourseImage))
    );

    modals.open_add_course().unwrap();
    modals.open_gallery(GalleryKind::CourseImage).unwrap();
    assert_eq!(modals.active_gallery(), Some(GalleryKind::CourseImage));
    assert!(modals.open_gallery(GalleryKind::TutorImage).is_err());

    assert_eq!(modals.close_gallery(), Ok(GalleryKind::CourseImage));
    assert_eq!(modals.top(), Some(&Overlay::AddCourse));
}

#[test]
fn closing_course_form_closes_gallery_above_it() {
    let mut modals = ModalStack::default();
    modals.open_edit_course("12").unwrap();
    modals.open_gallery(GalleryKind::TutorImage).unwrap();
    assert_eq!(
        modals.close_course_form(),
        Ok(Overlay::EditCourse {
            course_id: "12".to_owned()
        })
    );
    assert!(modals.is_empty());
}

#[test]
fn delete_confirm_needs_a_clear_page() {
    let mut modals = ModalStack::default();
    modals.open_add_course().unwrap();
    let target = DeleteTarget::Course {
        id: "3".to_owned(),
        title: "Digital Marketing Strategy".to_owned(),
    };
    assert!(matches!(
        modals.open_delete_confirm(target.clone()),
        Err(ModalError::Obscured { .. })
    ));

    modals.close_course_form().unwrap();
    modals.open_delete_confirm(target.clone()).unwrap();
    assert_eq!(modals.delete_target(), Some(&target));
    assert_eq!(modals.close_delete_confirm(), Ok(target));
    assert_eq!(modals.close_delete_confirm(), Err(ModalError::NoDeleteTarget));
}

#[test]
fn image_galleries_are_fixed_sets() {
    assert_eq!(GalleryKind::CourseImage.assets().len(), 9);
    assert_eq!(GalleryKind::TutorImage.assets().len(), 9);
    assert_eq!(
        GalleryKind::CourseImage.find(9).map(|asset| asset.path),
        Some("/images/cards/card9.png")
    );
    assert_eq!(
        GalleryKind::TutorImage.find(1).map(|asset| asset.label),
        Some("Tutor 1")
    );
    assert!(GalleryKind::TutorImage.find(10).is_none());
    assert_eq!(GalleryKind::CourseImage.field(), CourseField::CourseImage);
}

#[test]
fn display_path_falls_back_to_placeholder() {
    assert_eq!(display_path("/images/cards/card1.png", false), "/images/cards/card1.png");
    assert_eq!(display_path("/images/cards/card1.png", true), PLACEHOLDER_IMAGE);
    assert_eq!(display_path("", false), PLACEHOLDER_IMAGE);
}

#[test]
fn product_reads_quoted_numbers() {
    let product: Product = serde_json::from_str(
        r#"{
            "id": "5",
            "photos": "/images/cards/card5.png",
            "title": "Public Speaking",
            "description": "Speak with confidence.",
            "mentor": "Rina",
            "rolementor": "Trainer",
            "avatar": "/images/tutors/tutor-card5.png",
            "company": "Ruangguru",
            "rating": "4.3",
            "reviewCount": "41",
            "price": 150,
            "category": "Pengembangan Diri",
            "createdAt": "2025-01-01T00:00:00.000Z"
        }"#,
    )
    .unwrap();
    assert_eq!(product.rating, 4.3);
    assert_eq!(product.review_count, 41);
    assert_eq!(product.price, "150");

    let course = Course::from(product);
    assert_eq!(course.id, "5");
    assert_eq!(course.course_image, "/images/cards/card5.png");
    assert_eq!(course.tutor_name, "Rina");
    assert_eq!(course.tutor_image, "/images/tutors/tutor-card5.png");
    assert_eq!(course.position, "Trainer");
    assert_eq!(course.category(), Some(Category::SelfDevelopment));
}

#[test]
fn product_reads_unusable_numbers_as_zero() {
    let products: Vec<Product> = serde_json::from_str(
        r#"[
            {"title": "Blank", "rating": "", "reviewCount": "", "price": ""},
            {"title": "Null", "rating": null, "reviewCount": null, "price": null},
            {"title": "Comma", "rating": "4,5", "reviewCount": 12.5, "price": "100K"},
            {"title": "Missing"}
        ]"#,
    )
    .unwrap();
    for product in &products {
        assert_eq!(product.rating, 0.0, "{}", product.title);
        assert_eq!(product.review_count, 0, "{}", product.title);
    }
    assert_eq!(products[1].price, "");
    assert_eq!(products[2].price, "100K");
}

#[test]
fn decode_records_skips_only_malformed_ones() {
    let records = vec![
        serde_json::json!({"id": "1", "title": "Kept", "rating": ""}),
        serde_json::json!({"id": "2", "title": ["not", "text"]}),
        serde_json::json!("not a record"),
        serde_json::json!({"id": "3", "title": "Also kept"}),
    ];
    let products: Vec<Product> = decode_records(Collection::Products, records);
    let titles = products
        .iter()
        .map(|product| product.title.as_str())
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["Kept", "Also kept"]);
}

#[test]
fn product_body_omits_missing_id() {
    let body = serde_json::to_value(&default_courses()[0]).unwrap();
    assert!(body.get("id").is_none());
    assert_eq!(body["reviewCount"], 126);
    assert_eq!(body["price"], "300K");
    assert_eq!(body["category"], "Bisnis");
}

#[test]
fn default_courses_pass_validation_after_seeding() {
    for product in default_courses() {
        let draft = CourseDraft::from_course(&Course::from(product.clone()));
        assert_eq!(draft.validate().unwrap(), product);
    }
}

#[test]
fn storage_reads_snapshot_fixture() {
    let courses: Vec<Course> = fixture_storage()
        .get(COURSES_SNAPSHOT_KEY)
        .unwrap()
        .unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].price, "300K");
    assert_eq!(courses[0].tutor_name, "Jenna Ortega");
}

#[test]
fn storage_missing_file_is_empty() {
    let storage = LocalStorage::new(PathBuf::from("non_existent.json"));
    assert_eq!(storage.get::<Vec<User>>("registeredUsers").unwrap(), None);
}

#[test]
fn session_restore_from_fixture() {
    let session = Session::restore(&fixture_storage()).unwrap();
    assert!(session.is_logged_in());
    assert!(session.is_admin());
    assert_eq!(session.user().map(|user| user.name.as_str()), Some("Siti Rahma"));
}

#[test]
fn session_without_login_flag_has_no_user() {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(dir.path().join("storage.json"));
    storage
        .set(USER_KEY, &User {
            id: "1".to_owned(),
            name: "Leftover".to_owned(),
            ..User::default()
        })
        .unwrap();
    let session = Session::restore(&storage).unwrap();
    assert!(!session.is_logged_in());
    assert!(!session.is_admin());
}

#[test]
fn logout_leaves_public_login_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::copy("tests/test.storage.json", &path).unwrap();
    let storage = LocalStorage::new(&path);

    let mut session = Session::restore(&storage).unwrap();
    session.logout(&storage).unwrap();
    assert!(!session.is_admin());
    assert!(session.is_logged_in());
    assert_eq!(storage.get::<String>(ADMIN_TOKEN_KEY).unwrap(), None);

    let restored = Session::restore(&storage).unwrap();
    assert!(!restored.is_admin());
    assert_eq!(restored.user().map(|user| user.name.as_str()), Some("Siti Rahma"));
    assert!(storage.get::<Vec<Course>>(COURSES_SNAPSHOT_KEY).unwrap().is_some());
}

#[test]
fn failed_write_keeps_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(dir.path().join("storage.json"));
    storage.set(ADMIN_TOKEN_KEY, &"first").unwrap();

    // a directory squatting on the scratch path makes the next write fail
    std::fs::create_dir(storage.temp_path()).unwrap();
    let err = storage.set(ADMIN_TOKEN_KEY, &"second").unwrap_err();
    assert!(matches!(err, StorageError::Io { .. }));
    assert_eq!(
        storage.get::<String>(ADMIN_TOKEN_KEY).unwrap().as_deref(),
        Some("first")
    );

    std::fs::remove_dir(storage.temp_path()).unwrap();
    storage.set(ADMIN_TOKEN_KEY, &"second").unwrap();
    assert_eq!(
        storage.get::<String>(ADMIN_TOKEN_KEY).unwrap().as_deref(),
        Some("second")
    );
    assert!(!storage.temp_path().exists());
}

#[test]
fn read_example_config() {
    let config = read_config(&PathBuf::from("example.config.json")).unwrap();
    assert_eq!(config.api_base_url, "https://example.mockapi.io/api/v1");
    assert_eq!(config.min_password_length, 6);
}
