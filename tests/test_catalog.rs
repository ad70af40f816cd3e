mod common;

use common::{MockBackend, Verb};
use lib::admin::helpers::default_courses;
use lib::admin::models::{Category, Collection};
use lib::catalog::{CatalogView, CategoryFilter};

#[tokio::test]
async fn category_tabs_filter_loaded_courses() {
    let backend = MockBackend::new().with_items(Collection::Products, &default_courses());
    let mut view = CatalogView::new();

    view.load(&backend).await;
    assert_eq!(view.courses().len(), 3);
    assert_eq!(view.active(), CategoryFilter::All);
    assert!(view.error().is_none());
    assert!(!view.loading().is_loading());

    view.select_category(CategoryFilter::Only(Category::Design));
    let titles = view
        .courses()
        .iter()
        .map(|course| course.title.as_str())
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["UI/UX Design Fundamentals"]);

    // switching tabs never goes back to the backend
    assert_eq!(backend.count(Verb::GetAll), 1);
}

#[tokio::test]
async fn reload_keeps_active_category() {
    let backend = MockBackend::new().with_items(Collection::Products, &default_courses());
    let mut view = CatalogView::new();
    view.select_category(CategoryFilter::Only(Category::Marketing));

    view.load(&backend).await;

    assert_eq!(view.courses().len(), 1);
    assert_eq!(view.courses()[0].tutor_name, "Sarah Johnson");
    assert_eq!(view.all_courses().len(), 3);
}

#[tokio::test]
async fn failed_load_shows_error_and_empty_page() {
    let backend = MockBackend::new().with_items(Collection::Products, &default_courses());
    let mut view = CatalogView::new();
    view.load(&backend).await;

    backend.fail_on(Verb::GetAll);
    view.load(&backend).await;

    assert!(view.error().is_some());
    assert!(view.courses().is_empty());
    assert!(view.all_courses().is_empty());

    backend.recover();
    view.load(&backend).await;
    assert!(view.error().is_none());
    assert_eq!(view.courses().len(), 3);
}

#[tokio::test]
async fn malformed_product_keeps_the_page_filled() {
    let backend = MockBackend::new().with_items(Collection::Products, &default_courses());
    backend.insert(
        Collection::Products,
        &serde_json::json!({"title": "Null rating", "rating": null, "category": "Desain"}),
    );
    backend.insert(Collection::Products, &serde_json::json!({"title": [300]}));
    let mut view = CatalogView::new();

    view.load(&backend).await;

    assert!(view.error().is_none());
    assert_eq!(view.all_courses().len(), 4);
    view.select_category(CategoryFilter::Only(Category::Design));
    assert_eq!(view.courses().len(), 2);
}
