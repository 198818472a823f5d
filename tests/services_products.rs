use chrono::NaiveDate;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_catalog::domain::media_property::{MediaProperty, NewMediaProperty};
use pushkind_catalog::domain::tag::{NewTag, Tag};
use pushkind_catalog::forms::products::ProductForm;
use pushkind_catalog::repository::{
    DieselRepository, MediaPropertyWriter, ProductReader, ProductTagReader, TagWriter,
};
use pushkind_catalog::services::{products, tags};
use pushkind_catalog::{SERVICE_ACCESS_ROLE, services::ServiceError};

mod common;

fn user(roles: &[&str]) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "user".into(),
        email: "user@example.com".into(),
        hub_id: 1,
        name: "User".into(),
        roles: roles.iter().map(|role| role.to_string()).collect(),
        exp: 0,
    }
}

fn seed(repo: &DieselRepository) -> (MediaProperty, Vec<Tag>) {
    let media_property = repo
        .create_media_property(&NewMediaProperty::new(1, "Oil"))
        .expect("create media property");
    let tags = ["t1", "t2", "t3", "t4"]
        .iter()
        .map(|name| repo.create_tag(&NewTag::new(1, *name)).expect("create tag"))
        .collect();
    (media_property, tags)
}

fn form(media_property_id: i32, tags: &str) -> ProductForm {
    ProductForm {
        title: "Harbour".to_string(),
        description: Some("Evening light".to_string()),
        cost: 12500,
        date: "2023-05-20".to_string(),
        stock: 1,
        height: 40,
        width: 60,
        media_property_id,
        image_url: None,
        tags: Some(tags.to_string()),
    }
}

fn joined(tags: &[Tag], picks: &[usize]) -> String {
    picks
        .iter()
        .map(|index| tags[*index].id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn linked_names(repo: &DieselRepository, product_id: i32) -> Vec<String> {
    repo.get_product_by_id(product_id, 1)
        .expect("load product")
        .expect("product exists")
        .tags
        .into_iter()
        .map(|tag| tag.name)
        .collect()
}

#[test]
fn create_then_update_converges_to_submitted_tags() {
    let test_db = common::TestDb::new("service_create_then_update_converges.db");
    let repo = test_db.repo();
    let (media_property, tags) = seed(&repo);
    let admin = user(&[SERVICE_ACCESS_ROLE]);

    let created = products::create_product(
        &repo,
        &admin,
        form(media_property.id, &joined(&tags, &[0, 1, 2])),
    )
    .expect("create product");
    assert_eq!(linked_names(&repo, created.id), vec!["t1", "t2", "t3"]);

    let mut edit = form(media_property.id, &joined(&tags, &[1, 2, 3]));
    edit.title = "Harbour at Dusk".to_string();
    edit.date = "2024-02-29".to_string();
    let updated =
        products::update_product(&repo, &admin, created.id, edit).expect("update product");

    assert_eq!(updated.title, "Harbour at Dusk");
    assert_eq!(updated.date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    assert_eq!(linked_names(&repo, created.id), vec!["t2", "t3", "t4"]);

    products::update_product(&repo, &admin, created.id, form(media_property.id, ""))
        .expect("clear tags");
    assert!(
        repo.list_product_tag_ids(created.id)
            .expect("list links")
            .is_empty()
    );
}

#[test]
fn update_with_unknown_tag_keeps_existing_links() {
    let test_db = common::TestDb::new("service_update_with_unknown_tag.db");
    let repo = test_db.repo();
    let (media_property, tags) = seed(&repo);
    let admin = user(&[SERVICE_ACCESS_ROLE]);

    let created = products::create_product(
        &repo,
        &admin,
        form(media_property.id, &joined(&tags, &[0, 1])),
    )
    .expect("create product");
    let before = repo.list_product_tag_ids(created.id).expect("list links");

    let result = products::update_product(
        &repo,
        &admin,
        created.id,
        form(media_property.id, &format!("{},9999", tags[2].id)),
    );

    assert!(matches!(result, Err(ServiceError::Association(_))));
    assert_eq!(
        repo.list_product_tag_ids(created.id).expect("list links"),
        before
    );
}

#[test]
fn create_with_unknown_tag_leaves_no_product() {
    let test_db = common::TestDb::new("service_create_with_unknown_tag.db");
    let repo = test_db.repo();
    let (media_property, tags) = seed(&repo);
    let admin = user(&[SERVICE_ACCESS_ROLE]);

    let result = products::create_product(
        &repo,
        &admin,
        form(media_property.id, &format!("{},9999", tags[0].id)),
    );

    assert!(matches!(result, Err(ServiceError::Association(_))));
    assert!(repo.list_products(1).expect("list products").is_empty());
}

#[test]
fn deleting_tag_removes_it_from_products() {
    let test_db = common::TestDb::new("service_deleting_tag_removes_links.db");
    let repo = test_db.repo();
    let (media_property, tags) = seed(&repo);
    let admin = user(&[SERVICE_ACCESS_ROLE]);

    let created = products::create_product(
        &repo,
        &admin,
        form(media_property.id, &joined(&tags, &[0, 3])),
    )
    .expect("create product");

    tags::remove_tag(&repo, &admin, tags[0].id).expect("remove tag");

    assert_eq!(linked_names(&repo, created.id), vec!["t4"]);
}

#[test]
fn product_services_require_role() {
    let test_db = common::TestDb::new("service_products_require_role.db");
    let repo = test_db.repo();
    let (media_property, _) = seed(&repo);
    let viewer = user(&["viewer"]);

    let result = products::create_product(&repo, &viewer, form(media_property.id, ""));
    assert!(matches!(result, Err(ServiceError::Unauthorized)));

    let result = products::load_products_page(&repo, &viewer);
    assert!(matches!(result, Err(ServiceError::Unauthorized)));

    assert!(repo.list_products(1).expect("list products").is_empty());
}

#[test]
fn update_missing_product_reports_not_found() {
    let test_db = common::TestDb::new("service_update_missing_product.db");
    let repo = test_db.repo();
    let (media_property, _) = seed(&repo);
    let admin = user(&[SERVICE_ACCESS_ROLE]);

    let result = products::update_product(&repo, &admin, 4242, form(media_property.id, ""));

    assert!(matches!(result, Err(ServiceError::NotFound)));
}
