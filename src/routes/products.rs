use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Local;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::{Context, Tera};

use crate::forms::products::ProductForm;
use crate::models::config::ImageHostConfig;
use crate::repository::DieselRepository;
use crate::services::products::ProductFormPage;
use crate::services::{ServiceError, products};

const PRODUCTS_PATH: &str = "/products";

#[get("/products")]
pub async fn show_products(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match products::load_products_page(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "products",
                &server_config.auth_service_url,
            );
            context.insert("products", &data.products);
            render_template(&tera, "products/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list products: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products/create")]
pub async fn show_create_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    image_host: web::Data<ImageHostConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let today = Local::now().date_naive();

    match products::load_new_product_form(repo.get_ref(), &user, today) {
        Ok(page) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "products",
                &server_config.auth_service_url,
            );
            insert_form_page(&mut context, &page, &image_host, "/products/create");
            render_template(&tera, "products/create.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to load product form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/create")]
pub async fn create_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    const FORM_PATH: &str = "/products/create";

    let form = match parse_product_form(&body) {
        Some(form) => form,
        None => return redirect(FORM_PATH),
    };

    match products::create_product(repo.get_ref(), &user, form) {
        Ok(product) => {
            FlashMessage::success(format!("Товар «{}» добавлен.", product.title)).send();
            redirect(PRODUCTS_PATH)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(FORM_PATH)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Выбранная техника не найдена.").send();
            redirect(FORM_PATH)
        }
        Err(ServiceError::Association(message)) => {
            FlashMessage::error(format!("Не удалось привязать теги: {message}")).send();
            redirect(FORM_PATH)
        }
        Err(err) => {
            log::error!("Failed to create product: {err}");
            FlashMessage::error("Не удалось добавить товар.").send();
            redirect(FORM_PATH)
        }
    }
}

#[get("/products/{product_id}/update")]
pub async fn show_update_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    image_host: web::Data<ImageHostConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::load_edit_product_form(repo.get_ref(), &user, product_id) {
        Ok(page) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "products",
                &server_config.auth_service_url,
            );
            let action = format!("/products/{product_id}/update");
            insert_form_page(&mut context, &page, &image_host, &action);
            render_template(&tera, "products/update.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Товар не найден.").send();
            redirect(PRODUCTS_PATH)
        }
        Err(err) => {
            log::error!("Failed to load product {product_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/{product_id}/update")]
pub async fn update_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let product_id = path.into_inner();
    let form_path = format!("/products/{product_id}/update");

    let form = match parse_product_form(&body) {
        Some(form) => form,
        None => return redirect(&form_path),
    };

    match products::update_product(repo.get_ref(), &user, product_id, form) {
        Ok(product) => {
            FlashMessage::success(format!("Товар «{}» сохранен.", product.title)).send();
            redirect(PRODUCTS_PATH)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Товар или выбранная техника не найдены.").send();
            redirect(PRODUCTS_PATH)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&form_path)
        }
        Err(ServiceError::Association(message)) => {
            log::error!("Failed to reconcile tags of product {product_id}: {message}");
            FlashMessage::error(format!(
                "Товар сохранен, но теги не обновлены: {message}"
            ))
            .send();
            redirect(&form_path)
        }
        Err(err) => {
            log::error!("Failed to update product {product_id}: {err}");
            FlashMessage::error("Не удалось сохранить товар.").send();
            redirect(&form_path)
        }
    }
}

#[get("/products/{product_id}/delete")]
pub async fn show_delete_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::load_product(repo.get_ref(), &user, product_id) {
        Ok(product) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "products",
                &server_config.auth_service_url,
            );
            context.insert("product", &product);
            render_template(&tera, "products/delete.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Товар не найден.").send();
            redirect(PRODUCTS_PATH)
        }
        Err(err) => {
            log::error!("Failed to load product {product_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/{product_id}/delete")]
pub async fn delete_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::delete_product(repo.get_ref(), &user, product_id) {
        Ok(()) => {
            FlashMessage::success("Товар удален.").send();
            redirect(PRODUCTS_PATH)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Товар не найден или уже удален.").send();
            redirect(PRODUCTS_PATH)
        }
        Err(err) => {
            log::error!("Failed to delete product {product_id}: {err}");
            FlashMessage::error("Не удалось удалить товар.").send();
            redirect(PRODUCTS_PATH)
        }
    }
}

/// Decodes the URL-encoded product form, flashing an error when it is malformed.
fn parse_product_form(body: &[u8]) -> Option<ProductForm> {
    match serde_html_form::from_bytes::<ProductForm>(body) {
        Ok(form) => Some(form),
        Err(err) => {
            log::warn!("Rejected malformed product form: {err}");
            FlashMessage::error("Некорректные данные формы.").send();
            None
        }
    }
}

fn insert_form_page(
    context: &mut Context,
    page: &ProductFormPage,
    image_host: &ImageHostConfig,
    action: &str,
) {
    context.insert("config", &page.config);
    context.insert("values", &page.values);
    context.insert("product", &page.product);
    context.insert("image_host", image_host);
    context.insert("image_upload_enabled", &image_host.is_enabled());
    context.insert("form_action", action);
}
