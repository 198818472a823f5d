use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::forms::media_properties::{AddMediaPropertyForm, EditMediaPropertyForm};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::media_properties::{
    create_media_property, load_media_properties, modify_media_property, remove_media_property,
};

const MEDIA_PROPERTIES_PATH: &str = "/media-properties";

#[get("/media-properties")]
pub async fn show_media_properties(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_media_properties(repo.get_ref(), &user) {
        Ok(media_properties) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "media_properties",
                &server_config.auth_service_url,
            );
            context.insert("media_properties", &media_properties);
            render_template(&tera, "media_properties/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list media properties: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/media-properties/add")]
pub async fn add_media_property(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddMediaPropertyForm>,
) -> impl Responder {
    match create_media_property(repo.get_ref(), &user, form) {
        Ok(media_property) => {
            FlashMessage::success(format!("Техника «{}» добавлена.", media_property.name)).send();
            redirect(MEDIA_PROPERTIES_PATH)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(MEDIA_PROPERTIES_PATH)
        }
        Err(err) => {
            log::error!("Failed to create media property: {err}");
            FlashMessage::error("Не удалось добавить технику. Возможно, она уже существует.").send();
            redirect(MEDIA_PROPERTIES_PATH)
        }
    }
}

#[post("/media-properties/edit")]
pub async fn edit_media_property(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<EditMediaPropertyForm>,
) -> impl Responder {
    match modify_media_property(repo.get_ref(), &user, form) {
        Ok(media_property) => {
            FlashMessage::success(format!("Техника «{}» изменена.", media_property.name)).send();
            redirect(MEDIA_PROPERTIES_PATH)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(MEDIA_PROPERTIES_PATH)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Техника не найдена.").send();
            redirect(MEDIA_PROPERTIES_PATH)
        }
        Err(err) => {
            log::error!("Failed to modify media property: {err}");
            FlashMessage::error("Не удалось изменить технику.").send();
            redirect(MEDIA_PROPERTIES_PATH)
        }
    }
}

#[post("/media-properties/{media_property_id}/delete")]
pub async fn delete_media_property(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let media_property_id = path.into_inner();

    match remove_media_property(repo.get_ref(), &user, media_property_id) {
        Ok(()) => {
            FlashMessage::success("Техника удалена.").send();
            redirect(MEDIA_PROPERTIES_PATH)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Недостаточно прав.").send();
            redirect("/na")
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("Техника используется в товарах и не может быть удалена.").send();
            redirect(MEDIA_PROPERTIES_PATH)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Техника не найдена или уже удалена.").send();
            redirect(MEDIA_PROPERTIES_PATH)
        }
        Err(err) => {
            log::error!("Failed to delete media property {media_property_id}: {err}");
            FlashMessage::error("Не удалось удалить технику.").send();
            redirect(MEDIA_PROPERTIES_PATH)
        }
    }
}
