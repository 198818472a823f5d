use actix_web::{Responder, get};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::redirect;

#[get("/")]
pub async fn show_index(_user: AuthenticatedUser) -> impl Responder {
    redirect("/products")
}
