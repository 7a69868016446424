use actix_web::{get, HttpResponse, Responder};

#[get("/")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("prospect is up")
}
