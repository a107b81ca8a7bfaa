use actix_web::{HttpResponse, Responder, get, web};

use crate::dto::api::{ClientsQuery, ClientsResponse, ErrorResponse};
use crate::pagination::{Cursor, DEFAULT_PAGE_SIZE};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::clients::{ListRequest, list_clients};

#[get("/v1/clients")]
pub async fn api_v1_clients(
    params: web::Query<ClientsQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ClientsQuery {
        cursor,
        page_size,
        search,
    } = params.into_inner();

    let request = match ListRequest::new(
        cursor.map(Cursor::new),
        page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        search.as_deref(),
    ) {
        Ok(request) => request,
        Err(err) => return error_response(&err),
    };

    let repo = repo.into_inner();
    match web::block(move || list_clients(repo.as_ref(), request)).await {
        Ok(Ok(page)) => HttpResponse::Ok().json(ClientsResponse::from(page)),
        Ok(Err(err)) => error_response(&err),
        Err(err) => {
            log::error!("Client listing task failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn error_response(err: &ServiceError) -> HttpResponse {
    match err {
        ServiceError::InvalidArgument(_) | ServiceError::InvalidCursor(_) => {
            HttpResponse::BadRequest().json(ErrorResponse {
                error: err.to_string(),
            })
        }
        _ => {
            log::error!("Failed to list clients: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
