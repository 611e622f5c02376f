use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};

use crate::domain::LeadSubmission;
use crate::relay::{LeadRelay, RelayError};

#[derive(serde::Serialize)]
struct MessageBody<'a> {
    message: &'a str,
}

#[derive(serde::Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::ExternalService(_) => StatusCode::BAD_GATEWAY,
            RelayError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

/// Turns a rejected webhook body into a JSON error. Bodies that parse but do
/// not match the lead shape are `422`, everything else is `400`.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let status = match &err {
        JsonPayloadError::Deserialize(e) if e.is_data() => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::BAD_REQUEST,
    };

    tracing::warn!("Rejected webhook payload: {}", err);
    let response = HttpResponse::build(status).json(ErrorBody {
        error: err.to_string(),
    });
    InternalError::from_response(err, response).into()
}

#[tracing::instrument(
    name = "Relaying a new lead",
    skip(submission, relay),
    fields(
        lead_email = %submission.email,
        lead_name = %submission.name,
    )
)]
pub async fn receive_lead(
    submission: web::Json<LeadSubmission>,
    relay: web::Data<LeadRelay>,
) -> Result<HttpResponse, RelayError> {
    relay.forward(&submission).await?;

    Ok(HttpResponse::Ok().json(MessageBody {
        message: "Webhook processed successfully",
    }))
}
