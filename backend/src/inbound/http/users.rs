//! User registry HTTP handlers.
//!
//! ```text
//! GET /user/test1@example.com
//! POST /user {"ID":"9d225408-6a94-49e7-8e04-69ff654e0ff4","Name":"Alice","Email":"test1@example.com","Birthday":"1999-12-31"}
//! ```
//!
//! Errors are answered with a plain-text body holding the error message.

use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{debug, error, info, warn};

use crate::domain::ports::UserRegistryError;
use crate::domain::{Error, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::middleware::TraceId;

const MALFORMED_URI: &str = "malformed URI";

/// Register the user routes on an application or scope.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_registry::inbound::http::users::configure_user_routes;
///
/// let _app = App::new().configure(configure_user_routes);
/// ```
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/user")
            .route(web::get().to(get_user))
            .route(web::post().to(create_user)),
    )
    .service(web::resource("/user/{tail:.*}").route(web::get().to(get_user)));
}

/// Map registry failures onto client-facing errors.
pub fn map_registry_error(err: UserRegistryError) -> Error {
    let message = err.to_string();
    match err {
        UserRegistryError::NotFound => Error::not_found(message),
        UserRegistryError::EmailAlreadyExists | UserRegistryError::IdAlreadyExists => {
            Error::conflict(message)
        }
        UserRegistryError::MalformedInput { .. } => Error::invalid_request(message),
        UserRegistryError::Conflict { .. }
        | UserRegistryError::Cancelled { .. }
        | UserRegistryError::Storage { .. } => Error::internal(message),
    }
}

/// First segment of the `/user/{tail}` match.
///
/// The router has already percent-decoded the tail, so `test1%40example.com`
/// arrives as `test1@example.com`. A missing or all-slash tail yields `None`.
fn email_from_tail(tail: Option<&str>) -> Option<&str> {
    let tail = tail?.trim_end_matches('/');
    if tail.is_empty() {
        return None;
    }
    tail.split('/').next()
}

/// Fetch a user by email.
#[utoipa::path(
    get,
    path = "/user/{email}",
    params(("email" = String, Path, description = "Email the user registered with")),
    responses(
        (status = 200, description = "User", body = User, content_type = "application/json"),
        (status = 400, description = "Malformed URI", body = String, content_type = "text/plain"),
        (status = 404, description = "No user with that email", body = String, content_type = "text/plain"),
        (status = 500, description = "Storage failure", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
pub async fn get_user(state: web::Data<HttpState>, req: HttpRequest) -> ApiResult<HttpResponse> {
    let path = req.path();
    let trace_id = TraceId::current();
    let Some(email) = email_from_tail(req.match_info().get("tail")) else {
        warn!(component = "api", request = "getUser", %path, ?trace_id, "malformed URI");
        return Err(Error::invalid_request(MALFORMED_URI));
    };

    let user = match state.users.get_user(email).await {
        Ok(user) => user,
        Err(err @ UserRegistryError::NotFound) => {
            debug!(component = "api", request = "getUser", %path, %email, ?trace_id, "user not found");
            return Err(map_registry_error(err));
        }
        Err(err) => {
            error!(
                component = "api",
                request = "getUser",
                %path,
                %email,
                ?trace_id,
                error = %err,
                "user lookup failed"
            );
            return Err(map_registry_error(err));
        }
    };

    let body = serde_json::to_vec(&user).map_err(|err| {
        error!(component = "api", request = "getUser", %path, %email, ?trace_id, error = %err, "user encoding failed");
        Error::internal(err.to_string())
    })?;
    info!(component = "api", request = "getUser", %path, %email, ?trace_id, "user returned");
    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/user",
    request_body(content = User, content_type = "application/json"),
    responses(
        (status = 204, description = "User created"),
        (status = 400, description = "Invalid JSON or birthday", body = String, content_type = "text/plain"),
        (status = 409, description = "Email or ID already registered", body = String, content_type = "text/plain"),
        (status = 500, description = "Storage failure", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
pub async fn create_user(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let path = req.path();
    let trace_id = TraceId::current();

    let user: User = serde_json::from_slice(&body).map_err(|err| {
        warn!(component = "api", request = "createUser", %path, ?trace_id, error = %err, "invalid user payload");
        Error::invalid_request(err.to_string())
    })?;

    if let Err(err) = user.validate() {
        warn!(
            component = "api",
            request = "createUser",
            %path,
            user_id = %user.id(),
            email = user.email(),
            birthday = user.birthday(),
            ?trace_id,
            error = %err,
            "user rejected"
        );
        return Err(Error::invalid_request(err.to_string()));
    }

    match state.users.create_user(&user).await {
        Ok(()) => {
            info!(
                component = "api",
                request = "createUser",
                %path,
                user_id = %user.id(),
                email = user.email(),
                ?trace_id,
                "user created"
            );
            Ok(HttpResponse::NoContent().finish())
        }
        Err(err) => {
            warn!(
                component = "api",
                request = "createUser",
                %path,
                user_id = %user.id(),
                email = user.email(),
                ?trace_id,
                error = %err,
                "user not created"
            );
            Err(map_registry_error(err))
        }
    }
}

#[cfg(test)]
mod tests;
