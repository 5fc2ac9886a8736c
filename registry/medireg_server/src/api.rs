//! JSON endpoints behind the registration, lookup and update forms.
//!
//! | Method | Path                    | Form operation  |
//! |--------|-------------------------|-----------------|
//! | POST   | `/patients`             | register        |
//! | GET    | `/patients/lookup`      | lookup          |
//! | POST   | `/patients/update`      | update          |
//! | GET    | `/stats`                | summary sidebar |

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Json, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use log::{info, warn};
use medireg_forms::{
    FormController, FormError, LookupQuery, PatientForm, Stats, UpdateForm, ValidationErrors,
};
use medireg_model::{HospitalId, PatientRecord, Phone};
use serde::Serialize;

use crate::session::SessionId;
use crate::AppState;

/// Confirmation after registration.
pub const REGISTERED_MESSAGE: &str = "Patient registered successfully!";
/// Reminder shown with a new hospital ID.
pub const SAVE_ID_HINT: &str = "Please save the Hospital ID for future reference";
/// Confirmation after an update.
pub const UPDATED_MESSAGE: &str = "Patient information updated successfully!";
/// Shown when an update changed the phone number.
pub const REKEYED_HINT: &str = "Phone number updated. Please use the new number for future searches.";
/// Prefix of the message for unreadable request bodies and queries.
pub const MALFORMED_MESSAGE: &str = "The form could not be read";
/// Suggestion shown with a lookup miss.
pub const NOT_FOUND_HINT: &str =
    "The patient may need to be registered first. Please use the 'New Patient Registration' section.";

/// Routes mounted under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/patients", post(register_patient))
        .route("/patients/lookup", get(lookup_patient))
        .route("/patients/update", post(update_patient))
        .route("/stats", get(stats))
}

/// Body of a `201 Created` registration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    /// The newly assigned ID.
    pub hospital_id: HospitalId,
    /// Registered name.
    pub name: String,
    /// Normalized phone number.
    pub phone: Phone,
    /// [`REGISTERED_MESSAGE`]
    pub message: &'static str,
    /// [`SAVE_ID_HINT`]
    pub hint: &'static str,
}

/// Body of a successful update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    /// The record after the update.
    pub record: PatientRecord,
    /// Whether the phone number changed.
    pub rekeyed: bool,
    /// [`UPDATED_MESSAGE`]
    pub message: &'static str,
    /// [`REKEYED_HINT`] when re-keyed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

/// A rejected request rendered as an HTTP response.
#[derive(Debug)]
pub enum ApiError {
    /// The form controller turned the submission down.
    Form(FormError),
    /// The body or query string could not be read into a form at all.
    Malformed(String),
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        Self::Form(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Malformed(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Malformed(rejection.body_text())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field_errors: Option<&'a ValidationErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<&'static str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            Self::Form(err) => err,
            Self::Malformed(detail) => {
                let body = ErrorBody {
                    error: "validation",
                    message: format!("{MALFORMED_MESSAGE}: {detail}"),
                    field_errors: None,
                    hint: None,
                };
                return (StatusCode::BAD_REQUEST, Json(body)).into_response();
            }
        };
        let (status, kind, hint) = match &err {
            FormError::Validation(_) => (StatusCode::BAD_REQUEST, "validation", None),
            FormError::InvalidPhone => (StatusCode::BAD_REQUEST, "invalidPhone", None),
            FormError::DuplicateKey(_) => (StatusCode::CONFLICT, "duplicateKey", None),
            FormError::NotFound => (StatusCode::NOT_FOUND, "notFound", Some(NOT_FOUND_HINT)),
        };
        let field_errors = match &err {
            FormError::Validation(errors) => Some(errors),
            _ => None,
        };
        let body = ErrorBody {
            error: kind,
            message: err.to_string(),
            field_errors,
            hint,
        };
        (status, Json(body)).into_response()
    }
}

async fn register_patient(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    form: Result<Json<PatientForm>, JsonRejection>,
) -> Result<(StatusCode, Json<RegistrationResponse>), ApiError> {
    let Json(form) = form?;
    let record = state
        .sessions
        .with_store(session, |store| FormController::new(store).register(&form))
        .map_err(|err| {
            warn!("registration rejected: {err}");
            ApiError::Form(err)
        })?;

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            hospital_id: record.hospital_id,
            name: record.name,
            phone: record.phone,
            message: REGISTERED_MESSAGE,
            hint: SAVE_ID_HINT,
        }),
    ))
}

async fn lookup_patient(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    query: Result<Query<LookupQuery>, QueryRejection>,
) -> Result<Json<PatientRecord>, ApiError> {
    let Query(query) = query?;
    let record = state
        .sessions
        .with_existing_store(session, |store| FormController::new(store).lookup(&query))?;
    Ok(Json(record))
}

async fn update_patient(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    form: Result<Json<UpdateForm>, JsonRejection>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let Json(form) = form?;
    let outcome = state
        .sessions
        .with_existing_store(session, |store| FormController::new(store).update(&form))
        .map_err(|err| {
            warn!("update rejected: {err}");
            ApiError::Form(err)
        })?;
    if outcome.rekeyed {
        info!("patient {} moved to a new phone number", outcome.record.hospital_id);
    }

    Ok(Json(UpdateResponse {
        hint: outcome.rekeyed.then_some(REKEYED_HINT),
        rekeyed: outcome.rekeyed,
        record: outcome.record,
        message: UPDATED_MESSAGE,
    }))
}

async fn stats(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Json<Stats> {
    Json(
        state
            .sessions
            .with_existing_store(session, |store| FormController::new(store).stats()),
    )
}
