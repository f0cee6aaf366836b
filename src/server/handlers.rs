//! Route handlers for the contacts API.
//!
//! Each handler extracts its parameters, awaits one service operation and writes the
//! success status. Errors are returned as `ContactError` and rendered by the pipeline.

use crate::error::{ContactError, ContactResult};
use crate::models::{Contact, DeleteAck, NewContact};
use crate::services::ContactService;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub contacts: Arc<dyn ContactService>,
}

pub async fn list_contacts(State(state): State<AppState>) -> ContactResult<Json<Vec<Contact>>> {
    let contacts = state.contacts.list_contacts().await?;
    Ok(Json(contacts))
}

/// `POST /contactos`. An unreadable body is a bad request, same as a missing field.
pub async fn create_contact(
    State(state): State<AppState>,
    payload: Result<Json<NewContact>, JsonRejection>,
) -> ContactResult<(StatusCode, Json<Contact>)> {
    let Json(input) = payload.map_err(|rejection| ContactError::BadRequest(rejection.body_text()))?;
    let contact = state.contacts.create_contact(input).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ContactResult<Json<DeleteAck>> {
    let ack = state.contacts.delete_by_id(&id).await?;
    Ok(Json(ack))
}

pub async fn find_by_name(
    State(state): State<AppState>,
    Path(nombre): Path<String>,
) -> ContactResult<Json<Contact>> {
    Ok(Json(state.contacts.find_by_name(&nombre).await?))
}

pub async fn find_by_phone(
    State(state): State<AppState>,
    Path(telefono): Path<String>,
) -> ContactResult<Json<Contact>> {
    Ok(Json(state.contacts.find_by_phone(&telefono).await?))
}

pub async fn find_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ContactResult<Json<Contact>> {
    Ok(Json(state.contacts.find_by_email(&email).await?))
}
