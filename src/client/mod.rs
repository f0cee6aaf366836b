//! HTTP client for the contacts API.
//!
//! A blocking `ureq` client used by the console front end. Error responses from the
//! service carry a JSON body with a `message` field, which is surfaced in
//! `ClientError::ApiError` and `ClientError::NotFound`.

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::{Contact, DeleteAck, NewContact};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error body written by the service.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Blocking client for `/api/v1/contactos`.
#[derive(Clone)]
pub struct ContactsClient {
    base_url: String,
    agent: Arc<ureq::Agent>,
}

impl ContactsClient {
    /// Create a client talking to the service described by `config`.
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(config.api_base_url())
    }

    /// Create a client for an explicit collection URL (useful for testing).
    pub fn with_base_url(base_url: String) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();

        Self {
            base_url,
            agent: Arc::new(agent),
        }
    }

    fn build_url(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.trim_end_matches('/').to_string();
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }

    fn read_json<T: DeserializeOwned>(response: ureq::Response) -> ClientResult<T> {
        let body = response
            .into_string()
            .map_err(|e| ClientError::HttpError(e.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Map ureq errors to ClientError, keeping the service's message when it sent one.
    fn map_error(&self, error: ureq::Error) -> ClientError {
        match error {
            ureq::Error::Status(code, response) => {
                let body = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());
                let message = serde_json::from_str::<ErrorBody>(&body)
                    .map(|parsed| parsed.message)
                    .unwrap_or(body);

                match code {
                    404 => ClientError::NotFound(message),
                    _ => ClientError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    ClientError::HttpError("Connection failed".to_string())
                } else {
                    ClientError::HttpError(transport.to_string())
                }
            }
        }
    }

    fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ClientResult<T> {
        let url = self.build_url(segments);
        tracing::debug!("GET {}", url);

        let response = self.agent.get(&url).call().map_err(|e| self.map_error(e))?;
        Self::read_json(response)
    }

    /// All contacts. The service answers 404 when there are none.
    pub fn list_contacts(&self) -> ClientResult<Vec<Contact>> {
        self.get(&[])
    }

    /// Create a contact and return it with its assigned id.
    pub fn create_contact(&self, contact: &NewContact) -> ClientResult<Contact> {
        let url = self.build_url(&[]);
        tracing::debug!("POST {}", url);

        let response = self
            .agent
            .post(&url)
            .send_json(contact)
            .map_err(|e| self.map_error(e))?;
        Self::read_json(response)
    }

    pub fn find_by_name(&self, name: &str) -> ClientResult<Contact> {
        self.get(&["nombre", name])
    }

    pub fn find_by_phone(&self, phone: &str) -> ClientResult<Contact> {
        self.get(&["telefono", phone])
    }

    pub fn find_by_email(&self, email: &str) -> ClientResult<Contact> {
        self.get(&["email", email])
    }

    /// Delete the contact with `id`.
    pub fn delete_contact(&self, id: &str) -> ClientResult<DeleteAck> {
        let url = self.build_url(&[id]);
        tracing::debug!("DELETE {}", url);

        let response = self
            .agent
            .delete(&url)
            .call()
            .map_err(|e| self.map_error(e))?;
        Self::read_json(response)
    }
}
