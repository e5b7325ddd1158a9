//! HTTP access to the remote superhero collection.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    domain::{SortOrder, Superhero},
    error::{ApiErrorBody, ApiFailure},
    protocol::{
        CreateSuperheroRequest, ListSuperheroesQuery, SuperheroListResponse, SUPERHEROES_ROUTE,
    },
};
use tracing::warn;

pub const LIST_FAILED_MESSAGE: &str = "Failed to fetch superheroes.";
pub const CREATE_REJECTED_MESSAGE: &str = "Failed to add superhero.";
pub const CREATE_FAILED_MESSAGE: &str = "Error adding superhero.";

#[async_trait]
pub trait SuperheroApi: Send + Sync {
    async fn list(&self, order: SortOrder) -> Result<Vec<Superhero>, ApiFailure>;
    async fn create(&self, hero: &Superhero) -> Result<(), ApiFailure>;
}

pub struct HttpSuperheroApi {
    http: Client,
    base_url: String,
}

impl HttpSuperheroApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{SUPERHEROES_ROUTE}", self.base_url)
    }
}

#[async_trait]
impl SuperheroApi for HttpSuperheroApi {
    async fn list(&self, order: SortOrder) -> Result<Vec<Superhero>, ApiFailure> {
        let response = self
            .http
            .get(self.collection_url())
            .query(&ListSuperheroesQuery { order })
            .send()
            .await
            .map_err(|err| {
                warn!(%order, "failed to reach roster service: {err}");
                ApiFailure::new(None, LIST_FAILED_MESSAGE)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ApiErrorBody>().await.ok();
            warn!(%order, status = status.as_u16(), "roster list rejected");
            return Err(ApiFailure::from_body(
                Some(status.as_u16()),
                body.as_ref(),
                LIST_FAILED_MESSAGE,
            ));
        }

        let body: SuperheroListResponse = response.json().await.map_err(|err| {
            warn!(%order, "invalid roster list payload: {err}");
            ApiFailure::new(Some(status.as_u16()), LIST_FAILED_MESSAGE)
        })?;
        Ok(body.data)
    }

    async fn create(&self, hero: &Superhero) -> Result<(), ApiFailure> {
        let response = self
            .http
            .post(self.collection_url())
            .json(&CreateSuperheroRequest::from(hero))
            .send()
            .await
            .map_err(|err| {
                warn!(name = %hero.name, "failed to reach roster service: {err}");
                ApiFailure::new(None, CREATE_FAILED_MESSAGE)
            })?;

        let status = response.status();
        if status == StatusCode::CREATED {
            return Ok(());
        }

        let body = response.json::<ApiErrorBody>().await.ok();
        let fallback = if status.is_success() {
            CREATE_REJECTED_MESSAGE
        } else {
            CREATE_FAILED_MESSAGE
        };
        warn!(name = %hero.name, status = status.as_u16(), "superhero create not acknowledged");
        Err(ApiFailure::from_body(
            Some(status.as_u16()),
            body.as_ref(),
            fallback,
        ))
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
