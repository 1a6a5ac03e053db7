//! Blocking HTTP client for the catalog API.

use anyhow::{anyhow, Context, Result};
use recipebook_core::{Category, CategoryDraft, EntityId, Recipe, RecipeDraft};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    message: String,
}

/// Deletion acknowledgement returned by the server.
#[derive(Debug, Deserialize)]
pub struct Confirmation {
    pub message: String,
}

pub struct CatalogClient {
    base_url: String,
    http: Client,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn list_categories(&self) -> Result<Vec<Category>> {
        self.send(self.http.get(self.url("/categories")))
    }

    pub fn get_category(&self, id: EntityId) -> Result<Category> {
        self.send(self.http.get(self.url(&format!("/categories/{id}"))))
    }

    pub fn create_category(&self, draft: &CategoryDraft) -> Result<Category> {
        self.send(self.http.post(self.url("/categories")).json(draft))
    }

    pub fn update_category(&self, id: EntityId, draft: &CategoryDraft) -> Result<Category> {
        self.send(
            self.http
                .put(self.url(&format!("/categories/{id}")))
                .json(draft),
        )
    }

    pub fn delete_category(&self, id: EntityId) -> Result<Confirmation> {
        self.send(self.http.delete(self.url(&format!("/categories/{id}"))))
    }

    pub fn list_recipes(&self) -> Result<Vec<Recipe>> {
        self.send(self.http.get(self.url("/recipes")))
    }

    pub fn get_recipe(&self, id: EntityId) -> Result<Recipe> {
        self.send(self.http.get(self.url(&format!("/recipes/{id}"))))
    }

    pub fn create_recipe(&self, draft: &RecipeDraft) -> Result<Recipe> {
        self.send(self.http.post(self.url("/recipes")).json(draft))
    }

    pub fn update_recipe(&self, id: EntityId, draft: &RecipeDraft) -> Result<Recipe> {
        self.send(self.http.put(self.url(&format!("/recipes/{id}"))).json(draft))
    }

    pub fn delete_recipe(&self, id: EntityId) -> Result<Confirmation> {
        self.send(self.http.delete(self.url(&format!("/recipes/{id}"))))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .send()
            .with_context(|| format!("cannot reach RecipeBook server at {}", self.base_url))?;
        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .with_context(|| format!("unexpected response body (status {status})"));
        }

        let text = response.text().unwrap_or_default();
        Err(describe_failure(status.as_u16(), &text))
    }
}

fn describe_failure(status: u16, body: &str) -> anyhow::Error {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => anyhow!("{} ({status}): {}", parsed.error, parsed.message),
        Err(_) if body.trim().is_empty() => anyhow!("request failed with status {status}"),
        Err(_) => anyhow!("request failed with status {status}: {}", body.trim()),
    }
}
