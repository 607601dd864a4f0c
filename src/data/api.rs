//! Graph endpoint client (`GET {base}/api/graph/{slug}`).

use reqwest::blocking::Client;
use reqwest::header::REFERER;

use crate::error::AppError;
use crate::io::ingest::{parse_graph_json, IngestedGraph};

pub const BASE_URL_ENV: &str = "GRAPH_API_BASE";

pub struct GraphClient {
    client: Client,
    base_url: String,
}

impl GraphClient {
    /// Build a client from `GRAPH_API_BASE` (environment or `.env`).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var(BASE_URL_ENV)
            .map_err(|_| AppError::usage(format!("Missing {BASE_URL_ENV} in environment (.env).")))?;
        Self::with_base_url(&base_url)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, AppError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(AppError::usage(format!("{BASE_URL_ENV} is empty.")));
        }
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    pub fn graph_url(&self, slug: &str) -> String {
        format!("{}/api/graph/{}", self.base_url, slug.trim_matches('/'))
    }

    pub fn fetch_graph(&self, slug: &str) -> Result<IngestedGraph, AppError> {
        if slug.trim().is_empty() {
            return Err(AppError::usage("Graph slug must not be empty (use `api:<slug>`)."));
        }
        let url = self.graph_url(slug);
        tracing::info!(%url, "fetching graph");

        // The endpoint only answers requests that look like they come from the site.
        let resp = self
            .client
            .get(&url)
            .header(REFERER, &self.base_url)
            .send()
            .map_err(|e| AppError::io(format!("Graph request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::io(format!(
                "Graph request for '{slug}' failed with status {}.",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .map_err(|e| AppError::io(format!("Failed to read graph response: {e}")))?;
        let graph = parse_graph_json(&body)
            .map_err(|e| AppError::io(format!("Failed to parse graph response: {}", e.message())))?;

        tracing::debug!(slug, datasets = graph.datasets.len(), "graph fetched");
        Ok(IngestedGraph::from_graph(graph))
    }
}
