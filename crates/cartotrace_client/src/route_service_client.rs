use std::time::Duration;

use cartotrace_core::{
    comparison::ComparisonResult,
    point::Point,
    route_service::{RouteService, ServiceError},
    trace::{Algorithm, Trace},
};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    client_error::ClientError,
    wire::{self, AddPointRequestBody, CompareResponse, ScenarioResponse, SolveRequestBody},
};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct RouteServiceClientParams {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for RouteServiceClientParams {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub struct RouteServiceClient {
    params: RouteServiceClientParams,
    base_url: Url,
    client: reqwest::Client,
}

impl RouteServiceClient {
    pub fn new(params: RouteServiceClientParams) -> Result<Self, ClientError> {
        let base_url = Url::parse(&params.base_url)
            .map_err(|err| ClientError::InvalidUrl(format!("{}: {}", params.base_url, err)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(params.base_url.clone()));
        }

        let client = reqwest::Client::builder().timeout(params.timeout).build()?;

        Ok(Self {
            params,
            base_url,
            client,
        })
    }

    /// Appends `segments` to the base URL, percent-encoding each of them.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidUrl(self.params.base_url.clone()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    pub async fn get_cities(&self) -> Result<Vec<Point>, ClientError> {
        let url = self.endpoint(&["api", "cities"])?;
        let response = self.client.get(url).send().await?;
        let bytes = Self::handle_response(response).await?;

        let points = wire::parse_points(&bytes)?;
        debug!("RouteService: fetched {} cities", points.len());
        Ok(points)
    }

    pub async fn post_city(&self, point: &Point) -> Result<bool, ClientError> {
        let url = self.endpoint(&["api", "cities"])?;
        let body = AddPointRequestBody {
            name: &point.name,
            lat: point.lat,
            lng: point.lng,
        };
        let response = self.client.post(url).json(&body).send().await?;
        let bytes = Self::handle_response(response).await?;

        Self::read_success(&bytes)
    }

    /// An unknown name is reported as `false`, not as an error.
    pub async fn delete_city(&self, name: &str) -> Result<bool, ClientError> {
        let url = self.endpoint(&["api", "cities", name])?;
        let response = self.client.delete(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("RouteService: city {} not found", name);
            return Ok(false);
        }

        let bytes = Self::handle_response(response).await?;
        Self::read_success(&bytes)
    }

    pub async fn post_solve(&self, algorithm: Algorithm) -> Result<Trace, ClientError> {
        let url = self.endpoint(&["api", "solve"])?;
        let response = self
            .client
            .post(url)
            .json(&SolveRequestBody { algorithm })
            .send()
            .await?;
        let bytes = Self::handle_response(response).await?;

        let trace: Trace = wire::parse_envelope(&bytes)?;
        debug!(
            "RouteService: {} solved with {} steps, total {:.2} km",
            algorithm,
            trace.steps.len(),
            trace.total_distance
        );
        Ok(trace)
    }

    pub async fn post_compare(&self) -> Result<ComparisonResult, ClientError> {
        let url = self.endpoint(&["api", "compare"])?;
        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        let bytes = Self::handle_response(response).await?;

        let response: CompareResponse = wire::parse_envelope(&bytes)?;
        Ok(response.results)
    }

    pub async fn post_scenario(&self, id: u32) -> Result<Vec<Point>, ClientError> {
        let url = self.endpoint(&["api", "scenario", &id.to_string()])?;
        let response = self.client.post(url).send().await?;
        let bytes = Self::handle_response(response).await?;

        let response: ScenarioResponse = wire::parse_envelope(&bytes)?;
        Ok(response.cities.into_iter().map(Point::from).collect())
    }

    pub async fn post_reset(&self) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", "reset"])?;
        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        let bytes = Self::handle_response(response).await?;

        let value: Value = serde_json::from_slice(&bytes)?;
        wire::ensure_success(&value)
    }

    fn read_success(bytes: &[u8]) -> Result<bool, ClientError> {
        let value: Value = serde_json::from_slice(bytes)?;
        match value.get("success").and_then(Value::as_bool) {
            Some(success) if success || wire::error_message(&value).is_none() => Ok(success),
            _ => Err(ClientError::Rejected(wire::error_message(&value))),
        }
    }

    async fn handle_response(response: reqwest::Response) -> Result<Vec<u8>, ClientError> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            Ok(bytes.to_vec())
        } else {
            Err(wire::rejection(status.as_u16(), &bytes))
        }
    }
}

impl RouteService for RouteServiceClient {
    #[instrument(skip(self))]
    async fn fetch_points(&self) -> Result<Vec<Point>, ServiceError> {
        Ok(self.get_cities().await?)
    }

    #[instrument(skip(self, point), fields(name = %point.name))]
    async fn add_point(&self, point: &Point) -> Result<bool, ServiceError> {
        Ok(self.post_city(point).await?)
    }

    #[instrument(skip(self))]
    async fn remove_point(&self, name: &str) -> Result<bool, ServiceError> {
        Ok(self.delete_city(name).await?)
    }

    #[instrument(skip(self))]
    async fn solve(&self, algorithm: Algorithm) -> Result<Trace, ServiceError> {
        Ok(self.post_solve(algorithm).await?)
    }

    #[instrument(skip(self))]
    async fn compare(&self) -> Result<ComparisonResult, ServiceError> {
        Ok(self.post_compare().await?)
    }

    #[instrument(skip(self))]
    async fn switch_scenario(&self, id: u32) -> Result<Vec<Point>, ServiceError> {
        Ok(self.post_scenario(id).await?)
    }

    #[instrument(skip(self))]
    async fn reset(&self) -> Result<(), ServiceError> {
        Ok(self.post_reset().await?)
    }
}
