use std::future::Future;

use thiserror::Error;

use crate::{
    comparison::ComparisonResult,
    point::Point,
    trace::{Algorithm, Trace},
};

pub const GENERIC_FAILURE_MESSAGE: &str = "Could not reach the route service, please try again";
pub const GENERIC_REJECTION_MESSAGE: &str = "The route service could not complete the request";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceError {
    /// Network failure or a body that could not be parsed
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The service answered but did not succeed
    #[error("Rejected by the route service: {}", .0.as_deref().unwrap_or(GENERIC_REJECTION_MESSAGE))]
    Rejected(Option<String>),
}

impl ServiceError {
    /// Text shown to the user when the operation is aborted.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Transport(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            ServiceError::Rejected(Some(message)) => message.clone(),
            ServiceError::Rejected(None) => GENERIC_REJECTION_MESSAGE.to_string(),
        }
    }
}

/// The solver and city service, reached through complete request/response exchanges.
pub trait RouteService {
    fn fetch_points(&self) -> impl Future<Output = Result<Vec<Point>, ServiceError>> + Send;

    fn add_point(&self, point: &Point) -> impl Future<Output = Result<bool, ServiceError>> + Send;

    fn remove_point(&self, name: &str) -> impl Future<Output = Result<bool, ServiceError>> + Send;

    fn solve(&self, algorithm: Algorithm)
    -> impl Future<Output = Result<Trace, ServiceError>> + Send;

    fn compare(&self) -> impl Future<Output = Result<ComparisonResult, ServiceError>> + Send;

    /// Makes `id` the active dataset and returns its points.
    fn switch_scenario(
        &self,
        id: u32,
    ) -> impl Future<Output = Result<Vec<Point>, ServiceError>> + Send;

    fn reset(&self) -> impl Future<Output = Result<(), ServiceError>> + Send;
}
