//! The tiles request surface.
//!
//! `GET ?action=tiles&groupsSizes=[2,3,4]&numTags=3&language=en` answers with
//! the generated tiles as a JSON array, or with `{ "message": ... }` and an
//! error status. Query values arrive already URL-decoded.

use std::{collections::BTreeMap, num::NonZero};

use almost_core::GroupSpec;
use almost_generator::PuzzleGenerator;
use almost_store::TermStore;
use serde_json::{Value, json};

/// An incoming request: the method and the decoded query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub query: BTreeMap<String, String>,
}

impl Request {
    #[must_use]
    pub fn get<I, K, V>(query: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            method: "GET".to_owned(),
            query: query
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A response: an HTTP status code and a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

impl Response {
    fn message(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "message": message.into() }),
        }
    }
}

/// A request rejected before reaching the generator.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RequestError {
    #[display("Invalid request method")]
    MethodNotAllowed,
    #[display("Invalid action parameter")]
    InvalidAction,
    #[display("Missing {name} parameter")]
    Missing {
        name: &'static str,
    },
    #[display("Invalid {name} parameter: {reason}")]
    Invalid {
        name: &'static str,
        reason: String,
    },
}

impl RequestError {
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::MethodNotAllowed => 405,
            Self::InvalidAction | Self::Missing { .. } | Self::Invalid { .. } => 400,
        }
    }
}

impl From<RequestError> for Response {
    fn from(err: RequestError) -> Self {
        Self::message(err.status(), err.to_string())
    }
}

/// A validated tiles request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilesQuery {
    pub groups: GroupSpec,
    pub num_tags: usize,
    pub language: String,
}

impl TilesQuery {
    /// Validates a request. Parameters are checked in a fixed order, so the first
    /// missing one is the one reported.
    pub fn parse(request: &Request) -> Result<Self, RequestError> {
        if request.method != "GET" {
            return Err(RequestError::MethodNotAllowed);
        }
        if request.query.get("action").map(String::as_str) != Some("tiles") {
            return Err(RequestError::InvalidAction);
        }

        let groups = required(request, "groupsSizes")?;
        let num_tags = required(request, "numTags")?;
        let language = required(request, "language")?;

        let sizes: Vec<usize> =
            serde_json::from_str(groups).map_err(|e| RequestError::Invalid {
                name: "groupsSizes",
                reason: e.to_string(),
            })?;
        let groups = GroupSpec::new(sizes).map_err(|e| RequestError::Invalid {
            name: "groupsSizes",
            reason: e.to_string(),
        })?;
        let num_tags = num_tags
            .parse::<NonZero<usize>>()
            .map_err(|e| RequestError::Invalid {
                name: "numTags",
                reason: e.to_string(),
            })?
            .get();

        Ok(Self {
            groups,
            num_tags,
            language: language.to_owned(),
        })
    }
}

fn required<'a>(request: &'a Request, name: &'static str) -> Result<&'a str, RequestError> {
    request
        .query
        .get(name)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .ok_or(RequestError::Missing { name })
}

/// Answers a tiles request from `store`.
pub async fn handle<S>(request: &Request, store: &S, max_attempts: NonZero<usize>) -> Response
where
    S: TermStore,
{
    let query = match TilesQuery::parse(request) {
        Ok(query) => query,
        Err(err) => {
            log::debug!("rejected request: {err}");
            return err.into();
        }
    };

    let generator = PuzzleGenerator::new(store)
        .with_max_attempts(max_attempts)
        .with_language(query.language);
    let puzzle = match generator
        .generate_with_num_tags(&query.groups, query.num_tags)
        .await
    {
        Ok(puzzle) => puzzle,
        Err(err) => {
            log::warn!("tiles request failed: {err}");
            return Response::message(500, "Failed to get tiles");
        }
    };

    match serde_json::to_value(puzzle.tiles()) {
        Ok(body) => Response { status: 200, body },
        Err(err) => {
            log::error!("failed to serialize tiles: {err}");
            Response::message(500, "Failed to get tiles")
        }
    }
}
