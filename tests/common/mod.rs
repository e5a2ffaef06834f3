use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use toptracks::clients::{
    ApiClient, SpotifyClient, Transport,
    api::{ApiRequest, DEFAULT_BASE_URL},
    errors::{Error, Result},
    spotify::QueryOptions,
};

pub const TOP_TRACKS_URL: &str =
    "https://api.spotify.com/v1/me/top/tracks?time_range=long_term&limit=5";

pub fn artist_url(id: &str) -> String {
    format!("https://api.spotify.com/v1/artists/{id}/top-tracks?market=BR")
}

/// Serves canned bodies by URL and records every request it sees.
#[derive(Clone, Default)]
pub struct FakeTransport {
    responses: Arc<Mutex<HashMap<String, std::result::Result<Value, u16>>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl FakeTransport {
    pub fn respond(self, url: impl Into<String>, body: Value) -> Self {
        self.responses.lock().unwrap().insert(url.into(), Ok(body));
        self
    }

    pub fn fail(self, url: impl Into<String>, status: u16) -> Self {
        self.responses.lock().unwrap().insert(url.into(), Err(status));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }

    pub fn client(&self) -> SpotifyClient {
        self.client_with(QueryOptions::default())
    }

    pub fn client_with(&self, options: QueryOptions) -> SpotifyClient {
        let api = ApiClient::new(Box::new(self.clone()), DEFAULT_BASE_URL, "test-token");
        SpotifyClient::new(api, options).unwrap()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);
        match self.responses.lock().unwrap().get(&url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(Error::Api {
                status: *status,
                message: "mocked failure".into(),
            }),
            None => Err(Error::Api {
                status: 404,
                message: format!("no mocked response for {url}"),
            }),
        }
    }
}
