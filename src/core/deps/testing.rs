//! Recording fakes for tool tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::{
    ConnectionCache, DatabaseDriver, DriverLoader, FetchError, HttpFetch, HttpRequest,
    HttpResponse, QueryParam, StoreError, ToolDependencies, TrademarkRow, TrademarkStore,
};

/// Canned outcome for [`FakeFetcher`].
#[derive(Debug, Clone)]
enum Canned {
    Response(HttpResponse),
    Error(String),
}

/// [`HttpFetch`] returning a canned response and recording every request.
#[derive(Debug, Clone)]
pub struct FakeFetcher {
    canned: Canned,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl FakeFetcher {
    pub fn ok(body: &str) -> Self {
        Self::status(200, "OK", body)
    }

    pub fn status(status: u16, status_text: &str, body: &str) -> Self {
        Self {
            canned: Canned::Response(HttpResponse {
                status,
                status_text: status_text.to_string(),
                body: body.to_string(),
            }),
            requests: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            canned: Canned::Error(message.to_string()),
            requests: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpFetch for FakeFetcher {
    async fn fetch(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        self.requests.lock().unwrap().push(request);
        match &self.canned {
            Canned::Response(response) => Ok(response.clone()),
            Canned::Error(message) => Err(FetchError::Transport(message.clone())),
        }
    }
}

/// [`TrademarkStore`] returning canned rows and recording queries.
#[derive(Debug, Clone)]
pub struct FakeStore {
    rows: Result<Vec<TrademarkRow>, String>,
    queries: Arc<Mutex<Vec<(String, Vec<QueryParam>)>>>,
}

impl FakeStore {
    pub fn with_rows(rows: Vec<TrademarkRow>) -> Self {
        Self {
            rows: Ok(rows),
            queries: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            rows: Err(message.to_string()),
            queries: Arc::default(),
        }
    }

    pub fn queries(&self) -> Vec<(String, Vec<QueryParam>)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl TrademarkStore for FakeStore {
    async fn query(
        &self,
        sql: &str,
        params: &[QueryParam],
    ) -> Result<Vec<TrademarkRow>, StoreError> {
        self.queries
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));
        self.rows.clone().map_err(StoreError::Query)
    }
}

/// [`DatabaseDriver`] handing out one shared [`FakeStore`].
#[derive(Debug, Clone)]
pub struct FakeDriver {
    store: Option<FakeStore>,
    connect_delay: Duration,
    loads: Arc<Mutex<usize>>,
    connects: Arc<Mutex<usize>>,
}

impl FakeDriver {
    pub fn new(store: FakeStore) -> Self {
        Self {
            store: Some(store),
            connect_delay: Duration::ZERO,
            loads: Arc::default(),
            connects: Arc::default(),
        }
    }

    /// Driver whose pool construction always fails.
    pub fn failing() -> Self {
        Self {
            store: None,
            connect_delay: Duration::ZERO,
            loads: Arc::default(),
            connects: Arc::default(),
        }
    }

    /// Make every `connect` block for `delay` before returning.
    pub fn with_connect_delay(mut self, delay: Duration) -> Self {
        self.connect_delay = delay;
        self
    }

    pub fn loader(&self) -> DriverLoader {
        let driver = self.clone();
        Arc::new(move || {
            *driver.loads.lock().unwrap() += 1;
            Ok(Arc::new(driver.clone()) as Arc<dyn DatabaseDriver>)
        })
    }

    /// Loader for a build without any database driver.
    pub fn missing_loader() -> DriverLoader {
        Arc::new(|| Err(StoreError::DriverUnavailable))
    }

    pub fn load_count(&self) -> usize {
        *self.loads.lock().unwrap()
    }

    pub fn connect_count(&self) -> usize {
        *self.connects.lock().unwrap()
    }
}

impl DatabaseDriver for FakeDriver {
    fn connect(&self, _database_url: &str) -> Result<Arc<dyn TrademarkStore>, StoreError> {
        *self.connects.lock().unwrap() += 1;
        std::thread::sleep(self.connect_delay);
        match &self.store {
            Some(store) => Ok(Arc::new(store.clone())),
            None => Err(StoreError::Connect("connection refused".to_string())),
        }
    }
}

/// Build a bundle with the given settings and fakes, and a fresh cache.
pub fn deps_with(
    api_key: Option<&str>,
    database_url: Option<&str>,
    fetcher: FakeFetcher,
    driver_loader: DriverLoader,
) -> ToolDependencies {
    let api_key = api_key.map(str::to_string);
    let database_url = database_url.map(str::to_string);

    ToolDependencies {
        api_key_source: Arc::new(move || api_key.clone()),
        database_url_source: Arc::new(move || database_url.clone()),
        http: Arc::new(fetcher),
        driver_loader,
        connections: Arc::new(ConnectionCache::new()),
    }
}

/// Bundle for the API-backed tools: no database configured.
pub fn api_deps(api_key: Option<&str>, fetcher: FakeFetcher) -> ToolDependencies {
    deps_with(api_key, None, fetcher, FakeDriver::missing_loader())
}
