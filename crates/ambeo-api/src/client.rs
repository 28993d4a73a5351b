// Soundbar HTTP client
//
// Wraps `reqwest::Client` with the three device endpoints. Every call
// resolves the configured host to a literal IP first: the soundbar's
// embedded HTTP server rejects requests whose Host header is a name.
// Each URL also carries a millisecond `_nocache` parameter because the
// device (or something in front of it) caches GET responses.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::{DataResponse, DataValue, Row, RowsResponse, TypedValue};
use crate::transport::TransportConfig;

/// The soundbar always listens on plain HTTP port 80.
pub const DEFAULT_PORT: u16 = 80;

// ── Endpoint ─────────────────────────────────────────────────────

/// Where the soundbar lives: a hostname or literal IP plus port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
        }
    }

    /// Override the port (test servers, port-forwarding setups).
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Resolve to a `ip:port` authority for the next request.
    ///
    /// Literal IPs pass straight through. Names are looked up on every call
    /// (DHCP leases move). If resolution fails the original host string is
    /// used so the request itself fails with a diagnosable error.
    pub async fn authority(&self) -> String {
        let host = self.host.trim_start_matches('[').trim_end_matches(']');
        if let Ok(ip) = host.parse::<IpAddr>() {
            return SocketAddr::new(ip, self.port).to_string();
        }

        match tokio::net::lookup_host((host, self.port)).await {
            Ok(addrs) => {
                let addrs: Vec<SocketAddr> = addrs.collect();
                // Prefer IPv4: the soundbar's IPv6 support varies by firmware.
                let chosen = addrs
                    .iter()
                    .find(|a| a.is_ipv4())
                    .or_else(|| addrs.first());
                if let Some(addr) = chosen {
                    trace!(host, %addr, "resolved soundbar host");
                    return addr.to_string();
                }
                debug!(host, "host resolved to no addresses, passing through");
            }
            Err(e) => {
                debug!(host, error = %e, "host resolution failed, passing through");
            }
        }
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

// ── Roles ────────────────────────────────────────────────────────

/// The `roles` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Read everything the path offers.
    All,
    /// Write the path's value.
    Value,
    /// Trigger the path (input switching). Fire-and-forget.
    Activate,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "@all",
            Self::Value => "value",
            Self::Activate => "activate",
        }
    }
}

/// Default `getRows` window. Real catalogs are far smaller.
pub const DEFAULT_ROW_WINDOW: u32 = 20;

// ── SoundbarClient ───────────────────────────────────────────────

/// Raw HTTP client for the soundbar control API.
///
/// Stateless apart from the connection pool: every method is a single
/// request with the transport timeout as its only bound. There is no
/// retry logic here; the caller's poll loop is the retry.
pub struct SoundbarClient {
    http: reqwest::Client,
    endpoint: Endpoint,
    timeout_secs: u64,
}

impl SoundbarClient {
    /// Create a client from a `TransportConfig`.
    pub fn new(endpoint: Endpoint, transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
            endpoint,
            timeout_secs: transport.timeout.as_secs(),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, endpoint: Endpoint) -> Self {
        Self {
            http,
            endpoint,
            timeout_secs: 0,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    // ── Endpoints ────────────────────────────────────────────────

    /// `getData`: read a single tagged value.
    pub async fn get_data(&self, path: &str) -> Result<DataValue, Error> {
        let url = self
            .url("getData", &[("path", path), ("roles", Role::All.as_str())])
            .await?;
        let resp: DataResponse = self.get_json(url, path).await?;
        Ok(resp.value)
    }

    /// `getRows`: read rows `from..to` of a list path.
    pub async fn get_rows(&self, path: &str, from: u32, to: u32) -> Result<Vec<Row>, Error> {
        let from = from.to_string();
        let to = to.to_string();
        let url = self
            .url(
                "getRows",
                &[
                    ("path", path),
                    ("roles", Role::All.as_str()),
                    ("from", &from),
                    ("to", &to),
                ],
            )
            .await?;
        let resp: RowsResponse = self.get_json(url, path).await?;
        Ok(resp.rows)
    }

    /// `setData` with the `value` role. Succeeds only on a non-error reply.
    pub async fn set_data(&self, path: &str, value: &TypedValue) -> Result<(), Error> {
        let url = self.set_url(path, Role::Value, value).await?;
        let _: Value = self.get_json(url, path).await?;
        Ok(())
    }

    /// `setData` with the `activate` role.
    ///
    /// The device does not confirm activation and often answers slowly or
    /// not at all while it switches, so the reply is ignored and the call
    /// always counts as issued. Only a URL construction failure is an error.
    pub async fn activate(&self, path: &str) -> Result<(), Error> {
        let url = self
            .set_url(path, Role::Activate, &TypedValue::Bool(true))
            .await?;
        debug!("GET {}", url);
        match self.http.get(url).send().await {
            Ok(resp) => trace!(status = %resp.status(), path, "activate acknowledged"),
            Err(e) => debug!(error = %e, path, "activate reply not received (ignored)"),
        }
        Ok(())
    }

    // ── URL builders ─────────────────────────────────────────────

    async fn set_url(&self, path: &str, role: Role, value: &TypedValue) -> Result<Url, Error> {
        let payload = value.payload().to_string();
        self.url(
            "setData",
            &[("path", path), ("roles", role.as_str()), ("value", &payload)],
        )
        .await
    }

    /// Build `http://{ip}:{port}/api/{endpoint}?{params}&_nocache={ms}`.
    async fn url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, Error> {
        let authority = self.endpoint.authority().await;
        let mut url = Url::parse(&format!("http://{authority}/api/{endpoint}"))?;
        {
            let mut query = url.query_pairs_mut();
            for (k, v) in params {
                query.append_pair(k, v);
            }
            query.append_pair("_nocache", &chrono::Utc::now().timestamp_millis().to_string());
        }
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────

    /// Send a GET and parse the body, mapping an `error` field to `Error::Device`.
    async fn get_json<T: DeserializeOwned>(&self, url: Url, path: &str) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(|e| self.map_send(e))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.map_send(e))?;
        trace!(%status, path, body = %body, "response");

        let json: Value = match serde_json::from_str(&body) {
            Ok(json) => json,
            Err(e) if status.is_success() => {
                let preview: String = body.chars().take(200).collect();
                return Err(Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                });
            }
            Err(_) => {
                return Err(Error::Status {
                    status: status.as_u16(),
                    path: path.to_owned(),
                });
            }
        };

        if let Some(err) = json.get("error").filter(|e| !e.is_null()) {
            let message = err
                .get("message")
                .and_then(Value::as_str)
                .map_or_else(|| err.to_string(), str::to_owned);
            return Err(Error::Device {
                path: path.to_owned(),
                message,
            });
        }

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                path: path.to_owned(),
            });
        }

        serde_json::from_value(json).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    fn map_send(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }
}
