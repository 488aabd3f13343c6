use crate::{InferConfig, InferError, PredictionSet, wire};
use lookout_base::PixelGrid;
use url::Url;

/// HTTP client for the remote detection endpoint.
///
/// Holds one connection-pooling agent for the process lifetime; connect and
/// read timeouts come from `InferConfig` so a stalled server cannot pin an
/// in-flight slot indefinitely.
#[derive(Clone, Debug)]
pub struct InferenceClient {
    agent: ureq::Agent,
    predict_url: String,
    config: InferConfig,
}

impl InferenceClient {
    /// Create a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns `InferError::Config` if the endpoint is not a valid http(s)
    /// URL.
    pub fn new(config: InferConfig) -> Result<Self, InferError> {
        let url = Url::parse(config.endpoint())?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(InferError::Config(format!(
                    "unsupported endpoint scheme '{other}'; expected http(s)"
                )));
            }
        }

        let predict_url = format!("{}/predict", config.endpoint().trim_end_matches('/'));

        let agent = ureq::AgentBuilder::new()
            .timeout_connect(config.connect_timeout())
            .timeout_read(config.read_timeout())
            .build();

        Ok(Self {
            agent,
            predict_url,
            config,
        })
    }

    /// Run one inference round trip for a decoded frame.
    ///
    /// The grid is serialized and posted from the blocking thread pool, so
    /// the calling task keeps processing frames while the request is in
    /// flight.
    ///
    /// # Errors
    ///
    /// Returns `InferError::Network` on connect/timeout/transport failure,
    /// `InferError::Server` on a non-2xx status, `InferError::Parse` if the
    /// body is not a well-formed prediction document, and
    /// `InferError::Runtime` if the blocking task cannot complete.
    pub async fn infer(&self, grid: PixelGrid) -> Result<PredictionSet, InferError> {
        let agent = self.agent.clone();
        let url = self.predict_url.clone();

        tokio::task::spawn_blocking(move || infer_blocking(&agent, &url, &grid))
            .await
            .map_err(|e| InferError::Runtime(format!("request task failed: {e}")))?
    }

    pub fn config(&self) -> &InferConfig {
        &self.config
    }

    /// Full URL the client posts frames to.
    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }
}

fn infer_blocking(
    agent: &ureq::Agent,
    url: &str,
    grid: &PixelGrid,
) -> Result<PredictionSet, InferError> {
    let body = wire::serialize_grid(grid)?;

    let response = match agent
        .post(url)
        .set("Content-Type", "application/json; charset=utf-8")
        .send_string(&body)
    {
        Ok(response) => response,
        Err(ureq::Error::Status(status, _)) => return Err(InferError::Server { status }),
        Err(ureq::Error::Transport(transport)) => {
            return Err(InferError::Network(transport.to_string()));
        }
    };

    let text = response
        .into_string()
        .map_err(|e| InferError::Network(e.to_string()))?;

    let set = wire::parse_response(&text)?;
    log::debug!("{} predictions from {url}", set.len());
    Ok(set)
}
