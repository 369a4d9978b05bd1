//! The boundary the presentation layer talks through.
//!
//! `LocalGateway` runs the credential check and the analysis in-process;
//! `HttpGateway` calls a running server. Both report analysis failures as
//! feedback rather than errors.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use study_core::analysis::AnalysisRequest;
use study_core::model::AnalysisResult;
use tracing::warn;
use url::Url;

use crate::analysis_service::AnalysisService;
use crate::auth_service::CredentialCheck;
use crate::error::GatewayError;

#[async_trait]
pub trait StudyGateway: Send + Sync {
    /// Check the shared password.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` when the check could not be performed at all.
    async fn login(&self, password: &str) -> Result<bool, GatewayError>;

    /// Request feedback. Every failure is folded into the returned result.
    async fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult;
}

#[derive(Clone)]
pub struct LocalGateway {
    credentials: CredentialCheck,
    analysis: Arc<AnalysisService>,
}

impl LocalGateway {
    #[must_use]
    pub fn new(credentials: CredentialCheck, analysis: Arc<AnalysisService>) -> Self {
        Self {
            credentials,
            analysis,
        }
    }
}

#[async_trait]
impl StudyGateway for LocalGateway {
    async fn login(&self, password: &str) -> Result<bool, GatewayError> {
        Ok(self.credentials.verify(password))
    }

    async fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult {
        match self.analysis.analyze(request).await {
            Ok(result) => result,
            Err(err) => err.to_feedback(),
        }
    }
}

#[derive(Serialize)]
struct LoginBody<'a> {
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginReply {
    #[serde(default)]
    success: bool,
}

#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    auth_url: Url,
    analyze_url: Url,
}

impl HttpGateway {
    /// Gateway for a server rooted at `base_url`, e.g. `http://127.0.0.1:3000`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::InvalidUrl` if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            client: Client::new(),
            auth_url: base.join("auth")?,
            analyze_url: base.join("analyze")?,
        })
    }

    #[must_use]
    pub fn analyze_url(&self) -> &Url {
        &self.analyze_url
    }
}

#[async_trait]
impl StudyGateway for HttpGateway {
    async fn login(&self, password: &str) -> Result<bool, GatewayError> {
        // A rejection arrives as 401 with a JSON body; only the body decides.
        let reply: LoginReply = self
            .client
            .post(self.auth_url.clone())
            .json(&LoginBody { password })
            .send()
            .await?
            .json()
            .await?;
        Ok(reply.success)
    }

    async fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult {
        let response = match self
            .client
            .post(self.analyze_url.clone())
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "analysis request failed");
                return AnalysisResult::failure(err.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "analysis request rejected");
            return AnalysisResult::failure(format!("HTTP error! status: {}", status.as_u16()));
        }

        match response.json::<AnalysisResult>().await {
            Ok(result) => result,
            Err(err) => AnalysisResult::failure(err.to_string()),
        }
    }
}
