use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::{AuthError, FlagStore, HttpTransport, Navigate, TokenPayload, Transport};

const DEFAULT_BASE_URL: &str = "https://id.authbridge.dev";

const SESSION_HINT_KEY: &str = "known_user";

type Hook = Arc<dyn Fn() + Send + Sync>;
type TokenHook = Arc<dyn Fn(&str) + Send + Sync>;
type ErrorHook = Arc<dyn Fn(&AuthError) + Send + Sync>;
type ParamsProvider = Arc<dyn Fn() -> Vec<(String, String)> + Send + Sync>;

#[derive(Clone, Default)]
pub struct AuthConfig {
    base_url: Option<String>,
    timeout: Option<Duration>,
    on_login_success: Option<Hook>,
    on_login_required: Option<Hook>,
    on_logout: Option<Hook>,
    on_token_refresh: Option<TokenHook>,
    on_error: Option<ErrorHook>,
    additional_auth_params: Option<ParamsProvider>,
}

impl AuthConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn on_login_success(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_login_success = Some(Arc::new(hook));
        self
    }

    pub fn on_login_required(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_login_required = Some(Arc::new(hook));
        self
    }

    pub fn on_logout(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_logout = Some(Arc::new(hook));
        self
    }

    pub fn on_token_refresh(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_token_refresh = Some(Arc::new(hook));
        self
    }

    pub fn on_error(mut self, hook: impl Fn(&AuthError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(hook));
        self
    }

    pub fn with_additional_auth_params(
        mut self,
        provider: impl Fn() -> Vec<(String, String)> + Send + Sync + 'static,
    ) -> Self {
        self.additional_auth_params = Some(Arc::new(provider));
        self
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("on_login_success", &self.on_login_success.is_some())
            .field("on_login_required", &self.on_login_required.is_some())
            .field("on_logout", &self.on_logout.is_some())
            .field("on_token_refresh", &self.on_token_refresh.is_some())
            .field("on_error", &self.on_error.is_some())
            .field(
                "additional_auth_params",
                &self.additional_auth_params.is_some(),
            )
            .finish()
    }
}

pub struct AuthClient<T: Transport = HttpTransport> {
    config: AuthConfig,
    base_url: String,
    transport: T,
    navigator: Arc<dyn Navigate>,
    flags: Arc<dyn FlagStore>,
    access_token: Mutex<Option<String>>,
}

impl AuthClient<HttpTransport> {
    pub fn new(
        config: AuthConfig,
        navigator: Arc<dyn Navigate>,
        flags: Arc<dyn FlagStore>,
    ) -> Result<Self, AuthError> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, transport, navigator, flags))
    }
}

impl<T: Transport> AuthClient<T> {
    pub fn with_transport(
        config: AuthConfig,
        transport: T,
        navigator: Arc<dyn Navigate>,
        flags: Arc<dyn FlagStore>,
    ) -> Self {
        let base_url = config
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        Self {
            config,
            base_url,
            transport,
            navigator,
            flags,
            access_token: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn access_token(&self) -> Option<String> {
        self.access_token.lock().unwrap().clone()
    }

    pub fn has_logged_in_before(&self) -> bool {
        self.flags.get(SESSION_HINT_KEY)
    }

    pub async fn refresh(&self) -> Result<(), AuthError> {
        match self.request_token().await {
            Ok(Some(token)) => {
                *self.access_token.lock().unwrap() = Some(token.clone());
                self.flags.set(SESSION_HINT_KEY);
                debug!("refresh succeeded");
                if let Some(hook) = &self.config.on_token_refresh {
                    hook(&token);
                }
                Ok(())
            }
            Ok(None) => {
                self.clear_token();
                debug!("refresh found no session");
                Ok(())
            }
            Err(err) => {
                self.clear_token();
                warn!(%err, "refresh failed");
                Err(err)
            }
        }
    }

    async fn request_token(&self) -> Result<Option<String>, AuthError> {
        let url = self.refresh_url()?;
        let response = self.transport.post(&url).await?;

        if response.status == 401 {
            return Ok(None);
        }
        if !response.is_success() {
            return Err(AuthError::Status {
                status: response.status,
                text: response.status_text,
            });
        }

        let payload: TokenPayload =
            serde_json::from_str(&response.body).map_err(|err| AuthError::InvalidResponse {
                message: err.to_string(),
                body: response.body,
            })?;
        Ok(Some(payload.access_token))
    }

    pub async fn init(&self) {
        if let Err(err) = self.refresh().await {
            match &self.config.on_error {
                Some(hook) => hook(&err),
                None => warn!(%err, "init: refresh failed and no error hook is configured"),
            }
            return;
        }

        if self.access_token().is_some() {
            if let Some(hook) = &self.config.on_login_success {
                hook();
            }
        } else if let Some(hook) = &self.config.on_login_required {
            hook();
        }
    }

    pub fn login(&self) -> Result<(), AuthError> {
        let mut url = Url::parse(&format!("{}/auth/login", self.base_url))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("returnUrl", &self.navigator.current_url());
            for (key, value) in self.additional_params() {
                pairs.append_pair(&key, &value);
            }
        }
        debug!(%url, "redirecting to login");
        self.navigator.assign(url.as_str());
        Ok(())
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        if let Some(hook) = &self.config.on_logout {
            hook();
        }
        let url = Url::parse(&format!("{}/auth/logout", self.base_url))?;
        debug!(%url, "redirecting to logout");
        self.navigator.assign(url.as_str());
        // no page unload here to drop process memory
        self.clear_token();
        Ok(())
    }

    fn refresh_url(&self) -> Result<String, AuthError> {
        let mut url = Url::parse(&format!("{}/auth/refresh", self.base_url))?;
        let extra = self.additional_params();
        // empty mapping must leave no trailing `?`
        if !extra.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &extra {
                pairs.append_pair(key, value);
            }
        }
        Ok(url.into())
    }

    fn additional_params(&self) -> Vec<(String, String)> {
        match &self.config.additional_auth_params {
            Some(provider) => provider(),
            None => Vec::new(),
        }
    }

    fn clear_token(&self) {
        *self.access_token.lock().unwrap() = None;
    }
}

impl<T: Transport + fmt::Debug> fmt::Debug for AuthClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthClient")
            .field("config", &self.config)
            .field("base_url", &self.base_url)
            .field("transport", &self.transport)
            .field("has_token", &self.access_token.lock().unwrap().is_some())
            .finish()
    }
}
