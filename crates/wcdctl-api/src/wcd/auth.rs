// WCD session management
//
// Login is a GET on `System.xml?action=login`; the token comes back in the
// `sessionID` response header and is sent on every later request.

use secrecy::ExposeSecret;
use tracing::debug;

use crate::auth::{Credentials, SESSION_HEADER, SessionToken};
use crate::endpoints;
use crate::error::Error;
use crate::protocol::classify_body;
use crate::wcd::client::WcdClient;

impl WcdClient {
    /// Authenticate and store the issued session token.
    ///
    /// Any HTTP status other than 200 is fatal, as is a 200 without a
    /// `sessionID` header. If the body is a status envelope reporting an
    /// error, the device's `statusString` is surfaced.
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionToken, Error> {
        let url = endpoints::login_url(
            self.base_url(),
            &credentials.username,
            credentials.password.expose_secret(),
        )?;

        debug!(username = %credentials.username, "logging in at {}", self.base_url());

        let resp = self.http().get(url).send().await?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url: format!("{}System.xml?action=login", self.base_url()),
            });
        }

        let token = resp
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(SessionToken::new);

        let body = resp.text().await?;
        if let (_, Some(response)) = classify_body(&body) {
            response.action_status().ensure_success()?;
        }

        let token = token.ok_or(Error::MissingSessionId)?;
        self.set_session(token.clone());
        debug!("login successful");
        Ok(token)
    }

    /// End the current session and forget the token.
    pub async fn logout(&self) -> Result<(), Error> {
        let token = self.require_session()?;
        let url = endpoints::logout_url(self.base_url())?;
        debug!("logging out at {}", url);

        let _resp = self
            .http()
            .get(url)
            .header(SESSION_HEADER, token.as_str())
            .send()
            .await?;

        self.clear_session();
        debug!("logout complete");
        Ok(())
    }

    /// Touch the idle-session keep-alive resource.
    ///
    /// The answer is not a status envelope; a 200 is all that counts.
    pub async fn keep_alive(&self) -> Result<(), Error> {
        let token = self.require_session()?;
        let url = endpoints::keep_alive_url(self.base_url())?;
        debug!("session keep-alive");

        let resp = self
            .http()
            .get(url.clone())
            .header(SESSION_HEADER, token.as_str())
            .send()
            .await?;

        if resp.status() != reqwest::StatusCode::OK {
            return Err(Error::HttpStatus {
                status: resp.status().as_u16(),
                url: url.to_string(),
            });
        }
        Ok(())
    }

    /// Drop the current token and log in again.
    ///
    /// Used when the device answers `AuthenticationError` mid-run.
    pub async fn relogin(&self, credentials: &Credentials) -> Result<SessionToken, Error> {
        self.clear_session();
        self.login(credentials).await
    }
}

