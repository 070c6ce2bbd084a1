use crate::config::Config;
use crate::constants::OAUTH_SCOPES;
use crate::error::AppError;
use url::Url;

/// Builds the consent dialog URL: fixed scope list, the configured redirect
/// target and a forced re-consent.
pub fn authorization_url(config: &Config) -> Result<Url, AppError> {
    let client_id = config.credentials.require_client_id()?;
    let redirect_uri = config.credentials.require_redirect_uri()?;
    let scope = OAUTH_SCOPES.join(",");

    Url::parse_with_params(
        &config.oauth.dialog_url,
        &[
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("scope", scope.as_str()),
            ("response_type", "code"),
            ("force_reauth", "true"),
        ],
    )
    .map_err(|e| {
        AppError::Configuration(format!(
            "invalid oauth dialog url {}: {e}",
            config.oauth.dialog_url
        ))
    })
}

/// Pulls the one-time `code` out of the provider's redirect.
pub fn extract_authorization_code(redirect_url: &str) -> Result<String, AppError> {
    let url = Url::parse(redirect_url)
        .map_err(|e| AppError::InvalidInput(format!("invalid redirect url: {e}")))?;

    let mut code = None;
    let mut error = None;
    let mut description = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            "error_description" => description = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Err(AppError::AuthExchange(match description {
            Some(d) => format!("authorization denied: {error}: {d}"),
            None => format!("authorization denied: {error}"),
        }));
    }

    code.filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::AuthExchange("redirect carries no authorization code".to_string()))
}
