use anyhow::{Context as AnyhowContext, Result};

pub(crate) const AUTH_TOKEN_ENV: &str = "WEARMATCH_AUTH_TOKEN";

/// Shared secret gating checkout. Wraps the raw string so handlers can only
/// compare against it, never read it back out.
#[derive(Clone, Debug)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn parse(raw: Option<&str>) -> Result<Option<Self>> {
        match raw.map(str::trim) {
            None => Ok(None),
            Some("") => anyhow::bail!("auth token must be non-empty"),
            Some(token) => Ok(Some(Self(token.to_string()))),
        }
    }

    /// Checks an Authorization header value. Only the bearer scheme counts;
    /// the comparison does not leak a length-based timing signal beyond
    /// token length itself.
    pub fn matches_http_authorization_header(&self, header_value: &str) -> bool {
        header_value
            .trim()
            .strip_prefix("Bearer ")
            .map(|raw| constant_time_eq(raw.trim().as_bytes(), self.0.as_bytes()))
            .unwrap_or(false)
    }
}

/// Refuses non-loopback binds unless the operator opted in with `--public`,
/// keeping a default-configured dev instance off the open network. With
/// `--public` the address is taken as-is and any resolution failure surfaces
/// from the actual bind.
pub(crate) async fn ensure_bind_allowed(bind: &str, public: bool) -> Result<()> {
    if public {
        return Ok(());
    }

    let addrs: Vec<_> = tokio::net::lookup_host(bind)
        .await
        .with_context(|| format!("Failed to resolve bind address: {bind}"))?
        .collect();
    if addrs.is_empty() {
        anyhow::bail!("Bind address resolved to zero socket addrs: {bind}")
    }

    if let Some(exposed) = addrs.into_iter().find(|addr| !addr.ip().is_loopback()) {
        anyhow::bail!(
            "Refusing to bind {bind}: {exposed} is not loopback. Pass --public and set WEARMATCH_AUTH_TOKEN (or --auth-token) to expose the server."
        )
    }
    Ok(())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_scheme_is_required_and_token_compared_exactly() {
        let token = AuthToken::parse(Some("wm-secret")).unwrap().unwrap();
        assert!(token.matches_http_authorization_header("Bearer wm-secret"));
        assert!(token.matches_http_authorization_header("  Bearer wm-secret  "));
        assert!(!token.matches_http_authorization_header("wm-secret"));
        assert!(!token.matches_http_authorization_header("Basic wm-secret"));
        assert!(!token.matches_http_authorization_header("Bearer wm-secre"));
        assert!(!token.matches_http_authorization_header("Bearer wm-secret2"));
    }

    #[test]
    fn token_parsing_trims_and_rejects_blanks() {
        let token = AuthToken::parse(Some("  wm-secret \n")).unwrap().unwrap();
        assert!(token.matches_http_authorization_header("Bearer wm-secret"));
        assert!(AuthToken::parse(Some("   ")).is_err());
        assert!(AuthToken::parse(None).unwrap().is_none());
    }

    #[tokio::test]
    async fn loopback_binds_never_need_the_public_flag() {
        ensure_bind_allowed("127.0.0.1:0", false).await.unwrap();
        ensure_bind_allowed("localhost:0", false).await.unwrap();
    }

    #[tokio::test]
    async fn wildcard_bind_needs_the_public_flag() {
        assert!(ensure_bind_allowed("0.0.0.0:8787", false).await.is_err());
        ensure_bind_allowed("0.0.0.0:8787", true).await.unwrap();
    }
}
