// Credential provisioning
// Credentials come from the environment, never from code or config structs

use sync_domain::entities::Credentials;
use sync_domain::ports::CredentialsProvider;

pub struct EnvCredentialsProvider;

impl EnvCredentialsProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnvCredentialsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialsProvider for EnvCredentialsProvider {
    fn credentials(&self) -> anyhow::Result<Credentials> {
        if let Ok(combined) = std::env::var("CALENDAR_CREDENTIALS") {
            return parse_credentials(&combined);
        }
        let email = std::env::var("CALENDAR_EMAIL")
            .map_err(|_| anyhow::anyhow!("CALENDAR_CREDENTIALS or CALENDAR_EMAIL required"))?;
        let password = std::env::var("CALENDAR_PASSWORD")
            .map_err(|_| anyhow::anyhow!("CALENDAR_PASSWORD required"))?;
        Ok(Credentials { email, password })
    }
}

/// `email:password`; the password may itself contain colons.
fn parse_credentials(combined: &str) -> anyhow::Result<Credentials> {
    let (email, password) = combined
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("CALENDAR_CREDENTIALS must be email:password"))?;
    if email.trim().is_empty() || password.is_empty() {
        anyhow::bail!("CALENDAR_CREDENTIALS must be email:password");
    }
    Ok(Credentials {
        email: email.trim().to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_colon_only() {
        let creds = parse_credentials("booker@example.org:pass:with:colons").unwrap();
        assert_eq!(creds.email, "booker@example.org");
        assert_eq!(creds.password, "pass:with:colons");
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(parse_credentials("no-colon").is_err());
        assert!(parse_credentials(":password").is_err());
        assert!(parse_credentials("email:").is_err());
    }
}
