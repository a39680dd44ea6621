use crate::{ActivityError, MAX_REPO_PAGE_SIZE};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_CONTRIBUTIONS_URL: &str = "https://github-contributions-api.jogruber.de";

#[derive(Clone, Debug)]
pub struct Config {
    pub identity: String,
    pub api_base_url: String,
    pub contributions_base_url: String,
    pub repo_page_size: u32,
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ActivityError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function instead of the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, ActivityError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let identity = get("PORTFOLIO_GITHUB_IDENTITY")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ActivityError::Config("PORTFOLIO_GITHUB_IDENTITY missing".into()))?;
        let api_base_url = get("PORTFOLIO_GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into());
        let contributions_base_url = get("PORTFOLIO_CONTRIBUTIONS_API_URL")
            .unwrap_or_else(|| DEFAULT_CONTRIBUTIONS_URL.into());
        let repo_page_size = match get("PORTFOLIO_REPO_PAGE_SIZE") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|e| {
                    ActivityError::Config(format!("PORTFOLIO_REPO_PAGE_SIZE {raw:?}: {e}"))
                })?
                .clamp(1, MAX_REPO_PAGE_SIZE),
            None => MAX_REPO_PAGE_SIZE,
        };
        let user_agent = get("PORTFOLIO_USER_AGENT")
            .unwrap_or_else(|| format!("portfolio-activity/{}", env!("CARGO_PKG_VERSION")));
        Ok(Self {
            identity,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            contributions_base_url: contributions_base_url.trim_end_matches('/').to_string(),
            repo_page_size,
            user_agent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_missing_identity() {
        let get = |k: &str| match k {
            "PORTFOLIO_GITHUB_API_URL" => Some("http://localhost".into()),
            _ => None,
        };
        assert!(Config::from_env_with(get).is_err());
    }

    #[test]
    fn from_env_blank_identity_is_rejected() {
        let get = |k: &str| match k {
            "PORTFOLIO_GITHUB_IDENTITY" => Some("   ".into()),
            _ => None,
        };
        assert!(Config::from_env_with(get).is_err());
    }

    #[test]
    fn from_env_applies_defaults() {
        let get = |k: &str| match k {
            "PORTFOLIO_GITHUB_IDENTITY" => Some("octocat".into()),
            _ => None,
        };
        let cfg = Config::from_env_with(get).expect("cfg");
        assert_eq!(cfg.identity, "octocat");
        assert_eq!(cfg.api_base_url, DEFAULT_API_URL);
        assert_eq!(cfg.contributions_base_url, DEFAULT_CONTRIBUTIONS_URL);
        assert_eq!(cfg.repo_page_size, 200);
        assert!(cfg.user_agent.starts_with("portfolio-activity/"));
    }

    #[test]
    fn from_env_reads_values() {
        let get = |k: &str| match k {
            "PORTFOLIO_GITHUB_IDENTITY" => Some("octocat".into()),
            "PORTFOLIO_GITHUB_API_URL" => Some("http://localhost:9000/".into()),
            "PORTFOLIO_CONTRIBUTIONS_API_URL" => Some("http://localhost:9001".into()),
            "PORTFOLIO_REPO_PAGE_SIZE" => Some("50".into()),
            "PORTFOLIO_USER_AGENT" => Some("site/1".into()),
            _ => None,
        };
        let cfg = Config::from_env_with(get).expect("cfg");
        assert_eq!(cfg.api_base_url, "http://localhost:9000");
        assert_eq!(cfg.contributions_base_url, "http://localhost:9001");
        assert_eq!(cfg.repo_page_size, 50);
        assert_eq!(cfg.user_agent, "site/1");
    }

    #[test]
    fn page_size_is_clamped() {
        let cfg = Config::from_env_with(|k| match k {
            "PORTFOLIO_GITHUB_IDENTITY" => Some("octocat".into()),
            "PORTFOLIO_REPO_PAGE_SIZE" => Some("5000".into()),
            _ => None,
        })
        .expect("cfg");
        assert_eq!(cfg.repo_page_size, MAX_REPO_PAGE_SIZE);

        let cfg = Config::from_env_with(|k| match k {
            "PORTFOLIO_GITHUB_IDENTITY" => Some("octocat".into()),
            "PORTFOLIO_REPO_PAGE_SIZE" => Some("0".into()),
            _ => None,
        })
        .expect("cfg");
        assert_eq!(cfg.repo_page_size, 1);
    }

    #[test]
    fn page_size_must_be_numeric() {
        let res = Config::from_env_with(|k| match k {
            "PORTFOLIO_GITHUB_IDENTITY" => Some("octocat".into()),
            "PORTFOLIO_REPO_PAGE_SIZE" => Some("lots".into()),
            _ => None,
        });
        assert!(matches!(res, Err(ActivityError::Config(_))));
    }
}
