//! Robots.txt parser implementation
//!
//! Matching is delegated to the robotstxt crate; sitemap and license
//! directives are read line by line.

use crate::report::BotAccess;
use robotstxt::DefaultMatcher;

/// Parsed robots.txt data
#[derive(Debug, Clone, Default)]
pub struct ParsedRobots {
    /// Raw robots.txt content (empty string means allow all)
    content: String,
}

impl ParsedRobots {
    /// Creates a new ParsedRobots from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    /// Returns the raw robots.txt content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL to check
    /// * `user_agent` - The user agent token
    ///
    /// # Returns
    ///
    /// * `true` - If the URL is allowed
    /// * `false` - If the URL is disallowed
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.content.trim().is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }

    /// Evaluates each bot's access to one URL, usually the site root
    pub fn evaluate_bots(&self, bots: &[String], url: &str) -> Vec<BotAccess> {
        bots.iter()
            .map(|bot| {
                let allowed = self.is_allowed(url, bot);
                BotAccess {
                    bot: bot.clone(),
                    allowed,
                    detail: if allowed {
                        "Allowed".to_string()
                    } else {
                        "Blocked by robots.txt".to_string()
                    },
                }
            })
            .collect()
    }

    /// Returns the values of every `Sitemap:` directive, in order
    pub fn sitemaps(&self) -> Vec<String> {
        self.directive_values("sitemap")
    }

    /// Returns the first `License:` directive (Really Simple Licensing)
    pub fn license(&self) -> Option<String> {
        self.directive_values("license").into_iter().next()
    }

    fn directive_values(&self, name: &str) -> Vec<String> {
        self.content
            .lines()
            .map(|line| line.split('#').next().unwrap_or("").trim())
            .filter_map(|line| line.split_once(':'))
            .filter(|(key, _)| key.trim().eq_ignore_ascii_case(name))
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "https://example.com/";

    #[test]
    fn test_parse_disallow_all() {
        let robots = ParsedRobots::from_content("User-agent: *\nDisallow: /");
        assert!(!robots.is_allowed(ROOT, "GPTBot"));
        assert!(!robots.is_allowed("https://example.com/page", "GPTBot"));
    }

    #[test]
    fn test_parse_disallow_specific_path() {
        let robots = ParsedRobots::from_content("User-agent: *\nDisallow: /admin");
        assert!(robots.is_allowed(ROOT, "GPTBot"));
        assert!(!robots.is_allowed("https://example.com/admin/users", "GPTBot"));
    }

    #[test]
    fn test_parse_specific_user_agent() {
        let robots =
            ParsedRobots::from_content("User-agent: ClaudeBot\nDisallow: /\n\nUser-agent: *\nAllow: /");
        assert!(robots.is_allowed(ROOT, "GPTBot"));
        assert!(!robots.is_allowed(ROOT, "ClaudeBot"));
    }

    #[test]
    fn test_empty_and_invalid_allow_all() {
        assert!(ParsedRobots::from_content("").is_allowed(ROOT, "GPTBot"));
        assert!(ParsedRobots::from_content("not robots {{{").is_allowed(ROOT, "GPTBot"));
    }

    #[test]
    fn test_evaluate_bots_keeps_order() {
        let robots = ParsedRobots::from_content("User-agent: Grok\nDisallow: /");
        let bots = vec!["GPTBot".to_string(), "Grok".to_string()];
        let result = robots.evaluate_bots(&bots, ROOT);

        assert_eq!(result[0].bot, "GPTBot");
        assert_eq!(result[0].detail, "Allowed");
        assert_eq!(result[1].bot, "Grok");
        assert!(!result[1].allowed);
        assert_eq!(result[1].detail, "Blocked by robots.txt");
    }

    #[test]
    fn test_sitemaps() {
        let robots = ParsedRobots::from_content(
            "User-agent: *\nAllow: /\nSitemap: https://example.com/sitemap.xml\nsitemap: https://example.com/news.xml # news\n",
        );
        assert_eq!(
            robots.sitemaps(),
            vec![
                "https://example.com/sitemap.xml".to_string(),
                "https://example.com/news.xml".to_string()
            ]
        );
    }

    #[test]
    fn test_license_directive() {
        let robots = ParsedRobots::from_content("License: https://example.com/license.xml\nUser-agent: *");
        assert_eq!(
            robots.license(),
            Some("https://example.com/license.xml".to_string())
        );
        assert_eq!(ParsedRobots::from_content("User-agent: *").license(), None);
    }
}
