//! Robots.txt handling module
//!
//! Parses robots.txt bodies and evaluates AI bot access for the robots
//! pillar. Fetching lives in the probe layer; everything here is pure.

mod parser;

pub use parser::ParsedRobots;

use crate::report::RobotsReport;

/// AI crawlers evaluated when the caller supplies no bot list
pub const DEFAULT_AI_BOTS: &[&str] = &[
    "GPTBot",
    "ChatGPT-User",
    "Google-Extended",
    "ClaudeBot",
    "PerplexityBot",
    "Amazonbot",
    "OAI-SearchBot",
    "DeepSeek-AI",
    "Grok",
    "Meta-ExternalAgent",
    "cohere-ai",
    "AI2Bot",
    "ByteSpider",
];

/// Returns the default bot list as owned strings
pub fn default_bots() -> Vec<String> {
    DEFAULT_AI_BOTS.iter().map(|b| b.to_string()).collect()
}

/// Builds an unscored robots report from a fetched robots.txt body
///
/// # Arguments
///
/// * `body` - The robots.txt body, or `None` if it was not found
/// * `bots` - Bot user agents to evaluate
/// * `origin` - Site origin (`scheme://host[:port]`) the bots are checked against
pub fn build_robots_report(body: Option<&str>, bots: &[String], origin: &str) -> RobotsReport {
    let Some(body) = body else {
        return RobotsReport::with_detail("robots.txt not found");
    };

    let robots = ParsedRobots::from_content(body);
    let bots = robots.evaluate_bots(bots, &format!("{}/", origin.trim_end_matches('/')));
    let allowed = bots.iter().filter(|b| b.allowed).count();
    let detail = format!("{}/{} AI bots allowed", allowed, bots.len());

    RobotsReport {
        found: true,
        bots,
        score: 0.0,
        detail,
    }
}
