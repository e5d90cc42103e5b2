//! Curated learning links per skill.
//!
//! Every skill gets the same six search links (two each for videos, articles and
//! guides) built from its trimmed name. Skills whose name mentions a known
//! family also get family-specific guides appended.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters a URL query component may carry unescaped.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_COMPONENT).to_string()
}

/// One link in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceItem {
    pub title: String,
    pub url: String,
    pub source: &'static str,
}

impl ResourceItem {
    fn new(title: impl Into<String>, url: impl Into<String>, source: &'static str) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            source,
        }
    }
}

/// Links for one skill, grouped the way they are displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLinks {
    pub videos: Vec<ResourceItem>,
    pub articles: Vec<ResourceItem>,
    pub guides: Vec<ResourceItem>,
}

impl ResourceLinks {
    /// Every link, videos first.
    pub fn iter(&self) -> impl Iterator<Item = &ResourceItem> {
        self.videos.iter().chain(&self.articles).chain(&self.guides)
    }
}

fn mentions_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

fn family_extras(skill: &str) -> Vec<ResourceItem> {
    let lower = skill.to_lowercase();
    let mut extras = Vec::new();

    if mentions_any(&lower, &["web", "frontend", "javascript", "html", "css", "ui"]) {
        extras.push(ResourceItem::new(
            "MDN Web Docs • Learn web development",
            "https://developer.mozilla.org/en-US/docs/Learn",
            "MDN",
        ));
    }
    if mentions_any(&lower, &["seo", "digital", "marketing", "social"]) {
        extras.push(ResourceItem::new(
            "Google • SEO Starter Guide",
            "https://developers.google.com/search/docs/fundamentals/seo-starter-guide",
            "Google",
        ));
        extras.push(ResourceItem::new(
            "HubSpot Academy • Digital marketing",
            format!("https://academy.hubspot.com/courses?query={}", encode(skill)),
            "HubSpot",
        ));
    }
    if mentions_any(&lower, &["graphic", "design", "ui", "ux", "figma"]) {
        extras.push(ResourceItem::new(
            "Figma • Get started",
            "https://help.figma.com/hc/en-us/sections/360002034613-Get-started",
            "Figma",
        ));
        extras.push(ResourceItem::new(
            "Canva Design School • Basics",
            "https://www.canva.com/learn/design/",
            "Canva",
        ));
    }
    if lower.contains("typing") {
        extras.push(ResourceItem::new(
            "Typing.com • Lessons",
            "https://www.typing.com/student/lessons",
            "Typing.com",
        ));
    }
    if mentions_any(&lower, &["accounting", "finance"]) {
        extras.push(ResourceItem::new(
            "Khan Academy • Accounting and financial statements",
            "https://www.khanacademy.org/economics-finance-domain/core-finance/accounting-and-financial-statements",
            "Khan Academy",
        ));
    }
    if lower.contains("project") {
        extras.push(ResourceItem::new(
            "Atlassian • Agile and project management guides",
            "https://www.atlassian.com/agile",
            "Atlassian",
        ));
    }
    if mentions_any(&lower, &["customer support", "customer-service", "support"]) {
        extras.push(ResourceItem::new(
            "Zendesk • Customer service training",
            "https://www.zendesk.com/learn/customer-service-training/",
            "Zendesk",
        ));
    }
    extras
}

/// Builds the link catalog for `skill`.
///
/// # Examples
///
/// ```rust
/// use inclusive_board::resources::resource_links;
///
/// let links = resource_links("Web Development");
/// assert_eq!(
///     links.videos[0].url,
///     "https://www.youtube.com/results?search_query=beginner%20Web%20Development%20tutorial"
/// );
/// assert!(links.guides.iter().any(|g| g.source == "MDN"));
/// ```
#[must_use]
pub fn resource_links(skill: &str) -> ResourceLinks {
    let q = skill.trim();

    let videos = vec![
        ResourceItem::new(
            format!("YouTube • {q} for beginners"),
            format!(
                "https://www.youtube.com/results?search_query={}",
                encode(&format!("beginner {q} tutorial"))
            ),
            "YouTube",
        ),
        ResourceItem::new(
            format!("YouTube • {q} crash course"),
            format!(
                "https://www.youtube.com/results?search_query={}",
                encode(&format!("{q} crash course"))
            ),
            "YouTube",
        ),
    ];

    let articles = vec![
        ResourceItem::new(
            format!("freeCodeCamp • {q} for beginners"),
            format!(
                "https://www.google.com/search?q={}",
                encode(&format!("site:freecodecamp.org beginner {q}"))
            ),
            "freeCodeCamp",
        ),
        ResourceItem::new(
            format!("GCFGlobal • Intro to {q}"),
            format!("https://edu.gcfglobal.org/en/search/?q={}", encode(q)),
            "GCFGlobal",
        ),
    ];

    let mut guides = vec![
        ResourceItem::new(
            format!("free courses • {q} (Coursera search)"),
            format!("https://www.coursera.org/search?query={}", encode(&format!("{q} beginner"))),
            "Coursera",
        ),
        ResourceItem::new(
            format!("Khan Academy • {q} (search)"),
            format!("https://www.khanacademy.org/search?page_search_query={}", encode(q)),
            "Khan Academy",
        ),
    ];
    guides.extend(family_extras(q));

    ResourceLinks {
        videos,
        articles,
        guides,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_matches_uri_component_rules() {
        assert_eq!(encode("site:freecodecamp.org a&b"), "site%3Afreecodecamp.org%20a%26b");
        assert_eq!(encode("it's (fun)!"), "it's%20(fun)!");
    }

    #[test]
    fn test_generic_links_for_unknown_skill() {
        let links = resource_links("  Pottery ");
        assert_eq!(links.videos.len(), 2);
        assert_eq!(links.articles.len(), 2);
        assert_eq!(links.guides.len(), 2);
        assert_eq!(links.articles[1].title, "GCFGlobal • Intro to Pottery");
        assert_eq!(links.articles[1].url, "https://edu.gcfglobal.org/en/search/?q=Pottery");
    }

    #[test]
    fn test_family_extras_appended_to_guides() {
        let links = resource_links("Customer Support");
        assert_eq!(links.guides.last().map(|g| g.source), Some("Zendesk"));

        let links = resource_links("Digital Marketing");
        let sources: Vec<&str> = links.guides.iter().map(|g| g.source).collect();
        assert_eq!(sources, vec!["Coursera", "Khan Academy", "Google", "HubSpot"]);
        assert!(links.guides[3].url.ends_with("query=Digital%20Marketing"));
    }

    #[test]
    fn test_iter_covers_all_groups() {
        assert_eq!(resource_links("Typing").iter().count(), 7);
    }
}
