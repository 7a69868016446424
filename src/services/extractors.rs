use itertools::Itertools;
use regex::Regex;
use scraper::{Html, Selector};

use crate::domain::company::Sentiment;

const SOCIAL_PLATFORMS: [&str; 5] = ["linkedin", "facebook", "twitter", "instagram", "youtube"];

// Tag to pattern, matched against lowercased script urls and body text.
const TECH_PATTERNS: [(&str, &str); 8] = [
    ("react", r"react|cdn\.react"),
    ("angular", r"angular|cdn\.angular"),
    ("vue", r"vue\.js"),
    ("jquery", r"jquery"),
    ("bootstrap", r"bootstrap"),
    ("wordpress", r"wp-content|wordpress"),
    ("nextjs", r"next\.js"),
    ("tailwind", r"tailwind"),
];

const SERVICE_KEYWORDS: [&str; 13] = [
    "consulting",
    "development",
    "design",
    "marketing",
    "cloud",
    "security",
    "data",
    "analytics",
    "AI",
    "healthcare",
    "fintech",
    "e-commerce",
    "blockchain",
];

// An industry counts as soon as any one of its keywords shows up.
const INDUSTRY_KEYWORDS: [(&str, &[&str]); 8] = [
    ("healthcare", &["healthcare", "hospital", "telemedicine", "patient"]),
    ("fintech", &["fintech", "banking", "financial", "payment"]),
    ("education", &["education", "learning", "school", "student"]),
    ("retail", &["retail", "ecommerce", "store", "shop"]),
    ("logistics", &["logistics", "shipping", "supply chain"]),
    ("realEstate", &["real estate", "property", "housing"]),
    ("travel", &["travel", "booking", "hotel", "trip"]),
    ("saas", &["saas", "cloud software", "subscription"]),
];

const TEAM_ROLES: [&str; 8] = [
    "CEO",
    "Founder",
    "CTO",
    "COO",
    "CMO",
    "Managing Director",
    "Head of Product",
    "Leadership",
];

const TRUST_PHRASES: [&str; 9] = [
    "trusted by",
    "case study",
    "customer success",
    "our clients",
    "testimonial",
    "partnered with",
    "featured in",
    "awards",
    "press",
];

pub fn extract_email(text: &str) -> Option<String> {
    let email_re = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-z]{2,}").unwrap();
    email_re.find(text).map(|m| m.as_str().to_string())
}

// Loose on purpose: partial or ambiguous numbers are kept rather than
// dropped, recall beats precision here.
pub fn extract_phone(text: &str) -> Option<String> {
    let phone_re =
        Regex::new(r"(\+?\d{1,3}[-.\s]?)?\(?\d{2,4}\)?[-.\s]?\d{3,4}[-.\s]?\d{3,4}").unwrap();
    phone_re.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_address(text: &str) -> Option<String> {
    let address_re = Regex::new(r"(?i)(?:address|location|headquarters)[:\-–\s]*(.+)").unwrap();
    address_re
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|segment| segment.as_str().trim().to_string())
}

pub fn extract_tagline(document: &Html) -> Option<String> {
    let meta_selector = Selector::parse(r#"meta[name="description"]"#).unwrap();
    let title_selector = Selector::parse("title").unwrap();

    let meta_description = document
        .select(&meta_selector)
        .next()
        .and_then(|tag| tag.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty());

    meta_description.or_else(|| {
        document
            .select(&title_selector)
            .next()
            .map(|tag| tag.text().collect::<String>().trim().to_string())
            .filter(|title| !title.is_empty())
    })
}

pub fn extract_founded_year(text: &str) -> Option<i32> {
    let year_re = Regex::new(r"(?i)(?:founded|established|since)\s+(\d{4})").unwrap();
    year_re
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|year| year.as_str().parse().ok())
}

// Keeps href order, one link per platform.
pub fn extract_social_links(hrefs: &[String]) -> Vec<String> {
    hrefs
        .iter()
        .filter_map(|href| {
            let lower = href.to_lowercase();
            SOCIAL_PLATFORMS
                .iter()
                .find(|platform| lower.contains(*platform))
                .map(|platform| (*platform, href.clone()))
        })
        .unique_by(|(platform, _)| *platform)
        .map(|(_, href)| href)
        .collect()
}

// Ordered checks, first hit wins.
pub fn detect_sentiment(text: &str) -> Sentiment {
    let lower = text.to_lowercase();

    if lower.contains("trusted by") || lower.contains("award-winning") {
        return Sentiment::GrowthOriented;
    }
    if lower.contains("affordable") || lower.contains("easy to use") {
        return Sentiment::ValueFocused;
    }

    Sentiment::Neutral
}

pub fn extract_tech_stack(script_sources: &[String], text: &str) -> Vec<String> {
    let patterns: Vec<(&str, Regex)> = TECH_PATTERNS
        .iter()
        .map(|(tech, pattern)| (*tech, Regex::new(pattern).unwrap()))
        .collect();

    let mut stack: Vec<String> = vec![];

    for src in script_sources {
        let lower = src.to_lowercase();
        for (tech, pattern) in &patterns {
            if pattern.is_match(&lower) && !stack.iter().any(|seen| seen == tech) {
                stack.push(tech.to_string());
            }
        }
    }

    let lower_text = text.to_lowercase();
    for (tech, pattern) in &patterns {
        if pattern.is_match(&lower_text) && !stack.iter().any(|seen| seen == tech) {
            stack.push(tech.to_string());
        }
    }

    stack
}

pub fn extract_services(text: &str) -> Vec<String> {
    SERVICE_KEYWORDS
        .into_iter()
        .filter(|word| {
            let word_re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word))).unwrap();
            word_re.is_match(text)
        })
        .map(|word| word.to_string())
        .collect()
}

pub fn extract_industries(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();

    INDUSTRY_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|(industry, _)| industry.to_string())
        .collect()
}

pub fn extract_team_info(text: &str) -> Vec<String> {
    TEAM_ROLES
        .into_iter()
        .filter(|role| {
            let role_re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(role))).unwrap();
            role_re.is_match(text)
        })
        .map(|role| role.to_string())
        .collect()
}

pub fn extract_social_proof(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();

    TRUST_PHRASES
        .into_iter()
        .filter(|phrase| lower.contains(phrase))
        .map(|phrase| phrase.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    #[test]
    fn extract_email_first_match() {
        let text = "Reach us at sales@acme.io or support@acme.io for help.";
        assert_eq!(extract_email(text), Some("sales@acme.io".to_string()));
    }

    #[test]
    fn extract_email_none_without_address() {
        assert_eq!(extract_email("Reach us through the contact form."), None);
    }

    #[test]
    fn extract_phone_international_format() {
        let text = "Call us at +1 555-123-4567 today";
        assert_eq!(extract_phone(text), Some("+1 555-123-4567".to_string()));
    }

    #[test]
    fn extract_phone_none_on_short_digits() {
        assert_eq!(extract_phone("Suite 42, floor 3"), None);
    }

    #[test]
    fn extract_address_after_label() {
        let text = "Address: 400 Main Street, Springfield";
        assert_eq!(
            extract_address(text),
            Some("400 Main Street, Springfield".to_string())
        );
    }

    #[test]
    fn extract_address_matches_headquarters_label() {
        let text = "Headquarters - Berlin, Germany";
        assert_eq!(extract_address(text), Some("Berlin, Germany".to_string()));
    }

    #[test]
    fn tagline_prefers_meta_description() {
        let document = Html::parse_document(
            r#"<html><head><meta name="description" content="We build rockets">
            <title>Acme - Home</title></head><body></body></html>"#,
        );
        assert_eq!(
            extract_tagline(&document),
            Some("We build rockets".to_string())
        );
    }

    #[test]
    fn tagline_falls_back_to_title() {
        let document =
            Html::parse_document("<html><head><title>Acme - Home</title></head><body></body></html>");
        assert_eq!(extract_tagline(&document), Some("Acme - Home".to_string()));
    }

    #[test]
    fn tagline_absent_without_meta_or_title() {
        let document = Html::parse_document("<html><head></head><body><p>hi</p></body></html>");
        assert_eq!(extract_tagline(&document), None);
    }

    #[test]
    fn founded_year_after_keyword() {
        assert_eq!(extract_founded_year("Established 1987 in Boston"), Some(1987));
        assert_eq!(extract_founded_year("founded 2003"), Some(2003));
        assert_eq!(extract_founded_year("since forever"), None);
    }

    #[test]
    fn social_links_filter_and_dedupe_by_platform() {
        let hrefs = vec![
            "https://twitter.com/acme".to_string(),
            "https://www.linkedin.com/company/acme".to_string(),
            "https://twitter.com/acme_support".to_string(),
            "https://acme.io/blog".to_string(),
        ];
        assert_eq!(
            extract_social_links(&hrefs),
            vec![
                "https://twitter.com/acme".to_string(),
                "https://www.linkedin.com/company/acme".to_string(),
            ]
        );
    }

    #[test]
    fn sentiment_growth_wins_over_value() {
        let text = "Affordable plans, trusted by 500 teams";
        assert_eq!(detect_sentiment(text), Sentiment::GrowthOriented);
        assert_eq!(detect_sentiment("Affordable and easy to use"), Sentiment::ValueFocused);
        assert_eq!(detect_sentiment("We make software"), Sentiment::Neutral);
    }

    #[test]
    fn tech_stack_from_script_sources() {
        let scripts = vec![
            "https://cdn.example.com/jquery.min.js".to_string(),
            "https://unpkg.com/react@18/umd/react.production.min.js".to_string(),
        ];
        assert_eq!(extract_tech_stack(&scripts, ""), vec!["jquery", "react"]);
    }

    #[test]
    fn tech_stack_from_body_text() {
        assert_eq!(
            extract_tech_stack(&[], "Proudly powered by WordPress"),
            vec!["wordpress"]
        );
    }

    #[test]
    fn tech_stack_reports_each_tag_once() {
        let scripts = vec![
            "https://a.example/wp-content/themes/x.js".to_string(),
            "https://b.example/wordpress/y.js".to_string(),
        ];
        assert_eq!(extract_tech_stack(&scripts, "wordpress site"), vec!["wordpress"]);
    }

    #[test]
    fn services_match_whole_words_only() {
        let services = extract_services("We offer consulting and e-commerce solutions.");
        assert_eq!(services, vec!["consulting", "e-commerce"]);

        // "maintain" must not count as AI
        assert!(extract_services("We maintain legacy systems.").is_empty());
    }

    #[test]
    fn industries_match_by_keyword_group() {
        let industries = extract_industries("A telemedicine platform for property managers");
        assert_eq!(industries, vec!["healthcare", "realEstate"]);
    }

    #[test]
    fn team_roles_found_as_whole_words() {
        let roles = extract_team_info("Our CEO and CTO lead a team of twenty.");
        assert_eq!(roles, vec!["CEO", "CTO"]);
    }

    #[test]
    fn social_proof_phrases_in_dictionary_order() {
        let proof = extract_social_proof("Read our testimonial pages and a case study.");
        assert_eq!(proof, vec!["case study", "testimonial"]);
    }
}
