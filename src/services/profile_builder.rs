use std::fmt;

use regex::Regex;
use scraper::{Html, Selector};

use crate::domain::{company::CompanyProfile, page_content::RawPageContent};

use super::{extractors, scoring};

// Raised only when the navigation layer handed over a page with no content
// at all. Thin or partial pages still produce a (low scoring) profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionFailure;

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page yielded no readable content")
    }
}

impl std::error::Error for ExtractionFailure {}

pub fn build_company_profile(raw: &RawPageContent) -> Result<CompanyProfile, ExtractionFailure> {
    if raw.primary_text.trim().is_empty() && raw.html.trim().is_empty() {
        return Err(ExtractionFailure);
    }

    let combined = raw.primary_text.as_str();
    let combined_lower = combined.to_lowercase();
    let document = Html::parse_document(&raw.html);

    let name = raw
        .name_hint
        .clone()
        .filter(|hint| !hint.trim().is_empty())
        .or_else(|| name_from_title(&document));

    let email = extractors::extract_email(combined)
        .or_else(|| mailto_fallback(&raw.mailto_candidates));

    let phone =
        extractors::extract_phone(combined).or_else(|| tel_fallback(&raw.tel_candidates));

    let address = raw
        .address_hint
        .clone()
        .filter(|hint| !hint.trim().is_empty())
        .or_else(|| extractors::extract_address(combined));

    let founded_year = extractors::extract_founded_year(combined)
        .or_else(|| founded_year_fallback(&combined_lower));

    let mut tech_stack = extractors::extract_tech_stack(&raw.script_sources, combined);
    if tech_stack.is_empty() {
        tech_stack = known_vendor_scripts(&raw.script_sources);
    }

    let mut social_links = extractors::extract_social_links(&raw.social_links_raw);
    if social_links.is_empty() {
        social_links = raw.social_links_raw.clone();
    }

    let mut profile = CompanyProfile {
        name,
        website: raw.source_url.clone(),
        email,
        phone,
        address,
        founded_year,
        tagline: extractors::extract_tagline(&document),
        social_links,
        sentiment: Some(extractors::detect_sentiment(combined)),
        tech_stack,
        services: extractors::extract_services(combined),
        industries: extractors::extract_industries(combined),
        team_info: extractors::extract_team_info(combined),
        social_proof: extractors::extract_social_proof(combined),
        meta_score: 0,
    };

    let missing = profile.missing_fields();
    if !missing.is_empty() {
        log::debug!("Missing fields from {}: {:?}", profile.website, missing);
    }

    // Score once, after every fallback has had its chance.
    profile.meta_score = scoring::calculate_meta_score(&profile);

    Ok(profile)
}

fn name_from_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").unwrap();

    document
        .select(&title_selector)
        .next()
        .and_then(|tag| {
            let title = tag.text().collect::<String>();
            title
                .trim()
                .split('-')
                .next()
                .map(|segment| segment.trim().to_string())
        })
        .filter(|name| !name.is_empty())
}

fn mailto_fallback(candidates: &[String]) -> Option<String> {
    candidates
        .iter()
        .map(|href| href.trim_start_matches("mailto:").to_string())
        .find(|address| address.contains('@'))
}

fn tel_fallback(candidates: &[String]) -> Option<String> {
    let digits_re = Regex::new(r"\d{5,}").unwrap();

    candidates
        .iter()
        .map(|href| href.trim_start_matches("tel:").to_string())
        .find(|number| digits_re.is_match(number))
}

// Wider net than the primary pattern: "founded in 2015" style phrasing.
fn founded_year_fallback(lower_text: &str) -> Option<i32> {
    let year_re = Regex::new(r"founded (in|on)? (\d{4})|established (\d{4})").unwrap();

    year_re
        .captures(lower_text)
        .and_then(|caps| caps.get(2).or_else(|| caps.get(3)))
        .and_then(|year| year.as_str().parse().ok())
}

fn known_vendor_scripts(script_sources: &[String]) -> Vec<String> {
    let vendor_re =
        Regex::new(r"(?i)(cloudflare|react|angular|vue|gtag|google-analytics|jquery)").unwrap();

    script_sources
        .iter()
        .filter(|src| vendor_re.is_match(src))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{build_company_profile, ExtractionFailure};
    use crate::domain::{company::Sentiment, page_content::RawPageContent};

    fn acme_landing_page() -> RawPageContent {
        RawPageContent {
            source_url: "https://acme.example".to_string(),
            primary_text: "Acme builds launch systems. Founded in 2015.\n\
                           We are trusted by over 500 clients worldwide."
                .to_string(),
            html: "<html><head><title>Acme Corp - Home</title></head><body></body></html>"
                .to_string(),
            ..RawPageContent::default()
        }
    }

    #[test]
    fn empty_content_is_an_extraction_failure() {
        let raw = RawPageContent {
            source_url: "https://acme.example".to_string(),
            ..RawPageContent::default()
        };
        assert_eq!(build_company_profile(&raw), Err(ExtractionFailure));
    }

    #[test]
    fn landing_page_scenario() {
        let profile = build_company_profile(&acme_landing_page()).unwrap();

        assert_eq!(profile.name, Some("Acme Corp".to_string()));
        assert_eq!(profile.founded_year, Some(2015));
        assert_eq!(profile.sentiment, Some(Sentiment::GrowthOriented));
        assert!(profile.social_proof.contains(&"trusted by".to_string()));
        assert_eq!(profile.website, "https://acme.example");
    }

    #[test]
    fn name_hint_beats_title_fallback() {
        let mut raw = acme_landing_page();
        raw.name_hint = Some("Acme Launch Systems".to_string());

        let profile = build_company_profile(&raw).unwrap();
        assert_eq!(profile.name, Some("Acme Launch Systems".to_string()));
    }

    #[test]
    fn email_falls_back_to_mailto_link() {
        let mut raw = acme_landing_page();
        raw.mailto_candidates = vec!["mailto:info@acme.com".to_string()];

        let profile = build_company_profile(&raw).unwrap();
        assert_eq!(profile.email, Some("info@acme.com".to_string()));
    }

    #[test]
    fn email_absent_without_any_source() {
        let profile = build_company_profile(&acme_landing_page()).unwrap();
        assert_eq!(profile.email, None);

        let json = serde_json::to_value(&profile).unwrap();
        assert!(!json.as_object().unwrap().contains_key("email"));
    }

    #[test]
    fn phone_falls_back_to_tel_link_with_enough_digits() {
        let mut raw = acme_landing_page();
        raw.tel_candidates = vec![
            "tel:911".to_string(),
            "tel:+15551234567".to_string(),
        ];

        let profile = build_company_profile(&raw).unwrap();
        assert_eq!(profile.phone, Some("+15551234567".to_string()));
    }

    #[test]
    fn founded_year_uses_secondary_pattern() {
        let raw = RawPageContent {
            source_url: "https://acme.example".to_string(),
            primary_text: "The firm was founded in 1999 by two engineers.".to_string(),
            html: "<html><head><title>Firm</title></head></html>".to_string(),
            ..RawPageContent::default()
        };

        let profile = build_company_profile(&raw).unwrap();
        assert_eq!(profile.founded_year, Some(1999));
    }

    #[test]
    fn tech_stack_from_text_when_scripts_are_empty() {
        let mut raw = acme_landing_page();
        raw.primary_text.push_str(" Powered by WordPress.");

        let profile = build_company_profile(&raw).unwrap();
        assert_eq!(profile.tech_stack, vec!["wordpress"]);
    }

    #[test]
    fn tech_stack_falls_back_to_known_vendor_scripts() {
        let mut raw = acme_landing_page();
        raw.script_sources = vec![
            "https://www.google-analytics.com/analytics.js".to_string(),
            "https://acme.example/app.js".to_string(),
        ];

        let profile = build_company_profile(&raw).unwrap();
        assert_eq!(
            profile.tech_stack,
            vec!["https://www.google-analytics.com/analytics.js".to_string()]
        );
    }

    #[test]
    fn social_links_fall_back_to_raw_list() {
        let mut raw = acme_landing_page();
        raw.social_links_raw = vec!["https://example.social/acme".to_string()];

        let profile = build_company_profile(&raw).unwrap();
        assert_eq!(
            profile.social_links,
            vec!["https://example.social/acme".to_string()]
        );
    }

    #[test]
    fn building_twice_yields_identical_profiles() {
        let raw = acme_landing_page();
        let first = build_company_profile(&raw).unwrap();
        let second = build_company_profile(&raw).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn one_empty_page_does_not_taint_its_neighbours() {
        let pages = [
            acme_landing_page(),
            RawPageContent {
                source_url: "https://dead.example".to_string(),
                ..RawPageContent::default()
            },
            acme_landing_page(),
        ];

        let outcomes: Vec<_> = pages.iter().map(build_company_profile).collect();

        assert!(outcomes[0].is_ok());
        assert_eq!(outcomes[1], Err(ExtractionFailure));
        assert!(outcomes[2].is_ok());
        assert_eq!(
            outcomes[0].as_ref().unwrap().meta_score,
            outcomes[2].as_ref().unwrap().meta_score
        );
    }
}
