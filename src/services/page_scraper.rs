use std::time::Duration;

use regex::Regex;
use thirtyfour::{error::WebDriverError, By, WebDriver};

use crate::domain::page_content::RawPageContent;

const INTERNAL_PAGE_LIMIT: usize = 5;
const SETTLE_DELAY: Duration = Duration::from_secs(2);
const SUBPAGE_SETTLE_DELAY: Duration = Duration::from_secs(1);

pub async fn collect_page_content(
    driver: &WebDriver,
    url: &str,
) -> Result<RawPageContent, WebDriverError> {
    driver.goto(url).await?;
    tokio::time::sleep(SETTLE_DELAY).await;

    let body_text = first_element_text(driver, &["body"]).await?.unwrap_or_default();
    let name_hint = first_element_text(driver, &["h1", ".company-name", ".hero-title"]).await?;
    let address_hint = first_element_text(driver, &["address", ".location"]).await?;

    let mut hrefs: Vec<String> = vec![];
    for a_tag in driver.find_all(By::Tag("a")).await? {
        if let Some(href) = a_tag.attr("href").await? {
            hrefs.push(href);
        }
    }

    let mut script_sources: Vec<String> = vec![];
    for script_tag in driver.find_all(By::Tag("script")).await? {
        if let Some(src) = script_tag.attr("src").await? {
            if !src.is_empty() {
                script_sources.push(src);
            }
        }
    }

    let social_re = Regex::new(
        r"(?i)(facebook\.com|instagram\.com|linkedin\.com|twitter\.com|youtube\.com)",
    )
    .unwrap();

    let mailto_candidates = hrefs
        .iter()
        .filter(|href| href.starts_with("mailto:"))
        .cloned()
        .collect();
    let tel_candidates = hrefs
        .iter()
        .filter(|href| href.starts_with("tel:"))
        .cloned()
        .collect();
    let social_links_raw = hrefs
        .iter()
        .filter(|href| social_re.is_match(href))
        .cloned()
        .collect();

    let html = driver.source().await?;

    // Pull extra text from a handful of internal pages; a dead link is
    // skipped, never fatal.
    let mut primary_text = body_text;
    for link in select_internal_links(&hrefs) {
        match driver.goto(&link).await {
            Ok(()) => {
                tokio::time::sleep(SUBPAGE_SETTLE_DELAY).await;
                if let Some(text) = first_element_text(driver, &["body"]).await? {
                    primary_text.push('\n');
                    primary_text.push_str(&text);
                }
            }
            Err(e) => log::warn!("Skipping internal page {}: {:?}", link, e),
        }
    }

    log::info!(
        "Collected {} chars of text, {} links, {} scripts from {}",
        primary_text.len(),
        hrefs.len(),
        script_sources.len(),
        url
    );

    Ok(RawPageContent {
        source_url: url.to_string(),
        primary_text,
        html,
        mailto_candidates,
        tel_candidates,
        social_links_raw,
        script_sources,
        name_hint,
        address_hint,
    })
}

pub fn select_internal_links(hrefs: &[String]) -> Vec<String> {
    let internal_re = Regex::new(r"(?i)(about|contact|support|help|faq|team|info)").unwrap();

    hrefs
        .iter()
        .filter(|href| href.starts_with("http") && internal_re.is_match(href))
        .take(INTERNAL_PAGE_LIMIT)
        .cloned()
        .collect()
}

async fn first_element_text(
    driver: &WebDriver,
    selectors: &[&str],
) -> Result<Option<String>, WebDriverError> {
    for selector in selectors {
        if let Ok(element) = driver.find(By::Css(*selector)).await {
            let text = element.text().await?.trim().to_string();
            if !text.is_empty() {
                return Ok(Some(text));
            }
        }
    }

    Ok(None)
}
