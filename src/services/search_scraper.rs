use std::time::Duration;

use fake_user_agent::get_rua;
use scraper::{Html, Selector};
use url::Url;

const SEARCH_URL: &str = "https://html.duckduckgo.com/html/";
const NUM_SEARCH_RETRIES: u8 = 3;
const RESULT_URL_LIMIT: usize = 10;

// Directories with structured company pages; everything else the engine
// returns is noise for this pipeline.
const ALLOWED_SEARCH_DOMAINS: [&str; 3] = ["f6s.com", "startupindia.gov.in", "inventiva.co.in"];

pub enum SearchResult {
    Urls(Vec<String>),
    NoResults,
    Blocked,
}

pub async fn search_company_urls(query: &str) -> SearchResult {
    let anchor_selector = Selector::parse("a.result__a").unwrap();

    let mut retry_count = 0;

    while retry_count < NUM_SEARCH_RETRIES {
        let client = reqwest::Client::builder()
            .user_agent(get_rua())
            .read_timeout(Duration::from_secs(30))
            .build()
            .unwrap();

        let request = client.get(SEARCH_URL).query(&[("q", query)]);

        match request.send().await {
            Ok(res) => match res.text().await {
                Ok(html_content) => {
                    let html_document = Html::parse_document(&html_content);

                    let candidate_urls: Vec<String> = html_document
                        .select(&anchor_selector)
                        .filter_map(|tag| tag.value().attr("href"))
                        .filter_map(resolve_result_url)
                        .collect();

                    if candidate_urls.is_empty() {
                        log::error!("No result anchors for query: {}", query);
                        retry_count += 1;
                        continue;
                    }

                    log::info!(
                        "Found {} candidate urls for query: {}",
                        candidate_urls.len(),
                        query
                    );

                    let urls = filter_search_urls(candidate_urls);
                    return match urls.is_empty() {
                        true => SearchResult::NoResults,
                        false => SearchResult::Urls(urls),
                    };
                }
                Err(e) => {
                    log::error!("Failed to read search response body. Error: {:?}", e);
                    retry_count += 1;
                }
            },
            Err(e) => {
                log::error!("No response from search request, error: {:?}", e);
                retry_count += 1;
            }
        }
    }

    SearchResult::Blocked
}

// Result anchors come back wrapped as //duckduckgo.com/l/?uddg=<target>.
fn resolve_result_url(href: &str) -> Option<String> {
    let absolute = match href.strip_prefix("//") {
        Some(rest) => format!("https://{}", rest),
        None => href.to_string(),
    };

    let parsed = Url::parse(&absolute).ok()?;
    if let Some((_, target)) = parsed.query_pairs().find(|(key, _)| key == "uddg") {
        return Some(target.to_string());
    }

    match absolute.starts_with("http") {
        true => Some(absolute),
        false => None,
    }
}

pub fn filter_search_urls(urls: Vec<String>) -> Vec<String> {
    urls.into_iter()
        .filter(|url| {
            ALLOWED_SEARCH_DOMAINS
                .iter()
                .any(|domain| url.contains(domain))
        })
        .take(RESULT_URL_LIMIT)
        .collect()
}
