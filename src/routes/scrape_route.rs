use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use url::Url;

use crate::{
    dal::company_db::{self, CompanyRecord},
    services::{
        build_company_profile, collect_page_content, search_company_urls, BrowserPool,
        SearchResult,
    },
};

#[derive(Deserialize)]
struct PreviewBody {
    url: String,
}

#[derive(Deserialize)]
struct BatchBody {
    urls: Vec<String>,
}

#[derive(Deserialize)]
struct SearchBody {
    query: String,
}

#[derive(Deserialize)]
struct FilterQuery {
    score: Option<String>,
}

#[derive(Serialize)]
struct UrlStatus {
    url: String,
    status: &'static str,
    score: i32,
}

// Scrape one page and return the profile without persisting it.
#[post("/preview")]
async fn preview(
    body: web::Json<PreviewBody>,
    browsers: web::Data<BrowserPool>,
) -> HttpResponse {
    if !is_valid_url(&body.url) {
        return HttpResponse::BadRequest().json(json!({ "error": "Missing or invalid URL." }));
    }

    let driver = browsers.any_driver();
    match collect_page_content(driver, &body.url).await {
        Ok(raw) => match build_company_profile(&raw) {
            Ok(profile) => HttpResponse::Ok().json(profile),
            Err(_) => {
                HttpResponse::BadGateway().json(json!({ "error": "Scraper returned no data." }))
            }
        },
        Err(e) => {
            log::error!("Preview scrape failed for {}: {:?}", body.url, e);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Unexpected error during preview." }))
        }
    }
}

// Scrape and save a list of urls; one bad url never stops the rest.
#[post("/batch")]
async fn batch(
    body: web::Json<BatchBody>,
    pool: web::Data<PgPool>,
    browsers: web::Data<BrowserPool>,
) -> HttpResponse {
    let mut results: Vec<UrlStatus> = vec![];

    for url in &body.urls {
        let status = scrape_and_save(url, None, pool.get_ref(), browsers.get_ref()).await;
        results.push(status);
    }

    HttpResponse::Ok().json(json!({ "message": "Batch scraping complete", "results": results }))
}

#[post("/search")]
async fn search(
    body: web::Json<SearchBody>,
    pool: web::Data<PgPool>,
    browsers: web::Data<BrowserPool>,
) -> HttpResponse {
    log::info!("Initiating search for: {}", body.query);

    let urls = match search_company_urls(&body.query).await {
        SearchResult::Urls(urls) => urls,
        SearchResult::NoResults => {
            return HttpResponse::Ok().json(json!({
                "message": "No usable links extracted from search results.",
                "query": body.query,
                "results": [],
            }));
        }
        SearchResult::Blocked => {
            return HttpResponse::InternalServerError()
                .json(json!({ "error": "Search failed due to internal error." }));
        }
    };

    let mut results: Vec<UrlStatus> = vec![];
    for url in &urls {
        let status =
            scrape_and_save(url, Some(&body.query), pool.get_ref(), browsers.get_ref()).await;
        results.push(status);
    }

    HttpResponse::Ok().json(json!({
        "message": "Search complete",
        "query": body.query,
        "results": results,
    }))
}

#[get("/export")]
async fn export(pool: web::Data<PgPool>) -> HttpResponse {
    let companies = match company_db::get_all_companies(pool.get_ref()).await {
        Ok(companies) => companies,
        Err(e) => {
            log::error!("Export query failed: {:?}", e);
            return HttpResponse::InternalServerError()
                .json(json!({ "error": "Failed to export CSV." }));
        }
    };

    if companies.is_empty() {
        return HttpResponse::NotFound().json(json!({ "message": "No company profiles found." }));
    }

    match companies_to_csv(&companies) {
        Ok(csv_data) => HttpResponse::Ok()
            .content_type("text/csv")
            .insert_header(("Content-Disposition", "attachment; filename=\"companies.csv\""))
            .body(csv_data),
        Err(e) => {
            log::error!("CSV serialization failed: {:?}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to export CSV." }))
        }
    }
}

#[get("/filter")]
async fn filter(query: web::Query<FilterQuery>, pool: web::Data<PgPool>) -> HttpResponse {
    // Unparseable score values are ignored, matching a lenient query contract.
    let min_score = query
        .score
        .as_deref()
        .and_then(|raw| raw.parse::<i32>().ok())
        .unwrap_or(0);

    match company_db::get_companies_with_min_score(pool.get_ref(), min_score).await {
        Ok(results) => match results.is_empty() {
            true => {
                HttpResponse::NotFound().json(json!({ "message": "No matching profiles found." }))
            }
            false => HttpResponse::Ok().json(results),
        },
        Err(e) => {
            log::error!("Filter query failed: {:?}", e);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Failed to apply filters." }))
        }
    }
}

async fn scrape_and_save(
    url: &str,
    search_query: Option<&str>,
    pool: &PgPool,
    browsers: &BrowserPool,
) -> UrlStatus {
    if !is_valid_url(url) {
        return UrlStatus {
            url: url.to_string(),
            status: "invalid",
            score: 0,
        };
    }

    let driver = browsers.any_driver();
    let raw = match collect_page_content(driver, url).await {
        Ok(raw) => raw,
        Err(e) => {
            log::error!("Scrape failed for {}: {:?}", url, e);
            return UrlStatus {
                url: url.to_string(),
                status: "error",
                score: 0,
            };
        }
    };

    let profile = match build_company_profile(&raw) {
        Ok(profile) => profile,
        Err(_) => {
            return UrlStatus {
                url: url.to_string(),
                status: "empty",
                score: 0,
            };
        }
    };

    match company_db::insert_company(pool, &profile, search_query).await {
        Ok(_) => UrlStatus {
            url: url.to_string(),
            status: "saved",
            score: profile.meta_score,
        },
        Err(e) => {
            log::error!("Failed to save profile for {}: {:?}", url, e);
            UrlStatus {
                url: url.to_string(),
                status: "error",
                score: 0,
            }
        }
    }
}

fn is_valid_url(url: &str) -> bool {
    Url::parse(url).is_ok()
}

fn companies_to_csv(companies: &[CompanyRecord]) -> Result<String, anyhow::Error> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record([
        "id",
        "name",
        "website",
        "email",
        "phone",
        "address",
        "foundedYear",
        "tagline",
        "socialLinks",
        "sentiment",
        "techStack",
        "services",
        "industries",
        "teamInfo",
        "socialProof",
        "metaScore",
        "searchQuery",
        "createdAt",
    ])?;

    for company in companies {
        writer.write_record([
            company.id.to_string(),
            company.name.clone().unwrap_or_default(),
            company.website.clone(),
            company.email.clone().unwrap_or_default(),
            company.phone.clone().unwrap_or_default(),
            company.address.clone().unwrap_or_default(),
            company
                .founded_year
                .map(|year| year.to_string())
                .unwrap_or_default(),
            company.tagline.clone().unwrap_or_default(),
            flatten_list(&company.social_links),
            company.sentiment.clone().unwrap_or_default(),
            flatten_list(&company.tech_stack),
            flatten_list(&company.services),
            flatten_list(&company.industries),
            flatten_list(&company.team_info),
            flatten_list(&company.social_proof),
            company.meta_score.to_string(),
            company.search_query.clone().unwrap_or_default(),
            company.created_at.to_rfc3339(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("finalizing csv writer: {}", e))?;

    Ok(String::from_utf8(bytes)?)
}

fn flatten_list(values: &Option<Vec<String>>) -> String {
    values
        .as_ref()
        .map(|list| list.join("; "))
        .unwrap_or_default()
}
