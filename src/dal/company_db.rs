use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::company::CompanyProfile;

#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub website: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founded_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_info: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_proof: Option<Vec<String>>,
    pub meta_score: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub async fn insert_company(
    pool: &PgPool,
    profile: &CompanyProfile,
    search_query: Option<&str>,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        r"
        insert into company
            (id, name, website, email, phone, address, founded_year, tagline,
             social_links, sentiment, tech_stack, services, industries,
             team_info, social_proof, meta_score, search_query)
        values
            ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
        ",
    )
    .bind(id)
    .bind(&profile.name)
    .bind(&profile.website)
    .bind(&profile.email)
    .bind(&profile.phone)
    .bind(&profile.address)
    .bind(profile.founded_year)
    .bind(&profile.tagline)
    .bind(non_empty(&profile.social_links))
    .bind(profile.sentiment.map(|s| s.as_str()))
    .bind(non_empty(&profile.tech_stack))
    .bind(non_empty(&profile.services))
    .bind(non_empty(&profile.industries))
    .bind(non_empty(&profile.team_info))
    .bind(non_empty(&profile.social_proof))
    .bind(profile.meta_score)
    .bind(search_query)
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn get_all_companies(pool: &PgPool) -> Result<Vec<CompanyRecord>, sqlx::Error> {
    sqlx::query_as::<_, CompanyRecord>(
        r"
        select * from company order by created_at desc
        ",
    )
    .fetch_all(pool)
    .await
}

pub async fn get_companies_with_min_score(
    pool: &PgPool,
    min_score: i32,
) -> Result<Vec<CompanyRecord>, sqlx::Error> {
    sqlx::query_as::<_, CompanyRecord>(
        r"
        select * from company where meta_score >= $1 order by meta_score desc
        ",
    )
    .bind(min_score)
    .fetch_all(pool)
    .await
}

// Empty lists are stored as NULL so exported rows never carry empty values.
fn non_empty(values: &[String]) -> Option<Vec<String>> {
    match values.is_empty() {
        true => None,
        false => Some(values.to_vec()),
    }
}
