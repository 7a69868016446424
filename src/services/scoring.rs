use crate::domain::company::CompanyProfile;

// Hand-tuned presence weights; raw total caps at 20 and is rescaled to 0-100.
const MAX_RAW_SCORE: f64 = 20.0;

pub fn calculate_meta_score(profile: &CompanyProfile) -> i32 {
    let mut score = 0;

    if profile.name.is_some() {
        score += 2;
    }
    if profile.email.is_some() {
        score += 2;
    }
    if profile.phone.is_some() {
        score += 2;
    }
    if profile.address.is_some() {
        score += 1;
    }
    if profile.founded_year.is_some() {
        score += 1;
    }
    if profile.tagline.is_some() {
        score += 1;
    }
    if !profile.social_links.is_empty() {
        score += 1;
    }
    if profile.sentiment.is_some() {
        score += 1;
    }
    if !profile.tech_stack.is_empty() {
        score += 2;
    }
    if !profile.services.is_empty() {
        score += 1;
    }
    if !profile.industries.is_empty() {
        score += 2;
    }
    if !profile.team_info.is_empty() {
        score += 1;
    }
    if !profile.social_proof.is_empty() {
        score += 1;
    }

    (f64::from(score) / MAX_RAW_SCORE * 100.0).round() as i32
}
