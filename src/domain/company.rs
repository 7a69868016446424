use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    #[serde(rename = "growth-oriented")]
    GrowthOriented,
    #[serde(rename = "value-focused")]
    ValueFocused,
    #[serde(rename = "neutral")]
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::GrowthOriented => "growth-oriented",
            Sentiment::ValueFocused => "value-focused",
            Sentiment::Neutral => "neutral",
        }
    }
}

// Serialized output never carries nulls or empty lists, only fields that
// actually hold data. `website` and `meta_score` are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
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
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub social_links: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tech_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub industries: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub team_info: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub social_proof: Vec<String>,
    pub meta_score: i32,
}

impl CompanyProfile {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = vec![];

        if self.name.is_none() {
            missing.push("name");
        }
        if self.email.is_none() {
            missing.push("email");
        }
        if self.phone.is_none() {
            missing.push("phone");
        }
        if self.address.is_none() {
            missing.push("address");
        }
        if self.founded_year.is_none() {
            missing.push("foundedYear");
        }
        if self.tagline.is_none() {
            missing.push("tagline");
        }
        if self.social_links.is_empty() {
            missing.push("socialLinks");
        }
        if self.sentiment.is_none() {
            missing.push("sentiment");
        }
        if self.tech_stack.is_empty() {
            missing.push("techStack");
        }
        if self.services.is_empty() {
            missing.push("services");
        }
        if self.industries.is_empty() {
            missing.push("industries");
        }
        if self.team_info.is_empty() {
            missing.push("teamInfo");
        }
        if self.social_proof.is_empty() {
            missing.push("socialProof");
        }

        missing
    }
}

#[cfg(test)]
mod tests {
    use super::{CompanyProfile, Sentiment};

    fn bare_profile() -> CompanyProfile {
        CompanyProfile {
            name: None,
            website: "https://acme.example".to_string(),
            email: None,
            phone: None,
            address: None,
            founded_year: None,
            tagline: None,
            social_links: vec![],
            sentiment: None,
            tech_stack: vec![],
            services: vec![],
            industries: vec![],
            team_info: vec![],
            social_proof: vec![],
            meta_score: 0,
        }
    }

    #[test]
    fn sentiment_serializes_to_wire_names() {
        let json = serde_json::to_string(&Sentiment::GrowthOriented).unwrap();
        assert_eq!(json, r#""growth-oriented""#);
        assert_eq!(Sentiment::ValueFocused.as_str(), "value-focused");
    }

    #[test]
    fn missing_fields_lists_everything_on_a_bare_profile() {
        let missing = bare_profile().missing_fields();
        assert_eq!(missing.len(), 13);
        assert!(missing.contains(&"socialLinks"));
        assert!(!missing.contains(&"website"));
    }

    #[test]
    fn missing_fields_shrinks_as_fields_fill_in() {
        let mut profile = bare_profile();
        profile.name = Some("Acme".to_string());
        profile.tech_stack = vec!["react".to_string()];

        let missing = profile.missing_fields();
        assert_eq!(missing.len(), 11);
        assert!(!missing.contains(&"name"));
        assert!(!missing.contains(&"techStack"));
    }

    #[test]
    fn serialized_profile_has_no_nulls_or_empty_lists() {
        let mut profile = bare_profile();
        profile.email = Some("hello@acme.example".to_string());
        profile.services = vec!["consulting".to_string()];

        let value = serde_json::to_value(&profile).unwrap();
        let object = value.as_object().unwrap();

        for (key, field) in object {
            assert!(!field.is_null(), "{} serialized as null", key);
            if let Some(list) = field.as_array() {
                assert!(!list.is_empty(), "{} serialized as empty list", key);
            }
        }
        assert!(!object.contains_key("phone"));
        assert!(!object.contains_key("techStack"));
        assert!(object.contains_key("email"));
    }
}
