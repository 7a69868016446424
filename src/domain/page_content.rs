// Everything the navigation layer managed to pull out of one page visit.
// The extraction pipeline works on this snapshot alone and never touches
// the network itself.
#[derive(Debug, Clone, Default)]
pub struct RawPageContent {
    pub source_url: String,
    // Main page body text plus the text of a bounded set of internal
    // sub-pages (about/contact/team/...), newline-joined in visit order.
    pub primary_text: String,
    pub html: String,
    pub mailto_candidates: Vec<String>,
    pub tel_candidates: Vec<String>,
    pub social_links_raw: Vec<String>,
    pub script_sources: Vec<String>,
    pub name_hint: Option<String>,
    pub address_hint: Option<String>,
}
