use super::tokenizer::{normalize, tokenize_query};
use crate::model::types::Institution;

/// Normalized text a query is matched against: name, type, locality, description and
/// career paths, joined by single spaces. Absent fields contribute an empty string.
pub fn searchable_text(institution: &Institution) -> String {
    let career_paths = institution.career_paths.join(" ");
    let fields = [
        institution.name.as_str(),
        institution.kind.label(),
        institution.locality.as_deref().unwrap_or_default(),
        institution.description.as_deref().unwrap_or_default(),
        career_paths.as_str(),
    ];

    fields.iter().map(|field| normalize(field)).collect::<Vec<_>>().join(" ")
}

/// Every token must occur somewhere in the searchable text. No tokens matches everything.
pub fn matches_tokens(tokens: &[String], institution: &Institution) -> bool {
    if tokens.is_empty() {
        return true;
    }

    let haystack = searchable_text(institution);
    tokens.iter().all(|token| haystack.contains(token.as_str()))
}

pub fn matches(query: &str, institution: &Institution) -> bool {
    matches_tokens(&tokenize_query(query), institution)
}

/// Keeps the institutions matching `query`, in their original order.
pub fn search(query: &str, institutions: Vec<Institution>) -> Vec<Institution> {
    let tokens = tokenize_query(query);
    if tokens.is_empty() {
        return institutions;
    }

    institutions
        .into_iter()
        .filter(|institution| matches_tokens(&tokens, institution))
        .collect()
}
