//! Search Module Tests
//!
//! Validates text folding, tokenization, the match rule and the list endpoint.
//!
//! ## Test Scopes
//! - **Tokenizer**: Case and diacritic folding, whitespace splitting, punctuation handling.
//! - **Engine**: AND/substring matching over the searchable fields, order preservation.
//! - **Properties**: Idempotent normalization, match-all on blank queries, the AND rule.
//! - **Handlers**: `GET /escolas` with `tipo` and `q` composed.

#[cfg(test)]
mod tests {
    use crate::model::types::{InstitutionType, NewInstitution};
    use crate::model::id::InstitutionId;
    use crate::search::engine::{matches, search, searchable_text};
    use crate::search::tokenizer::{normalize, tokenize_query};
    use crate::search::types::ListParams;
    use crate::server::router;
    use crate::testing::{FailingStore, get_json, institution, names, seeded_store};
    use axum::http::StatusCode;
    use proptest::prelude::*;
    use std::sync::Arc;

    // ============================================================
    // TOKENIZER TESTS - normalize
    // ============================================================

    #[test]
    fn test_normalize_strips_diacritics_and_case() {
        assert_eq!(normalize("Politécnico"), "politecnico");
        assert_eq!(normalize("ÁÉÍÓÚ ãõ Ç"), "aeiou ao c");
        assert_eq!(normalize("Bragança"), "braganca");
    }

    #[test]
    fn test_normalize_handles_decomposed_input() {
        // "e" followed by a combining acute accent
        assert_eq!(normalize("Polite\u{301}cnico"), "politecnico");
    }

    #[test]
    fn test_normalize_dotted_capital_i() {
        assert_eq!(normalize("İstanbul"), "istanbul");
        assert_eq!(normalize(&normalize("İstanbul")), normalize("İstanbul"));
    }

    #[test]
    fn test_normalize_keeps_punctuation_and_digits() {
        assert_eq!(normalize("Rua 5, nº 12"), "rua 5, nº 12");
    }

    // ============================================================
    // TOKENIZER TESTS - tokenize_query
    // ============================================================

    #[test]
    fn test_tokenize_query_splits_on_whitespace_runs() {
        let tokens = tokenize_query("  univ \t  porto\n");
        assert_eq!(tokens, vec!["univ", "porto"]);
    }

    #[test]
    fn test_tokenize_query_empty_and_blank() {
        assert!(tokenize_query("").is_empty());
        assert!(tokenize_query("   \t ").is_empty());
    }

    #[test]
    fn test_tokenize_query_punctuation_only() {
        assert!(tokenize_query("!!! , . ?").is_empty());
    }

    #[test]
    fn test_tokenize_query_trims_surrounding_punctuation() {
        assert_eq!(tokenize_query("porto, lisboa!"), vec!["porto", "lisboa"]);
    }

    #[test]
    fn test_tokenize_query_keeps_inner_punctuation() {
        assert_eq!(tokenize_query("u.porto"), vec!["u.porto"]);
        assert_eq!(tokenize_query("Pós-Graduação"), vec!["pos-graduacao"]);
        assert_eq!(tokenize_query("(c++)"), vec!["c"]);
    }

    #[test]
    fn test_inner_punctuation_is_matched_literally() {
        let porto = institution("Universidade do Porto", InstitutionType::University, "Porto");
        let course = institution("Pós-Graduação em Gestão", InstitutionType::HigherEducationCourse, "Lisboa");

        assert!(!matches("u.porto", &porto));
        assert!(matches("pos-graduacao", &course));
        assert!(matches("\"gestão\"", &course));
    }

    #[test]
    fn test_tokenize_query_keeps_short_tokens() {
        assert_eq!(tokenize_query("a de"), vec!["a", "de"]);
    }

    #[test]
    fn test_tokenize_query_allows_duplicates() {
        assert_eq!(tokenize_query("porto porto").len(), 2);
    }

    // ============================================================
    // ENGINE TESTS
    // ============================================================

    #[test]
    fn test_univ_porto_scenario() {
        let porto = institution("Universidade do Porto", InstitutionType::University, "Porto");
        let lisboa = institution("Universidade de Lisboa", InstitutionType::University, "Lisboa");

        assert!(matches("univ porto", &porto));
        assert!(!matches("univ porto", &lisboa), "missing \"porto\" must exclude");
    }

    #[test]
    fn test_diacritic_insensitive_results_are_identical() {
        let records = vec![
            institution("Instituto Politécnico do Porto", InstitutionType::Polytechnic, "Porto"),
            institution("Universidade do Minho", InstitutionType::University, "Braga"),
            institution("Politecnico de Leiria", InstitutionType::Polytechnic, "Leiria"),
        ];

        let plain = search("Politecnico", records.clone());
        let accented = search("Politécnico", records.clone());
        let upper = search("POLITÉCNICO", records);

        assert_eq!(plain, accented);
        assert_eq!(plain, upper);
        assert_eq!(plain.len(), 2);
    }

    #[test]
    fn test_substring_not_token_boundary() {
        let record = NewInstitution::new("Faculdade de Engenharia", InstitutionType::Faculty)
            .into_institution(InstitutionId::new());

        assert!(matches("genha", &record));
        assert!(matches("eng fac", &record));
    }

    #[test]
    fn test_matches_every_searchable_field() {
        let record = NewInstitution::new("Escola Profissional de Braga", InstitutionType::Vocational)
            .with_locality("Braga")
            .with_description("Cursos com forte componente prática")
            .with_career_paths(["Técnico de Informática", "Eletrónica"])
            .into_institution(InstitutionId::new());

        assert!(matches("braga", &record), "locality");
        assert!(matches("profissional", &record), "type label");
        assert!(matches("pratica", &record), "description");
        assert!(matches("informatica", &record), "career paths");
        assert!(matches("eletronica tecnico", &record), "career paths across elements");
    }

    #[test]
    fn test_non_searchable_fields_are_ignored() {
        let mut new = NewInstitution::new("Universidade do Minho", InstitutionType::University);
        new.address = Some("Largo do Paço".to_string());
        new.website = Some("https://www.uminho.pt".to_string());
        new.price = Some("Gratuito".to_string());
        let record = new.into_institution(InstitutionId::new());

        assert!(!matches("paco", &record));
        assert!(!matches("uminho.pt", &record));
        assert!(!matches("gratuito", &record));
    }

    #[test]
    fn test_searchable_text_with_missing_fields() {
        let record = NewInstitution::new("Universidade", InstitutionType::University)
            .into_institution(InstitutionId::new());

        assert_eq!(searchable_text(&record), "universidade universidade   ");
    }

    #[test]
    fn test_search_preserves_input_order() {
        let records = vec![
            institution("C Porto", InstitutionType::Faculty, "Porto"),
            institution("A Lisboa", InstitutionType::Faculty, "Lisboa"),
            institution("B Porto", InstitutionType::Faculty, "Porto"),
        ];

        let found: Vec<String> = search("porto", records)
            .into_iter()
            .map(|record| record.name)
            .collect();

        assert_eq!(found, vec!["C Porto", "B Porto"]);
    }

    #[test]
    fn test_blank_query_returns_everything() {
        let records = vec![
            institution("Universidade do Porto", InstitutionType::University, "Porto"),
            institution("Faculdade de Medicina", InstitutionType::Faculty, "Lisboa"),
        ];

        assert_eq!(search("", records.clone()), records);
        assert_eq!(search("   ", records.clone()), records);
        assert_eq!(search("?!", records.clone()), records);
    }

    // ============================================================
    // PROPERTY TESTS
    // ============================================================

    const TEXT: &str = "[a-zA-Z0-9áàâãéêíóôõúçÁÀÂÃÉÊÍÓÔÕÚÇİ ,.!?-]{0,40}";
    const NAME: &str = "[a-pr-wyzáéíóúç]{1,8}( [a-pr-wyzáéíóúç]{1,8}){0,4}";

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(text in TEXT) {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn prop_blank_query_matches_all(query in "[ \t\n,.!?;:-]{0,12}", name in NAME) {
            let record = institution(&name, InstitutionType::Faculty, "Porto");
            prop_assert!(matches(&query, &record));
        }

        #[test]
        fn prop_substrings_of_searchable_text_match(
            name in NAME,
            picks in proptest::collection::vec((any::<prop::sample::Index>(), 1usize..4), 1..4),
        ) {
            let record = institution(&name, InstitutionType::University, "Porto");
            let words: Vec<&str> = name.split(' ').collect();

            let query: Vec<String> = picks
                .iter()
                .map(|(index, len)| {
                    let word: Vec<char> = words[index.index(words.len())].chars().collect();
                    word[..word.len().min(*len)].iter().collect()
                })
                .collect();

            let query = query.join(" ");
            let extended = format!("{query} qxq");

            prop_assert!(matches(&query, &record));
            prop_assert!(!matches(&extended, &record));
        }
    }

    // ============================================================
    // HANDLER TESTS
    // ============================================================

    #[test]
    fn test_list_params_treat_empty_as_absent() {
        let params = ListParams {
            tipo: Some(String::new()),
            q: Some(String::new()),
        };

        assert_eq!(params.kind(), None);
        assert_eq!(params.query(), None);
    }

    #[tokio::test]
    async fn test_list_returns_everything_in_store_order() {
        let (store, inserted) = seeded_store().await;

        let (status, body) = get_json(router(store), "/escolas").await;

        assert_eq!(status, StatusCode::OK);
        let expected: Vec<String> = inserted.iter().map(|i| i.name.clone()).collect();
        assert_eq!(names(&body), expected);
    }

    #[tokio::test]
    async fn test_list_filters_by_type() {
        let (store, _) = seeded_store().await;

        let (status, body) = get_json(router(store), "/escolas?tipo=Faculdade").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            names(&body),
            vec!["Faculdade de Engenharia", "Faculdade de Medicina"]
        );
        for item in body.as_array().unwrap() {
            assert_eq!(item["tipo"], "Faculdade");
        }
    }

    #[tokio::test]
    async fn test_list_filters_by_accented_type() {
        let (store, _) = seeded_store().await;

        let (_, body) = get_json(router(store), "/escolas?tipo=Polit%C3%A9cnico").await;

        assert_eq!(names(&body), vec!["Instituto Politécnico do Porto"]);
    }

    #[tokio::test]
    async fn test_list_searches_with_q() {
        let (store, _) = seeded_store().await;

        let (_, body) = get_json(router(store), "/escolas?q=univ%20porto").await;

        assert_eq!(names(&body), vec!["Universidade do Porto"]);
    }

    #[tokio::test]
    async fn test_list_search_ignores_diacritics() {
        let (store, _) = seeded_store().await;

        let (_, plain) = get_json(router(store.clone()), "/escolas?q=politecnico").await;
        let (_, accented) = get_json(router(store), "/escolas?q=polit%C3%A9cnico").await;

        assert_eq!(plain, accented);
        assert_eq!(names(&plain), vec!["Instituto Politécnico do Porto"]);
    }

    #[tokio::test]
    async fn test_list_composes_type_and_query() {
        let (store, _) = seeded_store().await;

        let (_, body) = get_json(router(store), "/escolas?tipo=Faculdade&q=porto").await;

        assert_eq!(names(&body), vec!["Faculdade de Engenharia"]);
    }

    #[tokio::test]
    async fn test_list_no_match_is_empty_array() {
        let (store, _) = seeded_store().await;

        let (status, body) = get_json(router(store.clone()), "/escolas?q=inexistente").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));

        let (status, body) = get_json(router(store), "/escolas?tipo=Escola%20Secund%C3%A1ria").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_list_empty_params_return_everything() {
        let (store, inserted) = seeded_store().await;

        let (_, body) = get_json(router(store), "/escolas?tipo=&q=").await;

        assert_eq!(names(&body).len(), inserted.len());
    }

    #[tokio::test]
    async fn test_list_store_failure_is_500() {
        let (status, body) = get_json(router(Arc::new(FailingStore)), "/escolas?q=porto").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Erro interno ao buscar escolas.");
    }
}
