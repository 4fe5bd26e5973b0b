//! The one relevance function.
//!
//! Both the results page and the suggestions dropdown rank with this exact
//! function; keeping it in one place is what keeps the two surfaces
//! agreeing about order.

/// Score a record's fields against a query.
///
/// Per field, case-insensitively: an exact match is worth 100, a prefix
/// match 75, a substring match 50, and otherwise 25 scaled by the fraction
/// of query words the field contains. Field scores are summed without a
/// cap, so a record matching on several fields outranks one matching on a
/// single field.
pub fn relevance_score<S: AsRef<str>>(query: &str, fields: &[S]) -> f64 {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return 0.0;
    }
    let words: Vec<&str> = query.split_whitespace().collect();

    let mut total = 0.0;
    for field in fields {
        let field = field.as_ref().to_lowercase();
        total += if field == query {
            100.0
        } else if field.starts_with(&query) {
            75.0
        } else if field.contains(&query) {
            50.0
        } else {
            let matched = words.iter().filter(|w| field.contains(*w)).count();
            25.0 * matched as f64 / words.len() as f64
        };
    }
    total
}
