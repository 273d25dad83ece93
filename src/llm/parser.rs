//! Response cleanup for LLM output.
//!
//! The synthesizer prompt asks for bare SQL, but models still wrap queries
//! in markdown fences now and then. This module removes those markers.

/// Strips markdown code fences from an LLM-generated SQL response.
///
/// Removes every ```sql and ``` marker, then trims surrounding whitespace.
/// Responses without fences pass through with only the trim applied.
pub fn strip_sql_fences(response: &str) -> String {
    response
        .trim()
        .replace("```sql", "")
        .replace("```", "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fenced_query() {
        let response = "```sql\nSELECT COUNT(*) FROM inekler;\n```";
        assert_eq!(strip_sql_fences(response), "SELECT COUNT(*) FROM inekler;");
    }

    #[test]
    fn test_strip_bare_fences() {
        let response = "```\nSELECT * FROM sut;\n```";
        assert_eq!(strip_sql_fences(response), "SELECT * FROM sut;");
    }

    #[test]
    fn test_no_fences_passthrough() {
        let response = "SELECT gunluk_sagim FROM sut WHERE inek_id = 1;";
        assert_eq!(
            strip_sql_fences(response),
            "SELECT gunluk_sagim FROM sut WHERE inek_id = 1;"
        );
    }

    #[test]
    fn test_trims_whitespace() {
        let response = "  \n  SELECT 1;  \n  ";
        assert_eq!(strip_sql_fences(response), "SELECT 1;");
    }

    #[test]
    fn test_multiline_query_preserved() {
        let response = "```sql\nSELECT s.gunluk_sagim\nFROM sut s\nJOIN inekler i ON s.inek_id = i.inek_id;\n```";
        let cleaned = strip_sql_fences(response);
        assert!(cleaned.starts_with("SELECT s.gunluk_sagim"));
        assert!(cleaned.ends_with("i.inek_id;"));
        assert!(!cleaned.contains("```"));
    }
}
