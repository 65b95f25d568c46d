//! Prompt construction

/// System instruction for every completion
pub const SYSTEM_PROMPT: &str = "You are a helpful support assistant.";

/// Build the user prompt for an issue.
///
/// `issue` must already be sanitized; it is embedded verbatim. Links are
/// listed one per line, and the section is left empty when there are none.
pub fn build_prompt(issue: &str, links: &[String]) -> String {
    format!(
        "You are a support agent specialized in Azure Data Factory and Fabric Data Factory. \
A user has reported the following issue:\n\
\n\
'{issue}'\n\
\n\
You searched the internet and found these resources:\n\
{links}\n\
\n\
Please generate a clean, easy-to-understand explanation of the issue and suggest a resolution. \
If possible, refer to any useful links.\n",
        issue = issue,
        links = links.join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_issue_verbatim() {
        let issue = "Copy activity fails: ErrorCode=2200, user [REDACTED-EMAIL]";
        let prompt = build_prompt(issue, &[]);

        assert!(prompt.contains(&format!("'{}'", issue)));
        assert!(prompt.contains("Azure Data Factory"));
    }

    #[test]
    fn test_links_one_per_line() {
        let links = vec![
            "https://learn.microsoft.com/a".to_string(),
            "https://stackoverflow.com/b".to_string(),
        ];
        let prompt = build_prompt("issue", &links);

        assert!(prompt.contains(
            "found these resources:\nhttps://learn.microsoft.com/a\nhttps://stackoverflow.com/b\n\nPlease"
        ));
    }

    #[test]
    fn test_empty_link_section() {
        let prompt = build_prompt("issue", &[]);
        assert!(prompt.contains("found these resources:\n\n\nPlease"));
    }
}
