//! Prompt template for differentiated task generation.

use tierforge_common::YearGroup;

/// Build the instructional prompt for a lesson topic and year group.
///
/// The caller validates the topic first; interpolated values are passed
/// through as-is since the upstream API takes plain text.
pub fn build_prompt(topic: &str, year_group: YearGroup) -> String {
    format!(
        r#"You are an experienced UK secondary English teacher.

Create differentiated GCSE English tasks for:
Lesson topic: "{topic}"
Year group: {year}

Produce:
1. SUPPORT task (simplified, scaffolded)
2. CORE task (standard GCSE expectation)
3. CHALLENGE task (stretch, evaluation, judgement)

Rules:
- Use clear bullet points
- Student-friendly language
- GCSE-style wording
- No mark schemes
- No exam board references

Return the output clearly labelled as:
SUPPORT:
CORE:
CHALLENGE:
"#,
        topic = topic,
        year = year_group.as_str(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolates_topic_and_year() {
        let prompt = build_prompt("How does Shakespeare present ambition?", YearGroup::Year10);
        assert!(prompt.contains("Lesson topic: \"How does Shakespeare present ambition?\""));
        assert!(prompt.contains("Year group: 10"));
    }

    #[test]
    fn test_requests_all_three_labels() {
        let prompt = build_prompt("war poetry", YearGroup::Year9);
        assert!(prompt.contains("SUPPORT:"));
        assert!(prompt.contains("CORE:"));
        assert!(prompt.contains("CHALLENGE:"));
        assert!(prompt.contains("No mark schemes"));
    }
}
