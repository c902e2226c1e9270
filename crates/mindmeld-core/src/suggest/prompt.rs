//! Suggestion prompt construction.

use mindmeld_types::idea::Idea;

/// How many complementary ideas a suggestion request asks for.
pub const SUGGESTION_COUNT: usize = 3;

/// Build the natural-language prompt enumerating the current ideas.
pub fn build_prompt(ideas: &[Idea]) -> String {
    let mut prompt = String::from("Here are the current ideas:\n");
    if ideas.is_empty() {
        prompt.push_str("(the board is empty)\n");
    } else {
        for idea in ideas {
            prompt.push_str("- ");
            prompt.push_str(&idea.text);
            prompt.push('\n');
        }
    }
    prompt.push_str(&format!(
        "\nSuggest {SUGGESTION_COUNT} complementary or original ideas related to these, one per line."
    ));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_enumerates_ideas_in_order() {
        let ideas = vec![Idea::new("first"), Idea::new("second")];
        let prompt = build_prompt(&ideas);
        let first = prompt.find("- first").unwrap();
        let second = prompt.find("- second").unwrap();
        assert!(first < second);
        assert!(prompt.contains("Suggest 3"));
    }

    #[test]
    fn test_prompt_on_empty_board() {
        let prompt = build_prompt(&[]);
        assert!(prompt.contains("(the board is empty)"));
        assert!(prompt.contains("Suggest 3"));
    }
}
