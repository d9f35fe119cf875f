//! Strips agent scratch-pad traces from raw model output.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

const FINAL_ANSWER_MARKER: &str = "Final Answer:";

static TRACE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:thought|action):[^\n]*")
        .expect("trace line regex must compile")
});

/// Remove `Thought:`/`Action:` lines and apply the `Final Answer:` marker rule.
///
/// Text without any marker is returned untouched.
pub fn clean(raw: &str) -> Cow<'_, str> {
    let stripped = TRACE_LINE.replace_all(raw, "");
    let traces_removed = matches!(stripped, Cow::Owned(_));

    let Some(marker) = stripped.find(FINAL_ANSWER_MARKER) else {
        return if traces_removed {
            Cow::Owned(stripped.trim().to_string())
        } else {
            Cow::Borrowed(raw)
        };
    };

    let before = stripped[..marker].trim();
    if !before.is_empty() {
        return Cow::Owned(before.to_string());
    }

    // Nothing precedes the marker: the answer is whatever follows it.
    let after = &stripped[marker + FINAL_ANSWER_MARKER.len()..];
    Cow::Owned(after.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_traces_and_keeps_final_answer_line() {
        let raw = "Thought: foo\nAction: bar\nFinal Answer: The answer";
        assert_eq!(clean(raw), "The answer");
    }

    #[test]
    fn multi_line_answer_after_marker_is_kept_whole() {
        let raw = "Final Answer: Here you go\n| A |\n| B |\n";
        assert_eq!(clean(raw), "Here you go\n| A |\n| B |");
    }

    #[test]
    fn text_without_markers_is_unchanged() {
        let raw = "| Mode | Cost |\n| ---- | ---- |\n| Metro | ₹40 |\n";
        assert!(matches!(clean(raw), Cow::Borrowed(_)));
        assert_eq!(clean(raw), raw);
    }

    #[test]
    fn content_before_marker_wins() {
        let raw = "| Item | Quantity |\n| Hat | 1 |\nFinal Answer: see above";
        assert_eq!(clean(raw), "| Item | Quantity |\n| Hat | 1 |");
    }

    #[test]
    fn trace_markers_are_case_insensitive_and_may_be_indented() {
        let raw = "  THOUGHT: I should search\naction: web_search\nHere is the plan.";
        assert_eq!(clean(raw), "Here is the plan.");
    }

    #[test]
    fn markers_mid_line_are_left_alone() {
        let raw = "Take action: book early.";
        assert_eq!(clean(raw), raw);
    }
}
