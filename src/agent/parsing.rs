use serde::Deserialize;
use serde_json::Value;

use super::prompt::{FINAL_ANSWER_ACTION, WEB_SEARCH_TOOL};

const FINAL_ANSWER_MARKER: &str = "Final Answer:";

/// What the model asked for in one reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AgentStep {
    Final(String),
    Search(String),
    UnknownTool(String),
    Unparseable(String),
}

#[derive(Debug, Deserialize)]
struct ActionBlob {
    action: String,
    #[serde(default)]
    action_input: Value,
}

pub(crate) fn parse_step(reply: &str) -> AgentStep {
    let blob = extract_json_object(reply)
        .ok_or_else(|| "reply did not contain a JSON blob".to_string())
        .and_then(|json| {
            serde_json::from_str::<ActionBlob>(&json)
                .map_err(|err| format!("JSON blob is not an action: {err}"))
        });

    match blob {
        Ok(blob) => {
            let action = blob.action.trim();
            let input = input_text(blob.action_input);
            if action.eq_ignore_ascii_case(FINAL_ANSWER_ACTION) {
                AgentStep::Final(input)
            } else if action == WEB_SEARCH_TOOL {
                AgentStep::Search(input)
            } else {
                AgentStep::UnknownTool(action.to_string())
            }
        }
        Err(reason) => match reply.find(FINAL_ANSWER_MARKER) {
            Some(idx) => {
                AgentStep::Final(reply[idx + FINAL_ANSWER_MARKER.len()..].trim().to_string())
            }
            None => AgentStep::Unparseable(reason),
        },
    }
}

/// Tool input may arrive as a bare string or as `{"query": "..."}`.
fn input_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Object(map) => match map.get("query") {
            Some(Value::String(query)) => query.clone(),
            _ => Value::Object(map).to_string(),
        },
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// First balanced `{...}` in `input`, ignoring `<think>` blocks and braces inside strings.
pub(crate) fn extract_json_object(input: &str) -> Option<String> {
    let mut cleaned = input.to_string();

    while let Some(think_start) = cleaned.find("<think>") {
        if let Some(think_end_pos) = cleaned[think_start..].find("</think>") {
            let absolute_end = think_start + think_end_pos + "</think>".len();
            cleaned.replace_range(think_start..absolute_end, "");
        } else {
            cleaned.replace_range(think_start.., "");
            break;
        }
    }

    let trimmed = cleaned.trim();
    let start = trimmed.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut end = None;
    for (idx, ch) in trimmed[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    end = Some(start + idx);
                    break;
                }
            }
            _ => {}
        }
    }

    let end = end?;
    Some(trimmed[start..=end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_answer_blob_inside_code_fence() {
        let reply = "Thought: I know this.\n```json\n{\"action\": \"Final Answer\", \"action_input\": \"| Mode | Time |\"}\n```";
        assert_eq!(parse_step(reply), AgentStep::Final("| Mode | Time |".into()));
    }

    #[test]
    fn search_accepts_string_or_query_object() {
        assert_eq!(
            parse_step(r#"{"action": "web_search", "action_input": "trains Delhi to Jaipur"}"#),
            AgentStep::Search("trains Delhi to Jaipur".into())
        );
        assert_eq!(
            parse_step(r#"{"action": "web_search", "action_input": {"query": "Jaipur festivals"}}"#),
            AgentStep::Search("Jaipur festivals".into())
        );
    }

    #[test]
    fn unknown_tool_is_named() {
        assert_eq!(
            parse_step(r#"{"action": "calculator", "action_input": "2+2"}"#),
            AgentStep::UnknownTool("calculator".into())
        );
    }

    #[test]
    fn marker_fallback_without_json() {
        assert_eq!(
            parse_step("Thought: done\nFinal Answer: Pack light layers."),
            AgentStep::Final("Pack light layers.".into())
        );
    }

    #[test]
    fn prose_without_marker_is_unparseable() {
        assert!(matches!(
            parse_step("I should probably search for this."),
            AgentStep::Unparseable(_)
        ));
        assert!(matches!(
            parse_step(r#"{"tool": "web_search"}"#),
            AgentStep::Unparseable(_)
        ));
    }

    #[test]
    fn extract_skips_think_blocks_and_string_braces() {
        let input = "<think>{not this}</think> {\"action\": \"Final Answer\", \"action_input\": \"use {braces} freely\"} trailing";
        assert_eq!(
            extract_json_object(input).unwrap(),
            "{\"action\": \"Final Answer\", \"action_input\": \"use {braces} freely\"}"
        );
        assert_eq!(extract_json_object("{\"unterminated\": 1"), None);
    }
}
