//! Schema-agnostic adapters for heterogeneous upstream JSON.
//!
//! Chat-log exports and vector-store dumps arrive in arbitrary shapes.
//! This module reduces them to the canonical request fields with a
//! recursive visitor over `serde_json::Value`: a prioritized list of
//! recognized content keys, and a skip-list for metadata keys that never
//! hold display text. It lives entirely outside the scoring core — the
//! engine only ever sees the canonical shape.

use serde_json::Value;

/// Object keys that hold passage text, checked in priority order.
const CONTENT_KEYS: &[&str] = &[
    "text",
    "content",
    "page_content",
    "passage",
    "chunk",
    "body",
    "snippet",
];

/// Object keys that never hold passage text and are not worth visiting.
const SKIP_KEYS: &[&str] = &[
    "embedding",
    "embeddings",
    "vector",
    "vectors",
    "metadata",
    "id",
    "ids",
    "score",
    "scores",
    "distance",
    "index",
    "model",
    "usage",
    "created_at",
    "updated_at",
];

/// Extract context passages from an arbitrarily shaped JSON export.
///
/// Strings are taken as-is; arrays are visited in order; objects yield
/// the first recognized content key if one exists, otherwise every
/// non-skipped value is visited. Duplicate passages are dropped, order
/// of first occurrence is preserved.
pub fn extract_passages(value: &Value) -> Vec<String> {
    let mut passages = Vec::new();
    visit(value, &mut passages);
    passages
}

fn visit(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if !trimmed.is_empty() && !out.iter().any(|p| p == trimmed) {
                out.push(trimmed.to_string());
            }
        }
        Value::Array(items) => {
            for item in items {
                visit(item, out);
            }
        }
        Value::Object(map) => {
            for key in CONTENT_KEYS {
                if let Some(inner) = map.get(*key) {
                    visit(inner, out);
                    return;
                }
            }
            for (key, inner) in map {
                if !SKIP_KEYS.contains(&key.as_str()) {
                    visit(inner, out);
                }
            }
        }
        _ => {}
    }
}

/// How to reduce a multi-turn chat log to a single `(query, response)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatStrategy {
    /// The last assistant message and the closest user message before it.
    #[default]
    LastExchange,
    /// All user turns concatenated as the query, all assistant turns
    /// concatenated as the response.
    FullHistory,
}

impl ChatStrategy {
    /// Parse strategy from string (case-insensitive, accepts hyphens/underscores).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "last_exchange" | "last" => Some(Self::LastExchange),
            "full_history" | "full" | "history" => Some(Self::FullHistory),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChatStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LastExchange => write!(f, "last_exchange"),
            Self::FullHistory => write!(f, "full_history"),
        }
    }
}

/// A reduced chat exchange in canonical shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub query: String,
    pub response: String,
}

/// Reduce a chat-log export to one `(query, response)` pair.
///
/// Recognizes a top-level message array or a `messages`/`conversation`/
/// `history` field; each message needs a `role` and textual content.
/// Returns `None` when no user/assistant pair can be found.
pub fn extract_exchange(value: &Value, strategy: ChatStrategy) -> Option<Exchange> {
    let messages = find_messages(value)?;

    let mut turns: Vec<(Role, String)> = Vec::new();
    for message in messages {
        let Some(role) = message.get("role").and_then(Value::as_str).and_then(Role::parse)
        else {
            continue;
        };
        let text = message_text(message);
        if !text.is_empty() {
            turns.push((role, text));
        }
    }

    match strategy {
        ChatStrategy::LastExchange => {
            let (answer_idx, response) = turns
                .iter()
                .enumerate()
                .rev()
                .find(|(_, (role, _))| *role == Role::Assistant)
                .map(|(i, (_, text))| (i, text.clone()))?;
            let query = turns[..answer_idx]
                .iter()
                .rev()
                .find(|(role, _)| *role == Role::User)
                .map(|(_, text)| text.clone())?;
            Some(Exchange { query, response })
        }
        ChatStrategy::FullHistory => {
            let query = join_role(&turns, Role::User);
            let response = join_role(&turns, Role::Assistant);
            if query.is_empty() || response.is_empty() {
                return None;
            }
            Some(Exchange { query, response })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    User,
    Assistant,
}

impl Role {
    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" | "human" => Some(Self::User),
            "assistant" | "ai" | "bot" | "model" => Some(Self::Assistant),
            _ => None,
        }
    }
}

fn find_messages(value: &Value) -> Option<&Vec<Value>> {
    if let Value::Array(items) = value {
        return Some(items);
    }
    if let Value::Object(map) = value {
        for key in ["messages", "conversation", "history", "turns"] {
            if let Some(Value::Array(items)) = map.get(key) {
                return Some(items);
            }
        }
    }
    None
}

/// Textual content of one message: a plain string, or nested content
/// blocks reduced through the passage visitor.
fn message_text(message: &Value) -> String {
    match message.get("content").or_else(|| message.get("text")) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => extract_passages(other).join(" "),
        None => String::new(),
    }
}

fn join_role(turns: &[(Role, String)], role: Role) -> String {
    turns
        .iter()
        .filter(|(r, _)| *r == role)
        .map(|(_, text)| text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_passages_plain_array() {
        let value = json!({"context": ["first passage", "second passage"]});
        assert_eq!(
            extract_passages(&value),
            vec!["first passage", "second passage"]
        );
    }

    #[test]
    fn test_extract_passages_single_string() {
        let value = json!({"context": "only passage"});
        assert_eq!(extract_passages(&value), vec!["only passage"]);
    }

    #[test]
    fn test_extract_passages_vector_store_export() {
        let value = json!({
            "data": {
                "vector_data": [
                    {"id": "a", "embedding": [0.1, 0.2], "text": "France is in Europe.", "score": 0.97},
                    {"id": "b", "embedding": [0.3, 0.4], "text": "Paris is its capital.", "score": 0.91}
                ]
            }
        });
        assert_eq!(
            extract_passages(&value),
            vec!["France is in Europe.", "Paris is its capital."]
        );
    }

    #[test]
    fn test_extract_passages_skips_metadata() {
        let value = json!({
            "metadata": {"note": "should never surface"},
            "id": "ignored",
            "passage": "the real text"
        });
        assert_eq!(extract_passages(&value), vec!["the real text"]);
    }

    #[test]
    fn test_extract_passages_content_key_priority() {
        // "text" outranks "body"; only the winning key is visited
        let value = json!({"body": "secondary", "text": "primary"});
        assert_eq!(extract_passages(&value), vec!["primary"]);
    }

    #[test]
    fn test_extract_passages_dedupes_and_trims() {
        let value = json!(["  spaced  ", "spaced", "", "other"]);
        assert_eq!(extract_passages(&value), vec!["spaced", "other"]);
    }

    #[test]
    fn test_extract_passages_ignores_scalars() {
        let value = json!({"rows": [1, 2.5, true, null]});
        assert!(extract_passages(&value).is_empty());
    }

    #[test]
    fn test_chat_strategy_parse() {
        assert_eq!(
            ChatStrategy::from_str_loose("last-exchange"),
            Some(ChatStrategy::LastExchange)
        );
        assert_eq!(
            ChatStrategy::from_str_loose("FULL"),
            Some(ChatStrategy::FullHistory)
        );
        assert_eq!(ChatStrategy::from_str_loose("invalid"), None);
    }

    #[test]
    fn test_chat_strategy_display() {
        assert_eq!(ChatStrategy::LastExchange.to_string(), "last_exchange");
        assert_eq!(ChatStrategy::FullHistory.to_string(), "full_history");
    }

    fn chat_log() -> Value {
        json!({
            "messages": [
                {"role": "user", "content": "Hi there"},
                {"role": "assistant", "content": "Hello! How can I help?"},
                {"role": "user", "content": "What is the capital of France?"},
                {"role": "assistant", "content": "The capital of France is Paris."}
            ]
        })
    }

    #[test]
    fn test_extract_exchange_last() {
        let exchange = extract_exchange(&chat_log(), ChatStrategy::LastExchange).unwrap();
        assert_eq!(exchange.query, "What is the capital of France?");
        assert_eq!(exchange.response, "The capital of France is Paris.");
    }

    #[test]
    fn test_extract_exchange_full_history() {
        let exchange = extract_exchange(&chat_log(), ChatStrategy::FullHistory).unwrap();
        assert_eq!(exchange.query, "Hi there\nWhat is the capital of France?");
        assert_eq!(
            exchange.response,
            "Hello! How can I help?\nThe capital of France is Paris."
        );
    }

    #[test]
    fn test_extract_exchange_top_level_array() {
        let value = json!([
            {"role": "human", "text": "ping"},
            {"role": "ai", "text": "pong"}
        ]);
        let exchange = extract_exchange(&value, ChatStrategy::LastExchange).unwrap();
        assert_eq!(exchange.query, "ping");
        assert_eq!(exchange.response, "pong");
    }

    #[test]
    fn test_extract_exchange_nested_content_blocks() {
        let value = json!({
            "messages": [
                {"role": "user", "content": [{"type": "text", "text": "block question"}]},
                {"role": "assistant", "content": [{"type": "text", "text": "block answer"}]}
            ]
        });
        let exchange = extract_exchange(&value, ChatStrategy::LastExchange).unwrap();
        assert_eq!(exchange.query, "block question");
        assert_eq!(exchange.response, "block answer");
    }

    #[test]
    fn test_extract_exchange_missing_pair() {
        let only_user = json!({"messages": [{"role": "user", "content": "no answer"}]});
        assert!(extract_exchange(&only_user, ChatStrategy::LastExchange).is_none());
        assert!(extract_exchange(&only_user, ChatStrategy::FullHistory).is_none());

        let unknown = json!({"something": "else"});
        assert!(extract_exchange(&unknown, ChatStrategy::LastExchange).is_none());
    }

    #[test]
    fn test_extract_exchange_skips_system_turns() {
        let value = json!({
            "messages": [
                {"role": "system", "content": "you are helpful"},
                {"role": "user", "content": "question"},
                {"role": "assistant", "content": "answer"}
            ]
        });
        let exchange = extract_exchange(&value, ChatStrategy::LastExchange).unwrap();
        assert_eq!(exchange.query, "question");
        assert_eq!(exchange.response, "answer");
    }
}
