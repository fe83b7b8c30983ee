//! Translation of LangGraph stream payloads into turn events
//!
//! `updates` frames carry `{node_name: state_update}` and become activity
//! steps; `values` frames carry the full graph state, of which only the
//! message list is used.

use scout_domain::{ActivityEvent, EventData, EventDetail, Message, MessageId, Role, TurnEvent};
use serde_json::Value;
use tracing::{debug, warn};

/// Map one SSE event (name and data) to the turn events it produces
pub fn frame_to_events(event: &str, data: &str) -> Vec<TurnEvent> {
    match event {
        "updates" => match parse(event, data) {
            Some(payload) => activities_from_updates(&payload)
                .into_iter()
                .map(TurnEvent::Activity)
                .collect(),
            None => Vec::new(),
        },
        "values" => parse(event, data)
            .and_then(|payload| messages_from_values(&payload))
            .map(|messages| vec![TurnEvent::Messages(messages)])
            .unwrap_or_default(),
        "error" => vec![TurnEvent::Failed(error_text(data))],
        "end" => vec![TurnEvent::Completed],
        other => {
            debug!("Ignoring stream event '{}'", other);
            Vec::new()
        }
    }
}

fn parse(event: &str, data: &str) -> Option<Value> {
    match serde_json::from_str(data) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Malformed '{}' payload: {}", event, e);
            None
        }
    }
}

/// Error payloads are usually `{"error": ..., "message": ...}`
fn error_text(data: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(data) else {
        return data.trim().to_string();
    };
    match &value {
        Value::String(s) => s.clone(),
        Value::Object(map) => match (map.get("error"), map.get("message")) {
            (Some(Value::String(kind)), Some(Value::String(msg))) => format!("{kind}: {msg}"),
            (_, Some(Value::String(msg))) => msg.clone(),
            (Some(Value::String(kind)), _) => kind.clone(),
            _ => value.to_string(),
        },
        _ => value.to_string(),
    }
}

/// One activity step per node in an `updates` payload
pub fn activities_from_updates(payload: &Value) -> Vec<ActivityEvent> {
    let Value::Object(nodes) = payload else {
        return Vec::new();
    };
    nodes
        .iter()
        .map(|(node, update)| activity_from_update(node, update))
        .collect()
}

pub fn activity_from_update(node: &str, update: &Value) -> ActivityEvent {
    match node {
        "generate_query" => {
            let queries = update
                .get("search_query")
                .and_then(Value::as_array)
                .map(|items| items.iter().cloned().map(EventDetail::Plain).collect())
                .unwrap_or_default();
            ActivityEvent::new("Generating Search Queries", EventData::Details(queries))
        }
        "web_research" => {
            let links = source_links(update.get("sources_gathered"));
            if links.is_empty() {
                ActivityEvent::text("Web Research", "Gathered 0 sources.")
            } else {
                ActivityEvent::new("Web Research", EventData::Details(links))
            }
        }
        "reflection" => {
            let sufficient = update
                .get("is_sufficient")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let text = if sufficient {
                "Search successful, generating final answer.".to_string()
            } else {
                let queries: Vec<&str> = update
                    .get("follow_up_queries")
                    .and_then(Value::as_array)
                    .map(|items| items.iter().filter_map(Value::as_str).collect())
                    .unwrap_or_default();
                if queries.is_empty() {
                    "Need more information, searching for additional information".to_string()
                } else {
                    format!("Need more information, searching for {}", queries.join(", "))
                }
            };
            ActivityEvent::text("Reflection", text)
        }
        "finalize_answer" => {
            ActivityEvent::text("Finalizing Answer", "Composing and presenting the final answer.")
        }
        other => ActivityEvent::new(other, EventData::from_value(update.clone())),
    }
}

/// `{label, value}` links from `sources_gathered`, first occurrence of each URL
fn source_links(sources: Option<&Value>) -> Vec<EventDetail> {
    let Some(items) = sources.and_then(Value::as_array) else {
        return Vec::new();
    };
    let mut seen: Vec<&str> = Vec::new();
    let mut links = Vec::new();
    for item in items {
        let Some(url) = item.get("value").and_then(Value::as_str) else {
            continue;
        };
        if seen.contains(&url) {
            continue;
        }
        seen.push(url);
        let label = item
            .get("label")
            .and_then(Value::as_str)
            .filter(|l| !l.is_empty())
            .unwrap_or(url);
        links.push(EventDetail::link(label, url));
    }
    links
}

/// Message snapshot from a `values` payload; `None` when it has no messages
pub fn messages_from_values(payload: &Value) -> Option<Vec<Message>> {
    let items = payload.get("messages")?.as_array()?;
    Some(
        items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| message_from_value(index, item))
            .collect(),
    )
}

fn message_from_value(index: usize, item: &Value) -> Option<Message> {
    let role: Role = item.get("type").and_then(Value::as_str)?.parse().ok()?;
    let id = item
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(MessageId::new)
        .unwrap_or_else(|| MessageId::new(format!("msg-{index}")));
    Some(Message::new(id, role, content_text(item.get("content"))))
}

/// Content is either a string or a list of content parts
fn content_text(content: Option<&Value>) -> String {
    match content {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(parts)) => parts
            .iter()
            .filter_map(|part| match part {
                Value::String(s) => Some(s.as_str()),
                other => other.get("text").and_then(Value::as_str),
            })
            .collect::<Vec<_>>()
            .join(""),
        _ => String::new(),
    }
}

/// Request body form of a message
pub fn message_to_value(message: &Message) -> Value {
    serde_json::json!({
        "type": message.role().as_str(),
        "content": message.content(),
        "id": message.id().as_str(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_domain::DetailLine;
    use serde_json::json;

    fn events_for(event: &str, data: Value) -> Vec<TurnEvent> {
        frame_to_events(event, &data.to_string())
    }

    #[test]
    fn test_generate_query_lists_queries() {
        let event = activity_from_update(
            "generate_query",
            &json!({"search_query": ["rust tui", "ratatui widgets"]}),
        );
        assert_eq!(event.title, "Generating Search Queries");
        assert_eq!(
            event.data.detail_lines(),
            vec![
                DetailLine::Text("rust tui".into()),
                DetailLine::Text("ratatui widgets".into())
            ]
        );
    }

    #[test]
    fn test_web_research_deduplicates_sources() {
        let event = activity_from_update(
            "web_research",
            &json!({"sources_gathered": [
                {"label": "Docs", "short_url": "https://s/1", "value": "https://docs.rs"},
                {"label": "Docs again", "short_url": "https://s/2", "value": "https://docs.rs"},
                {"label": "", "short_url": "https://s/3", "value": "https://crates.io"},
            ]}),
        );
        assert_eq!(
            event.data.detail_lines(),
            vec![
                DetailLine::Link {
                    label: "Docs".into(),
                    url: "https://docs.rs".into()
                },
                DetailLine::Link {
                    label: "https://crates.io".into(),
                    url: "https://crates.io".into()
                },
            ]
        );
    }

    #[test]
    fn test_web_research_without_sources() {
        let event = activity_from_update("web_research", &json!({"sources_gathered": []}));
        assert_eq!(event.data, EventData::Text("Gathered 0 sources.".into()));
    }

    #[test]
    fn test_reflection_texts() {
        let done = activity_from_update("reflection", &json!({"is_sufficient": true}));
        assert_eq!(
            done.data,
            EventData::Text("Search successful, generating final answer.".into())
        );

        let more = activity_from_update(
            "reflection",
            &json!({"is_sufficient": false, "follow_up_queries": ["q1", "q2"]}),
        );
        assert_eq!(
            more.data,
            EventData::Text("Need more information, searching for q1, q2".into())
        );
    }

    #[test]
    fn test_unknown_node_keeps_raw_value() {
        let event = activity_from_update("custom_step", &json!({"k": 1}));
        assert_eq!(event.title, "custom_step");
        assert!(event.has_detail());
    }

    #[test]
    fn test_values_snapshot_maps_roles_and_skips_others() {
        let events = events_for(
            "values",
            json!({"messages": [
                {"type": "human", "content": "What is 2+2?", "id": "h1"},
                {"type": "tool", "content": "ignored", "id": "t1"},
                {"type": "ai", "content": [{"type": "text", "text": "The answer "}, "is 4."]},
            ]}),
        );
        let TurnEvent::Messages(messages) = &events[0] else {
            panic!("expected messages, got {:?}", events);
        };
        assert_eq!(messages.len(), 2);
        assert!(messages[0].is_human());
        assert_eq!(messages[1].content(), "The answer is 4.");
        assert_eq!(messages[1].id().as_str(), "msg-2");
    }

    #[test]
    fn test_values_without_messages_yields_nothing() {
        assert!(events_for("values", json!({"search_query": []})).is_empty());
    }

    #[test]
    fn test_updates_frame_with_several_nodes() {
        let events = events_for("updates", json!({"finalize_answer": {"messages": []}}));
        assert_eq!(
            events,
            vec![TurnEvent::Activity(ActivityEvent::text(
                "Finalizing Answer",
                "Composing and presenting the final answer."
            ))]
        );
    }

    #[test]
    fn test_error_and_end_frames() {
        let failed = events_for("error", json!({"error": "ValueError", "message": "no key"}));
        assert_eq!(failed, vec![TurnEvent::Failed("ValueError: no key".into())]);
        assert_eq!(frame_to_events("end", ""), vec![TurnEvent::Completed]);
    }

    #[test]
    fn test_malformed_payload_is_skipped() {
        let events = frame_to_events("updates", "{not json");
        assert!(events.is_empty());
    }

    #[test]
    fn test_message_to_value() {
        let value = message_to_value(&Message::human(MessageId::new("h1"), "hi"));
        assert_eq!(value, json!({"type": "human", "content": "hi", "id": "h1"}));
    }
}
