//! Read theme values by key path, the way the rendering layer addresses them.

use serde_json::Value;

use super::types::Theme;

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

/// Parse `a.b[0][1]` into segments. Every dotted part needs a key.
fn parse_path(path: &str) -> Option<Vec<Segment<'_>>> {
    let mut segments = Vec::new();

    for part in path.split('.') {
        let (key, mut rest) = match part.find('[') {
            Some(i) => part.split_at(i),
            None => (part, ""),
        };
        if key.is_empty() {
            return None;
        }
        segments.push(Segment::Key(key));

        while !rest.is_empty() {
            let inner = rest.strip_prefix('[')?;
            let close = inner.find(']')?;
            segments.push(Segment::Index(inner[..close].parse().ok()?));
            rest = &inner[close + 1..];
        }
    }

    Some(segments)
}

impl Theme {
    /// Look up a value such as `accent`, `colorway[0]` or
    /// `border_style.borderWidth`. Keys use their serialized names.
    pub fn lookup(&self, path: &str) -> Option<Value> {
        let segments = parse_path(path)?;
        let mut current = serde_json::to_value(self).ok()?;

        for segment in segments {
            current = match (segment, current) {
                (Segment::Key(key), Value::Object(mut map)) => map.remove(key)?,
                (Segment::Index(i), Value::Array(mut items)) if i < items.len() => {
                    items.swap_remove(i)
                }
                _ => return None,
            };
        }

        Some(current)
    }

    /// Top-level keys in serialization order.
    pub fn keys(&self) -> Vec<String> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }
}
