//! Plain-text and JSON rendering of a [`TodoSnapshot`].

use crate::types::{TodoItem, TodoSnapshot, TodoStats};

/// Shown instead of the list when there is nothing in it
pub const EMPTY_MESSAGE: &str = "No todos yet. Add one to get started!";

/// One line per item: `[ ] #1 Buy milk` or `[x] #1 Buy milk`
#[must_use]
pub fn render_item(item: &TodoItem) -> String {
    let mark = if item.completed { 'x' } else { ' ' };
    format!("[{mark}] {} {}", item.id, item.text)
}

/// Footer line with the three counts
#[must_use]
pub fn render_stats(stats: &TodoStats) -> String {
    format!(
        "Total: {}  Completed: {}  Active: {}",
        stats.total, stats.completed, stats.active
    )
}

/// Full listing
///
/// An empty list renders as [`EMPTY_MESSAGE`] alone, without a footer.
#[must_use]
pub fn render(snapshot: &TodoSnapshot) -> Vec<String> {
    if snapshot.items.is_empty() {
        return vec![EMPTY_MESSAGE.to_string()];
    }

    let mut lines: Vec<String> = snapshot.items.iter().map(render_item).collect();
    lines.push(String::new());
    lines.push(render_stats(&snapshot.stats));
    lines
}

/// Pretty-printed JSON
///
/// # Errors
///
/// Returns the serializer error, which cannot happen for well-formed snapshots.
pub fn render_json(snapshot: &TodoSnapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TodoStore;
    use crate::types::TodoId;

    #[test]
    fn empty_list_shows_message_only() {
        assert_eq!(render(&TodoSnapshot::default()), vec![EMPTY_MESSAGE]);
    }

    #[test]
    fn items_then_footer() {
        let mut store = TodoStore::new();
        store.add("Walk the dog");
        store.add("Read a book");
        store.toggle(TodoId::new(1));

        assert_eq!(
            render(&store.snapshot()),
            vec![
                "[ ] #2 Read a book",
                "[x] #1 Walk the dog",
                "",
                "Total: 2  Completed: 1  Active: 1",
            ]
        );
    }

    #[test]
    fn json_round_trips() {
        let mut store = TodoStore::new();
        store.add("Buy milk");
        let snapshot = store.snapshot();

        let json = render_json(&snapshot).unwrap_or_default();
        let parsed: TodoSnapshot = serde_json::from_str(&json).unwrap_or_default();

        assert_eq!(parsed, snapshot);
    }
}
