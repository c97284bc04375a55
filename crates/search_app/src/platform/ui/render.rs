use search_core::{AppViewModel, Hit};

use super::constants::*;

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::with_capacity(view.hits.len() + 4);

    let heading = match &view.active_key {
        Some(key) => format!(
            "Search: {:?} | Showing: {:?} | Hits: {}",
            view.input_value,
            key,
            view.hits.len()
        ),
        None => format!("Search: {:?}", view.input_value),
    };
    lines.push(heading);

    if let Some(message) = &view.error_message {
        lines.push(format!("Error: {message} (type {CMD_RETRY} to try again)"));
    }

    lines.extend(view.hits.iter().map(format_hit_row));

    if view.is_loading {
        lines.push("Loading ...".to_string());
    }
    if view.can_load_more {
        lines.push(format!("{CMD_MORE} for more, {CMD_DISMISS} <id> to hide a row"));
    }

    lines
}

fn format_hit_row(hit: &Hit) -> String {
    let title = if hit.title.is_empty() {
        "(untitled)"
    } else {
        hit.title.as_str()
    };
    if hit.url.is_empty() {
        format!(
            "[{id}] {title} — {author} | {comments} comments | {score} points",
            id = hit.id,
            author = hit.author,
            comments = hit.comment_count,
            score = hit.score,
        )
    } else {
        format!(
            "[{id}] {title} — {author} | {comments} comments | {score} points | {url}",
            id = hit.id,
            author = hit.author,
            comments = hit.comment_count,
            score = hit.score,
            url = hit.url,
        )
    }
}
