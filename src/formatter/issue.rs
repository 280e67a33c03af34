use chrono::{DateTime, Utc};

use crate::types::Issue;

use super::{TextContent, format_relative_time};

/// Maximum number of characters of an issue title shown in a row
const MAX_TITLE_LENGTH: usize = 72;

const COLUMN_GAP: &str = "  ";

/// Render issues as aligned plain-text rows:
/// `#IID  title  (labels)  about N days ago`.
///
/// The IID and title columns are padded to the widest entry; the labels
/// column is left out for issues without labels.
pub fn issue_list_rows(issues: &[Issue], now: DateTime<Utc>) -> TextContent {
    let titles: Vec<String> = issues
        .iter()
        .map(|issue| truncate_title(&issue.title))
        .collect();

    let iid_width = issues
        .iter()
        .map(|issue| issue.iid.to_string().len() + 1)
        .max()
        .unwrap_or(0);
    let title_width = titles.iter().map(|t| t.chars().count()).max().unwrap_or(0);

    let mut content = String::new();
    for (issue, title) in issues.iter().zip(&titles) {
        let mut columns = vec![
            format!("{:<iid_width$}", format!("#{}", issue.iid)),
            format!("{:<title_width$}", title),
        ];
        if !issue.labels.is_empty() {
            columns.push(format!("({})", issue.labels.join(", ")));
        }
        columns.push(format_relative_time(issue.created_at, now));

        content.push_str(&columns.join(COLUMN_GAP));
        content.push('\n');
    }

    TextContent(content)
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() > MAX_TITLE_LENGTH {
        let truncated: String = title.chars().take(MAX_TITLE_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        title.to_string()
    }
}
