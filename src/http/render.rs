use crate::core::{group_by_row, Lot, LotDetail};
use std::fmt::Write;

const STYLE: &str = "body{font-family:sans-serif;margin:2rem}\
.row{display:flex;gap:.5rem;margin:.5rem 0}\
.space{padding:.5rem .75rem;border-radius:4px;color:#fff}\
.free{background:#2e7d32}.occupied{background:#c62828}\
nav a{margin-right:1rem}";

pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{}</title>\
<style>{STYLE}</style></head><body>{body}</body></html>",
        escape_html(title)
    )
}

pub fn dashboard_page(lots: &[Lot]) -> String {
    let mut list = String::new();
    for lot in lots {
        let _ = write!(
            list,
            "<li><a href=\"/parking/{id}/\">{name}</a> - \
{free} free, {occupied} occupied of {total}</li>",
            id = lot.id,
            name = escape_html(&lot.name),
            free = lot.free_spaces,
            occupied = lot.occupied_spaces(),
            total = lot.total_spaces,
        );
    }
    if list.is_empty() {
        list.push_str("<li>No active parking lots.</li>");
    }

    page(
        "Parking lots",
        &format!("<h1>Parking lots</h1><ul class=\"lots\">{list}</ul>"),
    )
}

pub fn detail_page(detail: &LotDetail) -> String {
    let lot = &detail.lot;
    let mut body = format!(
        "<h1>{name}</h1><p>{free} free of {total} spaces</p>",
        name = escape_html(&lot.name),
        free = lot.free_spaces,
        total = lot.total_spaces,
    );

    let rows = group_by_row(&detail.spaces);
    if rows.is_empty() {
        body.push_str("<p>No spaces recorded for this lot.</p>");
    }
    for row in rows {
        let _ = write!(
            body,
            "<div class=\"row\" data-row=\"{number}\">\
<span class=\"label\">Row {number} ({free} free)</span>",
            number = row.row,
            free = row.free_count(),
        );
        for space in row.spaces {
            let _ = write!(
                body,
                "<span class=\"space {status}\" title=\"{status}\">{number}</span>",
                status = space.status,
                number = escape_html(&space.space_number),
            );
        }
        body.push_str("</div>");
    }

    body.push_str("<nav>");
    if let Some(prev) = &detail.prev {
        let _ = write!(body, "<a class=\"prev\" href=\"/parking/{}/\">Last</a>", prev.id);
    }
    body.push_str("<a href=\"/\">All lots</a>");
    if let Some(next) = &detail.next {
        let _ = write!(body, "<a class=\"next\" href=\"/parking/{}/\">Next</a>", next.id);
    }
    body.push_str("</nav>");

    page(&lot.name, &body)
}

pub fn not_found_page(message: &str) -> String {
    page(
        "Not found",
        &format!("<h1>Not found</h1><p>{}</p><a href=\"/\">All lots</a>", escape_html(message)),
    )
}

pub fn error_page(message: &str) -> String {
    page(
        "Server error",
        &format!("<h1>Server error</h1><p>{}</p>", escape_html(message)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Space, SpaceStatus};
    use chrono::Utc;

    fn lot(id: i64, name: &str) -> Lot {
        Lot {
            id,
            name: name.to_string(),
            total_spaces: 3,
            free_spaces: 2,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn space(number: &str, status: SpaceStatus, row: i64) -> Space {
        Space {
            id: 0,
            lot_id: 2,
            space_number: number.to_string(),
            status,
            row,
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;"
        );
    }

    #[test]
    fn dashboard_links_each_lot() {
        let html = dashboard_page(&[lot(1, "North"), lot(4, "<South>")]);
        assert!(html.contains("href=\"/parking/1/\">North</a>"));
        assert!(html.contains("2 free, 1 occupied of 3"));
        assert!(html.contains("&lt;South&gt;"));
        assert!(!html.contains("<South>"));
        assert!(dashboard_page(&[]).contains("No active parking lots."));
    }

    #[test]
    fn detail_renders_rows_and_navigation() {
        let detail = LotDetail {
            lot: lot(2, "Middle"),
            spaces: vec![
                space("A1", SpaceStatus::Free, 1),
                space("A2", SpaceStatus::Occupied, 1),
                space("B1", SpaceStatus::Free, 2),
            ],
            prev: Some(lot(1, "First")),
            next: None,
        };
        let html = detail_page(&detail);

        assert_eq!(html.matches("class=\"row\"").count(), 2);
        assert!(html.contains("Row 1 (1 free)"));
        assert!(html.contains("Row 2 (1 free)"));
        assert!(html.contains("<span class=\"space occupied\" title=\"occupied\">A2</span>"));
        assert!(html.contains("href=\"/parking/1/\">Last</a>"));
        assert!(!html.contains("class=\"next\""));
    }
}
