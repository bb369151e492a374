use std::io::{self, Write};

use fleet_core::ListViewModel;

use crate::vehicle::VehicleRow;

pub fn print_page(out: &mut impl Write, view: &ListViewModel<VehicleRow>) -> io::Result<()> {
    let total = view
        .meta
        .and_then(|meta| meta.total_count)
        .map(|total| format!(" of {total}"))
        .unwrap_or_default();
    let last_page = view
        .meta
        .and_then(|meta| meta.last_page)
        .map(|last| format!("/{last}"))
        .unwrap_or_default();
    writeln!(
        out,
        "Page {}{} ({} vehicles{})",
        view.page,
        last_page,
        view.items.len(),
        total
    )?;

    writeln!(
        out,
        "{:<10} {:<12} {:<12} {:<14} {:>5}  {}",
        "ID", "PLATE", "BRAND", "MODEL", "SEATS", "STATUS"
    )?;
    for row in &view.items {
        writeln!(
            out,
            "{:<10} {:<12} {:<12} {:<14} {:>5}  {}",
            row.id,
            row.plate.as_deref().unwrap_or("-"),
            row.brand.as_deref().unwrap_or("-"),
            row.model.as_deref().unwrap_or("-"),
            row.seats.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
            match row.available {
                Some(true) => "available",
                Some(false) => "unavailable",
                None => "unknown",
            }
        )?;
    }

    if view.dropped_records > 0 {
        writeln!(out, "({} malformed records skipped)", view.dropped_records)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use fleet_core::{ListPhase, ListViewModel, PageMeta};

    use super::print_page;
    use crate::vehicle::VehicleRow;

    #[test]
    fn prints_header_rows_and_skipped_count() {
        let view = ListViewModel {
            items: vec![VehicleRow {
                id: "7".to_string(),
                plate: Some("XY-1".to_string()),
                brand: Some("Kia".to_string()),
                model: None,
                seats: Some(4),
                available: Some(false),
            }],
            page: 2,
            limit: 10,
            has_next: true,
            meta: Some(PageMeta {
                current_page: 2,
                last_page: Some(3),
                total_count: Some(21),
            }),
            loading: false,
            error: None,
            phase: ListPhase::Loaded,
            dropped_records: 1,
        };

        let mut out = Vec::new();
        print_page(&mut out, &view).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Page 2/3 (1 vehicles of 21)");
        assert!(lines[1].starts_with("ID"));
        assert!(lines[2].starts_with("7 "));
        assert!(lines[2].contains("Kia"));
        assert!(lines[2].ends_with("unavailable"));
        assert_eq!(lines[3], "(1 malformed records skipped)");
    }
}
