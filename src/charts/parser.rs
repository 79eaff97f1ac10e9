use scraper::{ElementRef, Html, Selector};

use crate::charts::types::GameEntry;
use crate::utils::error::{Result, StatsError};

const TABLE_SELECTOR: &str = "table.common-table";
const ROW_SELECTOR: &str = "tr";
const CELL_SELECTOR: &str = "td";

// 0-based `<td>` positions within a data row.
const NAME_CELL: usize = 1;
const CURRENT_PLAYERS_CELL: usize = 2;
const PEAK_PLAYERS_CELL: usize = 4;

/// Parse one leaderboard page into its game rows.
///
/// Expects a single `table.common-table`; the first `<tr>` is the header
/// and is skipped. `page` and `url` only feed error context so callers
/// can tell which page broke.
pub fn parse_top_page(html: &str, page: usize, url: &str) -> Result<Vec<GameEntry>> {
    let table_selector = selector(TABLE_SELECTOR)?;
    let row_selector = selector(ROW_SELECTOR)?;
    let cell_selector = selector(CELL_SELECTOR)?;

    let document = Html::parse_document(html);
    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| StatsError::ParseError {
            page,
            url: url.to_string(),
            message: format!("no `{}` element found", TABLE_SELECTOR),
        })?;

    let mut entries = Vec::new();
    for (row_index, row) in table.select(&row_selector).skip(1).enumerate() {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        if cells.len() <= PEAK_PLAYERS_CELL {
            return Err(StatsError::ParseError {
                page,
                url: url.to_string(),
                message: format!(
                    "row {} has {} cells, expected at least {}",
                    row_index + 1,
                    cells.len(),
                    PEAK_PLAYERS_CELL + 1
                ),
            });
        }

        entries.push(GameEntry {
            name: cell_text(cells[NAME_CELL]),
            current_players: cell_text(cells[CURRENT_PLAYERS_CELL]),
            peak_players: cell_text(cells[PEAK_PLAYERS_CELL]),
        });
    }

    Ok(entries)
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| StatsError::SelectorError(e.to_string()))
}
