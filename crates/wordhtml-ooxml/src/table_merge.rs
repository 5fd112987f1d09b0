//! Vertical merge resolution for tables
//!
//! Word marks a vertically merged cell by repeating a `w:vMerge` marker in
//! every row it covers. Here those continuation cells are removed and the
//! cell they continue gets a rowspan instead.

use std::collections::{HashMap, HashSet};

use wordhtml_ast::{DocumentElement, TableCell, TableRow};

use crate::read_result::{into_elements, BodyNode, ReadResult};

const NON_ROW_WARNING: &str = "unexpected non-row element in table, cell merging may be incorrect";
const NON_CELL_WARNING: &str =
    "unexpected non-cell element in table row, cell merging may be incorrect";

/// (row index, cell index)
type Position = (usize, usize);

/// Turn the unmerged rows of one table into final rows
///
/// Malformed input is passed through unmerged with a warning.
pub(crate) fn calculate_rowspans(rows: Vec<BodyNode>) -> ReadResult {
    if let Some(warning) = check_table_rows(&rows) {
        return ReadResult::with_warning(
            into_elements(rows).into_iter().map(BodyNode::from).collect(),
            warning,
        );
    }

    let mut rowspans: HashMap<Position, u32> = HashMap::new();
    let mut merged: HashSet<Position> = HashSet::new();
    let mut last_cell_for_column: HashMap<u32, Position> = HashMap::new();

    for (row_index, row) in rows.iter().enumerate() {
        let mut column_index = 0u32;
        for (cell_index, (vmerge, colspan)) in cell_spans(row).enumerate() {
            let position = (row_index, cell_index);
            match last_cell_for_column.get(&column_index) {
                Some(spanning) if vmerge => {
                    *rowspans.entry(*spanning).or_insert(1) += 1;
                    merged.insert(position);
                }
                _ => {
                    last_cell_for_column.insert(column_index, position);
                    rowspans.insert(position, 1);
                }
            }
            column_index = column_index.saturating_add(colspan);
        }
    }

    let resolved = rows
        .into_iter()
        .enumerate()
        .map(|(row_index, row)| {
            let (cells, is_header) = match row {
                BodyNode::UnmergedRow { cells, is_header } => (cells, is_header),
                other => return other,
            };
            let children = cells
                .into_iter()
                .enumerate()
                .filter(|(cell_index, _)| !merged.contains(&(row_index, *cell_index)))
                .filter_map(|(cell_index, cell)| match cell {
                    BodyNode::UnmergedCell {
                        colspan, children, ..
                    } => Some(DocumentElement::TableCell(TableCell {
                        rowspan: rowspans.get(&(row_index, cell_index)).copied().unwrap_or(1),
                        colspan,
                        children: into_elements(children),
                    })),
                    _ => None,
                })
                .collect();
            BodyNode::Element(DocumentElement::TableRow(TableRow {
                children,
                is_header,
            }))
        })
        .collect();

    ReadResult::success_all(resolved)
}

/// (vmerge, colspan) of each cell in a checked row
fn cell_spans(row: &BodyNode) -> impl Iterator<Item = (bool, u32)> + '_ {
    let cells: &[BodyNode] = match row {
        BodyNode::UnmergedRow { cells, .. } => cells,
        _ => &[],
    };
    cells.iter().filter_map(|cell| match cell {
        BodyNode::UnmergedCell {
            vmerge, colspan, ..
        } => Some((*vmerge, *colspan)),
        _ => None,
    })
}

/// Rows resolved by an earlier pass are accepted as they are
fn check_table_rows(rows: &[BodyNode]) -> Option<&'static str> {
    for row in rows {
        let cells = match row {
            BodyNode::UnmergedRow { cells, .. } => cells,
            BodyNode::Element(DocumentElement::TableRow(_)) => continue,
            _ => return Some(NON_ROW_WARNING),
        };
        if cells
            .iter()
            .any(|cell| !matches!(cell, BodyNode::UnmergedCell { .. }))
        {
            return Some(NON_CELL_WARNING);
        }
    }
    None
}
