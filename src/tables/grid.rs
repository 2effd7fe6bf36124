//! Cell assignment: turn scanned runs and rulings into tables.

use super::text::{PageScan, Ruling, TextRun};
use super::Table;

/// Rulings closer than this merge into one grid cut.
const CUT_TOLERANCE: f32 = 3.0;
/// Horizontal rulings further apart than this belong to different tables.
const BLOCK_GAP: f32 = 60.0;
/// Baselines closer than this belong to the same visual row.
const ROW_TOLERANCE: f32 = 2.5;
/// Stream mode: rows further apart than this end the current table block.
const STREAM_ROW_GAP: f32 = 20.0;
/// Stream mode: run origins closer than this share a column.
const COLUMN_TOLERANCE: f32 = 15.0;

// ── Lattice mode ─────────────────────────────────────────────────────────

/// Detect gridlined tables from the page's ruling lines.
pub(crate) fn detect_lattice(scan: &PageScan) -> Vec<Table> {
    let mut h_lines: Vec<(f32, f32, f32)> = Vec::new(); // (y, x0, x1)
    let mut v_lines: Vec<(f32, f32, f32)> = Vec::new(); // (x, y0, y1)
    for r in &scan.rulings {
        match *r {
            Ruling::Horizontal { y, x0, x1 } => h_lines.push((y, x0, x1)),
            Ruling::Vertical { x, y0, y1 } => v_lines.push((x, y0, y1)),
        }
    }
    if h_lines.is_empty() || v_lines.is_empty() {
        return Vec::new();
    }

    // Group horizontal rulings into vertically separated table blocks.
    let mut ys: Vec<f32> = h_lines.iter().map(|&(y, _, _)| y).collect();
    let y_cuts_all = cluster(&mut ys, CUT_TOLERANCE);

    let mut tables = Vec::new();
    for block in split_blocks(&y_cuts_all, BLOCK_GAP) {
        if block.len() < 2 {
            continue;
        }
        let top = block[0];
        let bottom = *block.last().expect("block is non-empty");

        // Column cuts come from vertical rulings that span this block:
        // the segment must start at or below the bottom cut and end at or
        // above the top cut. Shorter verticals are decoration, not columns.
        let mut xs: Vec<f32> = v_lines
            .iter()
            .filter(|&&(_, y0, y1)| y0 <= bottom + CUT_TOLERANCE && y1 >= top - CUT_TOLERANCE)
            .map(|&(x, _, _)| x)
            .collect();
        let x_cuts = cluster(&mut xs, CUT_TOLERANCE);
        if x_cuts.len() < 3 {
            // Fewer than two columns of cells is a box, not a table.
            continue;
        }

        if let Some(table) = fill_cells(&scan.runs, &block, &x_cuts) {
            tables.push(table);
        }
    }
    tables
}

/// Split descending y cut positions into blocks separated by large gaps.
fn split_blocks(y_cuts: &[f32], gap: f32) -> Vec<Vec<f32>> {
    let mut blocks: Vec<Vec<f32>> = Vec::new();
    for &y in y_cuts.iter().rev() {
        // iterate top-down (cluster() returns ascending)
        match blocks.last_mut() {
            Some(block) if block.last().expect("non-empty") - y <= gap => block.push(y),
            _ => blocks.push(vec![y]),
        }
    }
    blocks
}

/// Bin text runs into the cell grid defined by the given cuts.
///
/// `y_cuts` descend (top row first), `x_cuts` ascend. Returns None when the
/// grid caught no text at all — an empty frame is decoration, not a table.
fn fill_cells(runs: &[TextRun], y_cuts: &[f32], x_cuts: &[f32]) -> Option<Table> {
    let n_rows = y_cuts.len() - 1;
    let n_cols = x_cuts.len() - 1;
    let mut cells: Vec<Vec<Vec<&TextRun>>> = vec![vec![Vec::new(); n_cols]; n_rows];

    for run in runs {
        let row = (0..n_rows).find(|&i| run.y <= y_cuts[i] && run.y > y_cuts[i + 1]);
        let col = (0..n_cols).find(|&j| run.x >= x_cuts[j] && run.x < x_cuts[j + 1]);
        if let (Some(i), Some(j)) = (row, col) {
            cells[i][j].push(run);
        }
    }

    let mut any = false;
    let rows: Vec<Vec<String>> = cells
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|mut cell| {
                    // Reading order inside a cell: top line first, then left to right.
                    cell.sort_by(|a, b| {
                        b.y.partial_cmp(&a.y)
                            .unwrap_or(std::cmp::Ordering::Equal)
                            .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
                    });
                    let text = cell
                        .iter()
                        .map(|r| r.text.as_str())
                        .collect::<Vec<_>>()
                        .join(" ");
                    if !text.is_empty() {
                        any = true;
                    }
                    text
                })
                .collect()
        })
        .collect();

    any.then_some(Table { rows })
}

// ── Stream mode ──────────────────────────────────────────────────────────

/// Detect rule-less tables from whitespace-aligned text columns.
pub(crate) fn detect_stream(scan: &PageScan) -> Vec<Table> {
    // Group runs into visual rows by baseline.
    let mut runs: Vec<&TextRun> = scan.runs.iter().collect();
    runs.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut rows: Vec<(f32, Vec<&TextRun>)> = Vec::new();
    for run in runs {
        match rows.last_mut() {
            Some((y, row)) if (*y - run.y).abs() <= ROW_TOLERANCE => row.push(run),
            _ => rows.push((run.y, vec![run])),
        }
    }

    // A table block is a run of consecutive, closely spaced rows that each
    // hold at least two runs. Single-run rows are prose and break the block.
    let mut tables = Vec::new();
    let mut block: Vec<&(f32, Vec<&TextRun>)> = Vec::new();
    for row in &rows {
        let continues = row.1.len() >= 2
            && block
                .last()
                .map(|prev| prev.0 - row.0 <= STREAM_ROW_GAP)
                .unwrap_or(true);
        if continues {
            block.push(row);
        } else {
            if let Some(table) = block_to_table(&block) {
                tables.push(table);
            }
            block.clear();
            if row.1.len() >= 2 {
                block.push(row);
            }
        }
    }
    if let Some(table) = block_to_table(&block) {
        tables.push(table);
    }
    tables
}

fn block_to_table(block: &[&(f32, Vec<&TextRun>)]) -> Option<Table> {
    if block.len() < 2 {
        return None;
    }

    let mut xs: Vec<f32> = block
        .iter()
        .flat_map(|(_, row)| row.iter().map(|r| r.x))
        .collect();
    let columns = cluster(&mut xs, COLUMN_TOLERANCE);
    if columns.len() < 2 {
        return None;
    }

    let rows = block
        .iter()
        .map(|(_, row)| {
            let mut cells = vec![String::new(); columns.len()];
            for run in row {
                let idx = nearest(&columns, run.x);
                if cells[idx].is_empty() {
                    cells[idx] = run.text.clone();
                } else {
                    cells[idx].push(' ');
                    cells[idx].push_str(&run.text);
                }
            }
            cells
        })
        .collect();

    Some(Table { rows })
}

// ── Shared helpers ───────────────────────────────────────────────────────

/// Sort values and merge neighbours within `tol`, returning ascending
/// cluster centres.
fn cluster(values: &mut Vec<f32>, tol: f32) -> Vec<f32> {
    if values.is_empty() {
        return Vec::new();
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut centres = Vec::new();
    let mut group_start = values[0];
    let mut sum = values[0];
    let mut count = 1usize;
    for &v in values.iter().skip(1) {
        if v - group_start <= tol {
            sum += v;
            count += 1;
        } else {
            centres.push(sum / count as f32);
            group_start = v;
            sum = v;
            count = 1;
        }
    }
    centres.push(sum / count as f32);
    centres
}

/// Index of the closest column centre to `x`.
fn nearest(columns: &[f32], x: f32) -> usize {
    let mut best = 0;
    let mut best_d = f32::MAX;
    for (i, &c) in columns.iter().enumerate() {
        let d = (c - x).abs();
        if d < best_d {
            best = i;
            best_d = d;
        }
    }
    best
}
