use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use super::columns::{ColumnMap, Role};
use super::text::{absolutize, cell_text, clean_text, placeholder_image};
use crate::branch::{BranchProfile, RowGuard};

static CELL_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td, th").unwrap());
static IMG_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());

/// Why a data row produced no record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("row has no cells")]
    EmptyRow,
    #[error("row has {cells} cells, needs {needed}")]
    ShortRow { cells: usize, needed: usize },
    #[error("no cell for the {0} column")]
    MissingCell(Role),
    #[error("image has no src")]
    ImageWithoutSource,
    #[error("name is empty")]
    EmptyName,
}

impl SkipReason {
    /// Stable short tag used for skip counts.
    pub fn tag(&self) -> &'static str {
        match self {
            SkipReason::EmptyRow => "empty-row",
            SkipReason::ShortRow { .. } => "short-row",
            SkipReason::MissingCell(_) => "missing-cell",
            SkipReason::ImageWithoutSource => "image-without-src",
            SkipReason::EmptyName => "empty-name",
        }
    }
}

/// Raw field values read from one row, before assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFields {
    pub name: String,
    pub origin: String,
    pub kind: String,
    pub quantity: String,
    pub image_url: String,
}

/// Read one data row using the table's column map.
///
/// `identity` is the resolved identifying column. Merged cells (`rowspan`,
/// `colspan`) are not reconciled, so a row that inherits cells from the row
/// above reads shifted columns or trips the length guard.
pub fn extract_row(
    row: ElementRef<'_>,
    columns: &ColumnMap,
    identity: (Role, usize),
    profile: &BranchProfile,
) -> Result<RowFields, SkipReason> {
    let cells: Vec<ElementRef<'_>> = row.select(&CELL_SEL).collect();
    let lenient = profile.guard == RowGuard::Lenient;

    match profile.guard {
        RowGuard::Strict(guarded) => {
            let needed = columns.max_index(guarded).map_or(0, |i| i + 1);
            if cells.len() < needed {
                return Err(SkipReason::ShortRow {
                    cells: cells.len(),
                    needed,
                });
            }
        }
        RowGuard::Lenient => {
            if cells.is_empty() {
                return Err(SkipReason::EmptyRow);
            }
        }
    }

    let read = |role: Role, idx: Option<usize>, default: Option<&str>| -> Result<String, SkipReason> {
        let Some(idx) = idx else {
            return default.map(str::to_string).ok_or(SkipReason::MissingCell(role));
        };
        match cells.get(idx) {
            Some(cell) => Ok(clean_text(&cell_text(*cell))),
            None if lenient => default.map(str::to_string).ok_or(SkipReason::MissingCell(role)),
            None => Err(SkipReason::MissingCell(role)),
        }
    };

    let d = &profile.defaults;
    let (id_role, id_idx) = identity;
    let name = read(id_role, Some(id_idx), d.name)?;
    let origin = read(Role::Origin, columns.get(Role::Origin), Some(d.origin))?;
    let kind = read(Role::Kind, columns.get(Role::Kind), Some(d.kind))?;
    let quantity = read(Role::Quantity, columns.get(Role::Quantity), Some(d.quantity))?;

    let image_url = match row.select(&IMG_SEL).next() {
        Some(img) => {
            let src = img.value().attr("src").ok_or(SkipReason::ImageWithoutSource)?;
            absolutize(src)
        }
        None => placeholder_image(&name),
    };

    if name.is_empty() {
        return Err(SkipReason::EmptyName);
    }

    Ok(RowFields {
        name,
        origin,
        kind,
        quantity,
        image_url,
    })
}

// ── Tests ──
