use crate::model::board::Board;
use crate::model::category::{Category, Swatch};

/// Append a new, empty category.
///
/// The name is trimmed; a blank name, a color outside the palette, or an
/// id that is already taken makes this a no-op.
pub fn add_category(board: &Board, id: &str, name: &str, color: &str) -> Option<Board> {
    let name = name.trim();
    if name.is_empty() || board.find(id).is_some() {
        return None;
    }
    let swatch = Swatch::from_hex(color)?;
    let mut updated = board.clone();
    updated.categories.push(Category::new(id, name, swatch));
    Some(updated)
}

/// Replace the category whose id matches `category.id`.
///
/// Every task-level change goes through here. Unknown ids and unchanged
/// categories are no-ops.
pub fn update_category(board: &Board, category: Category) -> Option<Board> {
    let idx = board.position(&category.id)?;
    if board.categories[idx] == category {
        return None;
    }
    let mut updated = board.clone();
    updated.categories[idx] = category;
    Some(updated)
}

/// Rename and/or recolor a category, returning the modified copy.
/// Blank names and off-palette colors leave that field unchanged.
pub fn edit_category(category: &Category, name: Option<&str>, color: Option<Swatch>) -> Category {
    let mut edited = category.clone();
    if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
        edited.name = name.to_string();
    }
    if let Some(swatch) = color {
        edited.color = swatch.hex().to_string();
    }
    edited
}

/// Remove a category together with all of its tasks
pub fn delete_category(board: &Board, id: &str) -> Option<Board> {
    let idx = board.position(id)?;
    let mut updated = board.clone();
    updated.categories.remove(idx);
    Some(updated)
}
