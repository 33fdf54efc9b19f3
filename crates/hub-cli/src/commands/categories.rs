use hub_core::{Category, CategoryIcon};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CategoryRow {
    category: Category,
    icon: CategoryIcon,
    /// Whether an idea can carry it (the `All` filter cannot).
    assignable: bool,
}

#[derive(Debug, Serialize)]
struct CategoriesResponse {
    categories: Vec<CategoryRow>,
}

pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let categories = Category::ORDERED
        .into_iter()
        .map(|category| CategoryRow {
            category,
            icon: category.icon(),
            assignable: !category.is_all(),
        })
        .collect();
    output(&CategoriesResponse { categories }, flags.format)
}
