use crate::dto::items::CatalogSummary;
use crate::repository::{CategoryReader, ItemReader};

use super::{ServiceResult, join_reads, store_failure};

/// Core business logic for rendering the catalog home page.
///
/// Counts categories and items concurrently. Repository errors are logged and
/// translated into `ServiceError` so that the HTTP route can remain a thin
/// wrapper.
pub fn show_index<R>(repo: &R) -> ServiceResult<CatalogSummary>
where
    R: CategoryReader + ItemReader + Sync,
{
    let (category_count, item_count) =
        join_reads(|| repo.count_categories(), || repo.count_items());

    Ok(CatalogSummary {
        category_count: category_count.map_err(store_failure("Failed to count categories"))?,
        item_count: item_count.map_err(store_failure("Failed to count items"))?,
    })
}
