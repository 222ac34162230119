use crate::domain::category::Category;
use crate::domain::item::ItemWithCategory;
use crate::domain::types::CategoryId;
use crate::dto::categories::{CategoryDto, CategoryListEntry};
use crate::dto::items::ItemDto;
use crate::forms::categories::{CategoryForm, CategoryFormPayload};
use crate::forms::validation::{Rejected, Violation};
use crate::repository::{CategoryReader, CategoryWriter, ItemListQuery, ItemReader};

use super::{ServiceError, ServiceResult, join_reads, store_failure};

/// A category with the items that reference it.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDetail {
    pub category: CategoryDto,
    pub items: Vec<ItemDto>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CreateCategoryOutcome {
    Rejected(Rejected<CategoryForm>),
    /// A category with the same name already existed; nothing was written.
    Existing(Category),
    Created(Category),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateCategoryOutcome {
    Rejected(Rejected<CategoryForm>),
    Updated(CategoryId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteCategoryOutcome {
    /// Nothing to delete: the id never existed or was already deleted.
    Missing,
    /// Items still reference the category; nothing was deleted.
    Blocked(CategoryDetail),
    Deleted,
}

/// Fetch a category and the items referencing it concurrently.
fn load_with_items<R>(
    id: CategoryId,
    repo: &R,
) -> ServiceResult<Option<(Category, Vec<ItemWithCategory>)>>
where
    R: CategoryReader + ItemReader + Sync,
{
    let (category, items) = join_reads(
        || repo.get_category_by_id(id),
        || repo.list_items(ItemListQuery::default().category(id)),
    );

    let category = category.map_err(store_failure("Failed to get category"))?;
    let items = items.map_err(store_failure("Failed to list category items"))?;

    Ok(category.map(|category| (category, items)))
}

fn into_detail((category, items): (Category, Vec<ItemWithCategory>)) -> CategoryDetail {
    CategoryDetail {
        category: category.into(),
        items: items.into_iter().map(ItemDto::from).collect(),
    }
}

/// All categories ordered by name.
pub fn show_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryListEntry>>
where
    R: CategoryReader,
{
    let categories = repo
        .list_categories()
        .map_err(store_failure("Failed to list categories"))?;
    Ok(categories.into_iter().map(CategoryListEntry::from).collect())
}

pub fn show_category<R>(category_id: i32, repo: &R) -> ServiceResult<CategoryDetail>
where
    R: CategoryReader + ItemReader + Sync,
{
    let category_id = CategoryId::new(category_id).map_err(|_| ServiceError::NotFound)?;
    load_with_items(category_id, repo)?
        .map(into_detail)
        .ok_or(ServiceError::NotFound)
}

/// Validate and persist a new category.
///
/// Names act as a soft-unique key: submitting the name of an existing
/// category writes nothing and returns that category instead.
pub fn create_category<R>(form: CategoryForm, repo: &R) -> ServiceResult<CreateCategoryOutcome>
where
    R: CategoryReader + CategoryWriter,
{
    let payload = match CategoryFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(rejected) => return Ok(CreateCategoryOutcome::Rejected(rejected)),
    };

    let existing = repo
        .get_category_by_name(&payload.name)
        .map_err(store_failure("Failed to look up category by name"))?;
    if let Some(existing) = existing {
        return Ok(CreateCategoryOutcome::Existing(existing));
    }

    let created = repo
        .create_category(&payload.into_new_category())
        .map_err(store_failure("Failed to create category"))?;
    log::info!("Created category {} ({})", created.id, created.name);
    Ok(CreateCategoryOutcome::Created(created))
}

/// Current values of a category for the update form.
pub fn show_update_category<R>(category_id: i32, repo: &R) -> ServiceResult<CategoryForm>
where
    R: CategoryReader,
{
    let category_id = CategoryId::new(category_id).map_err(|_| ServiceError::NotFound)?;
    match repo.get_category_by_id(category_id) {
        Ok(Some(category)) => Ok(CategoryForm::from(&category)),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(store_failure("Failed to get category")(e)),
    }
}

pub fn update_category<R>(
    category_id: i32,
    form: CategoryForm,
    repo: &R,
) -> ServiceResult<UpdateCategoryOutcome>
where
    R: CategoryReader + CategoryWriter,
{
    let category_id = CategoryId::new(category_id).map_err(|_| ServiceError::NotFound)?;

    match repo.get_category_by_id(category_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => return Err(store_failure("Failed to get category")(e)),
    }

    let payload = match CategoryFormPayload::try_from(form.clone()) {
        Ok(payload) => payload,
        Err(rejected) => return Ok(UpdateCategoryOutcome::Rejected(rejected)),
    };

    let namesake = repo
        .get_category_by_name(&payload.name)
        .map_err(store_failure("Failed to look up category by name"))?;
    if namesake.is_some_and(|other| other.id != category_id) {
        return Ok(UpdateCategoryOutcome::Rejected(form.reject(Violation::new(
            "name",
            "A category with this name already exists.",
        ))));
    }

    let affected = repo
        .update_category(category_id, &payload.into_changes())
        .map_err(store_failure("Failed to update category"))?;
    if affected == 0 {
        return Err(ServiceError::NotFound);
    }

    Ok(UpdateCategoryOutcome::Updated(category_id))
}

/// Category and its blocking items for the delete confirmation page, or
/// `None` when there is nothing to delete.
pub fn show_delete_category<R>(category_id: i32, repo: &R) -> ServiceResult<Option<CategoryDetail>>
where
    R: CategoryReader + ItemReader + Sync,
{
    let Ok(category_id) = CategoryId::new(category_id) else {
        return Ok(None);
    };
    Ok(load_with_items(category_id, repo)?.map(into_detail))
}

/// Delete a category unless items still reference it.
///
/// The reference check and the delete are not atomic.
pub fn delete_category<R>(category_id: i32, repo: &R) -> ServiceResult<DeleteCategoryOutcome>
where
    R: CategoryReader + CategoryWriter + ItemReader + Sync,
{
    let Ok(category_id) = CategoryId::new(category_id) else {
        return Ok(DeleteCategoryOutcome::Missing);
    };

    let Some((category, items)) = load_with_items(category_id, repo)? else {
        return Ok(DeleteCategoryOutcome::Missing);
    };

    if !items.is_empty() {
        log::info!(
            "Refusing to delete category {}: {} item(s) reference it",
            category.id,
            items.len()
        );
        return Ok(DeleteCategoryOutcome::Blocked(into_detail((category, items))));
    }

    repo.delete_category(category.id)
        .map_err(store_failure("Failed to delete category"))?;
    log::info!("Deleted category {} ({})", category.id, category.name);
    Ok(DeleteCategoryOutcome::Deleted)
}
