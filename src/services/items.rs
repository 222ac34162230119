use crate::domain::item::Item;
use crate::domain::types::ItemId;
use crate::dto::categories::CategoryOption;
use crate::dto::items::ItemDto;
use crate::forms::items::{ItemForm, ItemFormPayload};
use crate::forms::validation::{Rejected, Violation};
use crate::repository::{CategoryReader, ItemListQuery, ItemReader, ItemWriter};

use super::{ServiceError, ServiceResult, store_failure};

/// Everything the item create/update page needs to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFormPage {
    /// Sanitized values shown in the inputs.
    pub form: ItemForm,
    pub categories: Vec<CategoryOption>,
    pub violations: Vec<Violation>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveItemOutcome {
    Rejected(ItemFormPage),
    Saved(Item),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteItemOutcome {
    /// Nothing to delete: the id never existed or was already deleted.
    Missing,
    Deleted,
}

fn form_page<R>(rejected: Rejected<ItemForm>, repo: &R) -> ServiceResult<ItemFormPage>
where
    R: CategoryReader,
{
    let categories = repo
        .list_categories()
        .map_err(store_failure("Failed to list categories"))?;
    Ok(ItemFormPage {
        categories: CategoryOption::list(categories, &rejected.form.category),
        form: rejected.form,
        violations: rejected.violations,
    })
}

/// Validate a submitted item form, including that the chosen category exists.
fn validate<R>(form: ItemForm, repo: &R) -> ServiceResult<Result<ItemFormPayload, ItemFormPage>>
where
    R: CategoryReader,
{
    let payload = match ItemFormPayload::try_from(form.clone()) {
        Ok(payload) => payload,
        Err(rejected) => return form_page(rejected, repo).map(Err),
    };

    let category = repo
        .get_category_by_id(payload.category_id)
        .map_err(store_failure("Failed to get category"))?;
    if category.is_none() {
        let rejected = form.reject(Violation::new(
            "category",
            "Category must be one of the listed categories.",
        ));
        return form_page(rejected, repo).map(Err);
    }

    Ok(Ok(payload))
}

/// All items ordered by name with their categories resolved.
pub fn show_items<R>(repo: &R) -> ServiceResult<Vec<ItemDto>>
where
    R: ItemReader,
{
    let items = repo
        .list_items(ItemListQuery::default())
        .map_err(store_failure("Failed to list items"))?;
    Ok(items.into_iter().map(ItemDto::from).collect())
}

pub fn show_item<R>(item_id: i32, repo: &R) -> ServiceResult<ItemDto>
where
    R: ItemReader,
{
    let item_id = ItemId::new(item_id).map_err(|_| ServiceError::NotFound)?;
    match repo.get_item_by_id(item_id) {
        Ok(Some(item)) => Ok(item.into()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(store_failure("Failed to get item")(e)),
    }
}

/// Blank item form listing every category.
pub fn show_create_item<R>(repo: &R) -> ServiceResult<ItemFormPage>
where
    R: CategoryReader,
{
    form_page(
        Rejected {
            form: ItemForm::default(),
            violations: vec![],
        },
        repo,
    )
}

pub fn create_item<R>(form: ItemForm, repo: &R) -> ServiceResult<SaveItemOutcome>
where
    R: CategoryReader + ItemWriter,
{
    let payload = match validate(form, repo)? {
        Ok(payload) => payload,
        Err(page) => return Ok(SaveItemOutcome::Rejected(page)),
    };

    let created = repo
        .create_item(&payload.into_new_item())
        .map_err(store_failure("Failed to create item"))?;
    log::info!("Created item {} ({})", created.id, created.name);
    Ok(SaveItemOutcome::Saved(created))
}

/// Item form pre-filled with the stored values and its category selected.
pub fn show_update_item<R>(item_id: i32, repo: &R) -> ServiceResult<ItemFormPage>
where
    R: CategoryReader + ItemReader,
{
    let item_id = ItemId::new(item_id).map_err(|_| ServiceError::NotFound)?;
    let item = match repo.get_item_by_id(item_id) {
        Ok(Some(found)) => found.item,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => return Err(store_failure("Failed to get item")(e)),
    };

    form_page(
        Rejected {
            form: ItemForm::from(&item),
            violations: vec![],
        },
        repo,
    )
}

/// Replace every mutable field of an item; its id is preserved.
pub fn update_item<R>(item_id: i32, form: ItemForm, repo: &R) -> ServiceResult<SaveItemOutcome>
where
    R: CategoryReader + ItemReader + ItemWriter,
{
    let item_id = ItemId::new(item_id).map_err(|_| ServiceError::NotFound)?;
    match repo.get_item_by_id(item_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => return Err(store_failure("Failed to get item")(e)),
    }

    let payload = match validate(form, repo)? {
        Ok(payload) => payload,
        Err(page) => return Ok(SaveItemOutcome::Rejected(page)),
    };

    let affected = repo
        .update_item(item_id, &payload.into_changes())
        .map_err(store_failure("Failed to update item"))?;
    if affected == 0 {
        return Err(ServiceError::NotFound);
    }

    match repo.get_item_by_id(item_id) {
        Ok(Some(updated)) => Ok(SaveItemOutcome::Saved(updated.item)),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(store_failure("Failed to reload item")(e)),
    }
}

/// Item to confirm on the delete page, or `None` when there is nothing to
/// delete.
pub fn show_delete_item<R>(item_id: i32, repo: &R) -> ServiceResult<Option<ItemDto>>
where
    R: ItemReader,
{
    let Ok(item_id) = ItemId::new(item_id) else {
        return Ok(None);
    };
    let item = repo
        .get_item_by_id(item_id)
        .map_err(store_failure("Failed to get item"))?;
    Ok(item.map(ItemDto::from))
}

/// Delete an item. Items are leaves, so no reference check is needed.
pub fn delete_item<R>(item_id: i32, repo: &R) -> ServiceResult<DeleteItemOutcome>
where
    R: ItemWriter,
{
    let Ok(item_id) = ItemId::new(item_id) else {
        return Ok(DeleteItemOutcome::Missing);
    };
    let affected = repo
        .delete_item(item_id)
        .map_err(store_failure("Failed to delete item"))?;
    if affected == 0 {
        return Ok(DeleteItemOutcome::Missing);
    }
    log::info!("Deleted item {item_id}");
    Ok(DeleteItemOutcome::Deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test::{TestRepository, sample_category, sample_item};

    fn speaker_form(category: &str) -> ItemForm {
        ItemForm {
            name: "Speaker".into(),
            description: "Loud".into(),
            price: "50".into(),
            number_in_stock: "3".into(),
            category: category.into(),
        }
    }

    fn audio_repo() -> TestRepository {
        TestRepository::new(
            vec![sample_category(1, "Audio"), sample_category(2, "Video")],
            vec![],
        )
    }

    #[test]
    fn create_persists_and_resolves_category() {
        let repo = audio_repo();

        let created = match create_item(speaker_form("1"), &repo).unwrap() {
            SaveItemOutcome::Saved(item) => item,
            other => panic!("unexpected outcome: {other:?}"),
        };

        assert_eq!(created.url(), "/catalog/item/1");
        let detail = show_item(created.id.get(), &repo).unwrap();
        assert_eq!(detail.name, "Speaker");
        assert_eq!(detail.price, 50.0);
        assert_eq!(detail.category.unwrap().name, "Audio");
    }

    #[test]
    fn empty_description_is_rejected_without_writing() {
        let repo = audio_repo();
        let form = ItemForm {
            description: String::new(),
            ..speaker_form("1")
        };

        match create_item(form, &repo).unwrap() {
            SaveItemOutcome::Rejected(page) => {
                assert_eq!(page.violations[0].field, "description");
                assert_eq!(page.violations[0].message, "description must not be empty.");
                assert_eq!(page.categories.len(), 2);
                assert!(page.categories[0].selected);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(repo.items().is_empty());
    }

    #[test]
    fn unknown_category_is_rejected() {
        let repo = audio_repo();

        let outcome = create_item(speaker_form("99"), &repo).unwrap();

        match outcome {
            SaveItemOutcome::Rejected(page) => assert_eq!(page.violations[0].field, "category"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(repo.items().is_empty());
    }

    #[test]
    fn create_form_lists_categories_by_name() {
        let repo = TestRepository::new(
            vec![sample_category(1, "Video"), sample_category(2, "Audio")],
            vec![],
        );

        let page = show_create_item(&repo).unwrap();

        assert_eq!(page.categories[0].name, "Audio");
        assert!(page.categories.iter().all(|c| !c.selected));
        assert!(page.violations.is_empty());
    }

    #[test]
    fn update_preserves_id_and_replaces_fields() {
        let repo = TestRepository::new(
            vec![sample_category(1, "Audio"), sample_category(2, "Video")],
            vec![sample_item(5, "Speaker", 1)],
        );
        let form = ItemForm {
            name: "Monitor".into(),
            description: "Bright".into(),
            price: "120.5".into(),
            number_in_stock: "7".into(),
            category: "2".into(),
        };

        let updated = match update_item(5, form, &repo).unwrap() {
            SaveItemOutcome::Saved(item) => item,
            other => panic!("unexpected outcome: {other:?}"),
        };

        assert_eq!(updated.id, 5);
        assert_eq!(updated.name, "Monitor");
        assert_eq!(updated.description, "Bright");
        assert_eq!(updated.price, 120.5);
        assert_eq!(updated.number_in_stock, 7);
        assert_eq!(updated.category_id, 2);
        assert_eq!(repo.items().len(), 1);
    }

    #[test]
    fn update_form_preselects_current_category() {
        let repo = TestRepository::new(
            vec![sample_category(1, "Audio"), sample_category(2, "Video")],
            vec![sample_item(5, "Speaker", 2)],
        );

        let page = show_update_item(5, &repo).unwrap();

        assert_eq!(page.form.name, "Speaker");
        assert_eq!(page.form.price, "50");
        let selected: Vec<&str> = page
            .categories
            .iter()
            .filter(|c| c.selected)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(selected, vec!["Video"]);
    }

    #[test]
    fn invalid_update_leaves_the_item_untouched() {
        let repo = TestRepository::new(
            vec![sample_category(1, "Audio")],
            vec![sample_item(5, "Speaker", 1)],
        );
        let form = ItemForm {
            name: "   ".into(),
            ..speaker_form("1")
        };

        let outcome = update_item(5, form, &repo).unwrap();

        assert!(matches!(outcome, SaveItemOutcome::Rejected(_)));
        assert_eq!(repo.items()[0].name, "Speaker");
    }

    #[test]
    fn update_of_missing_item_is_not_found() {
        let repo = audio_repo();
        assert_eq!(
            update_item(5, speaker_form("1"), &repo).unwrap_err(),
            ServiceError::NotFound
        );
        assert_eq!(show_update_item(5, &repo).unwrap_err(), ServiceError::NotFound);
    }

    #[test]
    fn items_are_listed_by_name_with_categories() {
        let repo = TestRepository::new(
            vec![sample_category(1, "Audio")],
            vec![sample_item(1, "Tweeter", 1), sample_item(2, "Amplifier", 1)],
        );

        let items = show_items(&repo).unwrap();

        assert_eq!(items[0].name, "Amplifier");
        assert_eq!(items[1].name, "Tweeter");
        assert_eq!(items[0].category.as_ref().unwrap().url, "/catalog/category/1");
    }

    #[test]
    fn missing_item_detail_is_not_found() {
        let repo = audio_repo();
        assert_eq!(show_item(3, &repo).unwrap_err(), ServiceError::NotFound);
    }

    #[test]
    fn delete_removes_the_item_and_tolerates_missing_ids() {
        let repo = TestRepository::new(
            vec![sample_category(1, "Audio")],
            vec![sample_item(1, "Speaker", 1), sample_item(2, "Tweeter", 1)],
        );

        assert_eq!(delete_item(1, &repo).unwrap(), DeleteItemOutcome::Deleted);
        assert_eq!(delete_item(1, &repo).unwrap(), DeleteItemOutcome::Missing);
        assert_eq!(delete_item(-4, &repo).unwrap(), DeleteItemOutcome::Missing);
        assert_eq!(show_delete_item(1, &repo).unwrap(), None);

        let remaining = repo.items();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, 2);
    }
}
