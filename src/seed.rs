//! Sample data used to populate an empty catalog.

use chrono::Utc;

use crate::domain::category::{Category, NewCategory};
use crate::domain::item::NewItem;
use crate::domain::types::{
    CategoryDescription, CategoryName, ItemDescription, ItemName, ItemPrice, StockCount,
};
use crate::repository::{CategoryReader, CategoryWriter, ItemWriter, RepositoryResult};

/// `(name, description)` of every sample category.
pub const SAMPLE_CATEGORIES: [(&str, &str); 4] = [
    ("Computer", "PCs and all its components"),
    ("Phone", "Phone devices and accessories (not include gadgets)"),
    (
        "Furniture",
        "Furniture is a moveable object that is built for human use. It can be used for a variety of purposes",
    ),
    (
        "Gadgets",
        "Mechanical, or electronic device that has a practical use",
    ),
];

/// `(name, description, price, number_in_stock, category index)` of every sample item.
pub const SAMPLE_ITEMS: [(&str, &str, f64, i32, usize); 8] = [
    ("Max Fort model 3", "PC gamer 64 ram, 1T ROM", 900.0, 5, 0),
    (
        "IPhone X",
        "The new generation of one in the palm of your hands",
        1500.0,
        2,
        1,
    ),
    (
        "Redmi 9t",
        "4gm ram 64gb rom 54mp, 8mp frontal camera",
        100.0,
        16,
        1,
    ),
    ("Optiplex 980", "10ram 300rom", 200.0, 10, 0),
    ("PC table", "White color", 50.0, 7, 2),
    (
        "Apple watch Series 9",
        "Powerful sensors, advanced health features.",
        500.0,
        3,
        3,
    ),
    (
        "Apple watch Ultra 2",
        "The most rugged, and capable.",
        800.0,
        2,
        3,
    ),
    (
        "Apple watch SE",
        "All the essentials. Light on price.",
        300.0,
        8,
        3,
    ),
];

/// Number of records written by [`populate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories_created: usize,
    pub categories_reused: usize,
    pub items_created: usize,
}

fn ensure_category<R>(repo: &R, name: &str, description: &str) -> RepositoryResult<(Category, bool)>
where
    R: CategoryReader + CategoryWriter,
{
    let name = CategoryName::new(name)?;
    if let Some(existing) = repo.get_category_by_name(&name)? {
        log::info!("Reusing category {} ({})", existing.name, existing.id);
        return Ok((existing, false));
    }

    let now = Utc::now().naive_utc();
    let created = repo.create_category(&NewCategory {
        name,
        description: Some(CategoryDescription::new(description)?),
        created_at: now,
        updated_at: now,
    })?;
    log::info!("Added category {} ({})", created.name, created.id);
    Ok((created, true))
}

/// Insert the sample categories and items.
///
/// Categories already present under the same name are reused; items are
/// always inserted.
pub fn populate<R>(repo: &R) -> RepositoryResult<SeedReport>
where
    R: CategoryReader + CategoryWriter + ItemWriter,
{
    let mut report = SeedReport::default();

    let mut categories = Vec::with_capacity(SAMPLE_CATEGORIES.len());
    for (name, description) in SAMPLE_CATEGORIES {
        let (category, created) = ensure_category(repo, name, description)?;
        if created {
            report.categories_created += 1;
        } else {
            report.categories_reused += 1;
        }
        categories.push(category);
    }

    for (name, description, price, number_in_stock, category_index) in SAMPLE_ITEMS {
        let now = Utc::now().naive_utc();
        let created = repo.create_item(&NewItem {
            name: ItemName::new(name)?,
            description: ItemDescription::new(description)?,
            price: ItemPrice::new(price)?,
            number_in_stock: StockCount::new(number_in_stock)?,
            category_id: categories[category_index].id,
            created_at: now,
            updated_at: now,
        })?;
        log::info!("Added item {} ({})", created.name, created.id);
        report.items_created += 1;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test::{TestRepository, sample_category};

    #[test]
    fn populates_empty_catalog() {
        let repo = TestRepository::default();

        let report = populate(&repo).unwrap();

        assert_eq!(
            report,
            SeedReport {
                categories_created: 4,
                categories_reused: 0,
                items_created: 8,
            }
        );
        let gadgets = repo
            .categories()
            .into_iter()
            .find(|c| c.name == "Gadgets")
            .unwrap();
        let watches = repo
            .items()
            .into_iter()
            .filter(|i| i.category_id == gadgets.id)
            .count();
        assert_eq!(watches, 3);
    }

    #[test]
    fn reuses_existing_category() {
        let repo = TestRepository::new(vec![sample_category(7, "Phone")], vec![]);

        let report = populate(&repo).unwrap();

        assert_eq!(report.categories_created, 3);
        assert_eq!(report.categories_reused, 1);
        assert_eq!(repo.categories().len(), 4);
        let phones = repo.items().into_iter().filter(|i| i.category_id == 7).count();
        assert_eq!(phones, 2);
    }

    #[test]
    fn sample_values_fit_domain_limits() {
        for (name, description) in SAMPLE_CATEGORIES {
            assert!(CategoryName::new(name).is_ok());
            assert!(CategoryDescription::new(description).is_ok());
        }
    }
}
