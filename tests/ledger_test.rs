mod common;

use anyhow::Result;
use chrono::Local;
use common::{data_file, parse_date, record_all, test_service};
use spendbook::application::{AppError, LedgerService};
use spendbook::domain::ValidationError;

#[test]
fn test_add_expense_on_empty_ledger() -> Result<()> {
    let (mut service, _temp) = test_service()?;

    let record = service.add_expense("12.5", "Food", "lunch")?;

    assert_eq!(service.list_all().len(), 1);
    assert_eq!(record.amount, 12.5);
    assert_eq!(record.category, "Food");
    assert_eq!(record.note, "lunch");
    assert_eq!(record.date, Local::now().date_naive());
    assert_eq!(service.list_all()[0], record);

    Ok(())
}

#[test]
fn test_add_does_not_persist_until_saved() -> Result<()> {
    let (mut service, temp) = test_service()?;

    service.add_expense("10", "Food", "")?;
    assert!(!data_file(&temp).exists());

    service.save()?;
    assert!(data_file(&temp).exists());

    let reopened = LedgerService::open(data_file(&temp))?;
    assert_eq!(reopened.list_all(), service.list_all());

    Ok(())
}

#[test]
fn test_add_rejects_missing_fields() -> Result<()> {
    let (mut service, temp) = test_service()?;

    let result = service.add_expense("", "Food", "note");
    assert!(matches!(
        result,
        Err(AppError::Validation(ValidationError::MissingField("amount")))
    ));

    let result = service.add_expense("10", "   ", "note");
    assert!(matches!(
        result,
        Err(AppError::Validation(ValidationError::MissingField("category")))
    ));

    assert!(service.list_all().is_empty());
    assert!(!data_file(&temp).exists());

    Ok(())
}

#[test]
fn test_add_rejects_non_numeric_amount() -> Result<()> {
    let (mut service, _temp) = test_service()?;

    let result = service.add_expense("twelve", "Food", "");
    assert!(matches!(
        result,
        Err(AppError::Validation(ValidationError::InvalidAmount { .. }))
    ));
    assert!(service.list_all().is_empty());

    Ok(())
}

#[test]
fn test_list_preserves_insertion_order() -> Result<()> {
    let (mut service, _temp) = test_service()?;

    record_all(
        &mut service,
        &[
            ("30", "Rent", "2024-02-01"),
            ("10", "Food", "2024-01-05"),
            ("5", "Travel", "2024-03-10"),
        ],
    )?;

    let categories: Vec<&str> = service
        .list_all()
        .iter()
        .map(|r| r.category.as_str())
        .collect();
    assert_eq!(categories, vec!["Rent", "Food", "Travel"]);

    Ok(())
}

#[test]
fn test_filter_by_category_is_case_insensitive() -> Result<()> {
    let (mut service, _temp) = test_service()?;

    record_all(
        &mut service,
        &[
            ("10", "Food", "2024-01-05"),
            ("20", "Rent", "2024-01-06"),
            ("7", "FOOD", "2024-01-07"),
        ],
    )?;

    let matches = service.filter_by_category("food");
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].amount, 10.0);
    assert_eq!(matches[1].amount, 7.0);

    let matches = service.filter_by_category("  rent ");
    assert_eq!(matches.len(), 1);

    assert!(service.filter_by_category("Travel").is_empty());

    Ok(())
}

#[test]
fn test_records_keep_their_dates_across_save() -> Result<()> {
    let (mut service, temp) = test_service()?;

    service.add_expense_on(parse_date("2024-01-15"), "42", "Books", "novel")?;
    service.save()?;

    let reopened = LedgerService::open(data_file(&temp))?;
    assert_eq!(reopened.list_all()[0].date, parse_date("2024-01-15"));
    assert_eq!(reopened.list_all()[0].note, "novel");

    Ok(())
}

#[test]
fn test_failed_save_keeps_the_added_record() -> Result<()> {
    let (mut service, temp) = test_service()?;
    // Data path turns into a non-empty directory after opening, so the save cannot replace it
    std::fs::create_dir(data_file(&temp))?;
    std::fs::write(data_file(&temp).join("keep"), "x")?;

    let record = service.add_expense("12.5", "Food", "lunch")?;
    let result = service.save();

    assert!(matches!(result, Err(AppError::Storage(_))));
    assert_eq!(service.list_all(), &[record]);

    Ok(())
}
