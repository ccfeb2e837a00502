pub mod common;

use pretty_assertions::assert_eq;
use sea_synth::{AliasAllocator, Candidates, Discovery, tests_cfg::adventure_works};

fn invoice_candidates() -> Candidates {
    [
        ("ORDER_ID", "SalesOrderID"),
        ("CUSTOMER_ID", "CustomerID"),
        ("CUSTOMER_NAME", "CompanyName"),
        ("CUSTOMER_EMAIL", "EmailAddress"),
        ("DUE_DATE", "DueDate"),
        ("ORDER_LINE_ID", "OrderQty"),
        ("PRODUCT_ID", "ProductID"),
        ("PRODUCT_NAME", "Name"),
        ("QUANTITY", "OrderQty"),
        ("UNIT_PRICE", "UnitPrice"),
        ("CUSTOMER_ADDRESS", "AddressID"),
    ]
    .into_iter()
    .map(|(field, column)| (field.to_owned(), vec![column.to_owned()]))
    .collect()
}

fn detected(discovery: &Discovery) -> Vec<(&str, &str, &str, &str)> {
    discovery
        .detected
        .iter()
        .map(|(field, d)| {
            (
                field.as_str(),
                d.table.as_str(),
                d.column.as_str(),
                d.alias.as_str(),
            )
        })
        .collect()
}

#[test]
fn discover_invoice_fields() {
    common::setup_tracing();

    let discovery = Discovery::discover(&adventure_works::columns(), &invoice_candidates());

    assert!(discovery.is_complete());
    assert_eq!(
        detected(&discovery),
        vec![
            ("ORDER_ID", "SalesLT.SalesOrderDetail", "SalesOrderID", "t1"),
            ("CUSTOMER_ID", "SalesLT.Customer", "CustomerID", "t2"),
            ("CUSTOMER_NAME", "SalesLT.Customer", "CompanyName", "t2"),
            ("CUSTOMER_EMAIL", "SalesLT.Customer", "EmailAddress", "t2"),
            ("DUE_DATE", "SalesLT.SalesOrderHeader", "DueDate", "t3"),
            ("ORDER_LINE_ID", "SalesLT.SalesOrderDetail", "OrderQty", "t1"),
            ("PRODUCT_ID", "SalesLT.Product", "ProductID", "t4"),
            ("PRODUCT_NAME", "SalesLT.Product", "Name", "t4"),
            ("QUANTITY", "SalesLT.SalesOrderDetail", "OrderQty", "t1"),
            ("UNIT_PRICE", "SalesLT.SalesOrderDetail", "UnitPrice", "t1"),
            ("CUSTOMER_ADDRESS", "SalesLT.CustomerAddress", "AddressID", "t5"),
        ]
    );
}

#[test]
fn discover_from_config() {
    let config = adventure_works::invoice_config();

    let discovery = Discovery::discover(&adventure_works::columns(), &config.candidates());

    assert!(discovery.is_complete());
    assert_eq!(
        discovery.detected.keys().collect::<Vec<_>>(),
        config.field_order().iter().collect::<Vec<_>>()
    );
    assert_eq!(discovery.detected["ORDER_LINE_ID"].column, "SalesOrderDetailID");
}

#[test]
fn discover_with_used_aliases() {
    let discovery = Discovery::discover_with(
        &adventure_works::columns(),
        &invoice_candidates(),
        AliasAllocator::with_used(["t2", "t3"]),
    );

    assert_eq!(discovery.detected["ORDER_ID"].alias, "t1");
    assert_eq!(discovery.detected["CUSTOMER_ID"].alias, "t4");
    assert_eq!(discovery.detected["DUE_DATE"].alias, "t5");
    assert_eq!(discovery.detected["PRODUCT_ID"].alias, "t6");
    assert_eq!(discovery.detected["CUSTOMER_ADDRESS"].alias, "t7");
}

#[test]
fn report_missing_fields() {
    let mut candidates = invoice_candidates();
    candidates.insert("SHIP_METHOD".to_owned(), vec!["ShipMethod".to_owned()]);
    candidates.insert("TAX".to_owned(), vec!["TaxAmt".to_owned(), "Tax".to_owned()]);

    let discovery = Discovery::discover(&adventure_works::columns(), &candidates);

    assert!(!discovery.is_complete());
    assert_eq!(discovery.detected.len(), 11);
    assert_eq!(discovery.missing, vec!["SHIP_METHOD", "TAX"]);
}
