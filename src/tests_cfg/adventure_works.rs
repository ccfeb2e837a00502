//! A slice of the `SalesLT` schema of the AdventureWorks sample database.

use crate::{Catalog, ColumnMeta, ForeignKeyEdge, QueryConfig};

pub const SCHEMA: &str = "SalesLT";

pub const ROOT_TABLE: &str = "SalesLT.SalesOrderHeader";

/// Columns sorted by schema, table and column, as `INFORMATION_SCHEMA.COLUMNS`
/// is usually queried
pub fn columns() -> Vec<ColumnMeta> {
    [
        ("Customer", "CompanyName", "nvarchar"),
        ("Customer", "CustomerID", "int"),
        ("Customer", "EmailAddress", "nvarchar"),
        ("Customer", "FirstName", "nvarchar"),
        ("Customer", "LastName", "nvarchar"),
        ("CustomerAddress", "AddressID", "int"),
        ("CustomerAddress", "AddressType", "nvarchar"),
        ("CustomerAddress", "CustomerID", "int"),
        ("Product", "ListPrice", "money"),
        ("Product", "Name", "nvarchar"),
        ("Product", "ProductID", "int"),
        ("ProductCategory", "Name", "nvarchar"),
        ("ProductCategory", "ProductCategoryID", "int"),
        ("SalesOrderDetail", "OrderQty", "smallint"),
        ("SalesOrderDetail", "ProductID", "int"),
        ("SalesOrderDetail", "SalesOrderDetailID", "int"),
        ("SalesOrderDetail", "SalesOrderID", "int"),
        ("SalesOrderDetail", "UnitPrice", "money"),
        ("SalesOrderHeader", "CustomerID", "int"),
        ("SalesOrderHeader", "DueDate", "datetime"),
        ("SalesOrderHeader", "OrderDate", "datetime"),
        ("SalesOrderHeader", "SalesOrderID", "int"),
    ]
    .into_iter()
    .map(|(table, column, data_type)| ColumnMeta::new(SCHEMA, table, column, data_type))
    .collect()
}

pub fn foreign_keys() -> Vec<ForeignKeyEdge> {
    [
        ("SalesOrderHeader", "CustomerID", "Customer", "CustomerID"),
        ("Customer", "CustomerID", "CustomerAddress", "CustomerID"),
        ("SalesOrderHeader", "SalesOrderID", "SalesOrderDetail", "SalesOrderID"),
        ("SalesOrderDetail", "ProductID", "Product", "ProductID"),
        ("Product", "ProductCategoryID", "ProductCategory", "ProductCategoryID"),
    ]
    .into_iter()
    .map(|(parent, parent_col, referenced, referenced_col)| {
        ForeignKeyEdge::new(SCHEMA, parent, parent_col, referenced, referenced_col)
    })
    .collect()
}

pub fn catalog() -> Catalog {
    Catalog::new(columns(), foreign_keys())
}

/// The invoice extraction query: eleven fields over five tables
pub fn invoice_config() -> QueryConfig {
    QueryConfig::new(ROOT_TABLE)
        .order_by("SalesOrderID")
        .field("ORDER_ID", "SalesOrderID", "SalesOrderHeader")
        .field("CUSTOMER_ID", "CustomerID", "Customer")
        .field("CUSTOMER_NAME", "CompanyName", "Customer")
        .field("CUSTOMER_EMAIL", "EmailAddress", "Customer")
        .field("DUE_DATE", "DueDate", "SalesOrderHeader")
        .field("ORDER_LINE_ID", "SalesOrderDetailID", "SalesOrderDetail")
        .field("PRODUCT_ID", "ProductID", "Product")
        .field("PRODUCT_NAME", "Name", "Product")
        .field("QUANTITY", "OrderQty", "SalesOrderDetail")
        .field("UNIT_PRICE", "UnitPrice", "SalesOrderDetail")
        .field("CUSTOMER_ADDRESS", "AddressID", "CustomerAddress")
        .join("SalesOrderHeader", "Customer", "CustomerID")
        .join("Customer", "CustomerAddress", "CustomerID")
        .join("SalesOrderHeader", "SalesOrderDetail", "SalesOrderID")
        .join("SalesOrderDetail", "Product", "ProductID")
}

/// What [`invoice_config`] synthesizes against [`catalog`]
pub fn invoice_query() -> String {
    [
        "SELECT",
        "    SalesLT.SalesOrderHeader.SalesOrderID AS ORDER_ID,",
        "    SalesLT.Customer.CustomerID AS CUSTOMER_ID,",
        "    SalesLT.Customer.CompanyName AS CUSTOMER_NAME,",
        "    SalesLT.Customer.EmailAddress AS CUSTOMER_EMAIL,",
        "    SalesLT.SalesOrderHeader.DueDate AS DUE_DATE,",
        "    SalesLT.SalesOrderDetail.SalesOrderDetailID AS ORDER_LINE_ID,",
        "    SalesLT.Product.ProductID AS PRODUCT_ID,",
        "    SalesLT.Product.Name AS PRODUCT_NAME,",
        "    SalesLT.SalesOrderDetail.OrderQty AS QUANTITY,",
        "    SalesLT.SalesOrderDetail.UnitPrice AS UNIT_PRICE,",
        "    SalesLT.CustomerAddress.AddressID AS CUSTOMER_ADDRESS",
        "FROM SalesLT.SalesOrderHeader",
        "JOIN SalesLT.Customer ON SalesLT.SalesOrderHeader.CustomerID = SalesLT.Customer.CustomerID",
        "JOIN SalesLT.CustomerAddress ON SalesLT.Customer.CustomerID = SalesLT.CustomerAddress.CustomerID",
        "JOIN SalesLT.SalesOrderDetail ON SalesLT.SalesOrderHeader.SalesOrderID = SalesLT.SalesOrderDetail.SalesOrderID",
        "JOIN SalesLT.Product ON SalesLT.SalesOrderDetail.ProductID = SalesLT.Product.ProductID",
        "ORDER BY SalesLT.SalesOrderHeader.SalesOrderID;",
    ]
    .join("\n")
}
