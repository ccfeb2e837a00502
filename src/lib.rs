#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(
    missing_debug_implementations,
    clippy::print_stderr,
    clippy::print_stdout
)]

//! # SeaSynth
//!
//! Turns a set of required business fields into a join query over a schema
//! that is only known at run time.
//!
//! Given the columns and foreign keys of a catalog, and a configuration
//! naming each logical field, the column expected to back it and the table
//! owning it, SeaSynth
//!
//! 1. locates the physical column of every field ([`FieldLocator`]),
//! 2. matches the declared joins against the foreign keys
//!    ([`JoinGraphResolver`]),
//! 3. renders a deterministic SELECT statement ([`QuerySynthesizer`]).
//!
//! [`QueryGenerator`] runs the three steps against a [`SchemaCatalog`].
//! Fields or joins that cannot be resolved are dropped and listed in the
//! [`DiagnosticReport`], unless strict mode is on.
//!
//! ```
//! use sea_synth::{Catalog, ColumnMeta, ForeignKeyEdge, QueryConfig, QueryGenerator};
//!
//! let catalog = Catalog::new(
//!     vec![
//!         ColumnMeta::new("SalesLT", "Customer", "CompanyName", "nvarchar"),
//!         ColumnMeta::new("SalesLT", "SalesOrderHeader", "SalesOrderID", "int"),
//!     ],
//!     vec![ForeignKeyEdge::new(
//!         "SalesLT",
//!         "SalesOrderHeader",
//!         "CustomerID",
//!         "Customer",
//!         "CustomerID",
//!     )],
//! );
//! let config = QueryConfig::new("SalesLT.SalesOrderHeader")
//!     .field("ORDER_ID", "SalesOrderID", "SalesOrderHeader")
//!     .field("CUSTOMER_NAME", "CompanyName", "Customer")
//!     .join("SalesOrderHeader", "Customer", "CustomerID");
//!
//! let generator = QueryGenerator::new(config);
//! let resolution = generator.resolve(&catalog)?;
//! assert!(resolution.report().is_clean());
//!
//! let query = resolution.synthesize()?;
//! assert_eq!(
//!     query.as_str(),
//!     [
//!         "SELECT",
//!         "    SalesLT.SalesOrderHeader.SalesOrderID AS ORDER_ID,",
//!         "    SalesLT.Customer.CompanyName AS CUSTOMER_NAME",
//!         "FROM SalesLT.SalesOrderHeader",
//!         "JOIN SalesLT.Customer ON SalesLT.SalesOrderHeader.CustomerID = SalesLT.Customer.CustomerID",
//!         "ORDER BY SalesLT.SalesOrderHeader.SalesOrderID;",
//!     ]
//!     .join("\n")
//! );
//! # Ok::<(), sea_synth::SynthErr>(())
//! ```

mod alias;
mod catalog;
mod config;
mod discovery;
pub mod error;
mod generator;
mod locator;
mod report;
mod resolver;
mod synthesizer;
#[doc(hidden)]
#[cfg(feature = "tests-cfg")]
pub mod tests_cfg;

pub use alias::*;
pub use catalog::*;
pub use config::*;
pub use discovery::*;
pub use error::*;
pub use generator::*;
pub use locator::*;
pub use report::*;
pub use resolver::*;
pub use synthesizer::*;
