use sea_synth::{MockCatalog, tests_cfg::adventure_works};

pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// The AdventureWorks fixture behind a [`MockCatalog`]
pub fn adventure_works_mock() -> MockCatalog {
    MockCatalog::new()
        .append_columns(adventure_works::columns())
        .append_foreign_keys(adventure_works::foreign_keys())
}
