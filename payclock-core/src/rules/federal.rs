use std::sync::LazyLock;

use rust_decimal_macros::dec;

use crate::models::BracketTable;

static FEDERAL_2024: LazyLock<BracketTable> = LazyLock::new(|| {
    BracketTable::from_trusted(&[
        (dec!(0), dec!(0.10)),
        (dec!(11601), dec!(0.12)),
        (dec!(47151), dec!(0.22)),
        (dec!(100526), dec!(0.24)),
        (dec!(191951), dec!(0.32)),
        (dec!(243726), dec!(0.35)),
        (dec!(609351), dec!(0.37)),
    ])
});

/// 2024 federal income tax brackets for a single filer.
pub fn federal_brackets_2024() -> &'static BracketTable {
    &FEDERAL_2024
}
