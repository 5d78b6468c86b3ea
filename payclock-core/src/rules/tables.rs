//! 2024 state income tax rules for a single filer.
//!
//! Thresholds are the inclusive lower bound at which each marginal rate
//! begins. Figures are approximations; see the crate docs for what is not
//! modelled.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{BracketTable, TaxRule};

/// Two-letter postal codes and the canonical name each resolves to.
pub(crate) const POSTAL_ALIASES: &[(&str, &str)] = &[
    ("al", "alabama"),
    ("ak", "alaska"),
    ("az", "arizona"),
    ("ar", "arkansas"),
    ("ca", "california"),
    ("co", "colorado"),
    ("ct", "connecticut"),
    ("de", "delaware"),
    ("fl", "florida"),
    ("ga", "georgia"),
    ("hi", "hawaii"),
    ("id", "idaho"),
    ("il", "illinois"),
    ("in", "indiana"),
    ("ia", "iowa"),
    ("ks", "kansas"),
    ("ky", "kentucky"),
    ("la", "louisiana"),
    ("me", "maine"),
    ("md", "maryland"),
    ("ma", "massachusetts"),
    ("mi", "michigan"),
    ("mn", "minnesota"),
    ("ms", "mississippi"),
    ("mo", "missouri"),
    ("mt", "montana"),
    ("ne", "nebraska"),
    ("nv", "nevada"),
    ("nh", "new hampshire"),
    ("nj", "new jersey"),
    ("nm", "new mexico"),
    ("ny", "new york"),
    ("nc", "north carolina"),
    ("nd", "north dakota"),
    ("oh", "ohio"),
    ("ok", "oklahoma"),
    ("or", "oregon"),
    ("pa", "pennsylvania"),
    ("ri", "rhode island"),
    ("sc", "south carolina"),
    ("sd", "south dakota"),
    ("tn", "tennessee"),
    ("tx", "texas"),
    ("ut", "utah"),
    ("vt", "vermont"),
    ("va", "virginia"),
    ("wa", "washington"),
    ("wv", "west virginia"),
    ("wi", "wisconsin"),
    ("wy", "wyoming"),
];

const NO_INCOME_TAX: &[&str] = &[
    "alaska",
    "florida",
    "nevada",
    // wages not taxed
    "new hampshire",
    "south dakota",
    "tennessee",
    "texas",
    // wage income
    "washington",
    "wyoming",
];

fn flat_rates() -> Vec<(&'static str, Decimal)> {
    vec![
        ("arizona", dec!(0.025)),
        ("colorado", dec!(0.044)),
        ("georgia", dec!(0.0539)),
        ("idaho", dec!(0.058)),
        ("illinois", dec!(0.0495)),
        ("indiana", dec!(0.0305)),
        ("kentucky", dec!(0.04)),
        ("michigan", dec!(0.0425)),
        ("north carolina", dec!(0.045)),
        ("pennsylvania", dec!(0.0307)),
        ("utah", dec!(0.0455)),
    ]
}

fn progressive(brackets: &[(Decimal, Decimal)]) -> TaxRule {
    TaxRule::Progressive {
        brackets: BracketTable::from_trusted(brackets),
    }
}

fn progressive_rules() -> Vec<(&'static str, TaxRule)> {
    vec![
        (
            "alabama",
            progressive(&[
                (dec!(0), dec!(0.02)),
                (dec!(500), dec!(0.04)),
                (dec!(3000), dec!(0.05)),
            ]),
        ),
        (
            "arkansas",
            progressive(&[
                (dec!(0), dec!(0.02)),
                (dec!(4400), dec!(0.04)),
                (dec!(8800), dec!(0.044)),
            ]),
        ),
        (
            "california",
            progressive(&[
                (dec!(0), dec!(0.01)),
                (dec!(10412), dec!(0.02)),
                (dec!(24684), dec!(0.04)),
                (dec!(38959), dec!(0.06)),
                (dec!(54081), dec!(0.08)),
                (dec!(68350), dec!(0.093)),
                (dec!(349137), dec!(0.103)),
                (dec!(418961), dec!(0.113)),
                (dec!(698271), dec!(0.123)),
                (dec!(1000000), dec!(0.133)),
            ]),
        ),
        (
            "connecticut",
            progressive(&[
                (dec!(0), dec!(0.02)),
                (dec!(10000), dec!(0.045)),
                (dec!(50000), dec!(0.055)),
                (dec!(100000), dec!(0.06)),
                (dec!(200000), dec!(0.065)),
                (dec!(500000), dec!(0.0699)),
            ]),
        ),
        (
            "delaware",
            progressive(&[
                (dec!(2000), dec!(0.022)),
                (dec!(5000), dec!(0.039)),
                (dec!(10000), dec!(0.048)),
                (dec!(20000), dec!(0.052)),
                (dec!(25000), dec!(0.0555)),
                (dec!(60000), dec!(0.066)),
            ]),
        ),
        (
            "hawaii",
            progressive(&[
                (dec!(0), dec!(0.014)),
                (dec!(2400), dec!(0.032)),
                (dec!(4800), dec!(0.055)),
                (dec!(9600), dec!(0.064)),
                (dec!(14400), dec!(0.068)),
                (dec!(19200), dec!(0.072)),
                (dec!(24000), dec!(0.076)),
                (dec!(36000), dec!(0.079)),
                (dec!(48000), dec!(0.0825)),
                (dec!(150000), dec!(0.09)),
                (dec!(175000), dec!(0.10)),
                (dec!(200000), dec!(0.11)),
            ]),
        ),
        (
            "iowa",
            progressive(&[
                (dec!(0), dec!(0.044)),
                (dec!(6210), dec!(0.0482)),
                (dec!(31050), dec!(0.057)),
            ]),
        ),
        (
            "kansas",
            progressive(&[
                (dec!(0), dec!(0.031)),
                (dec!(15000), dec!(0.0525)),
                (dec!(30000), dec!(0.057)),
            ]),
        ),
        (
            "louisiana",
            progressive(&[
                (dec!(0), dec!(0.0185)),
                (dec!(12500), dec!(0.035)),
                (dec!(50000), dec!(0.0425)),
            ]),
        ),
        (
            "maine",
            progressive(&[
                (dec!(0), dec!(0.058)),
                (dec!(26050), dec!(0.0675)),
                (dec!(61600), dec!(0.0715)),
            ]),
        ),
        (
            "maryland",
            progressive(&[
                (dec!(0), dec!(0.02)),
                (dec!(1000), dec!(0.03)),
                (dec!(2000), dec!(0.04)),
                (dec!(3000), dec!(0.0475)),
                (dec!(100000), dec!(0.05)),
                (dec!(125000), dec!(0.0525)),
                (dec!(150000), dec!(0.055)),
                (dec!(250000), dec!(0.0575)),
            ]),
        ),
        (
            "massachusetts",
            // 9% above $1M is the millionaire's surtax
            progressive(&[(dec!(0), dec!(0.05)), (dec!(1000000), dec!(0.09))]),
        ),
        (
            "minnesota",
            progressive(&[
                (dec!(0), dec!(0.0535)),
                (dec!(31690), dec!(0.068)),
                (dec!(104090), dec!(0.0785)),
                (dec!(193240), dec!(0.0985)),
            ]),
        ),
        (
            "mississippi",
            // first $10k untaxed
            progressive(&[(dec!(10000), dec!(0.047))]),
        ),
        (
            "missouri",
            progressive(&[
                (dec!(1273), dec!(0.02)),
                (dec!(2546), dec!(0.025)),
                (dec!(3819), dec!(0.03)),
                (dec!(5092), dec!(0.035)),
                (dec!(6365), dec!(0.04)),
                (dec!(7638), dec!(0.045)),
                (dec!(8911), dec!(0.048)),
            ]),
        ),
        (
            "montana",
            progressive(&[(dec!(0), dec!(0.047)), (dec!(20500), dec!(0.059))]),
        ),
        (
            "nebraska",
            progressive(&[
                (dec!(0), dec!(0.0246)),
                (dec!(3700), dec!(0.0351)),
                (dec!(22170), dec!(0.0501)),
                (dec!(35730), dec!(0.0584)),
            ]),
        ),
        (
            "new jersey",
            progressive(&[
                (dec!(0), dec!(0.014)),
                (dec!(20000), dec!(0.0175)),
                (dec!(35000), dec!(0.035)),
                (dec!(40000), dec!(0.05525)),
                (dec!(75000), dec!(0.0637)),
                (dec!(500000), dec!(0.0897)),
                (dec!(1000000), dec!(0.1075)),
            ]),
        ),
        (
            "new mexico",
            progressive(&[
                (dec!(0), dec!(0.017)),
                (dec!(5500), dec!(0.032)),
                (dec!(11000), dec!(0.047)),
                (dec!(16000), dec!(0.049)),
                (dec!(210000), dec!(0.059)),
            ]),
        ),
        (
            "new york",
            progressive(&[
                (dec!(0), dec!(0.04)),
                (dec!(8500), dec!(0.045)),
                (dec!(11700), dec!(0.0525)),
                (dec!(13900), dec!(0.055)),
                (dec!(80650), dec!(0.06)),
                (dec!(215400), dec!(0.0685)),
                (dec!(1077550), dec!(0.0965)),
                (dec!(5000000), dec!(0.103)),
                (dec!(25000000), dec!(0.109)),
            ]),
        ),
        (
            "north dakota",
            progressive(&[(dec!(44725), dec!(0.0195)), (dec!(225975), dec!(0.025))]),
        ),
        (
            "ohio",
            progressive(&[(dec!(26050), dec!(0.02765)), (dec!(92150), dec!(0.035))]),
        ),
        (
            "oklahoma",
            progressive(&[
                (dec!(0), dec!(0.0025)),
                (dec!(1000), dec!(0.0075)),
                (dec!(2500), dec!(0.0175)),
                (dec!(3750), dec!(0.0275)),
                (dec!(4900), dec!(0.0375)),
                (dec!(7200), dec!(0.0475)),
            ]),
        ),
        (
            "oregon",
            progressive(&[
                (dec!(0), dec!(0.0475)),
                (dec!(4300), dec!(0.0675)),
                (dec!(10750), dec!(0.0875)),
                (dec!(125000), dec!(0.099)),
            ]),
        ),
        (
            "rhode island",
            progressive(&[
                (dec!(0), dec!(0.0375)),
                (dec!(77450), dec!(0.0475)),
                (dec!(176050), dec!(0.0599)),
            ]),
        ),
        (
            "south carolina",
            progressive(&[(dec!(3460), dec!(0.03)), (dec!(17330), dec!(0.064))]),
        ),
        (
            "vermont",
            progressive(&[
                (dec!(0), dec!(0.0335)),
                (dec!(45400), dec!(0.066)),
                (dec!(110050), dec!(0.076)),
                (dec!(229550), dec!(0.0875)),
            ]),
        ),
        (
            "virginia",
            progressive(&[
                (dec!(0), dec!(0.02)),
                (dec!(3000), dec!(0.03)),
                (dec!(5000), dec!(0.05)),
                (dec!(17000), dec!(0.0575)),
            ]),
        ),
        (
            "west virginia",
            progressive(&[
                (dec!(0), dec!(0.0236)),
                (dec!(10000), dec!(0.0315)),
                (dec!(25000), dec!(0.0354)),
                (dec!(40000), dec!(0.0472)),
                (dec!(60000), dec!(0.0512)),
            ]),
        ),
        (
            "wisconsin",
            progressive(&[
                (dec!(0), dec!(0.035)),
                (dec!(14320), dec!(0.044)),
                (dec!(28640), dec!(0.053)),
                (dec!(315310), dec!(0.0765)),
            ]),
        ),
    ]
}

/// Every canonical jurisdiction with its rule.
pub(crate) fn state_rules_2024() -> Vec<(&'static str, TaxRule)> {
    let none = NO_INCOME_TAX.iter().map(|&name| (name, TaxRule::None));
    let flat = flat_rates()
        .into_iter()
        .map(|(name, rate)| (name, TaxRule::Flat { rate }));

    none.chain(flat).chain(progressive_rules()).collect()
}
