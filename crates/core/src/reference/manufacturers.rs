//! Curated list of well-known material producers.
//!
//! Offered to the manufacturer prompt as a hint. Symbols are only ever taken
//! from the listing-loaded company directory.

/// Sector -> (symbol, company name) pairs.
pub const CURATED_MANUFACTURERS: &[(&str, &[(&str, &str)])] = &[
    (
        "Metals & Mining",
        &[
            ("BHP", "BHP Group"),
            ("RIO", "Rio Tinto"),
            ("VALE", "Vale S.A."),
            ("FCX", "Freeport-McMoRan"),
            ("NEM", "Newmont Corporation"),
            ("AA", "Alcoa Corporation"),
            ("X", "United States Steel"),
            ("NUE", "Nucor Corporation"),
            ("STLD", "Steel Dynamics"),
        ],
    ),
    (
        "Chemicals & Materials",
        &[
            ("DD", "DuPont"),
            ("DOW", "Dow Inc."),
            ("BASFY", "BASF"),
            ("LYB", "LyondellBasell"),
            ("ECL", "Ecolab"),
            ("SHW", "Sherwin-Williams"),
        ],
    ),
    (
        "Electronics & Semiconductors",
        &[
            ("INTC", "Intel"),
            ("TSM", "Taiwan Semiconductor"),
            ("AMD", "Advanced Micro Devices"),
            ("NVDA", "NVIDIA"),
            ("QCOM", "Qualcomm"),
            ("MU", "Micron Technology"),
        ],
    ),
    (
        "Energy",
        &[
            ("XOM", "Exxon Mobil"),
            ("CVX", "Chevron"),
            ("COP", "ConocoPhillips"),
            ("EOG", "EOG Resources"),
        ],
    ),
    (
        "Construction",
        &[
            ("VMC", "Vulcan Materials"),
            ("MLM", "Martin Marietta Materials"),
            ("CRH", "CRH plc"),
            ("CX", "CEMEX"),
        ],
    ),
    (
        "Specialty",
        &[
            ("ALB", "Albemarle"),
            ("SQM", "Sociedad Quimica y Minera"),
            ("FMC", "FMC Corporation"),
            ("MOS", "Mosaic Company"),
        ],
    ),
    (
        "Glass & Ceramics",
        &[
            ("GLW", "Corning"),
            ("OC", "Owens Corning"),
            ("APOG", "Apogee Enterprises"),
        ],
    ),
    (
        "Plastics & Polymers",
        &[
            ("EMN", "Eastman Chemical"),
            ("WLK", "Westlake Chemical"),
            ("HUN", "Huntsman Corporation"),
        ],
    ),
    (
        "Battery materials",
        &[
            ("LAC", "Lithium Americas"),
            ("PLL", "Piedmont Lithium"),
            ("MP", "MP Materials"),
            ("REE", "Rare Element Resources"),
        ],
    ),
    (
        "Industrial gases",
        &[
            ("APD", "Air Products & Chemicals"),
            ("LIN", "Linde plc"),
        ],
    ),
];

/// Render the curated list as prompt lines: a `Sector:` header followed by
/// `Company Name, SYMBOL` lines in the same format the model must answer in.
pub fn curated_manufacturer_lines() -> Vec<String> {
    let mut lines = Vec::new();
    for (sector, companies) in CURATED_MANUFACTURERS {
        lines.push(format!("{}:", sector));
        lines.extend(
            companies
                .iter()
                .map(|(symbol, name)| format!("{}, {}", name, symbol)),
        );
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn curated_symbols() -> Vec<&'static str> {
        CURATED_MANUFACTURERS
            .iter()
            .flat_map(|(_, companies)| companies.iter().map(|(symbol, _)| *symbol))
            .collect()
    }

    #[test]
    fn test_curated_symbols_are_unique() {
        let symbols = curated_symbols();
        let unique: HashSet<_> = symbols.iter().collect();
        assert_eq!(unique.len(), symbols.len());
    }

    #[test]
    fn test_prompt_lines() {
        let lines = curated_manufacturer_lines();
        assert_eq!(
            lines.len(),
            CURATED_MANUFACTURERS.len() + curated_symbols().len()
        );
        assert_eq!(lines[0], "Metals & Mining:");
        assert!(lines.contains(&"Alcoa Corporation, AA".to_string()));
        assert!(lines.iter().all(|line| !line.contains('(')));
    }
}
