//! Display formatting for country properties: en-US number grouping,
//! English conjunction lists, and the property rows of the detail view.

use crate::core::country::CountryRecord;

/// Shown when a property has no value.
pub const MISSING: &str = "--";

/// `125836021` → `125,836,021`.
pub fn format_population(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `[A]` → `A`, `[A, B]` → `A and B`, `[A, B, C]` → `A, B, and C`.
pub fn format_list<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [one] => one.as_ref().to_string(),
        [a, b] => format!("{} and {}", a.as_ref(), b.as_ref()),
        [init @ .., last] => {
            let head = init
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}, and {}", head, last.as_ref())
        }
    }
}

/// Labelled rows of the detail view, in display order.
pub fn detail_properties(country: &CountryRecord) -> Vec<(&'static str, String)> {
    let native_name = country
        .name
        .native_name
        .values()
        .next()
        .map(|n| n.official.clone());
    let currency = country
        .currencies
        .values()
        .next()
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "not exist".to_string());
    let languages: Vec<&String> = country.languages.values().collect();

    vec![
        ("Native Name", native_name.unwrap_or_else(|| MISSING.to_string())),
        ("Population", format_population(country.population)),
        ("Region", country.region.clone()),
        (
            "Sub Region",
            country
                .subregion
                .clone()
                .unwrap_or_else(|| MISSING.to_string()),
        ),
        ("Capital", or_missing(format_list(&country.capital))),
        ("Top Level Domain", or_missing(format_list(&country.tld))),
        ("Currencies", currency),
        ("Languages", or_missing(format_list(&languages))),
    ]
}

fn or_missing(value: String) -> String {
    if value.is_empty() {
        MISSING.to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{country, japan};

    #[test]
    fn test_format_population() {
        assert_eq!(format_population(0), "0");
        assert_eq!(format_population(999), "999");
        assert_eq!(format_population(1000), "1,000");
        assert_eq!(format_population(125_836_021), "125,836,021");
    }

    #[test]
    fn test_format_list() {
        let empty: [&str; 0] = [];
        assert_eq!(format_list(&empty), "");
        assert_eq!(format_list(&["Tokyo"]), "Tokyo");
        assert_eq!(format_list(&["Pretoria", "Cape Town"]), "Pretoria and Cape Town");
        assert_eq!(
            format_list(&["Pretoria", "Bloemfontein", "Cape Town"]),
            "Pretoria, Bloemfontein, and Cape Town"
        );
    }

    #[test]
    fn test_detail_properties_full_record() {
        let rows = detail_properties(&japan());
        let titles: Vec<&str> = rows.iter().map(|(t, _)| *t).collect();
        assert_eq!(
            titles,
            vec![
                "Native Name",
                "Population",
                "Region",
                "Sub Region",
                "Capital",
                "Top Level Domain",
                "Currencies",
                "Languages"
            ]
        );
        assert_eq!(rows[0].1, "日本");
        assert_eq!(rows[1].1, "125,836,021");
        assert_eq!(rows[4].1, "Tokyo");
        assert_eq!(rows[6].1, "Japanese yen");
    }

    #[test]
    fn test_detail_properties_sparse_record() {
        let rows = detail_properties(&country("Antarctica", "Antarctic"));
        assert_eq!(rows[0].1, MISSING);
        assert_eq!(rows[3].1, MISSING);
        assert_eq!(rows[4].1, MISSING);
        assert_eq!(rows[6].1, "not exist");
        assert_eq!(rows[7].1, MISSING);
    }
}
