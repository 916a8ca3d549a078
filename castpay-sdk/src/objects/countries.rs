//! Countries the mini-app can pay out to or collect from.

use serde::Serialize;

/// A supported country with its settlement fiat currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, upper case.
    pub code: &'static str,
    pub name: &'static str,
    /// ISO 4217 code of the local fiat currency.
    pub currency: &'static str,
}

pub const NIGERIA: Country = Country {
    code: "NG",
    name: "Nigeria",
    currency: "NGN",
};
pub const KENYA: Country = Country {
    code: "KE",
    name: "Kenya",
    currency: "KES",
};
pub const GHANA: Country = Country {
    code: "GH",
    name: "Ghana",
    currency: "GHS",
};
pub const UGANDA: Country = Country {
    code: "UG",
    name: "Uganda",
    currency: "UGX",
};
pub const TANZANIA: Country = Country {
    code: "TZ",
    name: "Tanzania",
    currency: "TZS",
};
pub const MALAWI: Country = Country {
    code: "MW",
    name: "Malawi",
    currency: "MWK",
};
pub const DR_CONGO: Country = Country {
    code: "CD",
    name: "DR Congo",
    currency: "CDF",
};

/// Every country the app knows about, in display order.
pub const SUPPORTED_COUNTRIES: &[Country] =
    &[NIGERIA, KENYA, GHANA, UGANDA, TANZANIA, MALAWI, DR_CONGO];

impl Country {
    /// Look up a country by its alpha-2 code (case-insensitive).
    pub fn by_code(code: &str) -> Option<Country> {
        let code = code.trim();
        SUPPORTED_COUNTRIES
            .iter()
            .copied()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }

    /// Look up a country by its fiat currency code (case-insensitive).
    pub fn by_currency(currency: &str) -> Option<Country> {
        let currency = currency.trim();
        SUPPORTED_COUNTRIES
            .iter()
            .copied()
            .find(|c| c.currency.eq_ignore_ascii_case(currency))
    }

    /// URL of the country's flag image.
    pub fn flag_url(&self) -> String {
        flag_url(self.code)
    }
}

/// Flag image URL for an alpha-2 country code.
pub fn flag_url(code: &str) -> String {
    format!("https://flagcdn.com/w80/{}.png", code.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(Country::by_code("gh"), Some(GHANA));
        assert_eq!(Country::by_code(" KE "), Some(KENYA));
        assert_eq!(Country::by_currency("tzs"), Some(TANZANIA));
        assert_eq!(Country::by_code("US"), None);
    }

    #[test]
    fn test_flag_url() {
        assert_eq!(GHANA.flag_url(), "https://flagcdn.com/w80/gh.png");
    }
}
