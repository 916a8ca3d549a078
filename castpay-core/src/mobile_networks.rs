//! Pretium mobile-money networks and the on-ramp service fee.

use rust_decimal::Decimal;

/// A mobile-money network and the free-text spellings users type for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MobileNetwork {
    pub name: &'static str,
    aliases: &'static [&'static str],
}

const fn network(name: &'static str, aliases: &'static [&'static str]) -> MobileNetwork {
    MobileNetwork { name, aliases }
}

const SAFARICOM: MobileNetwork = network("Safaricom", &["safaricom", "mpesa"]);
const AIRTEL: MobileNetwork = network("Airtel", &["airtel", "airtelmoney"]);
const MTN: MobileNetwork = network("MTN", &["mtn", "mtnmomo", "momo"]);
const TELECEL: MobileNetwork = network("Telecel", &["telecel", "vodafone", "vodafonecash"]);
const AIRTEL_TIGO: MobileNetwork =
    network("AirtelTigo", &["airteltigo", "at", "atmoney", "tigo"]);
const TNM: MobileNetwork = network("TNM", &["tnm", "mpamba"]);
const ORANGE: MobileNetwork = network("Orange", &["orange", "orangemoney"]);
const VODACOM: MobileNetwork = network("Vodacom", &["vodacom", "mpesa"]);

const NETWORKS: &[(&str, &[MobileNetwork])] = &[
    ("KE", &[SAFARICOM, AIRTEL]),
    ("GH", &[MTN, TELECEL, AIRTEL_TIGO]),
    ("UG", &[MTN, AIRTEL]),
    ("MW", &[AIRTEL, TNM]),
    ("CD", &[AIRTEL, ORANGE, VODACOM]),
];

/// Networks Pretium supports in a country. Unknown countries have none.
pub fn networks_for(country_code: &str) -> &'static [MobileNetwork] {
    let code = country_code.trim();
    NETWORKS
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, networks)| *networks)
        .unwrap_or(&[])
}

fn squash(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Canonical network name for free text like `"M-Pesa"` or `"mtn momo"`.
pub fn normalize_network(country_code: &str, input: &str) -> Option<&'static str> {
    let needle = squash(input);
    if needle.is_empty() {
        return None;
    }
    networks_for(country_code)
        .iter()
        .find(|n| n.aliases.contains(&needle.as_str()))
        .map(|n| n.name)
}

/// On-ramp service fee: half a percent, at least one cent.
pub fn service_fee(amount: Decimal) -> Decimal {
    let minimum = Decimal::new(1, 2);
    let rate = Decimal::new(5, 3);
    (amount * rate).max(minimum)
}
