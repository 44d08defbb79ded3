//! Static country list for the lookup form's country filter.

use serde::Serialize;

use crate::cache::COUNTRY_ALL;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CountryCode {
    pub code: &'static str,
    pub name: &'static str,
}

/// Ordered list served to the country picker. The `ALL` sentinel comes
/// first and means "no country filter".
pub const COUNTRY_CODES: &[CountryCode] = &[
    CountryCode { code: COUNTRY_ALL, name: "All" },
    CountryCode { code: "AR", name: "Argentina" },
    CountryCode { code: "AT", name: "Austria" },
    CountryCode { code: "AU", name: "Australia" },
    CountryCode { code: "BE", name: "Belgium" },
    CountryCode { code: "BG", name: "Bulgaria" },
    CountryCode { code: "BR", name: "Brazil" },
    CountryCode { code: "CA", name: "Canada" },
    CountryCode { code: "CH", name: "Switzerland" },
    CountryCode { code: "CL", name: "Chile" },
    CountryCode { code: "CN", name: "China" },
    CountryCode { code: "CO", name: "Colombia" },
    CountryCode { code: "CZ", name: "Czechia" },
    CountryCode { code: "DE", name: "Germany" },
    CountryCode { code: "DK", name: "Denmark" },
    CountryCode { code: "EG", name: "Egypt" },
    CountryCode { code: "ES", name: "Spain" },
    CountryCode { code: "FI", name: "Finland" },
    CountryCode { code: "FR", name: "France" },
    CountryCode { code: "GB", name: "United Kingdom" },
    CountryCode { code: "GR", name: "Greece" },
    CountryCode { code: "HR", name: "Croatia" },
    CountryCode { code: "HU", name: "Hungary" },
    CountryCode { code: "ID", name: "Indonesia" },
    CountryCode { code: "IE", name: "Ireland" },
    CountryCode { code: "IL", name: "Israel" },
    CountryCode { code: "IN", name: "India" },
    CountryCode { code: "IT", name: "Italy" },
    CountryCode { code: "JP", name: "Japan" },
    CountryCode { code: "KR", name: "South Korea" },
    CountryCode { code: "MX", name: "Mexico" },
    CountryCode { code: "NL", name: "Netherlands" },
    CountryCode { code: "NO", name: "Norway" },
    CountryCode { code: "NZ", name: "New Zealand" },
    CountryCode { code: "PL", name: "Poland" },
    CountryCode { code: "PT", name: "Portugal" },
    CountryCode { code: "RO", name: "Romania" },
    CountryCode { code: "RS", name: "Serbia" },
    CountryCode { code: "SE", name: "Sweden" },
    CountryCode { code: "SK", name: "Slovakia" },
    CountryCode { code: "TH", name: "Thailand" },
    CountryCode { code: "TR", name: "Türkiye" },
    CountryCode { code: "UA", name: "Ukraine" },
    CountryCode { code: "US", name: "United States" },
    CountryCode { code: "VN", name: "Vietnam" },
    CountryCode { code: "ZA", name: "South Africa" },
];
