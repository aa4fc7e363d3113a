use common::values::is_data_element_token;
use common::{ErrorTree, FieldPath};

use super::{FieldManifest, FieldView};
use crate::form::FormState;

const KEY: &str = "currency";

/// ISO-4217 alphabetic codes offered by the currency combo box.
pub const CURRENCY_CODES: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN", "BAM", "BBD", "BDT",
    "BGN", "BHD", "BIF", "BMD", "BND", "BOB", "BOV", "BRL", "BSD", "BTN", "BWP", "BYN", "BZD",
    "CAD", "CDF", "CHE", "CHF", "CHW", "CLF", "CLP", "CNY", "COP", "COU", "CRC", "CUC", "CUP",
    "CVE", "CZK", "DJF", "DKK", "DOP", "DZD", "EGP", "ERN", "ETB", "EUR", "FJD", "FKP", "GBP",
    "GEL", "GHS", "GIP", "GMD", "GNF", "GTQ", "GYD", "HKD", "HNL", "HTG", "HUF", "IDR", "ILS",
    "INR", "IQD", "IRR", "ISK", "JMD", "JOD", "JPY", "KES", "KGS", "KHR", "KMF", "KPW", "KRW",
    "KWD", "KYD", "KZT", "LAK", "LBP", "LKR", "LRD", "LSL", "LYD", "MAD", "MDL", "MGA", "MKD",
    "MMK", "MNT", "MOP", "MRU", "MUR", "MVR", "MWK", "MXN", "MXV", "MYR", "MZN", "NAD", "NGN",
    "NIO", "NOK", "NPR", "NZD", "OMR", "PAB", "PEN", "PGK", "PHP", "PKR", "PLN", "PYG", "QAR",
    "RON", "RSD", "RUB", "RWF", "SAR", "SBD", "SCR", "SDG", "SEK", "SGD", "SHP", "SLE", "SLL",
    "SOS", "SRD", "SSP", "STN", "SVC", "SYP", "SZL", "THB", "TJS", "TMT", "TND", "TOP", "TRY",
    "TTD", "TWD", "TZS", "UAH", "UGX", "USD", "USN", "UYI", "UYU", "UYW", "UZS", "VED", "VES",
    "VND", "VUV", "WST", "XAF", "XAG", "XAU", "XBA", "XBB", "XBC", "XBD", "XCD", "XDR", "XOF",
    "XPD", "XPF", "XPT", "XSU", "XTS", "XUA", "XXX", "YER", "ZAR", "ZMW", "ZWL",
];

pub struct CurrencyField;

impl FieldManifest for CurrencyField {
    fn key(&self) -> &str {
        KEY
    }

    fn label(&self) -> &str {
        "Currency"
    }

    fn description(&self) -> Option<&str> {
        Some("ISO-4217 compliant currency code for the value specified or a data element.")
    }

    // Only obviously short codes are rejected; anything of three or more
    // characters is left for the pixel to judge.
    fn validate(&self, form: &FormState) -> ErrorTree {
        let value = form.value(KEY);
        if is_data_element_token(value) {
            return ErrorTree::new();
        }

        match value.as_str() {
            Some(code) if !code.is_empty() && code.chars().count() < 3 => ErrorTree::single(
                FieldPath::field(KEY),
                "The currency must be an ISO-4217 currency code or a data element.",
            ),
            _ => ErrorTree::new(),
        }
    }

    fn render(&self) -> FieldView {
        FieldView::combo_box(KEY, self.label(), self.description(), CURRENCY_CODES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_codes() {
        let form = FormState::new().with_value(KEY, "US");
        assert_eq!(
            CurrencyField.validate(&form).field(KEY),
            Some("The currency must be an ISO-4217 currency code or a data element.")
        );

        for accepted in ["USD", "%currency%", ""] {
            let form = FormState::new().with_value(KEY, accepted);
            assert!(CurrencyField.validate(&form).is_empty(), "{accepted}");
        }
    }

    #[test]
    fn code_list_is_sorted() {
        assert!(CURRENCY_CODES.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(CURRENCY_CODES.contains(&"EUR"));
    }
}
