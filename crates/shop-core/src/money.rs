//! # Money Formatting
//!
//! Fixed-locale currency display for the storefront. The store sells in a
//! single locale/currency pair (pt-BR / BRL) and this is a hard-coded policy,
//! not a configuration knob. Amounts arrive from the provider in minor units
//! (centavos) and are rendered with a dot for thousands grouping and a comma
//! for decimals, e.g. `R$ 1.234,56`.

/// Format a minor-unit (centavo) amount as a pt-BR BRL display string.
///
/// `19900` becomes `"R$ 199,00"`, `5000` becomes `"R$ 50,00"`.
pub fn format_brl(unit_amount: i64) -> String {
    let sign = if unit_amount < 0 { "-" } else { "" };
    let abs = unit_amount.unsigned_abs();
    let reais = abs / 100;
    let centavos = abs % 100;

    format!("{}R$ {},{:02}", sign, group_thousands(reais), centavos)
}

/// Insert pt-BR thousands separators: `1234567` -> `"1.234.567"`
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    grouped
}
