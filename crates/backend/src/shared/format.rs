/// Форматирует число с разделителями тысяч (пробелами), знак сохраняется
pub fn format_amount(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(' ');
        }
        result.push(ch);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

/// Сумма с валютой: "150 000 MNT"
pub fn format_money(n: i64, currency: &str) -> String {
    format!("{} {}", format_amount(n), currency)
}
