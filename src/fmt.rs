use chrono::NaiveDateTime;

/// Format a float as a rupee amount with Indian digit grouping: ₹1,23,456.78
pub fn money(val: f64) -> String {
    let negative = val < 0.0;
    let abs = val.abs();
    let paise = format!("{:.2}", abs);
    let (int_part, dec_part) = paise.split_once('.').unwrap_or((paise.as_str(), "00"));

    // Last three digits form one group, everything before groups in pairs.
    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::new();
    let head_len = digits.len().saturating_sub(3);
    for (i, c) in digits[..head_len].iter().enumerate() {
        if i > 0 && (head_len - i) % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    if head_len > 0 {
        grouped.push(',');
    }
    grouped.extend(&digits[head_len..]);

    if negative {
        format!("-\u{20b9}{grouped}.{dec_part}")
    } else {
        format!("\u{20b9}{grouped}.{dec_part}")
    }
}

/// `Mon, 1 January 2024`
pub fn long_date(dt: &NaiveDateTime) -> String {
    dt.format("%a, %-d %B %Y").to_string()
}

/// `10:00 AM`
pub fn clock_time(dt: &NaiveDateTime) -> String {
    dt.format("%I:%M %p").to_string()
}
