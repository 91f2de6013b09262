/// `$` + montant arrondi à l'entier, milliers séparés par des virgules.
pub fn format_rent(value: f64) -> String {
    // arrondi demi vers +∞
    let rounded = (value + 0.5).floor() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("$-{grouped}")
    } else {
        format!("${grouped}")
    }
}
