/// Canonical form for headers and category values: trimmed, upper-cased,
/// inner whitespace collapsed, Spanish accents folded (Ñ is kept).
///
/// `" Fecha  de Facturación "` -> `"FECHA DE FACTURACION"`
pub fn normalize_token(raw: &str) -> String {
    raw.trim_start_matches('\u{FEFF}')
        .split_whitespace()
        .map(|word| {
            word.chars()
                .flat_map(char::to_uppercase)
                .map(fold_accent)
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn fold_accent(c: char) -> char {
    match c {
        'Á' | 'À' | 'Â' | 'Ä' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Ö' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        other => other,
    }
}

/// True when `numeral` occurs in `text` as a whole number, so `60` matches
/// `"CONTROL 60 DIAS"` and `"60D"` but not `"CONTROL 360 DIAS"`.
pub fn contains_number(text: &str, numeral: &str) -> bool {
    if numeral.is_empty() {
        return false;
    }
    let bytes = text.as_bytes();
    text.match_indices(numeral).any(|(start, _)| {
        let end = start + numeral.len();
        let digit_before = start > 0 && bytes[start - 1].is_ascii_digit();
        let digit_after = end < bytes.len() && bytes[end].is_ascii_digit();
        !digit_before && !digit_after
    })
}
