use crate::error::ChemError;

/// Parse a molecule key such as `C_6_H_12_O_6` into `(symbol, count)` pairs.
///
/// Underscores are ignored. A symbol is one uppercase letter, optionally
/// followed by one lowercase letter, then an optional count (default 1).
/// Repeated symbols are summed (`C_2_H_5_O_H` gives H = 6) and the result
/// keeps first-appearance order. Characters that cannot start a symbol are
/// skipped. Counts that do not fit a `u32`, alone or summed, are an error.
pub fn parse_formula(formula: &str) -> Result<Vec<(String, u32)>, ChemError> {
    let invalid = |reason: String| ChemError::InvalidFormula {
        key: formula.to_string(),
        reason,
    };
    let chars: Vec<char> = formula.chars().filter(|&c| c != '_').collect();
    let mut out: Vec<(String, u32)> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_ascii_uppercase() {
            i += 1;
            continue;
        }

        let mut symbol = chars[i].to_string();
        i += 1;
        if i < chars.len() && chars[i].is_ascii_lowercase() {
            symbol.push(chars[i]);
            i += 1;
        }

        let start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        let count = if start == i {
            1
        } else {
            let digits: String = chars[start..i].iter().collect();
            digits
                .parse::<u32>()
                .map_err(|_| invalid(format!("count {} for {} is out of range", digits, symbol)))?
        };

        match out.iter_mut().find(|(s, _)| *s == symbol) {
            Some((_, n)) => {
                *n = n
                    .checked_add(count)
                    .ok_or_else(|| invalid(format!("total count for {} overflows", symbol)))?;
            }
            None => out.push((symbol, count)),
        }
    }

    Ok(out)
}
