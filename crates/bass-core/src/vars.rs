//! Shell-like `$VAR` / `${VAR}` expansion, mirroring Python's
//! `os.path.expandvars`: unknown variables are left untouched rather than
//! erroring.

use std::collections::HashMap;

/// Expand `$VAR` and `${VAR}` references in `input` using `env`. Variables
/// not present in `env` are left as-is (not replaced with an empty string).
pub fn expand_vars(input: &str, env: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(input.len());
    let bytes = input.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'$' && i + 1 < bytes.len() {
            if bytes[i + 1] == b'{' {
                if let Some(end) = input[i + 2..].find('}') {
                    let name = &input[i + 2..i + 2 + end];
                    match env.get(name) {
                        Some(value) => out.push_str(value),
                        None => out.push_str(&input[i..i + 3 + end]),
                    }
                    i += 3 + end;
                    continue;
                }
            } else if is_var_start(bytes[i + 1]) {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && is_var_char(bytes[end]) {
                    end += 1;
                }
                let name = &input[start..end];
                match env.get(name) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&input[i..end]),
                }
                i = end;
                continue;
            }
        }
        out.push(bytes[i] as char);
        i += 1;
    }

    out
}

fn is_var_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_var_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn expands_simple_var() {
        let e = env(&[("VAR", "value")]);
        assert_eq!(expand_vars("prefix-$VAR-suffix", &e), "prefix-value-suffix");
    }

    #[test]
    fn expands_braced_var() {
        let e = env(&[("VAR", "value")]);
        assert_eq!(expand_vars("${VAR}x", &e), "valuex");
    }

    #[test]
    fn leaves_unknown_var_untouched() {
        let e = env(&[]);
        assert_eq!(expand_vars("$UNKNOWN", &e), "$UNKNOWN");
    }

    #[test]
    fn leaves_dollar_without_var_untouched() {
        let e = env(&[]);
        assert_eq!(expand_vars("cost: $5", &e), "cost: $5");
    }
}
