//! printf-style message interpolation
//!
//! Supported placeholders: `%s`, `%d`, `%i`, `%f`, `%j`, `%o`, `%O` and `%%`.

use serde_json::Value;

/// Resolve placeholders in `template` against `args`
///
/// With no arguments the template is returned verbatim. Placeholders without
/// a matching argument stay literal, surplus arguments are appended.
pub fn format_message(template: &str, args: &[Value]) -> String {
    if args.is_empty() {
        return template.to_string();
    }

    let mut output = String::with_capacity(template.len() + args.len() * 8);
    let mut remaining = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            output.push(c);
            continue;
        }

        let Some(&spec) = chars.peek() else {
            output.push('%');
            break;
        };

        match spec {
            '%' => {
                chars.next();
                output.push('%');
            }
            's' | 'd' | 'i' | 'f' | 'j' | 'o' | 'O' => {
                chars.next();
                match remaining.next() {
                    Some(arg) => output.push_str(&render(spec, arg)),
                    None => {
                        output.push('%');
                        output.push(spec);
                    }
                }
            }
            _ => output.push('%'),
        }
    }

    for arg in remaining {
        output.push(' ');
        output.push_str(&render('s', arg));
    }

    output
}

fn render(spec: char, arg: &Value) -> String {
    match spec {
        'd' | 'i' => match arg.as_f64() {
            Some(n) if spec == 'i' || n.fract() == 0.0 => format!("{}", n.trunc() as i64),
            Some(n) => n.to_string(),
            None => "NaN".to_string(),
        },
        'f' => arg
            .as_f64()
            .map(|n| n.to_string())
            .unwrap_or_else(|| "NaN".to_string()),
        'j' | 'o' | 'O' => arg.to_string(),
        _ => match arg {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    }
}
