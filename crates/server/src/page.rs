//! The single HTML page: input form plus an optional result or error.

use feature_spi::RAW_FEATURE_NAMES;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn label(name: &str) -> String {
    let mut words: Vec<String> = name
        .split('_')
        .map(|w| match w {
            "amt" => "amount".to_string(),
            "fico" => "FICO".to_string(),
            other => other.to_string(),
        })
        .collect();
    if let Some(first) = words.first_mut() {
        let mut chars = first.chars();
        if let Some(c) = chars.next() {
            *first = c.to_uppercase().chain(chars).collect();
        }
    }
    words.join(" ")
}

/// Render the form. `prediction` and `error` are escaped.
pub fn render(prediction: Option<&str>, error: Option<&str>) -> String {
    let mut fields = String::new();
    for name in RAW_FEATURE_NAMES {
        fields.push_str(&format!(
            "      <label for=\"{name}\">{}</label>\n      <input type=\"text\" id=\"{name}\" name=\"{name}\" required>\n",
            label(name)
        ));
    }
    let mut notices = String::new();
    if let Some(text) = prediction {
        notices.push_str(&format!(
            "    <p class=\"prediction\">Predicted Status: {}</p>\n",
            escape(text)
        ));
    }
    if let Some(text) = error {
        notices.push_str(&format!("    <p class=\"error\">{}</p>\n", escape(text)));
    }
    format!(
        "<!DOCTYPE html>\n<html>\n  <head>\n    <meta charset=\"utf-8\">\n    <title>Loan Default Prediction</title>\n  </head>\n  <body>\n    <h1>Loan Default Prediction</h1>\n    <form action=\"/predict\" method=\"post\">\n{fields}      <button type=\"submit\">Predict</button>\n    </form>\n{notices}  </body>\n</html>\n"
    )
}
