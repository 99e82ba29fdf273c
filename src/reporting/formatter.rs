use crate::models::finding::Finding;

pub fn report_title(execution_id: &str) -> String {
    format!("SOC Report: {}", execution_id)
}

/// Line layout shared by every output format. Findings keep their input order.
pub fn report_lines(title: &str, findings: &[Finding]) -> Vec<String> {
    let mut lines = Vec::with_capacity(2 + findings.len() * 5);
    lines.push(title.to_string());
    lines.push(format!("Total findings: {}", findings.len()));

    for (i, finding) in findings.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!("{}. {}", i + 1, finding.display_title()));
        lines.push(format!("   Severity: {}", finding.severity));
        lines.push(format!("   Description: {}", finding.display_description()));
        lines.push(format!("   Recommendation: {}", finding.display_recommendation()));
    }
    lines
}

/// Split a line into chunks of at most `width` characters, breaking on spaces where possible.
/// Leading indentation is repeated on every continuation line.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if line.chars().count() <= width || width == 0 {
        return vec![line.to_string()];
    }

    let body = line.trim_start_matches(' ');
    let indent = &line[..line.len() - body.len()];
    if indent.len() >= width {
        return wrap_words(line, width);
    }

    wrap_words(body, width - indent.len())
        .into_iter()
        .map(|chunk| format!("{}{}", indent, chunk))
        .collect()
}

fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut wrapped = Vec::new();
    let mut current = String::new();
    for word in text.split(' ') {
        let candidate_len = current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
        if candidate_len > width && !current.is_empty() {
            wrapped.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);

        // Hard-split words longer than a full line
        while current.chars().count() > width {
            let split_at = current.char_indices().nth(width).map(|(idx, _)| idx).unwrap_or(current.len());
            let rest = current.split_off(split_at);
            wrapped.push(std::mem::replace(&mut current, rest));
        }
    }
    if !current.is_empty() {
        wrapped.push(current);
    }
    wrapped
}
