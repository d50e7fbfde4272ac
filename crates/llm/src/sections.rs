use crate::types::Sections;

/// Top-level heading marker; `##` and `#Text` do not match
const HEADING_PREFIX: &str = "# ";

/// Split model output into `# ` headed sections
///
/// Lines before the first heading are dropped. A heading with a blank title
/// closes the previous section but opens none, so its lines are dropped too.
/// A repeated heading overwrites the earlier body. The last heading is only
/// recorded if at least one line follows it; earlier headings are recorded
/// even with an empty body.
pub fn parse_sections(text: &str) -> Sections {
    let mut sections = Sections::new();
    let mut current: Option<String> = None;
    let mut body: Vec<&str> = Vec::new();

    // Split on '\n' only so trailing empty lines and '\r' survive the join.
    for line in text.split('\n') {
        if let Some(title) = line.strip_prefix(HEADING_PREFIX) {
            if let Some(open) = current.take() {
                sections.insert(open, body.join("\n"));
                body.clear();
            }
            current = Some(title.trim())
                .filter(|title| !title.is_empty())
                .map(str::to_string);
        } else if current.is_some() {
            body.push(line);
        }
    }

    if let Some(open) = current {
        if !body.is_empty() {
            sections.insert(open, body.join("\n"));
        }
    }

    sections
}
