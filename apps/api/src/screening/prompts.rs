// Prompt templates for the screening module.
// Placeholders are filled in a single pass; inserted text is never re-scanned.

/// Match check prompt. Replace `{jd}` and `{resume}`.
pub const MATCH_PROMPT_TEMPLATE: &str = "Check if the following resume matches this job description. \
Reply with only 'YES' or 'NO'.\n\nJob Description:\n{jd}\n\nResume:\n{resume}";

/// Single-question prompt. Replace `{jd}`.
pub const QUESTION_PROMPT_TEMPLATE: &str = "From the job description below, create ONE unique \
fill-in-the-blank MCQ question. Also provide the correct answer.\n\nJob Description:\n{jd}\n\n\
Format:\nQuestion: <your question>\nAnswer: <correct answer>";

pub fn match_prompt(jd: &str, resume: &str) -> String {
    fill_template(MATCH_PROMPT_TEMPLATE, &[("jd", jd), ("resume", resume)])
}

pub fn question_prompt(jd: &str) -> String {
    fill_template(QUESTION_PROMPT_TEMPLATE, &[("jd", jd)])
}

/// Replaces each `{name}` in `template` with its value. Braces that do not form a
/// known placeholder are copied through unchanged.
fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    'scan: while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        for (name, value) in vars {
            if let Some(after) = tail.strip_prefix(*name).and_then(|t| t.strip_prefix('}')) {
                out.push_str(value);
                rest = after;
                continue 'scan;
            }
        }
        out.push('{');
        rest = tail;
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_prompt_embeds_both_texts_verbatim() {
        let prompt = match_prompt("Senior Go Engineer", "5 years of Go");
        assert!(prompt.contains("Job Description:\nSenior Go Engineer"));
        assert!(prompt.contains("Resume:\n5 years of Go"));
        assert!(prompt.contains("'YES' or 'NO'"));
        assert!(!prompt.contains("{jd}") && !prompt.contains("{resume}"));
    }

    #[test]
    fn test_placeholders_inside_inserted_text_are_left_alone() {
        let prompt = match_prompt("Senior Go Engineer", "Templating: use {jd} in configs");
        assert!(prompt.contains("Resume:\nTemplating: use {jd} in configs"));

        let prompt = match_prompt("Paste your {resume} below", "5 years of Go");
        assert!(prompt.contains("Job Description:\nPaste your {resume} below\n"));
        assert!(prompt.ends_with("Resume:\n5 years of Go"));
    }

    #[test]
    fn test_question_prompt_keeps_literal_braces() {
        let prompt = question_prompt("Config uses {jd} and { braces }");
        assert!(prompt.contains("Job Description:\nConfig uses {jd} and { braces }\n"));
    }

    #[test]
    fn test_question_prompt_requests_marker_format() {
        let prompt = question_prompt("Rust developer");
        assert!(prompt.contains("Job Description:\nRust developer"));
        assert!(prompt.ends_with("Question: <your question>\nAnswer: <correct answer>"));
    }
}
