// Prompt constants for the resume analysis endpoint.

/// Structured extraction + assessment prompt. Replace `{resume_text}` before sending.
pub const RESUME_EXTRACTION_PROMPT_TEMPLATE: &str = r#"
Extract structured data from resumes, key sections such as personal details, education, work experience, and skills.

I. Personal Details:

Name: [Extracted Name]
Title: [Extracted Title]
Address: [Extracted Address]
Phone: [Extracted Phone]
Email: [Extracted Email]
LinkedIn: [Extracted LinkedIn or " Missing - Needs User Input"]
Age: [Extracted Age or " Missing - Needs User Input"]

II. Education:

Degree: [Degree]
Institution: [University Name]
Duration: [Start Date - End Date]

III. Work Experience:

Job Title: [Title]
Company: [Company Name]
Location: [Location]
Duration: [Start Date - End Date]
Responsibilities:
   [Responsibility 1]
   [Responsibility 2]
   [Key Achievement]

IV. Skills:

- [Skill 1]
- [Skill 2]
- [Skill 3]

---

V. Resume Assessment:

Strengths:

- [Strength 1]
- [Strength 2]

---

Areas for Improvement:

- [Issue 1]
- [Issue 2]

---

Suggestions for Enhancement:

- Clarify employment dates and duration.
- Quantify accomplishments with more data.
- Expand the skills section with relevant keywords.
- Include a professional LinkedIn profile URL.

---

Resume:
{resume_text}
"#;

pub fn build_resume_prompt(resume_text: &str) -> String {
    RESUME_EXTRACTION_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_resume_at_the_end() {
        let prompt = build_resume_prompt("Jane Doe, Rust engineer");
        assert!(prompt.trim_end().ends_with("Resume:\nJane Doe, Rust engineer"));
        assert!(!prompt.contains("{resume_text}"));
    }

    #[test]
    fn test_prompt_keeps_all_sections() {
        let prompt = build_resume_prompt("x");
        for section in [
            "I. Personal Details:",
            "II. Education:",
            "III. Work Experience:",
            "IV. Skills:",
            "V. Resume Assessment:",
            "Suggestions for Enhancement:",
        ] {
            assert!(prompt.contains(section), "missing {section}");
        }
    }
}
