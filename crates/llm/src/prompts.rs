//! Prompt templates for tender analysis

/// System-role instruction sent with every analysis
pub const SYSTEM_PROMPT: &str = "You are an expert in analyzing tender documents.";

/// Sections the model is asked to produce, in order
pub const SECTION_TITLES: [&str; 9] = [
    "Tender Summary",
    "Basic Information",
    "Key Requirements",
    "Eligibility Criteria",
    "Evaluation Criteria",
    "Required Documents",
    "Compliance Checklist",
    "Winning Strategy",
    "Risks and Mitigations",
];

/// Analysis instructions; the document text follows the last line
const ANALYSIS_TEMPLATE: &str = r#"Analyze this tender document comprehensively and extract structured information.

Your response should be well-structured with the following sections:

# TENDER SUMMARY
Provide a concise summary of the tender opportunity.

# BASIC INFORMATION
- Tender Reference Number:
- Issuing Organization:
- Submission Deadline:
- Project Location:
- Estimated Budget:

# KEY REQUIREMENTS
List the main technical, financial, and operational requirements.

# ELIGIBILITY CRITERIA
List the mandatory criteria that bidders must meet.

# EVALUATION CRITERIA
Explain how bids will be evaluated and scored.

# REQUIRED DOCUMENTS
List all documents that must be submitted.

# COMPLIANCE CHECKLIST
Create a checklist of critical compliance points.

# WINNING STRATEGY
Provide strategic recommendations to increase chances of success.

# RISKS AND MITIGATIONS
Identify potential risks and suggest mitigation strategies.

# Tender Text:
"#;

/// Prompt for a full tender analysis
///
/// `text` is appended verbatim and is always the tail of the prompt.
pub fn analysis_prompt(text: &str) -> String {
    format!("{}{}", ANALYSIS_TEMPLATE, text)
}
