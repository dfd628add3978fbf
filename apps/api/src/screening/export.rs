//! CSV export of a shortlist.

use crate::screening::CandidateReport;

pub const CSV_FILENAME: &str = "candidate_shortlist.csv";

const HEADERS: [&str; 8] = [
    "Name",
    "Email",
    "ATS_Score",
    "Eligibility",
    "Found_Keywords",
    "Missing_Keywords",
    "Skills",
    "Soft_Skills",
];

/// Wraps a value in double quotes, doubling any embedded quotes.
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn quoted_list(values: &[String]) -> String {
    quoted(&values.join("; "))
}

/// Renders reports in the given order, one row each, after a header row.
pub fn render_csv(reports: &[CandidateReport]) -> String {
    let mut csv = HEADERS.join(",");
    csv.push('\n');

    for report in reports {
        let analysis = &report.analysis;
        let row = [
            quoted(analysis.name.as_deref().unwrap_or("N/A")),
            quoted(analysis.email.as_deref().unwrap_or("N/A")),
            report.ats_score().to_string(),
            report.result.eligibility.label().to_string(),
            quoted_list(&analysis.found_keywords),
            quoted_list(&analysis.missing_keywords),
            quoted_list(&analysis.extracted_skills),
            quoted_list(&analysis.extracted_soft_skills),
        ];
        csv.push_str(&row.join(","));
        csv.push('\n');
    }

    csv
}
