use crate::model::seismic::SeismicReport;

/// Builds the prompt sent to the language model.
/// This struct is intentionally dumb: it only formats text.
/// No parsing, no networking, no engine logic.
pub struct SummaryPromptBuilder;

impl SummaryPromptBuilder {
    pub fn build(display_name: &str, report: &SeismicReport) -> String {
        if report.is_empty() {
            Self::build_quiet_site(display_name)
        } else {
            Self::build_active_site(display_name, report)
        }
    }

    fn build_quiet_site(display_name: &str) -> String {
        let mut prompt = String::new();

        push_intro(&mut prompt, display_name);
        prompt.push_str(
            "State that no recent seismic activity was found in the immediate vicinity, \
             which is a positive sign for geological stability.",
        );

        prompt
    }

    fn build_active_site(display_name: &str, report: &SeismicReport) -> String {
        let mut prompt = String::new();

        push_intro(&mut prompt, display_name);
        push_findings(&mut prompt, report);
        prompt.push_str(
            "Briefly explain what this might mean for a site risk assessment \
             in a professional but easy-to-understand tone.",
        );

        prompt
    }
}

fn push_intro(prompt: &mut String, display_name: &str) {
    prompt.push_str(&format!(
        "Write a brief, one-paragraph site analysis summary for the location: {}. ",
        display_name
    ));
}

fn push_findings(prompt: &mut String, report: &SeismicReport) {
    prompt.push_str(&format!(
        "The analysis found {} recent seismic events nearby. ",
        report.len()
    ));
    prompt.push_str(&format!(
        "The largest magnitude was {:.2}. ",
        report.max_magnitude().unwrap_or(f64::NAN)
    ));
}
