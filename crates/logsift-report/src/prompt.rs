use serde::Serialize;

use logsift_types::LogAnalysis;

/// Default number of raw log lines quoted in the prompt
pub const DEFAULT_EXCERPT_LINES: usize = 30;

pub const SYSTEM_PROMPT: &str = "\
You are an expert in log analysis and distributed systems.
Your task is to write a professional Markdown report from a structured log analysis.
The report must be clear, technical and aimed at developers and operators.";

const REPORT_REQUIREMENTS: &str = "\
REPORT REQUIREMENTS:
1. Main title
2. Executive summary with key metrics
3. Pattern analysis: repeated errors, hotspots, time window
4. Detail of the most critical error groups (ordered by frequency)
5. Table or list of relevant warnings
6. Specific technical recommendations based on the errors found
7. Short conclusion

Use professional Markdown with sections, bullets, code blocks and emphasis where appropriate.";

/// A system/user prompt pair ready to send to a language model
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Builds report prompts from an analysis and the raw log it came from
#[derive(Clone, Debug)]
pub struct PromptBuilder {
    excerpt_lines: usize,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_EXCERPT_LINES)
    }
}

impl PromptBuilder {
    pub fn new(excerpt_lines: usize) -> Self {
        Self { excerpt_lines }
    }

    pub fn build(
        &self,
        analysis: &LogAnalysis,
        raw_text: &str,
    ) -> Result<Prompt, serde_json::Error> {
        let analysis_json = serde_json::to_string_pretty(analysis)?;
        let excerpt = self.excerpt(raw_text);

        let user = format!(
            "Write a professional technical report in Markdown based on the following log analysis.\n\
             \n\
             STRUCTURED ANALYSIS (JSON):\n\
             ```json\n\
             {analysis_json}\n\
             ```\n\
             \n\
             LOG EXCERPT (first lines):\n\
             ```\n\
             {excerpt}\n\
             ```\n\
             \n\
             {REPORT_REQUIREMENTS}\n"
        );

        Ok(Prompt {
            system: SYSTEM_PROMPT.to_string(),
            user,
        })
    }

    /// First `excerpt_lines` lines, with a note on how many were left out
    pub fn excerpt(&self, raw_text: &str) -> String {
        let total = raw_text.lines().count();
        let shown = total.min(self.excerpt_lines);
        let mut excerpt = raw_text
            .lines()
            .take(shown)
            .collect::<Vec<_>>()
            .join("\n");
        if total > shown {
            excerpt.push_str(&format!("\n... ({} more lines)", total - shown));
        }
        excerpt
    }
}
