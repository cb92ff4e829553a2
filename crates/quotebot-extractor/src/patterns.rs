//! Compiled field patterns

use crate::config::PatternConfig;
use crate::error::ExtractorError;
use regex::Regex;

/// Field patterns compiled once per extractor
#[derive(Debug, Clone)]
pub(crate) struct CompiledPatterns {
    pub insured_name: Regex,
    pub partner_section: Regex,
    pub partner_keyword: Regex,
    pub qualified_assistants: Regex,
    pub indemnity: Regex,
    pub excess: Regex,
    pub profession: Regex,
}

impl CompiledPatterns {
    /// Compile every pattern, checking capture groups where a value is read
    pub fn compile(config: &PatternConfig) -> Result<Self, ExtractorError> {
        Ok(Self {
            insured_name: capturing("insured_name", &config.insured_name)?,
            partner_section: capturing("partner_section", &config.partner_section)?,
            partner_keyword: plain("partner_keyword", &config.partner_keyword)?,
            qualified_assistants: capturing("qualified_assistants", &config.qualified_assistants)?,
            indemnity: capturing("indemnity", &config.indemnity)?,
            excess: capturing("excess", &config.excess)?,
            profession: capturing("profession", &config.profession)?,
        })
    }
}

fn plain(field: &'static str, pattern: &str) -> Result<Regex, ExtractorError> {
    Regex::new(pattern).map_err(|e| ExtractorError::InvalidPattern {
        field,
        message: e.to_string(),
    })
}

fn capturing(field: &'static str, pattern: &str) -> Result<Regex, ExtractorError> {
    let regex = plain(field, pattern)?;
    // captures_len counts the implicit whole-match group
    if regex.captures_len() < 2 {
        return Err(ExtractorError::MissingCaptureGroup(field));
    }
    Ok(regex)
}

/// First capture group of the first match
pub(crate) fn first_capture<'t>(regex: &Regex, text: &'t str) -> Option<&'t str> {
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_patterns_compile() {
        assert!(CompiledPatterns::compile(&PatternConfig::default()).is_ok());
    }

    #[test]
    fn test_first_capture_takes_first_match() {
        let regex = Regex::new(r"Excess:\s?KSHS\.\s?([\d,]+)").unwrap();
        let text = "Excess: KSHS. 10,000\nExcess: KSHS. 20,000";
        assert_eq!(first_capture(&regex, text), Some("10,000"));
    }

    #[test]
    fn test_first_capture_none_without_match() {
        let regex = Regex::new(r"Excess:\s?KSHS\.\s?([\d,]+)").unwrap();
        assert_eq!(first_capture(&regex, "Excess: KSH 10,000"), None);
    }
}
