//! Sampling parameters and safety policy sent with every request.

use serde::Serialize;

/// Immutable generation policy handed to [`crate::GeminiClient`] at construction.
///
/// `Default` is the production policy. Tests may build their own.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
    #[serde(skip)]
    pub safety_settings: Vec<SafetySetting>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 2048,
            safety_settings: [
                HarmCategory::Harassment,
                HarmCategory::HateSpeech,
                HarmCategory::SexuallyExplicit,
                HarmCategory::DangerousContent,
            ]
            .into_iter()
            .map(|category| SafetySetting {
                category,
                threshold: HarmBlockThreshold::BlockMediumAndAbove,
            })
            .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    BlockLowAndAbove,
    BlockMediumAndAbove,
    BlockOnlyHigh,
    BlockNone,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let config = GenerationConfig::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["topK"], 40);
        assert_eq!(json["maxOutputTokens"], 2048);
        assert!((json["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert!((json["topP"].as_f64().unwrap() - 0.95).abs() < 1e-6);
        assert!(json.get("safetySettings").is_none());

        assert_eq!(config.safety_settings.len(), 4);
        let setting = serde_json::to_value(config.safety_settings[1]).unwrap();
        assert_eq!(setting["category"], "HARM_CATEGORY_HATE_SPEECH");
        assert_eq!(setting["threshold"], "BLOCK_MEDIUM_AND_ABOVE");
    }
}
