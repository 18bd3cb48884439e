//! AI analysis record types, field validators, and per-project statistics.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::CoreError;
use crate::text::check_range;

define_text_enum! {
    /// Kind of analysis a record holds.
    AnalysisType ("analysis type") {
        ChordProgression = "chord_progression",
        MelodyAnalysis = "melody_analysis",
        RhythmAnalysis = "rhythm_analysis",
        HarmonySuggestion = "harmony_suggestion",
        MixingAdvice = "mixing_advice",
        MasteringTips = "mastering_tips",
    }
}

pub fn validate_confidence(score: f64) -> Result<(), CoreError> {
    check_range(
        score,
        0.0,
        1.0,
        "Confidence score must be between 0 and 1",
    )
}

pub fn validate_processing_time(ms: i32) -> Result<(), CoreError> {
    if ms < 0 {
        return Err(CoreError::validation(
            "Processing time must be non-negative",
        ));
    }
    Ok(())
}

/// The slice of an analysis row that feeds [`summarize`].
#[derive(Debug, Clone, Copy)]
pub struct AnalysisSample {
    pub analysis_type: AnalysisType,
    pub confidence_score: Option<f64>,
    pub processing_time_ms: Option<i32>,
}

/// Aggregate statistics for one project's analyses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStats {
    pub total_analyses: i64,
    pub type_distribution: BTreeMap<AnalysisType, i64>,
    /// Mean over analyses that carry a confidence; `None` when none do.
    pub average_confidence: Option<f64>,
    /// Summed processing time divided by the total analysis count, so
    /// records without a timing count as zero. `0` for an empty project.
    pub average_processing_time: f64,
}

pub fn summarize<I>(samples: I) -> AnalysisStats
where
    I: IntoIterator<Item = AnalysisSample>,
{
    let mut total: i64 = 0;
    let mut type_distribution = BTreeMap::new();
    let mut processing_sum: i64 = 0;
    let mut confidence_sum = 0.0;
    let mut confidence_count: u32 = 0;

    for sample in samples {
        total += 1;
        *type_distribution.entry(sample.analysis_type).or_insert(0) += 1;
        if let Some(ms) = sample.processing_time_ms {
            processing_sum += i64::from(ms);
        }
        if let Some(score) = sample.confidence_score {
            confidence_sum += score;
            confidence_count += 1;
        }
    }

    let average_confidence =
        (confidence_count > 0).then(|| confidence_sum / f64::from(confidence_count));
    let average_processing_time = if total > 0 {
        processing_sum as f64 / total as f64
    } else {
        0.0
    };

    AnalysisStats {
        total_analyses: total,
        type_distribution,
        average_confidence,
        average_processing_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(t: AnalysisType, conf: Option<f64>, ms: Option<i32>) -> AnalysisSample {
        AnalysisSample {
            analysis_type: t,
            confidence_score: conf,
            processing_time_ms: ms,
        }
    }

    #[test]
    fn empty_project_has_null_confidence() {
        let stats = summarize(Vec::new());
        assert_eq!(stats.total_analyses, 0);
        assert_eq!(stats.average_confidence, None);
        assert_eq!(stats.average_processing_time, 0.0);

        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(
            value,
            json!({
                "totalAnalyses": 0,
                "typeDistribution": {},
                "averageConfidence": null,
                "averageProcessingTime": 0.0
            })
        );
    }

    #[test]
    fn confidence_averages_only_scored_rows() {
        let stats = summarize([
            sample(AnalysisType::MixingAdvice, Some(0.5), Some(100)),
            sample(AnalysisType::MixingAdvice, None, None),
            sample(AnalysisType::ChordProgression, Some(1.0), Some(200)),
        ]);

        assert_eq!(stats.total_analyses, 3);
        assert_eq!(stats.average_confidence, Some(0.75));
        assert_eq!(stats.average_processing_time, 100.0);
        assert_eq!(stats.type_distribution[&AnalysisType::MixingAdvice], 2);
        assert_eq!(stats.type_distribution[&AnalysisType::ChordProgression], 1);
    }

    #[test]
    fn zero_confidence_still_counts() {
        let stats = summarize([sample(AnalysisType::MelodyAnalysis, Some(0.0), Some(0))]);
        assert_eq!(stats.average_confidence, Some(0.0));
    }

    #[test]
    fn distribution_keys_use_wire_names() {
        let stats = summarize([sample(AnalysisType::HarmonySuggestion, None, None)]);
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["typeDistribution"]["harmony_suggestion"], 1);
    }

    #[test]
    fn validators() {
        assert!(validate_confidence(0.0).is_ok());
        assert!(validate_confidence(1.0).is_ok());
        assert!(validate_confidence(1.5).is_err());
        assert!(validate_processing_time(0).is_ok());
        assert!(validate_processing_time(-1).is_err());
    }

    #[test]
    fn analysis_type_parse() {
        assert_eq!(
            AnalysisType::parse("mastering_tips").unwrap(),
            AnalysisType::MasteringTips
        );
        assert!(AnalysisType::parse("vibe_check").is_err());
    }
}
