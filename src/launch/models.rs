//! Bedrock inference profile lookup per model family.
use serde::Deserialize;
use tracing::{info, warn};

use crate::{lib::errors::LaunchError, settings::Settings};

use super::{
    config::{ModelMode, PrimaryFamily, ResolvedModels},
    prompt::Prompter,
    runner::{CommandRunner, CommandSpec},
};

const SYSTEM_DEFINED: &str = "SYSTEM_DEFINED";

#[derive(Debug, Deserialize)]
struct InferenceProfileList {
    #[serde(rename = "inferenceProfileSummaries", default)]
    summaries: Vec<InferenceProfileSummary>,
}

#[derive(Debug, Deserialize)]
struct InferenceProfileSummary {
    #[serde(rename = "inferenceProfileId")]
    id: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// System-defined inference profile ids from `list-inference-profiles` JSON.
pub fn parse_profile_ids(listing: &str) -> Result<Vec<String>, LaunchError> {
    let list: InferenceProfileList =
        serde_json::from_str(listing).map_err(|err| LaunchError::ModelLookupFailed {
            message: format!("unexpected list-inference-profiles output: {err}"),
        })?;

    Ok(list
        .summaries
        .into_iter()
        .filter(|summary| {
            summary
                .kind
                .as_deref()
                .map_or(true, |kind| kind.eq_ignore_ascii_case(SYSTEM_DEFINED))
        })
        .map(|summary| summary.id)
        .collect())
}

/// First id containing both the vendor marker and the family token, ignoring case.
pub fn find_profile_id<'a>(ids: &'a [String], vendor_marker: &str, family: &str) -> Option<&'a str> {
    let vendor_marker = vendor_marker.to_lowercase();
    let family = family.to_lowercase();
    ids.iter()
        .map(String::as_str)
        .find(|id| {
            let lowered = id.to_lowercase();
            lowered.contains(&vendor_marker) && lowered.contains(&family)
        })
}

/// Query the AWS CLI for system-defined inference profiles.
pub async fn list_profile_ids<R: CommandRunner>(
    settings: &Settings,
    runner: &R,
    profile: &str,
    region: &str,
) -> Result<Vec<String>, LaunchError> {
    let spec = CommandSpec::new(&settings.aws.cli).args([
        "bedrock",
        "list-inference-profiles",
        "--type-equals",
        SYSTEM_DEFINED,
        "--profile",
        profile,
        "--region",
        region,
        "--output",
        "json",
    ]);
    let output = runner.capture(&spec).await?;
    if !output.success() {
        return Err(LaunchError::ModelLookupFailed {
            message: output.stderr.trim().to_string(),
        });
    }
    parse_profile_ids(&output.stdout)
}

/// Resolve the fast model (with fallback) and every primary family of `mode`.
pub async fn resolve_models<R, P>(
    settings: &Settings,
    runner: &R,
    prompter: &mut P,
    profile: &str,
    region: &str,
    mode: ModelMode,
) -> Result<ResolvedModels, LaunchError>
where
    R: CommandRunner,
    P: Prompter,
{
    let ids = list_profile_ids(settings, runner, profile, region).await?;
    let marker = &settings.models.vendor_marker;

    let (fast, fast_is_fallback) =
        match find_profile_id(&ids, marker, &settings.models.fast_family) {
            Some(id) => (id.to_string(), false),
            None => {
                warn!(
                    target: "bedrock_launch::models",
                    family = %settings.models.fast_family,
                    fallback = %settings.models.fast_fallback_id,
                    "No inference profile for fast family; using fallback"
                );
                prompter.notify(&format!(
                    "Warning: no {} inference profile found; falling back to {}",
                    settings.models.fast_family, settings.models.fast_fallback_id
                ));
                (settings.models.fast_fallback_id.clone(), true)
            }
        };

    let mut resolved = ResolvedModels {
        opus: None,
        sonnet: None,
        fast,
        fast_is_fallback,
    };
    for family in mode.primary_families() {
        let id = find_profile_id(&ids, marker, family.search_token())
            .ok_or_else(|| LaunchError::ModelNotFound {
                family: family.search_token().to_string(),
            })?
            .to_string();
        info!(
            target: "bedrock_launch::models",
            family = family.search_token(),
            inference_profile = %id,
            "Resolved inference profile"
        );
        match family {
            PrimaryFamily::Opus => resolved.opus = Some(id),
            PrimaryFamily::Sonnet => resolved.sonnet = Some(id),
        }
    }

    Ok(resolved)
}
