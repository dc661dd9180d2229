use anyhow::Result;

use crate::common::{plan_of, stderr_of, FakeWorld, HAIKU_ID, OPUS_ID, SONNET_ID};

#[test]
fn defaults_flag_plans_opusplan_without_prompting() -> Result<()> {
    let world = FakeWorld::new()?;
    let mut command = world.command();
    command
        .env("BEDROCK_LAUNCH_DRY_RUN", "1")
        .args(["--defaults", "--resume", "abc"]);

    let output = world.run(command, "")?;

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let plan = plan_of(&output)?;
    let program = world.bin_dir().join("claude");
    assert_eq!(plan["program"], program.display().to_string());
    assert_eq!(plan["args"], serde_json::json!(["--resume", "abc"]));
    let env = &plan["env"];
    assert_eq!(env["CLAUDE_CODE_USE_BEDROCK"], "1");
    assert_eq!(env["AWS_PROFILE"], "bedrock-dev");
    assert_eq!(env["AWS_REGION"], "us-west-2");
    assert_eq!(env["ANTHROPIC_MODEL"], "opusplan");
    assert_eq!(env["ANTHROPIC_DEFAULT_OPUS_MODEL"], OPUS_ID);
    assert_eq!(env["ANTHROPIC_DEFAULT_SONNET_MODEL"], SONNET_ID);
    assert_eq!(env["ANTHROPIC_DEFAULT_HAIKU_MODEL"], HAIKU_ID);
    assert_eq!(env["CLAUDE_CODE_MAX_OUTPUT_TOKENS"], "4096");
    assert_eq!(env["MAX_THINKING_TOKENS"], "1024");
    Ok(())
}

#[test]
fn defaults_env_toggle_matches_the_flag() -> Result<()> {
    let world = FakeWorld::new()?;
    let mut command = world.command();
    command
        .env("BEDROCK_LAUNCH_DRY_RUN", "1")
        .env("BEDROCK_LAUNCH_DEFAULTS", "true");

    let output = world.run(command, "")?;

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let plan = plan_of(&output)?;
    assert_eq!(plan["env"]["ANTHROPIC_MODEL"], "opusplan");
    assert_eq!(plan["args"], serde_json::json!([]));
    Ok(())
}

#[test]
fn menu_answers_from_stdin_shape_the_plan() -> Result<()> {
    let world = FakeWorld::new()?;
    let mut command = world.command();
    command.env("BEDROCK_LAUNCH_DRY_RUN", "1").arg("-p");

    let output = world.run(command, "2\n3\n4\n4\n")?;

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let plan = plan_of(&output)?;
    let env = &plan["env"];
    assert_eq!(env["AWS_PROFILE"], "bedrock-prod");
    assert_eq!(env["ANTHROPIC_MODEL"], "sonnet");
    assert_eq!(env["CLAUDE_CODE_MAX_OUTPUT_TOKENS"], "32000");
    assert_eq!(env["MAX_THINKING_TOKENS"], "16384");
    assert!(env.get("ANTHROPIC_DEFAULT_OPUS_MODEL").is_none());
    assert_eq!(plan["args"], serde_json::json!(["-p"]));
    Ok(())
}

#[test]
fn flags_skip_menus_and_unknown_flags_pass_through() -> Result<()> {
    let world = FakeWorld::new()?;
    let mut command = world.command();
    command.env("BEDROCK_LAUNCH_DRY_RUN", "1").args([
        "--verbose",
        "--profile",
        "bedrock-prod",
        "--model-name",
        "Claude-Opus",
        "--max-output-tokens",
        "8192",
        "--max-thinking-tokens",
        "4096",
        "--continue",
    ]);

    let output = world.run(command, "")?;

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let plan = plan_of(&output)?;
    assert_eq!(plan["args"], serde_json::json!(["--verbose", "--continue"]));
    let env = &plan["env"];
    assert_eq!(env["AWS_PROFILE"], "bedrock-prod");
    assert_eq!(env["ANTHROPIC_MODEL"], "opus");
    assert_eq!(env["CLAUDE_CODE_MAX_OUTPUT_TOKENS"], "8192");
    assert_eq!(env["MAX_THINKING_TOKENS"], "4096");
    assert!(env.get("ANTHROPIC_DEFAULT_SONNET_MODEL").is_none());
    Ok(())
}

#[test]
fn missing_fast_model_uses_the_fallback_id() -> Result<()> {
    let world = FakeWorld::new()?;
    world.set_listing(&[OPUS_ID, SONNET_ID])?;
    let mut command = world.command();
    command.env("BEDROCK_LAUNCH_DRY_RUN", "1").arg("--defaults");

    let output = world.run(command, "")?;

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let plan = plan_of(&output)?;
    assert_eq!(plan["env"]["ANTHROPIC_DEFAULT_HAIKU_MODEL"], HAIKU_ID);
    Ok(())
}

#[test]
fn expired_session_triggers_one_login_with_filtered_stderr() -> Result<()> {
    let world = FakeWorld::new()?;
    let mut command = world.command();
    command
        .env("BEDROCK_LAUNCH_DRY_RUN", "1")
        .env("FAKE_STS_EXIT", "255")
        .arg("--defaults");

    let output = world.run(command, "")?;

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("Successfully logged into Start URL"), "{stderr}");
    assert!(!stderr.contains("NotOpenSSLWarning"), "{stderr}");
    let logins = world
        .aws_calls()
        .into_iter()
        .filter(|call| call.starts_with("sso login"))
        .count();
    assert_eq!(logins, 1);
    Ok(())
}
