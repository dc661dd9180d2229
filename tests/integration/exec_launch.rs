use anyhow::Result;

use crate::common::{stderr_of, stdout_of, FakeWorld, OPUS_ID};

#[test]
fn launcher_becomes_the_assistant_process() -> Result<()> {
    let world = FakeWorld::new()?;
    let mut command = world.command();
    command.args(["--defaults", "-p", "hello"]);

    let output = world.run(command, "")?;

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("ARGS=-p hello"), "{stdout}");
    assert!(stdout.contains("ANTHROPIC_MODEL=opusplan"), "{stdout}");
    assert!(stdout.contains("AWS_PROFILE=bedrock-dev"), "{stdout}");
    assert!(stdout.contains("CLAUDE_CODE_USE_BEDROCK=1"), "{stdout}");
    assert!(
        stdout.contains(&format!("ANTHROPIC_DEFAULT_OPUS_MODEL={OPUS_ID}")),
        "{stdout}"
    );
    assert!(stdout.contains("MAX_THINKING_TOKENS=1024"), "{stdout}");
    Ok(())
}
