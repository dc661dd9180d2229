use anyhow::Result;

use crate::common::{stderr_of, stdout_of, FakeWorld, HAIKU_ID, SONNET_ID};

#[test]
fn unknown_profile_exits_before_any_session_call() -> Result<()> {
    let world = FakeWorld::new()?;
    let mut command = world.command();
    command.args(["--defaults", "--profile", "ghost"]);

    let output = world.run(command, "")?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("error[unknown_profile]"), "{stderr}");
    assert!(stderr.contains("hint:"), "{stderr}");
    assert_eq!(world.aws_calls(), vec!["--version".to_string()]);
    assert!(!stdout_of(&output).contains("ARGS="));
    Ok(())
}

#[test]
fn missing_primary_family_never_launches() -> Result<()> {
    let world = FakeWorld::new()?;
    world.set_listing(&[SONNET_ID, HAIKU_ID])?;
    let mut command = world.command();
    command.arg("--defaults");

    let output = world.run(command, "")?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("error[model_not_found]"), "{stderr}");
    assert!(!stdout_of(&output).contains("ARGS="));
    Ok(())
}

#[test]
fn outdated_aws_cli_is_rejected() -> Result<()> {
    let world = FakeWorld::new()?;
    let mut command = world.command();
    command.env("FAKE_AWS_VERSION", "2.9.1").arg("--defaults");

    let output = world.run(command, "")?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("error[cli_too_old]"), "{stderr}");
    assert!(stderr.contains("2.9.1"), "{stderr}");
    Ok(())
}

#[test]
fn unrecognised_model_name_fails_before_preflight() -> Result<()> {
    let world = FakeWorld::new()?;
    let mut command = world.command();
    command.args(["--model-name", "gpt-4"]);

    let output = world.run(command, "")?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("error[invalid_model_name]"));
    assert!(world.aws_calls().is_empty());
    Ok(())
}

#[test]
fn declined_install_exits_without_running_the_installer() -> Result<()> {
    let world = FakeWorld::new()?;
    world.remove_program("claude")?;
    let mut command = world.command();
    command.arg("--defaults");

    let output = world.run(command, "n\n")?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("error[install_declined]"), "{stderr}");
    assert!(world.aws_calls().is_empty());
    Ok(())
}

#[test]
fn missing_aws_cli_is_a_missing_dependency() -> Result<()> {
    let world = FakeWorld::new()?;
    world.remove_program("aws")?;
    let mut command = world.command();
    command.env("PATH", world.bin_dir()).arg("--defaults");

    let output = world.run(command, "")?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("error[missing_dependency]"));
    Ok(())
}
