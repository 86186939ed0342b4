use assert_cmd::Command;

pub fn taginfo_cmd() -> Command {
    let mut cmd = Command::cargo_bin("taginfo-gen").unwrap();
    cmd.env_remove("TAGINFO_CONFIG");
    cmd.env("RUST_LOG", "warn");
    cmd
}
