use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::PathBuf;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let default_config = r#"# Churnscope Configuration

[history]
# Newest-first commit cap used when no --commits/--days flag is given.
max_commits = 50
# Uncomment to bound history by age instead of count.
# window_days = 90

[lint]
enabled = true
command = "pylint"
args = []

[files]
extensions = ["py"]
ignore = [
    "venv/**",
    ".tox/**",
    "build/**"
]

[clone]
dir = "cloned_repo"

# Override or extend the built-in recommendation table by issue code.
# [recommendations]
# C0301 = "Wrap long lines at the project limit."
"#;

    io::write_file(&config_path, default_config)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses_and_validates() {
        let config: crate::config::ChurnscopeConfig = toml::from_str(
            r#"
[history]
max_commits = 50

[lint]
enabled = true
command = "pylint"
args = []

[files]
extensions = ["py"]
ignore = ["venv/**"]

[clone]
dir = "cloned_repo"
"#,
        )
        .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.history.max_commits, 50);
        assert_eq!(config.lint.command, "pylint");
    }
}
