//! Shell completion generation for qlcomplete
//!
//! This module provides functionality to generate shell completion scripts
//! for bash, zsh, and fish, with dynamic completion for field group names
//! taken from the configured field catalog.

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::CliArgs;
use crate::error::{QlError, Result};

const BIN_NAME: &str = "qlcomplete";

/// Generate shell completion script
///
/// # Arguments
/// * `shell_name` - Shell type (bash, zsh, fish)
///
/// # Returns
/// * `Result<()>` - Success or error
pub fn generate_completion(shell_name: &str) -> Result<()> {
    let script = completion_script(parse_shell(shell_name)?)?;
    print!("{}", script);
    Ok(())
}

/// Build the completion script for a shell
pub fn completion_script(shell: Shell) -> Result<String> {
    let basic_completion = basic_completion(shell);
    let extension = match shell {
        Shell::Bash => BASH_GROUPS,
        Shell::Zsh => ZSH_GROUPS,
        Shell::Fish => FISH_GROUPS,
        _ => return Err(unsupported(&shell.to_string())),
    };
    Ok(format!("{basic_completion}\n{extension}"))
}

/// Parse shell name string to Shell enum
fn parse_shell(shell_name: &str) -> Result<Shell> {
    match shell_name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        _ => Err(unsupported(shell_name)),
    }
}

fn unsupported(shell_name: &str) -> QlError {
    QlError::Generic(format!(
        "Unsupported shell: {}. Supported shells: bash, zsh, fish",
        shell_name
    ))
}

/// Script generated by clap for the argument definitions
fn basic_completion(shell: Shell) -> String {
    let mut cmd = CliArgs::command();
    let mut buffer = Vec::new();
    generate(shell, &mut cmd, BIN_NAME, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

const BASH_GROUPS: &str = r#"
# Field group names from the configured catalog
_qlcomplete_list_groups() {
    qlcomplete config --list-groups 2>/dev/null
}

_qlcomplete_enhanced() {
    local cur prev words cword
    _init_completion || return

    if [[ "$prev" == "-g" || "$prev" == "--group" ]]; then
        local groups=$(_qlcomplete_list_groups)
        if [ -n "$groups" ]; then
            COMPREPLY=($(compgen -W "$groups" -- "$cur"))
        fi
        return 0
    fi

    _qlcomplete "$@"
}

complete -F _qlcomplete_enhanced qlcomplete
"#;

const ZSH_GROUPS: &str = r#"
# Field group names from the configured catalog
_qlcomplete_groups() {
    local -a groups
    groups=($(qlcomplete config --list-groups 2>/dev/null))
    _describe 'field groups' groups
}

_qlcomplete_enhanced() {
    if [[ ${words[CURRENT-1]} == "-g" || ${words[CURRENT-1]} == "--group" ]]; then
        _qlcomplete_groups
        return 0
    fi
    _qlcomplete "$@"
}

compdef _qlcomplete_enhanced qlcomplete
"#;

const FISH_GROUPS: &str = r#"
# Field group names from the configured catalog
function __qlcomplete_list_groups
    qlcomplete config --list-groups 2>/dev/null
end

complete -c qlcomplete -s g -l group -f -a "(__qlcomplete_list_groups)" -d "Field group to complete against"
"#;
