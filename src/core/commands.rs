//! Built-in commands and the dispatcher
//!
//! Every command is a plain function registered in [`COMMANDS`]. The table
//! order is the order `help` lists commands and Tab completion tries them.

use thiserror::Error;
use tracing::debug;

use super::ansi::{self, BLUE, DIM};
use super::fs::{self, FsEntry, VirtualFs};
use super::path::resolve;

/// Directory every session starts in, and the target of a bare `cd`
pub const HOME: &str = "/home/user";

/// Name reported by `whoami` and shown in the prompt
pub const USERNAME: &str = "developer";

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors a command can report. All of them end up as one error line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Command not found: {0}. Type 'help' for assistance.")]
    CommandNotFound(String),

    #[error("{cmd}: {arg}: No such file or directory")]
    PathNotFound { cmd: &'static str, arg: String },

    #[error("{cmd}: {arg}: Not a directory")]
    NotADirectory { cmd: &'static str, arg: String },

    #[error("{cmd}: {arg}: Is a directory")]
    IsADirectory { cmd: &'static str, arg: String },

    #[error("usage: {0}")]
    Usage(&'static str),
}

/// What a command produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Lines to show, possibly carrying color markers
    Lines(Vec<String>),
    /// Wipe the scrollback instead of showing anything
    Clear,
}

/// Result of running one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub output: Output,
    pub is_error: bool,
    pub new_cwd: Option<String>,
}

impl CommandResult {
    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            output: Output::Lines(lines.into_iter().map(Into::into).collect()),
            is_error: false,
            new_cwd: None,
        }
    }

    pub fn empty() -> Self {
        Self::lines(Vec::<String>::new())
    }

    pub fn clear() -> Self {
        Self {
            output: Output::Clear,
            is_error: false,
            new_cwd: None,
        }
    }

    pub fn error(err: &CommandError) -> Self {
        Self {
            output: Output::Lines(vec![err.to_string()]),
            is_error: true,
            new_cwd: None,
        }
    }

    pub fn with_cwd(mut self, cwd: String) -> Self {
        self.new_cwd = Some(cwd);
        self
    }

    /// Output lines, empty for the clear sentinel
    pub fn output_lines(&self) -> &[String] {
        match &self.output {
            Output::Lines(lines) => lines,
            Output::Clear => &[],
        }
    }
}

type Handler = fn(&[&str], &str, &VirtualFs) -> Result<CommandResult, CommandError>;

/// A registered builtin
pub struct Command {
    pub name: &'static str,
    pub summary: &'static str,
    handler: Handler,
}

/// The builtin table
pub static COMMANDS: &[Command] = &[
    Command { name: "help", summary: "Show available commands", handler: cmd_help },
    Command { name: "clear", summary: "Clear the terminal", handler: cmd_clear },
    Command { name: "ls", summary: "List directory contents", handler: cmd_ls },
    Command { name: "cd", summary: "Change directory", handler: cmd_cd },
    Command { name: "pwd", summary: "Print working directory", handler: cmd_pwd },
    Command { name: "cat", summary: "Display file contents", handler: cmd_cat },
    Command { name: "echo", summary: "Print arguments", handler: cmd_echo },
    Command { name: "whoami", summary: "Print current user", handler: cmd_whoami },
    Command { name: "date", summary: "Show current date and time", handler: cmd_date },
    Command { name: "devcli", summary: "Run the DevCLI tool (try --help)", handler: cmd_devcli },
];

/// Find a builtin by exact name
pub fn find(name: &str) -> Option<&'static Command> {
    COMMANDS.iter().find(|c| c.name == name)
}

/// Registered command names in table order
pub fn command_names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|c| c.name)
}

/// First command name starting with `prefix`
pub fn complete(prefix: &str) -> Option<&'static str> {
    command_names().find(|name| name.starts_with(prefix))
}

/// Split and run one input line. Blank input yields `None`.
pub fn execute(raw_line: &str, cwd: &str, fs: &VirtualFs) -> Option<CommandResult> {
    let mut tokens = raw_line.split_whitespace();
    let name = tokens.next()?;
    let args: Vec<&str> = tokens.collect();

    let result = match find(name) {
        Some(command) => (command.handler)(&args, cwd, fs),
        None => Err(CommandError::CommandNotFound(name.to_string())),
    };

    match result {
        Ok(result) => {
            debug!("{} {:?} -> ok", name, args);
            Some(result)
        }
        Err(e) => {
            debug!("{} {:?} -> {}", name, args, e);
            Some(CommandResult::error(&e))
        }
    }
}

fn cmd_help(_args: &[&str], _cwd: &str, _fs: &VirtualFs) -> Result<CommandResult, CommandError> {
    let mut lines = vec!["Available commands:".to_string()];
    lines.extend(
        COMMANDS
            .iter()
            .map(|c| format!("  {:<8}  {}", c.name, c.summary)),
    );
    Ok(CommandResult::lines(lines))
}

fn cmd_clear(_args: &[&str], _cwd: &str, _fs: &VirtualFs) -> Result<CommandResult, CommandError> {
    Ok(CommandResult::clear())
}

fn cmd_ls(args: &[&str], cwd: &str, fs: &VirtualFs) -> Result<CommandResult, CommandError> {
    let path = match args.first() {
        Some(arg) => resolve(arg, cwd),
        None => cwd.to_string(),
    };

    let children = match fs.lookup(&path) {
        None => {
            return Err(CommandError::PathNotFound {
                cmd: "ls",
                arg: args.first().copied().unwrap_or(cwd).to_string(),
            })
        }
        Some(FsEntry::File { .. }) => {
            return Ok(CommandResult::lines([fs::file_name(&path)]));
        }
        Some(FsEntry::Directory { children }) => children,
    };

    if children.is_empty() {
        return Ok(CommandResult::empty());
    }

    // Directory marking wins over dotfile dimming
    let names: Vec<String> = children
        .iter()
        .map(|child| {
            if fs.is_dir(&fs::join(&path, child)) {
                ansi::paint(BLUE, &format!("{}/", child))
            } else if child.starts_with('.') {
                ansi::paint(DIM, child)
            } else {
                child.clone()
            }
        })
        .collect();

    Ok(CommandResult::lines([names.join("  ")]))
}

fn cmd_cd(args: &[&str], cwd: &str, fs: &VirtualFs) -> Result<CommandResult, CommandError> {
    let arg = match args.first() {
        None | Some(&"~") => return Ok(CommandResult::empty().with_cwd(HOME.to_string())),
        Some(arg) => *arg,
    };

    let target = resolve(arg, cwd);
    match fs.lookup(&target) {
        None => Err(CommandError::PathNotFound { cmd: "cd", arg: arg.to_string() }),
        Some(FsEntry::File { .. }) => Err(CommandError::NotADirectory { cmd: "cd", arg: arg.to_string() }),
        Some(FsEntry::Directory { .. }) => Ok(CommandResult::empty().with_cwd(target)),
    }
}

fn cmd_pwd(_args: &[&str], cwd: &str, _fs: &VirtualFs) -> Result<CommandResult, CommandError> {
    Ok(CommandResult::lines([cwd]))
}

fn cmd_cat(args: &[&str], cwd: &str, fs: &VirtualFs) -> Result<CommandResult, CommandError> {
    let arg = *args.first().ok_or(CommandError::Usage("cat <file>"))?;

    match fs.lookup(&resolve(arg, cwd)) {
        None => Err(CommandError::PathNotFound { cmd: "cat", arg: arg.to_string() }),
        Some(FsEntry::Directory { .. }) => Err(CommandError::IsADirectory { cmd: "cat", arg: arg.to_string() }),
        Some(FsEntry::File { content }) if content.is_empty() => Ok(CommandResult::lines(["(empty file)"])),
        Some(FsEntry::File { content }) => Ok(CommandResult::lines(content.iter().cloned())),
    }
}

fn cmd_echo(args: &[&str], _cwd: &str, _fs: &VirtualFs) -> Result<CommandResult, CommandError> {
    Ok(CommandResult::lines([args.join(" ")]))
}

fn cmd_whoami(_args: &[&str], _cwd: &str, _fs: &VirtualFs) -> Result<CommandResult, CommandError> {
    Ok(CommandResult::lines([USERNAME]))
}

fn cmd_date(_args: &[&str], _cwd: &str, _fs: &VirtualFs) -> Result<CommandResult, CommandError> {
    let now = chrono::Local::now();
    Ok(CommandResult::lines([now.format("%a %b %d %Y %H:%M:%S GMT%z").to_string()]))
}

fn cmd_devcli(args: &[&str], _cwd: &str, _fs: &VirtualFs) -> Result<CommandResult, CommandError> {
    let has = |flags: [&str; 2]| args.iter().any(|a| flags.contains(a));

    if has(["--version", "-v"]) {
        return Ok(CommandResult::lines([
            format!("devcli version {} (linux/amd64)", VERSION),
            "Built with Go 1.21.5 + Bubble Tea".to_string(),
        ]));
    }

    if has(["--help", "-h"]) {
        return Ok(CommandResult::lines([
            format!("DevCLI v{} - The developer's command-line companion", VERSION).as_str(),
            "",
            "Usage: devcli <command> [options]",
            "",
            "Commands:",
            "  project    Manage projects",
            "  run        Run tasks",
            "  env        Environment management",
            "  serve      Development server",
            "  create     Create files from templates",
            "  gen        Generate code",
            "  snippet    Snippet library",
            "  ai         AI assistant",
            "  files      File manager",
            "  update     Update system",
            "",
            "Options:",
            "  -h, --help     Show help",
            "  -v, --version  Show version",
            "",
            "Run \"devcli <command> --help\" for more info.",
        ]));
    }

    Ok(CommandResult::lines([
        "Usage: devcli <command> [options]. Run 'devcli --help' for details.",
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(line: &str, cwd: &str) -> CommandResult {
        execute(line, cwd, VirtualFs::global()).expect("non-blank input")
    }

    fn lines(result: &CommandResult) -> Vec<String> {
        result.output_lines().to_vec()
    }

    #[test]
    fn test_blank_input_is_noop() {
        assert!(execute("", HOME, VirtualFs::global()).is_none());
        assert!(execute("   \t ", HOME, VirtualFs::global()).is_none());
    }

    #[test]
    fn test_unknown_command() {
        let result = run("rm -rf /", HOME);
        assert!(result.is_error);
        assert_eq!(
            lines(&result),
            vec!["Command not found: rm. Type 'help' for assistance."]
        );
        assert_eq!(result.new_cwd, None);
    }

    #[test]
    fn test_help_lists_every_command() {
        let result = run("help", HOME);
        assert!(!result.is_error);
        let text = lines(&result).join("\n");
        for name in command_names() {
            assert!(text.contains(name), "help is missing {}", name);
        }
    }

    #[test]
    fn test_clear_returns_sentinel() {
        assert_eq!(run("clear", HOME).output, Output::Clear);
    }

    #[test]
    fn test_ls_directory_coloring() {
        let result = run("ls", HOME);
        assert_eq!(
            lines(&result),
            vec![format!(
                "{}  {}  notes.txt  {}",
                ansi::paint(BLUE, "workspace/"),
                ansi::paint(BLUE, "downloads/"),
                ansi::paint(BLUE, ".devcli/"),
            )]
        );
    }

    #[test]
    fn test_ls_dotfile_dimmed_and_dot_directory_blue() {
        let tree = VirtualFs::from_entries(
            [
                ("/", FsEntry::dir(&[".env", ".git", "a"])),
                ("/.env", FsEntry::file(&["KEY=value"])),
                ("/.git", FsEntry::dir(&[])),
                ("/a", FsEntry::file(&[])),
            ]
            .into_iter()
            .map(|(path, entry)| (path.to_string(), entry)),
        )
        .unwrap();

        let result = execute("ls", "/", &tree).unwrap();
        assert_eq!(
            lines(&result),
            vec!["\x1b[90m.env\x1b[0m  \x1b[34m.git/\x1b[0m  a"]
        );
    }

    #[test]
    fn test_ls_docs_and_dot_directory_contents() {
        let result = run("ls /docs", "/");
        assert_eq!(lines(&result), vec!["README.md  CONTRIBUTING.md"]);

        let result = run("ls .devcli", HOME);
        assert_eq!(lines(&result), vec!["config.yaml"]);
    }

    #[test]
    fn test_ls_file_and_missing() {
        let result = run("ls /docs/README.md", HOME);
        assert_eq!(lines(&result), vec!["README.md"]);

        let result = run("ls nope", HOME);
        assert!(result.is_error);
        assert_eq!(lines(&result), vec!["ls: nope: No such file or directory"]);
        assert_eq!(result.new_cwd, None);
    }

    #[test]
    fn test_ls_empty_directory() {
        let result = run("ls downloads", HOME);
        assert!(!result.is_error);
        assert!(lines(&result).is_empty());
    }

    #[test]
    fn test_cd() {
        assert_eq!(run("cd", "/docs").new_cwd.as_deref(), Some(HOME));
        assert_eq!(run("cd ~", "/docs").new_cwd.as_deref(), Some(HOME));
        assert_eq!(run("cd ..", HOME).new_cwd.as_deref(), Some("/home"));
        assert_eq!(run("cd /", HOME).new_cwd.as_deref(), Some("/"));

        let result = run("cd workspace/my-app", HOME);
        assert!(lines(&result).is_empty());
        assert_eq!(result.new_cwd.as_deref(), Some("/home/user/workspace/my-app"));
    }

    #[test]
    fn test_cd_errors() {
        let result = run("cd projects", HOME);
        assert!(result.is_error);
        assert_eq!(lines(&result), vec!["cd: projects: No such file or directory"]);
        assert_eq!(result.new_cwd, None);

        let result = run("cd notes.txt", HOME);
        assert!(result.is_error);
        assert_eq!(lines(&result), vec!["cd: notes.txt: Not a directory"]);
    }

    #[test]
    fn test_pwd_echo_whoami() {
        assert_eq!(lines(&run("pwd", "/docs")), vec!["/docs"]);
        assert_eq!(lines(&run("echo  hello   world", HOME)), vec!["hello world"]);
        assert_eq!(lines(&run("echo", HOME)), vec![""]);
        assert_eq!(lines(&run("whoami", HOME)), vec![USERNAME]);
    }

    #[test]
    fn test_cat() {
        let result = run("cat /docs/CONTRIBUTING.md", HOME);
        assert_eq!(lines(&result)[0], "# Contributing");

        assert_eq!(lines(&run("cat notes.txt", HOME)), vec!["(empty file)"]);

        let result = run("cat", HOME);
        assert!(result.is_error);
        assert_eq!(lines(&result), vec!["usage: cat <file>"]);
    }

    #[test]
    fn test_cat_errors() {
        let result = run("cat workspace", HOME);
        assert!(result.is_error);
        assert_eq!(lines(&result), vec!["cat: workspace: Is a directory"]);

        let result = run("cat README.md", "/projects");
        assert!(result.is_error);
        assert_eq!(lines(&result), vec!["cat: README.md: No such file or directory"]);
    }

    #[test]
    fn test_date_is_single_line() {
        let result = run("date", HOME);
        assert_eq!(lines(&result).len(), 1);
        assert!(lines(&result)[0].contains("GMT"));
    }

    #[test]
    fn test_devcli_flags() {
        let version = lines(&run("devcli --version", HOME));
        assert_eq!(version.len(), 2);
        assert!(version[0].contains(VERSION));
        assert_eq!(lines(&run("devcli -v", HOME)), version);

        let help = lines(&run("devcli -h", HOME));
        assert!(help.iter().any(|l| l.starts_with("Usage: devcli")));
        assert!(help.len() > 10);

        let hint = lines(&run("devcli serve", HOME));
        assert_eq!(hint.len(), 1);
        assert!(hint[0].starts_with("Usage:"));
    }

    #[test]
    fn test_complete() {
        assert_eq!(complete("pw"), Some("pwd"));
        assert_eq!(complete("c"), Some("clear"));
        assert_eq!(complete("dev"), Some("devcli"));
        assert_eq!(complete("xyz"), None);
    }
}
