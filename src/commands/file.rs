use crate::command::{Command, CommandCategory, CommandResult};
use crate::context::{Effect, TerminalContext};

pub fn commands() -> Vec<Box<dyn Command + Send + Sync>> {
    vec![
        Box::new(CatCommand),
        Box::new(HeadCommand),
        Box::new(TailCommand),
        Box::new(WcCommand),
        Box::new(FileCommand),
        Box::new(MkdirCommand),
        Box::new(TouchCommand),
        Box::new(RmCommand),
        Box::new(RmdirCommand),
        Box::new(MvCommand),
        Box::new(CpCommand),
        Box::new(ChmodCommand),
        Box::new(ChownCommand),
        Box::new(LnCommand),
    ]
}

/// Pull input lines either from a named mock file or from piped stdin.
fn read_source(
    file: Option<&str>,
    ctx: &TerminalContext,
    stdin: Option<&str>,
    cmd: &str,
    usage: &str,
) -> Result<Vec<String>, String> {
    match file {
        Some(name) => {
            if name.to_lowercase().trim_start_matches("./").trim_start_matches("~/")
                == ".root_flag"
                && !ctx.sudo_unlocked
            {
                return Err(format!("{}: .root_flag: Permission denied", cmd));
            }
            if ctx.fs.is_directory(name) {
                return Err(format!("{}: {}: Is a directory", cmd, name));
            }
            match ctx.fs.get_file_content(name) {
                Some(lines) => Ok(lines.iter().map(|l| l.to_string()).collect()),
                None => Err(format!("{}: {}: No such file or directory", cmd, name)),
            }
        }
        None => match stdin {
            Some(text) => Ok(text.lines().map(|l| l.to_string()).collect()),
            None => Err(format!("usage: {}", usage)),
        },
    }
}

/// cat [-n] [file]
pub struct CatCommand;

impl Command for CatCommand {
    fn name(&self) -> &'static str {
        "cat"
    }
    fn description(&self) -> &'static str {
        "print file contents"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::File
    }
    fn usage(&self) -> &'static str {
        "cat [-n] [file]"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        stdin: Option<&str>,
    ) -> CommandResult {
        let mut number = false;
        let mut file: Option<&str> = None;
        for arg in args {
            match arg.as_str() {
                "-n" => number = true,
                s if s.starts_with('-') => {
                    return Err(format!("cat: invalid option '{}'", s));
                }
                s => file = Some(s),
            }
        }

        let lines = read_source(file, ctx, stdin, "cat", self.usage())?;
        if number {
            Ok(lines
                .iter()
                .enumerate()
                .map(|(i, l)| format!("{:6}\t{}", i + 1, l))
                .collect::<Vec<_>>()
                .join("\n"))
        } else {
            Ok(lines.join("\n"))
        }
    }
}

/// head [-n count] [file]
pub struct HeadCommand;

impl Command for HeadCommand {
    fn name(&self) -> &'static str {
        "head"
    }
    fn description(&self) -> &'static str {
        "print the first lines of a file"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::File
    }
    fn usage(&self) -> &'static str {
        "head [-n count] [file]"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        stdin: Option<&str>,
    ) -> CommandResult {
        let (count, file) = parse_count_and_file(args, self.usage())?;
        let lines = read_source(file, ctx, stdin, "head", self.usage())?;
        Ok(lines
            .iter()
            .take(count)
            .cloned()
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// tail [-n count] [file]
pub struct TailCommand;

impl Command for TailCommand {
    fn name(&self) -> &'static str {
        "tail"
    }
    fn description(&self) -> &'static str {
        "print the last lines of a file"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::File
    }
    fn usage(&self) -> &'static str {
        "tail [-n count] [file]"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        stdin: Option<&str>,
    ) -> CommandResult {
        let (count, file) = parse_count_and_file(args, self.usage())?;
        let lines = read_source(file, ctx, stdin, "tail", self.usage())?;
        let skip = lines.len().saturating_sub(count);
        Ok(lines[skip..].join("\n"))
    }
}

fn parse_count_and_file<'a>(
    args: &'a [String],
    usage: &str,
) -> Result<(usize, Option<&'a str>), String> {
    let mut count = 10;
    let mut file = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-n" => {
                let val = args.get(i + 1).ok_or_else(|| format!("usage: {}", usage))?;
                count = val
                    .parse()
                    .map_err(|_| format!("invalid line count: '{}'", val))?;
                i += 1;
            }
            s if s.starts_with('-') => return Err(format!("invalid option '{}'", s)),
            s => file = Some(s),
        }
        i += 1;
    }
    Ok((count, file))
}

/// wc [file] - lines, words, chars
pub struct WcCommand;

impl Command for WcCommand {
    fn name(&self) -> &'static str {
        "wc"
    }
    fn description(&self) -> &'static str {
        "count lines, words and characters"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::File
    }
    fn usage(&self) -> &'static str {
        "wc [file]"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        stdin: Option<&str>,
    ) -> CommandResult {
        let file = args.first().map(|s| s.as_str());
        let lines = read_source(file, ctx, stdin, "wc", self.usage())?;
        let words: usize = lines.iter().map(|l| l.split_whitespace().count()).sum();
        let chars: usize = lines.iter().map(|l| l.chars().count()).sum();
        let label = file.map(|f| format!(" {}", f.to_lowercase())).unwrap_or_default();
        Ok(format!("{:>7} {:>7} {:>7}{}", lines.len(), words, chars, label))
    }
}

/// file <name> - extension-based classification, happily describes ghosts
pub struct FileCommand;

impl Command for FileCommand {
    fn name(&self) -> &'static str {
        "file"
    }
    fn description(&self) -> &'static str {
        "describe a file's type"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::File
    }
    fn usage(&self) -> &'static str {
        "file <name>"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        let name = match args.first() {
            Some(n) => n,
            None => return Err(format!("usage: {}", self.usage())),
        };
        if ctx.fs.is_directory(name) {
            return Ok(format!("{}: directory", name.to_lowercase()));
        }
        Ok(format!("{}: {}", name.to_lowercase(), ctx.fs.get_file_type(name)))
    }
}

// --- the theatrical section: everything below always denies ---------------

/// Fake kernel panic staged as delayed lines, ending in a session reset.
/// This is the one `rm` invocation that "succeeds".
fn fake_panic(ctx: &mut TerminalContext) -> CommandResult {
    ctx.say_later(
        700,
        vec![
            "rm: descending into '/' ...".to_string(),
            "rm: removed '/usr'".to_string(),
            "rm: removed '/home'".to_string(),
        ],
    );
    ctx.say_later(
        1600,
        vec![
            "[  0.000042] EXT4-fs error (device sda1): unable to read superblock".to_string(),
            "[  0.000108] Kernel panic - not syncing: Attempted to kill init!".to_string(),
            "[  0.000191] ---[ end Kernel panic - not syncing ]---".to_string(),
        ],
    );
    ctx.emit(Effect::ResetSession { delay_ms: 3400 });
    Ok("rm: are you sure? too late.".to_string())
}

fn is_rm_rf_root(args: &[String]) -> bool {
    let joined = args.join(" ");
    matches!(joined.as_str(), "-rf /" | "-fr /" | "-rf /*" | "-fr /*" | "-r -f /")
}

/// rm - always denied, except for the one input everyone tries
pub struct RmCommand;

impl Command for RmCommand {
    fn name(&self) -> &'static str {
        "rm"
    }
    fn description(&self) -> &'static str {
        "remove files (it won't)"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::File
    }
    fn usage(&self) -> &'static str {
        "rm [-rf] <file>"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        if args.is_empty() {
            return Err(format!("usage: {}", self.usage()));
        }
        if is_rm_rf_root(args) {
            return fake_panic(ctx);
        }
        let target = args
            .iter()
            .find(|a| !a.starts_with('-'))
            .map(|s| s.as_str())
            .unwrap_or("/");
        Err(format!(
            "rm: cannot remove '{}': Read-only file system (nice try)",
            target
        ))
    }
}

macro_rules! denied_command {
    ($struct_name:ident, $name:literal, $desc:literal, $usage:literal, $min_args:literal, $msg:literal) => {
        pub struct $struct_name;

        impl Command for $struct_name {
            fn name(&self) -> &'static str {
                $name
            }
            fn description(&self) -> &'static str {
                $desc
            }
            fn category(&self) -> CommandCategory {
                CommandCategory::File
            }
            fn usage(&self) -> &'static str {
                $usage
            }
            fn execute(
                &self,
                args: &[String],
                _ctx: &mut TerminalContext,
                _stdin: Option<&str>,
            ) -> CommandResult {
                if args.len() < $min_args {
                    return Err(format!("usage: {}", self.usage()));
                }
                let target = args
                    .iter()
                    .find(|a| !a.starts_with('-'))
                    .map(|s| s.as_str())
                    .unwrap_or("");
                Err(format!($msg, target))
            }
        }
    };
}

denied_command!(
    MkdirCommand,
    "mkdir",
    "create a directory (it won't)",
    "mkdir <directory>",
    1,
    "mkdir: cannot create directory '{}': Read-only file system"
);

denied_command!(
    TouchCommand,
    "touch",
    "create an empty file (it won't)",
    "touch <file>",
    1,
    "touch: cannot touch '{}': Read-only file system"
);

denied_command!(
    RmdirCommand,
    "rmdir",
    "remove a directory (it won't)",
    "rmdir <directory>",
    1,
    "rmdir: failed to remove '{}': Read-only file system"
);

denied_command!(
    MvCommand,
    "mv",
    "move a file (it won't)",
    "mv <source> <dest>",
    2,
    "mv: cannot move '{}': Read-only file system"
);

denied_command!(
    CpCommand,
    "cp",
    "copy a file (it won't)",
    "cp <source> <dest>",
    2,
    "cp: cannot create regular file '{}': Read-only file system"
);

denied_command!(
    ChmodCommand,
    "chmod",
    "change permissions (it won't)",
    "chmod <mode> <file>",
    2,
    "chmod: changing permissions of '{}': Operation not permitted"
);

denied_command!(
    ChownCommand,
    "chown",
    "change ownership (it won't)",
    "chown <owner> <file>",
    2,
    "chown: changing ownership of '{}': Operation not permitted"
);

denied_command!(
    LnCommand,
    "ln",
    "create a link (it won't)",
    "ln [-s] <target> <link>",
    2,
    "ln: failed to create link near '{}': Read-only file system"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TerminalContext;

    #[test]
    fn test_cat_reads_file() {
        let mut ctx = TerminalContext::new();
        let out = CatCommand
            .execute(&["about.md".to_string()], &mut ctx, None)
            .unwrap();
        assert!(out.contains("# About"));
    }

    #[test]
    fn test_cat_numbered() {
        let mut ctx = TerminalContext::new();
        let out = CatCommand
            .execute(&["-n".to_string(), "contact.md".to_string()], &mut ctx, None)
            .unwrap();
        assert!(out.starts_with("     1\t# Contact"));
    }

    #[test]
    fn test_cat_missing_file() {
        let mut ctx = TerminalContext::new();
        let err = CatCommand
            .execute(&["ghost.md".to_string()], &mut ctx, None)
            .unwrap_err();
        assert_eq!(err, "cat: ghost.md: No such file or directory");
    }

    #[test]
    fn test_cat_directory_refused() {
        let mut ctx = TerminalContext::new();
        let err = CatCommand
            .execute(&["blogs".to_string()], &mut ctx, None)
            .unwrap_err();
        assert_eq!(err, "cat: blogs: Is a directory");
    }

    #[test]
    fn test_cat_root_flag_gated_on_sudo() {
        let mut ctx = TerminalContext::new();
        let err = CatCommand
            .execute(&[".root_flag".to_string()], &mut ctx, None)
            .unwrap_err();
        assert!(err.contains("Permission denied"));

        ctx.sudo_unlocked = true;
        let out = CatCommand
            .execute(&[".root_flag".to_string()], &mut ctx, None)
            .unwrap();
        assert!(out.contains("FLAG{r00t_4cc3ss_gr4nt3d}"));
    }

    #[test]
    fn test_cat_reads_stdin_without_args() {
        let mut ctx = TerminalContext::new();
        let out = CatCommand.execute(&[], &mut ctx, Some("piped")).unwrap();
        assert_eq!(out, "piped");
        let err = CatCommand.execute(&[], &mut ctx, None).unwrap_err();
        assert!(err.starts_with("usage:"));
    }

    #[test]
    fn test_head_tail_counts() {
        let mut ctx = TerminalContext::new();
        let head = HeadCommand
            .execute(
                &["-n".to_string(), "1".to_string(), "about.md".to_string()],
                &mut ctx,
                None,
            )
            .unwrap();
        assert_eq!(head, "# About");
        let tail = TailCommand
            .execute(
                &["-n".to_string(), "1".to_string(), "readme.md".to_string()],
                &mut ctx,
                None,
            )
            .unwrap();
        assert!(tail.contains("flag hidden somewhere"));
    }

    #[test]
    fn test_mutating_commands_never_change_state() {
        let mut ctx = TerminalContext::new();
        let before = ctx.fs.file_names();
        let attempts: Vec<(&dyn Command, Vec<&str>)> = vec![
            (&RmCommand, vec!["about.md"]),
            (&MkdirCommand, vec!["newdir"]),
            (&TouchCommand, vec!["new.txt"]),
            (&MvCommand, vec!["about.md", "b.md"]),
            (&CpCommand, vec!["about.md", "b.md"]),
            (&ChmodCommand, vec!["755", "about.md"]),
            (&ChownCommand, vec!["root", "about.md"]),
            (&LnCommand, vec!["about.md", "link.md"]),
            (&RmdirCommand, vec!["blogs"]),
        ];
        for (cmd, args) in attempts {
            let args: Vec<String> = args.into_iter().map(String::from).collect();
            let result = cmd.execute(&args, &mut ctx, None);
            assert!(result.is_err(), "{} should deny", cmd.name());
        }
        assert_eq!(ctx.fs.file_names(), before);
        assert!(ctx.fs.get_file_content("about.md").is_some());
        assert!(ctx.effects.is_empty());
    }

    #[test]
    fn test_mutating_commands_usage_errors() {
        let mut ctx = TerminalContext::new();
        for cmd in [
            &MkdirCommand as &dyn Command,
            &TouchCommand,
            &RmdirCommand,
        ] {
            let err = cmd.execute(&[], &mut ctx, None).unwrap_err();
            assert!(err.starts_with("usage:"), "{}", cmd.name());
        }
        // two-operand commands also reject a single operand
        let err = MvCommand
            .execute(&["about.md".to_string()], &mut ctx, None)
            .unwrap_err();
        assert!(err.starts_with("usage:"));
    }

    #[test]
    fn test_rm_rf_root_triggers_panic_sequence() {
        let mut ctx = TerminalContext::new();
        let out = RmCommand
            .execute(&["-rf".to_string(), "/".to_string()], &mut ctx, None)
            .unwrap();
        assert!(out.contains("too late"));
        assert!(matches!(
            ctx.effects.last(),
            Some(Effect::ResetSession { .. })
        ));
        // filesystem still intact, of course
        assert!(ctx.fs.get_file_content("about.md").is_some());
    }

    #[test]
    fn test_plain_rm_denied() {
        let mut ctx = TerminalContext::new();
        let err = RmCommand
            .execute(&["about.md".to_string()], &mut ctx, None)
            .unwrap_err();
        assert!(err.contains("Read-only file system"));
    }

    #[test]
    fn test_wc_counts() {
        let mut ctx = TerminalContext::new();
        let out = WcCommand
            .execute(&[], &mut ctx, Some("one two\nthree"))
            .unwrap();
        assert!(out.contains("2"));
        assert!(out.contains("3"));
    }

    #[test]
    fn test_file_describes_ghosts_too() {
        let mut ctx = TerminalContext::new();
        let out = FileCommand
            .execute(&["ghost.md".to_string()], &mut ctx, None)
            .unwrap();
        assert_eq!(out, "ghost.md: Markdown document, UTF-8 Unicode text");
        let dir = FileCommand
            .execute(&["blogs".to_string()], &mut ctx, None)
            .unwrap();
        assert_eq!(dir, "blogs: directory");
    }
}
