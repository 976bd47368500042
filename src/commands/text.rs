use crate::command::{Command, CommandCategory, CommandResult};
use crate::context::TerminalContext;
use regex::RegexBuilder;

pub fn commands() -> Vec<Box<dyn Command + Send + Sync>> {
    vec![
        Box::new(EchoCommand),
        Box::new(GrepCommand),
        Box::new(SortCommand),
        Box::new(UniqCommand),
        Box::new(RevCommand),
    ]
}

/// echo ignores piped stdin on purpose: in `echo A | echo B` only B survives.
pub struct EchoCommand;

impl Command for EchoCommand {
    fn name(&self) -> &'static str {
        "echo"
    }
    fn description(&self) -> &'static str {
        "print arguments"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Text
    }
    fn usage(&self) -> &'static str {
        "echo [text]"
    }
    fn execute(
        &self,
        args: &[String],
        _ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        Ok(args.join(" "))
    }
}

/// grep [-i] <pattern> [file]
pub struct GrepCommand;

impl Command for GrepCommand {
    fn name(&self) -> &'static str {
        "grep"
    }
    fn description(&self) -> &'static str {
        "search lines matching a pattern"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Text
    }
    fn usage(&self) -> &'static str {
        "grep [-i] <pattern> [file]"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        stdin: Option<&str>,
    ) -> CommandResult {
        let mut ignore_case = false;
        let mut rest: Vec<&str> = Vec::new();
        for arg in args {
            match arg.as_str() {
                "-i" => ignore_case = true,
                s => rest.push(s),
            }
        }
        let pattern = match rest.first() {
            Some(p) => *p,
            None => return Err(format!("usage: {}", self.usage())),
        };
        let re = RegexBuilder::new(pattern)
            .case_insensitive(ignore_case)
            .build()
            .map_err(|e| format!("grep: invalid pattern: {}", e))?;

        let lines: Vec<String> = match rest.get(1) {
            Some(file) if file.to_lowercase().ends_with(".root_flag") && !ctx.sudo_unlocked => {
                return Err(format!("grep: {}: Permission denied", file));
            }
            Some(file) => match ctx.fs.get_file_content(file) {
                Some(content) => content.iter().map(|l| l.to_string()).collect(),
                None => return Err(format!("grep: {}: No such file or directory", file)),
            },
            None => match stdin {
                Some(text) => text.lines().map(|l| l.to_string()).collect(),
                None => return Err(format!("usage: {}", self.usage())),
            },
        };

        Ok(lines
            .into_iter()
            .filter(|l| re.is_match(l))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// sort [-r] [file]
pub struct SortCommand;

impl Command for SortCommand {
    fn name(&self) -> &'static str {
        "sort"
    }
    fn description(&self) -> &'static str {
        "sort lines"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Text
    }
    fn usage(&self) -> &'static str {
        "sort [-r] [file]"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        stdin: Option<&str>,
    ) -> CommandResult {
        let mut reverse = false;
        let mut file = None;
        for arg in args {
            match arg.as_str() {
                "-r" => reverse = true,
                s => file = Some(s),
            }
        }
        let mut lines = source_lines(file, ctx, stdin, self.usage())?;
        lines.sort();
        if reverse {
            lines.reverse();
        }
        Ok(lines.join("\n"))
    }
}

/// uniq [file] - collapse consecutive duplicates
pub struct UniqCommand;

impl Command for UniqCommand {
    fn name(&self) -> &'static str {
        "uniq"
    }
    fn description(&self) -> &'static str {
        "collapse repeated adjacent lines"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Text
    }
    fn usage(&self) -> &'static str {
        "uniq [file]"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        stdin: Option<&str>,
    ) -> CommandResult {
        let file = args.first().map(|s| s.as_str());
        let lines = source_lines(file, ctx, stdin, self.usage())?;
        let mut out: Vec<String> = Vec::new();
        for line in lines {
            if out.last().map(|l| l.as_str()) != Some(line.as_str()) {
                out.push(line);
            }
        }
        Ok(out.join("\n"))
    }
}

/// rev - reverse each line, from args or stdin
pub struct RevCommand;

impl Command for RevCommand {
    fn name(&self) -> &'static str {
        "rev"
    }
    fn description(&self) -> &'static str {
        "reverse characters of each line"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Text
    }
    fn usage(&self) -> &'static str {
        "rev [text]"
    }
    fn execute(
        &self,
        args: &[String],
        _ctx: &mut TerminalContext,
        stdin: Option<&str>,
    ) -> CommandResult {
        let text = if args.is_empty() {
            match stdin {
                Some(t) => t.to_string(),
                None => return Err(format!("usage: {}", self.usage())),
            }
        } else {
            args.join(" ")
        };
        Ok(text
            .lines()
            .map(|l| l.chars().rev().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

fn source_lines(
    file: Option<&str>,
    ctx: &TerminalContext,
    stdin: Option<&str>,
    usage: &str,
) -> Result<Vec<String>, String> {
    match file {
        Some(name) if name.to_lowercase().ends_with(".root_flag") && !ctx.sudo_unlocked => {
            Err(format!("{}: Permission denied", name))
        }
        Some(name) => match ctx.fs.get_file_content(name) {
            Some(content) => Ok(content.iter().map(|l| l.to_string()).collect()),
            None => Err(format!("{}: No such file or directory", name)),
        },
        None => match stdin {
            Some(text) => Ok(text.lines().map(|l| l.to_string()).collect()),
            None => Err(format!("usage: {}", usage)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TerminalContext;

    #[test]
    fn test_echo_joins_and_ignores_stdin() {
        let mut ctx = TerminalContext::new();
        let out = EchoCommand
            .execute(
                &["hello".to_string(), "world".to_string()],
                &mut ctx,
                Some("ignored"),
            )
            .unwrap();
        assert_eq!(out, "hello world");
    }

    #[test]
    fn test_grep_file_and_stdin() {
        let mut ctx = TerminalContext::new();
        let out = GrepCommand
            .execute(
                &["rust".to_string(), "skills.json".to_string()],
                &mut ctx,
                None,
            )
            .unwrap();
        assert!(out.contains("rust"));

        let out = GrepCommand
            .execute(&["b".to_string()], &mut ctx, Some("abc\nxyz\nbcd"))
            .unwrap();
        assert_eq!(out, "abc\nbcd");
    }

    #[test]
    fn test_grep_case_insensitive_flag() {
        let mut ctx = TerminalContext::new();
        let out = GrepCommand
            .execute(&["-i".to_string(), "OSAKA".to_string(), "about.md".to_string()], &mut ctx, None)
            .unwrap();
        assert!(out.contains("Osaka"));
    }

    #[test]
    fn test_grep_bad_regex() {
        let mut ctx = TerminalContext::new();
        let err = GrepCommand
            .execute(&["[".to_string()], &mut ctx, Some("x"))
            .unwrap_err();
        assert!(err.starts_with("grep: invalid pattern"));
    }

    #[test]
    fn test_sort_and_uniq() {
        let mut ctx = TerminalContext::new();
        let out = SortCommand
            .execute(&[], &mut ctx, Some("pear\napple\npear"))
            .unwrap();
        assert_eq!(out, "apple\npear\npear");
        let out = UniqCommand
            .execute(&[], &mut ctx, Some("apple\npear\npear"))
            .unwrap();
        assert_eq!(out, "apple\npear");
    }

    #[test]
    fn test_grep_respects_root_flag_gate() {
        let mut ctx = TerminalContext::new();
        let err = GrepCommand
            .execute(
                &["FLAG".to_string(), ".root_flag".to_string()],
                &mut ctx,
                None,
            )
            .unwrap_err();
        assert!(err.contains("Permission denied"));
        ctx.sudo_unlocked = true;
        let out = GrepCommand
            .execute(
                &["FLAG".to_string(), ".root_flag".to_string()],
                &mut ctx,
                None,
            )
            .unwrap();
        assert!(out.contains("FLAG{r00t_4cc3ss_gr4nt3d}"));
    }

    #[test]
    fn test_rev() {
        let mut ctx = TerminalContext::new();
        let out = RevCommand
            .execute(&["abc".to_string()], &mut ctx, None)
            .unwrap();
        assert_eq!(out, "cba");
    }
}
